use super::{DocumentStore, Keyspace, StoreError};
use crate::models::Collection;
use crate::query::{Page, TravelQuery};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Value, json};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

type Documents = BTreeMap<String, Value>;

/// Process-local document store. Queries follow the same matching, ordering and paging rules as
/// the Postgres store so either backend can serve the API.
#[derive(Default)]
pub struct MemoryDocumentStore {
    keyspace: Keyspace,
    collections: RwLock<HashMap<Collection, Documents>>,
}

impl MemoryDocumentStore {
    pub fn new(keyspace: Keyspace) -> Self {
        Self {
            keyspace,
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or overwrites a document without the existence checks of [`DocumentStore::insert`].
    pub fn upsert(&self, collection: Collection, key: &str, document: Value) {
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .insert(key.to_string(), document);
    }

    pub fn len(&self) -> usize {
        self.collections.read().values().map(BTreeMap::len).sum()
    }

    fn list(&self, collection: Collection, sort_field: &str, country: Option<&str>) -> Vec<Value> {
        let collections = self.collections.read();
        let mut matches = collections
            .get(&collection)
            .into_iter()
            .flatten()
            .filter(|(_, doc)| match country {
                Some(country) => lowercase_field(doc, "country").as_deref() == Some(country),
                None => true,
            })
            .collect::<Vec<_>>();

        matches.sort_by(|(a_key, a), (b_key, b)| {
            nulls_last(str_field(a, sort_field), str_field(b, sort_field))
                .then_with(|| a_key.cmp(b_key))
        });
        matches.into_iter().map(|(_, doc)| doc.clone()).collect()
    }

    fn direct_connections(&self, airport: &str) -> Vec<Value> {
        let collections = self.collections.read();
        let faa_codes = collections
            .get(&Collection::Airport)
            .into_iter()
            .flatten()
            .filter(|(_, doc)| lowercase_field(doc, "faa").as_deref() == Some(airport))
            .filter_map(|(_, doc)| str_field(doc, "faa"))
            .collect::<BTreeSet<_>>();

        collections
            .get(&Collection::Route)
            .into_iter()
            .flatten()
            .filter(|(_, route)| {
                str_field(route, "sourceairport").is_some_and(|src| faa_codes.contains(src))
                    && route.get("stops").and_then(Value::as_i64) == Some(0)
            })
            .filter_map(|(_, route)| str_field(route, "destinationairport"))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|destination| json!({ "destinationairport": destination }))
            .collect()
    }

    fn airlines_to_airport(&self, airport: &str) -> Vec<Value> {
        let collections = self.collections.read();
        let airline_ids = collections
            .get(&Collection::Route)
            .into_iter()
            .flatten()
            .filter(|(_, route)| {
                lowercase_field(route, "destinationairport").as_deref() == Some(airport)
            })
            .filter_map(|(_, route)| str_field(route, "airlineid"))
            .collect::<BTreeSet<_>>();

        let Some(airlines) = collections.get(&Collection::Airline) else {
            return Vec::new();
        };
        let mut matches = airline_ids
            .into_iter()
            .filter_map(|id| airlines.get_key_value(id))
            .collect::<Vec<_>>();

        matches.sort_by(|(a_key, a), (b_key, b)| {
            nulls_last(str_field(a, "name"), str_field(b, "name")).then_with(|| a_key.cmp(b_key))
        });
        matches.into_iter().map(|(_, doc)| doc.clone()).collect()
    }
}

fn str_field<'a>(doc: &'a Value, field: &str) -> Option<&'a str> {
    doc.get(field).and_then(Value::as_str)
}

fn lowercase_field(doc: &Value, field: &str) -> Option<String> {
    str_field(doc, field).map(str::to_lowercase)
}

fn nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn paginate(docs: Vec<Value>, page: Page) -> Vec<Value> {
    let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit).unwrap_or(0);
    docs.into_iter().skip(offset).take(limit).collect()
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn keyspace(&self) -> &Keyspace {
        &self.keyspace
    }

    async fn get(&self, collection: Collection, key: &str) -> Result<Value, StoreError> {
        self.collections
            .read()
            .get(&collection)
            .and_then(|docs| docs.get(key))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection,
                key: key.to_string(),
            })
    }

    async fn insert(
        &self,
        collection: Collection,
        key: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        let docs = collections.entry(collection).or_default();
        if docs.contains_key(key) {
            return Err(StoreError::AlreadyExists {
                collection,
                key: key.to_string(),
            });
        }
        docs.insert(key.to_string(), document);
        Ok(())
    }

    async fn replace(
        &self,
        collection: Collection,
        key: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        match collections
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(key))
        {
            Some(existing) => {
                *existing = document;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                collection,
                key: key.to_string(),
            }),
        }
    }

    async fn remove(&self, collection: Collection, key: &str) -> Result<(), StoreError> {
        self.collections
            .write()
            .get_mut(&collection)
            .and_then(|docs| docs.remove(key))
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                collection,
                key: key.to_string(),
            })
    }

    async fn query(&self, query: &TravelQuery) -> Result<Vec<Value>, StoreError> {
        let docs = match query {
            TravelQuery::List {
                listing, country, ..
            } => self.list(
                listing.collection(),
                listing.sort_field(),
                country.as_deref(),
            ),
            TravelQuery::DirectConnections { airport, .. } => self.direct_connections(airport),
            TravelQuery::AirlinesToAirport { airport, .. } => self.airlines_to_airport(airport),
        };
        Ok(paginate(docs, query.page()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len() == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryDocumentStore {
        let store = MemoryDocumentStore::default();
        store.upsert(
            Collection::Airline,
            "airline_10",
            json!({"name": "40-Mile Air", "country": "United States", "callsign": "MILE-AIR"}),
        );
        store.upsert(
            Collection::Airline,
            "airline_137",
            json!({"name": "Air France", "country": "France", "callsign": "AIRFRANS"}),
        );
        store.upsert(
            Collection::Airline,
            "airline_24",
            json!({"name": "American Airlines", "country": "United States", "callsign": "AMERICAN"}),
        );
        store.upsert(
            Collection::Airline,
            "airline_99",
            json!({"country": "United States", "callsign": "NONAME"}),
        );
        store.upsert(
            Collection::Airport,
            "airport_3469",
            json!({"airportname": "San Francisco Intl", "faa": "SFO", "country": "United States"}),
        );
        store.upsert(
            Collection::Route,
            "route_1",
            json!({"airlineid": "airline_24", "sourceairport": "SFO", "destinationairport": "JFK", "stops": 0}),
        );
        store.upsert(
            Collection::Route,
            "route_2",
            json!({"airlineid": "airline_137", "sourceairport": "SFO", "destinationairport": "JFK", "stops": 0}),
        );
        store.upsert(
            Collection::Route,
            "route_3",
            json!({"airlineid": "airline_24", "sourceairport": "SFO", "destinationairport": "LAX", "stops": 1}),
        );
        store.upsert(
            Collection::Route,
            "route_4",
            json!({"airlineid": "airline_10", "sourceairport": "SFO", "destinationairport": "ANC", "stops": 0}),
        );
        store.upsert(
            Collection::Route,
            "route_5",
            json!({"airlineid": "airline_404", "sourceairport": "LAX", "destinationairport": "JFK", "stops": 0}),
        );
        store
    }

    fn names(docs: &[Value]) -> Vec<Option<&str>> {
        docs.iter().map(|d| str_field(d, "name")).collect()
    }

    #[tokio::test]
    async fn list_filters_country_case_insensitively_and_sorts_nulls_last() {
        let store = store();
        let docs = store
            .query(&TravelQuery::airlines(Some("UNITED states"), Page::default()))
            .await
            .unwrap();

        assert_eq!(
            names(&docs),
            vec![Some("40-Mile Air"), Some("American Airlines"), None]
        );
    }

    #[tokio::test]
    async fn list_pages_with_limit_and_offset() {
        let store = store();
        let page = Page::new(Some(2), Some(1)).unwrap();
        let docs = store
            .query(&TravelQuery::airlines(None, page))
            .await
            .unwrap();

        assert_eq!(names(&docs), vec![Some("Air France"), Some("American Airlines")]);

        let past_end = Page::new(Some(10), Some(50)).unwrap();
        let docs = store
            .query(&TravelQuery::airlines(None, past_end))
            .await
            .unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn direct_connections_are_distinct_and_non_stop() {
        let store = store();
        let docs = store
            .query(&TravelQuery::direct_connections("sfo", Page::default()))
            .await
            .unwrap();

        assert_eq!(
            docs,
            vec![
                json!({"destinationairport": "ANC"}),
                json!({"destinationairport": "JFK"}),
            ]
        );
    }

    #[tokio::test]
    async fn airlines_to_airport_skips_dangling_airline_ids() {
        let store = store();
        let docs = store
            .query(&TravelQuery::airlines_to_airport("jfk", Page::default()))
            .await
            .unwrap();

        assert_eq!(names(&docs), vec![Some("Air France"), Some("American Airlines")]);
    }

    #[tokio::test]
    async fn unknown_airport_yields_no_rows() {
        let store = store();
        let docs = store
            .query(&TravelQuery::direct_connections("xxx", Page::default()))
            .await
            .unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn insert_replace_remove_lifecycle() {
        let store = MemoryDocumentStore::default();
        assert!(store.is_empty().await.unwrap());

        store
            .insert(Collection::Route, "route_1", json!({"stops": 0}))
            .await
            .unwrap();
        store
            .replace(Collection::Route, "route_1", json!({"stops": 2}))
            .await
            .unwrap();
        assert_eq!(
            store.get(Collection::Route, "route_1").await.unwrap(),
            json!({"stops": 2})
        );

        store.remove(Collection::Route, "route_1").await.unwrap();
        assert!(matches!(
            store.get(Collection::Route, "route_1").await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(store.is_empty().await.unwrap());
    }
}
