//! Typed list and relationship queries, rendered to parameterized SQL for the Postgres
//! document table. User input only ever reaches the database as a bound parameter.

use crate::models::Collection;
use crate::store::Keyspace;
use thiserror::Error;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("limit must be between 1 and {MAX_LIMIT}, got {0}")]
    Limit(i64),
    #[error("offset must not be negative, got {0}")]
    Offset(i64),
}

impl Page {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, PageError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let offset = offset.unwrap_or(DEFAULT_OFFSET);

        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(PageError::Limit(limit));
        }
        if offset < 0 {
            return Err(PageError::Offset(offset));
        }

        Ok(Self { limit, offset })
    }
}

/// Collections that can be listed with an optional country filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Airlines,
    Airports,
}

impl Listing {
    pub fn collection(self) -> Collection {
        match self {
            Listing::Airlines => Collection::Airline,
            Listing::Airports => Collection::Airport,
        }
    }

    pub fn sort_field(self) -> &'static str {
        match self {
            Listing::Airlines => "name",
            Listing::Airports => "airportname",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelQuery {
    /// Documents of one collection, optionally restricted to a (lower-cased) country.
    List {
        listing: Listing,
        country: Option<String>,
        page: Page,
    },
    /// Distinct destinations reachable non-stop from the airport with this (lower-cased) FAA code.
    DirectConnections { airport: String, page: Page },
    /// Airlines operating at least one route into this (lower-cased) destination.
    AirlinesToAirport { airport: String, page: Page },
}

impl TravelQuery {
    pub fn airlines(country: Option<&str>, page: Page) -> Self {
        Self::List {
            listing: Listing::Airlines,
            country: normalize_filter(country),
            page,
        }
    }

    pub fn airports(country: Option<&str>, page: Page) -> Self {
        Self::List {
            listing: Listing::Airports,
            country: normalize_filter(country),
            page,
        }
    }

    pub fn direct_connections(airport: &str, page: Page) -> Self {
        Self::DirectConnections {
            airport: airport.to_lowercase(),
            page,
        }
    }

    pub fn airlines_to_airport(airport: &str, page: Page) -> Self {
        Self::AirlinesToAirport {
            airport: airport.to_lowercase(),
            page,
        }
    }

    pub fn page(&self) -> Page {
        match self {
            TravelQuery::List { page, .. }
            | TravelQuery::DirectConnections { page, .. }
            | TravelQuery::AirlinesToAirport { page, .. } => *page,
        }
    }

    /// Renders the query against the `documents` table. Every row has a single JSONB column `doc`.
    pub fn build(&self, keyspace: &Keyspace) -> BuiltQuery {
        let mut q = BuiltQuery::default();
        let bucket = q.bind(QueryParam::Text(keyspace.bucket.clone()));
        let scope = q.bind(QueryParam::Text(keyspace.scope.clone()));

        match self {
            TravelQuery::List {
                listing,
                country,
                page,
            } => {
                let collection = q.bind(QueryParam::Text(listing.collection().to_string()));
                let mut text = format!(
                    r"SELECT d.body AS doc
FROM documents d
WHERE d.bucket = {bucket} AND d.scope = {scope} AND d.collection = {collection}"
                );
                if let Some(country) = country {
                    let country = q.bind(QueryParam::Text(country.clone()));
                    text.push_str(&format!("\n  AND lower(d.body->>'country') = {country}"));
                }
                let sort_field = listing.sort_field();
                let (limit, offset) = q.bind_page(*page);
                text.push_str(&format!(
                    "\nORDER BY d.body->>'{sort_field}' COLLATE \"C\", d.key\nLIMIT {limit} OFFSET {offset}"
                ));
                q.text = text;
            }
            TravelQuery::DirectConnections { airport, page } => {
                let airports = q.bind(QueryParam::Text(Collection::Airport.to_string()));
                let routes = q.bind(QueryParam::Text(Collection::Route.to_string()));
                let airport = q.bind(QueryParam::Text(airport.clone()));
                let (limit, offset) = q.bind_page(*page);
                q.text = format!(
                    r#"SELECT jsonb_build_object('destinationairport', c.destinationairport) AS doc
FROM (
    SELECT DISTINCT r.body->>'destinationairport' AS destinationairport
    FROM documents a
    JOIN documents r
      ON r.bucket = a.bucket AND r.scope = a.scope AND r.collection = {routes}
     AND r.body->>'sourceairport' = a.body->>'faa'
    WHERE a.bucket = {bucket} AND a.scope = {scope} AND a.collection = {airports}
      AND lower(a.body->>'faa') = {airport}
      AND r.body->'stops' = '0'::jsonb
) c
ORDER BY c.destinationairport COLLATE "C"
LIMIT {limit} OFFSET {offset}"#
                );
            }
            TravelQuery::AirlinesToAirport { airport, page } => {
                let routes = q.bind(QueryParam::Text(Collection::Route.to_string()));
                let airlines = q.bind(QueryParam::Text(Collection::Airline.to_string()));
                let airport = q.bind(QueryParam::Text(airport.clone()));
                let (limit, offset) = q.bind_page(*page);
                q.text = format!(
                    r#"SELECT air.body AS doc
FROM (
    SELECT DISTINCT al.key AS airline_id
    FROM documents r
    JOIN documents al
      ON al.bucket = r.bucket AND al.scope = r.scope AND al.collection = {airlines}
     AND al.key = r.body->>'airlineid'
    WHERE r.bucket = {bucket} AND r.scope = {scope} AND r.collection = {routes}
      AND lower(r.body->>'destinationairport') = {airport}
) s
JOIN documents air
  ON air.bucket = {bucket} AND air.scope = {scope} AND air.collection = {airlines}
 AND air.key = s.airline_id
ORDER BY air.body->>'name' COLLATE "C", air.key
LIMIT {limit} OFFSET {offset}"#
                );
            }
        }

        q
    }
}

fn normalize_filter(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_lowercase)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    Text(String),
    Int(i64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuiltQuery {
    pub text: String,
    pub params: Vec<QueryParam>,
}

impl BuiltQuery {
    /// Appends a parameter and returns its `$n` placeholder.
    fn bind(&mut self, param: QueryParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    fn bind_page(&mut self, page: Page) -> (String, String) {
        let limit = self.bind(QueryParam::Int(page.limit));
        let offset = self.bind(QueryParam::Int(page.offset));
        (limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyspace() -> Keyspace {
        Keyspace::new("travel-sample", "inventory")
    }

    fn text(value: &str) -> QueryParam {
        QueryParam::Text(value.to_string())
    }

    #[test]
    fn page_defaults_and_bounds() {
        assert_eq!(Page::new(None, None), Ok(Page { limit: 10, offset: 0 }));
        assert_eq!(Page::new(Some(0), None), Err(PageError::Limit(0)));
        assert_eq!(Page::new(Some(101), None), Err(PageError::Limit(101)));
        assert_eq!(Page::new(Some(5), Some(-1)), Err(PageError::Offset(-1)));
        assert_eq!(Page::new(Some(100), Some(30)), Ok(Page { limit: 100, offset: 30 }));
    }

    #[test]
    fn list_without_country_omits_filter() {
        let built = TravelQuery::airlines(None, Page::default()).build(&keyspace());

        assert!(!built.text.contains("country"));
        assert!(built.text.contains("ORDER BY d.body->>'name'"));
        assert_eq!(
            built.params,
            vec![
                text("travel-sample"),
                text("inventory"),
                text("airline"),
                QueryParam::Int(10),
                QueryParam::Int(0),
            ]
        );
    }

    #[test]
    fn empty_country_is_treated_as_absent() {
        assert_eq!(
            TravelQuery::airports(Some(""), Page::default()),
            TravelQuery::airports(None, Page::default())
        );
    }

    #[test]
    fn list_binds_lowercased_country() {
        let page = Page::new(Some(5), Some(15)).unwrap();
        let built = TravelQuery::airports(Some("United States"), page).build(&keyspace());

        assert!(built.text.contains("lower(d.body->>'country') = $4"));
        assert!(built.text.contains("ORDER BY d.body->>'airportname'"));
        assert!(built.text.contains("LIMIT $5 OFFSET $6"));
        assert_eq!(built.params[3], text("united states"));
        assert_eq!(built.params[4..], [QueryParam::Int(5), QueryParam::Int(15)]);
    }

    #[test]
    fn user_input_never_reaches_query_text() {
        let hostile = "x' OR '1'='1";
        let queries = [
            TravelQuery::airlines(Some(hostile), Page::default()),
            TravelQuery::direct_connections(hostile, Page::default()),
            TravelQuery::airlines_to_airport(hostile, Page::default()),
        ];

        for query in queries {
            let built = query.build(&keyspace());
            assert!(!built.text.contains(&hostile.to_lowercase()), "{}", built.text);
            assert!(built.params.contains(&text(&hostile.to_lowercase())));
        }
    }

    #[test]
    fn placeholders_match_param_count() {
        let queries = [
            TravelQuery::airlines(Some("France"), Page::default()),
            TravelQuery::direct_connections("SFO", Page::default()),
            TravelQuery::airlines_to_airport("SFO", Page::default()),
        ];

        for query in queries {
            let built = query.build(&keyspace());
            let n = built.params.len();
            assert!(built.text.contains(&format!("${n}")));
            assert!(!built.text.contains(&format!("${}", n + 1)));
        }
    }

    #[test]
    fn direct_connections_filters_non_stop_routes() {
        let built = TravelQuery::direct_connections("SFO", Page::default()).build(&keyspace());

        assert!(built.text.contains("SELECT DISTINCT r.body->>'destinationairport'"));
        assert!(built.text.contains("r.body->'stops' = '0'::jsonb"));
        assert!(built.text.contains("ORDER BY c.destinationairport"));
        assert_eq!(built.params[4], text("sfo"));
    }

    #[test]
    fn airlines_to_airport_joins_on_airline_key() {
        let built = TravelQuery::airlines_to_airport("JFK", Page::default()).build(&keyspace());

        assert!(built.text.contains("al.key = r.body->>'airlineid'"));
        assert!(built.text.contains("air.key = s.airline_id"));
        assert_eq!(built.params[2], text("route"));
        assert_eq!(built.params[3], text("airline"));
        assert_eq!(built.params[4], text("jfk"));
    }
}
