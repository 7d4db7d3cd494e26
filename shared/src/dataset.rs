//! Reading of travel-sample JSON-lines exports: one document per line carrying its own `type`
//! and `id`.

use crate::models::{Airline, Airport, Collection, Document, Route};
use crate::store::MemoryDocumentStore;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: invalid document: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
    #[error("line {line}: document has no usable {field:?} field")]
    MissingField { line: usize, field: &'static str },
}

/// A document ready to be written under `"{type}_{id}"` in its collection.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRecord {
    pub collection: Collection,
    pub key: String,
    pub document: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetLine {
    Record(DatasetRecord),
    /// A document of a type this service does not serve, such as `hotel` or `landmark`.
    Skipped { kind: String },
    Blank,
}

pub async fn read_dataset(path: &Path) -> Result<String, DatasetError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Parses every line of `contents`, numbering lines from 1.
pub fn lines(contents: &str) -> impl Iterator<Item = Result<DatasetLine, DatasetError>> + '_ {
    contents
        .lines()
        .enumerate()
        .map(|(index, line)| parse_line(line, index + 1))
}

pub fn parse_line(line: &str, line_number: usize) -> Result<DatasetLine, DatasetError> {
    if line.trim().is_empty() {
        return Ok(DatasetLine::Blank);
    }

    let json_error = |source| DatasetError::Json {
        line: line_number,
        source,
    };
    let document: Value = serde_json::from_str(line).map_err(json_error)?;

    let kind = document
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DatasetError::MissingField {
            line: line_number,
            field: "type",
        })?;
    let Ok(collection) = kind.parse::<Collection>() else {
        return Ok(DatasetLine::Skipped {
            kind: kind.to_string(),
        });
    };

    let id = match document.get("id") {
        Some(Value::Number(id)) => id.to_string(),
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        _ => {
            return Err(DatasetError::MissingField {
                line: line_number,
                field: "id",
            });
        }
    };

    let key = format!("{collection}_{id}");
    let document = normalize(collection, document).map_err(json_error)?;

    Ok(DatasetLine::Record(DatasetRecord {
        collection,
        key,
        document,
    }))
}

/// Drops fields the typed model does not know (`id`, a stray `type`, ...) and fills defaults.
pub fn normalize(collection: Collection, document: Value) -> Result<Value, serde_json::Error> {
    fn through<D: Document>(document: Value) -> Result<Value, serde_json::Error> {
        serde_json::to_value(serde_json::from_value::<D>(document)?)
    }

    match collection {
        Collection::Airline => through::<Airline>(document),
        Collection::Airport => through::<Airport>(document),
        Collection::Route => through::<Route>(document),
    }
}

/// Loads every supported document of the file at `path` into `store`, returning how many were
/// written.
pub async fn seed_memory_store(
    store: &MemoryDocumentStore,
    path: &Path,
) -> Result<usize, DatasetError> {
    let contents = read_dataset(path).await?;
    let mut written = 0;

    for line in lines(&contents) {
        match line? {
            DatasetLine::Record(record) => {
                store.upsert(record.collection, &record.key, record.document);
                written += 1;
            }
            DatasetLine::Skipped { kind } => {
                debug!(kind = %kind, "skipping unsupported document type");
            }
            DatasetLine::Blank => {}
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn derives_key_from_type_and_id() {
        let line = r#"{"id":10,"type":"airline","name":"40-Mile Air","iata":"Q5","icao":"MLA","callsign":"MILE-AIR","country":"United States"}"#;

        let DatasetLine::Record(record) = parse_line(line, 1).unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(record.collection, Collection::Airline);
        assert_eq!(record.key, "airline_10");
        assert_eq!(
            record.document,
            json!({
                "callsign": "MILE-AIR",
                "country": "United States",
                "iata": "Q5",
                "icao": "MLA",
                "name": "40-Mile Air"
            })
        );
    }

    #[test]
    fn airport_keeps_type_and_drops_missing_faa() {
        let line = r#"{"id":1254,"type":"airport","airportname":"Calais Dunkerque","city":"Calais","country":"France","faa":"CQF","icao":"LFAC","tz":"Europe/Paris","geo":{"lat":50.962097,"lon":1.954764,"alt":12}}"#;
        let DatasetLine::Record(record) = parse_line(line, 3).unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(record.key, "airport_1254");
        assert_eq!(record.document["type"], "airport");
        assert_eq!(record.document["geo"]["alt"], 12.0);

        let line = r#"{"id":"7","type":"airport","airportname":"Nowhere","faa":null}"#;
        let DatasetLine::Record(record) = parse_line(line, 4).unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(record.key, "airport_7");
        assert!(record.document.get("faa").is_none());
    }

    #[test]
    fn unsupported_types_and_blank_lines_are_skipped() {
        assert_eq!(
            parse_line(r#"{"id":1,"type":"hotel","name":"Inn"}"#, 1).unwrap(),
            DatasetLine::Skipped {
                kind: "hotel".to_string()
            }
        );
        assert_eq!(parse_line("   ", 2).unwrap(), DatasetLine::Blank);
    }

    #[test]
    fn malformed_lines_report_line_number() {
        let contents = "{\"id\":1,\"type\":\"route\"}\n{not json";
        let results = lines(contents).collect::<Vec<_>>();

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(DatasetError::Json { line: 2, .. })));
        assert!(matches!(
            parse_line(r#"{"type":"route"}"#, 9),
            Err(DatasetError::MissingField {
                line: 9,
                field: "id"
            })
        ));
        assert!(matches!(
            parse_line(r#"{"id":3}"#, 5),
            Err(DatasetError::MissingField {
                line: 5,
                field: "type"
            })
        ));
    }

    #[tokio::test]
    async fn seeds_bundled_sample() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/travel-sample.jsonl");
        let store = MemoryDocumentStore::default();

        let written = seed_memory_store(&store, &path).await.unwrap();
        assert!(written > 0);
        assert_eq!(store.len(), written);
    }
}
