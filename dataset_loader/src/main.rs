use clap::Parser;
use shared::dataset::{self, DatasetError, DatasetLine};
use shared::error::{ConfigError, InitializationError};
use shared::store::{DocumentStore, Keyspace, PgDocumentStore, StoreError};
use shared::{init_tracing, initialize_db, load_config, shutdown_listener};
use std::path::PathBuf;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Imports a travel-sample JSON-lines export into the Postgres document store.
#[derive(Parser, Debug)]
#[command(name = "dataset_loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON-lines file with one document per line, each carrying `type` and `id`
    #[arg(long, default_value = "./data/travel-sample.jsonl")]
    file: PathBuf,

    /// Replace documents whose key already exists instead of skipping them
    #[arg(long)]
    overwrite: bool,
}

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    Initialization(#[from] InitializationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("a [postgres] section is required to import data")]
    MissingPostgres,
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ImportSummary {
    inserted: usize,
    replaced: usize,
    existing: usize,
    unsupported: usize,
    interrupted: bool,
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    let args = Args::parse();
    init_tracing()?;

    let config = load_config()?;
    let pg_config = config.postgres.as_ref().ok_or(MainError::MissingPostgres)?;
    let pool = initialize_db(pg_config, true).await?;
    let store = PgDocumentStore::new(pool, Keyspace::from(&config.keyspace));

    let token = CancellationToken::new();
    tokio::spawn(shutdown_listener(Some(token.clone())));

    info!(
        name: "import.started",
        file = %args.file.display(),
        overwrite = args.overwrite,
        "importing dataset"
    );
    let contents = dataset::read_dataset(&args.file).await?;
    let summary = import(&store, &contents, args.overwrite, &token).await?;

    info!(
        name: "import.finished",
        inserted = summary.inserted,
        replaced = summary.replaced,
        existing = summary.existing,
        unsupported = summary.unsupported,
        interrupted = summary.interrupted,
        "dataset import finished"
    );
    Ok(())
}

/// Writes every supported document of `contents`, stopping early once `token` is cancelled.
/// A malformed line aborts the import; documents written before it are kept.
async fn import(
    store: &dyn DocumentStore,
    contents: &str,
    overwrite: bool,
    token: &CancellationToken,
) -> Result<ImportSummary, MainError> {
    let mut summary = ImportSummary::default();

    for line in dataset::lines(contents) {
        if token.is_cancelled() {
            warn!("import interrupted");
            summary.interrupted = true;
            break;
        }

        let record = match line? {
            DatasetLine::Record(record) => record,
            DatasetLine::Skipped { kind } => {
                debug!(kind = %kind, "skipping unsupported document type");
                summary.unsupported += 1;
                continue;
            }
            DatasetLine::Blank => continue,
        };

        match store
            .insert(record.collection, &record.key, record.document.clone())
            .await
        {
            Ok(()) => summary.inserted += 1,
            Err(StoreError::AlreadyExists { .. }) if overwrite => {
                store
                    .replace(record.collection, &record.key, record.document)
                    .await?;
                summary.replaced += 1;
            }
            Err(StoreError::AlreadyExists { .. }) => summary.existing += 1,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::models::Collection;
    use shared::store::MemoryDocumentStore;

    const CONTENTS: &str = r#"{"id":10,"type":"airline","name":"40-Mile Air","callsign":"MILE-AIR","country":"United States"}
{"id":1,"type":"hotel","name":"Medway Youth Hostel"}

{"id":3469,"type":"airport","airportname":"San Francisco Intl","faa":"SFO"}
"#;

    #[tokio::test]
    async fn imports_supported_documents() {
        let store = MemoryDocumentStore::default();
        let summary = import(&store, CONTENTS, false, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                inserted: 2,
                unsupported: 1,
                ..Default::default()
            }
        );
        let airport = store.get(Collection::Airport, "airport_3469").await.unwrap();
        assert_eq!(airport["type"], "airport");
    }

    #[tokio::test]
    async fn existing_keys_are_skipped_unless_overwriting() {
        let store = MemoryDocumentStore::default();
        store.upsert(Collection::Airline, "airline_10", json!({"name": "Old"}));

        let summary = import(&store, CONTENTS, false, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(summary.existing, 1);
        let airline = store.get(Collection::Airline, "airline_10").await.unwrap();
        assert_eq!(airline["name"], "Old");

        let summary = import(&store, CONTENTS, true, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(summary.replaced, 2);
        let airline = store.get(Collection::Airline, "airline_10").await.unwrap();
        assert_eq!(airline["name"], "40-Mile Air");
    }

    #[tokio::test]
    async fn cancelled_import_writes_nothing_more() {
        let store = MemoryDocumentStore::default();
        let token = CancellationToken::new();
        token.cancel();

        let summary = import(&store, CONTENTS, false, &token).await.unwrap();
        assert!(summary.interrupted);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn malformed_line_aborts() {
        let store = MemoryDocumentStore::default();
        let result = import(&store, "{\"id\":", false, &CancellationToken::new()).await;
        assert!(matches!(
            result,
            Err(MainError::Dataset(DatasetError::Json { line: 1, .. }))
        ));
    }
}
