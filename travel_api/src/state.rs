use axum::extract::FromRef;
use shared::store::{DocumentStore, Gateway};
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Gateway,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            db: Gateway::new(store),
        }
    }
}
