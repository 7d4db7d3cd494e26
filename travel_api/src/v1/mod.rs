pub mod error;
mod extractors;
mod handlers;
mod openapi;
mod router;

pub use openapi::ApiDoc;
pub use router::{operational_routes, router};
