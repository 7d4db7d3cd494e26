use crate::state::AppState;
use crate::v1::extractors::ValidatedJson;
use crate::v1::handlers::airline::{
    airlines_to_airport, create_airline, delete_airline, get_airline, list_airlines,
    update_airline,
};
use crate::v1::handlers::airport::{
    create_airport, delete_airport, direct_connections, get_airport, list_airports,
    update_airport,
};
use crate::v1::handlers::crud;
use crate::v1::handlers::health::{health, ready};
use crate::v1::handlers::route::{create_route, delete_route, get_route, update_route};
use axum::Router;
use axum::extract::State;
use axum::routing::{MethodRouter, delete, get};
use shared::models::{Airline, Airport, Document};
use shared::store::Gateway;

/// Collection routes, mounted under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::<AppState>::new()
        .route(
            "/airline/list",
            get(list_airlines).merge(writes_to_key::<Airline>("list")),
        )
        .route(
            "/airline/to-airport",
            get(airlines_to_airport).merge(writes_to_key::<Airline>("to-airport")),
        )
        .route(
            "/airline/{id}",
            get(get_airline)
                .post(create_airline)
                .put(update_airline)
                .delete(delete_airline),
        )
        .route(
            "/airport/list",
            get(list_airports).merge(writes_to_key::<Airport>("list")),
        )
        .route(
            "/airport/direct-connections",
            get(direct_connections).merge(writes_to_key::<Airport>("direct-connections")),
        )
        .route(
            "/airport/{id}",
            get(get_airport)
                .post(create_airport)
                .put(update_airport)
                .delete(delete_airport),
        )
        .route(
            "/route/{id}",
            get(get_route)
                .post(create_route)
                .put(update_route)
                .delete(delete_route),
        )
}

/// POST, PUT and DELETE for a document whose key collides with a static query path. GET on that
/// path keeps running the query.
fn writes_to_key<D: Document>(key: &'static str) -> MethodRouter<AppState> {
    delete(move |State(db): State<Gateway>| async move {
        crud::delete::<D>(&db, key.to_string()).await
    })
    .post(
        move |State(db): State<Gateway>, ValidatedJson(request): ValidatedJson<D::CreateRequest>| async move {
            crud::create::<D>(&db, key.to_string(), request).await
        },
    )
    .put(
        move |State(db): State<Gateway>, ValidatedJson(request): ValidatedJson<D::CreateRequest>| async move {
            crud::update::<D>(&db, key.to_string(), request).await
        },
    )
}

pub fn operational_routes() -> Router<AppState> {
    Router::<AppState>::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}
