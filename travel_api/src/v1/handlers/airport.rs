use crate::v1::error::{ApiError, ErrorMessage};
use crate::v1::extractors::{AirportParam, CountryParam, Pagination, ValidatedJson};
use crate::v1::handlers::crud;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use shared::models::{Airport, AirportCreateRequest, DestinationAirport};
use shared::query::TravelQuery;
use shared::store::Gateway;

/// Get list of Airports. Optionally, you can filter the list by Country.
///
/// This provides an example of using a parameterized query to fetch a list of documents matching
/// the specified criteria.
#[utoipa::path(
    get,
    path = "/api/v1/airport/list",
    params(
        ("country" = Option<String>, Query, description = "Country (Example: United Kingdom, France, United States)"),
        ("limit" = Option<i64>, Query, description = "Number of airports to return (page size). Default value: 10."),
        ("offset" = Option<i64>, Query, description = "Number of airports to skip (for pagination). Default value: 0."),
    ),
    responses(
        (status = 200, description = "Airports sorted by name", body = Vec<Airport>),
        (status = 400, description = "Invalid paging parameters", body = ErrorMessage),
        (status = 500, description = "Unexpected error", body = ErrorMessage),
    ),
    tag = "Airport"
)]
pub async fn list_airports(
    State(db): State<Gateway>,
    CountryParam(country): CountryParam,
    Pagination(page): Pagination,
) -> Result<Json<Vec<Airport>>, ApiError> {
    let query = TravelQuery::airports(country.as_deref(), page);
    Ok(Json(db.query(&query).await?))
}

/// Get Direct Connections from specified Airport.
///
/// Only non-stop routes count; each destination is listed once.
#[utoipa::path(
    get,
    path = "/api/v1/airport/direct-connections",
    params(
        ("airport" = String, Query, description = "Source airport (Example: SFO, LHR, CDG)"),
        ("limit" = Option<i64>, Query, description = "Number of direct connections to return (page size). Default value: 10."),
        ("offset" = Option<i64>, Query, description = "Number of direct connections to skip (for pagination). Default value: 0."),
    ),
    responses(
        (status = 200, description = "Destination airport codes in ascending order", body = Vec<DestinationAirport>),
        (status = 400, description = "Missing airport or invalid paging parameters", body = ErrorMessage),
        (status = 500, description = "Unexpected error", body = ErrorMessage),
    ),
    tag = "Airport"
)]
pub async fn direct_connections(
    State(db): State<Gateway>,
    AirportParam(airport): AirportParam,
    Pagination(page): Pagination,
) -> Result<Json<Vec<DestinationAirport>>, ApiError> {
    let query = TravelQuery::direct_connections(&airport, page);
    Ok(Json(db.query(&query).await?))
}

/// Get Airport with specified ID.
#[utoipa::path(
    get,
    path = "/api/v1/airport/{id}",
    params(("id" = String, Path, description = "Airport ID like airport_1273")),
    responses(
        (status = 200, description = "Airport document", body = Airport),
        (status = 404, description = "No airport with this ID", body = ErrorMessage),
    ),
    tag = "Airport"
)]
pub async fn get_airport(
    State(db): State<Gateway>,
    Path(id): Path<String>,
) -> Result<Json<Airport>, ApiError> {
    crud::get(&db, &id).await
}

/// Create Airport with specified ID.
#[utoipa::path(
    post,
    path = "/api/v1/airport/{id}",
    params(("id" = String, Path, description = "Airport ID like airport_1273")),
    request_body = AirportCreateRequest,
    responses(
        (status = 201, description = "Airport created", body = Airport),
        (status = 400, description = "Malformed JSON body", body = ErrorMessage),
        (status = 409, description = "An airport with this ID already exists", body = ErrorMessage),
        (status = 422, description = "Required fields are missing", body = ErrorMessage),
    ),
    tag = "Airport"
)]
pub async fn create_airport(
    State(db): State<Gateway>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AirportCreateRequest>,
) -> Result<Response, ApiError> {
    crud::create::<Airport>(&db, id, request).await
}

/// Update Airport with specified ID.
#[utoipa::path(
    put,
    path = "/api/v1/airport/{id}",
    params(("id" = String, Path, description = "Airport ID like airport_1273")),
    request_body = AirportCreateRequest,
    responses(
        (status = 200, description = "Airport replaced", body = Airport),
        (status = 400, description = "Malformed JSON body", body = ErrorMessage),
        (status = 404, description = "No airport with this ID", body = ErrorMessage),
        (status = 422, description = "Required fields are missing", body = ErrorMessage),
    ),
    tag = "Airport"
)]
pub async fn update_airport(
    State(db): State<Gateway>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AirportCreateRequest>,
) -> Result<Json<Airport>, ApiError> {
    crud::update(&db, id, request).await
}

/// Delete Airport with specified ID.
#[utoipa::path(
    delete,
    path = "/api/v1/airport/{id}",
    params(("id" = String, Path, description = "Airport ID like airport_1273")),
    responses(
        (status = 200, description = "ID of the deleted airport", body = String),
        (status = 404, description = "No airport with this ID", body = ErrorMessage),
    ),
    tag = "Airport"
)]
pub async fn delete_airport(
    State(db): State<Gateway>,
    Path(id): Path<String>,
) -> Result<Json<String>, ApiError> {
    crud::delete::<Airport>(&db, id).await
}
