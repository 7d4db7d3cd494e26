use crate::v1::error::{ApiError, ErrorMessage};
use crate::v1::extractors::{AirportParam, CountryParam, Pagination, ValidatedJson};
use crate::v1::handlers::crud;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use shared::models::{Airline, AirlineCreateRequest};
use shared::query::TravelQuery;
use shared::store::Gateway;

/// Get list of Airlines. Optionally, you can filter the list by Country.
///
/// This provides an example of using a parameterized query to fetch a list of documents matching
/// the specified criteria.
#[utoipa::path(
    get,
    path = "/api/v1/airline/list",
    params(
        ("country" = Option<String>, Query, description = "Country (Example: France, United Kingdom, United States)"),
        ("limit" = Option<i64>, Query, description = "Number of airlines to return (page size). Default value: 10."),
        ("offset" = Option<i64>, Query, description = "Number of airlines to skip (for pagination). Default value: 0."),
    ),
    responses(
        (status = 200, description = "Airlines sorted by name", body = Vec<Airline>),
        (status = 400, description = "Invalid paging parameters", body = ErrorMessage),
        (status = 500, description = "Unexpected error", body = ErrorMessage),
    ),
    tag = "Airline"
)]
pub async fn list_airlines(
    State(db): State<Gateway>,
    CountryParam(country): CountryParam,
    Pagination(page): Pagination,
) -> Result<Json<Vec<Airline>>, ApiError> {
    let query = TravelQuery::airlines(country.as_deref(), page);
    Ok(Json(db.query(&query).await?))
}

/// Get Airlines flying to specified destination Airport.
///
/// This provides an example of joining documents of two collections in one parameterized query.
#[utoipa::path(
    get,
    path = "/api/v1/airline/to-airport",
    params(
        ("airport" = String, Query, description = "Destination airport (Example: SFO, JFK, LAX)"),
        ("limit" = Option<i64>, Query, description = "Number of airlines to return (page size). Default value: 10."),
        ("offset" = Option<i64>, Query, description = "Number of airlines to skip (for pagination). Default value: 0."),
    ),
    responses(
        (status = 200, description = "Airlines with at least one route into the airport", body = Vec<Airline>),
        (status = 400, description = "Missing airport or invalid paging parameters", body = ErrorMessage),
        (status = 500, description = "Unexpected error", body = ErrorMessage),
    ),
    tag = "Airline"
)]
pub async fn airlines_to_airport(
    State(db): State<Gateway>,
    AirportParam(airport): AirportParam,
    Pagination(page): Pagination,
) -> Result<Json<Vec<Airline>>, ApiError> {
    let query = TravelQuery::airlines_to_airport(&airport, page);
    Ok(Json(db.query(&query).await?))
}

/// Get Airline with specified ID.
#[utoipa::path(
    get,
    path = "/api/v1/airline/{id}",
    params(("id" = String, Path, description = "Airline ID like airline_10")),
    responses(
        (status = 200, description = "Airline document", body = Airline),
        (status = 404, description = "No airline with this ID", body = ErrorMessage),
    ),
    tag = "Airline"
)]
pub async fn get_airline(
    State(db): State<Gateway>,
    Path(id): Path<String>,
) -> Result<Json<Airline>, ApiError> {
    crud::get(&db, &id).await
}

/// Create Airline with specified ID.
#[utoipa::path(
    post,
    path = "/api/v1/airline/{id}",
    params(("id" = String, Path, description = "Airline ID like airline_10")),
    request_body = AirlineCreateRequest,
    responses(
        (status = 201, description = "Airline created", body = Airline),
        (status = 400, description = "Malformed JSON body", body = ErrorMessage),
        (status = 409, description = "An airline with this ID already exists", body = ErrorMessage),
        (status = 422, description = "Required fields are missing", body = ErrorMessage),
    ),
    tag = "Airline"
)]
pub async fn create_airline(
    State(db): State<Gateway>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AirlineCreateRequest>,
) -> Result<Response, ApiError> {
    crud::create::<Airline>(&db, id, request).await
}

/// Update Airline with specified ID.
#[utoipa::path(
    put,
    path = "/api/v1/airline/{id}",
    params(("id" = String, Path, description = "Airline ID like airline_10")),
    request_body = AirlineCreateRequest,
    responses(
        (status = 200, description = "Airline replaced", body = Airline),
        (status = 400, description = "Malformed JSON body", body = ErrorMessage),
        (status = 404, description = "No airline with this ID", body = ErrorMessage),
        (status = 422, description = "Required fields are missing", body = ErrorMessage),
    ),
    tag = "Airline"
)]
pub async fn update_airline(
    State(db): State<Gateway>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AirlineCreateRequest>,
) -> Result<Json<Airline>, ApiError> {
    crud::update(&db, id, request).await
}

/// Delete Airline with specified ID.
#[utoipa::path(
    delete,
    path = "/api/v1/airline/{id}",
    params(("id" = String, Path, description = "Airline ID like airline_10")),
    responses(
        (status = 200, description = "ID of the deleted airline", body = String),
        (status = 404, description = "No airline with this ID", body = ErrorMessage),
    ),
    tag = "Airline"
)]
pub async fn delete_airline(
    State(db): State<Gateway>,
    Path(id): Path<String>,
) -> Result<Json<String>, ApiError> {
    crud::delete::<Airline>(&db, id).await
}
