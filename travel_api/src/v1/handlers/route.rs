use crate::v1::error::{ApiError, ErrorMessage};
use crate::v1::extractors::ValidatedJson;
use crate::v1::handlers::crud;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use shared::models::{Route, RouteCreateRequest};
use shared::store::Gateway;

#[utoipa::path(
    get,
    path = "/api/v1/route/{id}",
    params(("id" = String, Path, description = "Route ID like route_10000")),
    responses(
        (status = 200, description = "Route document", body = Route),
        (status = 404, description = "No route with this ID", body = ErrorMessage),
    ),
    tag = "Route"
)]
pub async fn get_route(
    State(db): State<Gateway>,
    Path(id): Path<String>,
) -> Result<Json<Route>, ApiError> {
    crud::get(&db, &id).await
}

#[utoipa::path(
    post,
    path = "/api/v1/route/{id}",
    params(("id" = String, Path, description = "Route ID like route_10000")),
    request_body = RouteCreateRequest,
    responses(
        (status = 201, description = "Route created", body = Route),
        (status = 400, description = "Malformed JSON body", body = ErrorMessage),
        (status = 409, description = "A route with this ID already exists", body = ErrorMessage),
        (status = 422, description = "Required fields are missing", body = ErrorMessage),
    ),
    tag = "Route"
)]
pub async fn create_route(
    State(db): State<Gateway>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<RouteCreateRequest>,
) -> Result<Response, ApiError> {
    crud::create::<Route>(&db, id, request).await
}

#[utoipa::path(
    put,
    path = "/api/v1/route/{id}",
    params(("id" = String, Path, description = "Route ID like route_10000")),
    request_body = RouteCreateRequest,
    responses(
        (status = 200, description = "Route replaced", body = Route),
        (status = 400, description = "Malformed JSON body", body = ErrorMessage),
        (status = 404, description = "No route with this ID", body = ErrorMessage),
        (status = 422, description = "Required fields are missing", body = ErrorMessage),
    ),
    tag = "Route"
)]
pub async fn update_route(
    State(db): State<Gateway>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<RouteCreateRequest>,
) -> Result<Json<Route>, ApiError> {
    crud::update(&db, id, request).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/route/{id}",
    params(("id" = String, Path, description = "Route ID like route_10000")),
    responses(
        (status = 200, description = "ID of the deleted route", body = String),
        (status = 404, description = "No route with this ID", body = ErrorMessage),
    ),
    tag = "Route"
)]
pub async fn delete_route(
    State(db): State<Gateway>,
    Path(id): Path<String>,
) -> Result<Json<String>, ApiError> {
    crud::delete::<Route>(&db, id).await
}
