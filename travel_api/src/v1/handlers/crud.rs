//! Key-value handlers shared by every collection. The per-collection modules wrap these so each
//! operation gets its own OpenAPI entry.

use crate::v1::error::ApiError;
use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use shared::models::Document;
use shared::store::Gateway;
use tracing::info;

/// Characters escaped when a document key is written back into a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn location(collection: impl std::fmt::Display, id: &str) -> Result<HeaderValue, ApiError> {
    let segment = utf8_percent_encode(id, PATH_SEGMENT);
    HeaderValue::try_from(format!("/api/v1/{collection}/{segment}"))
        .map_err(|_| ApiError::BadRequest(format!("id {id:?} is not a valid path segment")))
}

pub async fn get<D: Document>(db: &Gateway, id: &str) -> Result<Json<D>, ApiError> {
    Ok(Json(db.get::<D>(id).await?))
}

/// Inserts under `id` and answers 201 with a `Location` pointing at the new document.
pub async fn create<D: Document>(
    db: &Gateway,
    id: String,
    request: D::CreateRequest,
) -> Result<Response, ApiError> {
    let location = location(D::COLLECTION, &id)?;

    let document: D = request.into();
    db.insert(&id, &document).await?;
    info!(name: "document.created", collection = %D::COLLECTION, id = %id, "document created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(document),
    )
        .into_response())
}

/// Replaces the whole document; a missing key is a 404 and nothing is created. A document removed
/// between the existence check and the replace is also a 404.
pub async fn update<D: Document>(
    db: &Gateway,
    id: String,
    request: D::CreateRequest,
) -> Result<Json<D>, ApiError> {
    db.get::<D>(&id).await?;

    let document: D = request.into();
    db.replace(&id, &document).await?;
    info!(name: "document.replaced", collection = %D::COLLECTION, id = %id, "document replaced");

    Ok(Json(document))
}

/// Removes the document and echoes its id.
pub async fn delete<D: Document>(db: &Gateway, id: String) -> Result<Json<String>, ApiError> {
    db.get::<D>(&id).await?;
    db.remove::<D>(&id).await?;
    info!(name: "document.removed", collection = %D::COLLECTION, id = %id, "document removed");

    Ok(Json(id))
}
