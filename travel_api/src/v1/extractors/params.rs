use crate::v1::error::ApiError;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::{Deserialize, Deserializer};
use shared::query::Page;

#[derive(Debug, Deserialize)]
struct RawPagination {
    #[serde(default, deserialize_with = "empty_as_none")]
    limit: Option<i64>,
    #[serde(default, alias = "skip", deserialize_with = "empty_as_none")]
    offset: Option<i64>,
}

/// `?limit=` with no value falls back to the default like an absent parameter.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// `limit` / `offset` query parameters checked against the allowed page bounds.
#[derive(Debug, Clone, Copy)]
pub struct Pagination(pub Page);

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPagination>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        Page::new(raw.limit, raw.offset)
            .map(Pagination)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct RawCountry {
    country: Option<String>,
}

/// Optional `country` filter; an empty value means no filter.
#[derive(Debug, Clone, Default)]
pub struct CountryParam(pub Option<String>);

impl<S> FromRequestParts<S> for CountryParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawCountry>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        Ok(Self(raw.country.filter(|c| !c.trim().is_empty())))
    }
}

#[derive(Debug, Deserialize)]
struct RawAirport {
    airport: Option<String>,
}

/// Required `airport` code.
#[derive(Debug, Clone)]
pub struct AirportParam(pub String);

impl<S> FromRequestParts<S> for AirportParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawAirport>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        match raw.airport {
            Some(airport) if !airport.trim().is_empty() => Ok(Self(airport)),
            _ => Err(ApiError::BadRequest(
                "query parameter 'airport' is required".to_string(),
            )),
        }
    }
}
