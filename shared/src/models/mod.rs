mod airline;
mod airport;
mod route;

pub use airline::{Airline, AirlineCreateRequest};
pub use airport::{Airport, AirportCreateRequest, AirportType, Geo};
pub use route::{DestinationAirport, Route, RouteCreateRequest, Schedule};

use crate::validation::Validate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// A named partition of the keyspace holding documents of one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Airline,
    Airport,
    Route,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Airline, Collection::Airport, Collection::Route];

    pub const fn as_str(self) -> &'static str {
        match self {
            Collection::Airline => "airline",
            Collection::Airport => "airport",
            Collection::Route => "route",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown collection {0:?}")]
pub struct UnknownCollection(pub String);

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCollection(s.to_string()))
    }
}

/// An entity stored as a JSON document under a caller-assigned key.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;

    /// Write payload accepted by POST and PUT.
    type CreateRequest: Validate + DeserializeOwned + Into<Self> + Send + 'static;
}

impl Document for Airline {
    const COLLECTION: Collection = Collection::Airline;
    type CreateRequest = AirlineCreateRequest;
}

impl Document for Airport {
    const COLLECTION: Collection = Collection::Airport;
    type CreateRequest = AirportCreateRequest;
}

impl Document for Route {
    const COLLECTION: Collection = Collection::Route;
    type CreateRequest = RouteCreateRequest;
}

/// Reads a missing or `null` string as `""`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
