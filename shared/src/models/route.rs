use super::null_as_empty;
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Schedule {
    #[serde(default)]
    #[schema(example = 0)]
    pub day: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "14:05:00")]
    pub utc: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "AF198")]
    pub flight: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Route {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "AF")]
    pub airline: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "airline_137")]
    pub airlineid: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "TLV")]
    pub sourceairport: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "MRS")]
    pub destinationairport: String,
    #[serde(default)]
    #[schema(example = 0)]
    pub stops: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "320")]
    pub equipment: String,
    #[serde(default)]
    #[schema(example = 2881.617376098415)]
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<Schedule>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RouteCreateRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "AF")]
    pub airline: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "airline_137")]
    pub airlineid: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "TLV")]
    pub sourceairport: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "MRS")]
    pub destinationairport: String,
    #[serde(default)]
    #[schema(example = 0)]
    pub stops: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "320")]
    pub equipment: String,
    #[serde(default)]
    #[schema(example = 2881.617376098415)]
    pub distance: f64,
    #[serde(default)]
    pub schedule: Option<Vec<Schedule>>,
}

impl From<RouteCreateRequest> for Route {
    fn from(request: RouteCreateRequest) -> Self {
        Self {
            airline: request.airline,
            airlineid: request.airlineid,
            sourceairport: request.sourceairport,
            destinationairport: request.destinationairport,
            stops: request.stops,
            equipment: request.equipment,
            distance: request.distance,
            schedule: request.schedule,
        }
    }
}

impl Validate for RouteCreateRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .require_non_empty("airline", &self.airline)
            .require_non_empty("airlineid", &self.airlineid)
            .require_non_empty("sourceairport", &self.sourceairport)
            .require_non_empty("destinationairport", &self.destinationairport);
        errors.into_result()
    }
}

/// Row returned by the direct-connections query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DestinationAirport {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "JFK")]
    pub destinationairport: String,
}
