use super::null_as_empty;
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Airline {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "MILE-AIR")]
    pub callsign: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "United States")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "Q5")]
    pub iata: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "MLA")]
    pub icao: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "40-Mile Air")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AirlineCreateRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "MILE-AIR")]
    pub callsign: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "United States")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "Q5")]
    pub iata: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "MLA")]
    pub icao: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "40-Mile Air")]
    pub name: String,
}

impl From<AirlineCreateRequest> for Airline {
    fn from(request: AirlineCreateRequest) -> Self {
        Self {
            callsign: request.callsign,
            country: request.country,
            iata: request.iata,
            icao: request.icao,
            name: request.name,
        }
    }
}

impl Validate for AirlineCreateRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .require_non_empty("name", &self.name)
            .require_non_empty("callsign", &self.callsign)
            .require_non_empty("country", &self.country);
        errors.into_result()
    }
}
