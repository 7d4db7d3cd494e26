use super::null_as_empty;
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Geo {
    #[serde(default)]
    #[schema(example = 37.618889)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    #[schema(example = 13.0)]
    pub alt: f64,
}

/// Constant `"airport"` discriminator. Always written, never read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AirportType;

impl AirportType {
    pub const VALUE: &'static str = "airport";
}

impl Serialize for AirportType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(Self::VALUE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Airport {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "San Francisco Intl")]
    pub airportname: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "San Francisco")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "United States")]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "SFO")]
    pub faa: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "KSFO")]
    pub icao: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "America/Los_Angeles")]
    pub tz: String,
    #[serde(rename = "type", skip_deserializing)]
    #[schema(value_type = String, example = "airport", read_only)]
    pub kind: AirportType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AirportCreateRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "San Francisco Intl")]
    pub airportname: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "San Francisco")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "United States")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "SFO")]
    pub faa: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "KSFO")]
    pub icao: String,
    #[serde(default)]
    pub geo: Option<Geo>,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "America/Los_Angeles")]
    pub tz: String,
}

impl From<AirportCreateRequest> for Airport {
    fn from(request: AirportCreateRequest) -> Self {
        Self {
            airportname: request.airportname,
            city: request.city,
            country: request.country,
            faa: Some(request.faa),
            icao: request.icao,
            geo: request.geo,
            tz: request.tz,
            kind: AirportType,
        }
    }
}

impl Validate for AirportCreateRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .require_non_empty("airportname", &self.airportname)
            .require_non_empty("city", &self.city)
            .require_non_empty("country", &self.country)
            .require_non_empty("faa", &self.faa);
        errors.into_result()
    }
}
