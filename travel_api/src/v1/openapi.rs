use crate::v1::error::ErrorMessage;
use crate::v1::handlers::health::Readiness;
use crate::v1::handlers::{airline, airport, health, route};
use shared::models::{
    Airline, AirlineCreateRequest, Airport, AirportCreateRequest, DestinationAirport, Geo, Route,
    RouteCreateRequest, Schedule,
};
use shared::validation::ValidationErrors;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Travel sample API",
        version = "1.0",
        description = "A quickstart API serving the travel-sample airline, airport and route data.\n\nKey-value operations read and write single documents by ID; list and search operations run parameterized queries.",
    ),
    paths(
        health::health,
        health::ready,
        airline::list_airlines,
        airline::airlines_to_airport,
        airline::get_airline,
        airline::create_airline,
        airline::update_airline,
        airline::delete_airline,
        airport::list_airports,
        airport::direct_connections,
        airport::get_airport,
        airport::create_airport,
        airport::update_airport,
        airport::delete_airport,
        route::get_route,
        route::create_route,
        route::update_route,
        route::delete_route,
    ),
    components(schemas(
        Airline,
        AirlineCreateRequest,
        Airport,
        AirportCreateRequest,
        Geo,
        Route,
        RouteCreateRequest,
        Schedule,
        DestinationAirport,
        ErrorMessage,
        ValidationErrors,
        Readiness,
    )),
    tags(
        (name = "Airline", description = "Airline documents and queries"),
        (name = "Airport", description = "Airport documents and queries"),
        (name = "Route", description = "Route documents"),
        (name = "Health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_collection_route() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths.keys().collect::<Vec<_>>();

        for path in [
            "/api/v1/airline/list",
            "/api/v1/airline/to-airport",
            "/api/v1/airline/{id}",
            "/api/v1/airport/list",
            "/api/v1/airport/direct-connections",
            "/api/v1/airport/{id}",
            "/api/v1/route/{id}",
            "/health",
            "/ready",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == path), "{path} missing");
        }
    }
}
