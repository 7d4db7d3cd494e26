mod body;
mod params;

pub use body::ValidatedJson;
pub use params::{AirportParam, CountryParam, Pagination};
