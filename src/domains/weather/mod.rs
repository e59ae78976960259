//! Weather domain module.
//!
//! - `provider.rs` - The `WeatherProvider` port and the transient `WeatherReading`
//! - `open_meteo.rs` - HTTP adapter for the Open-Meteo forecast API
//! - `error.rs` - Weather lookup error types

mod error;
mod open_meteo;
mod provider;

pub use error::WeatherError;
pub use open_meteo::{DEFAULT_FORECAST_URL, OpenMeteoClient};
pub use provider::{WeatherProvider, WeatherReading};

#[cfg(test)]
pub(crate) use provider::StubWeatherProvider;
