//! Core library for the `nws-weather` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The api.weather.gov gateway and its error taxonomy
//! - Unit conversion, sunrise/sunset and weather icon lookup
//! - Report assembly into labeled lines
//!
//! It is used by `nws-weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod gateway;
pub mod icons;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod solar;
pub mod units;

pub use config::Config;
pub use error::GatewayError;
pub use gateway::{StationGateway, gateway_from_config};
pub use model::{
    ForecastPeriod, Observation, ReportField, ReportLine, ReportRequest, SolarWindow, StationInfo,
};
pub use pipeline::{Output, produce};
pub use report::{WeatherReportBuilder, render_forecast};
