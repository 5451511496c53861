use crate::{
    Config, ForecastPeriod, Observation, StationInfo, error::GatewayError, gateway::nws::NwsGateway,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod nws;

/// Source of station metadata, observations and forecasts.
///
/// Each call is a single upstream attempt; failures are returned as-is and
/// never retried.
#[async_trait]
pub trait StationGateway: Send + Sync + Debug {
    async fn fetch_station_info(&self, station_id: &str) -> Result<StationInfo, GatewayError>;

    /// A 204 from upstream gives an observation with every field absent.
    async fn fetch_latest_observation(&self, station_id: &str) -> Result<Observation, GatewayError>;

    /// Forecast periods for the station's coordinates, in upstream order.
    async fn fetch_forecast_periods(
        &self,
        station: &StationInfo,
    ) -> Result<Vec<ForecastPeriod>, GatewayError>;
}

/// Construct the NWS gateway from config.
pub fn gateway_from_config(config: &Config) -> Result<Box<dyn StationGateway>, GatewayError> {
    let gateway = NwsGateway::new(&config.api_base_url, &config.user_agent)?;
    Ok(Box::new(gateway))
}
