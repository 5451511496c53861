use chrono::{DateTime, TimeZone};
use tracing::{debug, info};

use crate::{
    ForecastPeriod, ReportLine, ReportRequest, error::GatewayError, gateway::StationGateway,
    icons::PHRASE_TABLE_VERSION, report::WeatherReportBuilder, solar::solar_window,
};

/// What a run produced. Forecast mode never yields report lines.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Report(Vec<ReportLine>),
    Forecast(Vec<ForecastPeriod>),
}

/// Fetch station metadata, then either the forecast or the latest
/// observation, and assemble the result. Stops at the first upstream failure.
pub async fn produce<Tz: TimeZone>(
    gateway: &dyn StationGateway,
    station_id: &str,
    request: &ReportRequest,
    now: &DateTime<Tz>,
) -> Result<Output, GatewayError> {
    let station = gateway.fetch_station_info(station_id).await?;
    info!(station = %station.id, name = %station.name, "fetched station metadata");

    if request.forecast {
        let periods = gateway.fetch_forecast_periods(&station).await?;
        info!(periods = periods.len(), "fetched forecast");
        return Ok(Output::Forecast(periods));
    }

    let observation = gateway.fetch_latest_observation(&station.id).await?;
    let solar = solar_window(now, station.latitude, station.longitude);
    debug!(
        sunrise = %solar.sunrise,
        sunset = %solar.sunset,
        is_daytime = solar.is_daytime,
        phrase_table = PHRASE_TABLE_VERSION,
        "assembling report"
    );

    let lines = WeatherReportBuilder::new(request).build(&station, &observation, &solar);
    Ok(Output::Report(lines))
}
