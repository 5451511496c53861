use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use chrono::Local;
use clap::{CommandFactory, Parser};
use nws_weather_core::{
    Config, GatewayError, Output, ReportField, ReportRequest, gateway_from_config, produce,
    render_forecast,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "nws-weather",
    version,
    about = "Current conditions and forecasts for an api.weather.gov station"
)]
pub struct Cli {
    /// Station identifier, e.g. "KMMU".
    pub station_id: Option<String>,

    /// Weather description.
    #[arg(long)]
    pub weather: bool,

    #[arg(long)]
    pub temperature: bool,

    #[arg(long)]
    pub humidity: bool,

    #[arg(long)]
    pub windchill: bool,

    #[arg(long)]
    pub heatindex: bool,

    #[arg(long)]
    pub dewpoint: bool,

    /// Wind direction as a compass point.
    #[arg(long)]
    pub winddir: bool,

    #[arg(long)]
    pub windspeed: bool,

    #[arg(long)]
    pub windgust: bool,

    /// Barometric pressure in inches of mercury.
    #[arg(long)]
    pub pressure: bool,

    /// Report every field (the default when no field flag is given).
    #[arg(long)]
    pub allvalues: bool,

    /// Use °C and km/h.
    #[arg(long)]
    pub metric: bool,

    /// Omit field titles.
    #[arg(long)]
    pub valuesonly: bool,

    /// Omit the station header block.
    #[arg(long)]
    pub noheaders: bool,

    /// Print values on one line, separated by '|'. Implies --valuesonly and --noheaders.
    #[arg(long)]
    pub script: bool,

    /// Append a weather icon to the description.
    #[arg(long)]
    pub icon: bool,

    /// Print the weather icon instead of the description. Implies --icon, --valuesonly and --noheaders.
    #[arg(long)]
    pub icononly: bool,

    /// Print the forecast instead of current conditions.
    #[arg(
        long,
        conflicts_with_all = [
            "weather", "temperature", "humidity", "windchill", "heatindex", "dewpoint",
            "winddir", "windspeed", "windgust", "pressure", "allvalues", "metric",
            "valuesonly", "noheaders", "script", "icon", "icononly",
        ]
    )]
    pub forecast: bool,

    /// Read configuration from this file instead of the platform config dir.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Without a station, prints usage and reports failure.
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let Some(station_id) = self.station_id.as_deref() else {
            eprintln!("{}", Cli::command().render_help());
            return Ok(ExitCode::FAILURE);
        };

        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        let request = self.report_request(&config);
        let gateway = gateway_from_config(&config).context("Failed to set up HTTP client")?;

        let out = produce(gateway.as_ref(), station_id, &request, &Local::now())
            .await
            .map_err(|err| {
                let msg = fetch_failure_message(station_id, &err);
                anyhow::Error::new(err).context(msg)
            })?;

        match out {
            Output::Forecast(periods) => {
                for line in render_forecast(&periods, output::separator_width(&config)) {
                    println!("{line}");
                }
            }
            Output::Report(lines) => {
                print!("{}", output::format_lines(&lines, request.single_line_delimited));
            }
        }

        Ok(ExitCode::SUCCESS)
    }

    /// Resolve flags (plus config defaults) into a single request.
    pub fn report_request(&self, config: &Config) -> ReportRequest {
        let selected: Vec<ReportField> = [
            (self.weather, ReportField::Weather),
            (self.temperature, ReportField::Temperature),
            (self.humidity, ReportField::Humidity),
            (self.windchill, ReportField::WindChill),
            (self.heatindex, ReportField::HeatIndex),
            (self.dewpoint, ReportField::Dewpoint),
            (self.winddir, ReportField::WindDirection),
            (self.windspeed, ReportField::WindSpeed),
            (self.windgust, ReportField::WindGust),
            (self.pressure, ReportField::Pressure),
        ]
        .into_iter()
        .filter_map(|(on, field)| on.then_some(field))
        .collect();

        let fields = if self.allvalues || selected.is_empty() {
            ReportField::all().to_vec()
        } else {
            selected
        };

        let plain = self.script || self.icononly;

        ReportRequest {
            fields,
            metric: self.metric || config.metric,
            show_titles: !(self.valuesonly || plain),
            show_header: !(self.noheaders || plain),
            show_icon: self.icon || self.icononly,
            icon_only: self.icononly,
            single_line_delimited: self.script,
            forecast: self.forecast,
        }
    }
}

fn fetch_failure_message(station_id: &str, err: &GatewayError) -> String {
    match err.status() {
        Some(status) => format!("Failed to fetch weather for station '{station_id}' (HTTP {status})"),
        None => format!("Failed to fetch weather for station '{station_id}'"),
    }
}
