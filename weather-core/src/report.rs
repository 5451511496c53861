//! Turns a fetched station, observation and solar window into ordered
//! [`ReportLine`]s.
//!
//! Serialization (one line each, or a single `|`-joined line) is the caller's
//! business.

use crate::{
    ForecastPeriod, Observation, ReportField, ReportLine, ReportRequest, SolarWindow, StationInfo,
    icons,
    units::{
        compass_from_degrees, humidity_to_display, pressure_to_display, temperature_to_display,
        wind_to_display,
    },
};

const CALM: &str = "Calm";
const CLOCK_FORMAT: &str = "%I:%M %p";
const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %I:%M %p %Z";

#[derive(Debug, Clone, Copy)]
pub struct WeatherReportBuilder<'a> {
    request: &'a ReportRequest,
}

impl<'a> WeatherReportBuilder<'a> {
    pub fn new(request: &'a ReportRequest) -> Self {
        Self { request }
    }

    /// Header block (if enabled) followed by one or two lines per requested
    /// field, in [`ReportField`] declaration order.
    pub fn build(
        &self,
        station: &StationInfo,
        observation: &Observation,
        solar: &SolarWindow,
    ) -> Vec<ReportLine> {
        let mut lines = Vec::new();

        if self.request.header_enabled() {
            lines.extend(header(station, observation, solar));
        }

        for field in self.request.ordered_fields() {
            self.push_field(&mut lines, field, observation, solar);
        }

        lines
    }

    fn title(&self, field: ReportField) -> &'static str {
        if self.request.titles_enabled() { field.title() } else { "" }
    }

    fn push_field(
        &self,
        lines: &mut Vec<ReportLine>,
        field: ReportField,
        obs: &Observation,
        solar: &SolarWindow,
    ) {
        let metric = self.request.metric;
        let title = self.title(field);

        let value = match field {
            ReportField::Weather => {
                return self.push_weather(lines, title, obs.text_description.as_deref(), solar);
            }
            ReportField::Temperature => temperature_to_display(obs.temperature_c, metric).render(),
            ReportField::Humidity => humidity_to_display(obs.relative_humidity_pct).unwrap_or_default(),
            ReportField::WindChill => temperature_to_display(obs.wind_chill_c, metric).render(),
            ReportField::HeatIndex => temperature_to_display(obs.heat_index_c, metric).render(),
            ReportField::Dewpoint => temperature_to_display(obs.dewpoint_c, metric).render(),
            ReportField::WindDirection => compass_from_degrees(obs.wind_direction_deg).to_string(),
            ReportField::WindSpeed => {
                let speed = wind_to_display(obs.wind_speed_kmh, metric);
                if speed.value == Some(0) { CALM.to_string() } else { speed.render() }
            }
            ReportField::WindGust => wind_to_display(obs.wind_gust_kmh, metric).render(),
            ReportField::Pressure => pressure_to_display(obs.pressure_pa).unwrap_or_default(),
        };

        lines.push(ReportLine::new(title, value));
    }

    fn push_weather(
        &self,
        lines: &mut Vec<ReportLine>,
        title: &str,
        text: Option<&str>,
        solar: &SolarWindow,
    ) {
        let text = text.unwrap_or_default();

        if !self.request.icon_enabled() {
            lines.push(ReportLine::new(title, text));
            return;
        }

        let icon = icons::resolve(text, solar.is_daytime);

        if self.request.icon_only {
            lines.push(ReportLine::new("", icon));
        } else if self.request.single_line_delimited {
            // Keep every delimited field a single value.
            lines.push(ReportLine::new(title, text));
            lines.push(ReportLine::new("", icon));
        } else if text.is_empty() {
            lines.push(ReportLine::new(title, icon));
        } else {
            lines.push(ReportLine::new(title, format!("{text} {icon}")));
        }
    }
}

fn header(station: &StationInfo, obs: &Observation, solar: &SolarWindow) -> Vec<ReportLine> {
    let updated = obs
        .timestamp
        .map(|ts| ts.with_timezone(solar.sunrise.offset()).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default();

    vec![
        ReportLine::new("Station:", format!("{} - {}", station.id, station.name)),
        ReportLine::new(
            "Location:",
            format!("{:.4}, {:.4}", station.latitude, station.longitude),
        ),
        ReportLine::new("Sunrise:", solar.sunrise.format(CLOCK_FORMAT).to_string()),
        ReportLine::new("Sunset:", solar.sunset.format(CLOCK_FORMAT).to_string()),
        ReportLine::new("Last Updated:", updated),
    ]
}

/// Text blocks for forecast mode: name, a dash rule as wide as the name, the
/// detailed forecast, then a `width`-wide `=` rule.
pub fn render_forecast(periods: &[ForecastPeriod], width: usize) -> Vec<String> {
    periods
        .iter()
        .flat_map(|p| {
            [
                p.name.clone(),
                "-".repeat(p.name.chars().count()),
                p.detailed_forecast.clone(),
                "=".repeat(width),
            ]
        })
        .collect()
}
