use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationInfo {
    pub id: String,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// Latest readings for a station, already normalized to Celsius, km/h, Pa and
/// degrees. Every field may be missing when a sensor is out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: Option<DateTime<Utc>>,
    pub text_description: Option<String>,
    pub temperature_c: Option<f64>,
    pub relative_humidity_pct: Option<f64>,
    pub wind_chill_c: Option<f64>,
    pub heat_index_c: Option<f64>,
    pub dewpoint_c: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub wind_gust_kmh: Option<f64>,
    pub pressure_pa: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub name: String,
    pub detailed_forecast: String,
}

/// Sunrise/sunset for the report's calendar day, in the caller's local offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarWindow {
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
    pub is_daytime: bool,
}

/// The displayable quantities. Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportField {
    Weather,
    Temperature,
    Humidity,
    WindChill,
    HeatIndex,
    Dewpoint,
    WindDirection,
    WindSpeed,
    WindGust,
    Pressure,
}

impl ReportField {
    pub const fn all() -> &'static [ReportField] {
        &[
            ReportField::Weather,
            ReportField::Temperature,
            ReportField::Humidity,
            ReportField::WindChill,
            ReportField::HeatIndex,
            ReportField::Dewpoint,
            ReportField::WindDirection,
            ReportField::WindSpeed,
            ReportField::WindGust,
            ReportField::Pressure,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportField::Weather => "Current Weather:",
            ReportField::Temperature => "Current Temperature:",
            ReportField::Humidity => "Current Humidity:",
            ReportField::WindChill => "Current Windchill:",
            ReportField::HeatIndex => "Current Heatindex:",
            ReportField::Dewpoint => "Current Dewpoint:",
            ReportField::WindDirection => "Current Wind Dir:",
            ReportField::WindSpeed => "Current Wind Speed:",
            ReportField::WindGust => "Current Wind Gust:",
            ReportField::Pressure => "Current Pressure:",
        }
    }
}

/// Everything that shapes a single run's output. Built once by the caller and
/// passed down by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    /// Requested fields; order here does not matter.
    pub fields: Vec<ReportField>,
    pub metric: bool,
    pub show_titles: bool,
    pub show_header: bool,
    pub show_icon: bool,
    pub icon_only: bool,
    /// Pipe-delimited single line ("script" output).
    pub single_line_delimited: bool,
    /// Print forecast periods instead of the observation report.
    pub forecast: bool,
}

impl Default for ReportRequest {
    fn default() -> Self {
        Self {
            fields: ReportField::all().to_vec(),
            metric: false,
            show_titles: true,
            show_header: true,
            show_icon: false,
            icon_only: false,
            single_line_delimited: false,
            forecast: false,
        }
    }
}

impl ReportRequest {
    /// Requested fields deduplicated and in declaration order.
    pub fn ordered_fields(&self) -> Vec<ReportField> {
        let mut fields = self.fields.clone();
        fields.sort();
        fields.dedup();
        fields
    }

    pub fn titles_enabled(&self) -> bool {
        self.show_titles && !self.icon_only && !self.single_line_delimited
    }

    pub fn header_enabled(&self) -> bool {
        self.show_header && !self.icon_only && !self.single_line_delimited
    }

    pub fn icon_enabled(&self) -> bool {
        self.show_icon || self.icon_only
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
}

impl ReportLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_fields_ignores_request_order() {
        let req = ReportRequest {
            fields: vec![ReportField::Pressure, ReportField::Weather, ReportField::Pressure],
            ..Default::default()
        };
        assert_eq!(req.ordered_fields(), vec![ReportField::Weather, ReportField::Pressure]);
    }

    #[test]
    fn icon_only_suppresses_titles_and_header() {
        let req = ReportRequest { icon_only: true, ..Default::default() };
        assert!(!req.titles_enabled());
        assert!(!req.header_enabled());
        assert!(req.icon_enabled());
    }

    #[test]
    fn script_mode_suppresses_titles_and_header() {
        let req = ReportRequest { single_line_delimited: true, ..Default::default() };
        assert!(!req.titles_enabled());
        assert!(!req.header_enabled());
        assert!(!req.icon_enabled());
    }
}
