//! api.weather.gov client.
//!
//! Endpoints used:
//!
//! - `/stations/{id}`: `.properties.{stationIdentifier,name}` and
//!   `.geometry.coordinates` as `[lon, lat]`
//! - `/stations/{id}/observations/latest`: `.properties.*` quantities, each
//!   `{unitCode, value}` with `value` often `null`
//! - `/points/{lat},{lon}`: `.properties.forecast`, a URL
//! - that forecast URL: `.properties.periods[].{name,detailedForecast}`

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, header::ACCEPT};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{ForecastPeriod, Observation, StationInfo, error::GatewayError};

use super::StationGateway;

/// Body some proxies in front of the API return, with a 200, when the
/// request was not authorized.
pub const AUTH_FAILURE_BODY: &str = "Unauthorized";

#[derive(Debug, Clone)]
pub struct NwsGateway {
    base_url: String,
    http: Client,
}

impl NwsGateway {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, GatewayError> {
        let http = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// GET `url`. `Ok(None)` means 204 No Content.
    async fn get_body(&self, url: &str) -> Result<Option<String>, GatewayError> {
        debug!(url, "requesting");

        let res = self
            .http
            .get(url)
            .header(ACCEPT, "application/geo+json")
            .send()
            .await?;

        let status = res.status();
        debug!(url, status = status.as_u16(), "upstream responded");

        if status == StatusCode::NO_CONTENT {
            warn!(url, "upstream returned no content");
            return Ok(None);
        }

        if !status.is_success() {
            return Err(GatewayError::Http { status: status.as_u16() });
        }

        let body = res.text().await?;
        if body.trim().eq_ignore_ascii_case(AUTH_FAILURE_BODY) {
            return Err(GatewayError::Auth);
        }

        Ok(Some(body))
    }

    async fn forecast_url(&self, station: &StationInfo) -> Result<String, GatewayError> {
        let url = format!(
            "{}/points/{:.4},{:.4}",
            self.base_url, station.latitude, station.longitude
        );

        let body = self.get_body(&url).await?.ok_or(GatewayError::MissingField("forecast"))?;
        let parsed: NwsPoint = serde_json::from_str(&body)?;

        parsed.properties.forecast.ok_or(GatewayError::MissingField("forecast"))
    }
}

#[async_trait]
impl StationGateway for NwsGateway {
    async fn fetch_station_info(&self, station_id: &str) -> Result<StationInfo, GatewayError> {
        let url = format!("{}/stations/{}", self.base_url, station_id);

        let body = match self.get_body(&url).await {
            Err(GatewayError::Http { status: 404 }) => {
                return Err(GatewayError::InvalidStation(station_id.to_string()));
            }
            other => other?.ok_or(GatewayError::MissingField("stationIdentifier"))?,
        };

        let parsed: NwsStation = serde_json::from_str(&body)?;
        parsed.into_station_info()
    }

    async fn fetch_latest_observation(&self, station_id: &str) -> Result<Observation, GatewayError> {
        let url = format!("{}/stations/{}/observations/latest", self.base_url, station_id);

        let Some(body) = self.get_body(&url).await? else {
            return Ok(Observation::default());
        };

        let parsed: NwsObservation = serde_json::from_str(&body)?;
        Ok(parsed.properties.into_observation())
    }

    async fn fetch_forecast_periods(
        &self,
        station: &StationInfo,
    ) -> Result<Vec<ForecastPeriod>, GatewayError> {
        let url = self.forecast_url(station).await?;

        let Some(body) = self.get_body(&url).await? else {
            return Ok(Vec::new());
        };

        let parsed: NwsForecast = serde_json::from_str(&body)?;

        Ok(parsed
            .properties
            .periods
            .into_iter()
            .map(|p| ForecastPeriod {
                name: p.name.unwrap_or_default(),
                detailed_forecast: p.detailed_forecast.unwrap_or_default(),
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct NwsStation {
    #[serde(default)]
    properties: NwsStationProperties,
    geometry: Option<NwsGeometry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NwsStationProperties {
    station_identifier: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NwsGeometry {
    coordinates: Vec<f64>,
}

impl NwsStation {
    fn into_station_info(self) -> Result<StationInfo, GatewayError> {
        let id = self
            .properties
            .station_identifier
            .ok_or(GatewayError::MissingField("stationIdentifier"))?;
        let name = self.properties.name.ok_or(GatewayError::MissingField("name"))?;

        let coordinates = self.geometry.map(|g| g.coordinates).unwrap_or_default();
        let (longitude, latitude) = match coordinates.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            _ => return Err(GatewayError::MissingField("coordinates")),
        };

        Ok(StationInfo { id, name, longitude, latitude })
    }
}

#[derive(Debug, Deserialize)]
struct NwsObservation {
    #[serde(default)]
    properties: NwsObservationProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NwsObservationProperties {
    timestamp: Option<DateTime<Utc>>,
    text_description: Option<String>,
    temperature: Option<NwsMeasurement>,
    dewpoint: Option<NwsMeasurement>,
    wind_direction: Option<NwsMeasurement>,
    wind_speed: Option<NwsMeasurement>,
    wind_gust: Option<NwsMeasurement>,
    barometric_pressure: Option<NwsMeasurement>,
    relative_humidity: Option<NwsMeasurement>,
    wind_chill: Option<NwsMeasurement>,
    heat_index: Option<NwsMeasurement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NwsMeasurement {
    #[serde(default)]
    unit_code: Option<String>,
    #[serde(default)]
    value: Option<f64>,
}

impl NwsObservationProperties {
    fn into_observation(self) -> Observation {
        Observation {
            timestamp: self.timestamp,
            text_description: self.text_description.filter(|t| !t.trim().is_empty()),
            temperature_c: normalize(self.temperature, "temperature", to_celsius),
            relative_humidity_pct: normalize(self.relative_humidity, "relativeHumidity", to_percent),
            wind_chill_c: normalize(self.wind_chill, "windChill", to_celsius),
            heat_index_c: normalize(self.heat_index, "heatIndex", to_celsius),
            dewpoint_c: normalize(self.dewpoint, "dewpoint", to_celsius),
            wind_direction_deg: normalize(self.wind_direction, "windDirection", to_degrees),
            wind_speed_kmh: normalize(self.wind_speed, "windSpeed", to_kmh),
            wind_gust_kmh: normalize(self.wind_gust, "windGust", to_kmh),
            pressure_pa: normalize(self.barometric_pressure, "barometricPressure", to_pascals),
        }
    }
}

/// Value of `m` in the unit `convert` targets. Missing values and unknown unit
/// codes both come back as `None`.
fn normalize(
    m: Option<NwsMeasurement>,
    field: &'static str,
    convert: fn(&str, f64) -> Option<f64>,
) -> Option<f64> {
    let m = m?;
    let value = m.value?;

    // "wmoUnit:degC" and the older "unit:degC" both occur.
    let code = m.unit_code.unwrap_or_default();
    let unit = code.split_once(':').map_or(code.as_str(), |(_, u)| u);

    let converted = convert(unit, value);
    if converted.is_none() {
        warn!(field, unit_code = %code, "unrecognized unit code, treating value as absent");
    }
    converted
}

fn to_celsius(unit: &str, v: f64) -> Option<f64> {
    match unit {
        "degC" | "" => Some(v),
        "degF" => Some((v - 32.0) / 1.8),
        "K" => Some(v - 273.15),
        _ => None,
    }
}

fn to_kmh(unit: &str, v: f64) -> Option<f64> {
    match unit {
        "km_h-1" | "" => Some(v),
        "m_s-1" => Some(v * 3.6),
        "kn" | "kt" => Some(v * 1.852),
        "mi_h-1" => Some(v * 1.609344),
        _ => None,
    }
}

fn to_pascals(unit: &str, v: f64) -> Option<f64> {
    match unit {
        "Pa" | "" => Some(v),
        "hPa" => Some(v * 100.0),
        _ => None,
    }
}

fn to_degrees(unit: &str, v: f64) -> Option<f64> {
    match unit {
        "degree_(angle)" | "deg" | "" => Some(v),
        _ => None,
    }
}

fn to_percent(unit: &str, v: f64) -> Option<f64> {
    match unit {
        "percent" | "" => Some(v),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct NwsPoint {
    #[serde(default)]
    properties: NwsPointProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NwsPointProperties {
    forecast: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NwsForecast {
    #[serde(default)]
    properties: NwsForecastProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NwsForecastProperties {
    periods: Vec<NwsForecastPeriod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NwsForecastPeriod {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    detailed_forecast: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const UA: &str = "nws-weather-tests/0.1 test@example.com";

    fn station_json() -> serde_json::Value {
        json!({
            "geometry": { "type": "Point", "coordinates": [-74.4149, 40.7994] },
            "properties": { "stationIdentifier": "KMMU", "name": "Morristown Municipal Airport" }
        })
    }

    fn kmmu() -> StationInfo {
        StationInfo {
            id: "KMMU".into(),
            name: "Morristown Municipal Airport".into(),
            longitude: -74.4149,
            latitude: 40.7994,
        }
    }

    async fn gateway(server: &MockServer) -> NwsGateway {
        NwsGateway::new(&server.uri(), UA).expect("client must build")
    }

    #[tokio::test]
    async fn station_info_is_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stations/KMMU"))
            .and(header("user-agent", UA))
            .respond_with(ResponseTemplate::new(200).set_body_json(station_json()))
            .expect(1)
            .mount(&server)
            .await;

        let info = gateway(&server).await.fetch_station_info("KMMU").await.unwrap();
        assert_eq!(info, kmmu());
    }

    #[tokio::test]
    async fn unknown_station_is_invalid_station() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stations/NOPE"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = gateway(&server).await.fetch_station_info("NOPE").await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidStation(ref id) if id == "NOPE"));
    }

    #[tokio::test]
    async fn unauthorized_and_unprocessable_are_http_errors() {
        let server = MockServer::start().await;
        Mock::given(path("/stations/KMMU"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(path("/stations/KMMU/observations/latest"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let gw = gateway(&server).await;
        let err = gw.fetch_station_info("KMMU").await.unwrap_err();
        assert!(matches!(err, GatewayError::Http { status: 401 }));
        assert!(err.to_string().contains("authorization denied"));

        let err = gw.fetch_latest_observation("KMMU").await.unwrap_err();
        assert!(matches!(err, GatewayError::Http { status: 422 }));
    }

    #[tokio::test]
    async fn auth_failure_body_with_success_status() {
        let server = MockServer::start().await;
        Mock::given(path("/stations/KMMU"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Unauthorized\n"))
            .mount(&server)
            .await;

        let err = gateway(&server).await.fetch_station_info("KMMU").await.unwrap_err();
        assert!(matches!(err, GatewayError::Auth));
    }

    #[tokio::test]
    async fn missing_station_identifier_fails() {
        let server = MockServer::start().await;
        Mock::given(path("/stations/KMMU"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "geometry": { "coordinates": [-74.4, 40.8] },
                "properties": { "name": "Somewhere" }
            })))
            .mount(&server)
            .await;

        let err = gateway(&server).await.fetch_station_info("KMMU").await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingField("stationIdentifier")));
    }

    #[tokio::test]
    async fn observation_nulls_stay_absent() {
        let server = MockServer::start().await;
        Mock::given(path("/stations/KMMU/observations/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": {
                    "timestamp": "2024-06-21T14:51:00+00:00",
                    "textDescription": "Mostly Cloudy",
                    "temperature": { "unitCode": "wmoUnit:degC", "value": 20.0 },
                    "dewpoint": { "unitCode": "wmoUnit:degC", "value": null },
                    "windDirection": { "unitCode": "wmoUnit:degree_(angle)", "value": 270 },
                    "windSpeed": { "unitCode": "wmoUnit:m_s-1", "value": 5.0 },
                    "windGust": { "unitCode": "wmoUnit:km_h-1", "value": null },
                    "barometricPressure": { "unitCode": "wmoUnit:Pa", "value": 101325 },
                    "relativeHumidity": { "unitCode": "wmoUnit:percent", "value": 54.7 },
                    "heatIndex": { "unitCode": "wmoUnit:degF", "value": 212.0 }
                }
            })))
            .mount(&server)
            .await;

        let obs = gateway(&server).await.fetch_latest_observation("KMMU").await.unwrap();

        assert_eq!(obs.text_description.as_deref(), Some("Mostly Cloudy"));
        assert_eq!(obs.temperature_c, Some(20.0));
        assert_eq!(obs.dewpoint_c, None);
        assert_eq!(obs.wind_chill_c, None);
        assert_eq!(obs.wind_gust_kmh, None);
        assert_eq!(obs.wind_direction_deg, Some(270.0));
        assert_eq!(obs.wind_speed_kmh, Some(18.0));
        assert_eq!(obs.heat_index_c, Some(100.0));
        assert_eq!(obs.pressure_pa, Some(101325.0));
        assert!(obs.timestamp.is_some());
    }

    #[tokio::test]
    async fn no_content_observation_is_empty() {
        let server = MockServer::start().await;
        Mock::given(path("/stations/KMMU/observations/latest"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let obs = gateway(&server).await.fetch_latest_observation("KMMU").await.unwrap();
        assert_eq!(obs, Observation::default());
    }

    #[tokio::test]
    async fn forecast_follows_points_url() {
        let server = MockServer::start().await;
        let forecast_url = format!("{}/gridpoints/PHI/55,80/forecast", server.uri());

        Mock::given(path("/points/40.7994,-74.4149"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": { "forecast": forecast_url }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/gridpoints/PHI/55,80/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": { "periods": [
                    { "number": 1, "name": "Tonight", "detailedForecast": "Clear, with a low around 60." },
                    { "number": 2, "name": "Saturday", "detailedForecast": "Sunny, with a high near 85." }
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let periods = gateway(&server).await.fetch_forecast_periods(&kmmu()).await.unwrap();

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].name, "Tonight");
        assert_eq!(periods[1].detailed_forecast, "Sunny, with a high near 85.");
    }

    #[tokio::test]
    async fn points_without_forecast_url_fails() {
        let server = MockServer::start().await;
        Mock::given(path("/points/40.7994,-74.4149"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "properties": {} })))
            .mount(&server)
            .await;

        let err = gateway(&server).await.fetch_forecast_periods(&kmmu()).await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingField("forecast")));
    }

    #[tokio::test]
    async fn no_content_station_lacks_identifier() {
        let server = MockServer::start().await;
        Mock::given(path("/stations/KMMU"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = gateway(&server).await.fetch_station_info("KMMU").await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingField("stationIdentifier")));
    }

    #[tokio::test]
    async fn no_content_forecast_is_empty() {
        let server = MockServer::start().await;
        let forecast_url = format!("{}/gridpoints/PHI/55,80/forecast", server.uri());

        Mock::given(path("/points/40.7994,-74.4149"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": { "forecast": forecast_url }
            })))
            .mount(&server)
            .await;
        Mock::given(path("/gridpoints/PHI/55,80/forecast"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let periods = gateway(&server).await.fetch_forecast_periods(&kmmu()).await.unwrap();
        assert!(periods.is_empty());
    }

    #[tokio::test]
    async fn knots_and_kelvin_are_normalized() {
        let server = MockServer::start().await;
        Mock::given(path("/stations/KMMU/observations/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": {
                    "temperature": { "unitCode": "wmoUnit:K", "value": 293.15 },
                    "dewpoint": { "unitCode": "unit:K", "value": 283.15 },
                    "windSpeed": { "unitCode": "wmoUnit:kn", "value": 10.0 },
                    "windGust": { "unitCode": "wmoUnit:kt", "value": 20.0 },
                    "barometricPressure": { "unitCode": "wmoUnit:hPa", "value": 1013.25 }
                }
            })))
            .mount(&server)
            .await;

        let obs = gateway(&server).await.fetch_latest_observation("KMMU").await.unwrap();

        let close = |got: Option<f64>, want: f64| got.is_some_and(|v| (v - want).abs() < 1e-9);
        assert!(close(obs.temperature_c, 20.0), "temperature: {:?}", obs.temperature_c);
        assert!(close(obs.dewpoint_c, 10.0), "dewpoint: {:?}", obs.dewpoint_c);
        assert!(close(obs.wind_speed_kmh, 18.52), "wind: {:?}", obs.wind_speed_kmh);
        assert!(close(obs.wind_gust_kmh, 37.04), "gust: {:?}", obs.wind_gust_kmh);
        assert!(close(obs.pressure_pa, 101325.0), "pressure: {:?}", obs.pressure_pa);
    }

    #[test]
    fn unit_normalization() {
        assert_eq!(to_celsius("degF", 212.0), Some(100.0));
        assert_eq!(to_kmh("m_s-1", 10.0), Some(36.0));
        assert_eq!(to_pascals("hPa", 1013.25), Some(101325.0));
        assert_eq!(to_celsius("furlongs", 1.0), None);
    }
}
