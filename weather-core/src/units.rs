//! Conversions from the upstream units (Celsius, Pa, km/h, degrees) into
//! display units.
//!
//! Every function is total over `Option<f64>`: a missing input gives a missing
//! output. Rounding is half-to-even (`f64::round_ties_even`), so 2.5 becomes 2
//! and 3.5 becomes 4.

const PA_TO_INHG: f64 = 0.00029530;
const KMH_TO_MPH: f64 = 0.62137;

/// Compass labels, clockwise from north in 22.5° steps. The trailing "N" takes
/// values that round up to a full turn.
const COMPASS_SECTORS: [&str; 17] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW", "N",
];

pub const COMPASS_UNKNOWN: &str = "N/A";

/// A rounded value with its unit label. The unit is empty when the value is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Displayed {
    pub value: Option<i64>,
    pub unit: &'static str,
}

impl Displayed {
    const ABSENT: Displayed = Displayed { value: None, unit: "" };

    fn some(value: f64, unit: &'static str) -> Self {
        Self { value: Some(value.round_ties_even() as i64), unit }
    }

    /// `"68°F"`, or an empty string when absent.
    pub fn render(&self) -> String {
        match self.value {
            Some(v) => format!("{v}{}", self.unit),
            None => String::new(),
        }
    }
}

pub fn temperature_to_display(celsius: Option<f64>, metric: bool) -> Displayed {
    match celsius {
        None => Displayed::ABSENT,
        Some(c) if metric => Displayed::some(c, "°C"),
        Some(c) => Displayed::some(c * 1.8 + 32.0, "°F"),
    }
}

/// Inches of mercury with two decimals, e.g. `"29.92in"`.
pub fn pressure_to_display(pascals: Option<f64>) -> Option<String> {
    let inhg = pascals? * PA_TO_INHG;
    let rounded = (inhg * 100.0).round_ties_even() / 100.0;
    Some(format!("{rounded:.2}in"))
}

/// Speed in mph or km/h. A zero result is reported as-is; turning it into
/// "Calm" is up to the report builder.
pub fn wind_to_display(kmh: Option<f64>, metric: bool) -> Displayed {
    match kmh {
        None => Displayed::ABSENT,
        Some(k) if metric => Displayed::some(k, "km/h"),
        Some(k) => Displayed::some(k * KMH_TO_MPH, "mph"),
    }
}

pub fn humidity_to_display(pct: Option<f64>) -> Option<String> {
    pct.map(|p| format!("{}%", p.round_ties_even() as i64))
}

/// 16-point compass label. Zero degrees is treated like a missing reading
/// because upstream reports calm air as 0°.
pub fn compass_from_degrees(deg: Option<f64>) -> &'static str {
    match deg {
        Some(d) if d != 0.0 && d.is_finite() => {
            let index = (d.rem_euclid(360.0) / 22.5).round_ties_even() as usize;
            COMPASS_SECTORS[index.min(COMPASS_SECTORS.len() - 1)]
        }
        _ => COMPASS_UNKNOWN,
    }
}
