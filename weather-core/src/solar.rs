//! Sunrise / sunset and the day/night decision for icon selection.
//!
//! Rise and set times come from the NOAA solar calculator equations
//! (<https://gml.noaa.gov/grad/solcalc/calcdetails.html>), using the
//! spreadsheet form where rise and set are offsets from solar noon.
//!
//! Sunrise is the rising that falls on the local calendar date. Sunset is the
//! "next setting" after 00:00 UTC of that date. West of Greenwich that is often
//! the previous evening's sunset; [`is_daytime`] compensates the same way the
//! legacy script did.

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};

use crate::model::SolarWindow;

/// Zenith of the sun's upper limb at apparent rise/set, with refraction.
const ZENITH_DEG: f64 = 90.833;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Rise,
    Set,
}

/// Compute the solar window for the calendar day containing `now`.
pub fn solar_window<Tz: TimeZone>(now: &DateTime<Tz>, latitude: f64, longitude: f64) -> SolarWindow {
    let seed = now.date_naive().and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();

    let tz = now.timezone();
    let sunrise = rise_on_local_date(now, latitude, longitude)
        .unwrap_or_else(|| next_event(seed, latitude, longitude, Event::Rise).with_timezone(&tz));
    let sunset = next_event(seed, latitude, longitude, Event::Set).with_timezone(&tz);

    SolarWindow {
        is_daytime: is_daytime(now, &sunrise, &sunset),
        sunrise: sunrise.fixed_offset(),
        sunset: sunset.fixed_offset(),
    }
}

/// Morning: day once the sun has risen. Afternoon: day until `sunset + 24h`.
///
/// The afternoon branch assumes `sunset` is the previous evening's (see module
/// docs). When it is actually today's sunset the whole afternoon and evening
/// count as day.
// TODO: replace the AM/PM split with a plain sunrise <= now < sunset check once
// sunset is computed for the local day rather than as the next setting.
pub fn is_daytime<Tz: TimeZone>(now: &DateTime<Tz>, sunrise: &DateTime<Tz>, sunset: &DateTime<Tz>) -> bool {
    if now.hour() < 12 {
        now >= sunrise
    } else {
        *now < sunset.clone() + Duration::hours(24)
    }
}

/// Sunrise whose local date is `now`'s date. East of UTC this comes from the
/// previous UTC day.
fn rise_on_local_date<Tz: TimeZone>(now: &DateTime<Tz>, latitude: f64, longitude: f64) -> Option<DateTime<Tz>> {
    let local_day = now.date_naive();
    let tz = now.timezone();

    [local_day.pred_opt(), Some(local_day), local_day.succ_opt()]
        .into_iter()
        .flatten()
        .map(|d| event_on(d, latitude, longitude, Event::Rise).with_timezone(&tz))
        .filter(|t| t.date_naive() == local_day)
        .min()
}

/// First event at or after `seed`, looking at the UTC days around it.
fn next_event(seed: DateTime<Utc>, latitude: f64, longitude: f64, event: Event) -> DateTime<Utc> {
    let day = seed.date_naive();
    [day.pred_opt(), Some(day), day.succ_opt()]
        .into_iter()
        .flatten()
        .map(|d| event_on(d, latitude, longitude, event))
        .filter(|t| *t >= seed)
        .min()
        .unwrap_or(seed)
}

/// Instant of `event` computed for UTC date `day`.
///
/// Polar day clamps to a 24h window around solar noon and polar night to a
/// zero-length one.
fn event_on(day: NaiveDate, latitude: f64, longitude: f64, event: Event) -> DateTime<Utc> {
    let days_in_year = NaiveDate::from_ymd_opt(day.year(), 12, 31)
        .map(|d| d.ordinal())
        .unwrap_or(365);

    // Fractional year in radians, taken at noon.
    let gamma = 2.0 * PI / f64::from(days_in_year) * (f64::from(day.ordinal()) - 1.0 + 0.5);

    // Equation of time, minutes.
    let eqtime = 229.18
        * (0.000075 + 0.001868 * gamma.cos()
            - 0.032077 * gamma.sin()
            - 0.014615 * (2.0 * gamma).cos()
            - 0.040849 * (2.0 * gamma).sin());

    // Solar declination, radians.
    let decl = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
        - 0.006758 * (2.0 * gamma).cos()
        + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin();

    let lat = latitude.to_radians();
    let cos_ha = ZENITH_DEG.to_radians().cos() / (lat.cos() * decl.cos()) - lat.tan() * decl.tan();
    let ha = cos_ha.clamp(-1.0, 1.0).acos().to_degrees();

    let solar_noon = 720.0 - 4.0 * longitude - eqtime;
    let minutes = match event {
        Event::Rise => solar_noon - 4.0 * ha,
        Event::Set => solar_noon + 4.0 * ha,
    };

    let midnight = day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    midnight + Duration::seconds((minutes * 60.0).round() as i64)
}
