//! Weather phrase → pictographic symbol.
//!
//! Upstream `textDescription` values are free text. Known phrases are matched
//! case-insensitively against [`PHRASES`]; anything else gets
//! [`UNKNOWN_SYMBOL`].

use std::collections::HashMap;
use std::sync::LazyLock;

/// Bumped whenever a phrase is added, removed or moved to another condition.
pub const PHRASE_TABLE_VERSION: u32 = 1;

pub const UNKNOWN_SYMBOL: &str = "❓";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Clear,
    MostlyClear,
    PartlyCloudy,
    VariableCloudy,
    MostlyCloudy,
    Showers,
    Cloudy,
    Rain,
    Thunder,
    Thunderstorm,
    SnowLight,
    Snow,
    SnowHeavy,
    Ice,
    Windy,
    Fog,
    Tornado,
    Hurricane,
}

impl Condition {
    pub fn symbol(&self, is_daytime: bool) -> &'static str {
        use Condition::*;

        match (self, is_daytime) {
            (Clear, true) => "☀️",
            (Clear, false) => "🌙",
            (MostlyClear, true) => "🌤️",
            (MostlyClear, false) => "🌛",
            (PartlyCloudy, true) => "⛅",
            (PartlyCloudy, false) => "🌜",
            (VariableCloudy, true) => "🌥️",
            (VariableCloudy, false) => "🌗",
            (MostlyCloudy, true) => "🌥️☁️",
            (MostlyCloudy, false) => "☁️🌙",
            (Showers, true) => "🌦️",
            (Showers, false) => "🌧️🌙",
            (Cloudy, _) => "☁️",
            (Rain, _) => "🌧️",
            (Thunder, _) => "🌩️",
            (Thunderstorm, _) => "⛈️",
            (SnowLight, _) => "🌨️",
            (Snow, _) => "❄️",
            (SnowHeavy, _) => "☃️",
            (Ice, _) => "🧊",
            (Windy, _) => "💨",
            (Fog, _) => "🌫️",
            (Tornado, _) => "🌪️",
            (Hurricane, _) => "🌀",
        }
    }
}

/// Known phrases, lower case.
#[rustfmt::skip]
pub const PHRASES: &[(&str, Condition)] = {
    use Condition::*;
    &[
        // sky cover
        ("clear", Clear),
        ("fair", Clear),
        ("sunny", Clear),
        ("clear skies", Clear),
        ("skc", Clear),
        ("mostly clear", MostlyClear),
        ("mostly sunny", MostlyClear),
        ("a few clouds", MostlyClear),
        ("few clouds", MostlyClear),
        ("fair with few clouds", MostlyClear),
        ("partly cloudy", PartlyCloudy),
        ("partly sunny", PartlyCloudy),
        ("partly clear", PartlyCloudy),
        ("scattered clouds", PartlyCloudy),
        ("variable clouds", VariableCloudy),
        ("variable cloudiness", VariableCloudy),
        ("increasing clouds", VariableCloudy),
        ("decreasing clouds", VariableCloudy),
        ("clearing", VariableCloudy),
        ("gradual clearing", VariableCloudy),
        ("becoming cloudy", VariableCloudy),
        ("becoming sunny", VariableCloudy),
        ("mostly cloudy", MostlyCloudy),
        ("broken clouds", MostlyCloudy),
        ("considerable cloudiness", MostlyCloudy),
        ("cloudy", Cloudy),
        ("overcast", Cloudy),
        ("overcast clouds", Cloudy),
        ("clouds", Cloudy),

        // showers
        ("showers", Showers),
        ("rain showers", Showers),
        ("light rain showers", Showers),
        ("light showers rain", Showers),
        ("showers rain", Showers),
        ("rain showers in vicinity", Showers),
        ("showers in vicinity", Showers),
        ("scattered showers", Showers),
        ("isolated showers", Showers),
        ("chance showers", Showers),
        ("rain showers and fog/mist", Showers),
        ("light rain showers and fog/mist", Showers),
        ("showers in vicinity fog/mist", Showers),
        ("showers in vicinity haze", Showers),

        // rain and drizzle
        ("rain", Rain),
        ("light rain", Rain),
        ("heavy rain", Rain),
        ("drizzle", Rain),
        ("light drizzle", Rain),
        ("heavy drizzle", Rain),
        ("rain and fog/mist", Rain),
        ("light rain and fog/mist", Rain),
        ("heavy rain and fog/mist", Rain),
        ("drizzle and fog/mist", Rain),
        ("light drizzle and fog/mist", Rain),
        ("heavy drizzle and fog/mist", Rain),
        ("rain fog/mist", Rain),
        ("light rain fog/mist", Rain),
        ("heavy rain fog/mist", Rain),
        ("heavy rain showers", Rain),
        ("heavy showers rain", Rain),
        ("heavy rain showers and fog/mist", Rain),
        ("rain and drizzle", Rain),
        ("light rain and drizzle", Rain),
        ("unknown precipitation", Rain),
        ("precipitation", Rain),

        // thunder
        ("thunder", Thunder),
        ("lightning", Thunder),
        ("thunder in vicinity", Thunder),
        ("thunderstorm in vicinity", Thunder),
        ("thunderstorms in vicinity", Thunder),
        ("thunderstorm in vicinity fog/mist", Thunder),
        ("thunderstorm in vicinity haze", Thunder),
        ("isolated thunderstorms", Thunder),
        ("chance thunderstorms", Thunder),
        ("thunderstorm", Thunderstorm),
        ("thunderstorms", Thunderstorm),
        ("scattered thunderstorms", Thunderstorm),
        ("thunderstorm rain", Thunderstorm),
        ("light thunderstorm rain", Thunderstorm),
        ("heavy thunderstorm rain", Thunderstorm),
        ("thunderstorm light rain", Thunderstorm),
        ("thunderstorm heavy rain", Thunderstorm),
        ("thunderstorm rain fog/mist", Thunderstorm),
        ("thunderstorm light rain fog/mist", Thunderstorm),
        ("thunderstorm heavy rain fog/mist", Thunderstorm),
        ("light thunderstorm rain fog/mist", Thunderstorm),
        ("heavy thunderstorm rain fog/mist", Thunderstorm),
        ("thunderstorm showers in vicinity", Thunderstorm),
        ("thunderstorm in vicinity showers", Thunderstorm),
        ("thunderstorm haze in vicinity", Thunderstorm),
        ("thunderstorm fog", Thunderstorm),
        ("thunderstorm hail", Thunderstorm),
        ("thunderstorm with hail", Thunderstorm),
        ("thunderstorm small hail", Thunderstorm),
        ("thunderstorm rain hail", Thunderstorm),
        ("thunderstorm snow", Thunderstorm),
        ("thunderstorm ice pellets", Thunderstorm),
        ("thunderstorm freezing rain", Thunderstorm),
        ("heavy thunderstorm", Thunderstorm),
        ("severe thunderstorm", Thunderstorm),
        ("severe thunderstorms", Thunderstorm),
        ("thunderstorms and rain", Thunderstorm),

        // snow
        ("light snow", SnowLight),
        ("flurries", SnowLight),
        ("snow flurries", SnowLight),
        ("light snow showers", SnowLight),
        ("light showers snow", SnowLight),
        ("light snow and fog/mist", SnowLight),
        ("light snow fog/mist", SnowLight),
        ("snow grains", SnowLight),
        ("light snow grains", SnowLight),
        ("snow showers in vicinity", SnowLight),
        ("snow", Snow),
        ("snow showers", Snow),
        ("showers snow", Snow),
        ("snow and fog/mist", Snow),
        ("snow fog/mist", Snow),
        ("blowing snow", Snow),
        ("drifting snow", Snow),
        ("low drifting snow", Snow),
        ("snow showers and fog/mist", Snow),
        ("heavy snow", SnowHeavy),
        ("heavy snow showers", SnowHeavy),
        ("heavy showers snow", SnowHeavy),
        ("heavy snow and fog/mist", SnowHeavy),
        ("heavy snow fog/mist", SnowHeavy),
        ("snow and blowing snow", SnowHeavy),
        ("blizzard", SnowHeavy),

        // freezing and mixed precipitation
        ("freezing rain", Ice),
        ("light freezing rain", Ice),
        ("heavy freezing rain", Ice),
        ("freezing drizzle", Ice),
        ("light freezing drizzle", Ice),
        ("heavy freezing drizzle", Ice),
        ("freezing rain and fog/mist", Ice),
        ("freezing drizzle and fog/mist", Ice),
        ("freezing rain rain", Ice),
        ("freezing rain snow", Ice),
        ("freezing rain and snow", Ice),
        ("snow freezing rain", Ice),
        ("rain and snow", Ice),
        ("light rain and snow", Ice),
        ("heavy rain and snow", Ice),
        ("snow and rain", Ice),
        ("rain snow", Ice),
        ("wintry mix", Ice),
        ("ice pellets", Ice),
        ("light ice pellets", Ice),
        ("heavy ice pellets", Ice),
        ("ice pellets and snow", Ice),
        ("snow and ice pellets", Ice),
        ("rain ice pellets", Ice),
        ("rain and ice pellets", Ice),
        ("sleet", Ice),
        ("rain and sleet", Ice),
        ("snow and sleet", Ice),
        ("hail", Ice),
        ("small hail", Ice),
        ("hail showers", Ice),
        ("ice crystals", Ice),
        ("freezing fog", Ice),

        // wind
        ("windy", Windy),
        ("breezy", Windy),
        ("fair and breezy", Windy),
        ("fair and windy", Windy),
        ("clear and breezy", Windy),
        ("clear and windy", Windy),
        ("a few clouds and breezy", Windy),
        ("a few clouds and windy", Windy),
        ("partly cloudy and breezy", Windy),
        ("partly cloudy and windy", Windy),
        ("mostly cloudy and breezy", Windy),
        ("mostly cloudy and windy", Windy),
        ("overcast and breezy", Windy),
        ("overcast and windy", Windy),
        ("squalls", Windy),
        ("blowing dust", Windy),
        ("blowing sand", Windy),
        ("dust storm", Windy),
        ("sand storm", Windy),
        ("sandstorm", Windy),
        ("dust/sand whirls", Windy),
        ("dust whirls", Windy),

        // obstructions to vision
        ("fog", Fog),
        ("fog/mist", Fog),
        ("mist", Fog),
        ("light fog", Fog),
        ("dense fog", Fog),
        ("patchy fog", Fog),
        ("shallow fog", Fog),
        ("partial fog", Fog),
        ("areas of fog", Fog),
        ("fog in vicinity", Fog),
        ("haze", Fog),
        ("fair with haze", Fog),
        ("smoke", Fog),
        ("smog", Fog),
        ("dust", Fog),
        ("sand", Fog),
        ("volcanic ash", Fog),

        // severe
        ("tornado", Tornado),
        ("funnel cloud", Tornado),
        ("funnel clouds", Tornado),
        ("funnel cloud in vicinity", Tornado),
        ("tornado in vicinity", Tornado),
        ("waterspout", Tornado),
        ("tornado/waterspout", Tornado),
        ("hurricane", Hurricane),
        ("hurricane warning", Hurricane),
        ("hurricane watch", Hurricane),
        ("tropical storm", Hurricane),
        ("tropical storm warning", Hurricane),
        ("tropical storm watch", Hurricane),
        ("tropical depression", Hurricane),
        ("coastal storm", Hurricane),
    ]
};

static LOOKUP: LazyLock<HashMap<&'static str, Condition>> =
    LazyLock::new(|| PHRASES.iter().copied().collect());

pub fn condition_for(phrase: &str) -> Option<Condition> {
    LOOKUP.get(phrase.trim().to_lowercase().as_str()).copied()
}

/// Symbol for `phrase`, or [`UNKNOWN_SYMBOL`] when the phrase is not known.
pub fn resolve(phrase: &str, is_daytime: bool) -> &'static str {
    condition_for(phrase).map_or(UNKNOWN_SYMBOL, |c| c.symbol(is_daytime))
}
