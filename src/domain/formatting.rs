// Display lookups for conditions, wind direction and numeric fields
use super::weather::WeatherCondition;

pub const DEFAULT_ICON: &str = "☀️";

/// Compass abbreviations, clockwise from north, one per 45° bucket.
pub const WIND_DIRECTIONS: [&str; 8] = ["С", "С-В", "В", "Ю-В", "Ю", "Ю-З", "З", "С-З"];

pub fn condition_icon(condition: &WeatherCondition) -> &'static str {
    match condition {
        WeatherCondition::Sunny => "☀️",
        WeatherCondition::PartlyCloudy => "⛅",
        WeatherCondition::Cloudy => "☁️",
        WeatherCondition::Rainy => "🌧️",
        WeatherCondition::Snowy => "❄️",
        WeatherCondition::Foggy => "🌫️",
        WeatherCondition::Other(_) => DEFAULT_ICON,
    }
}

pub fn condition_label(condition: &WeatherCondition) -> &str {
    match condition {
        WeatherCondition::Sunny => "Солнечно",
        WeatherCondition::PartlyCloudy => "Переменная облачность",
        WeatherCondition::Cloudy => "Облачно",
        WeatherCondition::Rainy => "Дождь",
        WeatherCondition::Snowy => "Снег",
        WeatherCondition::Foggy => "Туман",
        WeatherCondition::Other(code) => code,
    }
}

/// Bucket index in `0..8`: `round(d mod 360 / 45) mod 8`, with negative
/// degrees wrapped into `[0, 360)` first.
pub fn wind_bucket(degrees: f64) -> usize {
    let normalized = degrees.rem_euclid(360.0);
    ((normalized / 45.0).round() as usize) % WIND_DIRECTIONS.len()
}

pub fn wind_direction_label(degrees: f64) -> &'static str {
    WIND_DIRECTIONS[wind_bucket(degrees)]
}

pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

pub fn format_celsius(value: f64) -> String {
    format!("{} °C", format_one_decimal(value))
}
