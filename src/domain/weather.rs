// Weather reading domain models
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub weather_condition: WeatherCondition,
}

/// Condition codes reported by the backend. Anything unrecognised is kept
/// verbatim so it can still be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Snowy,
    Foggy,
    Other(String),
}

impl WeatherCondition {
    pub fn code(&self) -> &str {
        match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::PartlyCloudy => "partly_cloudy",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::Snowy => "snowy",
            WeatherCondition::Foggy => "foggy",
            WeatherCondition::Other(code) => code,
        }
    }
}

impl From<String> for WeatherCondition {
    fn from(code: String) -> Self {
        match code.as_str() {
            "sunny" => WeatherCondition::Sunny,
            "partly_cloudy" => WeatherCondition::PartlyCloudy,
            "cloudy" => WeatherCondition::Cloudy,
            "rainy" => WeatherCondition::Rainy,
            "snowy" => WeatherCondition::Snowy,
            "foggy" => WeatherCondition::Foggy,
            _ => WeatherCondition::Other(code),
        }
    }
}

impl From<WeatherCondition> for String {
    fn from(condition: WeatherCondition) -> Self {
        condition.code().to_string()
    }
}

/// One chart sample. Null or missing fields do not reject the row: a
/// missing temperature is drawn as a gap, a missing timestamp as `--:--`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    #[serde(default)]
    pub timestamp: Option<RawTimestamp>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl HistoryPoint {
    #[cfg(test)]
    pub fn new(timestamp: RawTimestamp, temperature: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            temperature: Some(temperature),
        }
    }

    pub fn local_time(&self) -> Option<DateTime<Local>> {
        self.timestamp.as_ref().and_then(RawTimestamp::to_local)
    }
}

/// Timestamps arrive either as ISO-8601 text or as epoch values, sometimes
/// wrapped in a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Epoch(f64),
    Text(String),
}

// Epoch values above this are taken to be milliseconds.
const EPOCH_MILLIS_THRESHOLD: f64 = 1e11;

impl RawTimestamp {
    /// Interpret the timestamp in local time. Offset-less ISO strings are
    /// already local; `None` when nothing sensible can be made of it.
    pub fn to_local(&self) -> Option<DateTime<Local>> {
        match self {
            RawTimestamp::Epoch(value) => epoch_to_local(*value),
            RawTimestamp::Text(text) => {
                let text = text.trim();
                if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                    return Some(parsed.with_timezone(&Local));
                }
                for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
                    if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                        return Local.from_local_datetime(&naive).earliest();
                    }
                }
                text.parse::<f64>().ok().and_then(epoch_to_local)
            }
        }
    }
}

fn epoch_to_local(value: f64) -> Option<DateTime<Local>> {
    if !value.is_finite() {
        return None;
    }
    let millis = if value.abs() >= EPOCH_MILLIS_THRESHOLD {
        value as i64
    } else {
        (value * 1000.0) as i64
    };
    DateTime::<Utc>::from_timestamp_millis(millis).map(|utc| utc.with_timezone(&Local))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindStats {
    pub avg: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<MetricStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<MetricStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<MetricStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<WindStats>,
}
