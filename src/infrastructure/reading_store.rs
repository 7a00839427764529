// In-memory reading store backing the demo API
use crate::domain::weather::{MetricStats, Reading, Stats, WeatherCondition, WindStats};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize)]
pub struct StoredReading {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub reading: Reading,
}

/// Row shape of `/api/history`.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub weather_condition: WeatherCondition,
}

impl From<&StoredReading> for HistoryRecord {
    fn from(stored: &StoredReading) -> Self {
        Self {
            timestamp: stored.timestamp,
            temperature: stored.reading.temperature,
            humidity: stored.reading.humidity,
            pressure: stored.reading.pressure,
            wind_speed: stored.reading.wind_speed,
            weather_condition: stored.reading.weather_condition.clone(),
        }
    }
}

struct Inner {
    readings: VecDeque<StoredReading>,
    next_id: u64,
}

pub struct ReadingStore {
    inner: RwLock<Inner>,
    retention: Duration,
}

impl ReadingStore {
    pub fn new(retention_hours: u32) -> Self {
        Self {
            inner: RwLock::new(Inner {
                readings: VecDeque::new(),
                next_id: 1,
            }),
            retention: Duration::hours(i64::from(retention_hours)),
        }
    }

    /// Keeps readings ordered by timestamp and drops anything older than the
    /// retention window relative to the newest one.
    pub async fn insert(&self, reading: Reading, timestamp: DateTime<Utc>) -> StoredReading {
        let mut inner = self.inner.write().await;
        let stored = StoredReading {
            id: inner.next_id,
            timestamp,
            reading,
        };
        inner.next_id += 1;

        let position = inner
            .readings
            .iter()
            .rposition(|r| r.timestamp <= timestamp)
            .map(|i| i + 1)
            .unwrap_or(0);
        inner.readings.insert(position, stored.clone());

        if let Some(newest) = inner.readings.back().map(|r| r.timestamp) {
            let cutoff = newest - self.retention;
            while inner
                .readings
                .front()
                .is_some_and(|r| r.timestamp < cutoff)
            {
                inner.readings.pop_front();
            }
        }

        stored
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.readings.len()
    }

    pub async fn latest(&self) -> Option<StoredReading> {
        self.inner.read().await.readings.back().cloned()
    }

    /// Readings strictly newer than `cutoff`, oldest first.
    pub async fn history_since(&self, cutoff: DateTime<Utc>) -> Vec<HistoryRecord> {
        self.inner
            .read()
            .await
            .readings
            .iter()
            .filter(|r| r.timestamp > cutoff)
            .map(HistoryRecord::from)
            .collect()
    }

    /// Aggregates over readings newer than `cutoff`; zeros when there are none.
    pub async fn stats_since(&self, cutoff: DateTime<Utc>) -> Stats {
        let inner = self.inner.read().await;
        let window: Vec<&Reading> = inner
            .readings
            .iter()
            .filter(|r| r.timestamp > cutoff)
            .map(|r| &r.reading)
            .collect();

        let wind = summarize(window.iter().map(|r| r.wind_speed));
        Stats {
            temperature: Some(summarize(window.iter().map(|r| r.temperature))),
            humidity: Some(summarize(window.iter().map(|r| r.humidity))),
            pressure: Some(summarize(window.iter().map(|r| r.pressure))),
            wind_speed: Some(WindStats {
                avg: wind.avg,
                max: wind.max,
            }),
        }
    }
}

fn summarize(values: impl Iterator<Item = f64>) -> MetricStats {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in values {
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    if count == 0 {
        return MetricStats {
            min: 0.0,
            max: 0.0,
            avg: 0.0,
        };
    }

    MetricStats {
        min,
        max,
        avg: sum / count as f64,
    }
}
