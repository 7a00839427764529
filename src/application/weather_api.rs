// Backend access trait for weather data
use crate::domain::weather::{HistoryPoint, Reading, Stats};
use async_trait::async_trait;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Every way a single fetch can fail. Callers treat all of them the same:
/// log and keep whatever is already on screen.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("{path} responded with status {status}")]
    Status { path: String, status: u16 },

    #[error("could not decode {path} response: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn path(&self) -> &str {
        match self {
            FetchError::Transport { path, .. }
            | FetchError::Status { path, .. }
            | FetchError::Decode { path, .. } => path,
        }
    }
}

#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Most recent reading (`/api/latest`)
    async fn latest(&self) -> Result<Reading, FetchError>;

    /// Readings for the trailing window, oldest first (`/api/history`)
    async fn history(&self, hours: u32) -> Result<Vec<HistoryPoint>, FetchError>;

    /// Aggregates over the last day (`/api/stats`)
    async fn stats(&self) -> Result<Stats, FetchError>;
}
