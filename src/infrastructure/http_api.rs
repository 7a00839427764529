// HTTP implementation of the weather backend API
use crate::application::weather_api::{FetchError, WeatherApi};
use crate::domain::weather::{HistoryPoint, Reading, Stats};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

const LATEST_PATH: &str = "/api/latest";
const HISTORY_PATH: &str = "/api/history";
const STATS_PATH: &str = "/api/stats";

#[derive(Debug, Clone)]
pub struct HttpWeatherApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpWeatherApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let transport = |source: reqwest::Error| FetchError::Transport {
            path: path.to_string(),
            source: Box::new(source),
        };

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl WeatherApi for HttpWeatherApi {
    async fn latest(&self) -> Result<Reading, FetchError> {
        self.get_json(LATEST_PATH, &[]).await
    }

    async fn history(&self, hours: u32) -> Result<Vec<HistoryPoint>, FetchError> {
        self.get_json(HISTORY_PATH, &[("hours", hours.to_string())])
            .await
    }

    async fn stats(&self) -> Result<Stats, FetchError> {
        self.get_json(STATS_PATH, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::weather::WeatherCondition;
    use crate::infrastructure::reading_store::ReadingStore;
    use crate::presentation::app_state::AppState;
    use crate::presentation::handlers::demo_router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use chrono::{Duration as ChronoDuration, Utc};
    use std::net::SocketAddr;
    use std::sync::Arc;

    async fn serve(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn sample(temperature: f64) -> Reading {
        Reading {
            temperature,
            humidity: 40.2,
            pressure: 1012.5,
            wind_speed: 3.4,
            wind_direction: 190.0,
            weather_condition: WeatherCondition::Rainy,
        }
    }

    #[tokio::test]
    async fn test_round_trip_against_demo_backend() {
        let store = Arc::new(ReadingStore::new(48));
        let now = Utc::now();
        store.insert(sample(18.0), now - ChronoDuration::hours(30)).await;
        store.insert(sample(20.0), now - ChronoDuration::minutes(10)).await;
        store.insert(sample(21.3), now).await;

        let addr = serve(demo_router(Arc::new(AppState::new(store)))).await;
        let api = HttpWeatherApi::new(&format!("http://{}/", addr), None).unwrap();

        let latest = api.latest().await.unwrap();
        assert_eq!(latest.temperature, 21.3);
        assert_eq!(latest.weather_condition, WeatherCondition::Rainy);

        let history = api.history(24).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].temperature, Some(20.0));
        assert!(history[0].local_time().is_some());

        let stats = api.stats().await.unwrap();
        let temperature = stats.temperature.unwrap();
        assert_eq!(temperature.min, 20.0);
        assert_eq!(temperature.max, 21.3);
    }

    #[tokio::test]
    async fn test_empty_backend_is_a_status_failure() {
        let store = Arc::new(ReadingStore::new(48));
        let addr = serve(demo_router(Arc::new(AppState::new(store)))).await;
        let api = HttpWeatherApi::new(&format!("http://{}", addr), None).unwrap();

        match api.latest().await {
            Err(FetchError::Status { path, status }) => {
                assert_eq!(path, "/api/latest");
                assert_eq!(status, 404);
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_failure() {
        let router = Router::new()
            .route("/api/latest", get(|| async { "{not json" }))
            .route("/api/stats", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }));
        let addr = serve(router).await;
        let api = HttpWeatherApi::new(&format!("http://{}", addr), None).unwrap();

        assert!(matches!(api.latest().await, Err(FetchError::Decode { .. })));
        assert!(matches!(
            api.stats().await,
            Err(FetchError::Status { status: 500, .. })
        ));
        assert!(matches!(
            api.history(24).await,
            Err(FetchError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpWeatherApi::new(&format!("http://{}", addr), Some(Duration::from_secs(2)))
            .unwrap();
        assert!(matches!(api.latest().await, Err(FetchError::Transport { .. })));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let api = HttpWeatherApi::new("http://localhost:8080///", None).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8080");
    }
}
