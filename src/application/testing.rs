// Test doubles shared by the application tests
use crate::application::dashboard_view::{ConnectionStatus, DashboardView, Slot};
use crate::application::weather_api::{FetchError, WeatherApi};
use crate::domain::chart::ChartState;
use crate::domain::weather::{HistoryPoint, Reading, Stats, WeatherCondition};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

pub fn reading(
    temperature: f64,
    humidity: f64,
    pressure: f64,
    wind_speed: f64,
    wind_direction: f64,
    condition: &str,
) -> Reading {
    Reading {
        temperature,
        humidity,
        pressure,
        wind_speed,
        wind_direction,
        weather_condition: WeatherCondition::from(condition.to_string()),
    }
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub slots: HashMap<Slot, String>,
    pub status: Option<ConnectionStatus>,
    pub status_changes: usize,
    pub loading_hides: usize,
    pub chart_inits: usize,
    pub chart_draws: Vec<(Vec<String>, Vec<Option<f64>>)>,
    pub presents: usize,
}

impl RecordingView {
    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }
}

impl DashboardView for RecordingView {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.slots.insert(slot, text.to_string());
    }

    fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.status = Some(status);
        self.status_changes += 1;
    }

    fn hide_loading(&mut self) {
        self.loading_hides += 1;
    }

    fn init_chart(&mut self, _chart: &ChartState) {
        self.chart_inits += 1;
    }

    fn draw_chart(&mut self, chart: &ChartState) {
        self.chart_draws.push((chart.labels.clone(), chart.data.clone()));
    }

    fn present(&mut self) {
        self.presents += 1;
    }
}

/// One scripted response, delivered after `delay`.
pub struct Step<T> {
    pub delay: Duration,
    pub result: Result<T, FetchError>,
}

impl<T> Step<T> {
    pub fn ok(value: T) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(value),
        }
    }

    pub fn fail(path: &str, status: u16) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(FetchError::Status {
                path: path.to_string(),
                status,
            }),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Replays queued responses per endpoint; an empty queue answers 503.
#[derive(Default)]
pub struct StubApi {
    pub latest: Mutex<VecDeque<Step<Reading>>>,
    pub history: Mutex<VecDeque<Step<Vec<HistoryPoint>>>>,
    pub stats: Mutex<VecDeque<Step<Stats>>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl StubApi {
    pub fn push_latest(&self, step: Step<Reading>) {
        self.latest.lock().unwrap().push_back(step);
    }

    pub fn push_history(&self, step: Step<Vec<HistoryPoint>>) {
        self.history.lock().unwrap().push_back(step);
    }

    pub fn push_stats(&self, step: Step<Stats>) {
        self.stats.lock().unwrap().push_back(step);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.calls().iter().filter(|c| **c == path).count()
    }

    async fn replay<T>(
        &self,
        path: &'static str,
        queue: &Mutex<VecDeque<Step<T>>>,
    ) -> Result<T, FetchError> {
        self.calls.lock().unwrap().push(path);
        let step = queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Step::fail(path, 503));
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
        step.result
    }
}

#[async_trait]
impl WeatherApi for StubApi {
    async fn latest(&self) -> Result<Reading, FetchError> {
        self.replay("/api/latest", &self.latest).await
    }

    async fn history(&self, _hours: u32) -> Result<Vec<HistoryPoint>, FetchError> {
        self.replay("/api/history", &self.history).await
    }

    async fn stats(&self) -> Result<Stats, FetchError> {
        self.replay("/api/stats", &self.stats).await
    }
}
