// Dashboard service - One fetch-and-render cycle
use crate::application::dashboard_view::DashboardView;
use crate::application::renderer::DashboardRenderer;
use crate::application::weather_api::WeatherApi;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Outcome of each step of a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub latest: bool,
    pub history: bool,
    pub stats: bool,
}

pub struct DashboardService<V> {
    api: Arc<dyn WeatherApi>,
    renderer: Arc<Mutex<DashboardRenderer<V>>>,
    history_hours: u32,
}

impl<V: DashboardView> DashboardService<V> {
    pub fn new(
        api: Arc<dyn WeatherApi>,
        renderer: Arc<Mutex<DashboardRenderer<V>>>,
        history_hours: u32,
    ) -> Self {
        Self {
            api,
            renderer,
            history_hours,
        }
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &Arc<Mutex<DashboardRenderer<V>>> {
        &self.renderer
    }

    /// Latest, then history, then stats. Each step waits for the previous one
    /// but never depends on its outcome.
    pub async fn run_cycle(&self) -> CycleReport {
        let report = CycleReport {
            latest: self.fetch_latest().await,
            history: self.fetch_history().await,
            stats: self.fetch_stats().await,
        };
        self.renderer.lock().await.present();

        tracing::debug!(
            "Cycle finished: latest={}, history={}, stats={}",
            report.latest,
            report.history,
            report.stats
        );
        report
    }

    pub async fn fetch_latest(&self) -> bool {
        match self.api.latest().await {
            Ok(reading) => {
                let mut renderer = self.renderer.lock().await;
                renderer.update_metrics(&reading);
                renderer.update_connection_status(true);
                true
            }
            Err(e) => {
                tracing::error!(path = e.path(), "Error fetching latest data: {}", e);
                self.renderer.lock().await.update_connection_status(false);
                false
            }
        }
    }

    pub async fn fetch_history(&self) -> bool {
        match self.api.history(self.history_hours).await {
            Ok(history) => {
                tracing::debug!("Received {} historical points", history.len());
                self.renderer.lock().await.update_chart(&history);
                true
            }
            Err(e) => {
                tracing::error!(path = e.path(), "Error fetching historical data: {}", e);
                false
            }
        }
    }

    pub async fn fetch_stats(&self) -> bool {
        match self.api.stats().await {
            Ok(stats) => {
                self.renderer.lock().await.update_stats(&stats);
                true
            }
            Err(e) => {
                tracing::error!(path = e.path(), "Error fetching stats: {}", e);
                false
            }
        }
    }
}
