// Main entry point - Dependency injection, poll loop and demo backend setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::poller::DashboardPoller;
use crate::application::renderer::DashboardRenderer;
use crate::infrastructure::config::{load_settings, Settings, DEFAULT_CONFIG_PATH};
use crate::infrastructure::http_api::HttpWeatherApi;
use crate::infrastructure::reading_store::ReadingStore;
use crate::infrastructure::sensor_simulator::{spawn_generator, SensorSimulator};
use crate::presentation::app_state::AppState;
use crate::presentation::console_view::ConsoleView;
use crate::presentation::handlers::demo_router;

#[derive(Parser)]
#[command(name = "weather-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Polling weather dashboard for a sensor REST backend")]
struct Cli {
    /// Settings file (extension optional)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Poll the backend and render the dashboard in the terminal (default)
    Watch {
        /// Backend base URL, overrides backend.base_url
        #[arg(long)]
        backend: Option<String>,
    },

    /// Serve /api/latest, /api/history and /api/stats from generated readings
    Serve {
        /// Listen address, overrides demo.bind
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Watch,
    Serve,
}

impl Cli {
    /// Folds command-line overrides into `settings`; no subcommand means
    /// `watch`.
    fn apply(self, settings: &mut Settings) -> Mode {
        match self.command.unwrap_or(Command::Watch { backend: None }) {
            Command::Watch { backend } => {
                if let Some(backend) = backend {
                    settings.backend.base_url = backend;
                }
                Mode::Watch
            }
            Command::Serve { bind } => {
                if let Some(bind) = bind {
                    settings.demo.bind = bind;
                }
                Mode::Serve
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; frames go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;

    match cli.apply(&mut settings) {
        Mode::Watch => watch(settings).await,
        Mode::Serve => serve(settings).await,
    }
}

async fn watch(settings: Settings) -> anyhow::Result<()> {
    let api = Arc::new(HttpWeatherApi::new(
        &settings.backend.base_url,
        settings.backend.request_timeout(),
    )?);
    tracing::info!("Watching weather backend at {}", api.base_url());

    // Chart is initialized here, once, before the first cycle
    let renderer = DashboardRenderer::new(ConsoleView::stdout(), settings.poll.max_chart_points);
    let service = DashboardService::new(
        api,
        Arc::new(Mutex::new(renderer)),
        settings.poll.history_hours,
    );
    let poller = Arc::new(DashboardPoller::new(
        service,
        settings.poll.interval(),
        settings.poll.overlap,
    ));

    poller.run(shutdown_signal()).await;
    Ok(())
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    let store = Arc::new(ReadingStore::new(settings.demo.retention_hours));
    let generator = spawn_generator(
        store.clone(),
        SensorSimulator::from_entropy()?,
        Duration::from_secs(settings.demo.generation_interval_secs),
    );

    let router = demo_router(Arc::new(AppState::new(store)));

    let addr: SocketAddr = settings.demo.bind.parse()?;
    tracing::info!("Starting weather demo backend on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    generator.abort();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> (String, Mode, Settings) {
        let cli = Cli::try_parse_from(args).unwrap();
        let config = cli.config.clone();
        let mut settings = Settings::default();
        let mode = cli.apply(&mut settings);
        (config, mode, settings)
    }

    #[test]
    fn test_watch_is_default() {
        let (config, mode, settings) = run(&["weather-dashboard"]);
        assert_eq!(mode, Mode::Watch);
        assert_eq!(config, DEFAULT_CONFIG_PATH);
        assert_eq!(settings.backend.base_url, Settings::default().backend.base_url);
    }

    #[test]
    fn test_watch_backend_override() {
        let (_, mode, settings) = run(&[
            "weather-dashboard",
            "watch",
            "--backend",
            "http://sensors.lan:8080",
        ]);
        assert_eq!(mode, Mode::Watch);
        assert_eq!(settings.backend.base_url, "http://sensors.lan:8080");
        assert_eq!(settings.demo.bind, "0.0.0.0:8080");
    }

    #[test]
    fn test_serve_bind_override_and_global_config() {
        let (config, mode, settings) = run(&[
            "weather-dashboard",
            "serve",
            "--bind",
            "127.0.0.1:9090",
            "--config",
            "/etc/weather/dashboard.toml",
        ]);
        assert_eq!(mode, Mode::Serve);
        assert_eq!(config, "/etc/weather/dashboard.toml");
        assert_eq!(settings.demo.bind, "127.0.0.1:9090");
        assert_eq!(settings.backend.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["weather-dashboard", "plot"]).is_err());
    }
}
