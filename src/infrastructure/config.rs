use crate::application::poller::OverlapPolicy;
use crate::domain::chart::MAX_CHART_POINTS;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard";
const ENV_PREFIX: &str = "WEATHER_DASHBOARD";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendSettings,
    pub poll: PollSettings,
    pub demo: DemoSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,
    /// No timeout unless set; a hung request only stalls its own cycle.
    pub request_timeout_ms: Option<u64>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            request_timeout_ms: None,
        }
    }
}

impl BackendSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PollSettings {
    pub interval_ms: u64,
    pub history_hours: u32,
    pub max_chart_points: usize,
    pub overlap: OverlapPolicy,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            history_hours: 24,
            max_chart_points: MAX_CHART_POINTS,
            overlap: OverlapPolicy::Allow,
        }
    }
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DemoSettings {
    pub bind: String,
    pub generation_interval_secs: u64,
    pub retention_hours: u32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            generation_interval_secs: 5,
            retention_hours: 48,
        }
    }
}

/// Optional file at `path` (any format the config crate knows, extension
/// may be omitted), then `WEATHER_DASHBOARD__SECTION__KEY` overrides.
pub fn load_settings(path: &str) -> anyhow::Result<Settings> {
    let builder = Config::builder().add_source(File::with_name(path).required(false));
    build_settings(builder, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn build_settings(
    builder: ConfigBuilder<DefaultState>,
    env: Environment,
) -> anyhow::Result<Settings> {
    let settings: Settings = builder
        .add_source(env)
        .build()?
        .try_deserialize()?;

    if settings.poll.interval_ms == 0 {
        anyhow::bail!("poll.interval_ms must be greater than zero");
    }
    if settings.demo.generation_interval_secs == 0 {
        anyhow::bail!("demo.generation_interval_secs must be greater than zero");
    }

    Ok(settings)
}
