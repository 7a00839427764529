// Presentation contract the dashboard renders into
use crate::domain::chart::ChartState;

/// Named text slots on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
    WindDirection,
    WeatherIcon,
    WeatherCondition,
    MinTemperature,
    MaxTemperature,
    AvgTemperature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn from_success(ok: bool) -> Self {
        if ok {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Подключено",
            ConnectionStatus::Disconnected => "Нет подключения",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "status-connected",
            ConnectionStatus::Disconnected => "status-disconnected",
        }
    }
}

/// Everything the renderer is allowed to touch. Implementations own their
/// output surface; the renderer never looks anything up by name.
pub trait DashboardView: Send {
    fn set_text(&mut self, slot: Slot, text: &str);

    fn set_connection_status(&mut self, status: ConnectionStatus);

    /// The loading indicator is optional on a surface.
    fn hide_loading(&mut self) {}

    /// Called once, before any data arrives.
    fn init_chart(&mut self, chart: &ChartState);

    /// Redraw after the chart buffers were replaced (no animation).
    fn draw_chart(&mut self, chart: &ChartState);

    /// End of a refresh cycle.
    fn present(&mut self) {}
}
