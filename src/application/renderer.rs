// Renderer - Copies fetched payloads into the view
use crate::application::dashboard_view::{ConnectionStatus, DashboardView, Slot};
use crate::domain::chart::{downsample, ChartOptions, ChartState};
use crate::domain::formatting::{
    condition_icon, condition_label, format_celsius, format_one_decimal, wind_direction_label,
};
use crate::domain::weather::{HistoryPoint, Reading, Stats};

const UNKNOWN_TIME_LABEL: &str = "--:--";

pub struct DashboardRenderer<V> {
    view: V,
    chart: ChartState,
    max_points: usize,
    loading_visible: bool,
}

impl<V: DashboardView> DashboardRenderer<V> {
    /// Takes ownership of the view and initializes its chart.
    pub fn new(mut view: V, max_points: usize) -> Self {
        let chart = ChartState::new(ChartOptions::temperature());
        view.init_chart(&chart);
        Self {
            view,
            chart,
            max_points,
            loading_visible: true,
        }
    }

    #[cfg(test)]
    pub fn view(&self) -> &V {
        &self.view
    }

    #[cfg(test)]
    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    #[cfg(test)]
    pub fn loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn update_metrics(&mut self, reading: &Reading) {
        self.view
            .set_text(Slot::Temperature, &format_one_decimal(reading.temperature));
        self.view
            .set_text(Slot::Humidity, &format_one_decimal(reading.humidity));
        self.view
            .set_text(Slot::Pressure, &format_one_decimal(reading.pressure));
        self.view
            .set_text(Slot::WindSpeed, &format_one_decimal(reading.wind_speed));

        let condition = &reading.weather_condition;
        self.view.set_text(Slot::WeatherIcon, condition_icon(condition));
        self.view
            .set_text(Slot::WeatherCondition, condition_label(condition));
        self.view.set_text(
            Slot::WindDirection,
            &format!("Ветер: {}", wind_direction_label(reading.wind_direction)),
        );

        if self.loading_visible {
            self.view.hide_loading();
            self.loading_visible = false;
        }
    }

    pub fn update_chart(&mut self, history: &[HistoryPoint]) {
        let mut labels = Vec::new();
        let mut temperatures = Vec::new();

        for point in downsample(history, self.max_points) {
            let label = point
                .local_time()
                .map(|time| time.format("%H:%M").to_string())
                .unwrap_or_else(|| UNKNOWN_TIME_LABEL.to_string());
            labels.push(label);
            temperatures.push(point.temperature);
        }

        self.chart.replace(labels, temperatures);
        tracing::debug!(
            "Chart revision {}: {} of {} points",
            self.chart.revision(),
            self.chart.data.len(),
            history.len()
        );
        self.view.draw_chart(&self.chart);
    }

    pub fn update_stats(&mut self, stats: &Stats) {
        let Some(temperature) = stats.temperature else {
            return;
        };
        self.view
            .set_text(Slot::MinTemperature, &format_celsius(temperature.min));
        self.view
            .set_text(Slot::MaxTemperature, &format_celsius(temperature.max));
        self.view
            .set_text(Slot::AvgTemperature, &format_celsius(temperature.avg));
    }

    pub fn update_connection_status(&mut self, connected: bool) {
        self.view
            .set_connection_status(ConnectionStatus::from_success(connected));
    }

    pub fn present(&mut self) {
        self.view.present();
    }
}
