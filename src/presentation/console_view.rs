// Terminal rendering of the dashboard
use crate::application::dashboard_view::{ConnectionStatus, DashboardView, Slot};
use crate::domain::chart::{ChartOptions, ChartState};
use std::collections::HashMap;
use std::io::{self, Stdout, Write};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_GAP: char = ' ';
const PLACEHOLDER: &str = "--";

/// Keeps the latest value of every slot and prints a full frame on
/// `present`.
pub struct ConsoleView<W = Stdout> {
    out: W,
    slots: HashMap<Slot, String>,
    status: Option<ConnectionStatus>,
    loading: bool,
    chart: ChartState,
}

impl ConsoleView<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            slots: HashMap::new(),
            status: None,
            loading: true,
            chart: ChartState::new(ChartOptions::temperature()),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn slot(&self, slot: Slot) -> &str {
        self.slots.get(&slot).map(String::as_str).unwrap_or(PLACEHOLDER)
    }

    fn render(&self) -> String {
        let mut frame = String::new();

        let status = match self.status {
            Some(status) => format!("● {}", status.label()),
            None => "○ ...".to_string(),
        };
        frame.push_str(&format!("== Погода ==  [{}]\n", status));

        if self.loading {
            frame.push_str("Загрузка данных...\n");
        }

        frame.push_str(&format!(
            "{} {}\n",
            self.slot(Slot::WeatherIcon),
            self.slot(Slot::WeatherCondition)
        ));
        frame.push_str(&format!(
            "Температура: {} °C   Влажность: {} %   Давление: {} гПа\n",
            self.slot(Slot::Temperature),
            self.slot(Slot::Humidity),
            self.slot(Slot::Pressure)
        ));
        frame.push_str(&format!(
            "Скорость ветра: {} м/с   {}\n",
            self.slot(Slot::WindSpeed),
            self.slot(Slot::WindDirection)
        ));
        frame.push_str(&format!(
            "Мин: {}   Макс: {}   Средн: {}\n",
            self.slot(Slot::MinTemperature),
            self.slot(Slot::MaxTemperature),
            self.slot(Slot::AvgTemperature)
        ));
        frame.push_str(&self.render_chart());
        frame
    }

    fn render_chart(&self) -> String {
        let title = &self.chart.options.dataset.label;
        let Some((min, max)) = self.chart.value_range() else {
            return format!("{}: нет данных\n", title);
        };

        let line: String = self
            .chart
            .data
            .iter()
            .map(|value| value.map_or(SPARK_GAP, |value| spark(value, min, max)))
            .collect();

        let labels = &self.chart.labels;
        let first = labels.first().map(String::as_str).unwrap_or("");
        let last = labels.last().map(String::as_str).unwrap_or("");
        let options = &self.chart.options;
        format!(
            "{}: {}  [{} .. {}]  {} .. {}\n",
            title,
            line,
            first,
            last,
            options.format_y_tick(round1(min)),
            options.format_y_tick(round1(max))
        )
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn spark(value: f64, min: f64, max: f64) -> char {
    let span = max - min;
    if span <= f64::EPSILON {
        return SPARK_LEVELS[SPARK_LEVELS.len() / 2];
    }
    let level = ((value - min) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
    SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
}

impl<W: Write + Send> DashboardView for ConsoleView<W> {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.slots.insert(slot, text.to_string());
    }

    fn set_connection_status(&mut self, status: ConnectionStatus) {
        if self.status != Some(status) {
            tracing::info!(class = status.css_class(), "Connection status: {}", status.label());
        }
        self.status = Some(status);
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }

    fn init_chart(&mut self, chart: &ChartState) {
        self.chart = chart.clone();
    }

    fn draw_chart(&mut self, chart: &ChartState) {
        self.chart.clone_from(chart);
    }

    fn present(&mut self) {
        let frame = self.render();
        let result = self
            .out
            .write_all(frame.as_bytes())
            .and_then(|_| self.out.write_all(b"\n"))
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::warn!("Failed to write dashboard frame: {}", e);
        }
    }
}
