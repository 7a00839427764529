// Temperature chart configuration and data buffers

pub const MAX_CHART_POINTS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverMode {
    /// All datasets at the hovered index.
    Index,
    /// Nearest point along the configured axis.
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverAxis {
    X,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStyle {
    pub label: String,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    /// Bezier curve tension; 0 draws straight segments.
    pub tension: f64,
    pub fill: bool,
    pub point_radius: u32,
    pub point_hover_radius: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipOptions {
    pub mode: HoverMode,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionOptions {
    pub mode: HoverMode,
    pub axis: HoverAxis,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisOptions {
    pub begin_at_zero: bool,
    pub show_grid: bool,
    pub tick_suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub kind: ChartKind,
    pub dataset: DatasetStyle,
    pub show_legend: bool,
    pub tooltip: TooltipOptions,
    pub interaction: InteractionOptions,
    pub y_axis: AxisOptions,
    pub x_axis: AxisOptions,
}

impl ChartOptions {
    /// The single smoothed temperature line shown on the dashboard.
    pub fn temperature() -> Self {
        Self {
            kind: ChartKind::Line,
            dataset: DatasetStyle {
                label: "Температура (°C)".to_string(),
                border_color: "#6366f1".to_string(),
                background_color: "rgba(99, 102, 241, 0.1)".to_string(),
                border_width: 3,
                tension: 0.4,
                fill: true,
                point_radius: 0,
                point_hover_radius: 6,
            },
            show_legend: false,
            tooltip: TooltipOptions {
                mode: HoverMode::Index,
                intersect: false,
            },
            interaction: InteractionOptions {
                mode: HoverMode::Nearest,
                axis: HoverAxis::X,
                intersect: false,
            },
            y_axis: AxisOptions {
                begin_at_zero: false,
                show_grid: true,
                tick_suffix: Some("°C".to_string()),
            },
            x_axis: AxisOptions {
                begin_at_zero: false,
                show_grid: false,
                tick_suffix: None,
            },
        }
    }

    pub fn format_y_tick(&self, value: f64) -> String {
        match &self.y_axis.tick_suffix {
            Some(suffix) => format!("{}{}", value, suffix),
            None => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    pub options: ChartOptions,
    pub labels: Vec<String>,
    /// `None` marks a gap in the line.
    pub data: Vec<Option<f64>>,
    revision: u64,
}

impl ChartState {
    pub fn new(options: ChartOptions) -> Self {
        Self {
            options,
            labels: Vec::new(),
            data: Vec::new(),
            revision: 0,
        }
    }

    /// Replace labels and series wholesale. Nothing is appended.
    pub fn replace(&mut self, labels: Vec<String>, data: Vec<Option<f64>>) {
        self.labels = labels;
        self.data = data;
        self.revision += 1;
    }

    /// Number of refreshes applied since initialization.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Lowest and highest plotted value, skipping gaps.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.data.iter().flatten().fold(None, |range, &value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })
    }
}

/// Fixed stride that keeps at most `max_points` of `len` samples.
///
/// Rounds up. The web dashboard this replaces used `floor(len / max_points)`,
/// which lets up to `2 * max_points - 1` samples through (120 gives 60).
pub fn downsample_stride(len: usize, max_points: usize) -> usize {
    if max_points == 0 {
        return len.max(1);
    }
    len.div_ceil(max_points).max(1)
}

/// Every `stride`-th item starting from the first.
pub fn downsample<T>(items: &[T], max_points: usize) -> impl Iterator<Item = &T> {
    let stride = downsample_stride(items.len(), max_points);
    items.iter().step_by(stride)
}
