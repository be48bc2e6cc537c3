//! Chart configuration handed to the charting library.
//!
//! `ChartConfig::default()` is the trade price chart as shipped: a filled
//! line series on a minute-granularity time axis, no entry animation, legend
//! hidden, prices in USDT. The JS side receives the output of
//! [`ChartConfig::to_library_config`] as one JSON object.

use serde_json::{json, Value};

use crate::trade::{ChartPoint, NaiveZone};

/// Attribute on the host element that carries the serialized trade list.
pub const DEFAULT_DATA_ATTRIBUTE: &str = "data-trades";

/// Placeholder replaced by the locale-formatted price in tooltip labels.
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// Granularity of the time axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
        }
    }
}

/// X axis: time scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub title: String,
    pub unit: TimeUnit,
    /// Tick label format used for minute and hour ticks
    pub display_format: String,
    pub max_ticks: u32,
}

impl Default for TimeAxis {
    fn default() -> Self {
        Self {
            title: "Time".to_string(),
            unit: TimeUnit::Minute,
            display_format: "HH:mm".to_string(),
            max_ticks: 10,
        }
    }
}

/// Y axis: linear price scale with locale-formatted tick labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    pub title: String,
    pub locale_ticks: bool,
}

impl Default for ValueAxis {
    fn default() -> Self {
        Self {
            title: "Price (USDT)".to_string(),
            locale_ticks: true,
        }
    }
}

/// Look and behavior of the price line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub dataset_label: String,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    pub point_radius: u32,
    pub point_hover_radius: u32,
    pub fill: bool,
    pub animation: bool,
    pub x_axis: TimeAxis,
    pub y_axis: ValueAxis,
    /// Tooltip label template; `{value}` is replaced by the formatted price
    pub tooltip_label: String,
    pub show_legend: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            dataset_label: "Trade Price".to_string(),
            border_color: "#4C51BF".to_string(),
            background_color: "rgba(76, 81, 191, 0.1)".to_string(),
            border_width: 2,
            point_radius: 3,
            point_hover_radius: 5,
            fill: true,
            animation: false,
            x_axis: TimeAxis::default(),
            y_axis: ValueAxis::default(),
            tooltip_label: format!("Price: {VALUE_PLACEHOLDER} USDT"),
            show_legend: false,
        }
    }
}

impl ChartConfig {
    pub fn with_dataset_label(mut self, label: impl Into<String>) -> Self {
        self.dataset_label = label.into();
        self
    }

    /// Quote currency shown on the y axis title and in tooltips.
    pub fn with_quote_currency(mut self, currency: &str) -> Self {
        self.y_axis.title = format!("Price ({currency})");
        self.tooltip_label = format!("Price: {VALUE_PLACEHOLDER} {currency}");
        self
    }

    pub fn with_max_time_ticks(mut self, max_ticks: u32) -> Self {
        self.x_axis.max_ticks = max_ticks;
        self
    }

    /// Render the tooltip label for one price, given an already formatted value.
    pub fn tooltip_text(&self, formatted_value: &str) -> String {
        self.tooltip_label.replace(VALUE_PLACEHOLDER, formatted_value)
    }

    /// Full library configuration with `points` as the only dataset.
    ///
    /// Formatting callbacks cannot travel as JSON, so they are described in a
    /// top-level `formatting` block that the JS side turns into callbacks
    /// before building the chart.
    pub fn to_library_config(&self, points: &[ChartPoint]) -> Value {
        let unit = self.x_axis.unit.as_str();
        let mut display_formats = serde_json::Map::new();
        display_formats.insert(unit.to_string(), json!(self.x_axis.display_format));
        display_formats.insert("minute".to_string(), json!(self.x_axis.display_format));
        display_formats.insert("hour".to_string(), json!(self.x_axis.display_format));

        json!({
            "type": "line",
            "data": {
                "datasets": [{
                    "label": self.dataset_label,
                    "data": points,
                    "borderColor": self.border_color,
                    "backgroundColor": self.background_color,
                    "borderWidth": self.border_width,
                    "pointRadius": self.point_radius,
                    "pointHoverRadius": self.point_hover_radius,
                    "fill": self.fill,
                }]
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "animation": self.animation,
                "scales": {
                    "x": {
                        "type": "time",
                        "time": {
                            "unit": unit,
                            "displayFormats": display_formats,
                        },
                        "title": { "display": true, "text": self.x_axis.title },
                        "ticks": {
                            "maxTicksLimit": self.x_axis.max_ticks,
                            "source": "auto",
                            "autoSkip": true,
                            "maxRotation": 0,
                        }
                    },
                    "y": {
                        "title": { "display": true, "text": self.y_axis.title },
                    }
                },
                "plugins": {
                    "legend": { "display": self.show_legend },
                    "tooltip": { "mode": "index", "intersect": false },
                }
            },
            "formatting": {
                "localeTicks": self.y_axis.locale_ticks,
                "tooltipLabel": self.tooltip_label,
            }
        })
    }
}

/// Everything a [`ChartBinding`](crate::binding::ChartBinding) needs besides
/// its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingConfig {
    /// Host element attribute holding the trade payload
    pub data_attribute: String,
    /// Zone offset-less `executed_at` values are read in
    pub naive_zone: NaiveZone,
    pub chart: ChartConfig,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            data_attribute: DEFAULT_DATA_ATTRIBUTE.to_string(),
            naive_zone: NaiveZone::Local,
            chart: ChartConfig::default(),
        }
    }
}

impl BindingConfig {
    pub fn with_data_attribute(mut self, name: impl Into<String>) -> Self {
        self.data_attribute = name.into();
        self
    }

    pub fn with_naive_zone(mut self, zone: NaiveZone) -> Self {
        self.naive_zone = zone;
        self
    }

    pub fn with_chart(mut self, chart: ChartConfig) -> Self {
        self.chart = chart;
        self
    }
}
