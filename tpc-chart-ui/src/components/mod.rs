//! Reusable Dioxus RSX components for the trade price chart.

mod chart_header;
mod error_display;
mod trading_chart;

pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use trading_chart::TradingChart;
