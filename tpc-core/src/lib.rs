//! Trade price chart binding.
//!
//! Keeps one rendered price chart in sync with a JSON trade payload stored on
//! its host element, across mount, update and destroy.
//!
//! This crate provides:
//! - `trade`: `TradeRecord`/`ChartPoint` and payload parsing
//! - `config`: the chart configuration handed to the charting library
//! - `binding`: the `ChartBinding` lifecycle state machine
//! - `renderer`, `host`, `sink`: the seams a binding is wired through
//!
//! # Usage
//!
//! ```rust
//! use tpc_core::binding::ChartBinding;
//! use tpc_core::config::ChartConfig;
//! use tpc_core::error::RenderError;
//! use tpc_core::host::HostElement;
//! use tpc_core::renderer::ChartRenderer;
//! use tpc_core::trade::ChartPoint;
//!
//! struct Canvas(String);
//!
//! impl HostElement for Canvas {
//!     fn attribute(&self, _name: &str) -> Option<String> {
//!         Some(self.0.clone())
//!     }
//!     fn surface_id(&self) -> String {
//!         "price-chart".to_string()
//!     }
//! }
//!
//! /// Keeps the current series in memory instead of drawing it.
//! struct InMemory;
//!
//! impl ChartRenderer for InMemory {
//!     type Handle = Vec<ChartPoint>;
//!     fn create(&mut self, _: &str, _: &ChartConfig, points: &[ChartPoint]) -> Result<Self::Handle, RenderError> {
//!         Ok(points.to_vec())
//!     }
//!     fn replace_series_data(&mut self, handle: &mut Self::Handle, points: &[ChartPoint]) {
//!         *handle = points.to_vec();
//!     }
//!     fn release(&mut self, _: Self::Handle) {}
//! }
//!
//! let mut binding = ChartBinding::new(InMemory);
//! binding.mount(&Canvas(r#"[{"executed_at":"2024-01-01T00:00:00Z","price":42000}]"#.to_string()));
//! assert!(binding.is_mounted());
//! assert_eq!(binding.point_count(), 1);
//!
//! binding.update(&Canvas("[]".to_string()));
//! assert_eq!(binding.point_count(), 0);
//!
//! binding.destroy();
//! assert!(!binding.is_mounted());
//! ```

pub mod binding;
pub mod config;
pub mod error;
pub mod host;
pub mod renderer;
pub mod sink;
pub mod trade;

pub use binding::ChartBinding;
pub use error::{RenderError, TradeDataError};
pub use trade::{ChartPoint, NaiveZone, TradeRecord};
