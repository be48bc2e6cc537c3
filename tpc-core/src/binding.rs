//! `ChartBinding`: one chart kept in sync with its host element's payload.
//!
//! Lifecycle: `Unmounted -> Mounted -> Released`. `update` is a self
//! transition on `Mounted` and does nothing anywhere else. `Released` is
//! terminal.

use crate::config::{BindingConfig, ChartConfig};
use crate::error::TradeDataError;
use crate::host::HostElement;
use crate::renderer::ChartRenderer;
use crate::sink::{DiagnosticSink, LogSink};
use crate::trade::{parse_trades_in, to_points, ChartPoint};

enum Phase<H> {
    Unmounted,
    Mounted(H),
    Released,
}

/// Owns at most one chart handle for one host element.
pub struct ChartBinding<R: ChartRenderer, S: DiagnosticSink = LogSink> {
    renderer: R,
    sink: S,
    config: BindingConfig,
    phase: Phase<R::Handle>,
    point_count: usize,
    last_error: Option<TradeDataError>,
}

impl<R: ChartRenderer> ChartBinding<R, LogSink> {
    /// Binding with the default configuration, logging through `log`.
    pub fn new(renderer: R) -> Self {
        Self::with_sink(renderer, LogSink, BindingConfig::default())
    }
}

impl<R: ChartRenderer, S: DiagnosticSink> ChartBinding<R, S> {
    pub fn with_sink(renderer: R, sink: S, config: BindingConfig) -> Self {
        Self {
            renderer,
            sink,
            config,
            phase: Phase::Unmounted,
            point_count: 0,
            last_error: None,
        }
    }

    /// Build the chart from the element's current payload.
    ///
    /// A malformed payload yields a chart with no points. If the renderer
    /// fails, the binding stays without a chart and later updates do nothing.
    pub fn mount(&mut self, element: &impl HostElement) {
        match self.phase {
            Phase::Unmounted => {}
            Phase::Mounted(_) => {
                self.sink.warn("Trading chart already mounted; ignoring mount");
                return;
            }
            Phase::Released => {
                self.sink.warn("Trading chart was destroyed; ignoring mount");
                return;
            }
        }

        self.sink.info("Trading chart hook mounted");
        let points = self.read_points(element, "Error initializing chart");
        self.sink
            .info(&format!("Initial trades data: {} trades", points.len()));

        let surface = element.surface_id();
        match self.renderer.create(&surface, &self.config.chart, &points) {
            Ok(handle) => {
                self.point_count = points.len();
                self.phase = Phase::Mounted(handle);
            }
            Err(err) => {
                self.sink
                    .error(&format!("Error initializing chart on {surface}: {err}"));
            }
        }
    }

    /// Swap the chart's series for the element's current payload.
    pub fn update(&mut self, element: &impl HostElement) {
        if !self.is_mounted() {
            return;
        }

        let points = self.read_points(element, "Error updating chart");
        self.sink
            .info(&format!("Updating chart with trades: {} trades", points.len()));

        if let Phase::Mounted(handle) = &mut self.phase {
            self.renderer.replace_series_data(handle, &points);
            self.point_count = points.len();
        }
    }

    /// Switch to a new chart look.
    ///
    /// A mounted chart cannot be restyled in place: it is released and built
    /// again from the element's current payload. Returns whether that
    /// happened. Before mount only the stored configuration changes.
    pub fn set_chart_config(&mut self, chart: ChartConfig, element: &impl HostElement) -> bool {
        if self.config.chart == chart {
            return false;
        }
        self.config.chart = chart;
        if !self.is_mounted() {
            return false;
        }
        if let Phase::Mounted(handle) = std::mem::replace(&mut self.phase, Phase::Unmounted) {
            self.renderer.release(handle);
            self.point_count = 0;
        }
        self.mount(element);
        true
    }

    /// Release the chart if there is one.
    pub fn destroy(&mut self) {
        if !self.is_mounted() {
            return;
        }
        if let Phase::Mounted(handle) = std::mem::replace(&mut self.phase, Phase::Released) {
            self.renderer.release(handle);
            self.point_count = 0;
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.phase, Phase::Mounted(_))
    }

    pub fn is_released(&self) -> bool {
        matches!(self.phase, Phase::Released)
    }

    /// Number of points last handed to the renderer.
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Why the latest payload was rejected, if it was.
    pub fn last_error(&self) -> Option<&TradeDataError> {
        self.last_error.as_ref()
    }

    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn read_points(&mut self, element: &impl HostElement, context: &str) -> Vec<ChartPoint> {
        let raw = element.attribute(&self.config.data_attribute);
        match parse_trades_in(raw.as_deref(), self.config.naive_zone) {
            Ok(trades) => {
                self.last_error = None;
                to_points(&trades)
            }
            Err(err) => {
                self.sink.error(&format!("{context}: {err}"));
                self.last_error = Some(err);
                Vec::new()
            }
        }
    }
}
