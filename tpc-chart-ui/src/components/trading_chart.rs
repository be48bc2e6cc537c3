//! Price chart bound to a `data-trades` payload on its canvas.
//!
//! The canvas carries the serialized trades as an attribute, the same way a
//! server-rendered page would. After the first render the component mounts a
//! `ChartBinding` on it. A new `trades` value makes the binding re-read the
//! attribute and swap the series in place. A new `chart` value rebuilds the
//! chart with the new look. Dropping the component destroys the chart.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dioxus::prelude::*;
use tpc_core::binding::ChartBinding;
use tpc_core::config::{BindingConfig, ChartConfig};
use tpc_core::sink::LogSink;

use super::ErrorDisplay;
use crate::web::{ChartJsRenderer, DomElement};

type SharedBinding = Rc<RefCell<ChartBinding<ChartJsRenderer>>>;

/// Props for TradingChart
#[derive(Props, Clone, PartialEq)]
pub struct TradingChartProps {
    /// DOM id of the canvas Chart.js draws into
    pub id: String,
    /// Serialized trade list (`[{"executed_at": ..., "price": ...}]`)
    pub trades: String,
    /// Chart look; defaults to the USDT price chart. Changing it rebuilds
    /// the chart.
    #[props(default)]
    pub chart: ChartConfig,
    /// Show malformed payloads as an error box instead of only logging them
    #[props(default = false)]
    pub show_errors: bool,
    /// Height of the chart area in pixels
    #[props(default = 400)]
    pub height: u32,
}

#[component]
pub fn TradingChart(props: TradingChartProps) -> Element {
    let initial_chart = props.chart.clone();
    let binding: SharedBinding = use_hook(move || {
        let config = BindingConfig::default().with_chart(initial_chart);
        Rc::new(RefCell::new(ChartBinding::with_sink(
            ChartJsRenderer::new(),
            LogSink,
            config,
        )))
    });
    let mounted = use_hook(|| Rc::new(Cell::new(false)));
    let mut error_msg: Signal<Option<String>> = use_signal(|| None);

    // ─── Mount on first run, then follow payload and look changes ───
    let effect_binding = binding.clone();
    let id = props.id.clone();
    let trades = props.trades.clone();
    let chart = props.chart.clone();
    use_effect(use_reactive!(|(trades, chart)| {
        log::debug!("[TPC] {id}: trade payload is {} bytes", trades.len());

        // The binding reads the attribute the render just wrote.
        let Some(element) = DomElement::find(&id) else {
            log::warn!("[TPC] chart canvas {id} is not in the document");
            return;
        };

        let mut binding = effect_binding.borrow_mut();
        if mounted.get() {
            if !binding.set_chart_config(chart, &element) {
                binding.update(&element);
            }
        } else {
            mounted.set(true);
            binding.mount(&element);
        }
        error_msg.set(binding.last_error().map(|e| e.to_string()));
    }));

    let drop_binding = binding.clone();
    use_drop(move || drop_binding.borrow_mut().destroy());

    let style = format!(
        "height: {}px; position: relative; width: 100%;",
        props.height
    );

    rsx! {
        div {
            if props.show_errors {
                if let Some(message) = error_msg() {
                    ErrorDisplay { message: message, canvas_id: props.id.clone() }
                }
            }
            div {
                style: "{style}",
                canvas {
                    id: "{props.id}",
                    "data-trades": "{props.trades}",
                }
            }
        }
    }
}
