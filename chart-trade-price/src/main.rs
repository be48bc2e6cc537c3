//! Live Trade Price Chart
//!
//! Shows executed trades for one market as a Chart.js time-series line.
//!
//! Data flow:
//! 1. The page may hand over an initial trade list in the root element's
//!    `data-trades` attribute; otherwise `build.rs` embeds
//!    `fixtures/trades.json` and that is used.
//! 2. The app slices a window of trades and passes it, still serialized, to
//!    `TradingChart`, which writes it onto its canvas and mounts the chart.
//!    A page payload that is not a JSON array is passed through untouched, so
//!    the chart rejects it and shows why.
//! 3. "Next batch" slides the window forward. The chart updates in place;
//!    only the latest window is ever plotted.

use std::rc::Rc;

use anyhow::Context;
use dioxus::prelude::*;
use tpc_chart_ui::components::{ChartHeader, TradingChart};
use tpc_chart_ui::web::DomElement;
use tpc_core::config::DEFAULT_DATA_ATTRIBUTE;
use tpc_core::host::HostElement;

const FIXTURE_TRADES: &str = include_str!(concat!(env!("OUT_DIR"), "/trades.json"));

const ROOT_ID: &str = "trade-price-root";

/// DOM id for the Chart.js canvas.
const CHART_CANVAS_ID: &str = "trade-price-chart";

const MARKET: &str = "BTC/USDT";

/// Trades plotted at once.
const WINDOW_SIZE: usize = 30;

/// Trades the window advances per batch.
const BATCH_STEP: usize = 10;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname(ROOT_ID))
        .launch(App);
}

/// Where the plotted trades come from.
#[derive(Debug, Clone, PartialEq)]
enum TradeSource {
    /// A JSON array, plotted a window at a time
    Batches(Vec<serde_json::Value>),
    /// A page payload that is not a JSON array, handed to the chart as is
    Raw(String),
}

/// Trades handed over by the page, else the embedded fixture.
///
/// Records are kept as raw JSON: validating them is the chart binding's job.
fn load_trades() -> anyhow::Result<TradeSource> {
    let page_payload =
        DomElement::find(ROOT_ID).and_then(|root| root.attribute(DEFAULT_DATA_ATTRIBUTE));
    match page_payload {
        Some(raw) => Ok(page_source(raw)),
        None => {
            let trades: Vec<serde_json::Value> = serde_json::from_str(FIXTURE_TRADES)
                .context("embedded trade fixture is not a JSON array")?;
            log::info!("Loaded {} trades from fixture", trades.len());
            Ok(TradeSource::Batches(trades))
        }
    }
}

/// Batches for an array payload, passthrough for anything else.
fn page_source(raw: String) -> TradeSource {
    match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(trades) => {
            log::info!("Loaded {} trades from page", trades.len());
            TradeSource::Batches(trades)
        }
        Err(err) => {
            log::warn!("Page trade payload is not a JSON array ({err}); passing it to the chart");
            TradeSource::Raw(raw)
        }
    }
}

/// Payload for the chart and the number of trades it windows, `None` for a
/// raw passthrough.
fn trade_payload(source: &TradeSource, offset: usize) -> (String, Option<usize>) {
    match source {
        TradeSource::Batches(trades) => {
            let (payload, shown) = trade_window(trades, offset);
            (payload, Some(shown))
        }
        TradeSource::Raw(raw) => (raw.clone(), None),
    }
}

/// Serialized trades `offset..offset + WINDOW_SIZE`, clamped to the list.
fn trade_window(trades: &[serde_json::Value], offset: usize) -> (String, usize) {
    let start = offset.min(trades.len());
    let end = (start + WINDOW_SIZE).min(trades.len());
    let window = &trades[start..end];
    (serde_json::to_string(window).unwrap_or_default(), window.len())
}

/// Offset of the batch after `offset`, wrapping to the start at the end.
fn next_offset(total: usize, offset: usize) -> usize {
    let last = total.saturating_sub(WINDOW_SIZE);
    if offset >= last {
        0
    } else {
        (offset + BATCH_STEP).min(last)
    }
}

#[component]
fn App() -> Element {
    let source = use_hook(|| {
        Rc::new(load_trades().unwrap_or_else(|err| {
            log::error!("{err:#}");
            TradeSource::Batches(Vec::new())
        }))
    });
    let mut offset = use_signal(|| 0usize);

    let total = match source.as_ref() {
        TradeSource::Batches(trades) => trades.len(),
        TradeSource::Raw(_) => 0,
    };
    let (payload, shown) = trade_payload(&source, offset());
    let range_label = match shown {
        None => "Page payload passed through".to_string(),
        Some(0) => "No trades".to_string(),
        Some(shown) => format!("Trades {}-{} of {total}", offset() + 1, offset() + shown),
    };

    rsx! {
        div {
            style: "max-width: 900px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            ChartHeader {
                title: MARKET.to_string(),
                quote_currency: "USDT".to_string(),
                trade_count: shown,
            }

            TradingChart {
                id: CHART_CANVAS_ID.to_string(),
                trades: payload,
                show_errors: true,
                height: 450,
            }

            div {
                style: "margin-top: 12px; padding-top: 8px; border-top: 1px solid #e0e0e0; display: flex; gap: 12px; align-items: center;",
                button {
                    disabled: total <= WINDOW_SIZE,
                    onclick: move |_| {
                        let next = next_offset(total, offset());
                        offset.set(next);
                    },
                    "Next batch"
                }
                span {
                    style: "font-size: 12px; color: #666;",
                    "{range_label}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trades(n: usize) -> Vec<serde_json::Value> {
        (0..n)
            .map(|i| json!({"executed_at": "2024-01-01T00:00:00Z", "price": i}))
            .collect()
    }

    #[test]
    fn test_fixture_is_a_trade_list() {
        let parsed = tpc_core::trade::parse_trades(Some(FIXTURE_TRADES)).unwrap();
        let raw: Vec<serde_json::Value> = serde_json::from_str(FIXTURE_TRADES).unwrap();
        assert_eq!(parsed.len(), raw.len());
    }

    #[test]
    fn test_trade_window_clamps() {
        let list = trades(45);
        let (payload, shown) = trade_window(&list, 0);
        assert_eq!(shown, WINDOW_SIZE);
        let back: Vec<serde_json::Value> = serde_json::from_str(&payload).unwrap();
        assert_eq!(back[0]["price"], 0);

        let (_, shown) = trade_window(&list, 40);
        assert_eq!(shown, 5);

        let (payload, shown) = trade_window(&list, 100);
        assert_eq!(shown, 0);
        assert_eq!(payload, "[]");
    }

    #[test]
    fn test_non_array_page_payload_reaches_the_chart() {
        let raw = r#"{"trades": []}"#.to_string();
        let source = page_source(raw.clone());
        assert_eq!(source, TradeSource::Raw(raw.clone()));

        let (payload, shown) = trade_payload(&source, 20);
        assert_eq!(payload, raw);
        assert_eq!(shown, None);
        assert!(tpc_core::trade::parse_trades(Some(&payload)).is_err());

        let source = page_source("not json".to_string());
        assert_eq!(trade_payload(&source, 0).0, "not json");
    }

    #[test]
    fn test_array_page_payload_is_windowed() {
        let raw = serde_json::to_string(&trades(35)).unwrap();
        let source = page_source(raw);
        let (payload, shown) = trade_payload(&source, 10);
        assert_eq!(shown, Some(25));
        let back: Vec<serde_json::Value> = serde_json::from_str(&payload).unwrap();
        assert_eq!(back[0]["price"], 10);
    }

    #[test]
    fn test_next_offset_wraps() {
        assert_eq!(next_offset(90, 0), 10);
        assert_eq!(next_offset(90, 50), 60);
        assert_eq!(next_offset(90, 55), 60);
        assert_eq!(next_offset(90, 60), 0);
        assert_eq!(next_offset(20, 0), 0);
    }
}
