//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Chart.js glue lives in `assets/js/trade-chart.js`, is embedded at
//! compile time and evaluated once. It exposes `window.tpcCreateChart`,
//! `window.tpcUpdateChart` and `window.tpcDestroyChart`; the functions here
//! serialize their arguments and call those globals.

use tpc_core::error::RenderError;
use wasm_bindgen::{JsCast, JsValue};

static TRADE_CHART_JS: &str = include_str!("../assets/js/trade-chart.js");

/// Chart.js bundle loaded when the page does not provide one.
pub const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

/// Date adapter required by the time scale.
pub const DATE_ADAPTER_URL: &str =
    "https://cdn.jsdelivr.net/npm/chartjs-adapter-date-fns@3.0.0/dist/chartjs-adapter-date-fns.bundle.min.js";

/// Polls (100ms apart) a deferred chart waits for Chart.js before giving up.
pub const READY_POLL_LIMIT: u32 = 300;

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('TPC JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Execute JS and surface a thrown exception as a `RenderError`.
pub fn try_call_js(code: &str) -> Result<JsValue, RenderError> {
    js_sys::eval(code).map_err(|err| {
        let message = err
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| err.as_string())
            .unwrap_or_else(|| format!("{err:?}"));
        RenderError::Library(message)
    })
}

/// Quote a string as a JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "''".to_string())
}

/// Inject Chart.js and the date adapter unless the page already has them.
///
/// The adapter must load after Chart.js, so it is appended from the first
/// script's `onload`. Charts created before both arrive are deferred by the
/// glue script.
pub fn load_chart_library() {
    call_js(&format!(
        r#"
        (function() {{
            if (typeof Chart !== 'undefined' || window.__tpcLibraryRequested) return;
            window.__tpcLibraryRequested = true;
            var chartJs = document.createElement('script');
            chartJs.src = {chart_url};
            chartJs.onload = function() {{
                var adapter = document.createElement('script');
                adapter.src = {adapter_url};
                document.head.appendChild(adapter);
            }};
            chartJs.onerror = function(e) {{ console.error('[TPC] failed to load Chart.js', e); }};
            document.head.appendChild(chartJs);
        }})();
        "#,
        chart_url = js_string(CHART_JS_URL),
        adapter_url = js_string(DATE_ADAPTER_URL),
    ));
}

/// Evaluate the glue script at global scope. Safe to call repeatedly.
pub fn init_chart_scripts() {
    call_js(&glue_bootstrap(READY_POLL_LIMIT));
}

/// Script that sets the poll limit and then evaluates the glue globally.
fn glue_bootstrap(poll_limit: u32) -> String {
    format!(
        "window.__tpcPollLimit = {poll_limit}; (0, eval)({});",
        js_string(TRADE_CHART_JS)
    )
}

/// Build a chart on the canvas with DOM id `canvas_id`.
///
/// Fails when the canvas does not exist or the glue script is not loaded.
/// Problems inside Chart.js itself surface on the JS console.
pub fn create_chart(canvas_id: &str, config_json: &str) -> Result<(), RenderError> {
    try_call_js(&format!(
        "window.tpcCreateChart({}, {});",
        js_string(canvas_id),
        js_string(config_json)
    ))
    .map(|_| ())
}

/// Replace the single dataset of a chart and redraw it.
pub fn update_chart(canvas_id: &str, data_json: &str) {
    call_js(&format!(
        "window.tpcUpdateChart({}, {});",
        js_string(canvas_id),
        js_string(data_json)
    ));
}

/// Destroy the chart bound to `canvas_id`, including a pending one.
pub fn destroy_chart(canvas_id: &str) {
    call_js(&format!(
        "if (window.tpcDestroyChart) window.tpcDestroyChart({});",
        js_string(canvas_id)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glue_bootstrap_bounds_the_library_wait() {
        let script = glue_bootstrap(READY_POLL_LIMIT);
        assert!(script.starts_with("window.__tpcPollLimit = 300;"));
        assert!(glue_bootstrap(5).starts_with("window.__tpcPollLimit = 5;"));

        assert!(TRADE_CHART_JS.contains("pending.attempts >= window.__tpcPollLimit"));
        assert!(TRADE_CHART_JS.contains("console.error('[TPC] Chart.js not ready after "));
    }

    #[test]
    fn test_js_string_quotes_ids() {
        assert_eq!(js_string("trade-price-chart"), "\"trade-price-chart\"");
        assert_eq!(js_string("a'b\"c"), "\"a'b\\\"c\"");
    }
}
