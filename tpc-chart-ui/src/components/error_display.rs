//! Notice for a trade payload the chart had to drop.
//!
//! A rejected payload leaves the chart drawn with zero points, which looks the
//! same as a quiet market. This box says why the line is empty.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    /// Reason the payload was rejected
    pub message: String,
    /// Canvas the notice belongs to; empty when unknown
    #[props(default)]
    pub canvas_id: String,
}

/// What the chart is showing while the payload is rejected.
pub fn fallback_note(canvas_id: &str) -> String {
    if canvas_id.is_empty() {
        "The chart shows no trades until a valid list arrives.".to_string()
    } else {
        format!("Chart {canvas_id} shows no trades until a valid list arrives.")
    }
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let note = fallback_note(&props.canvas_id);
    rsx! {
        div {
            role: "alert",
            style: "padding: 12px 16px; margin: 8px 0; background: #FFF8E1; color: #8D6E00; border-radius: 4px; border: 1px solid #FFE082;",
            strong { "Trade data unavailable: " }
            "{props.message}"
            div {
                style: "margin-top: 4px; font-size: 12px; color: #6D5A00;",
                "{note}"
            }
        }
    }
}
