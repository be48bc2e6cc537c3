//! Chart header with the market title and quote currency note.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    /// Market title, e.g. "BTC/USDT"
    pub title: String,
    /// Quote currency prices are shown in
    #[props(default = String::new())]
    pub quote_currency: String,
    /// Number of trades currently plotted
    #[props(default)]
    pub trade_count: Option<usize>,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 8px; display: flex; align-items: baseline; gap: 12px;",
            h3 {
                style: "margin: 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.quote_currency.is_empty() {
                span {
                    style: "font-size: 12px; color: #666;",
                    "Prices in {props.quote_currency}"
                }
            }
            if let Some(count) = props.trade_count {
                span {
                    style: "font-size: 12px; color: #666;",
                    "{count} trades"
                }
            }
        }
    }
}
