//! Dioxus components and Chart.js bridge for the trade price chart.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Chart.js shim via `js_sys::eval()`
//! - `web`: `ChartJsRenderer` and `HostElement` for `web_sys::Element`
//! - `components`: `TradingChart` plus small reusable RSX pieces

pub mod components;
pub mod js_bridge;
pub mod web;
