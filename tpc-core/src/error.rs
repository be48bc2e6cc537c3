/// Error types for trade payloads and chart rendering
use thiserror::Error;

/// A trade payload that could not be turned into trade records.
///
/// Every variant is a flavor of malformed input data. Callers degrade to an
/// empty trade list instead of propagating it.
#[derive(Error, Debug)]
pub enum TradeDataError {
    /// Payload is not a JSON array of `{executed_at, price}` objects
    #[error("invalid trade payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// `executed_at` is not an ISO-8601 timestamp
    #[error("trade {index}: invalid executed_at timestamp {value:?}")]
    InvalidTimestamp { index: usize, value: String },

    /// `price` is neither a finite number nor a numeric string
    #[error("trade {index}: invalid price {value}")]
    InvalidPrice { index: usize, value: String },
}

/// Failures raised by a chart renderer while creating a chart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The element the chart should draw into does not exist
    #[error("chart surface not found: {0}")]
    SurfaceNotFound(String),

    /// The chart configuration could not be serialized
    #[error("failed to build chart configuration: {0}")]
    Config(String),

    /// The charting library threw while building the chart
    #[error("charting library error: {0}")]
    Library(String),
}

/// Type alias for Results using TradeDataError
pub type Result<T> = std::result::Result<T, TradeDataError>;
