use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TradeDataError};

/// Timestamp formats carrying an offset. `%#z` takes `Z`, `+02`, `+0200`
/// and `+02:00`.
const OFFSET_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Offset-less timestamp formats, resolved in a [`NaiveZone`].
const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-only timestamps land on UTC midnight whatever the zone.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Zone an offset-less date-time is read in.
///
/// Browsers read `2024-01-01T00:00:00` as local wall-clock time, so `Local`
/// is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NaiveZone {
    #[default]
    Local,
    Utc,
}

impl NaiveZone {
    fn resolve(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            NaiveZone::Utc => Some(naive.and_utc()),
            NaiveZone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                // inside a DST gap: move forward past it, as browsers do
                .or_else(|| Local.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

/// One executed trade as read from the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeRecord {
    pub executed_at: DateTime<Utc>,
    pub price: f64,
}

/// A time/price pair ready for plotting.
///
/// Serializes as `{"x": <epoch millis>, "y": <price>}`, the shape a time
/// scale consumes directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub x: DateTime<Utc>,
    pub y: f64,
}

impl From<&TradeRecord> for ChartPoint {
    fn from(trade: &TradeRecord) -> Self {
        Self {
            x: trade.executed_at,
            y: trade.price,
        }
    }
}

/// Wire shape of a trade. Extra fields (id, quantity, side...) are ignored.
#[derive(Deserialize)]
struct RawTrade {
    executed_at: String,
    price: RawPrice,
}

/// Servers that serialize decimals send prices as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    fn to_f64(&self) -> Option<f64> {
        let value = match self {
            RawPrice::Number(n) => *n,
            RawPrice::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    fn describe(&self) -> String {
        match self {
            RawPrice::Number(n) => n.to_string(),
            RawPrice::Text(s) => format!("{s:?}"),
        }
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Timestamps with an offset keep it, seconds optional. Offset-less
/// date-times are read in `zone`; bare dates are UTC midnight.
pub fn parse_timestamp(s: &str, zone: NaiveZone) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return zone.resolve(naive);
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a serialized trade list.
///
/// An absent or blank payload is an empty list. Anything else must be a JSON
/// array whose elements all carry a valid `executed_at` and `price`; a single
/// bad element rejects the whole payload. Offset-less timestamps are read in
/// local time; see [`parse_trades_in`].
///
/// ```rust
/// use tpc_core::trade::parse_trades;
///
/// let trades = parse_trades(Some(r#"[{"executed_at":"2024-01-01T00:00:00Z","price":42000}]"#)).unwrap();
/// assert_eq!(trades.len(), 1);
/// assert_eq!(trades[0].price, 42000.0);
///
/// assert!(parse_trades(None).unwrap().is_empty());
/// assert!(parse_trades(Some("{not json")).is_err());
/// ```
pub fn parse_trades(raw: Option<&str>) -> Result<Vec<TradeRecord>> {
    parse_trades_in(raw, NaiveZone::Local)
}

/// [`parse_trades`] with offset-less timestamps read in `zone`.
pub fn parse_trades_in(raw: Option<&str>, zone: NaiveZone) -> Result<Vec<TradeRecord>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(Vec::new()),
        Some(raw) => raw,
    };

    let raw_trades: Vec<RawTrade> = serde_json::from_str(raw)?;

    raw_trades
        .iter()
        .enumerate()
        .map(|(index, raw)| -> Result<TradeRecord> {
            let executed_at = parse_timestamp(&raw.executed_at, zone).ok_or_else(|| {
                TradeDataError::InvalidTimestamp {
                    index,
                    value: raw.executed_at.clone(),
                }
            })?;
            let price = raw.price.to_f64().ok_or_else(|| TradeDataError::InvalidPrice {
                index,
                value: raw.price.describe(),
            })?;
            Ok(TradeRecord { executed_at, price })
        })
        .collect()
}

/// Map trades to chart points, 1:1 and in input order.
pub fn to_points(trades: &[TradeRecord]) -> Vec<ChartPoint> {
    trades.iter().map(ChartPoint::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_absent_and_blank_payloads_are_empty() {
        assert!(parse_trades(None).unwrap().is_empty());
        assert!(parse_trades(Some("")).unwrap().is_empty());
        assert!(parse_trades(Some("   \n")).unwrap().is_empty());
        assert!(parse_trades(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn test_single_trade_example() {
        let trades =
            parse_trades(Some(r#"[{"executed_at":"2024-01-01T00:00:00Z","price":42000}]"#)).unwrap();
        let points = to_points(&trades);
        assert_eq!(
            points,
            vec![ChartPoint {
                x: utc(2024, 1, 1, 0, 0, 0),
                y: 42000.0
            }]
        );
    }

    #[test]
    fn test_points_keep_input_order() {
        // Deliberately out of chronological order.
        let raw = r#"[
            {"executed_at":"2024-01-01T00:05:00Z","price":42010.5},
            {"executed_at":"2024-01-01T00:01:00Z","price":41990},
            {"executed_at":"2024-01-01T00:03:00Z","price":42001.25}
        ]"#;
        let points = to_points(&parse_trades(Some(raw)).unwrap());
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].x, utc(2024, 1, 1, 0, 5, 0));
        assert_eq!(points[0].y, 42010.5);
        assert_eq!(points[1].x, utc(2024, 1, 1, 0, 1, 0));
        assert_eq!(points[1].y, 41990.0);
        assert_eq!(points[2].x, utc(2024, 1, 1, 0, 3, 0));
        assert_eq!(points[2].y, 42001.25);
    }

    #[test]
    fn test_string_prices_and_extra_fields() {
        let raw = r#"[{"id":7,"side":"buy","quantity":"0.5","executed_at":"2024-03-10T12:30:00Z","price":"64123.45"}]"#;
        let trades = parse_trades(Some(raw)).unwrap();
        assert_eq!(trades[0].price, 64123.45);
        assert_eq!(trades[0].executed_at, utc(2024, 3, 10, 12, 30, 0));
    }

    #[test]
    fn test_timestamp_variants() {
        let zone = NaiveZone::Utc;
        assert_eq!(
            parse_timestamp("2024-01-01T02:00:00+02:00", zone),
            Some(utc(2024, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01T00:00:00", zone),
            Some(utc(2024, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01 13:45:10.250", zone),
            Some(utc(2024, 1, 1, 13, 45, 10) + TimeDelta::milliseconds(250))
        );
        assert_eq!(parse_timestamp("2024-01-01", zone), Some(utc(2024, 1, 1, 0, 0, 0)));
        assert_eq!(parse_timestamp("yesterday", zone), None);
    }

    #[test]
    fn test_timestamps_without_seconds_or_offset_colon() {
        let zone = NaiveZone::Utc;
        assert_eq!(
            parse_timestamp("2024-01-01T00:01Z", zone),
            Some(utc(2024, 1, 1, 0, 1, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01T00:00", zone),
            Some(utc(2024, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01T02:00:00+0200", zone),
            Some(utc(2024, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01T02:30+02:00", zone),
            Some(utc(2024, 1, 1, 0, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01 05:00-05", zone),
            Some(utc(2024, 1, 1, 10, 0, 0))
        );

        let raw = r#"[
            {"executed_at":"2024-01-01T00:00:00Z","price":1},
            {"executed_at":"2024-01-01T00:01Z","price":2}
        ]"#;
        let trades = parse_trades(Some(raw)).unwrap();
        assert_eq!(trades[1].executed_at, utc(2024, 1, 1, 0, 1, 0));
    }

    #[test]
    fn test_naive_zone_resolution() {
        let naive = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(
            parse_timestamp("2024-06-15T12:00:00", NaiveZone::Local),
            Some(local)
        );
        assert_eq!(
            parse_timestamp("2024-06-15T12:00:00", NaiveZone::Utc),
            Some(utc(2024, 6, 15, 12, 0, 0))
        );
        // explicit offsets and bare dates ignore the zone
        assert_eq!(
            parse_timestamp("2024-06-15T12:00:00Z", NaiveZone::Local),
            Some(utc(2024, 6, 15, 12, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-06-15", NaiveZone::Local),
            Some(utc(2024, 6, 15, 0, 0, 0))
        );

        let raw = r#"[{"executed_at":"2024-06-15T12:00:00","price":1}]"#;
        assert_eq!(parse_trades(Some(raw)).unwrap()[0].executed_at, local);
        assert_eq!(
            parse_trades_in(Some(raw), NaiveZone::Utc).unwrap()[0].executed_at,
            utc(2024, 6, 15, 12, 0, 0)
        );
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(matches!(
            parse_trades(Some("[{")),
            Err(TradeDataError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_trades(Some(r#"{"executed_at":"2024-01-01T00:00:00Z","price":1}"#)),
            Err(TradeDataError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_trades(Some(r#"[{"price":1}]"#)),
            Err(TradeDataError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_trades(Some(r#"[{"executed_at":"2024-01-01T00:00:00Z","price":null}]"#)),
            Err(TradeDataError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_bad_element_rejects_whole_payload() {
        let raw = r#"[
            {"executed_at":"2024-01-01T00:00:00Z","price":1},
            {"executed_at":"not a date","price":2}
        ]"#;
        match parse_trades(Some(raw)) {
            Err(TradeDataError::InvalidTimestamp { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, "not a date");
            }
            other => panic!("expected InvalidTimestamp, got {other:?}"),
        }

        let raw = r#"[{"executed_at":"2024-01-01T00:00:00Z","price":"abc"}]"#;
        assert!(matches!(
            parse_trades(Some(raw)),
            Err(TradeDataError::InvalidPrice { index: 0, .. })
        ));

        let raw = r#"[{"executed_at":"2024-01-01T00:00:00Z","price":"NaN"}]"#;
        assert!(matches!(
            parse_trades(Some(raw)),
            Err(TradeDataError::InvalidPrice { index: 0, .. })
        ));
    }

    #[test]
    fn test_point_serializes_epoch_millis() {
        let point = ChartPoint {
            x: utc(2024, 1, 1, 0, 0, 0),
            y: 42000.0,
        };
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(json, serde_json::json!({"x": 1704067200000i64, "y": 42000.0}));
    }
}
