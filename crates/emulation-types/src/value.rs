use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use std::fmt;

/// A single column value of a sampled row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    /// SQL NULL
    Null,

    /// Signed integer (TINYINT..BIGINT, YEAR)
    Int(i64),

    /// Unsigned integer that does not fit into `i64`
    UInt(u64),

    /// FLOAT / DOUBLE
    Float(f64),

    /// DECIMAL kept as its exact textual digits
    Decimal(String),

    /// Character data (CHAR, VARCHAR, TEXT, ENUM, SET)
    Text(String),

    /// Binary data (BINARY, VARBINARY, BLOB, BIT, GEOMETRY)
    Bytes(Vec<u8>),

    /// DATE
    Date(NaiveDate),

    /// DATETIME / TIMESTAMP, without timezone
    DateTime(NaiveDateTime),

    /// TIME, which MySQL treats as a signed interval up to 838 hours
    Time(TimeDelta),

    /// JSON column
    Json(serde_json::Value),
}

impl RowValue {
    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RowValue::Null => "null",
            RowValue::Int(_) => "int",
            RowValue::UInt(_) => "uint",
            RowValue::Float(_) => "float",
            RowValue::Decimal(_) => "decimal",
            RowValue::Text(_) => "text",
            RowValue::Bytes(_) => "bytes",
            RowValue::Date(_) => "date",
            RowValue::DateTime(_) => "datetime",
            RowValue::Time(_) => "time",
            RowValue::Json(_) => "json",
        }
    }
}

/// ISO-8601 date.
pub(crate) fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// ISO-8601 datetime; fractional seconds only appear when non-zero.
pub(crate) fn format_datetime(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// `[-]HH:MM:SS[.ffffff]`, hours may exceed 23.
pub(crate) fn format_time(delta: &TimeDelta) -> String {
    let sign = if *delta < TimeDelta::zero() { "-" } else { "" };
    let abs = delta.abs();
    let secs = abs.num_seconds();
    let micros = abs.subsec_nanos() / 1_000;
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if micros == 0 {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
    }
}

impl fmt::Display for RowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowValue::Null => write!(f, "NULL"),
            RowValue::Int(i) => write!(f, "{i}"),
            RowValue::UInt(u) => write!(f, "{u}"),
            RowValue::Float(v) => write!(f, "{v}"),
            RowValue::Decimal(d) => write!(f, "{d}"),
            RowValue::Text(s) => write!(f, "{s:?}"),
            RowValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            RowValue::Date(d) => write!(f, "{}", format_date(d)),
            RowValue::DateTime(dt) => write!(f, "{}", format_datetime(dt)),
            RowValue::Time(t) => write!(f, "{}", format_time(t)),
            RowValue::Json(j) => write!(f, "{j}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_without_fraction() {
        let dt = NaiveDate::from_ymd_opt(2020, 8, 28)
            .unwrap()
            .and_hms_opt(3, 52, 47)
            .unwrap();
        assert_eq!(format_datetime(&dt), "2020-08-28T03:52:47");
    }

    #[test]
    fn test_datetime_with_micros() {
        let dt = NaiveDate::from_ymd_opt(2020, 8, 28)
            .unwrap()
            .and_hms_micro_opt(3, 52, 47, 1_500)
            .unwrap();
        assert_eq!(format_datetime(&dt), "2020-08-28T03:52:47.001500");
    }

    #[test]
    fn test_negative_long_time() {
        let t = -(TimeDelta::hours(100) + TimeDelta::minutes(5) + TimeDelta::seconds(7));
        assert_eq!(format_time(&t), "-100:05:07");
    }

    #[test]
    fn test_display_text_is_quoted() {
        assert_eq!(RowValue::Text("a b".into()).to_string(), "\"a b\"");
        assert_eq!(RowValue::Bytes(vec![1, 2, 3]).to_string(), "<3 bytes>");
    }
}
