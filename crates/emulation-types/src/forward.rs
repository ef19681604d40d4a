//! Forward conversion: RowValue → JSON value.
//!
//! Date and time values become ISO-8601 strings. Values without a defined
//! JSON encoding (raw binary, non-finite floats) are rejected with
//! [`SerializeError::NotSerializable`] instead of being written in some
//! lossy form.

use crate::value::{format_date, format_datetime, format_time};
use crate::{Row, RowValue, SerializeError};
use serde_json::{json, Map, Value};

/// Convert one column value. `column` is only used for error reporting.
pub fn value_to_json(column: &str, value: &RowValue) -> Result<Value, SerializeError> {
    let not_serializable = || SerializeError::NotSerializable {
        column: column.to_string(),
        kind: value.kind(),
    };

    Ok(match value {
        RowValue::Null => Value::Null,
        RowValue::Int(i) => json!(i),
        RowValue::UInt(u) => json!(u),
        RowValue::Float(f) => {
            serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(not_serializable)?
        }
        // Decimal - keep exact digits as a string
        RowValue::Decimal(d) => json!(d),
        RowValue::Text(s) => json!(s),
        RowValue::Date(d) => json!(format_date(d)),
        RowValue::DateTime(dt) => json!(format_datetime(dt)),
        RowValue::Time(t) => json!(format_time(t)),
        RowValue::Json(j) => j.clone(),
        RowValue::Bytes(_) => return Err(not_serializable()),
    })
}

/// Convert a row into a JSON object with the row's column order.
pub fn row_to_json(row: &Row) -> Result<Value, SerializeError> {
    let mut map = Map::with_capacity(row.len());
    for (name, value) in row.iter() {
        map.insert(name.to_string(), value_to_json(name, value)?);
    }
    Ok(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 12, 22)
            .unwrap()
            .and_hms_opt(19, 41, 21)
            .unwrap()
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(value_to_json("a", &RowValue::Null).unwrap(), Value::Null);
        assert_eq!(value_to_json("a", &RowValue::Int(-3)).unwrap(), json!(-3));
        assert_eq!(
            value_to_json("a", &RowValue::Decimal("10.50".into())).unwrap(),
            json!("10.50")
        );
        assert_eq!(
            value_to_json("a", &RowValue::Text("Kiribati".into())).unwrap(),
            json!("Kiribati")
        );
    }

    #[test]
    fn test_datetime_is_iso8601() {
        let v = value_to_json("timestamp", &RowValue::DateTime(timestamp())).unwrap();
        assert_eq!(v, json!("2019-12-22T19:41:21"));

        let d = NaiveDate::from_ymd_opt(2016, 2, 29).unwrap();
        assert_eq!(
            value_to_json("date_joined", &RowValue::Date(d)).unwrap(),
            json!("2016-02-29")
        );
    }

    #[test]
    fn test_datetime_round_trip_through_json_text() {
        let row = Row::new()
            .with("ind", RowValue::Int(2863))
            .with("timestamp", RowValue::DateTime(timestamp()));

        let text = serde_json::to_string(&row_to_json(&row).unwrap()).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        let iso = parsed["timestamp"].as_str().unwrap();

        assert_eq!(iso, "2019-12-22T19:41:21");
        assert_eq!(
            NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S").unwrap(),
            timestamp()
        );

        // Serializing the parsed document again yields the same text.
        assert_eq!(serde_json::to_string(&parsed).unwrap(), text);
    }

    #[test]
    fn test_bytes_not_serializable() {
        let row = Row::new()
            .with("ind", RowValue::Int(1))
            .with("thumbnail", RowValue::Bytes(vec![0x89, 0x50, 0x4e, 0x47]));

        assert_eq!(
            row_to_json(&row),
            Err(SerializeError::NotSerializable {
                column: "thumbnail".into(),
                kind: "bytes",
            })
        );
    }

    #[test]
    fn test_nan_not_serializable() {
        assert!(value_to_json("latitude", &RowValue::Float(f64::NAN)).is_err());
    }

    #[test]
    fn test_column_order_preserved() {
        let row = Row::new()
            .with("z", RowValue::Int(1))
            .with("a", RowValue::Int(2));
        let text = serde_json::to_string(&row_to_json(&row).unwrap()).unwrap();
        assert_eq!(text, r#"{"z":1,"a":2}"#);
    }
}
