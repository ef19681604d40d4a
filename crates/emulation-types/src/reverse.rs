//! Reverse conversion: MySQL values → RowValue
//!
//! Values arrive either natively typed (binary protocol, prepared statements)
//! or as text (text protocol). Both are interpreted through the column type
//! the server reports, so a row converts the same way regardless of how it
//! was queried.

use crate::{ConversionError, Row, RowValue};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use mysql_async::consts::{ColumnFlags, ColumnType};
use mysql_async::Value;

/// Character set id MySQL reports for binary strings and blobs.
pub const BINARY_CHARSET: u16 = 63;

/// MySQL value with the column metadata needed to interpret it.
#[derive(Debug, Clone)]
pub struct MySQLColumnValue {
    /// The raw MySQL value.
    pub value: Value,
    /// The MySQL column type.
    pub column_type: ColumnType,
    /// Column flags (e.g., UNSIGNED, ENUM).
    pub column_flags: ColumnFlags,
    /// Character set id of the column.
    pub character_set: u16,
}

impl MySQLColumnValue {
    pub fn new(value: Value, column_type: ColumnType, column_flags: ColumnFlags) -> Self {
        Self {
            value,
            column_type,
            column_flags,
            character_set: 0,
        }
    }

    /// Set the column character set.
    pub fn with_charset(mut self, character_set: u16) -> Self {
        self.character_set = character_set;
        self
    }

    fn is_binary(&self) -> bool {
        self.character_set == BINARY_CHARSET
    }

    fn is_unsigned(&self) -> bool {
        self.column_flags.contains(ColumnFlags::UNSIGNED_FLAG)
    }
}

impl TryFrom<MySQLColumnValue> for RowValue {
    type Error = ConversionError;

    fn try_from(mv: MySQLColumnValue) -> Result<Self, Self::Error> {
        use ColumnType::*;

        if matches!(mv.value, Value::NULL) {
            return Ok(RowValue::Null);
        }

        match mv.column_type {
            MYSQL_TYPE_TINY | MYSQL_TYPE_SHORT | MYSQL_TYPE_INT24 | MYSQL_TYPE_LONG
            | MYSQL_TYPE_LONGLONG | MYSQL_TYPE_YEAR => extract_integer(&mv.value, mv.is_unsigned()),

            MYSQL_TYPE_FLOAT | MYSQL_TYPE_DOUBLE => Ok(RowValue::Float(extract_float(&mv.value)?)),

            MYSQL_TYPE_DECIMAL | MYSQL_TYPE_NEWDECIMAL => {
                Ok(RowValue::Decimal(extract_string(&mv.value)?))
            }

            MYSQL_TYPE_STRING | MYSQL_TYPE_VAR_STRING | MYSQL_TYPE_VARCHAR | MYSQL_TYPE_TINY_BLOB
            | MYSQL_TYPE_MEDIUM_BLOB | MYSQL_TYPE_BLOB | MYSQL_TYPE_LONG_BLOB => {
                if mv.is_binary() {
                    Ok(RowValue::Bytes(extract_bytes(&mv.value)?))
                } else {
                    Ok(RowValue::Text(extract_string(&mv.value)?))
                }
            }

            MYSQL_TYPE_ENUM | MYSQL_TYPE_SET => Ok(RowValue::Text(extract_string(&mv.value)?)),

            MYSQL_TYPE_DATE | MYSQL_TYPE_NEWDATE => {
                Ok(extract_date(&mv.value)?.map_or(RowValue::Null, RowValue::Date))
            }

            MYSQL_TYPE_DATETIME | MYSQL_TYPE_DATETIME2 | MYSQL_TYPE_TIMESTAMP
            | MYSQL_TYPE_TIMESTAMP2 => {
                Ok(extract_datetime(&mv.value)?.map_or(RowValue::Null, RowValue::DateTime))
            }

            MYSQL_TYPE_TIME | MYSQL_TYPE_TIME2 => Ok(RowValue::Time(extract_time(&mv.value)?)),

            MYSQL_TYPE_JSON => {
                let s = extract_string(&mv.value)?;
                match serde_json::from_str::<serde_json::Value>(&s) {
                    Ok(json) => Ok(RowValue::Json(json)),
                    Err(_) => Ok(RowValue::Text(s)),
                }
            }

            MYSQL_TYPE_BIT | MYSQL_TYPE_GEOMETRY => Ok(RowValue::Bytes(extract_bytes(&mv.value)?)),

            other => Err(ConversionError::UnsupportedType {
                column: String::new(),
                column_type: other,
            }),
        }
    }
}

/// Convert a whole MySQL row, keeping the server's column order.
impl TryFrom<mysql_async::Row> for Row {
    type Error = ConversionError;

    fn try_from(row: mysql_async::Row) -> Result<Self, Self::Error> {
        let columns = row.columns();
        let values = row.unwrap();

        let mut out = Row::new();
        for (column, value) in columns.iter().zip(values) {
            let name = column.name_str().into_owned();
            let mv = MySQLColumnValue::new(value, column.column_type(), column.flags())
                .with_charset(column.character_set());

            let converted = RowValue::try_from(mv).map_err(|e| match e {
                ConversionError::UnsupportedType { column_type, .. } => {
                    ConversionError::UnsupportedType {
                        column: name.clone(),
                        column_type,
                    }
                }
                other => ConversionError::Column {
                    column: name.clone(),
                    source: Box::new(other),
                },
            })?;
            out.insert(name, converted);
        }
        Ok(out)
    }
}

fn mismatch(expected: &str, value: &Value) -> ConversionError {
    ConversionError::TypeMismatch {
        expected: expected.to_string(),
        actual: value.clone(),
    }
}

/// Integers land in `Int` unless they only fit an unsigned 64-bit value.
fn extract_integer(value: &Value, unsigned: bool) -> Result<RowValue, ConversionError> {
    let from_u64 = |u: u64| match i64::try_from(u) {
        Ok(i) => RowValue::Int(i),
        Err(_) => RowValue::UInt(u),
    };
    match value {
        Value::Int(i) => Ok(RowValue::Int(*i)),
        Value::UInt(u) => Ok(from_u64(*u)),
        Value::Bytes(b) => {
            let s = String::from_utf8(b.clone())?;
            if unsigned {
                s.parse::<u64>()
                    .map(from_u64)
                    .map_err(|_| mismatch("unsigned integer", value))
            } else {
                s.parse::<i64>()
                    .map(RowValue::Int)
                    .map_err(|_| mismatch("integer", value))
            }
        }
        _ => Err(mismatch("integer", value)),
    }
}

fn extract_float(value: &Value) -> Result<f64, ConversionError> {
    match value {
        // Through the shortest decimal form, so FLOAT 1.1 stays 1.1 rather than 1.100000023841858.
        Value::Float(f) => f.to_string().parse().map_err(|_| mismatch("float", value)),
        Value::Double(d) => Ok(*d),
        Value::Int(i) => Ok(*i as f64),
        Value::UInt(u) => Ok(*u as f64),
        Value::Bytes(b) => {
            let s = String::from_utf8(b.clone())?;
            s.parse().map_err(|_| mismatch("float", value))
        }
        _ => Err(mismatch("float", value)),
    }
}

fn extract_string(value: &Value) -> Result<String, ConversionError> {
    match value {
        Value::Bytes(b) => Ok(String::from_utf8(b.clone())?),
        Value::Int(i) => Ok(i.to_string()),
        Value::UInt(u) => Ok(u.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Double(d) => Ok(d.to_string()),
        _ => Err(mismatch("string", value)),
    }
}

fn extract_bytes(value: &Value) -> Result<Vec<u8>, ConversionError> {
    match value {
        Value::Bytes(b) => Ok(b.clone()),
        _ => Err(mismatch("bytes", value)),
    }
}

/// `None` for MySQL's zero date.
fn extract_date(value: &Value) -> Result<Option<NaiveDate>, ConversionError> {
    match value {
        Value::Date(0, 0, 0, _, _, _, _) => Ok(None),
        Value::Date(year, month, day, _, _, _, _) => {
            NaiveDate::from_ymd_opt(*year as i32, *month as u32, *day as u32)
                .map(Some)
                .ok_or_else(|| ConversionError::InvalidDateTime(format!("{value:?}")))
        }
        Value::Bytes(b) => {
            let s = String::from_utf8(b.clone())?;
            if s.starts_with("0000-00-00") {
                return Ok(None);
            }
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| ConversionError::InvalidDateTime(s))
        }
        _ => Err(mismatch("date", value)),
    }
}

/// `None` for MySQL's zero datetime.
fn extract_datetime(value: &Value) -> Result<Option<NaiveDateTime>, ConversionError> {
    match value {
        Value::Date(0, 0, 0, _, _, _, _) => Ok(None),
        Value::Date(year, month, day, hour, min, sec, micro) => {
            let invalid = || ConversionError::InvalidDateTime(format!("{value:?}"));
            let date = NaiveDate::from_ymd_opt(*year as i32, *month as u32, *day as u32)
                .ok_or_else(invalid)?;
            let time =
                NaiveTime::from_hms_micro_opt(*hour as u32, *min as u32, *sec as u32, *micro)
                    .ok_or_else(invalid)?;
            Ok(Some(NaiveDateTime::new(date, time)))
        }
        Value::Bytes(b) => {
            let s = String::from_utf8(b.clone())?;
            if s.starts_with("0000-00-00") {
                return Ok(None);
            }
            NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S"))
                .map(Some)
                .map_err(|_| ConversionError::InvalidDateTime(s))
        }
        _ => Err(mismatch("datetime", value)),
    }
}

fn extract_time(value: &Value) -> Result<TimeDelta, ConversionError> {
    match value {
        Value::Time(negative, days, hours, minutes, seconds, micros) => {
            let delta = TimeDelta::days(*days as i64)
                + TimeDelta::hours(*hours as i64)
                + TimeDelta::minutes(*minutes as i64)
                + TimeDelta::seconds(*seconds as i64)
                + TimeDelta::microseconds(*micros as i64);
            Ok(if *negative { -delta } else { delta })
        }
        Value::Bytes(b) => {
            let s = String::from_utf8(b.clone())?;
            parse_time_text(&s).ok_or(ConversionError::InvalidDateTime(s))
        }
        _ => Err(mismatch("time", value)),
    }
}

/// Parse MySQL's textual TIME form `[-]H+:MM:SS[.f+]`.
fn parse_time_text(s: &str) -> Option<TimeDelta> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (hms, fraction) = match rest.split_once('.') {
        Some((hms, fraction)) => (hms, Some(fraction)),
        None => (rest, None),
    };

    let mut parts = hms.split(':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let seconds: i64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || minutes > 59 || seconds > 59 {
        return None;
    }

    let micros = match fraction {
        Some(f) if !f.is_empty() && f.len() <= 6 && f.chars().all(|c| c.is_ascii_digit()) => {
            format!("{f:0<6}").parse::<i64>().ok()?
        }
        Some(_) => return None,
        None => 0,
    };

    let delta = TimeDelta::hours(hours)
        + TimeDelta::minutes(minutes)
        + TimeDelta::seconds(seconds)
        + TimeDelta::microseconds(micros);
    Some(if negative { -delta } else { delta })
}
