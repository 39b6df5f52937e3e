use bigdecimal::BigDecimal;
use chrono::{NaiveDate, TimeDelta};
use model::{
    core::value::{FieldValue, Value},
    records::row::RowData,
};
use mysql_async::{Column, Row, Value as MySqlValue, consts::ColumnType};
use std::str::FromStr;
use tracing::warn;

/// Character set id MySQL reports for `BINARY`, `VARBINARY` and `BLOB` columns.
const BINARY_CHARSET: u16 = 63;

/// How the raw wire value of a column should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Decimal,
    Json,
    Date,
    DateTime,
    Time,
    Binary,
    Text,
}

impl ColumnKind {
    pub fn of(column: &Column) -> Self {
        use ColumnType::*;

        match column.column_type() {
            MYSQL_TYPE_DECIMAL | MYSQL_TYPE_NEWDECIMAL => ColumnKind::Decimal,
            MYSQL_TYPE_JSON => ColumnKind::Json,
            MYSQL_TYPE_DATE | MYSQL_TYPE_NEWDATE => ColumnKind::Date,
            MYSQL_TYPE_DATETIME
            | MYSQL_TYPE_DATETIME2
            | MYSQL_TYPE_TIMESTAMP
            | MYSQL_TYPE_TIMESTAMP2 => ColumnKind::DateTime,
            MYSQL_TYPE_TIME | MYSQL_TYPE_TIME2 => ColumnKind::Time,
            MYSQL_TYPE_BIT | MYSQL_TYPE_GEOMETRY => ColumnKind::Binary,
            _ if column.character_set() == BINARY_CHARSET => ColumnKind::Binary,
            _ => ColumnKind::Text,
        }
    }
}

/// Column names of a result row, in select order.
pub fn column_names(row: &Row) -> Vec<String> {
    row.columns_ref()
        .iter()
        .map(|col| col.name_str().into_owned())
        .collect()
}

pub fn to_row_data(table: &str, row: &Row) -> RowData {
    let fields = row
        .columns_ref()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let value = match row.as_ref(idx) {
                Some(raw) => decode_value(raw, ColumnKind::of(column)),
                None => {
                    warn!("Column {} was already taken from the row", column.name_str());
                    Value::Null
                }
            };
            FieldValue {
                name: column.name_str().into_owned(),
                value,
            }
        })
        .collect();

    RowData::new(table, fields)
}

/// Converts one wire value into the model. Values the model cannot hold
/// exactly (zero dates, malformed decimals) fall back to their text form so
/// they can be written back unchanged.
pub fn decode_value(raw: &MySqlValue, kind: ColumnKind) -> Value {
    match raw {
        MySqlValue::NULL => Value::Null,
        MySqlValue::Int(i) => Value::Int(*i),
        MySqlValue::UInt(u) => Value::Uint(*u),
        MySqlValue::Float(f) => Value::Float(*f as f64),
        MySqlValue::Double(d) => Value::Float(*d),
        MySqlValue::Bytes(bytes) => decode_bytes(bytes, kind),
        MySqlValue::Date(year, month, day, hour, minute, second, micros) => {
            let date = NaiveDate::from_ymd_opt(*year as i32, *month as u32, *day as u32);
            if kind == ColumnKind::Date {
                return date
                    .map(Value::Date)
                    .unwrap_or_else(|| Value::String(format!("{year:04}-{month:02}-{day:02}")));
            }
            date.and_then(|d| {
                d.and_hms_micro_opt(*hour as u32, *minute as u32, *second as u32, *micros)
            })
            .map(Value::Timestamp)
            .unwrap_or_else(|| {
                Value::String(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                ))
            })
        }
        MySqlValue::Time(negative, days, hours, minutes, seconds, micros) => {
            let delta = TimeDelta::days(*days as i64)
                + TimeDelta::hours(*hours as i64)
                + TimeDelta::minutes(*minutes as i64)
                + TimeDelta::seconds(*seconds as i64)
                + TimeDelta::microseconds(*micros as i64);
            Value::Time(if *negative { -delta } else { delta })
        }
    }
}

fn decode_bytes(bytes: &[u8], kind: ColumnKind) -> Value {
    if kind == ColumnKind::Binary {
        return Value::Bytes(bytes.to_vec());
    }

    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => return Value::Bytes(bytes.to_vec()),
    };

    match kind {
        ColumnKind::Decimal => BigDecimal::from_str(text)
            .map(Value::Decimal)
            .unwrap_or_else(|_| Value::String(text.to_string())),
        ColumnKind::Json => serde_json::from_str(text)
            .map(Value::Json)
            .unwrap_or_else(|_| Value::String(text.to_string())),
        _ => Value::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_bytes_become_decimal() {
        let value = decode_value(&MySqlValue::Bytes(b"1050.25".to_vec()), ColumnKind::Decimal);
        assert_eq!(
            value,
            Value::Decimal(BigDecimal::from_str("1050.25").unwrap())
        );
    }

    #[test]
    fn test_json_bytes_become_json() {
        let value = decode_value(
            &MySqlValue::Bytes(br#"{"status":3}"#.to_vec()),
            ColumnKind::Json,
        );
        assert_eq!(value, Value::Json(serde_json::json!({"status": 3})));
    }

    #[test]
    fn test_text_and_binary_bytes() {
        assert_eq!(
            decode_value(&MySqlValue::Bytes(b"Jakarta".to_vec()), ColumnKind::Text),
            Value::String("Jakarta".to_string())
        );
        assert_eq!(
            decode_value(&MySqlValue::Bytes(vec![0xde, 0xad]), ColumnKind::Binary),
            Value::Bytes(vec![0xde, 0xad])
        );
        assert_eq!(
            decode_value(&MySqlValue::Bytes(vec![0xff, 0xfe]), ColumnKind::Text),
            Value::Bytes(vec![0xff, 0xfe])
        );
    }

    #[test]
    fn test_date_and_datetime() {
        let date = decode_value(&MySqlValue::Date(2023, 8, 17, 0, 0, 0, 0), ColumnKind::Date);
        assert_eq!(date, Value::Date(NaiveDate::from_ymd_opt(2023, 8, 17).unwrap()));

        let ts = decode_value(
            &MySqlValue::Date(2023, 8, 17, 9, 30, 0, 500),
            ColumnKind::DateTime,
        );
        let expected = NaiveDate::from_ymd_opt(2023, 8, 17)
            .and_then(|d| d.and_hms_micro_opt(9, 30, 0, 500))
            .unwrap();
        assert_eq!(ts, Value::Timestamp(expected));
    }

    #[test]
    fn test_zero_dates_fall_back_to_text() {
        assert_eq!(
            decode_value(&MySqlValue::Date(0, 0, 0, 0, 0, 0, 0), ColumnKind::Date),
            Value::String("0000-00-00".to_string())
        );
        assert_eq!(
            decode_value(&MySqlValue::Date(0, 0, 0, 0, 0, 0, 0), ColumnKind::DateTime),
            Value::String("0000-00-00 00:00:00".to_string())
        );
    }

    #[test]
    fn test_negative_time() {
        let value = decode_value(
            &MySqlValue::Time(true, 1, 2, 3, 4, 0),
            ColumnKind::Time,
        );
        let expected = TimeDelta::hours(26) + TimeDelta::minutes(3) + TimeDelta::seconds(4);
        assert_eq!(value, Value::Time(-expected));
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(decode_value(&MySqlValue::Int(-7), ColumnKind::Text), Value::Int(-7));
        assert_eq!(
            decode_value(&MySqlValue::UInt(u64::MAX), ColumnKind::Text),
            Value::Uint(u64::MAX)
        );
        assert_eq!(
            decode_value(&MySqlValue::Float(1.5), ColumnKind::Text),
            Value::Float(1.5)
        );
    }
}
