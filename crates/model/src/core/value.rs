use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// A single cell copied from the source table.
///
/// The variants mirror what the MySQL binary protocol can hand back, so a
/// value read from the source can be bound again on the target without
/// going through a textual detour.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    Decimal(BigDecimal),
    String(String),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    /// MySQL `TIME`, which is a signed duration rather than a time of day.
    Time(TimeDelta),
    Null,
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Uint(v) => i64::try_from(*v).ok(),
            Value::String(v) => v.parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn size_bytes(&self) -> usize {
        match self {
            Value::Int(_) => std::mem::size_of::<i64>(),
            Value::Uint(_) => std::mem::size_of::<u64>(),
            Value::Float(_) => std::mem::size_of::<f64>(),
            Value::Decimal(v) => v.to_string().len(),
            Value::String(s) => s.len(),
            Value::Bytes(b) => b.len(),
            Value::Json(v) => serde_json::to_string(v).map_or(0, |s| s.len()),
            Value::Date(_) => std::mem::size_of::<NaiveDate>(),
            Value::Timestamp(_) => std::mem::size_of::<NaiveDateTime>(),
            Value::Time(_) => std::mem::size_of::<TimeDelta>(),
            Value::Null => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

impl FieldValue {
    pub fn new(name: &str, value: Value) -> Self {
        FieldValue {
            name: name.to_string(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_i64_rejects_overflowing_uint() {
        assert_eq!(Value::Uint(u64::MAX).as_i64(), None);
        assert_eq!(Value::Uint(42).as_i64(), Some(42));
    }
}
