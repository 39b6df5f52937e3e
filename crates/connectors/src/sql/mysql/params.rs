use chrono::{Datelike, TimeDelta, Timelike};
use model::core::value::Value;
use mysql_async::{Params, Value as MySqlValue};

pub struct MySqlParam(MySqlValue);

impl MySqlParam {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Int(i) => MySqlParam(MySqlValue::Int(*i)),
            Value::Uint(u) => MySqlParam(MySqlValue::UInt(*u)),
            Value::Float(f) => MySqlParam(MySqlValue::Double(*f)),
            Value::Decimal(d) => MySqlParam(MySqlValue::Bytes(d.to_string().into_bytes())),
            Value::String(s) => MySqlParam(MySqlValue::Bytes(s.clone().into_bytes())),
            Value::Bytes(b) => MySqlParam(MySqlValue::Bytes(b.clone())),
            Value::Json(j) => MySqlParam(MySqlValue::Bytes(j.to_string().into_bytes())),
            Value::Date(d) => MySqlParam(MySqlValue::Date(
                d.year() as u16,
                d.month() as u8,
                d.day() as u8,
                0,
                0,
                0,
                0,
            )),
            Value::Timestamp(ts) => MySqlParam(MySqlValue::Date(
                ts.year() as u16,
                ts.month() as u8,
                ts.day() as u8,
                ts.hour() as u8,
                ts.minute() as u8,
                ts.second() as u8,
                ts.nanosecond() / 1_000,
            )),
            Value::Time(t) => MySqlParam(time_value(*t)),
            Value::Null => MySqlParam(MySqlValue::NULL),
        }
    }

    pub fn into_inner(self) -> MySqlValue {
        self.0
    }
}

fn time_value(delta: TimeDelta) -> MySqlValue {
    let negative = delta < TimeDelta::zero();
    let abs = delta.abs();
    let secs = abs.num_seconds();
    let micros = abs.subsec_nanos() as u32 / 1_000;

    MySqlValue::Time(
        negative,
        (secs / 86_400) as u32,
        ((secs / 3_600) % 24) as u8,
        ((secs / 60) % 60) as u8,
        (secs % 60) as u8,
        micros,
    )
}

pub struct MySqlParamStore {
    pub params: Vec<MySqlParam>,
}

impl MySqlParamStore {
    pub fn from_values(values: &[Value]) -> Self {
        let params = values.iter().map(MySqlParam::from_value).collect();
        MySqlParamStore { params }
    }

    pub fn params(self) -> Params {
        if self.params.is_empty() {
            return Params::Empty;
        }
        Params::Positional(self.params.into_iter().map(MySqlParam::into_inner).collect())
    }
}
