use rusqlite::types::{Value as SqliteValue, ValueRef};
use slate_core::{DATE_FORMAT, Error, Result, TIME_FORMAT, TIMESTAMP_FORMAT, Value};
use time::format_description::well_known::Rfc3339;

/// Storage form of a parameter. Decimals, temporal values and UUIDs are stored as text.
pub(crate) fn to_sqlite(value: &Value) -> Result<SqliteValue> {
    if value.is_null() {
        return Ok(SqliteValue::Null);
    }
    Ok(match value {
        Value::Boolean(Some(v)) => SqliteValue::Integer(i64::from(*v)),
        Value::Int8(Some(v)) => SqliteValue::Integer(i64::from(*v)),
        Value::Int16(Some(v)) => SqliteValue::Integer(i64::from(*v)),
        Value::Int32(Some(v)) => SqliteValue::Integer(i64::from(*v)),
        Value::Int64(Some(v)) => SqliteValue::Integer(*v),
        Value::UInt8(Some(v)) => SqliteValue::Integer(i64::from(*v)),
        Value::UInt16(Some(v)) => SqliteValue::Integer(i64::from(*v)),
        Value::UInt32(Some(v)) => SqliteValue::Integer(i64::from(*v)),
        Value::UInt64(Some(v)) => SqliteValue::Integer(i64::try_from(*v).map_err(|_| {
            Error::msg(format!("{} does not fit in a sqlite INTEGER", v))
        })?),
        Value::Float32(Some(v)) => SqliteValue::Real(f64::from(*v)),
        Value::Float64(Some(v)) => SqliteValue::Real(*v),
        Value::Decimal(Some(v), ..) => SqliteValue::Text(v.to_string()),
        Value::Varchar(Some(v)) => SqliteValue::Text(v.clone()),
        Value::Blob(Some(v)) => SqliteValue::Blob(v.to_vec()),
        Value::Date(Some(v)) => SqliteValue::Text(v.format(DATE_FORMAT)?),
        Value::Time(Some(v)) => SqliteValue::Text(v.format(TIME_FORMAT)?),
        Value::Timestamp(Some(v)) => SqliteValue::Text(v.format(TIMESTAMP_FORMAT)?),
        Value::TimestampWithTimezone(Some(v)) => SqliteValue::Text(v.format(&Rfc3339)?),
        Value::Uuid(Some(v)) => SqliteValue::Text(v.hyphenated().to_string()),
        _ => {
            return Err(Error::msg(format!(
                "Cannot bind {:?} as a sqlite parameter",
                value
            )));
        }
    })
}

/// Storage class of the cell as a value, the mapping layer coerces it to the property type.
pub(crate) fn extract_value(value: ValueRef<'_>) -> Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Int64(Some(v)),
        ValueRef::Real(v) => Value::Float64(Some(v)),
        ValueRef::Text(v) => Value::Varchar(Some(std::str::from_utf8(v)?.to_string())),
        ValueRef::Blob(v) => Value::Blob(Some(v.into())),
    })
}
