//! Column readers tolerant of the loose typing the ingestion job produces:
//! numbers sometimes land as TEXT, identifiers sometimes as INTEGER.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};

pub(crate) struct LooseText(pub String);
pub(crate) struct LooseInt(pub i64);
pub(crate) struct LooseReal(pub f64);

fn utf8(bytes: &[u8]) -> FromSqlResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| FromSqlError::Other(Box::new(e)))
}

impl FromSql for LooseText {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Text(t) => Ok(LooseText(utf8(t)?.to_string())),
            ValueRef::Integer(i) => Ok(LooseText(i.to_string())),
            ValueRef::Real(f) => Ok(LooseText(f.to_string())),
            ValueRef::Null | ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
        }
    }
}

impl FromSql for LooseInt {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(i) => Ok(LooseInt(i)),
            ValueRef::Real(f) if f.fract() == 0.0 => Ok(LooseInt(f as i64)),
            ValueRef::Text(t) => {
                let s = utf8(t)?.trim();
                if let Ok(i) = s.parse::<i64>() {
                    return Ok(LooseInt(i));
                }
                match s.parse::<f64>() {
                    Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(LooseInt(f as i64)),
                    _ => Err(FromSqlError::InvalidType),
                }
            }
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

impl FromSql for LooseReal {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Real(f) => Ok(LooseReal(f)),
            ValueRef::Integer(i) => Ok(LooseReal(i as f64)),
            ValueRef::Text(t) => utf8(t)?
                .trim()
                .parse::<f64>()
                .map(LooseReal)
                .map_err(|e| FromSqlError::Other(Box::new(e))),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

pub(crate) fn text(v: Option<LooseText>) -> Option<String> {
    v.map(|t| t.0)
}

pub(crate) fn int(v: Option<LooseInt>) -> Option<i64> {
    v.map(|i| i.0)
}

pub(crate) fn real(v: Option<LooseReal>) -> Option<f64> {
    v.map(|r| r.0)
}
