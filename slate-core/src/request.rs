use crate::{Value, truncate_long};
use std::{
    borrow::Cow,
    fmt::{self, Display},
};

/// Positional parameter of a [`SqlRequest`]: the value and the database type of its column.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub value: Value,
    pub sql_type: Cow<'static, str>,
}

impl Param {
    pub fn new(value: Value, sql_type: impl Into<Cow<'static, str>>) -> Self {
        Self {
            value,
            sql_type: sql_type.into(),
        }
    }
}

/// Compiled statement: SQL text with positional placeholders and the ordered parameters
/// binding them. Parameter order is the binding contract, values never appear in the text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlRequest {
    sql: String,
    params: Vec<Param>,
}

impl SqlRequest {
    pub fn new(sql: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
    pub fn sql(&self) -> &str {
        &self.sql
    }
    pub fn params(&self) -> &[Param] {
        &self.params
    }
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.params.iter().map(|v| &v.value)
    }
    pub fn into_parts(self) -> (String, Vec<Param>) {
        (self.sql, self.params)
    }
}

impl From<&str> for SqlRequest {
    fn from(value: &str) -> Self {
        SqlRequest::new(value, Vec::new())
    }
}

impl From<String> for SqlRequest {
    fn from(value: String) -> Self {
        SqlRequest::new(value, Vec::new())
    }
}

impl Display for SqlRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))?;
        if !self.params.is_empty() {
            f.write_str("\n-- params: [")?;
            for (i, param) in self.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{:?}", param.value)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}
