use crate::{Operation, Param, SqlRequest, Value};
use std::borrow::Cow;

/// State threaded through the dialect while compiling one statement.
#[derive(Debug, Clone)]
pub struct Context {
    pub operation: Operation,
    params: Vec<Param>,
}

impl Context {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            params: Vec::new(),
        }
    }
    /// Records a parameter and returns its one-based position.
    pub fn push_param(&mut self, value: Value, sql_type: impl Into<Cow<'static, str>>) -> usize {
        self.params.push(Param::new(value, sql_type));
        self.params.len()
    }
    pub fn params(&self) -> &[Param] {
        &self.params
    }
    pub fn into_request(self, sql: String) -> SqlRequest {
        SqlRequest::new(sql, self.params)
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new(Operation::Query)
    }
}
