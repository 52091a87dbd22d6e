#![allow(dead_code)]

use slate::{
    BlockingExecutor, Error, QueryResult, Result, RowLabeled, RowsAffected, SqlRequest, Value,
};
use std::{collections::VecDeque, sync::Arc};

/// Executor keeping the requests it receives and answering them from a script. Once the
/// script is exhausted every request gets an empty result.
#[derive(Debug, Default)]
pub struct Recorder {
    pub requests: Vec<SqlRequest>,
    pub script: VecDeque<Result<Vec<QueryResult>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn reply(mut self, results: Vec<QueryResult>) -> Self {
        self.script.push_back(Ok(results));
        self
    }
    pub fn fail(mut self, message: &'static str) -> Self {
        self.script.push_back(Err(Error::msg(message)));
        self
    }
    pub fn sql(&self) -> Vec<&str> {
        self.requests.iter().map(|v| v.sql()).collect()
    }
}

impl BlockingExecutor for Recorder {
    fn run_blocking(&mut self, request: SqlRequest) -> Result<Vec<QueryResult>> {
        self.requests.push(request);
        self.script.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn row(labels: &[&str], values: Vec<Value>) -> QueryResult {
    QueryResult::Row(RowLabeled::new(
        labels
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .into(),
        values.into_boxed_slice(),
    ))
}

pub fn total(count: i64) -> QueryResult {
    row(&["total"], vec![Value::Int64(Some(count))])
}

pub fn affected(rows_affected: u64, last_affected_id: Option<i64>) -> QueryResult {
    QueryResult::Affected(RowsAffected {
        rows_affected,
        last_affected_id,
    })
}

pub fn labels(names: &[&str]) -> Arc<[String]> {
    names.iter().map(|v| v.to_string()).collect()
}
