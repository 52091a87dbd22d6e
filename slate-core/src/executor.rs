use crate::{
    ErrorSite, OrmError, Result, SqlRequest, Value,
    stream::{Stream, StreamExt, TryStreamExt},
};
use async_stream::try_stream;
use std::{future::Future, sync::Arc};

/// Metadata about modify operations (INSERT/UPDATE/DELETE).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    /// Total number of rows impacted.
    pub rows_affected: u64,
    /// Backend-specific last inserted identifier when available.
    pub last_affected_id: Option<i64>,
}

impl Extend<RowsAffected> for RowsAffected {
    fn extend<T: IntoIterator<Item = RowsAffected>>(&mut self, iter: T) {
        for elem in iter {
            self.rows_affected += elem.rows_affected;
            if elem.last_affected_id.is_some() {
                self.last_affected_id = elem.last_affected_id;
            }
        }
    }
}

/// Shared column name list.
pub type RowNames = Arc<[String]>;
/// Row values, aligned with `RowNames`.
pub type Row = Box<[Value]>;

/// A result row with its column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    pub labels: RowNames,
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    /// Value of the column, names compare case-insensitively.
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v.eq_ignore_ascii_case(name))
            .map(|i| &self.values[i])
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

/// Fully materialized result of a blocking query.
pub type RowSet = Vec<RowLabeled>;

/// Items produced by executing a request: rows or modify effects.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Row(RowLabeled),
    Affected(RowsAffected),
}

impl From<RowLabeled> for QueryResult {
    fn from(value: RowLabeled) -> Self {
        QueryResult::Row(value)
    }
}

impl From<RowsAffected> for QueryResult {
    fn from(value: RowsAffected) -> Self {
        QueryResult::Affected(value)
    }
}

/// Streaming executor: rows are produced while the consumer polls.
///
/// Implementations must not buffer the whole result set and must release cursors when the
/// stream is dropped, also before the end.
pub trait Executor: Send {
    /// Send any request, yielding rows and modify effects.
    fn run(&mut self, request: SqlRequest) -> impl Stream<Item = Result<QueryResult>> + Send;

    /// Execute the request and return the rows.
    fn fetch(&mut self, request: SqlRequest) -> impl Stream<Item = Result<RowLabeled>> + Send {
        self.run(request).filter_map(|v| async move {
            match v {
                Ok(QueryResult::Row(v)) => Some(Ok(v)),
                Err(e) => Some(Err(e)),
                _ => None,
            }
        })
    }

    /// Execute the request and return the total number of rows affected.
    fn execute(&mut self, request: SqlRequest) -> impl Future<Output = Result<RowsAffected>> + Send {
        self.run(request)
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
    }
}

/// Blocking executor: the calling thread waits for the complete result.
pub trait BlockingExecutor {
    fn run_blocking(&mut self, request: SqlRequest) -> Result<Vec<QueryResult>>;

    fn fetch_blocking(&mut self, request: SqlRequest) -> Result<RowSet> {
        Ok(self
            .run_blocking(request)?
            .into_iter()
            .filter_map(|v| match v {
                QueryResult::Row(v) => Some(v),
                _ => None,
            })
            .collect())
    }

    fn execute_blocking(&mut self, request: SqlRequest) -> Result<RowsAffected> {
        let mut result = RowsAffected::default();
        result.extend(self.run_blocking(request)?.into_iter().filter_map(|v| match v {
            QueryResult::Affected(v) => Some(v),
            _ => None,
        }));
        Ok(result)
    }
}

/// Streaming over blocking: the request runs on the first poll, then the results are replayed.
#[derive(Debug)]
pub struct Streaming<B: BlockingExecutor + Send>(pub B);

impl<B: BlockingExecutor + Send> Executor for Streaming<B> {
    fn run(&mut self, request: SqlRequest) -> impl Stream<Item = Result<QueryResult>> + Send {
        let inner = &mut self.0;
        try_stream! {
            for result in inner.run_blocking(request)? {
                yield result;
            }
        }
    }
}

/// Blocking over streaming: the stream is drained on the calling thread.
///
/// Meant for synchronous call sites, do not use it from inside an async task.
#[derive(Debug)]
pub struct Blocking<E: Executor>(pub E);

impl<E: Executor> BlockingExecutor for Blocking<E> {
    fn run_blocking(&mut self, request: SqlRequest) -> Result<Vec<QueryResult>> {
        futures::executor::block_on(self.0.run(request).try_collect())
    }
}

pub(crate) fn execution_error(error: crate::Error, site: ErrorSite, request: SqlRequest) -> crate::Error {
    let error = error.context(OrmError::Execution { site, request });
    log::error!("{:#}", error);
    error
}

/// Execute a modify request, attaching the request to the error.
pub(crate) async fn execute_request<E: Executor>(
    executor: &mut E,
    site: ErrorSite,
    request: SqlRequest,
) -> Result<RowsAffected> {
    log::debug!("{}: {}", site.operation, request);
    executor
        .execute(request.clone())
        .await
        .map_err(|e| execution_error(e, site, request))
}

pub(crate) fn execute_request_blocking<B: BlockingExecutor>(
    executor: &mut B,
    site: ErrorSite,
    request: SqlRequest,
) -> Result<RowsAffected> {
    log::debug!("{}: {}", site.operation, request);
    executor
        .execute_blocking(request.clone())
        .map_err(|e| execution_error(e, site, request))
}

/// Fetch the rows of a request, attaching the request to the error.
pub(crate) fn fetch_request<'e, E: Executor>(
    executor: &'e mut E,
    site: ErrorSite,
    request: SqlRequest,
) -> impl Stream<Item = Result<RowLabeled>> + Send + 'e {
    log::debug!("{}: {}", site.operation, request);
    executor
        .fetch(request.clone())
        .map_err(move |e| execution_error(e, site.clone(), request.clone()))
}

pub(crate) fn fetch_request_blocking<B: BlockingExecutor>(
    executor: &mut B,
    site: ErrorSite,
    request: SqlRequest,
) -> Result<RowSet> {
    log::debug!("{}: {}", site.operation, request);
    executor
        .fetch_blocking(request.clone())
        .map_err(|e| execution_error(e, site, request))
}
