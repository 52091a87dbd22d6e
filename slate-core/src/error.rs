use crate::SqlRequest;
use std::fmt::{self, Display};
use thiserror::Error;

/// Kind of operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Ddl,
    Insert,
    Update,
    Delete,
    Query,
    Count,
    Mapping,
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Ddl => "DDL",
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Query => "SELECT",
            Operation::Count => "COUNT",
            Operation::Mapping => "MAPPING",
        })
    }
}

/// Where an error happened: operation, table and optionally the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSite {
    pub operation: Operation,
    pub table: String,
    pub column: Option<String>,
}

impl ErrorSite {
    pub fn new(operation: Operation, table: impl Into<String>) -> Self {
        Self {
            operation,
            table: table.into(),
            column: None,
        }
    }
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

impl Display for ErrorSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on table `{}`", self.operation, self.table)?;
        if let Some(column) = &self.column {
            write!(f, ", column `{}`", column)?;
        }
        Ok(())
    }
}

/// Error taxonomy of the engine.
///
/// Values of this type travel inside [`crate::Error`], classify them with
/// `error.downcast_ref::<OrmError>()`. `Execution` is attached as context on top of the
/// executor's own error, which stays available as the root cause.
#[derive(Debug, Error)]
pub enum OrmError {
    /// Unknown table or column, conflicting primary key, type the dialect cannot map.
    #[error("Metadata error, {site}: {reason}")]
    Metadata { site: ErrorSite, reason: String },
    /// Malformed condition tree or refused statement. Nothing was sent to the database.
    #[error("Compile error, {site}: {reason}")]
    Compile { site: ErrorSite, reason: String },
    #[error("Execution error, {site}, while running:\n{request}")]
    Execution {
        site: ErrorSite,
        request: SqlRequest,
    },
    /// A row value could not be coerced into the property type.
    #[error("Mapping error, {site}: {reason}")]
    Mapping { site: ErrorSite, reason: String },
}

impl OrmError {
    pub fn metadata(site: ErrorSite, reason: impl Into<String>) -> Self {
        OrmError::Metadata {
            site,
            reason: reason.into(),
        }
    }
    pub fn compile(site: ErrorSite, reason: impl Into<String>) -> Self {
        OrmError::Compile {
            site,
            reason: reason.into(),
        }
    }
    pub fn mapping(site: ErrorSite, reason: impl Into<String>) -> Self {
        OrmError::Mapping {
            site,
            reason: reason.into(),
        }
    }
    /// Logs the error and converts it into the crate error type.
    pub fn logged(self) -> crate::Error {
        log::error!("{:#}", self);
        self.into()
    }
    pub fn site(&self) -> &ErrorSite {
        match self {
            OrmError::Metadata { site, .. }
            | OrmError::Compile { site, .. }
            | OrmError::Execution { site, .. }
            | OrmError::Mapping { site, .. } => site,
        }
    }
    pub fn request(&self) -> Option<&SqlRequest> {
        match self {
            OrmError::Execution { request, .. } => Some(request),
            _ => None,
        }
    }
}

/// Context attached to the error of a chunked batch insert that stopped early.
///
/// Chunks run in order and the first failing chunk aborts the rest. `completed` counts the
/// rows written by the chunks that succeeded, which are not rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchFailure {
    pub completed: u64,
    pub failed_chunk: usize,
    pub chunks: usize,
}

impl Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Batch aborted at chunk {} of {}, {} rows already inserted",
            self.failed_chunk + 1,
            self.chunks,
            self.completed
        )
    }
}
