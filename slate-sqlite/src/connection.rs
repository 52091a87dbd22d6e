use crate::extract::{extract_value, to_sqlite};
use rusqlite::{Connection, params_from_iter};
use slate_core::{
    BlockingExecutor, Error, ErrorContext, QueryResult, Result, RowLabeled, RowNames,
    RowsAffected, SqlRequest, truncate_long,
};

/// Blocking executor over one SQLite connection.
///
/// Use [`slate_core::Streaming`] to pass it where an async [`slate_core::Executor`] is
/// expected.
#[derive(Debug)]
pub struct SqliteConnection {
    connection: Connection,
}

impl SqliteConnection {
    pub const PREFIX: &'static str = "sqlite://";

    /// Open `sqlite://:memory:` or `sqlite://path/to/file.db`, the file is created when missing.
    pub fn connect(url: &str) -> Result<Self> {
        let Some(target) = url.strip_prefix(Self::PREFIX) else {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                Self::PREFIX
            ));
            log::error!("{:#}", error);
            return Err(error);
        };
        let connection = if target == ":memory:" {
            Connection::open_in_memory()
        } else {
            Connection::open(target)
        }
        .with_context(|| format!("While opening the sqlite database `{}`", target))?;
        Ok(Self { connection })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::connect("sqlite://:memory:")
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}

impl From<Connection> for SqliteConnection {
    fn from(connection: Connection) -> Self {
        Self { connection }
    }
}

impl BlockingExecutor for SqliteConnection {
    fn run_blocking(&mut self, request: SqlRequest) -> Result<Vec<QueryResult>> {
        let params = request
            .values()
            .map(to_sqlite)
            .collect::<Result<Vec<_>>>()?;
        let mut statement = self
            .connection
            .prepare(request.sql())
            .with_context(|| format!("While preparing `{}`", truncate_long!(request.sql())))?;
        let count = statement.column_count();
        if count == 0 {
            let rows = statement.execute(params_from_iter(params.iter()))?;
            let last_affected_id = (rows > 0 && request.sql().starts_with("INSERT"))
                .then(|| self.connection.last_insert_rowid());
            return Ok(vec![QueryResult::Affected(RowsAffected {
                rows_affected: rows as u64,
                last_affected_id,
            })]);
        }
        let labels: RowNames = statement
            .column_names()
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
            .into();
        let mut rows = statement.query(params_from_iter(params.iter()))?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let values = (0..count)
                .map(|i| extract_value(row.get_ref(i)?))
                .collect::<Result<_>>()?;
            result.push(QueryResult::Row(RowLabeled::new(labels.clone(), values)));
        }
        Ok(result)
    }
}
