use crate::{
    BlockingExecutor, ColumnDef, Context, Dialect, ErrorSite, Executor, Operation, OrmError,
    Result, RowsAffected, SqlRequest, TableDef, Value, execute_request, execute_request_blocking,
};
use std::{borrow::Cow, sync::Arc};

/// INSERT of one or more rows.
///
/// ```ignore
/// database
///     .insert("entity_test")?
///     .columns(["id", "name"])
///     .values(["t1".into(), "a".into()])
///     .execute(&mut executor)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: Arc<TableDef>,
    dialect: Arc<dyn Dialect>,
    columns: Vec<Cow<'static, str>>,
    rows: Vec<Vec<Value>>,
    upsert: bool,
}

impl InsertBuilder {
    pub fn new(table: Arc<TableDef>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            table,
            dialect,
            columns: Vec::new(),
            rows: Vec::new(),
            upsert: false,
        }
    }

    /// Target columns, all the table columns in declaration order when never called.
    pub fn columns<C: Into<Cow<'static, str>>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a row, aligned with the columns.
    pub fn values(mut self, row: impl IntoIterator<Item = Value>) -> Self {
        self.rows.push(row.into_iter().collect());
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<Value>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Update the existing row when the primary key is already present.
    pub fn on_conflict_update(mut self) -> Self {
        self.upsert = true;
        self
    }

    pub fn table(&self) -> &TableDef {
        &self.table
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn site(&self) -> ErrorSite {
        ErrorSite::new(Operation::Insert, self.table.name())
    }

    fn resolve_columns(&self) -> Result<Vec<&ColumnDef>> {
        if self.columns.is_empty() {
            return Ok(self.table.columns.iter().collect());
        }
        self.columns
            .iter()
            .map(|v| self.table.column_or_err(v, Operation::Insert))
            .collect()
    }

    /// One multi-row statement, or one statement per row when the dialect cannot do better.
    /// Fails if an upsert was requested and the dialect has no native one.
    pub fn compile(&self) -> Result<Vec<SqlRequest>> {
        match self.compile_upsert()? {
            Some(v) => Ok(v),
            None => Err(OrmError::compile(
                self.site(),
                format!("{} has no native upsert", self.dialect.name()),
            )
            .logged()),
        }
    }

    /// Same as [`InsertBuilder::compile`], `None` when the upsert clause is not supported.
    pub fn compile_upsert(&self) -> Result<Option<Vec<SqlRequest>>> {
        let columns = self.resolve_columns()?;
        if self.rows.is_empty() {
            return Err(OrmError::compile(self.site(), "no rows to insert").logged());
        }
        if let Some((i, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(OrmError::compile(
                self.site(),
                format!(
                    "row {} has {} values, {} columns expected",
                    i,
                    row.len(),
                    columns.len()
                ),
            )
            .logged());
        }
        let conflict = self.table.primary_key().collect::<Vec<_>>();
        if self.upsert && conflict.is_empty() {
            return Err(OrmError::metadata(self.site(), "upsert needs a primary key").logged());
        }
        let chunks: Vec<&[Vec<Value>]> = if self.dialect.supports_multi_row_insert() {
            vec![&self.rows[..]]
        } else {
            self.rows.chunks(1).collect()
        };
        let mut result = Vec::with_capacity(chunks.len());
        for rows in chunks {
            let mut context = Context::new(Operation::Insert);
            let mut sql = String::with_capacity(64 + rows.len() * columns.len() * 4);
            self.dialect
                .write_insert(&mut context, &mut sql, &self.table, &columns, rows)?;
            if self.upsert
                && !self.dialect.write_upsert(
                    &mut context,
                    &mut sql,
                    &self.table,
                    &columns,
                    &conflict,
                )?
            {
                return Ok(None);
            }
            result.push(context.into_request(sql));
        }
        Ok(Some(result))
    }

    pub async fn execute<E: Executor>(&self, executor: &mut E) -> Result<RowsAffected> {
        let mut result = RowsAffected::default();
        for request in self.compile()? {
            result.extend([execute_request(executor, self.site(), request).await?]);
        }
        Ok(result)
    }

    pub fn execute_blocking<B: BlockingExecutor>(&self, executor: &mut B) -> Result<RowsAffected> {
        let mut result = RowsAffected::default();
        for request in self.compile()? {
            result.extend([execute_request_blocking(executor, self.site(), request)?]);
        }
        Ok(result)
    }
}
