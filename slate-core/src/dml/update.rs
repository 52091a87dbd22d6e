use crate::{
    BlockingExecutor, Condition, Context, Dialect, Error, ErrorSite, Executor, Operation, OrmError,
    Result, RowsAffected, SqlRequest, TableDef, Value, execute_request, execute_request_blocking,
};
use std::{borrow::Cow, sync::Arc};

use super::{effective_condition, merge_condition};

/// UPDATE of the rows matching a condition.
///
/// Refuses to compile without a condition unless [`UpdateBuilder::allow_unconditional`] was
/// called.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    table: Arc<TableDef>,
    dialect: Arc<dyn Dialect>,
    assignments: Vec<(Cow<'static, str>, Value)>,
    condition: Option<Condition>,
    unconditional: bool,
}

impl UpdateBuilder {
    pub fn new(table: Arc<TableDef>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            table,
            dialect,
            assignments: Vec::new(),
            condition: None,
            unconditional: false,
        }
    }

    pub fn set(mut self, column: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.assignments.push((column.into(), value.into()));
        self
    }

    /// Adds a filter, AND-ed with the previous ones.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.condition = merge_condition(self.condition.take(), condition);
        self
    }

    /// Confirms that updating every row of the table is intended.
    pub fn allow_unconditional(mut self) -> Self {
        self.unconditional = true;
        self
    }

    fn site(&self) -> ErrorSite {
        ErrorSite::new(Operation::Update, self.table.name())
    }

    pub fn compile(&self) -> Result<SqlRequest> {
        if self.assignments.is_empty() {
            return Err(OrmError::compile(self.site(), "no column to set").logged());
        }
        let condition = effective_condition(&self.condition);
        if condition.is_none() && !self.unconditional {
            return Err(OrmError::compile(
                self.site(),
                "refusing to update every row without an explicit allow_unconditional()",
            )
            .logged());
        }
        let assignments = self
            .assignments
            .iter()
            .map(|(name, value)| {
                Ok::<_, Error>((
                    self.table.column_or_err(name, Operation::Update)?,
                    value.clone(),
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut context = Context::new(Operation::Update);
        let mut sql = String::with_capacity(128);
        self.dialect
            .write_update(&mut context, &mut sql, &self.table, &assignments, condition)?;
        Ok(context.into_request(sql))
    }

    pub async fn execute<E: Executor>(&self, executor: &mut E) -> Result<RowsAffected> {
        execute_request(executor, self.site(), self.compile()?).await
    }

    pub fn execute_blocking<B: BlockingExecutor>(&self, executor: &mut B) -> Result<RowsAffected> {
        execute_request_blocking(executor, self.site(), self.compile()?)
    }
}
