use crate::{
    BlockingExecutor, Condition, Context, Dialect, ErrorSite, Executor, Operation, OrmError,
    Result, RowsAffected, SqlRequest, TableDef, execute_request, execute_request_blocking,
};
use std::sync::Arc;

use super::{effective_condition, merge_condition};

/// DELETE of the rows matching a condition, same guard as [`crate::UpdateBuilder`].
#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    table: Arc<TableDef>,
    dialect: Arc<dyn Dialect>,
    condition: Option<Condition>,
    unconditional: bool,
}

impl DeleteBuilder {
    pub fn new(table: Arc<TableDef>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            table,
            dialect,
            condition: None,
            unconditional: false,
        }
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.condition = merge_condition(self.condition.take(), condition);
        self
    }

    pub fn allow_unconditional(mut self) -> Self {
        self.unconditional = true;
        self
    }

    fn site(&self) -> ErrorSite {
        ErrorSite::new(Operation::Delete, self.table.name())
    }

    pub fn compile(&self) -> Result<SqlRequest> {
        let condition = effective_condition(&self.condition);
        if condition.is_none() && !self.unconditional {
            return Err(OrmError::compile(
                self.site(),
                "refusing to delete every row without an explicit allow_unconditional()",
            )
            .logged());
        }
        let mut context = Context::new(Operation::Delete);
        let mut sql = String::with_capacity(64);
        self.dialect
            .write_delete(&mut context, &mut sql, &self.table, condition)?;
        Ok(context.into_request(sql))
    }

    pub async fn execute<E: Executor>(&self, executor: &mut E) -> Result<RowsAffected> {
        execute_request(executor, self.site(), self.compile()?).await
    }

    pub fn execute_blocking<B: BlockingExecutor>(&self, executor: &mut B) -> Result<RowsAffected> {
        execute_request_blocking(executor, self.site(), self.compile()?)
    }
}
