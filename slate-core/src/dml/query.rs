use crate::{
    AsValue, BlockingExecutor, ColumnDef, Condition, Context, Dialect, ErrorSite, Executor,
    Operation, Order, OrmError, Result, RowLabeled, RowSet, SqlRequest, TableDef,
    fetch_request, fetch_request_blocking,
    stream::{Stream, StreamExt},
};
use async_stream::try_stream;
use std::{borrow::Cow, pin::pin, sync::Arc};

use super::{effective_condition, merge_condition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    Page { index: u64, size: u64 },
    Limit(u64),
}

/// SELECT over one table with filter, sort and paging.
///
/// Paging is zero based: `paging(i, size)` selects rows `[i * size, (i + 1) * size)` of the
/// sorted result. Pages only partition the result when the order is total and stable, without
/// [`QueryBuilder::order_by`] the row order across pages is whatever the backend returns.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    table: Arc<TableDef>,
    dialect: Arc<dyn Dialect>,
    columns: Vec<Cow<'static, str>>,
    condition: Option<Condition>,
    order: Vec<(Cow<'static, str>, Order)>,
    window: Option<Window>,
    first_only: bool,
}

impl QueryBuilder {
    pub fn new(table: Arc<TableDef>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            table,
            dialect,
            columns: Vec::new(),
            condition: None,
            order: Vec::new(),
            window: None,
            first_only: false,
        }
    }

    /// Selected columns, every column of the table when never called.
    pub fn select<C: Into<Cow<'static, str>>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a filter, AND-ed with the previous ones.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.condition = merge_condition(self.condition.take(), condition);
        self
    }

    /// Appends a sort key. Keys apply in the order they are added.
    pub fn order_by(mut self, column: impl Into<Cow<'static, str>>, order: Order) -> Self {
        self.order.push((column.into(), order));
        self
    }

    pub fn paging(mut self, page_index: u64, page_size: u64) -> Self {
        self.window = Some(Window::Page {
            index: page_index,
            size: page_size,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.window = Some(Window::Limit(limit));
        self
    }

    /// Narrows the window to its first row, a page keeps its offset.
    pub fn first(mut self) -> Self {
        self.first_only = true;
        self
    }

    pub fn table(&self) -> &Arc<TableDef> {
        &self.table
    }

    pub(crate) fn site(&self, operation: Operation) -> ErrorSite {
        ErrorSite::new(operation, self.table.name())
    }

    fn offset_limit(&self) -> Result<Option<(u64, u64)>> {
        let window = self.window_offset_limit()?;
        Ok(match (window, self.first_only) {
            (window, false) => window,
            (None, true) => Some((0, 1)),
            (Some((offset, limit)), true) => Some((offset, limit.min(1))),
        })
    }

    fn window_offset_limit(&self) -> Result<Option<(u64, u64)>> {
        Ok(match self.window {
            None => None,
            Some(Window::Limit(limit)) => Some((0, limit)),
            Some(Window::Page { index, size }) => {
                if size == 0 {
                    return Err(
                        OrmError::compile(self.site(Operation::Query), "page size is zero")
                            .logged(),
                    );
                }
                let Some(offset) = index.checked_mul(size) else {
                    return Err(OrmError::compile(
                        self.site(Operation::Query),
                        format!("page {} of size {} is out of range", index, size),
                    )
                    .logged());
                };
                if self.order.is_empty() {
                    log::warn!(
                        "Paging `{}` without ORDER BY, the page content depends on the backend row order",
                        self.table.name
                    );
                }
                Some((offset, size))
            }
        })
    }

    pub fn compile(&self) -> Result<SqlRequest> {
        let columns: Vec<&ColumnDef> = if self.columns.is_empty() {
            self.table.columns.iter().collect()
        } else {
            self.columns
                .iter()
                .map(|v| self.table.column_or_err(v, Operation::Query))
                .collect::<Result<_>>()?
        };
        let order = self
            .order
            .iter()
            .map(|(name, order)| {
                self.table
                    .column_or_err(name, Operation::Query)
                    .map(|v| (v, *order))
            })
            .collect::<Result<Vec<_>>>()?;
        let paging = self.offset_limit()?;
        let mut context = Context::new(Operation::Query);
        let mut sql = String::with_capacity(128);
        self.dialect.write_select(
            &mut context,
            &mut sql,
            &self.table,
            &columns,
            effective_condition(&self.condition),
            &order,
            paging,
        )?;
        Ok(context.into_request(sql))
    }

    /// COUNT over the same filter, ignoring sort and paging.
    pub fn count_request(&self) -> Result<SqlRequest> {
        let mut context = Context::new(Operation::Count);
        let mut sql = String::with_capacity(64);
        self.dialect.write_count(
            &mut context,
            &mut sql,
            &self.table,
            effective_condition(&self.condition),
        )?;
        Ok(context.into_request(sql))
    }

    /// Rows, produced while the stream is polled.
    pub fn fetch<'e, E: Executor>(
        &self,
        executor: &'e mut E,
    ) -> impl Stream<Item = Result<RowLabeled>> + Send + use<'e, E> {
        let site = self.site(Operation::Query);
        let request = self.compile();
        try_stream! {
            let stream = fetch_request(executor, site, request?);
            let mut stream = pin!(stream);
            while let Some(row) = stream.next().await {
                yield row?;
            }
        }
    }

    pub fn fetch_blocking<B: BlockingExecutor>(&self, executor: &mut B) -> Result<RowSet> {
        fetch_request_blocking(executor, self.site(Operation::Query), self.compile()?)
    }

    pub async fn count<E: Executor>(&self, executor: &mut E) -> Result<u64> {
        let site = self.site(Operation::Count);
        let request = self.count_request()?;
        let stream = fetch_request(executor, site.clone(), request);
        let mut stream = pin!(stream);
        match stream.next().await {
            Some(row) => total(site, &row?),
            None => Ok(0),
        }
    }

    pub fn count_blocking<B: BlockingExecutor>(&self, executor: &mut B) -> Result<u64> {
        let site = self.site(Operation::Count);
        let rows = fetch_request_blocking(executor, site.clone(), self.count_request()?)?;
        match rows.first() {
            Some(row) => total(site, row),
            None => Ok(0),
        }
    }
}

fn total(site: ErrorSite, row: &RowLabeled) -> Result<u64> {
    let value = row.values().first().cloned().unwrap_or_default();
    u64::try_from_value(value).map_err(|e| OrmError::mapping(site, format!("{:#}", e)).logged())
}
