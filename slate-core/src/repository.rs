use crate::{
    BatchFailure, BlockingExecutor, ColumnMapping, Condition, Database, DeleteBuilder, Dialect,
    Entity, ErrorContext, ErrorSite, Executor, InsertBuilder, Operation, Order, OrmError,
    QueryBuilder, Result, RowLabeled, SqlRequest, TableDef, UpdateBuilder, Value,
    execute_request, execute_request_blocking,
    stream::{Stream, StreamExt},
};
use async_stream::try_stream;
use std::{borrow::Cow, marker::PhantomData, pin::pin, sync::Arc};

/// CRUD facade of one table for the entity type `E`.
///
/// Batch inserts run chunk after chunk. The first failing chunk stops the batch: the error
/// carries a [`BatchFailure`] with the rows inserted by the previous chunks, which stay
/// inserted unless the executor runs inside a transaction.
#[derive(Debug)]
pub struct Repository<E: Entity> {
    table: Arc<TableDef>,
    dialect: Arc<dyn Dialect>,
    mapping: Arc<ColumnMapping>,
    chunk_size: usize,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            dialect: self.dialect.clone(),
            mapping: self.mapping.clone(),
            chunk_size: self.chunk_size,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(database: &Database, table: &str) -> Result<Self> {
        let table = database.table(table)?;
        let mapping = ColumnMapping::resolve::<E>(&table);
        Ok(Self {
            table,
            dialect: database.dialect(),
            mapping,
            chunk_size: database.chunk_size(),
            _entity: PhantomData,
        })
    }

    pub fn table(&self) -> &Arc<TableDef> {
        &self.table
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn site(&self, operation: Operation) -> ErrorSite {
        ErrorSite::new(operation, self.table.name())
    }

    fn insert_builder<'a>(&self, entities: impl IntoIterator<Item = &'a E>) -> InsertBuilder {
        let columns = self
            .mapping
            .entries()
            .iter()
            .map(|(column, _)| Cow::Owned(column.clone()))
            .collect::<Vec<_>>();
        InsertBuilder::new(self.table.clone(), self.dialect.clone())
            .columns(columns)
            .rows(entities.into_iter().map(|entity| {
                self.mapping
                    .entries()
                    .iter()
                    .map(|(_, property)| entity.property(property).unwrap_or_default())
                    .collect()
            }))
    }

    /// Primary key condition, the table must have exactly one primary key column.
    fn id_condition(&self, id: Value) -> Result<Condition> {
        let key = self.table.primary_key().collect::<Vec<_>>();
        match key.as_slice() {
            [column] => Ok(Condition::eq(column.name.clone(), id)),
            _ => Err(OrmError::metadata(
                self.site(Operation::Query),
                format!(
                    "lookup by id needs a single column primary key, the table has {}",
                    key.len()
                ),
            )
            .logged()),
        }
    }

    /// Primary key condition taken from the entity itself.
    fn key_condition(&self, entity: &E) -> Result<Condition> {
        let mut condition = None;
        for column in self.table.primary_key() {
            let value = self
                .mapping
                .entries()
                .iter()
                .find(|(c, _)| *c == column.name)
                .and_then(|(_, property)| entity.property(property))
                .ok_or_else(|| {
                    OrmError::metadata(
                        self.site(Operation::Update).column(column.name()),
                        "primary key column is not mapped to a property",
                    )
                    .logged()
                })?;
            condition =
                crate::dml::merge_condition(condition, Condition::eq(column.name.clone(), value));
        }
        condition.ok_or_else(|| {
            OrmError::metadata(self.site(Operation::Update), "the table has no primary key")
                .logged()
        })
    }

    pub async fn insert<X: Executor>(&self, executor: &mut X, entity: &E) -> Result<u64> {
        let result = self.insert_builder([entity]).execute(executor).await?;
        Ok(result.rows_affected)
    }

    pub fn insert_blocking<B: BlockingExecutor>(&self, executor: &mut B, entity: &E) -> Result<u64> {
        let result = self.insert_builder([entity]).execute_blocking(executor)?;
        Ok(result.rows_affected)
    }

    fn compile_chunks(
        &self,
        entities: &[&E],
        chunk_size: Option<usize>,
    ) -> Result<Vec<Vec<SqlRequest>>> {
        let chunk_size = chunk_size.unwrap_or(self.chunk_size);
        if chunk_size == 0 {
            return Err(
                OrmError::compile(self.site(Operation::Insert), "chunk size is zero").logged(),
            );
        }
        entities
            .chunks(chunk_size)
            .map(|chunk| self.insert_builder(chunk.iter().copied()).compile())
            .collect()
    }

    /// Insert in chunks of `chunk_size` rows (the database default when `None`). Every chunk
    /// is compiled before the first one runs. Returns the number of rows inserted.
    pub async fn insert_batch<'a, X: Executor>(
        &self,
        executor: &mut X,
        entities: impl IntoIterator<Item = &'a E>,
        chunk_size: Option<usize>,
    ) -> Result<u64> {
        let entities = entities.into_iter().collect::<Vec<_>>();
        if entities.is_empty() {
            return Ok(0);
        }
        let chunks = self.compile_chunks(&entities, chunk_size)?;
        let total = chunks.len();
        let mut completed = 0;
        for (i, requests) in chunks.into_iter().enumerate() {
            for request in requests {
                match execute_request(executor, self.site(Operation::Insert), request).await {
                    Ok(v) => completed += v.rows_affected,
                    Err(e) => {
                        let failure = BatchFailure {
                            completed,
                            failed_chunk: i,
                            chunks: total,
                        };
                        log::error!("{}", failure);
                        return Err(e.context(failure));
                    }
                }
            }
        }
        Ok(completed)
    }

    pub fn insert_batch_blocking<'a, B: BlockingExecutor>(
        &self,
        executor: &mut B,
        entities: impl IntoIterator<Item = &'a E>,
        chunk_size: Option<usize>,
    ) -> Result<u64> {
        let entities = entities.into_iter().collect::<Vec<_>>();
        if entities.is_empty() {
            return Ok(0);
        }
        let chunks = self.compile_chunks(&entities, chunk_size)?;
        let total = chunks.len();
        let mut completed = 0;
        for (i, requests) in chunks.into_iter().enumerate() {
            for request in requests {
                let site = self.site(Operation::Insert);
                let result = execute_request_blocking(executor, site, request)
                    .with_context(|| {
                        let failure = BatchFailure {
                            completed,
                            failed_chunk: i,
                            chunks: total,
                        };
                        log::error!("{}", failure);
                        failure
                    })?;
                completed += result.rows_affected;
            }
        }
        Ok(completed)
    }

    /// Insert or update by primary key. Uses the native upsert of the dialect when it has
    /// one, otherwise counts the rows with the same key and then updates or inserts.
    pub async fn save<X: Executor>(&self, executor: &mut X, entity: &E) -> Result<u64> {
        let insert = self.insert_builder([entity]).on_conflict_update();
        if let Some(requests) = insert.compile_upsert()? {
            let mut total = 0;
            for request in requests {
                total += execute_request(executor, self.site(Operation::Insert), request)
                    .await?
                    .rows_affected;
            }
            return Ok(total);
        }
        let condition = self.key_condition(entity)?;
        let exists = self
            .create_query()
            .filter(condition.clone())
            .count(executor)
            .await?
            > 0;
        if !exists {
            return self.insert(executor, entity).await;
        }
        match self.update_builder(entity, condition) {
            Some(update) => Ok(update.execute(executor).await?.rows_affected),
            None => Ok(0),
        }
    }

    /// Update of the non key columns of `entity`, `None` when there is nothing to set.
    fn update_builder(&self, entity: &E, condition: Condition) -> Option<UpdateBuilder> {
        let mut update = self.create_update().filter(condition);
        let mut any = false;
        for (column, value) in self.mapping.values(entity) {
            if self
                .table
                .find_column(column)
                .is_some_and(|c| !c.primary_key)
            {
                update = update.set(column.to_string(), value);
                any = true;
            }
        }
        any.then_some(update)
    }

    pub async fn find_by_id<X: Executor>(
        &self,
        executor: &mut X,
        id: impl Into<Value>,
    ) -> Result<Option<E>> {
        let condition = self.id_condition(id.into())?;
        self.create_query().filter(condition).fetch_one(executor).await
    }

    pub fn find_by_id_blocking<B: BlockingExecutor>(
        &self,
        executor: &mut B,
        id: impl Into<Value>,
    ) -> Result<Option<E>> {
        let condition = self.id_condition(id.into())?;
        Ok(self
            .create_query()
            .filter(condition)
            .limit(1)
            .fetch_blocking(executor)?
            .into_iter()
            .next())
    }

    pub async fn delete_by_id<X: Executor>(
        &self,
        executor: &mut X,
        id: impl Into<Value>,
    ) -> Result<u64> {
        let condition = self.id_condition(id.into())?;
        Ok(self
            .create_delete()
            .filter(condition)
            .execute(executor)
            .await?
            .rows_affected)
    }

    pub fn create_query(&self) -> EntityQuery<E> {
        EntityQuery {
            query: QueryBuilder::new(self.table.clone(), self.dialect.clone()),
            mapping: self.mapping.clone(),
            _entity: PhantomData,
        }
    }

    pub fn create_update(&self) -> UpdateBuilder {
        UpdateBuilder::new(self.table.clone(), self.dialect.clone())
    }

    pub fn create_delete(&self) -> DeleteBuilder {
        DeleteBuilder::new(self.table.clone(), self.dialect.clone())
    }
}

/// [`QueryBuilder`] producing entities instead of rows.
#[derive(Debug)]
pub struct EntityQuery<E: Entity> {
    query: QueryBuilder,
    mapping: Arc<ColumnMapping>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for EntityQuery<E> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            mapping: self.mapping.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> EntityQuery<E> {
    pub fn filter(mut self, condition: Condition) -> Self {
        self.query = self.query.filter(condition);
        self
    }

    pub fn order_by(mut self, column: impl Into<Cow<'static, str>>, order: Order) -> Self {
        self.query = self.query.order_by(column, order);
        self
    }

    pub fn paging(mut self, page_index: u64, page_size: u64) -> Self {
        self.query = self.query.paging(page_index, page_size);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.query = self.query.limit(limit);
        self
    }

    pub fn builder(&self) -> &QueryBuilder {
        &self.query
    }

    pub fn compile(&self) -> Result<SqlRequest> {
        self.query.compile()
    }

    pub fn fetch<'e, X: Executor>(
        &self,
        executor: &'e mut X,
    ) -> impl Stream<Item = Result<E>> + Send + use<'e, X, E> {
        let rows = self.query.fetch(executor);
        let mapping = self.mapping.clone();
        try_stream! {
            let mut rows = pin!(rows);
            while let Some(row) = rows.next().await {
                let row: RowLabeled = row?;
                yield mapping.wrap::<E>(&row)?;
            }
        }
    }

    /// First entity of the result (of the page, when paged), the query is limited to one row.
    pub async fn fetch_one<X: Executor>(&self, executor: &mut X) -> Result<Option<E>> {
        let mut query = self.clone();
        query.query = query.query.first();
        let stream = query.fetch(executor);
        let mut stream = pin!(stream);
        stream.next().await.transpose()
    }

    pub fn fetch_blocking<B: BlockingExecutor>(&self, executor: &mut B) -> Result<Vec<E>> {
        self.query
            .fetch_blocking(executor)?
            .iter()
            .map(|row| self.mapping.wrap::<E>(row))
            .collect()
    }

    pub async fn count<X: Executor>(&self, executor: &mut X) -> Result<u64> {
        self.query.count(executor).await
    }

    pub fn count_blocking<B: BlockingExecutor>(&self, executor: &mut B) -> Result<u64> {
        self.query.count_blocking(executor)
    }
}
