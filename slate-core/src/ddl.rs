use crate::{
    BlockingExecutor, ColumnDef, Database, ErrorSite, Executor, Operation, OrmError, Result,
    SqlRequest, TableDef, execute_request, execute_request_blocking,
};
use std::sync::Arc;

/// Progress of a [`DdlBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdlState {
    New,
    /// Number of columns added after creation.
    ColumnsAdded(usize),
    /// Every statement ran and the database knows the resulting table.
    Committed,
}

/// Metadata change of one step, applied to the known table once its statements ran.
#[derive(Debug, Clone, Copy)]
enum Change {
    Create,
    /// Added or altered column, by position in the target.
    Column(usize),
    Comment(usize),
    PrimaryKey,
    Index(usize),
}

#[derive(Debug)]
struct Step {
    change: Change,
    requests: Vec<SqlRequest>,
}

fn push_step(
    steps: &mut Vec<Step>,
    change: Change,
    write: impl FnOnce(&mut Vec<SqlRequest>) -> Result<()>,
) -> Result<()> {
    let mut requests = Vec::new();
    write(&mut requests)?;
    steps.push(Step { change, requests });
    Ok(())
}

/// Create or alter session of one table, see [`Database::create_or_alter`].
///
/// The target definition is compared column by column with the table currently known to the
/// database. Columns only in the target are added, columns in both whose type, length,
/// precision, nullability or default differ are altered, columns only in the known table are
/// left alone. Comments, primary key and indexes come after the columns. After a commit the
/// database knows the merged table, so compiling the same definition again yields nothing.
/// A commit failing halfway registers the part that ran, a retry continues from there.
#[derive(Debug)]
pub struct DdlBuilder<'d> {
    database: &'d mut Database,
    table: TableDef,
    state: DdlState,
}

impl<'d> DdlBuilder<'d> {
    pub(crate) fn new(database: &'d mut Database, table: TableDef) -> Self {
        Self {
            database,
            table,
            state: DdlState::New,
        }
    }

    pub fn state(&self) -> DdlState {
        self.state
    }

    pub fn table(&self) -> &TableDef {
        &self.table
    }

    /// Adds (or replaces) a column of the target definition.
    pub fn add_column(&mut self, column: ColumnDef) -> &mut Self {
        self.table.put_column(column);
        self.state = match self.state {
            DdlState::New => DdlState::ColumnsAdded(1),
            DdlState::ColumnsAdded(n) => DdlState::ColumnsAdded(n + 1),
            DdlState::Committed => DdlState::Committed,
        };
        self
    }

    fn known(&self) -> Option<Arc<TableDef>> {
        let schema = (!self.table.schema.is_empty()).then_some(&*self.table.schema);
        self.database.find_table(schema, &self.table.name)
    }

    /// The statements bringing the database to the target definition, in execution order.
    pub fn compile(&self) -> Result<Vec<SqlRequest>> {
        Ok(self
            .plan()?
            .into_iter()
            .flat_map(|v| v.requests)
            .collect())
    }

    fn plan(&self) -> Result<Vec<Step>> {
        self.table.validate()?;
        let dialect = self.database.dialect();
        let table = &self.table;
        let mut steps = Vec::new();
        let Some(current) = self.known() else {
            log::debug!("Table `{}` is new, creating it", table.name);
            push_step(&mut steps, Change::Create, |out| {
                dialect.write_create_table(table, out)
            })?;
            for (i, column) in table.columns.iter().enumerate() {
                if !column.comment.is_empty() {
                    push_step(&mut steps, Change::Comment(i), |out| {
                        dialect.write_comment(table, column, out)
                    })?;
                }
            }
            for (i, index) in table.indexes.iter().enumerate() {
                push_step(&mut steps, Change::Index(i), |out| {
                    dialect.write_create_index(table, index, out)
                })?;
            }
            return Ok(steps);
        };
        for (i, column) in table.columns.iter().enumerate() {
            let previous = current.find_column(&column.name);
            match previous {
                None => {
                    log::debug!("Adding column `{}.{}`", table.name, column.name);
                    push_step(&mut steps, Change::Column(i), |out| {
                        dialect.write_add_column(table, column, out)
                    })?;
                }
                Some(previous) => {
                    if column.differs_from(previous) || column.default != previous.default {
                        log::info!("Altering column `{}.{}`", table.name, column.name);
                        push_step(&mut steps, Change::Column(i), |out| {
                            dialect.write_alter_column(table, previous, column, out)
                        })?;
                    }
                }
            }
            let previous_comment = previous.map(|v| &*v.comment).unwrap_or_default();
            if !column.comment.is_empty() && column.comment != previous_comment {
                push_step(&mut steps, Change::Comment(i), |out| {
                    dialect.write_comment(table, column, out)
                })?;
            }
        }
        for previous in &current.columns {
            if table.find_column(&previous.name).is_none() {
                log::debug!(
                    "Column `{}.{}` is not in the new definition, leaving it untouched",
                    table.name,
                    previous.name
                );
            }
        }
        let previous_key: Vec<&str> = current.primary_key().map(|v| v.name()).collect();
        let key: Vec<&str> = table.primary_key().map(|v| v.name()).collect();
        let same_key = previous_key.len() == key.len()
            && key
                .iter()
                .all(|k| previous_key.iter().any(|v| v.eq_ignore_ascii_case(k)));
        if !same_key {
            if !previous_key.is_empty() {
                return Err(OrmError::metadata(
                    ErrorSite::new(Operation::Ddl, table.name()),
                    format!(
                        "primary key ({}) cannot be replaced by ({}) without an explicit migration",
                        previous_key.join(", "),
                        key.join(", ")
                    ),
                )
                .logged());
            }
            push_step(&mut steps, Change::PrimaryKey, |out| {
                dialect.write_add_primary_key(table, out)
            })?;
        }
        for (i, index) in table.indexes.iter().enumerate() {
            if !current.indexes.iter().any(|v| v.name == index.name) {
                push_step(&mut steps, Change::Index(i), |out| {
                    dialect.write_create_index(table, index, out)
                })?;
            }
        }
        Ok(steps)
    }

    /// Execute the statements in order and register the resulting table. Returns the number
    /// of statements executed.
    pub async fn commit<E: Executor>(&mut self, executor: &mut E) -> Result<usize> {
        let steps = self.plan()?;
        let mut known = self.known().map(|v| (*v).clone());
        let mut applied = false;
        let mut count = 0;
        for step in steps {
            for request in step.requests {
                if let Err(error) = execute_request(executor, self.site(), request).await {
                    self.register_applied(known, applied);
                    return Err(error);
                }
                count += 1;
            }
            self.apply(known.get_or_insert_with(TableDef::default), step.change);
            applied = true;
        }
        self.register();
        Ok(count)
    }

    pub fn commit_blocking<B: BlockingExecutor>(&mut self, executor: &mut B) -> Result<usize> {
        let steps = self.plan()?;
        let mut known = self.known().map(|v| (*v).clone());
        let mut applied = false;
        let mut count = 0;
        for step in steps {
            for request in step.requests {
                if let Err(error) = execute_request_blocking(executor, self.site(), request) {
                    self.register_applied(known, applied);
                    return Err(error);
                }
                count += 1;
            }
            self.apply(known.get_or_insert_with(TableDef::default), step.change);
            applied = true;
        }
        self.register();
        Ok(count)
    }

    fn site(&self) -> ErrorSite {
        ErrorSite::new(Operation::Ddl, self.table.name())
    }

    /// Brings `known` to what the database looks like after a step.
    fn apply(&self, known: &mut TableDef, change: Change) {
        let same_name = |a: &ColumnDef, b: &ColumnDef| a.name.eq_ignore_ascii_case(&b.name);
        match change {
            Change::Create => {
                *known = self.table.clone();
                known.features = Default::default();
                known.indexes.clear();
                for column in &mut known.columns {
                    column.comment = Default::default();
                }
            }
            Change::Column(i) => {
                let mut column = self.table.columns[i].clone();
                let previous = known.columns.iter().find(|v| same_name(v, &column));
                column.primary_key = previous.is_some_and(|v| v.primary_key);
                column.comment = previous.map(|v| v.comment.clone()).unwrap_or_default();
                known.put_column(column);
            }
            Change::Comment(i) => {
                let column = &self.table.columns[i];
                if let Some(target) = known.columns.iter_mut().find(|v| same_name(v, column)) {
                    target.comment = column.comment.clone();
                }
            }
            Change::PrimaryKey => {
                for column in &mut known.columns {
                    column.primary_key = self
                        .table
                        .columns
                        .iter()
                        .any(|v| v.primary_key && same_name(v, column));
                }
            }
            Change::Index(i) => {
                let index = self.table.indexes[i].clone();
                known.indexes.retain(|v| v.name != index.name);
                known.indexes.push(index);
            }
        }
    }

    /// Part of the session that ran before a failure.
    fn register_applied(&mut self, known: Option<TableDef>, applied: bool) {
        if let Some(known) = known.filter(|_| applied) {
            log::warn!(
                "DDL of `{}` failed halfway, registering the statements that ran",
                self.table.name
            );
            self.database.put_table(known);
        }
    }

    /// Target columns first, then the known columns that were left untouched.
    fn register(&mut self) {
        let mut merged = self.table.clone();
        merged.features = Default::default();
        if let Some(current) = self.known() {
            for column in &current.columns {
                if merged.find_column(&column.name).is_none() {
                    merged.columns.push(column.clone());
                }
            }
            for index in &current.indexes {
                if !merged.indexes.iter().any(|v| v.name == index.name) {
                    merged.indexes.push(index.clone());
                }
            }
        }
        self.database.put_table(merged);
        self.state = DdlState::Committed;
    }
}
