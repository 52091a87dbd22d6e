use crate::{
    DEFAULT_CHUNK_SIZE, DdlBuilder, DeleteBuilder, Dialect, ErrorSite, Feature, FeatureRegistry,
    GenericDialect, InsertBuilder, Operation, OrmError, QueryBuilder, Result, TableDef,
    UpdateBuilder,
};
use std::{collections::BTreeMap, sync::Arc};

/// Named container of tables.
#[derive(Default, Debug, Clone)]
pub struct Schema {
    pub name: String,
    tables: BTreeMap<String, Arc<TableDef>>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: BTreeMap::new(),
        }
    }
    pub fn find_table(&self, name: &str) -> Option<&Arc<TableDef>> {
        self.tables.get(&name.to_ascii_lowercase())
    }
    pub fn tables(&self) -> impl Iterator<Item = &Arc<TableDef>> {
        self.tables.values()
    }
    fn put_table(&mut self, table: TableDef) -> Arc<TableDef> {
        let table = Arc::new(table);
        self.tables
            .insert(table.name.to_ascii_lowercase(), table.clone());
        table
    }
}

/// Root of the metadata model: schemas, tables and the database level features.
///
/// Built once at startup and read-shared afterwards. Schema changes go through
/// [`Database::create_or_alter`], which needs exclusive access: DDL and DML on the same table
/// are not synchronized by the engine.
#[derive(Debug)]
pub struct Database {
    current_schema: String,
    schemas: BTreeMap<String, Schema>,
    pub features: FeatureRegistry,
}

impl Database {
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self::with_dialect(Arc::new(dialect))
    }

    pub fn with_dialect(dialect: Arc<dyn Dialect>) -> Self {
        let features = FeatureRegistry::new();
        features.add_feature(Feature::Dialect(dialect));
        let mut schemas = BTreeMap::new();
        schemas.insert(String::new(), Schema::default());
        Self {
            current_schema: String::new(),
            schemas,
            features,
        }
    }

    pub fn dialect(&self) -> Arc<dyn Dialect> {
        self.features
            .dialect()
            .unwrap_or_else(|| Arc::new(GenericDialect))
    }

    /// Rows per batch chunk: the registered [`Feature::ChunkSize`] or [`DEFAULT_CHUNK_SIZE`].
    pub fn chunk_size(&self) -> usize {
        self.features.chunk_size().unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    pub fn current_schema(&self) -> &str {
        &self.current_schema
    }

    pub fn set_current_schema(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.add_schema(name.clone());
        self.current_schema = name;
    }

    /// Returns the existing schema with this name or a new empty one.
    pub fn add_schema(&mut self, name: impl Into<String>) -> &mut Schema {
        let name = name.into();
        self.schemas
            .entry(name.clone())
            .or_insert_with(|| Schema::new(name))
    }

    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Registers a table, replacing the one with the same name.
    pub fn add_table(&mut self, table: TableDef) -> Result<Arc<TableDef>> {
        table.validate()?;
        Ok(self.put_table(table))
    }

    pub(crate) fn put_table(&mut self, table: TableDef) -> Arc<TableDef> {
        let schema = if table.schema.is_empty() {
            self.current_schema.clone()
        } else {
            table.schema.to_string()
        };
        self.add_schema(schema).put_table(table)
    }

    /// `None` schema means the current schema.
    pub fn find_table(&self, schema: Option<&str>, name: &str) -> Option<Arc<TableDef>> {
        let schema = schema.unwrap_or(self.current_schema.as_str());
        self.schemas.get(schema)?.find_table(name).cloned()
    }

    /// Table by name, `schema.table` selects another schema.
    pub fn table(&self, name: &str) -> Result<Arc<TableDef>> {
        let found = match name.split_once('.') {
            Some((schema, table)) => self.find_table(Some(schema), table),
            None => self.find_table(None, name),
        };
        found.ok_or_else(|| {
            OrmError::metadata(ErrorSite::new(Operation::Query, name), "table not found").logged()
        })
    }

    /// Start a create or alter session of `table` against the known definition.
    pub fn create_or_alter(&mut self, table: TableDef) -> DdlBuilder<'_> {
        DdlBuilder::new(self, table)
    }

    pub fn insert(&self, table: &str) -> Result<InsertBuilder> {
        Ok(InsertBuilder::new(self.table(table)?, self.dialect()))
    }

    pub fn update(&self, table: &str) -> Result<UpdateBuilder> {
        Ok(UpdateBuilder::new(self.table(table)?, self.dialect()))
    }

    pub fn delete(&self, table: &str) -> Result<DeleteBuilder> {
        Ok(DeleteBuilder::new(self.table(table)?, self.dialect()))
    }

    pub fn query(&self, table: &str) -> Result<QueryBuilder> {
        Ok(QueryBuilder::new(self.table(table)?, self.dialect()))
    }
}
