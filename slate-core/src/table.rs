use crate::{ColumnDef, ErrorSite, FeatureRegistry, Operation, OrmError, Result};
use std::borrow::Cow;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

/// Index declaration, columns in index order with their direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    pub name: Cow<'static, str>,
    pub unique: bool,
    pub columns: Vec<(Cow<'static, str>, Order)>,
}

impl IndexDef {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            unique: false,
            columns: Vec::new(),
        }
    }
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
    pub fn column(mut self, name: impl Into<Cow<'static, str>>, order: Order) -> Self {
        self.columns.push((name.into(), order));
        self
    }
}

/// Columns shared by several tables (audit fields, ids), flattened into each [`TableDef`]
/// including it.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct FieldGroup {
    pub columns: Vec<ColumnDef>,
}

impl FieldGroup {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }
}

/// Table metadata: ordered columns, indexes and the table level feature registry.
#[derive(Default, Debug, Clone)]
pub struct TableDef {
    pub name: Cow<'static, str>,
    /// Empty means the current schema of the database.
    pub schema: Cow<'static, str>,
    pub columns: Vec<ColumnDef>,
    pub indexes: Vec<IndexDef>,
    pub features: FeatureRegistry,
}

impl TableDef {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
    pub fn schema(mut self, schema: impl Into<Cow<'static, str>>) -> Self {
        self.schema = schema.into();
        self
    }
    /// Adds a column, a column with the same name is replaced in place.
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.put_column(column);
        self
    }
    /// Flattens the columns of a field group into this table.
    pub fn include(mut self, group: &FieldGroup) -> Self {
        for column in &group.columns {
            self.put_column(column.clone());
        }
        self
    }
    pub fn index(mut self, index: IndexDef) -> Self {
        match self.indexes.iter_mut().find(|v| v.name == index.name) {
            Some(existing) => *existing = index,
            None => self.indexes.push(index),
        }
        self
    }

    pub fn put_column(&mut self, column: ColumnDef) {
        match self
            .columns
            .iter_mut()
            .find(|v| v.name.eq_ignore_ascii_case(&column.name))
        {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    /// Declares the primary key. Redeclaring the same set is accepted, a different one is not.
    pub fn set_primary_key(&mut self, columns: &[&str]) -> Result<()> {
        let site = || ErrorSite::new(Operation::Ddl, self.name.to_string());
        for name in columns {
            if self.find_column(name).is_none() {
                return Err(OrmError::metadata(
                    site().column(*name),
                    "primary key column is not declared",
                )
                .logged());
            }
        }
        let current: Vec<&str> = self.primary_key().map(|v| v.name()).collect();
        if !current.is_empty() {
            let same = current.len() == columns.len()
                && columns
                    .iter()
                    .all(|c| current.iter().any(|v| v.eq_ignore_ascii_case(c)));
            if same {
                return Ok(());
            }
            let error = OrmError::metadata(
                site(),
                format!(
                    "duplicate primary key declaration, ({}) is already declared",
                    current.join(", ")
                ),
            );
            return Err(error.logged());
        }
        for column in self.columns.iter_mut() {
            if columns.iter().any(|c| column.name.eq_ignore_ascii_case(c)) {
                column.primary_key = true;
                column.nullable = false;
            }
        }
        Ok(())
    }

    /// Builder flavor of [`TableDef::set_primary_key`].
    pub fn primary_key_of(mut self, columns: &[&str]) -> Result<Self> {
        self.set_primary_key(columns)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column by name (case insensitive) or by alias.
    pub fn find_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
            .or_else(|| self.columns.iter().find(|v| v.matches(name)))
    }

    pub fn column_or_err(&self, name: &str, operation: Operation) -> Result<&ColumnDef> {
        self.find_column(name).ok_or_else(|| {
            OrmError::metadata(
                ErrorSite::new(operation, self.name.to_string()).column(name),
                "column not found",
            )
            .logged()
        })
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|v| v.primary_key)
    }

    /// Checks the metadata invariants: unique column names, primary key columns not null.
    pub fn validate(&self) -> Result<()> {
        for (i, column) in self.columns.iter().enumerate() {
            let site = || ErrorSite::new(Operation::Ddl, self.name.to_string()).column(column.name());
            if self.columns[..i]
                .iter()
                .any(|v| v.name.eq_ignore_ascii_case(&column.name))
            {
                return Err(OrmError::metadata(site(), "duplicate column name").logged());
            }
            if column.primary_key && column.nullable {
                return Err(
                    OrmError::metadata(site(), "primary key column cannot be nullable").logged(),
                );
            }
        }
        for index in &self.indexes {
            for (name, ..) in &index.columns {
                self.column_or_err(name, Operation::Ddl)?;
            }
        }
        Ok(())
    }
}
