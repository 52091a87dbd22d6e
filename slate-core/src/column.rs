use crate::{AsValue, Value};
use std::borrow::Cow;

/// Declarative specification of a table column.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name in the database.
    pub name: Cow<'static, str>,
    /// Property name of the mapped entity, the column name when empty.
    pub alias: Cow<'static, str>,
    /// `Value` prototype describing the semantic type.
    pub value: Value,
    /// Explicit SQL type override (empty => mapped from `value` by the dialect).
    pub column_type: Cow<'static, str>,
    pub length: Option<u32>,
    /// Precision and scale.
    pub precision: Option<(u8, u8)>,
    pub nullable: bool,
    pub primary_key: bool,
    /// Literal default, rendered inline in DDL.
    pub default: Option<Value>,
    pub comment: Cow<'static, str>,
}

impl ColumnDef {
    /// Nullable column whose semantic type is taken from `value` (only its variant matters).
    pub fn new(name: impl Into<Cow<'static, str>>, value: Value) -> Self {
        Self {
            name: name.into(),
            value: value.as_type(),
            nullable: true,
            ..Default::default()
        }
    }
    /// Column with the semantic type of a Rust type.
    pub fn of<T: AsValue>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, T::as_empty_value())
    }
    pub fn alias(mut self, alias: impl Into<Cow<'static, str>>) -> Self {
        self.alias = alias.into();
        self
    }
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
    pub fn precision(mut self, precision: u8, scale: u8) -> Self {
        self.precision = Some((precision, scale));
        self
    }
    pub fn column_type(mut self, column_type: impl Into<Cow<'static, str>>) -> Self {
        self.column_type = column_type.into();
        self
    }
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
    /// Primary key columns are never nullable.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
    pub fn comment(mut self, comment: impl Into<Cow<'static, str>>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    /// Name of the entity property this column maps to.
    pub fn property(&self) -> &str {
        if self.alias.is_empty() {
            &self.name
        } else {
            &self.alias
        }
    }
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) || (!self.alias.is_empty() && self.alias == name)
    }
    /// Whether the database shape differs (type, length, precision, nullability).
    pub fn differs_from(&self, other: &ColumnDef) -> bool {
        !self.value.same_type(&other.value)
            || !self.column_type.eq_ignore_ascii_case(&other.column_type)
            || self.length != other.length
            || self.precision != other.precision
            || self.nullable != other.nullable
    }
}
