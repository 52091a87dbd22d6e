use slate_core::{
    ColumnDef, Context, Dialect, Error, ErrorSite, Operation, OrmError, Result, SqlRequest,
    TableDef, Value,
};
use std::borrow::Cow;

/// SQLite flavor: `?` placeholders, storage classes as column types, no `ALTER COLUMN`.
#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn map_type(
        &self,
        value: &Value,
        length: Option<u32>,
        _precision: Option<(u8, u8)>,
    ) -> Result<Cow<'static, str>> {
        Ok(match value {
            Value::Boolean(..)
            | Value::Int8(..)
            | Value::Int16(..)
            | Value::Int32(..)
            | Value::Int64(..)
            | Value::UInt8(..)
            | Value::UInt16(..)
            | Value::UInt32(..)
            | Value::UInt64(..) => "INTEGER".into(),
            Value::Float32(..) | Value::Float64(..) => "REAL".into(),
            Value::Varchar(..) => match length {
                Some(length) => format!("VARCHAR({})", length).into(),
                None => "TEXT".into(),
            },
            Value::Blob(..) => "BLOB".into(),
            // Text affinity keeps every digit of a decimal, precision lives in the metadata
            Value::Decimal(..)
            | Value::Date(..)
            | Value::Time(..)
            | Value::Timestamp(..)
            | Value::TimestampWithTimezone(..)
            | Value::Uuid(..) => "TEXT".into(),
            Value::List(..) | Value::Null => {
                return Err(Error::msg(format!(
                    "Unsupported type {:?} in sqlite",
                    value
                )));
            }
        })
    }

    fn write_placeholder(&self, _context: &mut Context, out: &mut String, _position: usize) {
        out.push('?');
    }

    fn write_alter_column(
        &self,
        table: &TableDef,
        _previous: &ColumnDef,
        column: &ColumnDef,
        _out: &mut Vec<SqlRequest>,
    ) -> Result<()> {
        Err(OrmError::metadata(
            ErrorSite::new(Operation::Ddl, table.name()).column(column.name()),
            "sqlite cannot alter an existing column",
        )
        .logged())
    }

    fn write_add_primary_key(&self, table: &TableDef, _out: &mut Vec<SqlRequest>) -> Result<()> {
        Err(OrmError::metadata(
            ErrorSite::new(Operation::Ddl, table.name()),
            "sqlite cannot add a primary key to an existing table",
        )
        .logged())
    }

    /// SQLite has no column comments, they only live in the metadata.
    fn write_comment(
        &self,
        _table: &TableDef,
        column: &ColumnDef,
        _out: &mut Vec<SqlRequest>,
    ) -> Result<()> {
        log::debug!("Skipping the comment of column `{}` in sqlite", column.name());
        Ok(())
    }
}
