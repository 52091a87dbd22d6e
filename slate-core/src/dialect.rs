use crate::{
    ColumnDef, Condition, Context, DATE_FORMAT, Error, ErrorSite, IndexDef, Link, Operation,
    Operator, Order, OrmError, Predicate, Result, SqlRequest, TIME_FORMAT, TIMESTAMP_FORMAT,
    TableDef, Value, is_plain_identifier, possibly_parenthesized, separated_by,
    try_separated_by, write_integer,
};
use std::{
    borrow::Cow,
    fmt::{self, Debug, Write},
};
use time::format_description::well_known::Rfc3339;

macro_rules! write_float {
    ($this:ident, $out:ident, $value:expr) => {{
        if !$value.is_finite() {
            return Err(Error::msg(format!(
                "Cannot write the non finite literal {} in {}",
                $value,
                $this.name()
            )));
        }
        let mut buffer = ryu::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}

/// Words quoted even when they are plain identifiers. Sorted, uppercase.
pub const RESERVED_WORDS: &[&str] = &[
    "ALL",
    "ALTER",
    "AND",
    "ANY",
    "AS",
    "ASC",
    "BETWEEN",
    "BY",
    "CASE",
    "CHECK",
    "COLUMN",
    "CONSTRAINT",
    "CREATE",
    "CROSS",
    "DEFAULT",
    "DELETE",
    "DESC",
    "DISTINCT",
    "DROP",
    "ELSE",
    "END",
    "EXISTS",
    "FALSE",
    "FOR",
    "FOREIGN",
    "FROM",
    "FULL",
    "GROUP",
    "HAVING",
    "IN",
    "INDEX",
    "INNER",
    "INSERT",
    "INTO",
    "IS",
    "JOIN",
    "KEY",
    "LEFT",
    "LIKE",
    "LIMIT",
    "NOT",
    "NULL",
    "OFFSET",
    "ON",
    "OR",
    "ORDER",
    "OUTER",
    "PRIMARY",
    "REFERENCES",
    "RIGHT",
    "SELECT",
    "SET",
    "TABLE",
    "THEN",
    "TO",
    "TRUE",
    "UNION",
    "UNIQUE",
    "UPDATE",
    "USER",
    "USING",
    "VALUES",
    "WHEN",
    "WHERE",
    "WITH",
];

/// Backend rules turning metadata and operation intent into SQL text.
///
/// Every method has a default producing the generic, PostgreSQL flavored, output. A backend
/// overrides only what its database does differently. Values never end up in DML text: they
/// go through [`Dialect::write_param`], which records a positional parameter in the
/// [`Context`]. Literals are written only in DDL (`DEFAULT` clauses).
pub trait Dialect: Send + Sync {
    fn name(&self) -> &'static str;

    /// Sorted, uppercase.
    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn is_reserved(&self, name: &str) -> bool {
        let upper = name.to_ascii_uppercase();
        self.reserved_words()
            .binary_search(&upper.as_str())
            .is_ok()
    }

    /// Quote every identifier instead of only the ones that need it.
    fn quote_all_identifiers(&self) -> bool {
        false
    }

    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(
        &self,
        _context: &mut Context,
        out: &mut String,
        value: &str,
        search: char,
        replace: &str,
    ) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, context: &mut Context, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(context, out, value, '"', "\"\"");
        out.push('"');
    }

    /// Write the identifier, quoted when forced, reserved or not a plain identifier.
    fn write_identifier(&self, context: &mut Context, out: &mut String, value: &str) {
        if self.quote_all_identifiers() || self.is_reserved(value) || !is_plain_identifier(value)
        {
            self.write_identifier_quoted(context, out, value);
        } else {
            out.push_str(value);
        }
    }

    fn quote_identifier(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        self.write_identifier(&mut Context::default(), &mut out, name);
        out
    }

    fn write_table_ref(&self, context: &mut Context, out: &mut String, table: &TableDef) {
        if !table.schema.is_empty() {
            self.write_identifier(context, out, &table.schema);
            out.push('.');
        }
        self.write_identifier(context, out, &table.name);
    }

    fn write_column_ref(&self, context: &mut Context, out: &mut String, column: &ColumnDef) {
        self.write_identifier(context, out, &column.name);
    }

    /// Database type name of a semantic type. Fails on types the backend cannot store.
    fn map_type(
        &self,
        value: &Value,
        length: Option<u32>,
        precision: Option<(u8, u8)>,
    ) -> Result<Cow<'static, str>> {
        Ok(match value {
            Value::Boolean(..) => "BOOLEAN".into(),
            Value::Int8(..) | Value::Int16(..) | Value::UInt8(..) => "SMALLINT".into(),
            Value::Int32(..) | Value::UInt16(..) => "INTEGER".into(),
            Value::Int64(..) | Value::UInt32(..) => "BIGINT".into(),
            Value::UInt64(..) => "NUMERIC(20)".into(),
            Value::Float32(..) => "REAL".into(),
            Value::Float64(..) => "DOUBLE PRECISION".into(),
            Value::Decimal(.., p, s) => match precision.or((*p > 0).then_some((*p, *s))) {
                Some((p, s)) => format!("NUMERIC({},{})", p, s).into(),
                None => "NUMERIC".into(),
            },
            Value::Varchar(..) => match length {
                Some(length) => format!("VARCHAR({})", length).into(),
                None => "TEXT".into(),
            },
            Value::Blob(..) => "BYTEA".into(),
            Value::Date(..) => "DATE".into(),
            Value::Time(..) => "TIME".into(),
            Value::Timestamp(..) => "TIMESTAMP".into(),
            Value::TimestampWithTimezone(..) => "TIMESTAMP WITH TIME ZONE".into(),
            Value::Uuid(..) => "UUID".into(),
            Value::List(.., inner) => {
                format!("{}[]", self.map_type(inner, None, None)?).into()
            }
            Value::Null => {
                return Err(Error::msg(format!(
                    "Unsupported type {:?} in {}",
                    value,
                    self.name()
                )));
            }
        })
    }

    /// Database type of the column, the explicit override when present.
    fn column_type(&self, table: &TableDef, column: &ColumnDef) -> Result<Cow<'static, str>> {
        if !column.column_type.is_empty() {
            return Ok(column.column_type.clone());
        }
        self.map_type(&column.value, column.length, column.precision)
            .map_err(|e| {
                OrmError::metadata(
                    ErrorSite::new(Operation::Ddl, table.name()).column(column.name()),
                    format!("{:#}", e),
                )
                .logged()
            })
    }

    fn write_placeholder(&self, _context: &mut Context, out: &mut String, position: usize) {
        out.push('$');
        write_integer!(out, position);
    }

    /// Record a positional parameter and write its placeholder.
    fn write_param(
        &self,
        context: &mut Context,
        out: &mut String,
        value: Value,
        sql_type: Cow<'static, str>,
    ) {
        let position = context.push_param(value, sql_type);
        self.write_placeholder(context, out, position);
    }

    /// Render a literal, only used in DDL.
    fn write_value(&self, context: &mut Context, out: &mut String, value: &Value) -> Result<()> {
        match value {
            v if v.is_null() => out.push_str("NULL"),
            Value::Boolean(Some(v)) => self.write_value_bool(context, out, *v),
            Value::Int8(Some(v)) => write_integer!(out, *v),
            Value::Int16(Some(v)) => write_integer!(out, *v),
            Value::Int32(Some(v)) => write_integer!(out, *v),
            Value::Int64(Some(v)) => write_integer!(out, *v),
            Value::UInt8(Some(v)) => write_integer!(out, *v),
            Value::UInt16(Some(v)) => write_integer!(out, *v),
            Value::UInt32(Some(v)) => write_integer!(out, *v),
            Value::UInt64(Some(v)) => write_integer!(out, *v),
            Value::Float32(Some(v)) => write_float!(self, out, *v),
            Value::Float64(Some(v)) => write_float!(self, out, *v),
            Value::Decimal(Some(v), ..) => {
                let _ = write!(out, "{}", v);
            }
            Value::Varchar(Some(v)) => self.write_value_string(context, out, v),
            Value::Blob(Some(v)) => self.write_value_blob(context, out, v),
            Value::Date(Some(v)) => {
                let text = v.format(DATE_FORMAT)?;
                self.write_value_string(context, out, &text);
            }
            Value::Time(Some(v)) => {
                let text = v.format(TIME_FORMAT)?;
                self.write_value_string(context, out, &text);
            }
            Value::Timestamp(Some(v)) => {
                let text = v.format(TIMESTAMP_FORMAT)?;
                self.write_value_string(context, out, &text);
            }
            Value::TimestampWithTimezone(Some(v)) => {
                let text = v.format(&Rfc3339)?;
                self.write_value_string(context, out, &text);
            }
            Value::Uuid(Some(v)) => {
                let _ = write!(out, "'{}'", v);
            }
            _ => {
                return Err(Error::msg(format!(
                    "Cannot write the literal {:?} in {}",
                    value,
                    self.name()
                )));
            }
        }
        Ok(())
    }

    fn write_value_bool(&self, _context: &mut Context, out: &mut String, value: bool) {
        out.push_str(if value { "TRUE" } else { "FALSE" });
    }

    /// Single quoted string, inner quotes doubled.
    fn write_value_string(&self, context: &mut Context, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(context, out, value, '\'', "''");
        out.push('\'');
    }

    fn write_value_blob(&self, _context: &mut Context, out: &mut String, value: &[u8]) {
        out.push_str("X'");
        for b in value {
            let _ = write!(out, "{:02X}", b);
        }
        out.push('\'');
    }

    /// Row window of a query, `offset` rows skipped and at most `limit` returned.
    fn write_paging(&self, _context: &mut Context, out: &mut String, offset: u64, limit: u64) {
        out.push_str("LIMIT ");
        write_integer!(out, limit);
        if offset > 0 {
            out.push_str(" OFFSET ");
            write_integer!(out, offset);
        }
    }

    /// One INSERT with many rows, otherwise one statement per row.
    fn supports_multi_row_insert(&self) -> bool {
        true
    }

    /// Append the upsert clause to an INSERT. Returns `false` (writing nothing) when the
    /// backend has no native upsert.
    fn write_upsert(
        &self,
        context: &mut Context,
        out: &mut String,
        _table: &TableDef,
        columns: &[&ColumnDef],
        conflict: &[&ColumnDef],
    ) -> Result<bool> {
        out.push_str("\nON CONFLICT (");
        separated_by(
            out,
            conflict,
            |out, v| self.write_column_ref(context, out, v),
            ", ",
        );
        out.push(')');
        let mut update = columns
            .iter()
            .filter(|c| !conflict.iter().any(|k| k.name == c.name))
            .peekable();
        if update.peek().is_none() {
            out.push_str(" DO NOTHING");
            return Ok(true);
        }
        out.push_str(" DO UPDATE SET\n");
        separated_by(
            out,
            update,
            |out, v| {
                self.write_column_ref(context, out, v);
                out.push_str(" = EXCLUDED.");
                self.write_column_ref(context, out, v);
            },
            ",\n",
        );
        Ok(true)
    }

    /// Write a condition tree. Nested groups with more than one child are parenthesized,
    /// an empty group is a compile error.
    fn write_condition(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableDef,
        condition: &Condition,
    ) -> Result<()> {
        let children = match condition {
            Condition::Leaf(predicate) => {
                return self.write_predicate(context, out, table, predicate);
            }
            Condition::Group(children) => children,
        };
        if children.is_empty() {
            return Err(OrmError::compile(
                ErrorSite::new(context.operation, table.name()),
                "empty condition group",
            )
            .logged());
        }
        let start = out.len();
        let mut previous = None;
        for (i, (link, child)) in children.iter().enumerate() {
            if i > 0 {
                if previous.is_some_and(|v| v != *link) {
                    out.insert(start, '(');
                    out.push(')');
                }
                out.push_str(match link {
                    Link::And => " AND ",
                    Link::Or => " OR ",
                });
                previous = Some(*link);
            }
            let nested = matches!(child, Condition::Group(v) if v.len() > 1);
            possibly_parenthesized!(
                out,
                nested,
                self.write_condition(context, out, table, child)?
            );
        }
        Ok(())
    }

    fn write_predicate(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableDef,
        predicate: &Predicate,
    ) -> Result<()> {
        let column = table.column_or_err(&predicate.column, context.operation)?;
        let site = || ErrorSite::new(context.operation, table.name()).column(column.name());
        let mut operator = predicate.operator;
        let values = &predicate.values;
        match operator.arity() {
            Some(n) if n != values.len() => {
                return Err(OrmError::compile(
                    site(),
                    format!(
                        "operator {:?} expects {} values, got {}",
                        operator,
                        n,
                        values.len()
                    ),
                )
                .logged());
            }
            None if values.is_empty() => {
                return Err(OrmError::compile(site(), "empty IN list").logged());
            }
            _ => {}
        }
        if values.len() == 1 && values[0].is_null() {
            operator = match operator {
                Operator::Equal => Operator::IsNull,
                Operator::NotEqual => Operator::IsNotNull,
                _ => {
                    return Err(OrmError::compile(
                        site(),
                        format!("operator {:?} cannot compare with NULL", operator),
                    )
                    .logged());
                }
            };
        }
        let sql_type = self.column_type(table, column)?;
        self.write_column_ref(context, out, column);
        let mut param = |out: &mut String, value: &Value| {
            self.write_param(context, out, value.clone(), sql_type.clone())
        };
        match operator {
            Operator::IsNull => out.push_str(" IS NULL"),
            Operator::IsNotNull => out.push_str(" IS NOT NULL"),
            Operator::Between | Operator::NotBetween => {
                out.push_str(if operator == Operator::Between {
                    " BETWEEN "
                } else {
                    " NOT BETWEEN "
                });
                param(out, &values[0]);
                out.push_str(" AND ");
                param(out, &values[1]);
            }
            Operator::In | Operator::NotIn => {
                out.push_str(if operator == Operator::In {
                    " IN ("
                } else {
                    " NOT IN ("
                });
                separated_by(out, values, |out, v| param(out, v), ", ");
                out.push(')');
            }
            _ => {
                out.push_str(match operator {
                    Operator::Equal => " = ",
                    Operator::NotEqual => " != ",
                    Operator::Less => " < ",
                    Operator::LessEqual => " <= ",
                    Operator::Greater => " > ",
                    Operator::GreaterEqual => " >= ",
                    Operator::Like => " LIKE ",
                    _ => " NOT LIKE ",
                });
                param(out, &values[0]);
            }
        }
        Ok(())
    }

    fn write_where(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableDef,
        condition: Option<&Condition>,
    ) -> Result<()> {
        if let Some(condition) = condition {
            out.push_str("\nWHERE ");
            self.write_condition(context, out, table, condition)?;
        }
        Ok(())
    }

    /// Multi row INSERT, `rows` are aligned with `columns`.
    fn write_insert(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableDef,
        columns: &[&ColumnDef],
        rows: &[Vec<Value>],
    ) -> Result<()> {
        let types = columns
            .iter()
            .map(|c| self.column_type(table, c))
            .collect::<Result<Vec<_>>>()?;
        out.push_str("INSERT INTO ");
        self.write_table_ref(context, out, table);
        out.push_str(" (");
        separated_by(
            out,
            columns,
            |out, v| self.write_column_ref(context, out, v),
            ", ",
        );
        out.push_str(") VALUES\n");
        separated_by(
            out,
            rows,
            |out, row| {
                out.push('(');
                separated_by(
                    out,
                    row.iter().zip(types.iter()),
                    |out, (value, sql_type)| {
                        self.write_param(context, out, value.clone(), sql_type.clone())
                    },
                    ", ",
                );
                out.push(')');
            },
            ",\n",
        );
        Ok(())
    }

    fn write_update(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableDef,
        assignments: &[(&ColumnDef, Value)],
        condition: Option<&Condition>,
    ) -> Result<()> {
        out.push_str("UPDATE ");
        self.write_table_ref(context, out, table);
        out.push_str("\nSET ");
        try_separated_by(
            out,
            assignments,
            |out, (column, value)| {
                let sql_type = self.column_type(table, column)?;
                self.write_column_ref(context, out, column);
                out.push_str(" = ");
                self.write_param(context, out, value.clone(), sql_type);
                Ok::<_, Error>(())
            },
            ", ",
        )?;
        self.write_where(context, out, table, condition)
    }

    fn write_delete(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableDef,
        condition: Option<&Condition>,
    ) -> Result<()> {
        out.push_str("DELETE FROM ");
        self.write_table_ref(context, out, table);
        self.write_where(context, out, table, condition)
    }

    /// SELECT with optional filter, sort and `(offset, limit)` window.
    fn write_select(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableDef,
        columns: &[&ColumnDef],
        condition: Option<&Condition>,
        order: &[(&ColumnDef, Order)],
        paging: Option<(u64, u64)>,
    ) -> Result<()> {
        out.push_str("SELECT ");
        separated_by(
            out,
            columns,
            |out, v| self.write_column_ref(context, out, v),
            ", ",
        );
        out.push_str("\nFROM ");
        self.write_table_ref(context, out, table);
        self.write_where(context, out, table, condition)?;
        if !order.is_empty() {
            out.push_str("\nORDER BY ");
            separated_by(
                out,
                order,
                |out, (column, order)| {
                    self.write_column_ref(context, out, column);
                    out.push_str(match order {
                        Order::Asc => " ASC",
                        Order::Desc => " DESC",
                    });
                },
                ", ",
            );
        }
        if let Some((offset, limit)) = paging {
            out.push('\n');
            self.write_paging(context, out, offset, limit);
        }
        Ok(())
    }

    fn write_count(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableDef,
        condition: Option<&Condition>,
    ) -> Result<()> {
        out.push_str("SELECT COUNT(*) AS total\nFROM ");
        self.write_table_ref(context, out, table);
        self.write_where(context, out, table, condition)
    }

    /// `name TYPE [NOT NULL] [DEFAULT literal] [PRIMARY KEY]`.
    fn write_column_def(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableDef,
        column: &ColumnDef,
        inline_primary_key: bool,
    ) -> Result<()> {
        self.write_column_ref(context, out, column);
        out.push(' ');
        out.push_str(&self.column_type(table, column)?);
        if !column.nullable && !inline_primary_key {
            out.push_str(" NOT NULL");
        }
        if let Some(default) = &column.default {
            out.push_str(" DEFAULT ");
            self.write_value(context, out, default).map_err(|e| {
                OrmError::metadata(
                    ErrorSite::new(Operation::Ddl, table.name()).column(column.name()),
                    format!("{:#}", e),
                )
                .logged()
            })?;
        }
        if inline_primary_key {
            out.push_str(" PRIMARY KEY");
        }
        self.write_column_comment_inline(context, out, column);
        Ok(())
    }

    /// Comment inside the column definition, for backends without `COMMENT ON`.
    fn write_column_comment_inline(
        &self,
        _context: &mut Context,
        _out: &mut String,
        _column: &ColumnDef,
    ) {
    }

    /// CREATE TABLE with the columns and the primary key. Comments and indexes are separate
    /// statements, see [`Dialect::write_comment`] and [`Dialect::write_create_index`].
    fn write_create_table(&self, table: &TableDef, out: &mut Vec<SqlRequest>) -> Result<()> {
        let mut context = Context::new(Operation::Ddl);
        let mut sql = String::with_capacity(128);
        let primary_key = table.primary_key().collect::<Vec<_>>();
        sql.push_str("CREATE TABLE IF NOT EXISTS ");
        self.write_table_ref(&mut context, &mut sql, table);
        sql.push_str(" (\n");
        try_separated_by(
            &mut sql,
            &table.columns,
            |out, column| {
                let inline = primary_key.len() == 1 && column.primary_key;
                self.write_column_def(&mut context, out, table, column, inline)
            },
            ",\n",
        )?;
        if primary_key.len() > 1 {
            sql.push_str(",\nPRIMARY KEY (");
            separated_by(
                &mut sql,
                &primary_key,
                |out, v| self.write_column_ref(&mut context, out, v),
                ", ",
            );
            sql.push(')');
        }
        sql.push_str("\n)");
        out.push(context.into_request(sql));
        Ok(())
    }

    fn write_add_column(
        &self,
        table: &TableDef,
        column: &ColumnDef,
        out: &mut Vec<SqlRequest>,
    ) -> Result<()> {
        let mut context = Context::new(Operation::Ddl);
        let mut sql = String::with_capacity(64);
        sql.push_str("ALTER TABLE ");
        self.write_table_ref(&mut context, &mut sql, table);
        sql.push_str(" ADD COLUMN ");
        self.write_column_def(&mut context, &mut sql, table, column, false)?;
        out.push(context.into_request(sql));
        Ok(())
    }

    /// Bring `previous` to the shape of `column`. Writes nothing if the SQL is the same.
    fn write_alter_column(
        &self,
        table: &TableDef,
        previous: &ColumnDef,
        column: &ColumnDef,
        out: &mut Vec<SqlRequest>,
    ) -> Result<()> {
        let mut context = Context::new(Operation::Ddl);
        let mut actions = Vec::new();
        let column_type = self.column_type(table, column)?;
        if column_type != self.column_type(table, previous)? {
            actions.push(format!("TYPE {}", column_type));
        }
        if column.nullable != previous.nullable {
            actions.push(if column.nullable {
                "DROP NOT NULL".to_string()
            } else {
                "SET NOT NULL".to_string()
            });
        }
        if column.default != previous.default {
            match &column.default {
                Some(default) => {
                    let mut action = "SET DEFAULT ".to_string();
                    self.write_value(&mut context, &mut action, default)?;
                    actions.push(action);
                }
                None => actions.push("DROP DEFAULT".to_string()),
            }
        }
        if actions.is_empty() {
            return Ok(());
        }
        let mut sql = String::with_capacity(64);
        sql.push_str("ALTER TABLE ");
        self.write_table_ref(&mut context, &mut sql, table);
        sql.push(' ');
        let mut name = String::new();
        self.write_column_ref(&mut context, &mut name, column);
        separated_by(
            &mut sql,
            actions,
            |out, action| {
                let _ = write!(out, "ALTER COLUMN {} {}", name, action);
            },
            ",\n",
        );
        out.push(context.into_request(sql));
        Ok(())
    }

    fn write_add_primary_key(&self, table: &TableDef, out: &mut Vec<SqlRequest>) -> Result<()> {
        let mut context = Context::new(Operation::Ddl);
        let mut sql = String::with_capacity(64);
        sql.push_str("ALTER TABLE ");
        self.write_table_ref(&mut context, &mut sql, table);
        sql.push_str(" ADD PRIMARY KEY (");
        separated_by(
            &mut sql,
            table.primary_key(),
            |out, v| self.write_column_ref(&mut context, out, v),
            ", ",
        );
        sql.push(')');
        out.push(context.into_request(sql));
        Ok(())
    }

    fn write_create_index(
        &self,
        table: &TableDef,
        index: &IndexDef,
        out: &mut Vec<SqlRequest>,
    ) -> Result<()> {
        let mut context = Context::new(Operation::Ddl);
        let mut sql = String::with_capacity(64);
        sql.push_str(if index.unique {
            "CREATE UNIQUE INDEX IF NOT EXISTS "
        } else {
            "CREATE INDEX IF NOT EXISTS "
        });
        self.write_identifier(&mut context, &mut sql, &index.name);
        sql.push_str(" ON ");
        self.write_table_ref(&mut context, &mut sql, table);
        sql.push_str(" (");
        try_separated_by(
            &mut sql,
            &index.columns,
            |out, (name, order)| {
                let column = table.column_or_err(name, Operation::Ddl)?;
                self.write_column_ref(&mut context, out, column);
                out.push_str(match order {
                    Order::Asc => " ASC",
                    Order::Desc => " DESC",
                });
                Ok::<_, Error>(())
            },
            ", ",
        )?;
        sql.push(')');
        out.push(context.into_request(sql));
        Ok(())
    }

    fn write_comment(
        &self,
        table: &TableDef,
        column: &ColumnDef,
        out: &mut Vec<SqlRequest>,
    ) -> Result<()> {
        let mut context = Context::new(Operation::Ddl);
        let mut sql = String::with_capacity(64);
        sql.push_str("COMMENT ON COLUMN ");
        self.write_table_ref(&mut context, &mut sql, table);
        sql.push('.');
        self.write_column_ref(&mut context, &mut sql, column);
        sql.push_str(" IS ");
        self.write_value_string(&mut context, &mut sql, &column.comment);
        out.push(context.into_request(sql));
        Ok(())
    }
}

impl Debug for dyn Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dialect({})", self.name())
    }
}

/// Reference dialect, PostgreSQL flavored.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericDialect;

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}
