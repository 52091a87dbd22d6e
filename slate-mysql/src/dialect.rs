use slate_core::{
    ColumnDef, Context, Dialect, Error, IndexDef, Operation, Order, Result, SqlRequest,
    TableDef, Value, separated_by, try_separated_by, write_integer,
};
use std::borrow::Cow;

/// MySQL reserved words. Sorted, uppercase.
pub const MYSQL_RESERVED_WORDS: &[&str] = &[
    "ACCESSIBLE",
    "ALL",
    "ALTER",
    "ANALYZE",
    "AND",
    "ANY",
    "AS",
    "ASC",
    "BEFORE",
    "BETWEEN",
    "BIGINT",
    "BINARY",
    "BLOB",
    "BOTH",
    "BY",
    "CALL",
    "CASCADE",
    "CASE",
    "CHANGE",
    "CHAR",
    "CHARACTER",
    "CHECK",
    "COLLATE",
    "COLUMN",
    "CONDITION",
    "CONSTRAINT",
    "CONVERT",
    "CREATE",
    "CROSS",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "DATABASE",
    "DATABASES",
    "DECIMAL",
    "DECLARE",
    "DEFAULT",
    "DELETE",
    "DESC",
    "DESCRIBE",
    "DISTINCT",
    "DIV",
    "DOUBLE",
    "DROP",
    "DUAL",
    "EACH",
    "ELSE",
    "ELSEIF",
    "END",
    "ESCAPED",
    "EXISTS",
    "EXIT",
    "EXPLAIN",
    "FALSE",
    "FETCH",
    "FLOAT",
    "FOR",
    "FORCE",
    "FOREIGN",
    "FROM",
    "FULL",
    "FULLTEXT",
    "GENERATED",
    "GRANT",
    "GROUP",
    "GROUPS",
    "HAVING",
    "IF",
    "IGNORE",
    "IN",
    "INDEX",
    "INNER",
    "INOUT",
    "INSERT",
    "INT",
    "INTEGER",
    "INTERVAL",
    "INTO",
    "IS",
    "ITERATE",
    "JOIN",
    "KEY",
    "KEYS",
    "KILL",
    "LEADING",
    "LEAVE",
    "LEFT",
    "LIKE",
    "LIMIT",
    "LINES",
    "LOAD",
    "LOCK",
    "LONG",
    "LOOP",
    "MATCH",
    "MOD",
    "MODIFIES",
    "NATURAL",
    "NOT",
    "NULL",
    "NUMERIC",
    "OFFSET",
    "ON",
    "OPTIMIZE",
    "OPTION",
    "OR",
    "ORDER",
    "OUT",
    "OUTER",
    "PARTITION",
    "PRECISION",
    "PRIMARY",
    "PROCEDURE",
    "PURGE",
    "RANGE",
    "RANK",
    "READ",
    "REAL",
    "RECURSIVE",
    "REFERENCES",
    "REGEXP",
    "RELEASE",
    "RENAME",
    "REPEAT",
    "REPLACE",
    "REQUIRE",
    "RESTRICT",
    "RETURN",
    "REVOKE",
    "RIGHT",
    "RLIKE",
    "ROW",
    "ROWS",
    "SCHEMA",
    "SCHEMAS",
    "SELECT",
    "SEPARATOR",
    "SET",
    "SHOW",
    "SIGNAL",
    "SMALLINT",
    "SPATIAL",
    "SQL",
    "STARTING",
    "STORED",
    "SYSTEM",
    "TABLE",
    "TERMINATED",
    "THEN",
    "TINYINT",
    "TO",
    "TRAILING",
    "TRIGGER",
    "TRUE",
    "UNDO",
    "UNION",
    "UNIQUE",
    "UNLOCK",
    "UNSIGNED",
    "UPDATE",
    "USAGE",
    "USER",
    "USING",
    "UTC_DATE",
    "VALUES",
    "VARBINARY",
    "VARCHAR",
    "VIRTUAL",
    "WHEN",
    "WHERE",
    "WHILE",
    "WINDOW",
    "WITH",
    "WRITE",
    "XOR",
    "ZEROFILL",
];

/// MySQL flavor.
///
/// Backtick quoting, `?` placeholders, `LIMIT offset, count`, `ON DUPLICATE KEY UPDATE` and
/// column changes through `MODIFY COLUMN`. Column comments are part of the column definition.
#[derive(Default, Debug, Clone, Copy)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        MYSQL_RESERVED_WORDS
    }

    fn write_identifier_quoted(&self, context: &mut Context, out: &mut String, value: &str) {
        out.push('`');
        self.write_escaped(context, out, value, '`', "``");
        out.push('`');
    }

    fn map_type(
        &self,
        value: &Value,
        length: Option<u32>,
        precision: Option<(u8, u8)>,
    ) -> Result<Cow<'static, str>> {
        Ok(match value {
            Value::Boolean(..) => "TINYINT(1)".into(),
            Value::Int8(..) => "TINYINT".into(),
            Value::Int16(..) => "SMALLINT".into(),
            Value::Int32(..) => "INT".into(),
            Value::Int64(..) => "BIGINT".into(),
            Value::UInt8(..) => "TINYINT UNSIGNED".into(),
            Value::UInt16(..) => "SMALLINT UNSIGNED".into(),
            Value::UInt32(..) => "INT UNSIGNED".into(),
            Value::UInt64(..) => "BIGINT UNSIGNED".into(),
            Value::Float32(..) => "FLOAT".into(),
            Value::Float64(..) => "DOUBLE".into(),
            Value::Decimal(.., p, s) => match precision.or((*p > 0).then_some((*p, *s))) {
                Some((p, s)) => format!("DECIMAL({},{})", p, s).into(),
                None => "DECIMAL(38,10)".into(),
            },
            Value::Varchar(..) => match length {
                Some(length) => format!("VARCHAR({})", length).into(),
                None => "TEXT".into(),
            },
            Value::Blob(..) => match length {
                Some(length) => format!("VARBINARY({})", length).into(),
                None => "BLOB".into(),
            },
            Value::Date(..) => "DATE".into(),
            Value::Time(..) => "TIME(6)".into(),
            Value::Timestamp(..) | Value::TimestampWithTimezone(..) => "DATETIME(6)".into(),
            Value::Uuid(..) => "CHAR(36)".into(),
            Value::List(..) | Value::Null => {
                return Err(Error::msg(format!("Unsupported type {:?} in mysql", value)));
            }
        })
    }

    fn write_placeholder(&self, _context: &mut Context, out: &mut String, _position: usize) {
        out.push('?');
    }

    /// Quotes doubled and backslashes escaped, MySQL reads `\` as an escape in literals.
    fn write_value_string(&self, _context: &mut Context, out: &mut String, value: &str) {
        out.push('\'');
        for c in value.chars() {
            match c {
                '\'' => out.push_str("''"),
                '\\' => out.push_str("\\\\"),
                c => out.push(c),
            }
        }
        out.push('\'');
    }

    fn write_paging(&self, _context: &mut Context, out: &mut String, offset: u64, limit: u64) {
        out.push_str("LIMIT ");
        if offset > 0 {
            write_integer!(out, offset);
            out.push_str(", ");
        }
        write_integer!(out, limit);
    }

    fn write_upsert(
        &self,
        context: &mut Context,
        out: &mut String,
        _table: &TableDef,
        columns: &[&ColumnDef],
        conflict: &[&ColumnDef],
    ) -> Result<bool> {
        out.push_str("\nON DUPLICATE KEY UPDATE\n");
        let update = columns
            .iter()
            .filter(|c| !conflict.iter().any(|k| k.name == c.name))
            .collect::<Vec<_>>();
        // Nothing to update, assigning the key to itself keeps the row as it is
        let update = if update.is_empty() {
            conflict.iter().collect()
        } else {
            update
        };
        separated_by(
            out,
            update,
            |out, v| {
                self.write_column_ref(context, out, v);
                out.push_str(" = VALUES(");
                self.write_column_ref(context, out, v);
                out.push(')');
            },
            ",\n",
        );
        Ok(true)
    }

    fn write_column_comment_inline(
        &self,
        context: &mut Context,
        out: &mut String,
        column: &ColumnDef,
    ) {
        if !column.comment.is_empty() {
            out.push_str(" COMMENT ");
            self.write_value_string(context, out, &column.comment);
        }
    }

    /// Replaces the whole column definition, comment included.
    fn write_alter_column(
        &self,
        table: &TableDef,
        _previous: &ColumnDef,
        column: &ColumnDef,
        out: &mut Vec<SqlRequest>,
    ) -> Result<()> {
        let mut context = Context::new(Operation::Ddl);
        let mut sql = String::with_capacity(64);
        sql.push_str("ALTER TABLE ");
        self.write_table_ref(&mut context, &mut sql, table);
        sql.push_str(" MODIFY COLUMN ");
        self.write_column_def(&mut context, &mut sql, table, column, false)?;
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
            "CREATE UNIQUE INDEX "
        } else {
            "CREATE INDEX "
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

    /// Comments are written inline with the column definition.
    fn write_comment(
        &self,
        _table: &TableDef,
        _column: &ColumnDef,
        _out: &mut Vec<SqlRequest>,
    ) -> Result<()> {
        Ok(())
    }
}
