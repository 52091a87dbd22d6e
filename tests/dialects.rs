#[cfg(test)]
mod tests {
    use indoc::indoc;
    use slate::{ColumnDef, Condition, Database, Dialect, GenericDialect, Order, TableDef, Value};
    use slate_mysql::MySqlDialect;
    use slate_sqlite::SqliteDialect;
    use std::sync::Arc;

    fn database(dialect: Arc<dyn Dialect>) -> Database {
        let mut database = Database::with_dialect(dialect);
        database
            .add_table(
                TableDef::new("line")
                    .column(ColumnDef::of::<i64>("id").primary_key())
                    .column(ColumnDef::of::<String>("key").length(20)),
            )
            .unwrap();
        database
    }

    #[test]
    fn same_query_every_dialect() {
        let cases: [(Arc<dyn Dialect>, &str, &str); 3] = [
            (
                Arc::new(GenericDialect),
                indoc! {r#"
                    SELECT id, "key"
                    FROM line
                    WHERE "key" = $1 AND id > $2
                    ORDER BY id ASC
                    LIMIT 10 OFFSET 20"#},
                "BIGINT",
            ),
            (
                Arc::new(SqliteDialect),
                indoc! {r#"
                    SELECT id, "key"
                    FROM line
                    WHERE "key" = ? AND id > ?
                    ORDER BY id ASC
                    LIMIT 10 OFFSET 20"#},
                "INTEGER",
            ),
            (
                Arc::new(MySqlDialect),
                indoc! {"
                    SELECT id, `key`
                    FROM line
                    WHERE `key` = ? AND id > ?
                    ORDER BY id ASC
                    LIMIT 20, 10"},
                "BIGINT",
            ),
        ];
        for (dialect, expected, id_type) in cases {
            let name = dialect.name();
            let request = database(dialect)
                .query("line")
                .unwrap()
                .select(["id", "key"])
                .filter(Condition::eq("key", "a").and(Condition::gt("id", 3)))
                .order_by("id", Order::Asc)
                .paging(2, 10)
                .compile()
                .unwrap();
            assert_eq!(request.sql(), expected, "{}", name);
            assert_eq!(
                request.values().cloned().collect::<Vec<_>>(),
                [Value::Varchar(Some("a".into())), Value::Int32(Some(3))],
                "{}",
                name
            );
            assert_eq!(request.params()[0].sql_type, "VARCHAR(20)", "{}", name);
            assert_eq!(request.params()[1].sql_type, id_type, "{}", name);
        }
    }

    #[test]
    fn quote_identifier() {
        assert_eq!(GenericDialect.quote_identifier("plain_name"), "plain_name");
        assert_eq!(GenericDialect.quote_identifier("order"), "\"order\"");
        assert_eq!(GenericDialect.quote_identifier("two words"), "\"two words\"");
        assert_eq!(GenericDialect.quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(GenericDialect.quote_identifier("1st"), "\"1st\"");
        assert_eq!(MySqlDialect.quote_identifier("a`b"), "`a``b`");
        assert_eq!(MySqlDialect.quote_identifier("value"), "value");
        assert!(GenericDialect.is_reserved("select"));
        assert!(!GenericDialect.is_reserved("total"));
    }
}
