#[cfg(test)]
mod tests {
    use indoc::indoc;
    use slate_core::{
        ColumnDef, Condition, Database, Dialect, IndexDef, Order, SqlRequest, TableDef, Value,
    };
    use slate_mysql::{MYSQL_RESERVED_WORDS, MySqlDialect};
    use slate_tests::init_logs;

    fn product() -> TableDef {
        TableDef::new("product")
            .column(ColumnDef::of::<u32>("id").primary_key())
            .column(
                ColumnDef::of::<String>("name")
                    .length(120)
                    .not_null()
                    .comment("Display name, it's shown to customers"),
            )
            .column(ColumnDef::of::<bool>("active").not_null().default(true))
            .column(ColumnDef::of::<String>("key").length(36))
            .index(IndexDef::new("product_name").unique().column("name", Order::Asc))
    }

    fn sql(requests: &[SqlRequest]) -> Vec<&str> {
        requests.iter().map(|v| v.sql()).collect()
    }

    #[test]
    fn reserved_words_sorted() {
        assert!(MYSQL_RESERVED_WORDS.windows(2).all(|v| v[0] < v[1]));
        assert!(MySqlDialect.is_reserved("interval"));
        assert_eq!(MySqlDialect.quote_identifier("key"), "`key`");
        assert_eq!(MySqlDialect.quote_identifier("odd`name"), "`odd``name`");
        assert_eq!(MySqlDialect.quote_identifier("plain"), "plain");
    }

    #[test]
    fn create_table() {
        init_logs();
        let mut database = Database::new(MySqlDialect);
        let requests = database
            .create_or_alter(product())
            .compile()
            .expect("Failed to compile");
        assert_eq!(
            sql(&requests),
            [
                indoc! {"
                    CREATE TABLE IF NOT EXISTS product (
                    id INT UNSIGNED PRIMARY KEY,
                    name VARCHAR(120) NOT NULL COMMENT 'Display name, it''s shown to customers',
                    active TINYINT(1) NOT NULL DEFAULT TRUE,
                    `key` VARCHAR(36)
                    )"},
                "CREATE UNIQUE INDEX product_name ON product (name ASC)",
            ]
        );
    }

    #[test]
    fn alter_table() {
        let mut database = Database::new(MySqlDialect);
        database.add_table(product()).expect("Invalid table");
        let requests = database
            .create_or_alter(
                product()
                    .column(ColumnDef::of::<String>("name").length(200).not_null())
                    .column(ColumnDef::of::<Option<i32>>("stock").default(0)),
            )
            .compile()
            .expect("Failed to compile");
        assert_eq!(
            sql(&requests),
            [
                "ALTER TABLE product MODIFY COLUMN name VARCHAR(200) NOT NULL",
                "ALTER TABLE product ADD COLUMN stock INT DEFAULT 0",
            ]
        );
    }

    #[test]
    fn select_paging() {
        let mut database = Database::new(MySqlDialect);
        database.add_table(product()).expect("Invalid table");
        let query = database
            .query("product")
            .expect("product is missing")
            .select(["id", "key"])
            .filter(Condition::like("name", "%chair%").or(Condition::eq("active", false)))
            .order_by("name", Order::Asc)
            .paging(4, 20);
        let request = query.compile().expect("Failed to compile");
        assert_eq!(
            request.sql(),
            indoc! {"
                SELECT id, `key`
                FROM product
                WHERE name LIKE ? OR active = ?
                ORDER BY name ASC
                LIMIT 80, 20"}
        );
        assert_eq!(
            request.values().cloned().collect::<Vec<_>>(),
            [Value::from("%chair%"), false.into()]
        );
        let request = query.paging(0, 20).compile().expect("Failed to compile");
        assert!(request.sql().ends_with("\nLIMIT 20"));
        let request = database
            .query("product")
            .expect("product is missing")
            .count_request()
            .expect("Failed to compile");
        assert_eq!(request.sql(), "SELECT COUNT(*) AS total\nFROM product");
    }

    #[test]
    fn upsert() {
        let mut database = Database::new(MySqlDialect);
        database.add_table(product()).expect("Invalid table");
        let requests = database
            .insert("product")
            .expect("product is missing")
            .columns(["id", "name", "active"])
            .rows([
                vec![Value::from(1u32), "Desk".into(), true.into()],
                vec![Value::from(2u32), "Chair".into(), false.into()],
            ])
            .on_conflict_update()
            .compile()
            .expect("Failed to compile");
        assert_eq!(
            sql(&requests),
            [indoc! {"
                INSERT INTO product (id, name, active) VALUES
                (?, ?, ?),
                (?, ?, ?)
                ON DUPLICATE KEY UPDATE
                name = VALUES(name),
                active = VALUES(active)"}]
        );
        assert_eq!(requests[0].params().len(), 6);
        let requests = database
            .insert("product")
            .expect("product is missing")
            .columns(["id"])
            .values([Value::from(3u32)])
            .on_conflict_update()
            .compile()
            .expect("Failed to compile");
        assert!(requests[0].sql().ends_with("ON DUPLICATE KEY UPDATE\nid = VALUES(id)"));
    }

    #[test]
    fn literals() {
        let database = Database::new(MySqlDialect);
        let dialect = database.dialect();
        let mut out = String::new();
        dialect.write_value_string(&mut Default::default(), &mut out, r"C:\tmp\'x'");
        assert_eq!(out, r"'C:\\tmp\\''x'''");
        assert_eq!(
            dialect
                .map_type(&Value::Decimal(None, 0, 0), None, Some((10, 4)))
                .unwrap(),
            "DECIMAL(10,4)"
        );
        assert_eq!(dialect.map_type(&Value::Uuid(None), None, None).unwrap(), "CHAR(36)");
    }
}
