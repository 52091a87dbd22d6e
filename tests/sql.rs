#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rust_decimal::Decimal;
    use slate::{
        ColumnDef, Condition, Database, GenericDialect, IndexDef, Order, OrmError, SqlRequest,
        TableDef, Value,
    };
    use std::str::FromStr;
    use time::macros::date;

    fn database() -> Database {
        let mut database = Database::new(GenericDialect);
        database
            .add_table(
                TableDef::new("employee")
                    .schema("hr")
                    .column(ColumnDef::of::<i64>("id").primary_key())
                    .column(
                        ColumnDef::of::<String>("first_name")
                            .length(50)
                            .not_null()
                            .comment("Given name"),
                    )
                    .column(ColumnDef::of::<String>("last_name").length(50))
                    .column(
                        ColumnDef::of::<Decimal>("salary")
                            .precision(10, 2)
                            .default(Decimal::from_str("1000.50").unwrap()),
                    )
                    .column(ColumnDef::of::<bool>("active").not_null().default(true))
                    .column(ColumnDef::of::<String>("group").default("R&D 'core'"))
                    .index(IndexDef::new("employee_name").column("first_name", Order::Asc)),
            )
            .unwrap();
        database
            .add_table(
                TableDef::new("membership")
                    .column(ColumnDef::of::<i64>("user_id"))
                    .column(ColumnDef::of::<i32>("group_id"))
                    .column(ColumnDef::of::<time::Date>("since").default(date!(2020 - 01 - 01)))
                    .primary_key_of(&["user_id", "group_id"])
                    .unwrap(),
            )
            .unwrap();
        database
    }

    fn sql(requests: &[SqlRequest]) -> Vec<&str> {
        requests.iter().map(|v| v.sql()).collect()
    }

    fn is_error<T>(result: slate::Result<T>, compile: bool) -> bool {
        match result.err().as_ref().and_then(|e| e.downcast_ref::<OrmError>()) {
            Some(OrmError::Compile { .. }) => compile,
            Some(OrmError::Metadata { .. }) => !compile,
            _ => false,
        }
    }

    #[test]
    fn create_table() {
        let database = database();
        let mut fresh = Database::new(GenericDialect);
        let employee = database.table("hr.employee").unwrap();
        let requests = fresh
            .create_or_alter((*employee).clone())
            .compile()
            .unwrap();
        assert_eq!(
            sql(&requests),
            [
                indoc! {r#"
                    CREATE TABLE IF NOT EXISTS hr.employee (
                    id BIGINT PRIMARY KEY,
                    first_name VARCHAR(50) NOT NULL,
                    last_name VARCHAR(50),
                    salary NUMERIC(10,2) DEFAULT 1000.50,
                    active BOOLEAN NOT NULL DEFAULT TRUE,
                    "group" TEXT DEFAULT 'R&D ''core'''
                    )"#},
                "COMMENT ON COLUMN hr.employee.first_name IS 'Given name'",
                "CREATE INDEX IF NOT EXISTS employee_name ON hr.employee (first_name ASC)",
            ]
        );
        assert!(requests.iter().all(|v| v.params().is_empty()));

        let membership = database.table("membership").unwrap();
        let requests = fresh
            .create_or_alter((*membership).clone())
            .compile()
            .unwrap();
        assert_eq!(
            sql(&requests),
            [indoc! {"
                CREATE TABLE IF NOT EXISTS membership (
                user_id BIGINT NOT NULL,
                group_id INTEGER NOT NULL,
                since DATE DEFAULT '2020-01-01',
                PRIMARY KEY (user_id, group_id)
                )"}]
        );
    }

    #[test]
    fn insert() {
        let database = database();
        let requests = database
            .insert("hr.employee")
            .unwrap()
            .columns(["id", "first_name"])
            .values([Value::from(1i64), "Ann".into()])
            .values([Value::from(2i64), "Bob".into()])
            .compile()
            .unwrap();
        assert_eq!(
            sql(&requests),
            [indoc! {"
                INSERT INTO hr.employee (id, first_name) VALUES
                ($1, $2),
                ($3, $4)"}]
        );
        let params = requests[0].params();
        assert_eq!(params.len(), 4);
        assert_eq!(params[2].value, Value::Int64(Some(2)));
        assert_eq!(params[2].sql_type, "BIGINT");
        assert_eq!(params[3].sql_type, "VARCHAR(50)");

        // Every column when none is selected
        let requests = database
            .insert("membership")
            .unwrap()
            .values([Value::from(1i64), 2.into(), Value::Date(None)])
            .compile()
            .unwrap();
        assert_eq!(
            sql(&requests),
            ["INSERT INTO membership (user_id, group_id, since) VALUES\n($1, $2, $3)"]
        );
    }

    #[test]
    fn insert_errors() {
        let database = database();
        let insert = database.insert("membership").unwrap();
        assert!(is_error(insert.compile(), true));
        let insert = insert.values([Value::from(1i64)]);
        assert!(is_error(insert.compile(), true));
        assert!(is_error(
            database
                .insert("membership")
                .unwrap()
                .columns(["user_id", "missing"])
                .values([Value::from(1i64), 2.into()])
                .compile(),
            false
        ));
        assert!(is_error(database.insert("missing"), false));
    }

    #[test]
    fn upsert() {
        let database = database();
        let requests = database
            .insert("membership")
            .unwrap()
            .values([Value::from(1i64), 2.into(), date!(2024 - 05 - 01).into()])
            .on_conflict_update()
            .compile()
            .unwrap();
        assert_eq!(
            sql(&requests),
            [indoc! {"
                INSERT INTO membership (user_id, group_id, since) VALUES
                ($1, $2, $3)
                ON CONFLICT (user_id, group_id) DO UPDATE SET
                since = EXCLUDED.since"}]
        );
        let requests = database
            .insert("membership")
            .unwrap()
            .columns(["user_id", "group_id"])
            .values([Value::from(1i64), 2.into()])
            .on_conflict_update()
            .compile()
            .unwrap();
        assert_eq!(
            sql(&requests),
            ["INSERT INTO membership (user_id, group_id) VALUES\n($1, $2)\nON CONFLICT (user_id, group_id) DO NOTHING"]
        );

        let mut database = database;
        database
            .add_table(TableDef::new("log").column(ColumnDef::of::<String>("line")))
            .unwrap();
        assert!(is_error(
            database
                .insert("log")
                .unwrap()
                .values(["x".into()])
                .on_conflict_update()
                .compile(),
            false
        ));
    }

    #[test]
    fn update() {
        let database = database();
        let request = database
            .update("hr.employee")
            .unwrap()
            .set("salary", Decimal::from(2000))
            .set("active", false)
            .filter(Condition::eq("id", 7i64))
            .compile()
            .unwrap();
        assert_eq!(
            request.sql(),
            indoc! {"
                UPDATE hr.employee
                SET salary = $1, active = $2
                WHERE id = $3"}
        );
        assert_eq!(
            request.values().cloned().collect::<Vec<_>>(),
            [
                Value::Decimal(Some(Decimal::from(2000)), 0, 0),
                Value::Boolean(Some(false)),
                Value::Int64(Some(7)),
            ]
        );
        assert_eq!(request.params()[0].sql_type, "NUMERIC(10,2)");

        let update = database.update("hr.employee").unwrap();
        assert!(is_error(update.clone().filter(Condition::eq("id", 1)).compile(), true));
        assert!(is_error(update.clone().set("active", true).compile(), true));
        assert_eq!(
            update
                .set("active", true)
                .allow_unconditional()
                .compile()
                .unwrap()
                .sql(),
            "UPDATE hr.employee\nSET active = $1"
        );
    }

    #[test]
    fn delete() {
        let database = database();
        let request = database
            .delete("hr.employee")
            .unwrap()
            .filter(Condition::eq("active", false))
            .filter(Condition::lt("salary", 500))
            .compile()
            .unwrap();
        assert_eq!(
            request.sql(),
            "DELETE FROM hr.employee\nWHERE active = $1 AND salary < $2"
        );
        let delete = database.delete("hr.employee").unwrap();
        assert!(is_error(delete.compile(), true));
        assert_eq!(
            delete.allow_unconditional().compile().unwrap().sql(),
            "DELETE FROM hr.employee"
        );
    }

    #[test]
    fn select() {
        let database = database();
        let query = database.query("hr.employee").unwrap();
        assert_eq!(
            query.compile().unwrap().sql(),
            indoc! {r#"
                SELECT id, first_name, last_name, salary, active, "group"
                FROM hr.employee"#}
        );
        let request = query
            .clone()
            .select(["id", "group"])
            .filter(
                Condition::any([
                    Condition::eq("first_name", "Ann"),
                    Condition::like("first_name", "B%"),
                ])
                .and(Condition::ge("salary", 10)),
            )
            .filter(Condition::eq("last_name", Value::Varchar(None)))
            .order_by("group", Order::Desc)
            .order_by("id", Order::Asc)
            .paging(0, 10)
            .compile()
            .unwrap();
        assert_eq!(
            request.sql(),
            indoc! {r#"
                SELECT id, "group"
                FROM hr.employee
                WHERE (first_name = $1 OR first_name LIKE $2) AND salary >= $3 AND last_name IS NULL
                ORDER BY "group" DESC, id ASC
                LIMIT 10"#}
        );
        assert_eq!(request.params().len(), 3);

        let request = query
            .clone()
            .select(["id"])
            .filter(Condition::eq("active", true).and(Condition::any([
                Condition::between("salary", 10, 20),
                Condition::not_in("id", [1, 2, 3]),
            ])))
            .order_by("id", Order::Asc)
            .paging(2, 25)
            .compile()
            .unwrap();
        assert_eq!(
            request.sql(),
            indoc! {"
                SELECT id
                FROM hr.employee
                WHERE active = $1 AND (salary BETWEEN $2 AND $3 OR id NOT IN ($4, $5, $6))
                ORDER BY id ASC
                LIMIT 25 OFFSET 50"}
        );
        assert_eq!(
            query
                .clone()
                .filter(Condition::is_not_null("last_name"))
                .limit(1)
                .compile()
                .unwrap()
                .sql(),
            indoc! {r#"
                SELECT id, first_name, last_name, salary, active, "group"
                FROM hr.employee
                WHERE last_name IS NOT NULL
                LIMIT 1"#}
        );
    }

    #[test]
    fn count() {
        let database = database();
        let query = database
            .query("hr.employee")
            .unwrap()
            .filter(Condition::eq("active", true))
            .order_by("id", Order::Asc)
            .paging(3, 10);
        let request = query.count_request().unwrap();
        assert_eq!(
            request.sql(),
            "SELECT COUNT(*) AS total\nFROM hr.employee\nWHERE active = $1"
        );
        assert_eq!(request.params().len(), 1);
    }

    #[test]
    fn select_errors() {
        let database = database();
        let query = database.query("hr.employee").unwrap();
        assert!(is_error(query.clone().paging(1, 0).compile(), true));
        assert!(is_error(query.clone().paging(u64::MAX, 2).compile(), true));
        assert!(is_error(query.clone().select(["nope"]).compile(), false));
        assert!(is_error(
            query.clone().order_by("nope", Order::Asc).compile(),
            false
        ));
        assert!(is_error(database.query("employee"), false));
    }

    #[test]
    fn values_never_inlined() {
        let database = database();
        let hostile = "x'); DROP TABLE employee; --";
        let request = database
            .query("hr.employee")
            .unwrap()
            .filter(Condition::eq("first_name", hostile))
            .compile()
            .unwrap();
        assert!(!request.sql().contains("DROP"));
        assert_eq!(
            request.values().collect::<Vec<_>>(),
            [&Value::Varchar(Some(hostile.into()))]
        );
        let display = request.to_string();
        assert!(display.contains("WHERE first_name = $1"));
    }
}
