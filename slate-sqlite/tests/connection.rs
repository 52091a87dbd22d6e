#[cfg(test)]
mod tests {
    use slate_core::{
        BlockingExecutor, ColumnDef, Condition, Database, QueryResult, Repository, TableDef,
        entity,
    };
    use slate_sqlite::{SqliteConnection, SqliteDialect};
    use slate_tests::{init_logs, silent_logs};
    use std::{env, fs};

    #[derive(Default, Debug, Clone, PartialEq)]
    struct Note {
        id: i32,
        body: String,
    }
    entity!(Note { id, body });

    fn notes() -> TableDef {
        TableDef::new("note")
            .column(ColumnDef::of::<i32>("id").primary_key())
            .column(ColumnDef::of::<String>("body").not_null())
    }

    #[test]
    fn wrong_url() {
        silent_logs! {
            assert!(SqliteConnection::connect("mysql://localhost/db").is_err());
            assert!(SqliteConnection::connect(":memory:").is_err());
        };
    }

    #[test]
    fn file_database() {
        init_logs();
        let path = env::temp_dir().join(format!("slate-{}.sqlite", std::process::id()));
        let _ = fs::remove_file(&path);
        {
            let mut connection = SqliteConnection::connect(&format!("sqlite://{}", path.display()))
                .expect("Could not open the database");
            let mut database = Database::new(SqliteDialect);
            database
                .create_or_alter(notes())
                .commit_blocking(&mut connection)
                .expect("Failed to create note");
            let repository =
                Repository::<Note>::new(&database, "note").expect("Failed to build the repository");
            repository
                .insert_blocking(
                    &mut connection,
                    &Note {
                        id: 1,
                        body: "persisted".into(),
                    },
                )
                .expect("Failed to insert");
        }
        assert!(path.exists(), "Database file should be created");
        {
            let mut connection = SqliteConnection::connect(&format!("sqlite://{}", path.display()))
                .expect("Could not reopen the database");
            let mut database = Database::new(SqliteDialect);
            assert_eq!(
                database
                    .create_or_alter(notes())
                    .commit_blocking(&mut connection)
                    .expect("Creating an existing table should be harmless"),
                1
            );
            let repository =
                Repository::<Note>::new(&database, "note").expect("Failed to build the repository");
            let note = repository
                .find_by_id_blocking(&mut connection, 1)
                .expect("Failed to query")
                .expect("The note is missing");
            assert_eq!(note.body, "persisted");
        }
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn blocking() {
        init_logs();
        let mut connection = SqliteConnection::open_in_memory().expect("Could not open the database");
        let mut database = Database::new(SqliteDialect);
        database
            .create_or_alter(notes())
            .commit_blocking(&mut connection)
            .expect("Failed to create note");
        let repository =
            Repository::<Note>::new(&database, "note").expect("Failed to build the repository");
        let notes = (0..7)
            .map(|id| Note {
                id,
                body: format!("note {}", id),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            repository
                .insert_batch_blocking(&mut connection, &notes, Some(3))
                .expect("Failed to insert the notes"),
            7
        );
        let found = repository
            .create_query()
            .filter(Condition::ge("id", 5))
            .fetch_blocking(&mut connection)
            .expect("Failed to fetch");
        assert_eq!(found, notes[5..]);
        assert_eq!(
            repository
                .create_query()
                .count_blocking(&mut connection)
                .expect("Failed to count"),
            7
        );

        let results = connection
            .run_blocking("SELECT 1 AS one, 'two' AS two, NULL AS three".into())
            .expect("Failed to run a raw query");
        let [QueryResult::Row(row)] = results.as_slice() else {
            panic!("Expected one row, got {:?}", results);
        };
        assert_eq!(row.names(), ["one", "two", "three"]);
        assert_eq!(row.values(), [1i64.into(), "two".into(), slate_core::Value::Null]);

        let affected = database
            .update("note")
            .expect("note should be registered")
            .set("body", "edited")
            .filter(Condition::lt("id", 2))
            .execute_blocking(&mut connection)
            .expect("Failed to update");
        assert_eq!(affected.rows_affected, 2);
        assert_eq!(affected.last_affected_id, None);
    }

    #[test]
    fn ddl_retry_after_failure() {
        init_logs();
        let mut connection = SqliteConnection::open_in_memory().expect("Could not open the database");
        let mut database = Database::new(SqliteDialect);
        database
            .create_or_alter(notes())
            .commit_blocking(&mut connection)
            .expect("Failed to create note");
        Repository::<Note>::new(&database, "note")
            .expect("Failed to build the repository")
            .insert_blocking(
                &mut connection,
                &Note {
                    id: 1,
                    body: "first".into(),
                },
            )
            .expect("Failed to insert");
        let target = || notes().column(ColumnDef::of::<i64>("a"));
        silent_logs! {
            // A NOT NULL column without default cannot be added to a table with rows
            assert!(
                database
                    .create_or_alter(target().column(ColumnDef::of::<i64>("b").not_null()))
                    .commit_blocking(&mut connection)
                    .is_err()
            );
        };
        let mut ddl = database.create_or_alter(target().column(ColumnDef::of::<i64>("b")));
        let sql = ddl.compile().expect("Failed to compile the retry");
        assert_eq!(
            sql.iter().map(|v| v.sql()).collect::<Vec<_>>(),
            ["ALTER TABLE note ADD COLUMN b INTEGER"]
        );
        assert_eq!(
            ddl.commit_blocking(&mut connection)
                .expect("Failed to retry"),
            1
        );
    }
}
