#[cfg(test)]
mod tests {
    use slate_core::{Database, Streaming};
    use slate_sqlite::{SqliteConnection, SqliteDialect};
    use slate_tests::{execute_tests, init_logs};

    #[tokio::test]
    async fn sqlite() {
        init_logs();
        let connection =
            SqliteConnection::connect("sqlite://:memory:").expect("Could not open the database");
        execute_tests(Streaming(connection), Database::new(SqliteDialect)).await;
    }
}
