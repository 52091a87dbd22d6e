use slate::{
    AsValue, ColumnDef, Condition, Database, DdlState, Executor, IndexDef, Order, OrmError,
    TableDef, Value, stream::TryStreamExt,
};

fn table() -> TableDef {
    TableDef::new("ddl_test")
        .column(ColumnDef::of::<i64>("id").primary_key())
        .column(
            ColumnDef::of::<String>("title")
                .length(64)
                .not_null()
                .comment("Shown in lists"),
        )
        .index(IndexDef::new("ddl_test_title").column("title", Order::Asc))
}

pub async fn ddl<E: Executor>(executor: &mut E, database: &mut Database) {
    // Creation
    let mut builder = database.create_or_alter(table());
    assert_eq!(builder.state(), DdlState::New);
    assert!(
        !builder
            .compile()
            .expect("Failed to compile the creation")
            .is_empty()
    );
    builder
        .commit(executor)
        .await
        .expect("Failed to create ddl_test");

    // Same definition again
    let mut builder = database.create_or_alter(table());
    assert!(
        builder
            .compile()
            .expect("Failed to compile the same definition")
            .is_empty()
    );
    assert_eq!(
        builder
            .commit(executor)
            .await
            .expect("Failed to commit the same definition"),
        0
    );

    // New column
    let mut builder = database.create_or_alter(table());
    builder.add_column(ColumnDef::of::<Option<i32>>("score").default(0));
    assert_eq!(builder.state(), DdlState::ColumnsAdded(1));
    let requests = builder.compile().expect("Failed to compile the new column");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].sql().contains("ADD COLUMN"));
    assert_eq!(
        builder
            .commit(executor)
            .await
            .expect("Failed to add the column"),
        1
    );
    database
        .insert("ddl_test")
        .expect("ddl_test should be registered")
        .columns(["id", "title"])
        .values([Value::from(1i64), "first".into()])
        .execute(executor)
        .await
        .expect("Failed to insert into ddl_test");
    let rows = database
        .query("ddl_test")
        .expect("ddl_test should be registered")
        .select(["score"])
        .filter(Condition::eq("id", 1i64))
        .fetch(executor)
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to read the new column");
    assert_eq!(rows.len(), 1);
    let score = rows[0]
        .get_column("score")
        .cloned()
        .expect("score is missing");
    assert_eq!(i32::try_from_value(score).expect("score is not an integer"), 0);

    // Columns missing from the definition are left alone
    assert!(
        database
            .create_or_alter(table())
            .compile()
            .expect("Failed to compile the shorter definition")
            .is_empty()
    );
    assert!(
        database
            .table("ddl_test")
            .expect("ddl_test should be registered")
            .find_column("score")
            .is_some()
    );

    // Changed column
    let wider = table().column(ColumnDef::of::<String>("title").length(128).not_null());
    let result = database.create_or_alter(wider).compile();
    #[cfg(feature = "disable-alter-column")]
    assert!(matches!(
        result.as_ref().err().and_then(|e| e.downcast_ref::<OrmError>()),
        Some(OrmError::Metadata { .. })
    ));
    #[cfg(not(feature = "disable-alter-column"))]
    {
        assert_eq!(result.expect("Failed to compile the wider column").len(), 1);
        let wider = table().column(ColumnDef::of::<String>("title").length(128).not_null());
        database
            .create_or_alter(wider)
            .commit(executor)
            .await
            .expect("Failed to alter the column");
    }

    // A different primary key needs a migration
    let mut rekeyed = table();
    for column in rekeyed.columns.iter_mut() {
        column.primary_key = column.name == "title";
    }
    let result = database.create_or_alter(rekeyed).compile();
    assert!(matches!(
        result.as_ref().err().and_then(|e| e.downcast_ref::<OrmError>()),
        Some(OrmError::Metadata { .. })
    ));
}
