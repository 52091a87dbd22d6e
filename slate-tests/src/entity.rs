use slate::{
    ColumnDef, Condition, Database, Executor, Order, Repository, TableDef, entity,
    stream::TryStreamExt,
};

#[derive(Default, Debug, Clone, PartialEq)]
pub struct EntityTest {
    pub id: String,
    pub name: Option<String>,
    pub create_time: Option<String>,
}
entity!(EntityTest {
    id,
    name,
    create_time => "createTime",
});

impl EntityTest {
    pub fn table() -> TableDef {
        TableDef::new("entity_test")
            .column(ColumnDef::of::<String>("id").length(32).primary_key())
            .column(ColumnDef::of::<String>("name"))
            .column(ColumnDef::of::<String>("create_time").alias("createTime"))
    }
}

pub async fn entity<E: Executor>(executor: &mut E, database: &mut Database) {
    database
        .create_or_alter(EntityTest::table())
        .commit(executor)
        .await
        .expect("Failed to create entity_test");
    let repository = Repository::<EntityTest>::new(database, "entity_test")
        .expect("Failed to build the entity_test repository");
    assert_eq!(
        repository
            .mapping()
            .column_of("createTime")
            .expect("createTime is not mapped"),
        "create_time"
    );

    let record = EntityTest {
        id: "t1".into(),
        name: Some("a".into()),
        create_time: Some("2024-01-01".into()),
    };
    assert_eq!(
        repository
            .insert(executor, &record)
            .await
            .expect("Failed to insert t1"),
        1
    );
    let found = repository
        .find_by_id(executor, "t1")
        .await
        .expect("Failed to find t1")
        .expect("t1 is missing");
    assert_eq!(found, record);
    assert_eq!(
        repository
            .create_query()
            .count(executor)
            .await
            .expect("Failed to count"),
        1
    );
    assert!(
        repository
            .find_by_id(executor, "t2")
            .await
            .expect("Failed to look for t2")
            .is_none()
    );

    // Nullable fields
    let other = EntityTest {
        id: "t2".into(),
        name: None,
        create_time: None,
    };
    repository
        .insert(executor, &other)
        .await
        .expect("Failed to insert t2");
    let all = repository
        .create_query()
        .order_by("id", Order::Asc)
        .fetch(executor)
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to fetch the records");
    assert_eq!(all, [record.clone(), other.clone()]);

    // Update through the builder
    let affected = repository
        .create_update()
        .set("name", "b")
        .filter(Condition::eq("id", "t1"))
        .execute(executor)
        .await
        .expect("Failed to update t1");
    assert_eq!(affected.rows_affected, 1);
    let found = repository
        .find_by_id(executor, "t1")
        .await
        .expect("Failed to find t1")
        .expect("t1 is missing");
    assert_eq!(found.name.as_deref(), Some("b"));

    // Delete
    assert_eq!(
        repository
            .delete_by_id(executor, "t1")
            .await
            .expect("Failed to delete t1"),
        1
    );
    assert_eq!(
        repository
            .delete_by_id(executor, "t2")
            .await
            .expect("Failed to delete t2"),
        1
    );
    assert_eq!(
        repository
            .create_query()
            .count(executor)
            .await
            .expect("Failed to count"),
        0
    );
}
