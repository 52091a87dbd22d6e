use crate::EntityTest;
use slate::{Database, Executor, Repository};

pub async fn save<E: Executor>(executor: &mut E, database: &mut Database) {
    let repository = Repository::<EntityTest>::new(database, "entity_test")
        .expect("entity_test should be registered");
    let mut record = EntityTest {
        id: "s1".into(),
        name: Some("draft".into()),
        create_time: Some("2024-02-01".into()),
    };
    assert_eq!(
        repository
            .save(executor, &record)
            .await
            .expect("Failed to save the new record"),
        1
    );
    assert_eq!(
        repository
            .find_by_id(executor, "s1")
            .await
            .expect("Failed to find s1")
            .as_ref(),
        Some(&record)
    );

    record.name = Some("published".into());
    record.create_time = None;
    repository
        .save(executor, &record)
        .await
        .expect("Failed to save the existing record");
    assert_eq!(
        repository
            .find_by_id(executor, "s1")
            .await
            .expect("Failed to find s1")
            .as_ref(),
        Some(&record)
    );
    assert_eq!(
        repository
            .create_query()
            .count(executor)
            .await
            .expect("Failed to count"),
        1
    );
    repository
        .delete_by_id(executor, "s1")
        .await
        .expect("Failed to delete s1");
}
