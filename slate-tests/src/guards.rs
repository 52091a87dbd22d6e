use crate::EntityTest;
use slate::{Condition, Database, Executor, OrmError, Repository, Result};

fn is_compile_error<T>(result: &Result<T>) -> bool {
    matches!(
        result.as_ref().err().and_then(|e| e.downcast_ref::<OrmError>()),
        Some(OrmError::Compile { .. })
    )
}

pub async fn guards<E: Executor>(executor: &mut E, database: &mut Database) {
    let repository = Repository::<EntityTest>::new(database, "entity_test")
        .expect("entity_test should be registered");
    repository
        .insert_batch(
            executor,
            &[
                EntityTest {
                    id: "g1".into(),
                    name: Some("first".into()),
                    create_time: None,
                },
                EntityTest {
                    id: "g2".into(),
                    name: Some("second".into()),
                    create_time: None,
                },
            ],
            None,
        )
        .await
        .expect("Failed to insert the guard records");

    // Without a condition nothing runs
    let update = repository.create_update().set("name", "everyone");
    assert!(is_compile_error(&update.compile()));
    assert!(is_compile_error(&update.execute(executor).await));
    let delete = repository.create_delete();
    assert!(is_compile_error(&delete.compile()));
    assert!(is_compile_error(&delete.execute(executor).await));

    // An empty group is no condition
    let delete = repository.create_delete().filter(Condition::all([]));
    assert!(is_compile_error(&delete.execute(executor).await));
    assert_eq!(
        repository
            .create_query()
            .count(executor)
            .await
            .expect("Failed to count"),
        2
    );

    // Explicit opt in
    let affected = repository
        .create_update()
        .set("name", "everyone")
        .allow_unconditional()
        .execute(executor)
        .await
        .expect("Unconditional update should run when allowed");
    assert_eq!(affected.rows_affected, 2);
    let affected = repository
        .create_delete()
        .allow_unconditional()
        .execute(executor)
        .await
        .expect("Unconditional delete should run when allowed");
    assert_eq!(affected.rows_affected, 2);
    assert_eq!(
        repository
            .create_query()
            .count(executor)
            .await
            .expect("Failed to count"),
        0
    );
}
