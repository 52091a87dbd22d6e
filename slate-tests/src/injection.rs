use crate::EntityTest;
use slate::{Condition, Database, Executor, Repository, Value};

pub async fn injection<E: Executor>(executor: &mut E, database: &mut Database) {
    let repository = Repository::<EntityTest>::new(database, "entity_test")
        .expect("entity_test should be registered");
    let hostile = [
        "O'Brien",
        "'; DROP TABLE entity_test; --",
        "\" OR \"1\" = \"1",
        "back\\slash '' doubled",
    ];
    for (i, text) in hostile.iter().enumerate() {
        let record = EntityTest {
            id: format!("q'{}", i),
            name: Some(text.to_string()),
            create_time: Some("--".into()),
        };
        repository
            .insert(executor, &record)
            .await
            .expect("Failed to insert the hostile record");
        let query = repository
            .create_query()
            .filter(Condition::eq("name", *text));
        let request = query.compile().expect("Failed to compile the query");
        assert!(!request.sql().contains(text));
        assert_eq!(
            request.values().collect::<Vec<_>>(),
            [&Value::Varchar(Some(text.to_string()))]
        );
        let found = query
            .fetch_one(executor)
            .await
            .expect("Failed to query the hostile record")
            .expect("The hostile record is missing");
        assert_eq!(found, record);
    }
    assert_eq!(
        repository
            .create_query()
            .filter(Condition::like("id", "q'%"))
            .count(executor)
            .await
            .expect("Failed to count"),
        hostile.len() as u64
    );
    repository
        .create_delete()
        .filter(Condition::like("id", "q'%"))
        .execute(executor)
        .await
        .expect("Failed to clean up");
}
