use slate::{
    BatchFailure, ColumnDef, Database, Executor, OrmError, Repository, TableDef, entity,
};

#[derive(Default, Debug, Clone, PartialEq)]
struct Reading {
    id: i32,
    sensor: String,
    value: f64,
}
entity!(Reading { id, sensor, value });

fn readings(ids: impl IntoIterator<Item = i32>) -> Vec<Reading> {
    ids.into_iter()
        .map(|id| Reading {
            id,
            sensor: format!("sensor-{}", id % 3),
            value: id as f64 * 0.5,
        })
        .collect()
}

pub async fn batch<E: Executor>(executor: &mut E, database: &mut Database) {
    database
        .create_or_alter(
            TableDef::new("reading")
                .column(ColumnDef::of::<i32>("id").primary_key())
                .column(ColumnDef::of::<String>("sensor").not_null())
                .column(ColumnDef::of::<f64>("value")),
        )
        .commit(executor)
        .await
        .expect("Failed to create reading");
    let repository =
        Repository::<Reading>::new(database, "reading").expect("Failed to build the repository");

    // Chunk size not dividing the number of records
    let first = readings(0..23);
    assert_eq!(
        repository
            .insert_batch(executor, &first, Some(5))
            .await
            .expect("Failed to insert the first batch"),
        23
    );
    assert_eq!(
        repository
            .create_query()
            .count(executor)
            .await
            .expect("Failed to count"),
        23
    );
    assert_eq!(
        repository
            .insert_batch(executor, &Vec::new(), Some(5))
            .await
            .expect("Empty batch should succeed"),
        0
    );

    // The second chunk collides with an existing key
    let mut second = readings(100..112);
    second[7].id = 3;
    let error = repository
        .insert_batch(executor, &second, Some(5))
        .await
        .expect_err("Duplicated key should stop the batch");
    let failure = error
        .downcast_ref::<BatchFailure>()
        .expect("The error should describe the batch failure");
    assert_eq!(
        *failure,
        BatchFailure {
            completed: 5,
            failed_chunk: 1,
            chunks: 3,
        }
    );
    assert!(matches!(
        error.downcast_ref::<OrmError>(),
        Some(OrmError::Execution { .. })
    ));
    assert_eq!(
        repository
            .create_query()
            .count(executor)
            .await
            .expect("Failed to count"),
        28
    );

    // Zero chunk size is refused before running anything
    let error = repository
        .insert_batch(executor, &readings(200..210), Some(0))
        .await
        .expect_err("Zero chunk size should fail");
    assert!(matches!(
        error.downcast_ref::<OrmError>(),
        Some(OrmError::Compile { .. })
    ));
    assert_eq!(
        repository
            .create_query()
            .count(executor)
            .await
            .expect("Failed to count"),
        28
    );
}
