use slate::{Condition, Database, Executor, OrmError, Result, Value};

fn kind(result: Result<u64>) -> Option<&'static str> {
    let error = result.err()?;
    match error.downcast_ref::<OrmError>() {
        Some(OrmError::Compile { .. }) => Some("compile"),
        Some(OrmError::Metadata { .. }) => Some("metadata"),
        _ => Some("other"),
    }
}

/// Filters evaluated against the `paged_item` rows (ids 0..100, labels `item <id>`).
pub async fn conditions<E: Executor>(executor: &mut E, database: &mut Database) {
    let query = database
        .query("paged_item")
        .expect("paged_item should be registered");
    let cases = [
        (Condition::in_list("id", [1, 2, 3]), 3),
        (Condition::not_in("id", [1, 2, 3]), 97),
        (Condition::between("id", 10, 19), 10),
        (Condition::not_between("id", 10, 19), 90),
        (Condition::ne("id", 0), 99),
        (Condition::any([Condition::lt("id", 5), Condition::gt("id", 95)]), 9),
        (
            Condition::all([Condition::ge("id", 10), Condition::lt("id", 20)])
                .or(Condition::eq("id", 50)),
            11,
        ),
        (
            Condition::eq("id", 50).or(Condition::eq("id", 60)).and(Condition::le("id", 55)),
            1,
        ),
        (
            Condition::eq("id", 50).or(Condition::all([
                Condition::ge("id", 60),
                Condition::le("id", 62),
            ])),
            4,
        ),
        (Condition::like("label", "item 1%"), 11),
        (Condition::not_like("label", "item %"), 0),
        (Condition::is_null("label"), 0),
        (Condition::is_not_null("label"), 100),
        (Condition::eq("label", Value::Varchar(None)), 0),
        (Condition::ne("label", Value::Varchar(None)), 100),
    ];
    for (condition, expected) in cases {
        let count = query
            .clone()
            .filter(condition.clone())
            .count(executor)
            .await
            .unwrap_or_else(|e| panic!("Failed to count {:?}: {:#}", condition, e));
        assert_eq!(count, expected, "{:?}", condition);
    }

    let query = || query.clone();
    assert_eq!(
        kind(
            query()
                .filter(Condition::in_list("id", Vec::<i64>::new()))
                .count(executor)
                .await
        ),
        Some("compile")
    );
    assert_eq!(
        kind(
            query()
                .filter(Condition::lt("id", Value::Null))
                .count(executor)
                .await
        ),
        Some("compile")
    );
    assert_eq!(
        kind(
            query()
                .filter(Condition::eq("missing", 1))
                .count(executor)
                .await
        ),
        Some("metadata")
    );
    assert_eq!(
        kind(
            query()
                .filter(Condition::eq("id", 1).and(Condition::any([])))
                .count(executor)
                .await
        ),
        Some("compile")
    );
}
