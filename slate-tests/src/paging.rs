use slate::{
    ColumnDef, Condition, Database, Executor, Order, Repository, TableDef, entity,
    stream::TryStreamExt,
};

#[derive(Default, Debug, Clone, PartialEq)]
struct PagedItem {
    id: i64,
    label: String,
}
entity!(PagedItem { id, label });

pub async fn paging<E: Executor>(executor: &mut E, database: &mut Database) {
    database
        .create_or_alter(
            TableDef::new("paged_item")
                .column(ColumnDef::of::<i64>("id").primary_key())
                .column(ColumnDef::of::<String>("label").length(16).not_null()),
        )
        .commit(executor)
        .await
        .expect("Failed to create paged_item");
    let repository = Repository::<PagedItem>::new(database, "paged_item")
        .expect("Failed to build the paged_item repository");
    let items = (0..100)
        .map(|id| PagedItem {
            id,
            label: format!("item {}", id),
        })
        .collect::<Vec<_>>();
    assert_eq!(
        repository
            .insert_batch(executor, &items, None)
            .await
            .expect("Failed to insert the items"),
        100
    );

    let page = repository
        .create_query()
        .order_by("id", Order::Asc)
        .paging(3, 10)
        .fetch(executor)
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to fetch page 3");
    assert_eq!(page, items[30..40]);
    let first = repository
        .create_query()
        .order_by("id", Order::Asc)
        .paging(3, 10)
        .fetch_one(executor)
        .await
        .expect("Failed to fetch the first item of page 3");
    assert_eq!(first.as_ref(), Some(&items[30]));

    // Pages partition the ordered result
    let mut union = Vec::new();
    for index in 0..7 {
        let page = repository
            .create_query()
            .order_by("id", Order::Desc)
            .paging(index, 15)
            .fetch(executor)
            .try_collect::<Vec<_>>()
            .await
            .expect("Failed to fetch a page");
        assert!(page.len() <= 15);
        assert!(page.iter().all(|v| !union.contains(v)));
        union.extend(page);
    }
    let full = repository
        .create_query()
        .order_by("id", Order::Desc)
        .fetch(executor)
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to fetch every item");
    assert_eq!(union, full);
    assert_eq!(full.len(), 100);

    // Past the end
    let page = repository
        .create_query()
        .order_by("id", Order::Asc)
        .paging(10, 10)
        .fetch(executor)
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to fetch the page after the last one");
    assert!(page.is_empty());

    // Limit and count ignore each other
    let query = repository
        .create_query()
        .filter(Condition::ge("id", 90))
        .order_by("id", Order::Asc)
        .limit(3);
    let first = query
        .fetch(executor)
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to fetch with limit");
    assert_eq!(first, items[90..93]);
    assert_eq!(query.count(executor).await.expect("Failed to count"), 10);
}
