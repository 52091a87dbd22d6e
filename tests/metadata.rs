#[cfg(test)]
mod tests {
    use slate::{
        ColumnDef, Database, DEFAULT_CHUNK_SIZE, Feature, FeatureId, FeatureRegistry,
        GenericDialect, OrmError, TableDef,
    };
    use slate_mysql::MySqlDialect;
    use std::sync::Arc;

    fn table(name: &str) -> TableDef {
        TableDef::new(name.to_string()).column(ColumnDef::of::<i64>("id").primary_key())
    }

    #[test]
    fn schemas() {
        let mut database = Database::new(GenericDialect);
        assert_eq!(database.current_schema(), "");
        database.add_table(table("user")).unwrap();
        database.add_table(table("user").schema("audit")).unwrap();
        database.add_table(table("event").schema("audit")).unwrap();

        assert_eq!(database.table("user").unwrap().schema, "");
        assert_eq!(database.table("audit.user").unwrap().schema, "audit");
        assert!(database.table("event").is_err());
        assert!(database.table("AUDIT.EVENT").is_err());
        assert!(database.table("audit.EVENT").is_ok());
        assert_eq!(
            database
                .schema("audit")
                .unwrap()
                .tables()
                .map(|v| v.name())
                .collect::<Vec<_>>(),
            ["event", "user"]
        );

        database.set_current_schema("audit");
        assert!(database.table("event").is_ok());
        assert!(database.find_table(Some(""), "user").is_some());
        let error = database.table("nowhere").unwrap_err();
        let Some(OrmError::Metadata { site, .. }) = error.downcast_ref::<OrmError>() else {
            panic!("Expected a metadata error, got {:#}", error);
        };
        assert_eq!(site.table, "nowhere");
    }

    #[test]
    fn replace_table() {
        let mut database = Database::new(GenericDialect);
        database.add_table(table("item")).unwrap();
        database
            .add_table(table("item").column(ColumnDef::of::<String>("label")))
            .unwrap();
        let item = database.table("item").unwrap();
        assert_eq!(item.columns.len(), 2);
        assert!(item.find_column("LABEL").is_some());
    }

    #[test]
    fn column_lookup() {
        let table = table("item")
            .column(ColumnDef::of::<String>("item_label").alias("label"))
            .column(ColumnDef::of::<i32>("qty"));
        assert_eq!(table.find_column("label").unwrap().name(), "item_label");
        assert_eq!(table.find_column("Item_Label").unwrap().name(), "item_label");
        assert!(table.find_column("Label").is_none());
        assert_eq!(
            table.primary_key().map(|v| v.name()).collect::<Vec<_>>(),
            ["id"]
        );
        let replaced = table.column(ColumnDef::of::<i64>("QTY"));
        assert_eq!(
            replaced.columns.iter().map(|v| v.name()).collect::<Vec<_>>(),
            ["id", "item_label", "QTY"]
        );
    }

    #[test]
    fn features() {
        let registry = FeatureRegistry::new();
        assert!(registry.chunk_size().is_none());
        registry.add_feature(Feature::ChunkSize(10));
        registry.add_feature(Feature::ChunkSize(20));
        assert_eq!(registry.chunk_size(), Some(20));
        assert!(matches!(
            registry.get_feature(FeatureId::ChunkSize),
            Some(Feature::ChunkSize(20))
        ));
        let copy = registry.clone();
        registry.add_feature(Feature::ChunkSize(30));
        assert_eq!(copy.chunk_size(), Some(20));

        let database = Database::new(GenericDialect);
        assert_eq!(database.chunk_size(), DEFAULT_CHUNK_SIZE);
        assert_eq!(database.dialect().name(), "generic");
        database
            .features
            .add_feature(Feature::Dialect(Arc::new(MySqlDialect)));
        assert_eq!(database.dialect().name(), "mysql");
    }

    #[test]
    fn table_features_independent() {
        let mut database = Database::new(GenericDialect);
        let first = table("first");
        first.features.add_feature(Feature::ChunkSize(7));
        let first = database.add_table(first).unwrap();
        let second = database.add_table(table("second")).unwrap();
        assert_eq!(first.features.chunk_size(), Some(7));
        assert_eq!(second.features.chunk_size(), None);
        assert_eq!(database.features.chunk_size(), None);
    }
}
