use crate::{Entity, ErrorSite, Feature, Operation, OrmError, Result, RowLabeled, TableDef, Value};
use std::{
    any::{TypeId, type_name},
    sync::Arc,
};

/// Correspondence between the columns of a table and the properties of an entity type.
///
/// Resolved once per table and entity type from the column aliases, then cached in the
/// table feature registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    entity: TypeId,
    entity_name: &'static str,
    table: String,
    /// (column name, property name), in column order.
    entries: Vec<(String, &'static str)>,
}

impl ColumnMapping {
    /// The cached mapping of `E` on `table`, resolved and cached on the first call.
    pub fn resolve<E: Entity>(table: &TableDef) -> Arc<ColumnMapping> {
        let entity = TypeId::of::<E>();
        if let Some(mapping) = table.features.column_mapping(entity) {
            return mapping;
        }
        let properties = E::properties();
        let entries = table
            .columns
            .iter()
            .filter_map(|column| {
                let wanted = column.property();
                properties
                    .iter()
                    .find(|v| **v == wanted)
                    .or_else(|| properties.iter().find(|v| v.eq_ignore_ascii_case(wanted)))
                    .map(|property| (column.name.to_string(), *property))
            })
            .collect::<Vec<_>>();
        if entries.len() < table.columns.len() {
            log::debug!(
                "{} maps {} of the {} columns of `{}`",
                type_name::<E>(),
                entries.len(),
                table.columns.len(),
                table.name
            );
        }
        let mapping = Arc::new(ColumnMapping {
            entity,
            entity_name: type_name::<E>(),
            table: table.name.to_string(),
            entries,
        });
        table
            .features
            .add_feature(Feature::ColumnMapping(mapping.clone()));
        mapping
    }

    pub fn entity(&self) -> TypeId {
        self.entity
    }

    pub fn entries(&self) -> &[(String, &'static str)] {
        &self.entries
    }

    pub fn property_of(&self, column: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(column))
            .map(|(_, p)| *p)
    }

    pub fn column_of(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, p)| *p == property)
            .map(|(c, _)| c.as_str())
    }

    /// Build an entity from a row. Unmapped columns are ignored, properties without a column
    /// keep their default.
    pub fn wrap<E: Entity>(&self, row: &RowLabeled) -> Result<E> {
        debug_assert_eq!(self.entity, TypeId::of::<E>());
        let mut entity = E::default();
        for (label, value) in row.iter() {
            let Some(property) = self.property_of(label) else {
                continue;
            };
            entity
                .set_property(property, value.clone())
                .map_err(|e| {
                    OrmError::mapping(
                        ErrorSite::new(Operation::Mapping, self.table.as_str()).column(label),
                        format!(
                            "cannot set {}.{}: {:#}",
                            self.entity_name, property, e
                        ),
                    )
                    .logged()
                })?;
        }
        Ok(entity)
    }

    /// Mapped (column, value) pairs of an entity, in column order.
    pub fn values<E: Entity>(&self, entity: &E) -> Vec<(&str, Value)> {
        self.entries
            .iter()
            .filter_map(|(column, property)| {
                entity
                    .property(property)
                    .map(|value| (column.as_str(), value))
            })
            .collect()
    }
}
