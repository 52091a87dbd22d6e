use crate::{ColumnMapping, Dialect};
use std::{
    any::TypeId,
    collections::HashMap,
    fmt::{self, Debug},
    sync::{Arc, RwLock},
};

/// Default number of rows per chunk of a batch insert.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Key of a capability slot in a [`FeatureRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureId {
    Dialect,
    ChunkSize,
    /// Column mapping of the entity with this type id.
    ColumnMapping(TypeId),
}

/// Capability attached to a metadata node.
#[derive(Clone)]
pub enum Feature {
    Dialect(Arc<dyn Dialect>),
    ChunkSize(usize),
    ColumnMapping(Arc<ColumnMapping>),
}

impl Feature {
    pub fn id(&self) -> FeatureId {
        match self {
            Feature::Dialect(..) => FeatureId::Dialect,
            Feature::ChunkSize(..) => FeatureId::ChunkSize,
            Feature::ColumnMapping(v) => FeatureId::ColumnMapping(v.entity()),
        }
    }
}

impl Debug for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Dialect(v) => write!(f, "Dialect({})", v.name()),
            Feature::ChunkSize(v) => write!(f, "ChunkSize({})", v),
            Feature::ColumnMapping(v) => write!(f, "ColumnMapping({:?})", v),
        }
    }
}

/// Typed capability lookup. Registering a feature replaces the previous one with the same id.
///
/// Interior mutability lets lazily resolved features (column mappings) be cached on shared
/// metadata.
#[derive(Default)]
pub struct FeatureRegistry {
    features: RwLock<HashMap<FeatureId, Feature>>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add_feature(&self, feature: Feature) {
        let mut features = match self.features.write() {
            Ok(v) => v,
            Err(poisoned) => poisoned.into_inner(),
        };
        features.insert(feature.id(), feature);
    }
    pub fn get_feature(&self, id: FeatureId) -> Option<Feature> {
        let features = match self.features.read() {
            Ok(v) => v,
            Err(poisoned) => poisoned.into_inner(),
        };
        features.get(&id).cloned()
    }
    pub fn dialect(&self) -> Option<Arc<dyn Dialect>> {
        match self.get_feature(FeatureId::Dialect) {
            Some(Feature::Dialect(v)) => Some(v),
            _ => None,
        }
    }
    pub fn chunk_size(&self) -> Option<usize> {
        match self.get_feature(FeatureId::ChunkSize) {
            Some(Feature::ChunkSize(v)) => Some(v),
            _ => None,
        }
    }
    pub fn column_mapping(&self, entity: TypeId) -> Option<Arc<ColumnMapping>> {
        match self.get_feature(FeatureId::ColumnMapping(entity)) {
            Some(Feature::ColumnMapping(v)) => Some(v),
            _ => None,
        }
    }
}

impl Clone for FeatureRegistry {
    fn clone(&self) -> Self {
        let features = match self.features.read() {
            Ok(v) => v.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        Self {
            features: RwLock::new(features),
        }
    }
}

impl Debug for FeatureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let features = match self.features.read() {
            Ok(v) => v,
            Err(poisoned) => poisoned.into_inner(),
        };
        f.debug_list().entries(features.values()).finish()
    }
}
