//! Cached per-index descriptors.

use crate::storage::DbiHandle;

use super::spec::IndexSpec;

/// Read-only snapshot of one registered index.
///
/// Owned by the index-management layer's cache and only borrowed here; it
/// is invalidated and rebuilt externally on schema change. The core never
/// mutates a descriptor.
#[derive(Debug, Clone)]
pub struct IndexDescriptor {
    /// Index name, unique per collection
    pub name: String,
    /// Ordered field/direction definition
    pub spec: IndexSpec,
    /// Rejects duplicate keys at write time
    pub unique: bool,
    /// Omits documents lacking all indexed fields
    pub sparse: bool,
    /// Storage-engine database holding this index's entries
    pub dbi: DbiHandle,
}

impl IndexDescriptor {
    /// Creates a non-unique, non-sparse descriptor
    pub fn new(name: impl Into<String>, spec: IndexSpec, dbi: DbiHandle) -> Self {
        Self {
            name: name.into(),
            spec,
            unique: false,
            sparse: false,
            dbi,
        }
    }

    /// Marks the index unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks the index sparse
    pub fn sparse(mut self) -> Self {
        self.sparse = true;
        self
    }
}
