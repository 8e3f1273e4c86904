//! Data field definitions and the id/name indexed data field map

use std::collections::btree_map::{self, BTreeMap};

use bitflags::bitflags;
use tdi_sdk::{is_valid_id, TdiId};

use crate::annotation::AnnotationSet;
use crate::error::{BuildError, BuildResult};

bitflags! {
    /// Properties of a data field
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DataFieldFlags: u32 {
        /// Field can be read but never set in an entry
        const READ_ONLY = 0x01;
        /// Field must be set in every entry that uses its scope
        const MANDATORY = 0x02;
    }
}

/// Leaf or container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataFieldKind {
    /// A plain value field
    Leaf,
    /// A structured field owning its sub-fields
    Container(DataFieldMap),
}

/// A data (parameter) field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFieldInfo {
    id: TdiId,
    name: String,
    size_bits: usize,
    flags: DataFieldFlags,
    annotations: AnnotationSet,
    kind: DataFieldKind,
}

impl DataFieldInfo {
    /// Create a leaf data field
    pub fn leaf(id: TdiId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            size_bits: 0,
            flags: DataFieldFlags::empty(),
            annotations: AnnotationSet::new(),
            kind: DataFieldKind::Leaf,
        }
    }

    /// Create a container data field owning `children`
    ///
    /// Children must have unique, non-reserved ids and unique names.
    pub fn container(
        id: TdiId,
        name: impl Into<String>,
        children: impl IntoIterator<Item = DataFieldInfo>,
    ) -> BuildResult<Self> {
        let name = name.into();
        let map = DataFieldMap::try_from_fields(&name, children)?;
        Ok(Self {
            kind: DataFieldKind::Container(map),
            ..Self::leaf(id, name)
        })
    }

    pub fn with_size_bits(mut self, size_bits: usize) -> Self {
        self.size_bits = size_bits;
        self
    }

    pub fn with_flags(mut self, flags: DataFieldFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_annotations(mut self, annotations: AnnotationSet) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn id(&self) -> TdiId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field width in bits (0 if the loader did not supply one)
    pub fn size_bits(&self) -> usize {
        self.size_bits
    }

    pub fn flags(&self) -> DataFieldFlags {
        self.flags
    }

    pub fn is_read_only(&self) -> bool {
        self.flags.contains(DataFieldFlags::READ_ONLY)
    }

    pub fn is_mandatory(&self) -> bool {
        self.flags.contains(DataFieldFlags::MANDATORY)
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn kind(&self) -> &DataFieldKind {
        &self.kind
    }

    /// Check if this field is a container with at least one sub-field
    ///
    /// Only such fields are descended into during nested resolution.
    pub fn is_container(&self) -> bool {
        self.container_map().is_some()
    }

    /// Nested sub-field map, if this is a non-empty container
    pub fn container_map(&self) -> Option<&DataFieldMap> {
        match &self.kind {
            DataFieldKind::Container(map) if !map.is_empty() => Some(map),
            _ => None,
        }
    }
}

/// Data fields of one scope, indexed by id and by name
///
/// Iteration by id yields ascending ids; iteration by name yields names in
/// lexicographic order. Both orders are deterministic, which makes nested
/// resolution deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFieldMap {
    by_id: BTreeMap<TdiId, DataFieldInfo>,
    by_name: BTreeMap<String, TdiId>,
}

impl DataFieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from fields, rejecting reserved ids and duplicates
    ///
    /// `scope` names the owner (table, action or container) in errors.
    pub fn try_from_fields(
        scope: &str,
        fields: impl IntoIterator<Item = DataFieldInfo>,
    ) -> BuildResult<Self> {
        let mut map = Self::new();
        for field in fields {
            map.insert(scope, field)?;
        }
        Ok(map)
    }

    /// Insert a field, rejecting reserved ids and duplicates
    pub fn insert(&mut self, scope: &str, field: DataFieldInfo) -> BuildResult<()> {
        if !is_valid_id(field.id) {
            return Err(BuildError::ReservedId {
                scope: scope.to_string(),
                name: field.name,
            });
        }
        if self.by_name.contains_key(&field.name) {
            return Err(BuildError::DuplicateName {
                scope: scope.to_string(),
                id: field.id,
                name: field.name,
            });
        }
        match self.by_id.entry(field.id) {
            btree_map::Entry::Occupied(_) => Err(BuildError::DuplicateId {
                scope: scope.to_string(),
                id: field.id,
                name: field.name,
            }),
            btree_map::Entry::Vacant(slot) => {
                self.by_name.insert(field.name.clone(), field.id);
                slot.insert(field);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: TdiId) -> Option<&DataFieldInfo> {
        self.by_id.get(&id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&DataFieldInfo> {
        self.by_name.get(name).and_then(|id| self.by_id.get(id))
    }

    pub fn contains(&self, id: TdiId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Field ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = TdiId> + '_ {
        self.by_id.keys().copied()
    }

    /// Fields in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &DataFieldInfo> {
        self.by_id.values()
    }

    /// Fields in lexicographic name order
    pub fn iter_by_name(&self) -> impl Iterator<Item = &DataFieldInfo> {
        self.by_name.values().filter_map(|id| self.by_id.get(id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
