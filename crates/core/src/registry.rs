//! Schema registry - publication point for built tables
//!
//! Tables are built by the loader, then published here. Publication hands
//! the table over to an `Arc`, so a reader only ever sees a fully built,
//! immutable table and can keep using it after the registry lookup returns.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tdi_sdk::{TdiId, TdiStatus};

use crate::info::TableInfo;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Table \"{0}\" already published")]
    DuplicateName(String),

    #[error("Table id {id} already published as \"{existing}\"")]
    DuplicateId { id: TdiId, existing: String },
}

impl RegistryError {
    /// Status code equivalent of this error
    pub const fn status(&self) -> TdiStatus {
        TdiStatus::AlreadyExists
    }
}

/// Published tables, indexed by name and by id
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    by_name: DashMap<String, Arc<TableInfo>>,
    by_id: DashMap<TdiId, String>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a built table
    ///
    /// Fails if a table with the same name or id is already published; the
    /// registry is left unchanged in that case.
    pub fn publish(&self, table: TableInfo) -> Result<Arc<TableInfo>, RegistryError> {
        // Lock order is always by_name then by_id.
        let name_slot = match self.by_name.entry(table.name().to_string()) {
            Entry::Occupied(entry) => {
                return Err(RegistryError::DuplicateName(entry.key().clone()));
            }
            Entry::Vacant(slot) => slot,
        };

        let id_slot = match self.by_id.entry(table.id()) {
            Entry::Occupied(entry) => {
                return Err(RegistryError::DuplicateId {
                    id: table.id(),
                    existing: entry.get().clone(),
                });
            }
            Entry::Vacant(slot) => slot,
        };

        let table = Arc::new(table);
        id_slot.insert(table.name().to_string());
        name_slot.insert(Arc::clone(&table));

        tracing::debug!("Published table {} (id={})", table.name(), table.id());
        Ok(table)
    }

    /// Get a published table by name
    pub fn table_get(&self, name: &str) -> Option<Arc<TableInfo>> {
        self.by_name.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Get a published table by id
    pub fn table_from_id_get(&self, id: TdiId) -> Option<Arc<TableInfo>> {
        let name = self.by_id.get(&id)?.value().clone();
        self.table_get(&name)
    }

    /// Names of all published tables, sorted
    pub fn table_name_list_get(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_name.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }

    /// Check if a table with this name is published
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of published tables
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if no table is published
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
