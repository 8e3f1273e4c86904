//! Error types for schema queries and schema construction

use tdi_sdk::{TdiId, TdiStatus};

/// Error type for schema queries
///
/// Every variant is a recoverable outcome. Lookups never panic; callers
/// inspect the returned error (or its [`TdiStatus`]) instead of a sentinel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// No key field with this name
    #[error("{table}: Field \"{name}\" not found in key field list")]
    KeyFieldNameNotFound { table: String, name: String },

    /// No key field with this id
    #[error("{table}: Field \"{id}\" not found in key field list")]
    KeyFieldNotFound { table: String, id: TdiId },

    /// No data field with this id in the action or common scope
    #[error("{table}: Data field ID {field_id} actionID {action_id} not found")]
    DataFieldNotFound {
        table: String,
        field_id: TdiId,
        action_id: TdiId,
    },

    /// No data field with this name in the action or common scope
    #[error("{table}: Data field name {name} actionID {action_id} not found")]
    DataFieldNameNotFound {
        table: String,
        name: String,
        action_id: TdiId,
    },

    /// Action id does not exist in the table
    #[error("{table}: Action Id {action_id} Not Found")]
    UnknownAction { table: String, action_id: TdiId },

    /// No action with this name
    #[error("{table}: Action \"{name}\" not found")]
    ActionNameNotFound { table: String, name: String },
}

impl SchemaError {
    /// Status code equivalent of this error
    pub const fn status(&self) -> TdiStatus {
        match self {
            Self::UnknownAction { .. } => TdiStatus::InvalidArg,
            _ => TdiStatus::ObjectNotFound,
        }
    }

    /// Name of the table the failed lookup ran against
    pub fn table(&self) -> &str {
        match self {
            Self::KeyFieldNameNotFound { table, .. }
            | Self::KeyFieldNotFound { table, .. }
            | Self::DataFieldNotFound { table, .. }
            | Self::DataFieldNameNotFound { table, .. }
            | Self::UnknownAction { table, .. }
            | Self::ActionNameNotFound { table, .. } => table,
        }
    }
}

/// Result type for schema queries
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error type for schema construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Id `0` is reserved and cannot name a field or an action
    #[error("{scope}: id 0 is reserved (\"{name}\")")]
    ReservedId { scope: String, name: String },

    /// Two entries in the same map share an id
    #[error("{scope}: duplicate id {id} (\"{name}\")")]
    DuplicateId {
        scope: String,
        id: TdiId,
        name: String,
    },

    /// Two entries in the same map share a name
    #[error("{scope}: duplicate name \"{name}\" (id {id})")]
    DuplicateName {
        scope: String,
        id: TdiId,
        name: String,
    },
}

impl BuildError {
    /// Status code equivalent of this error
    pub const fn status(&self) -> TdiStatus {
        match self {
            Self::ReservedId { .. } => TdiStatus::InvalidArg,
            Self::DuplicateId { .. } | Self::DuplicateName { .. } => TdiStatus::AlreadyExists,
        }
    }
}

/// Result type for schema construction
pub type BuildResult<T> = Result<T, BuildError>;
