//! TDI Core - Table schema and field resolution engine
//!
//! This crate holds the in-memory schema of tables (key fields, actions,
//! common and per-action data fields, nested container fields) and answers
//! identity queries against it: which key field ids exist, which id a name
//! maps to, which data field sits behind a (field id, action id) pair, and
//! where a field lives under a path of nested containers.
//!
//! Building the schema from a definition file is the loader's job; this
//! crate takes the already-populated maps through [`info::TableInfoBuilder`]
//! and never mutates them afterwards.
//!
//! # Re-exports
//!
//! - [`sdk`] - id type, reserved ids and status codes

pub use tdi_sdk as sdk;

pub mod annotation;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod info;
pub mod registry;
pub mod resolver;

// Re-export commonly used items
pub use annotation::{annotation_set, Annotation, AnnotationSet};
pub use config::{ConfigError, ConfigResult, SchemaConfig};
pub use diagnostics::{
    Diagnostic, DiagnosticSink, NullSink, RecordingSink, Severity, SharedSink, TracingSink,
};
pub use error::{BuildError, BuildResult, SchemaError, SchemaResult};
pub use info::{
    ActionInfo, DataFieldFlags, DataFieldInfo, DataFieldKind, DataFieldMap, KeyFieldInfo,
    MatchType, TableInfo, TableInfoBuilder,
};
pub use registry::{RegistryError, SchemaRegistry};
pub use tdi_sdk::{TdiId, TdiStatus, NO_ACTION};
