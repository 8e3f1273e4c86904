//! Schema info types
//!
//! The in-memory description of one table, as handed over by the schema
//! loader. Everything here is built once and never mutated afterwards.
//!
//! # Ownership
//!
//! ```text
//! TableInfo
//!  ├── key fields     BTreeMap<TdiId, KeyFieldInfo>
//!  ├── common data    DataFieldMap
//!  │                   └── DataFieldInfo ── Container(DataFieldMap) ── ...
//!  └── actions        BTreeMap<TdiId, ActionInfo>
//!                      └── DataFieldMap
//! ```
//!
//! Each map exclusively owns its entries. Container fields own their nested
//! map, so nesting is always a tree. Queries hand out borrows tied to the
//! owning [`TableInfo`].

pub mod action;
pub mod data;
pub mod key;
pub mod table;

pub use action::ActionInfo;
pub use data::{DataFieldFlags, DataFieldInfo, DataFieldKind, DataFieldMap};
pub use key::{KeyFieldInfo, MatchType};
pub use table::{TableInfo, TableInfoBuilder};
