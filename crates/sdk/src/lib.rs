//! TDI SDK - Table Driven Interface shared type definitions
//!
//! This crate contains the id type and status codes shared between the
//! schema engine and the code that encodes table entries with it.
//! It has no dependencies and compiles quickly, allowing parallel compilation
//! of dependent crates.
//!
//! # Modules
//!
//! - [`ids`] - Numeric id type and reserved id values
//! - [`status`] - Status codes for callers that speak numeric statuses

pub mod ids;
pub mod status;

pub use ids::*;
pub use status::{TdiStatus, STATUS_NAMES};
