//! Numeric id definitions
//!
//! Tables, actions, key fields and data fields are all identified by a
//! 32-bit id. Id `0` is reserved in every id space: it never names a field
//! or an action, and doubles as the "no action selected" selector.

/// Identifier of a table, action, key field or data field
pub type TdiId = u32;

/// Action selector meaning "no action", i.e. only common data fields
pub const NO_ACTION: TdiId = 0;

/// Reserved id that never names a field or an action
pub const RESERVED_ID: TdiId = 0;

/// Check whether an id is usable for a field or an action
#[inline]
pub const fn is_valid_id(id: TdiId) -> bool {
    id != RESERVED_ID
}
