//! Status codes
//!
//! Numeric status values returned across the table driven interface.
//! The schema engine itself reports typed errors; these codes exist for
//! callers that forward results over a C-style boundary.

/// Status of a table driven interface operation
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TdiStatus {
    /// Operation succeeded
    Success = 0,
    /// Invalid argument (e.g. unknown action id)
    InvalidArg = 3,
    /// Requested object does not exist
    ObjectNotFound = 6,
    /// Object already exists
    AlreadyExists = 7,
    /// Operation not supported
    NotSupported = 13,
}

impl TdiStatus {
    /// Numeric value of this status
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Short human readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InvalidArg => "Invalid argument",
            Self::ObjectNotFound => "Object not found",
            Self::AlreadyExists => "Already exists",
            Self::NotSupported => "Not supported",
        }
    }

    /// Look up a status from its numeric value
    pub fn from_code(code: i32) -> Option<Self> {
        STATUS_NAMES
            .iter()
            .find(|(status, _)| status.code() == code)
            .map(|(status, _)| *status)
    }

    /// Check if this status means success
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Collected statuses for iteration
pub const STATUS_NAMES: &[(TdiStatus, &str)] = &[
    (TdiStatus::Success, TdiStatus::Success.name()),
    (TdiStatus::InvalidArg, TdiStatus::InvalidArg.name()),
    (TdiStatus::ObjectNotFound, TdiStatus::ObjectNotFound.name()),
    (TdiStatus::AlreadyExists, TdiStatus::AlreadyExists.name()),
    (TdiStatus::NotSupported, TdiStatus::NotSupported.name()),
];
