//! Key (match) field definitions

use std::fmt;

use tdi_sdk::TdiId;

use crate::annotation::AnnotationSet;

/// How a key field is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchType {
    #[default]
    Exact,
    Ternary,
    Range,
    Lpm,
    Optional,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Exact => "Exact",
            Self::Ternary => "Ternary",
            Self::Range => "Range",
            Self::Lpm => "LPM",
            Self::Optional => "Optional",
        };
        f.write_str(s)
    }
}

/// A match key field of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFieldInfo {
    id: TdiId,
    name: String,
    match_type: MatchType,
    size_bits: usize,
    mandatory: bool,
    annotations: AnnotationSet,
}

impl KeyFieldInfo {
    /// Create a key field with the given match type
    pub fn new(id: TdiId, name: impl Into<String>, match_type: MatchType) -> Self {
        Self {
            id,
            name: name.into(),
            match_type,
            size_bits: 0,
            mandatory: false,
            annotations: AnnotationSet::new(),
        }
    }

    /// Set the field width in bits
    pub fn with_size_bits(mut self, size_bits: usize) -> Self {
        self.size_bits = size_bits;
        self
    }

    /// Mark the field as mandatory in every entry
    pub fn with_mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    /// Attach annotations
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

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    /// Field width in bits (0 if the loader did not supply one)
    pub fn size_bits(&self) -> usize {
        self.size_bits
    }

    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }
}
