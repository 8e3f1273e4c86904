//! Annotations - opaque tags attached to tables, actions and fields
//!
//! An annotation is identified only by its fully qualified name. Ordering
//! and equality are defined on that name, so annotations can be kept in a
//! sorted, de-duplicated [`AnnotationSet`].

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Sorted, de-duplicated set of annotations
pub type AnnotationSet = BTreeSet<Annotation>;

/// An opaque, fully qualified tag name
#[derive(Debug, Clone, Eq, Hash)]
pub struct Annotation {
    full_name: String,
}

impl Annotation {
    /// Create an annotation from its fully qualified name
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
        }
    }

    /// Borrow the fully qualified name
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Get an owned copy of the fully qualified name
    pub fn full_name_get(&self) -> String {
        self.full_name.clone()
    }

    /// Strict weak order: `true` if `a` sorts before `b`
    pub fn compare(a: &Self, b: &Self) -> bool {
        a.full_name < b.full_name
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name
    }
}

impl PartialEq<str> for Annotation {
    fn eq(&self, other: &str) -> bool {
        self.full_name == other
    }
}

impl PartialEq<&str> for Annotation {
    fn eq(&self, other: &&str) -> bool {
        self.full_name == *other
    }
}

impl PartialEq<String> for Annotation {
    fn eq(&self, other: &String) -> bool {
        &self.full_name == other
    }
}

impl PartialOrd for Annotation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Annotation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.full_name.cmp(&other.full_name)
    }
}

// Lets `AnnotationSet::contains("name")` work without building an Annotation.
// Consistent with Ord/Eq since both are defined on `full_name` alone.
impl Borrow<str> for Annotation {
    fn borrow(&self) -> &str {
        &self.full_name
    }
}

impl From<&str> for Annotation {
    fn from(full_name: &str) -> Self {
        Self::new(full_name)
    }
}

impl From<String> for Annotation {
    fn from(full_name: String) -> Self {
        Self::new(full_name)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// Build an annotation set from names
pub fn annotation_set<I, S>(names: I) -> AnnotationSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Annotation::new).collect()
}
