//! Action definitions

use tdi_sdk::TdiId;

use super::data::{DataFieldInfo, DataFieldMap};
use crate::annotation::AnnotationSet;
use crate::error::BuildResult;

/// An action of a table and the data fields that exist only when it is
/// selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInfo {
    id: TdiId,
    name: String,
    annotations: AnnotationSet,
    data_fields: DataFieldMap,
}

impl ActionInfo {
    /// Create an action owning `data_fields`
    pub fn new(
        id: TdiId,
        name: impl Into<String>,
        data_fields: impl IntoIterator<Item = DataFieldInfo>,
    ) -> BuildResult<Self> {
        let name = name.into();
        let data_fields = DataFieldMap::try_from_fields(&name, data_fields)?;
        Ok(Self {
            id,
            name,
            annotations: AnnotationSet::new(),
            data_fields,
        })
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

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    /// Data fields specific to this action
    pub fn data_fields(&self) -> &DataFieldMap {
        &self.data_fields
    }
}
