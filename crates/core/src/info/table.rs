//! Table info - the aggregate that owns a table's schema and answers
//! identity queries against it
//!
//! A [`TableInfo`] is assembled once through [`TableInfoBuilder`] and is
//! immutable afterwards, so any number of threads may query it without
//! locking.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::iter;
use std::sync::Arc;

use tdi_sdk::{is_valid_id, TdiId, NO_ACTION};

use super::action::ActionInfo;
use super::data::{DataFieldInfo, DataFieldMap};
use super::key::KeyFieldInfo;
use crate::annotation::{Annotation, AnnotationSet};
use crate::config::SchemaConfig;
use crate::diagnostics::{Severity, SharedSink, TracingSink};
use crate::error::{BuildError, BuildResult, SchemaError, SchemaResult};
use crate::resolver;

/// Schema of one table
pub struct TableInfo {
    id: TdiId,
    name: String,
    annotations: AnnotationSet,
    key_fields: BTreeMap<TdiId, KeyFieldInfo>,
    data_fields: DataFieldMap,
    actions: BTreeMap<TdiId, ActionInfo>,
    action_names: BTreeMap<String, TdiId>,
    config: SchemaConfig,
    sink: SharedSink,
}

impl fmt::Debug for TableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableInfo")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("annotations", &self.annotations)
            .field("key_fields", &self.key_fields)
            .field("data_fields", &self.data_fields)
            .field("actions", &self.actions)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TableInfo {
    /// Start building a table
    pub fn builder(id: TdiId, name: impl Into<String>) -> TableInfoBuilder {
        TableInfoBuilder::new(id, name)
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

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Key fields in ascending id order
    pub fn key_fields(&self) -> impl Iterator<Item = &KeyFieldInfo> {
        self.key_fields.values()
    }

    /// Common (action independent) data fields
    pub fn data_fields(&self) -> &DataFieldMap {
        &self.data_fields
    }

    /// Actions in ascending id order
    pub fn actions(&self) -> impl Iterator<Item = &ActionInfo> {
        self.actions.values()
    }

    /// Report `error` to the sink at `severity` and hand it back
    fn report(&self, severity: Severity, error: SchemaError) -> SchemaError {
        self.sink.report(severity, &error);
        error
    }

    // ========================================================================
    // Key fields
    // ========================================================================

    /// All key field ids, ascending and without duplicates
    pub fn key_field_id_list_get(&self) -> Vec<TdiId> {
        self.key_fields.keys().copied().collect()
    }

    /// Resolve a key field name to its id
    ///
    /// Names match exactly (case sensitive). A miss is reported at error
    /// severity.
    pub fn key_field_id_get(&self, name: &str) -> SchemaResult<TdiId> {
        self.key_fields
            .values()
            .find(|field| field.name() == name)
            .map(KeyFieldInfo::id)
            .ok_or_else(|| {
                self.report(
                    Severity::Error,
                    SchemaError::KeyFieldNameNotFound {
                        table: self.name.clone(),
                        name: name.to_string(),
                    },
                )
            })
    }

    /// Get a key field by id; a miss is reported at error severity
    pub fn key_field_get(&self, field_id: TdiId) -> SchemaResult<&KeyFieldInfo> {
        self.key_fields.get(&field_id).ok_or_else(|| {
            self.report(
                Severity::Error,
                SchemaError::KeyFieldNotFound {
                    table: self.name.clone(),
                    id: field_id,
                },
            )
        })
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// All action ids in ascending order
    pub fn action_id_list_get(&self) -> Vec<TdiId> {
        self.actions.keys().copied().collect()
    }

    /// Resolve an action name to its id; a miss is reported at error severity
    pub fn action_id_get(&self, name: &str) -> SchemaResult<TdiId> {
        self.action_names.get(name).copied().ok_or_else(|| {
            self.report(
                Severity::Error,
                SchemaError::ActionNameNotFound {
                    table: self.name.clone(),
                    name: name.to_string(),
                },
            )
        })
    }

    /// Get an action by id; a miss is reported at error severity
    pub fn action_get(&self, action_id: TdiId) -> SchemaResult<&ActionInfo> {
        self.actions.get(&action_id).ok_or_else(|| {
            self.report(
                Severity::Error,
                SchemaError::UnknownAction {
                    table: self.name.clone(),
                    action_id,
                },
            )
        })
    }

    /// Data field map of a known, non-sentinel action
    fn action_fields(&self, action_id: TdiId) -> Option<&DataFieldMap> {
        if action_id == NO_ACTION {
            return None;
        }
        self.actions.get(&action_id).map(ActionInfo::data_fields)
    }

    // ========================================================================
    // Data fields
    // ========================================================================

    /// Data field ids visible for `action_id`, ascending
    ///
    /// The action's own ids are followed by the common ids and the result is
    /// sorted. An id defined both for the action and in the common scope is
    /// listed twice unless [`SchemaConfig::dedup_data_field_ids`] is set.
    ///
    /// [`NO_ACTION`] lists only common ids. An unknown action is reported at
    /// error severity and contributes nothing; the common ids are still
    /// returned.
    pub fn data_field_id_list_get(&self, action_id: TdiId) -> Vec<TdiId> {
        let mut ids = Vec::new();
        if action_id != NO_ACTION {
            match self.actions.get(&action_id) {
                Some(action) => ids.extend(action.data_fields().ids()),
                None => {
                    self.report(
                        Severity::Error,
                        SchemaError::UnknownAction {
                            table: self.name.clone(),
                            action_id,
                        },
                    );
                }
            }
        }
        ids.extend(self.data_fields.ids());
        ids.sort_unstable();
        if self.config.dedup_data_field_ids {
            ids.dedup();
        }
        ids
    }

    /// Common data field ids, ascending
    pub fn data_field_id_list_get_common(&self) -> Vec<TdiId> {
        self.data_field_id_list_get(NO_ACTION)
    }

    /// Get a top-level data field by id for `action_id`
    ///
    /// The action's field wins over a common field with the same id. Misses
    /// are not reported: this is the probing lookup.
    pub fn data_field_get(
        &self,
        field_id: TdiId,
        action_id: TdiId,
    ) -> SchemaResult<&DataFieldInfo> {
        self.action_fields(action_id)
            .and_then(|fields| fields.get(field_id))
            .or_else(|| self.data_fields.get(field_id))
            .ok_or_else(|| SchemaError::DataFieldNotFound {
                table: self.name.clone(),
                field_id,
                action_id,
            })
    }

    /// Get a top-level common data field by id
    pub fn data_field_get_common(&self, field_id: TdiId) -> SchemaResult<&DataFieldInfo> {
        self.data_field_get(field_id, NO_ACTION)
    }

    /// Resolve a top-level data field name to its id for `action_id`
    ///
    /// Same precedence as [`Self::data_field_get`], and likewise unreported.
    pub fn data_field_id_get(&self, name: &str, action_id: TdiId) -> SchemaResult<TdiId> {
        self.action_fields(action_id)
            .and_then(|fields| fields.get_by_name(name))
            .or_else(|| self.data_fields.get_by_name(name))
            .map(DataFieldInfo::id)
            .ok_or_else(|| SchemaError::DataFieldNameNotFound {
                table: self.name.clone(),
                name: name.to_string(),
                action_id,
            })
    }

    // ========================================================================
    // Nested container resolution
    // ========================================================================

    /// Scopes searched for `action_id`: the action's map, then common
    fn scopes(&self, action_id: TdiId) -> impl Iterator<Item = &DataFieldMap> {
        self.action_fields(action_id)
            .into_iter()
            .chain(iter::once(&self.data_fields))
    }

    /// Find a data field by id, looking inside containers
    ///
    /// Searches the action's fields first, then the common fields, each with
    /// [`resolver::find_by_id`] guided by `container_path`. A miss is
    /// reported at the configured probe severity.
    pub fn data_field_resolve(
        &self,
        field_id: TdiId,
        action_id: TdiId,
        container_path: &[TdiId],
    ) -> SchemaResult<&DataFieldInfo> {
        self.scopes(action_id)
            .find_map(|map| resolver::find_by_id(field_id, map, container_path))
            .ok_or_else(|| {
                self.report(
                    self.config.probe_miss_severity,
                    SchemaError::DataFieldNotFound {
                        table: self.name.clone(),
                        field_id,
                        action_id,
                    },
                )
            })
    }

    /// Find a data field by name, looking inside containers
    ///
    /// Name based counterpart of [`Self::data_field_resolve`].
    pub fn data_field_resolve_by_name(
        &self,
        name: &str,
        action_id: TdiId,
        container_path: &[TdiId],
    ) -> SchemaResult<&DataFieldInfo> {
        self.scopes(action_id)
            .find_map(|map| resolver::find_by_name(name, map, container_path))
            .ok_or_else(|| {
                self.report(
                    self.config.probe_miss_severity,
                    SchemaError::DataFieldNameNotFound {
                        table: self.name.clone(),
                        name: name.to_string(),
                        action_id,
                    },
                )
            })
    }
}

/// Builder for [`TableInfo`]
///
/// # Example
///
/// ```
/// use tdi_core::info::{ActionInfo, DataFieldInfo, KeyFieldInfo, MatchType, TableInfo};
///
/// let table = TableInfo::builder(1, "pipe.SwitchIngress.forward")
///     .key_field(KeyFieldInfo::new(1, "hdr.ethernet.dst_addr", MatchType::Exact))?
///     .action(ActionInfo::new(10, "hit", [DataFieldInfo::leaf(1, "port")])?)?
///     .build();
///
/// assert_eq!(table.key_field_id_get("hdr.ethernet.dst_addr"), Ok(1));
/// assert_eq!(table.data_field_id_list_get(10), vec![1]);
/// # Ok::<(), tdi_core::error::BuildError>(())
/// ```
pub struct TableInfoBuilder {
    id: TdiId,
    name: String,
    annotations: AnnotationSet,
    key_fields: BTreeMap<TdiId, KeyFieldInfo>,
    data_fields: DataFieldMap,
    actions: BTreeMap<TdiId, ActionInfo>,
    action_names: BTreeMap<String, TdiId>,
    config: SchemaConfig,
    sink: Option<SharedSink>,
}

impl TableInfoBuilder {
    pub fn new(id: TdiId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            annotations: AnnotationSet::new(),
            key_fields: BTreeMap::new(),
            data_fields: DataFieldMap::new(),
            actions: BTreeMap::new(),
            action_names: BTreeMap::new(),
            config: SchemaConfig::default(),
            sink: None,
        }
    }

    /// Attach a table annotation
    pub fn annotation(mut self, annotation: impl Into<Annotation>) -> Self {
        self.annotations.insert(annotation.into());
        self
    }

    /// Add a key field
    pub fn key_field(mut self, field: KeyFieldInfo) -> BuildResult<Self> {
        if !is_valid_id(field.id()) {
            return Err(BuildError::ReservedId {
                scope: self.name,
                name: field.name().to_string(),
            });
        }
        if self.key_fields.values().any(|k| k.name() == field.name()) {
            return Err(BuildError::DuplicateName {
                scope: self.name,
                id: field.id(),
                name: field.name().to_string(),
            });
        }
        match self.key_fields.entry(field.id()) {
            btree_map::Entry::Occupied(_) => Err(BuildError::DuplicateId {
                scope: self.name,
                id: field.id(),
                name: field.name().to_string(),
            }),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(field);
                Ok(self)
            }
        }
    }

    /// Add a common data field
    pub fn data_field(mut self, field: DataFieldInfo) -> BuildResult<Self> {
        self.data_fields.insert(&self.name, field)?;
        Ok(self)
    }

    /// Add an action with its data fields
    pub fn action(mut self, action: ActionInfo) -> BuildResult<Self> {
        if !is_valid_id(action.id()) {
            return Err(BuildError::ReservedId {
                scope: self.name,
                name: action.name().to_string(),
            });
        }
        if self.action_names.contains_key(action.name()) {
            return Err(BuildError::DuplicateName {
                scope: self.name,
                id: action.id(),
                name: action.name().to_string(),
            });
        }
        match self.actions.entry(action.id()) {
            btree_map::Entry::Occupied(_) => Err(BuildError::DuplicateId {
                scope: self.name,
                id: action.id(),
                name: action.name().to_string(),
            }),
            btree_map::Entry::Vacant(slot) => {
                self.action_names.insert(action.name().to_string(), action.id());
                slot.insert(action);
                Ok(self)
            }
        }
    }

    /// Set query behaviour
    pub fn config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    /// Send diagnostics to `sink` instead of `tracing`
    pub fn sink(mut self, sink: SharedSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Finish the table; it cannot be changed afterwards
    pub fn build(self) -> TableInfo {
        tracing::debug!(
            "Built table {} (id={}): {} key fields, {} common data fields, {} actions",
            self.name,
            self.id,
            self.key_fields.len(),
            self.data_fields.len(),
            self.actions.len()
        );

        TableInfo {
            id: self.id,
            name: self.name,
            annotations: self.annotations,
            key_fields: self.key_fields,
            data_fields: self.data_fields,
            actions: self.actions,
            action_names: self.action_names,
            config: self.config,
            sink: self
                .sink
                .unwrap_or_else(|| Arc::new(TracingSink) as SharedSink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::annotation_set;
    use crate::diagnostics::RecordingSink;
    use crate::info::{DataFieldFlags, MatchType};

    const ACTION: TdiId = 100;
    const OTHER_ACTION: TdiId = 101;

    /// Key fields {("ipv4_addr", 1), ("port", 2)}
    /// Action 100 fields {5, 6}, action 101 fields {8}, common {5, 7}
    /// Common container C(10) holding X(20)
    fn sample_table(sink: Arc<RecordingSink>, config: SchemaConfig) -> TableInfo {
        TableInfo::builder(1, "pipe.SwitchIngress.ipv4_host")
            .annotation("$tdi_table_class_match")
            .key_field(KeyFieldInfo::new(1, "ipv4_addr", MatchType::Exact).with_size_bits(32))
            .unwrap()
            .key_field(KeyFieldInfo::new(2, "port", MatchType::Exact).with_size_bits(9))
            .unwrap()
            .action(
                ActionInfo::new(
                    ACTION,
                    "SwitchIngress.send",
                    [
                        DataFieldInfo::leaf(5, "action_ttl"),
                        DataFieldInfo::leaf(6, "egress_port"),
                    ],
                )
                .unwrap(),
            )
            .unwrap()
            .action(
                ActionInfo::new(
                    OTHER_ACTION,
                    "SwitchIngress.drop",
                    [DataFieldInfo::leaf(8, "reason")],
                )
                .unwrap(),
            )
            .unwrap()
            .data_field(DataFieldInfo::leaf(5, "common_ttl"))
            .unwrap()
            .data_field(DataFieldInfo::leaf(7, "$ENTRY_TTL").with_flags(DataFieldFlags::MANDATORY))
            .unwrap()
            .data_field(
                DataFieldInfo::container(10, "$COUNTERS", [DataFieldInfo::leaf(20, "$PKTS")])
                    .unwrap(),
            )
            .unwrap()
            .config(config)
            .sink(sink)
            .build()
    }

    fn table_with_sink() -> (TableInfo, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        (sample_table(sink.clone(), SchemaConfig::default()), sink)
    }

    #[test]
    fn test_key_field_id_list_sorted() {
        let (table, _) = table_with_sink();
        assert_eq!(table.key_field_id_list_get(), vec![1, 2]);
    }

    #[test]
    fn test_key_field_id_get() {
        let (table, sink) = table_with_sink();
        assert_eq!(table.key_field_id_get("port"), Ok(2));
        assert_eq!(table.key_field_id_get("ipv4_addr"), Ok(1));
        assert!(sink.is_empty());

        let err = table.key_field_id_get("bogus").unwrap_err();
        assert!(matches!(
            err,
            SchemaError::KeyFieldNameNotFound { ref name, .. } if name == "bogus"
        ));
        assert_eq!(sink.count_at(Severity::Error), 1);
        assert_eq!(sink.records()[0].error.table(), "pipe.SwitchIngress.ipv4_host");
    }

    #[test]
    fn test_key_field_name_is_case_sensitive() {
        let (table, _) = table_with_sink();
        assert!(table.key_field_id_get("PORT").is_err());
    }

    #[test]
    fn test_key_field_get_round_trips() {
        let (table, sink) = table_with_sink();
        for id in table.key_field_id_list_get() {
            assert_eq!(table.key_field_get(id).unwrap().id(), id);
        }
        assert!(sink.is_empty());

        assert!(matches!(
            table.key_field_get(3),
            Err(SchemaError::KeyFieldNotFound { id: 3, .. })
        ));
        assert_eq!(sink.count_at(Severity::Error), 1);
    }

    #[test]
    fn test_data_field_id_list_keeps_duplicates() {
        let (table, sink) = table_with_sink();
        assert_eq!(table.data_field_id_list_get(ACTION), vec![5, 5, 6, 7, 10]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_data_field_id_list_action_plus_common() {
        let table = TableInfo::builder(2, "t")
            .action(
                ActionInfo::new(
                    3,
                    "act",
                    [DataFieldInfo::leaf(5, "a5"), DataFieldInfo::leaf(6, "a6")],
                )
                .unwrap(),
            )
            .unwrap()
            .data_field(DataFieldInfo::leaf(5, "c5"))
            .unwrap()
            .data_field(DataFieldInfo::leaf(7, "c7"))
            .unwrap()
            .sink(Arc::new(RecordingSink::new()))
            .build();

        assert_eq!(table.data_field_id_list_get(3), vec![5, 5, 6, 7]);
        assert_eq!(table.data_field_id_list_get(NO_ACTION), vec![5, 7]);
        assert_eq!(table.data_field_get(5, 3).unwrap().name(), "a5");
        assert_eq!(table.data_field_get(7, 3).unwrap().name(), "c7");
    }

    #[test]
    fn test_data_field_id_list_no_action_is_common_only() {
        let (table, _) = table_with_sink();
        assert_eq!(table.data_field_id_list_get(NO_ACTION), vec![5, 7, 10]);
        assert_eq!(table.data_field_id_list_get_common(), vec![5, 7, 10]);
    }

    #[test]
    fn test_data_field_id_list_unknown_action() {
        let (table, sink) = table_with_sink();
        assert_eq!(table.data_field_id_list_get(999), vec![5, 7, 10]);

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Error);
        assert!(matches!(
            records[0].error,
            SchemaError::UnknownAction { action_id: 999, .. }
        ));
    }

    #[test]
    fn test_data_field_id_list_dedup_config() {
        let sink = Arc::new(RecordingSink::new());
        let config = SchemaConfig {
            dedup_data_field_ids: true,
            ..SchemaConfig::default()
        };
        let table = sample_table(sink, config);
        assert_eq!(table.data_field_id_list_get(ACTION), vec![5, 6, 7, 10]);
    }

    #[test]
    fn test_data_field_get_action_overrides_common() {
        let (table, sink) = table_with_sink();
        assert_eq!(table.data_field_get(5, ACTION).unwrap().name(), "action_ttl");
        assert_eq!(table.data_field_get(7, ACTION).unwrap().name(), "$ENTRY_TTL");
        assert_eq!(table.data_field_get(5, NO_ACTION).unwrap().name(), "common_ttl");
        assert_eq!(table.data_field_get_common(5).unwrap().name(), "common_ttl");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_data_field_get_misses_are_silent() {
        let (table, sink) = table_with_sink();
        // Action field is invisible without its action.
        assert!(table.data_field_get_common(6).is_err());
        // Field of another action.
        assert!(table.data_field_get(8, ACTION).is_err());
        // Unknown action falls back to common.
        assert_eq!(table.data_field_get(7, 999).unwrap().id(), 7);
        assert!(matches!(
            table.data_field_get(6, 999),
            Err(SchemaError::DataFieldNotFound {
                field_id: 6,
                action_id: 999,
                ..
            })
        ));
        // Nested fields are not top-level.
        assert!(table.data_field_get_common(20).is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_data_field_id_get() {
        let (table, sink) = table_with_sink();
        assert_eq!(table.data_field_id_get("egress_port", ACTION), Ok(6));
        assert_eq!(table.data_field_id_get("$ENTRY_TTL", ACTION), Ok(7));
        assert!(table.data_field_id_get("egress_port", NO_ACTION).is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_actions() {
        let (table, sink) = table_with_sink();
        assert_eq!(table.action_id_list_get(), vec![ACTION, OTHER_ACTION]);
        assert_eq!(table.action_id_get("SwitchIngress.drop"), Ok(OTHER_ACTION));
        assert_eq!(table.action_get(ACTION).unwrap().name(), "SwitchIngress.send");
        assert!(sink.is_empty());

        assert!(table.action_id_get("SwitchIngress.nop").is_err());
        assert!(table.action_get(NO_ACTION).is_err());
        assert_eq!(sink.count_at(Severity::Error), 2);
    }

    #[test]
    fn test_resolve_nested_by_id() {
        let (table, sink) = table_with_sink();
        assert_eq!(table.data_field_resolve(20, NO_ACTION, &[]).unwrap().name(), "$PKTS");
        assert_eq!(table.data_field_resolve(20, NO_ACTION, &[10]).unwrap().name(), "$PKTS");
        // Action scope misses, common scope still finds it.
        assert_eq!(table.data_field_resolve(20, ACTION, &[10]).unwrap().id(), 20);
        assert!(sink.is_empty());

        assert!(table.data_field_resolve(20, NO_ACTION, &[11]).is_err());
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Trace);
    }

    #[test]
    fn test_resolve_prefers_action_scope() {
        let (table, _) = table_with_sink();
        assert_eq!(table.data_field_resolve(5, ACTION, &[]).unwrap().name(), "action_ttl");
        assert_eq!(table.data_field_resolve(5, NO_ACTION, &[]).unwrap().name(), "common_ttl");
    }

    #[test]
    fn test_resolve_nested_by_name() {
        let (table, sink) = table_with_sink();
        assert_eq!(table.data_field_resolve_by_name("$PKTS", ACTION, &[]).unwrap().id(), 20);
        assert_eq!(table.data_field_resolve_by_name("$PKTS", NO_ACTION, &[10]).unwrap().id(), 20);
        assert_eq!(
            table.data_field_resolve_by_name("egress_port", ACTION, &[]).unwrap().id(),
            6
        );
        assert!(sink.is_empty());

        assert!(matches!(
            table.data_field_resolve_by_name("$PKTS", NO_ACTION, &[11]),
            Err(SchemaError::DataFieldNameNotFound { .. })
        ));
        assert_eq!(sink.count_at(Severity::Trace), 1);
    }

    #[test]
    fn test_resolve_miss_severity_is_configurable() {
        let sink = Arc::new(RecordingSink::new());
        let config = SchemaConfig {
            probe_miss_severity: Severity::Warn,
            ..SchemaConfig::default()
        };
        let table = sample_table(sink.clone(), config);
        assert!(table.data_field_resolve(42, NO_ACTION, &[]).is_err());
        assert_eq!(sink.count_at(Severity::Warn), 1);
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let builder = TableInfo::builder(1, "t")
            .key_field(KeyFieldInfo::new(1, "a", MatchType::Exact))
            .unwrap();
        assert!(matches!(
            builder.key_field(KeyFieldInfo::new(1, "b", MatchType::Exact)),
            Err(BuildError::DuplicateId { id: 1, .. })
        ));

        let builder = TableInfo::builder(1, "t")
            .key_field(KeyFieldInfo::new(1, "a", MatchType::Exact))
            .unwrap();
        assert!(matches!(
            builder.key_field(KeyFieldInfo::new(2, "a", MatchType::Ternary)),
            Err(BuildError::DuplicateName { id: 2, .. })
        ));

        let builder = TableInfo::builder(1, "t")
            .action(ActionInfo::new(1, "a", Vec::new()).unwrap())
            .unwrap();
        assert!(matches!(
            builder.action(ActionInfo::new(1, "b", Vec::new()).unwrap()),
            Err(BuildError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_reserved_ids() {
        assert!(matches!(
            TableInfo::builder(1, "t").key_field(KeyFieldInfo::new(0, "a", MatchType::Exact)),
            Err(BuildError::ReservedId { .. })
        ));
        assert!(matches!(
            TableInfo::builder(1, "t").action(ActionInfo::new(NO_ACTION, "a", Vec::new()).unwrap()),
            Err(BuildError::ReservedId { .. })
        ));
        assert!(matches!(
            TableInfo::builder(1, "t").data_field(DataFieldInfo::leaf(0, "a")),
            Err(BuildError::ReservedId { .. })
        ));
    }

    #[test]
    fn test_same_id_allowed_across_scopes() {
        let table = TableInfo::builder(1, "t")
            .data_field(DataFieldInfo::leaf(1, "common"))
            .unwrap()
            .action(ActionInfo::new(2, "act", [DataFieldInfo::leaf(1, "own")]).unwrap())
            .unwrap()
            .build();
        assert_eq!(table.data_field_id_list_get(2), vec![1, 1]);
    }

    #[test]
    fn test_table_accessors() {
        let (table, _) = table_with_sink();
        assert_eq!(table.id(), 1);
        assert_eq!(table.name(), "pipe.SwitchIngress.ipv4_host");
        assert_eq!(table.annotations(), &annotation_set(["$tdi_table_class_match"]));
        assert_eq!(table.key_fields().count(), 2);
        assert_eq!(table.data_fields().len(), 3);
        assert_eq!(table.actions().count(), 2);
        assert!(format!("{table:?}").contains("ipv4_host"));
    }

    #[test]
    fn test_table_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TableInfo>();
    }

    #[test]
    fn test_concurrent_readers() {
        let (table, _) = table_with_sink();
        let table = Arc::new(table);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        assert_eq!(table.key_field_id_get("port"), Ok(2));
                        assert_eq!(table.data_field_resolve(20, ACTION, &[]).unwrap().id(), 20);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
