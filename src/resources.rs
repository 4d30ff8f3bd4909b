//! Resource Namespace
//!
//! The declarative key/type/value store that tracking parameters are
//! read from. Every value is stored as a string; typing happens when a
//! parameter loader interprets it, so a boolean resource holding
//! `"TRUE"` and an integer resource holding `"abc"` are both
//! representable, exactly as a host's resource subsystem would hand
//! them over.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The three resource types a parameter loader can resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    String,
    Bool,
    Integer,
}

impl ResourceKind {
    /// Declared type name, as used in resource lookups
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::String => "string",
            ResourceKind::Bool => "bool",
            ResourceKind::Integer => "integer",
        }
    }
}

/// A resolved resource identifier
///
/// An identifier of zero means the resource is not present. Absence is
/// not an error anywhere in this crate; presence of any given key is
/// optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResourceId(pub u32);

impl ResourceId {
    /// The "not present" identifier
    pub const ABSENT: ResourceId = ResourceId(0);

    /// Whether this identifier denotes an absent resource
    pub fn is_absent(&self) -> bool {
        self.0 == 0
    }
}

/// In-memory declarative resource table
///
/// One map per resource kind. Hosts can declare the table in TOML:
///
/// ```toml
/// [strings]
/// ga_trackingId = "UA-000000-1"
///
/// [bools]
/// ga_debug = "true"
///
/// [integers]
/// ga_dispatchPeriod = "30"
/// ```
///
/// Identifiers are assigned per entry and stay stable while the table
/// is not modified.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceTable {
    /// String resources
    #[serde(default)]
    pub strings: BTreeMap<String, String>,
    /// Boolean resources (string-valued, matched case-insensitively)
    #[serde(default)]
    pub bools: BTreeMap<String, String>,
    /// Integer resources (string-valued, parsed at access time)
    #[serde(default)]
    pub integers: BTreeMap<String, String>,
}

impl ResourceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from its TOML representation
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Add or replace an entry
    pub fn insert(
        &mut self,
        kind: ResourceKind,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.kind_map_mut(kind).insert(key.into(), value.into());
    }

    /// Look up the identifier for `key` under the declared `kind`
    ///
    /// Returns [`ResourceId::ABSENT`] when no such entry exists.
    pub fn resource_id(&self, key: &str, kind: ResourceKind) -> ResourceId {
        match self.kind_map(kind).keys().position(|k| k == key) {
            Some(pos) => ResourceId(self.base_id(kind) + pos as u32),
            None => ResourceId::ABSENT,
        }
    }

    /// Resolve an identifier back to its raw string value
    pub fn string_value(&self, id: ResourceId) -> Option<&str> {
        if id.is_absent() {
            return None;
        }
        let mut index = (id.0 - 1) as usize;
        for kind in [ResourceKind::String, ResourceKind::Bool, ResourceKind::Integer] {
            let map = self.kind_map(kind);
            if index < map.len() {
                return map.values().nth(index).map(String::as_str);
            }
            index -= map.len();
        }
        None
    }

    /// Total number of entries across all kinds
    pub fn len(&self) -> usize {
        self.strings.len() + self.bools.len() + self.integers.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn kind_map(&self, kind: ResourceKind) -> &BTreeMap<String, String> {
        match kind {
            ResourceKind::String => &self.strings,
            ResourceKind::Bool => &self.bools,
            ResourceKind::Integer => &self.integers,
        }
    }

    fn kind_map_mut(&mut self, kind: ResourceKind) -> &mut BTreeMap<String, String> {
        match kind {
            ResourceKind::String => &mut self.strings,
            ResourceKind::Bool => &mut self.bools,
            ResourceKind::Integer => &mut self.integers,
        }
    }

    // Identifiers are 1-based; each kind's block starts after the
    // previous kind's entries.
    fn base_id(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::String => 1,
            ResourceKind::Bool => 1 + self.strings.len() as u32,
            ResourceKind::Integer => 1 + (self.strings.len() + self.bools.len()) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_has_zero_id() {
        let table = ResourceTable::new();
        let id = table.resource_id("ga_trackingId", ResourceKind::String);
        assert_eq!(id, ResourceId::ABSENT);
        assert!(id.is_absent());
        assert_eq!(table.string_value(id), None);
    }

    #[test]
    fn test_lookup_round_trip_per_kind() {
        let mut table = ResourceTable::new();
        table.insert(ResourceKind::String, "ga_trackingId", "UA-000000-1");
        table.insert(ResourceKind::Bool, "ga_debug", "true");
        table.insert(ResourceKind::Integer, "ga_dispatchPeriod", "30");

        let id = table.resource_id("ga_trackingId", ResourceKind::String);
        assert!(!id.is_absent());
        assert_eq!(table.string_value(id), Some("UA-000000-1"));

        let id = table.resource_id("ga_debug", ResourceKind::Bool);
        assert_eq!(table.string_value(id), Some("true"));

        let id = table.resource_id("ga_dispatchPeriod", ResourceKind::Integer);
        assert_eq!(table.string_value(id), Some("30"));
    }

    #[test]
    fn test_kinds_do_not_alias() {
        let mut table = ResourceTable::new();
        table.insert(ResourceKind::String, "ga_debug", "not-a-bool");
        assert!(table.resource_id("ga_debug", ResourceKind::Bool).is_absent());
        assert!(table
            .resource_id("ga_debug", ResourceKind::Integer)
            .is_absent());
    }

    #[test]
    fn test_from_toml() {
        let table = ResourceTable::from_toml_str(
            r#"
            [strings]
            ga_trackingId = "UA-000000-1"

            [integers]
            ga_dispatchPeriod = "30"
            "#,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        let id = table.resource_id("ga_trackingId", ResourceKind::String);
        assert_eq!(table.string_value(id), Some("UA-000000-1"));
        assert!(table.bools.is_empty());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(ResourceTable::from_toml_str("[strings\n").is_err());
    }
}
