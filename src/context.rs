//! Application Context
//!
//! The seam between this crate and the host environment. A context
//! exposes three things: resource lookup in the application's own
//! package, package metadata, and an optional application-supplied
//! customization capability for version-string computation.
//!
//! Hosts with a real platform bridge implement [`AppContext`]
//! themselves; [`InMemoryContext`] covers embedding without one, and
//! all the tests in this crate.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackletError};
use crate::resources::{ResourceId, ResourceKind, ResourceTable};

/// Package metadata, as returned by the host's metadata subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Package name (e.g., "com.example.app")
    pub package_name: String,
    /// Human-readable version (e.g., "1.4.2")
    pub version_name: String,
    /// Monotonic version code
    pub version_code: i32,
}

/// Optional capability for overriding version-string computation
///
/// An application may implement this to replace the default
/// `"<name>(<code>)"` display format. The resolved version name is
/// `None` when package metadata could not be read.
pub trait TrackingParams {
    fn version(&self, version_name: Option<&str>, version_code: i32) -> String;
}

/// Handle to the running application's environment
pub trait AppContext {
    /// The application's own package name
    fn package_name(&self) -> &str;

    /// Resolve the identifier for `key` under the declared `kind`
    ///
    /// Returns [`ResourceId::ABSENT`] when no such resource exists;
    /// absence is expected, not an error.
    fn resource_id(&self, key: &str, kind: ResourceKind) -> ResourceId;

    /// Resolve an identifier to its raw string value
    fn string_value(&self, id: ResourceId) -> Option<String>;

    /// Look up metadata for `package`
    ///
    /// Fails with [`TrackletError::PackageNotFound`] when the package
    /// is unknown to the host.
    fn package_info(&self, package: &str) -> Result<PackageInfo>;

    /// The application-level customization capability, if implemented
    fn tracking_params(&self) -> Option<&dyn TrackingParams> {
        None
    }
}

impl<C: AppContext + ?Sized> AppContext for &C {
    fn package_name(&self) -> &str {
        (**self).package_name()
    }

    fn resource_id(&self, key: &str, kind: ResourceKind) -> ResourceId {
        (**self).resource_id(key, kind)
    }

    fn string_value(&self, id: ResourceId) -> Option<String> {
        (**self).string_value(id)
    }

    fn package_info(&self, package: &str) -> Result<PackageInfo> {
        (**self).package_info(package)
    }

    fn tracking_params(&self) -> Option<&dyn TrackingParams> {
        (**self).tracking_params()
    }
}

/// An [`AppContext`] backed by a [`ResourceTable`]
///
/// Package metadata is held behind a lock so it can be replaced after
/// construction; the parameter loader's snapshot is taken once, so
/// later replacements are deliberately invisible to it.
pub struct InMemoryContext {
    package_name: String,
    resources: ResourceTable,
    package_info: RwLock<Option<PackageInfo>>,
    tracking_params: Option<Box<dyn TrackingParams>>,
}

impl InMemoryContext {
    /// Create a context for `package_name` over the given resources
    ///
    /// Until [`set_package_info`](Self::set_package_info) (or the
    /// builder equivalent) supplies metadata, package lookups fail as
    /// "not found".
    pub fn new(package_name: impl Into<String>, resources: ResourceTable) -> Self {
        Self {
            package_name: package_name.into(),
            resources,
            package_info: RwLock::new(None),
            tracking_params: None,
        }
    }

    /// Supply package metadata at construction
    pub fn with_package_info(self, info: PackageInfo) -> Self {
        *self.package_info.write() = Some(info);
        self
    }

    /// Attach the customization capability at construction
    pub fn with_tracking_params(mut self, params: Box<dyn TrackingParams>) -> Self {
        self.tracking_params = Some(params);
        self
    }

    /// Replace (or clear) the stored package metadata
    pub fn set_package_info(&self, info: Option<PackageInfo>) {
        *self.package_info.write() = info;
    }

    /// The backing resource table
    pub fn resources(&self) -> &ResourceTable {
        &self.resources
    }
}

impl AppContext for InMemoryContext {
    fn package_name(&self) -> &str {
        &self.package_name
    }

    fn resource_id(&self, key: &str, kind: ResourceKind) -> ResourceId {
        self.resources.resource_id(key, kind)
    }

    fn string_value(&self, id: ResourceId) -> Option<String> {
        self.resources.string_value(id).map(str::to_owned)
    }

    fn package_info(&self, package: &str) -> Result<PackageInfo> {
        let stored = self.package_info.read();
        match stored.as_ref() {
            Some(info) if info.package_name == package => Ok(info.clone()),
            _ => Err(TrackletError::PackageNotFound(package.to_string())),
        }
    }

    fn tracking_params(&self) -> Option<&dyn TrackingParams> {
        self.tracking_params.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> PackageInfo {
        PackageInfo {
            package_name: "com.example.app".to_string(),
            version_name: "1.4.2".to_string(),
            version_code: 142,
        }
    }

    #[test]
    fn test_package_lookup_without_metadata_fails() {
        let ctx = InMemoryContext::new("com.example.app", ResourceTable::new());
        let err = ctx.package_info("com.example.app").unwrap_err();
        assert!(matches!(err, TrackletError::PackageNotFound(_)));
    }

    #[test]
    fn test_package_lookup_matches_own_package_only() {
        let ctx = InMemoryContext::new("com.example.app", ResourceTable::new())
            .with_package_info(sample_info());

        let info = ctx.package_info("com.example.app").unwrap();
        assert_eq!(info.version_name, "1.4.2");
        assert_eq!(info.version_code, 142);

        assert!(ctx.package_info("com.other.app").is_err());
    }

    #[test]
    fn test_resource_lookup_through_context() {
        let mut table = ResourceTable::new();
        table.insert(ResourceKind::String, "ga_trackingId", "UA-000000-1");
        let ctx = InMemoryContext::new("com.example.app", table);

        let id = ctx.resource_id("ga_trackingId", ResourceKind::String);
        assert_eq!(ctx.string_value(id).as_deref(), Some("UA-000000-1"));
        assert!(ctx.resource_id("missing", ResourceKind::String).is_absent());
    }

    #[test]
    fn test_no_capability_by_default() {
        let ctx = InMemoryContext::new("com.example.app", ResourceTable::new());
        assert!(ctx.tracking_params().is_none());
    }
}
