//! Parameter Loading
//!
//! Resolves named tracking parameters from the application's resource
//! namespace, with type-appropriate defaults, and computes the display
//! version string from package metadata.
//!
//! This is a best-effort reader: a missing resource is absence, not an
//! error, and a malformed or unreadable value degrades to its default.
//! The only failure surface is the collaborator seam underneath.

use once_cell::unsync::OnceCell;
use tracing::{error, warn};

use crate::context::AppContext;
use crate::resources::ResourceKind;

/// Read access to tracking parameters
pub trait ParameterLoader {
    /// The string resource under `key`, or `None` when absent
    fn string(&self, key: &str) -> Option<String>;

    /// The boolean resource under `key`
    ///
    /// `true` only for a case-insensitive match against `"true"`;
    /// absence and every other value are `false`.
    fn boolean(&self, key: &str) -> bool;

    /// The integer resource under `key`
    ///
    /// Absence returns `default` directly; a present but unparsable
    /// value logs a warning and returns `default`.
    fn integer(&self, key: &str, default: i32) -> i32;

    /// The display version string
    ///
    /// Computed once on first call and cached for the loader's
    /// lifetime, even if the underlying package metadata changes.
    fn version(&self) -> String;

    /// The package name cached as a side effect of the version lookup
    ///
    /// `None` until [`version`](Self::version) has run; callers that
    /// need this populated must call `version` first.
    fn package_name(&self) -> Option<String>;
}

/// Cached package metadata plus the composed version string
#[derive(Debug, Clone)]
struct PackageSnapshot {
    version_name: Option<String>,
    version_code: i32,
    package_name: Option<String>,
    version: String,
}

/// [`ParameterLoader`] over an application context's resources
///
/// Single-threaded by design, matching the host's delivery model; the
/// snapshot cell makes the loader `!Sync`.
pub struct ResourceParameterLoader<C: AppContext> {
    ctx: C,
    snapshot: OnceCell<PackageSnapshot>,
}

impl<C: AppContext> ResourceParameterLoader<C> {
    pub fn new(ctx: C) -> Self {
        Self {
            ctx,
            snapshot: OnceCell::new(),
        }
    }

    /// Version name from the cached snapshot, populating it on first use
    ///
    /// `None` when package metadata could not be read.
    pub fn version_name(&self) -> Option<String> {
        self.snapshot().version_name.clone()
    }

    /// Version code from the cached snapshot, populating it on first use
    ///
    /// Zero when package metadata could not be read.
    pub fn version_code(&self) -> i32 {
        self.snapshot().version_code
    }

    // One-way transition from "not yet loaded" to "loaded". The
    // capability, when the application supplies one, is consulted
    // exactly once here with whatever name and code were resolved.
    fn snapshot(&self) -> &PackageSnapshot {
        self.snapshot.get_or_init(|| {
            let mut version_name = None;
            let mut version_code = 0;
            let mut package_name = None;

            match self.ctx.package_info(self.ctx.package_name()) {
                Ok(info) => {
                    version_name = Some(info.version_name);
                    version_code = info.version_code;
                    package_name = Some(info.package_name);
                }
                Err(err) => error!("error collecting package metadata: {err}"),
            }

            let version = match self.ctx.tracking_params() {
                Some(params) => params.version(version_name.as_deref(), version_code),
                // An unreadable package renders as "null(0)".
                None => format!(
                    "{}({})",
                    version_name.as_deref().unwrap_or("null"),
                    version_code
                ),
            };

            PackageSnapshot {
                version_name,
                version_code,
                package_name,
                version,
            }
        })
    }

    fn raw_value(&self, key: &str, kind: ResourceKind) -> Option<String> {
        let id = self.ctx.resource_id(key, kind);
        if id.is_absent() {
            None
        } else {
            self.ctx.string_value(id)
        }
    }
}

impl<C: AppContext> ParameterLoader for ResourceParameterLoader<C> {
    fn string(&self, key: &str) -> Option<String> {
        self.raw_value(key, ResourceKind::String)
    }

    fn boolean(&self, key: &str) -> bool {
        self.raw_value(key, ResourceKind::Bool)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    fn integer(&self, key: &str, default: i32) -> i32 {
        let Some(raw) = self.raw_value(key, ResourceKind::Integer) else {
            return default;
        };
        match raw.parse::<i32>() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, value = %raw, "malformed integer resource, using default");
                default
            }
        }
    }

    fn version(&self) -> String {
        self.snapshot().version.clone()
    }

    fn package_name(&self) -> Option<String> {
        // Deliberately does not populate the snapshot: callers that
        // skip `version()` observe the uninitialized state.
        self.snapshot.get().and_then(|s| s.package_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::context::{InMemoryContext, PackageInfo, TrackingParams};
    use crate::resources::ResourceTable;

    fn context_with(table: ResourceTable) -> InMemoryContext {
        InMemoryContext::new("com.example.app", table).with_package_info(PackageInfo {
            package_name: "com.example.app".to_string(),
            version_name: "1.4.2".to_string(),
            version_code: 142,
        })
    }

    #[test]
    fn test_absent_keys_fall_back_per_type() {
        let ctx = context_with(ResourceTable::new());
        let loader = ResourceParameterLoader::new(&ctx);

        assert_eq!(loader.string("ga_trackingId"), None);
        assert!(!loader.boolean("ga_debug"));
        assert_eq!(loader.integer("ga_dispatchPeriod", 30), 30);
    }

    #[test]
    fn test_string_resolution() {
        let mut table = ResourceTable::new();
        table.insert(ResourceKind::String, "ga_trackingId", "UA-000000-1");
        let ctx = context_with(table);
        let loader = ResourceParameterLoader::new(&ctx);

        assert_eq!(loader.string("ga_trackingId").as_deref(), Some("UA-000000-1"));
    }

    #[test]
    fn test_boolean_matches_true_case_insensitively() {
        let mut table = ResourceTable::new();
        table.insert(ResourceKind::Bool, "upper", "TRUE");
        table.insert(ResourceKind::Bool, "mixed", "True");
        table.insert(ResourceKind::Bool, "lower", "true");
        table.insert(ResourceKind::Bool, "negative", "false");
        table.insert(ResourceKind::Bool, "numeric", "1");
        table.insert(ResourceKind::Bool, "empty", "");
        let ctx = context_with(table);
        let loader = ResourceParameterLoader::new(&ctx);

        assert!(loader.boolean("upper"));
        assert!(loader.boolean("mixed"));
        assert!(loader.boolean("lower"));
        assert!(!loader.boolean("negative"));
        assert!(!loader.boolean("numeric"));
        assert!(!loader.boolean("empty"));
    }

    #[test]
    fn test_integer_parses_or_defaults() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let mut table = ResourceTable::new();
        table.insert(ResourceKind::Integer, "good", "42");
        table.insert(ResourceKind::Integer, "bad", "abc");
        let ctx = context_with(table);
        let loader = ResourceParameterLoader::new(&ctx);

        assert_eq!(loader.integer("good", 7), 42);
        assert_eq!(loader.integer("bad", 7), 7);
    }

    #[test]
    fn test_default_version_format() {
        let ctx = context_with(ResourceTable::new());
        let loader = ResourceParameterLoader::new(&ctx);

        assert_eq!(loader.version(), "1.4.2(142)");
        assert_eq!(loader.version_name().as_deref(), Some("1.4.2"));
        assert_eq!(loader.version_code(), 142);
    }

    #[test]
    fn test_version_is_cached_across_metadata_changes() {
        let ctx = context_with(ResourceTable::new());
        let loader = ResourceParameterLoader::new(&ctx);

        let first = loader.version();
        ctx.set_package_info(Some(PackageInfo {
            package_name: "com.example.app".to_string(),
            version_name: "9.9.9".to_string(),
            version_code: 999,
        }));
        let second = loader.version();

        assert_eq!(first, second);
        assert_eq!(second, "1.4.2(142)");
    }

    #[test]
    fn test_failed_package_lookup_degrades_to_null_shape() {
        let ctx = InMemoryContext::new("com.example.app", ResourceTable::new());
        let loader = ResourceParameterLoader::new(&ctx);

        assert_eq!(loader.version(), "null(0)");
        assert_eq!(loader.version_code(), 0);
        assert_eq!(loader.package_name(), None);
    }

    struct CustomVersion;

    impl TrackingParams for CustomVersion {
        fn version(&self, _version_name: Option<&str>, _version_code: i32) -> String {
            "v9-custom".to_string()
        }
    }

    #[test]
    fn test_capability_overrides_default_format() {
        let ctx = context_with(ResourceTable::new()).with_tracking_params(Box::new(CustomVersion));
        let loader = ResourceParameterLoader::new(&ctx);

        assert_eq!(loader.version(), "v9-custom");
    }

    struct EchoVersion;

    impl TrackingParams for EchoVersion {
        fn version(&self, version_name: Option<&str>, version_code: i32) -> String {
            format!("{}+{}", version_name.unwrap_or("?"), version_code)
        }
    }

    #[test]
    fn test_capability_receives_resolved_metadata() {
        let ctx = context_with(ResourceTable::new()).with_tracking_params(Box::new(EchoVersion));
        let loader = ResourceParameterLoader::new(&ctx);

        assert_eq!(loader.version(), "1.4.2+142");
    }

    #[test]
    fn test_package_name_requires_version_first() {
        let ctx = context_with(ResourceTable::new());
        let loader = ResourceParameterLoader::new(&ctx);

        assert_eq!(loader.package_name(), None);
        loader.version();
        assert_eq!(loader.package_name().as_deref(), Some("com.example.app"));
    }
}
