//! Tracker Seam
//!
//! The analytics tracker is a process-wide collaborator owned by the
//! host; this crate only invokes it. Advice components take a
//! `Arc<dyn Tracker>` at construction instead of reaching through a
//! global accessor, so a test double can stand in for call
//! verification.

use tracing::debug;

/// Opaque handle to a host activity
pub trait Activity {
    /// Fully-qualified component name (e.g., "com.example.app.MainActivity")
    fn component_name(&self) -> &str;
}

/// The analytics tracker collaborator
///
/// All operations are fire-and-forget; no return value is consumed.
/// Implementations manage their own internal concurrency.
pub trait Tracker: Send + Sync {
    /// Associate subsequent events with the given activity/context
    ///
    /// Idempotent; callers may invoke it on every creation.
    fn set_context(&self, context: &dyn Activity);

    /// Begin a trackable activity session for the named component
    ///
    /// Whether this also starts a new analytics session is the
    /// tracker's own decision, driven by its configuration.
    fn track_activity_start(&self, component: &str);

    /// End the trackable session started by the preceding start call
    fn track_activity_stop(&self);

    /// Note that the activity instance may be retained across a
    /// configuration change, preserving session continuity
    fn track_activity_retain_non_configuration_instance(&self);
}

/// A tracker that emits every call as a log event
///
/// Useful as a stand-in while no real backend is wired up.
#[derive(Debug, Default)]
pub struct LogTracker;

impl LogTracker {
    pub fn new() -> Self {
        Self
    }
}

impl Tracker for LogTracker {
    fn set_context(&self, context: &dyn Activity) {
        debug!(component = context.component_name(), "tracker context set");
    }

    fn track_activity_start(&self, component: &str) {
        debug!(component, "activity start");
    }

    fn track_activity_stop(&self) {
        debug!("activity stop");
    }

    fn track_activity_retain_non_configuration_instance(&self) {
        debug!("activity retain non-configuration instance");
    }
}
