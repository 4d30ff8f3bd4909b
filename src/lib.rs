//! Tracklet - lifecycle advice and parameter loading for analytics trackers
//!
//! Two small pieces of glue for aspect-oriented analytics integration:
//! advice that forwards activity lifecycle events to a tracker, and a
//! parameter loader that reads tracking configuration from the
//! application's resource namespace and package metadata.
//!
//! The host framework and the tracker are collaborators behind traits:
//! [`AppContext`] for resource and metadata access, [`Tracker`] for the
//! analytics client, [`TrackingParams`] for the optional
//! application-supplied version override.

pub mod advice;
pub mod context;
pub mod error;
pub mod params;
pub mod resources;
pub mod settings;
pub mod tracker;

pub use advice::{ActivityAdvice, AnalyticsAdvice, InstanceState, Pointcut};
pub use context::{AppContext, InMemoryContext, PackageInfo, TrackingParams};
pub use error::{Result, TrackletError};
pub use params::{ParameterLoader, ResourceParameterLoader};
pub use resources::{ResourceId, ResourceKind, ResourceTable};
pub use settings::TrackerSettings;
pub use tracker::{Activity, LogTracker, Tracker};

/// Tracklet version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
