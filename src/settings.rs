//! Tracker Settings
//!
//! The startup configuration read through a [`ParameterLoader`] to
//! populate a tracker. Every field is optional in the resource
//! namespace; absent entries fall back to the defaults below, so a
//! host that declares nothing still gets a usable configuration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::params::ParameterLoader;

/// Well-known resource keys for tracker settings
pub mod keys {
    /// Tracking/property id (string)
    pub const TRACKING_ID: &str = "ga_trackingId";
    /// Sample frequency in percent (integer)
    pub const SAMPLE_FREQUENCY: &str = "ga_sampleFrequency";
    /// Dispatch period in seconds (integer)
    pub const DISPATCH_PERIOD: &str = "ga_dispatchPeriod";
    /// Session timeout in seconds (integer)
    pub const SESSION_TIMEOUT: &str = "ga_sessionTimeout";
    /// Track activity starts/stops automatically (bool)
    pub const AUTO_ACTIVITY_TRACKING: &str = "ga_auto_activity_tracking";
    /// Anonymize client addresses (bool)
    pub const ANONYMIZE_IP: &str = "ga_anonymizeIp";
    /// Verbose tracker diagnostics (bool)
    pub const DEBUG: &str = "ga_debug";
}

const DEFAULT_SAMPLE_FREQUENCY: i32 = 100;
const DEFAULT_DISPATCH_PERIOD: i32 = 30;
const DEFAULT_SESSION_TIMEOUT: i32 = 30;

/// Tracker configuration resolved at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSettings {
    /// Tracking/property id; `None` leaves the tracker unconfigured
    pub tracking_id: Option<String>,
    /// Sample frequency in percent
    pub sample_frequency: i32,
    /// Dispatch period in seconds
    pub dispatch_period: i32,
    /// Session timeout in seconds
    pub session_timeout: i32,
    /// Whether activity lifecycle events start/stop sessions
    pub auto_activity_tracking: bool,
    /// Whether client addresses are anonymized
    pub anonymize_ip: bool,
    /// Verbose tracker diagnostics
    pub debug: bool,
    /// Display version string for the application
    pub app_version: String,
    /// Application package name, when metadata was readable
    pub app_package: Option<String>,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            tracking_id: None,
            sample_frequency: DEFAULT_SAMPLE_FREQUENCY,
            dispatch_period: DEFAULT_DISPATCH_PERIOD,
            session_timeout: DEFAULT_SESSION_TIMEOUT,
            auto_activity_tracking: false,
            anonymize_ip: false,
            debug: false,
            app_version: String::new(),
            app_package: None,
        }
    }
}

impl TrackerSettings {
    /// Read settings through the given loader
    ///
    /// The version is resolved before the package name so the loader's
    /// metadata snapshot is populated.
    pub fn load(loader: &dyn ParameterLoader) -> Self {
        let app_version = loader.version();
        let app_package = loader.package_name();

        let settings = Self {
            tracking_id: loader.string(keys::TRACKING_ID),
            sample_frequency: loader.integer(keys::SAMPLE_FREQUENCY, DEFAULT_SAMPLE_FREQUENCY),
            dispatch_period: loader.integer(keys::DISPATCH_PERIOD, DEFAULT_DISPATCH_PERIOD),
            session_timeout: loader.integer(keys::SESSION_TIMEOUT, DEFAULT_SESSION_TIMEOUT),
            auto_activity_tracking: loader.boolean(keys::AUTO_ACTIVITY_TRACKING),
            anonymize_ip: loader.boolean(keys::ANONYMIZE_IP),
            debug: loader.boolean(keys::DEBUG),
            app_version,
            app_package,
        };

        debug!(
            tracking_id = ?settings.tracking_id,
            app_version = %settings.app_version,
            "tracker settings loaded"
        );
        settings
    }
}
