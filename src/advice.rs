//! Lifecycle Advice
//!
//! Translates host-delivered activity lifecycle notifications into
//! tracker calls. No business logic lives here: each notification maps
//! to exactly one tracker operation, and any failure inside the
//! tracker propagates to the host's lifecycle dispatch.
//!
//! The host guarantees single-threaded, ordered delivery per activity
//! instance: create precedes start precedes stop, and
//! save-instance-state may occur any number of times between create
//! and stop.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::tracker::{Activity, Tracker};

/// Identifies where a piece of advice applies
///
/// Treated as opaque identity: constructed from an expression the
/// weaving host understands, compared and hashed, never interpreted
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pointcut(String);

impl Pointcut {
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    pub fn expression(&self) -> &str {
        &self.0
    }
}

/// Saved-state bundle passed through create and save-instance-state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceState {
    values: BTreeMap<String, serde_json::Value>,
}

impl InstanceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Advice invoked on activity lifecycle events
///
/// Hosts dispatch into whichever callbacks a given advice cares about;
/// the defaults are no-ops.
pub trait ActivityAdvice {
    /// Where this advice applies
    fn pointcut(&self) -> &Pointcut;

    fn on_create(&self, activity: &dyn Activity, saved_state: Option<&InstanceState>) {
        let _ = (activity, saved_state);
    }

    fn on_start(&self, activity: &dyn Activity) {
        let _ = activity;
    }

    fn on_stop(&self, activity: &dyn Activity) {
        let _ = activity;
    }

    fn on_save_instance_state(&self, activity: &dyn Activity, out_state: &mut InstanceState) {
        let _ = (activity, out_state);
    }
}

/// Advice that forwards lifecycle events to an analytics tracker
///
/// Stateless beyond its pointcut identity; the tracker holds all
/// session state.
pub struct AnalyticsAdvice {
    pointcut: Pointcut,
    tracker: Arc<dyn Tracker>,
}

impl AnalyticsAdvice {
    pub fn new(pointcut: Pointcut, tracker: Arc<dyn Tracker>) -> Self {
        Self { pointcut, tracker }
    }
}

impl ActivityAdvice for AnalyticsAdvice {
    fn pointcut(&self) -> &Pointcut {
        &self.pointcut
    }

    fn on_create(&self, activity: &dyn Activity, _saved_state: Option<&InstanceState>) {
        // Only one context call is needed, but repeats are harmless, so
        // the call is made on every creation to keep the tracker wired.
        trace!(component = activity.component_name(), "forwarding create");
        self.tracker.set_context(activity);
    }

    fn on_start(&self, activity: &dyn Activity) {
        trace!(component = activity.component_name(), "forwarding start");
        self.tracker.track_activity_start(activity.component_name());
    }

    fn on_stop(&self, activity: &dyn Activity) {
        // Paired with the preceding start so time spent in the activity
        // is measured accurately.
        trace!(component = activity.component_name(), "forwarding stop");
        self.tracker.track_activity_stop();
    }

    fn on_save_instance_state(&self, activity: &dyn Activity, _out_state: &mut InstanceState) {
        trace!(
            component = activity.component_name(),
            "forwarding save-instance-state"
        );
        self.tracker.track_activity_retain_non_configuration_instance();
    }
}
