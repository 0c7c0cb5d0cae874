//! Application settings
//!
//! Runtime-tunable values injected into the systems that call the
//! placement engine. Kept as one resource so tests and future UI panels
//! can override individual values without touching the engine.

use bevy::prelude::*;

use crate::placement::SnapTuning;

#[derive(Resource, Debug, Clone, Default)]
pub struct WardoSettings {
    /// Thresholds and steps for the constraint resolvers and snap engines
    pub tuning: SnapTuning,
}
