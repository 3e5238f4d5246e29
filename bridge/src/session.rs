//! Bridge-owned selection state.
//!
//! One `SessionState` value per map surface, owned by the engine and mutated
//! without synchronization: all operations run on the web view's single
//! logical thread, and the host UI is expected to serialize user-triggered
//! calls. Overlapping invocations race and the last write wins.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::map::SpaceId;

/// The tap-to-path cycle: `Idle → StartSelected → PathDrawn → Idle`.
///
/// Each variant carries the context the next tap needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TapCycle {
    /// No start recorded; the next tapped space becomes the start.
    #[default]
    Idle,
    /// A start is recorded; the next tapped space becomes the destination.
    StartSelected {
        /// Space the first tap landed on.
        start: SpaceId,
    },
    /// A path is drawn and spaces are non-interactive; any tap resets.
    PathDrawn {
        /// Start kept for logging until the cycle resets.
        start: SpaceId,
    },
}

/// All mutable state the bridge owns for one map surface.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Whether the map surface has finished loading.
    pub map_loaded: bool,
    /// Position in the tap-to-path cycle.
    pub tap: TapCycle,
    /// The space currently shown highlighted, restored on the next search.
    pub highlighted: Option<SpaceId>,
}
