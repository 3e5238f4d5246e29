//! Operation logic for the host bridge.
//!
//! DESIGN
//! ======
//! `BridgeCore` is pure business logic: it validates inputs, mutates session
//! state, calls the SDK seam, and *returns* messages and outcomes. It never
//! posts to a channel or touches the page — the dispatch layer in
//! [`crate::host`] owns all outbound concerns, which is what makes "exactly
//! one notification per call" structural rather than something to remember.
//!
//! ERROR HANDLING
//! ==============
//! Fallible operations run as `try_*` returning `Result<_, BridgeError>`;
//! the public entry points convert the error into the channel message the
//! contract requires. Focus and the tap cycle swallow not-found conditions
//! with informational logging only — that silence is deliberate.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use channels::{DirectionsMessage, FloorsMessage};
use tracing::{debug, info};

use crate::consts;
use crate::error::BridgeError;
use crate::map::{FloorId, FloorOption, MapData, SpaceId, SpaceState};
use crate::sdk::{CameraTarget, Directions, MapOptions, MapSdk, PathStyle};
use crate::session::{SessionState, TapCycle};

/// What a tap did, for the host to apply to page-side collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome {
    /// The event carried no space, or the SDK found no path; state unchanged.
    Ignored,
    /// First tap: the space is now the recorded path start.
    StartSelected(SpaceId),
    /// Second tap: a path was drawn; forward these directions to the panel.
    PathDrawn(Directions),
    /// Third tap: paths removed, cycle reset, interactivity restored.
    Cleared,
}

/// What a search did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The space is now the (only) highlighted one.
    Highlighted(SpaceId),
    /// Nothing matched; the prior highlight was left untouched.
    NotFound,
}

/// The testable heart of the bridge: every host-invocable operation, running
/// against the [`MapSdk`] seam and one bridge-owned [`SessionState`].
pub struct BridgeCore<S: MapSdk> {
    pub sdk: S,
    pub map: MapData,
    pub session: SessionState,
}

impl<S: MapSdk> BridgeCore<S> {
    /// Create a core with no map data; [`Self::load`] makes it ready.
    pub fn new(sdk: S) -> Self {
        Self { sdk, map: MapData::default(), session: SessionState::default() }
    }

    /// Load map data through the SDK, mark the surface ready, turn labels on,
    /// and make every space tappable.
    pub async fn load(&mut self, options: &MapOptions) {
        self.map = self.sdk.load_map_data(options).await;
        self.session.map_loaded = true;
        self.sdk.show_labels();
        self.set_spaces_interactive(true);
        info!(
            spaces = self.map.spaces.len(),
            floors = self.map.floors.len(),
            "map data loaded"
        );
    }

    // --- Host-invoked operations ---

    /// Animate the camera to the named (or id-matched) space's center.
    /// Silently no-ops when nothing matches.
    pub fn focus_space(&mut self, identifier: &str) {
        let Some(space) = self.map.space_by_name_or_id(identifier) else {
            debug!(identifier, "focus: space not found, ignoring");
            return;
        };
        self.sdk.animate_camera(CameraTarget {
            center: space.center,
            zoom_level: consts::FOCUS_ZOOM_LEVEL,
            pitch: consts::FOCUS_PITCH,
            bearing: consts::FOCUS_BEARING,
        });
    }

    /// Switch the visible floor by name. Always produces exactly one message
    /// for the floors channel.
    pub fn set_floor(&mut self, floor_name: &str) -> FloorsMessage {
        match self.try_set_floor(floor_name) {
            Ok((name, id)) => FloorsMessage::success(name, id),
            Err(e) => {
                debug!(floor_name, error = %e, "setFloor failed");
                FloorsMessage::error(e.to_string())
            }
        }
    }

    fn try_set_floor(&mut self, floor_name: &str) -> Result<(String, FloorId), BridgeError> {
        // Readiness first: before load the floor set is empty and every name
        // would misreport as NotFound.
        if !self.session.map_loaded {
            return Err(BridgeError::NotInitialized);
        }
        let floor = self
            .map
            .floor_by_name(floor_name)
            .ok_or_else(|| BridgeError::NotFound(floor_name.to_owned()))?;
        let (name, id) = (floor.name.clone(), floor.id.clone());
        self.sdk.set_floor(&id);
        Ok((name, id))
    }

    /// Compute and draw a route between two named spaces. Always produces
    /// exactly one message for the directions channel.
    pub async fn get_directions(
        &mut self,
        start: &str,
        destination: &str,
        accessible: bool,
    ) -> DirectionsMessage {
        match self.try_get_directions(start, destination, accessible).await {
            Ok(directions) => {
                DirectionsMessage::success(directions.distance, directions.instructions)
            }
            Err(e) => {
                debug!(start, destination, error = %e, "getDirections failed");
                DirectionsMessage::error(e.to_string())
            }
        }
    }

    async fn try_get_directions(
        &mut self,
        start: &str,
        destination: &str,
        accessible: bool,
    ) -> Result<Directions, BridgeError> {
        let (from, to) = match (self.map.space_by_name(start), self.map.space_by_name(destination))
        {
            (Some(a), Some(b)) => (a.id.clone(), b.id.clone()),
            _ => return Err(BridgeError::InvalidEndpoint),
        };
        let directions = self
            .sdk
            .get_directions(&from, &to, accessible)
            .await
            .ok_or(BridgeError::DirectionsNotFound)?;
        // One navigation at a time: clear before drawing the new route.
        self.sdk.clear_navigation();
        self.sdk.draw_navigation(&directions);
        Ok(directions)
    }

    /// Highlight the space matching the identifier (name first, then room
    /// number), restoring whichever space was highlighted before it.
    pub fn search_and_highlight(&mut self, identifier: &str) -> SearchOutcome {
        let Some(space) = self.map.space_by_name_or_number(identifier) else {
            info!(identifier, "search: space not found");
            return SearchOutcome::NotFound;
        };
        let id = space.id.clone();
        if let Some(previous) = self.session.highlighted.take() {
            self.sdk.update_space_state(&previous, &SpaceState::base());
        }
        self.sdk.update_space_state(&id, &SpaceState::highlighted());
        self.session.highlighted = Some(id.clone());
        SearchOutcome::Highlighted(id)
    }

    /// Advance the tap cycle for one map tap.
    pub async fn on_map_tap(&mut self, tapped: Option<&str>) -> TapOutcome {
        match (self.session.tap.clone(), tapped) {
            // Third tap: anything — even an empty tap — resets the cycle.
            (TapCycle::PathDrawn { start }, _) => {
                self.sdk.remove_all_paths();
                self.session.tap = TapCycle::Idle;
                self.set_spaces_interactive(true);
                debug!(start, "tap: path cleared, tap to start again");
                TapOutcome::Cleared
            }
            (_, None) => TapOutcome::Ignored,
            (TapCycle::Idle, Some(space)) => {
                self.session.tap = TapCycle::StartSelected { start: space.to_owned() };
                debug!(start = space, "tap: start selected");
                TapOutcome::StartSelected(space.to_owned())
            }
            (TapCycle::StartSelected { start }, Some(space)) => {
                let destination = space.to_owned();
                // Tap-to-path never requests the accessible variant.
                let found = self.sdk.get_directions(&start, &destination, false).await;
                let Some(directions) = found else {
                    debug!(start, destination, "tap: no valid path found");
                    return TapOutcome::Ignored;
                };
                if directions.coordinates.is_empty() {
                    debug!(start, destination, "tap: no valid path found");
                    return TapOutcome::Ignored;
                }
                // Clear any navigation drawn through the channel path first.
                self.sdk.clear_navigation();
                self.sdk.add_path(
                    &directions.coordinates,
                    &PathStyle {
                        near_radius: consts::PATH_NEAR_RADIUS,
                        far_radius: consts::PATH_FAR_RADIUS,
                        color: consts::PATH_COLOR.to_owned(),
                    },
                );
                self.set_spaces_interactive(false);
                self.session.tap = TapCycle::PathDrawn { start };
                TapOutcome::PathDrawn(directions)
            }
        }
    }

    // --- Floor selector ---

    /// Selector entries in non-decreasing elevation order.
    #[must_use]
    pub fn floor_options(&self) -> Vec<FloorOption> {
        self.map
            .floors_by_elevation()
            .into_iter()
            .map(|f| FloorOption { id: f.id.clone(), name: f.name.clone() })
            .collect()
    }

    /// Dropdown path: switch the visible floor by id, with no channel
    /// notification.
    pub fn select_floor(&mut self, floor: &FloorId) {
        self.sdk.set_floor(floor);
    }

    // --- Internal ---

    fn set_spaces_interactive(&mut self, interactive: bool) {
        let state = if interactive { SpaceState::base() } else { SpaceState::inert() };
        for space in &self.map.spaces {
            self.sdk.update_space_state(&space.id, &state);
        }
    }
}
