//! The seam to the external mapping SDK.
//!
//! Everything the bridge asks of the SDK goes through [`MapSdk`], so the
//! operation logic in [`crate::engine`] can be exercised against a recording
//! fake with no browser present. The real implementation lives in the
//! `webview` module and forwards to the SDK objects inside the web view.
//!
//! Futures here are not `Send`: the real SDK lives on the browser event loop,
//! and all bridge work happens on that one logical thread.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::map::{FloorId, MapData, Point, SpaceId, SpaceState};

/// Startup configuration handed through to the SDK, opaque to the bridge.
/// Absent or invalid credentials are the SDK's own failure to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub key: String,
    pub secret: String,
    pub map_id: String,
}

/// An SDK-computed route between two spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directions {
    /// Total route distance, in the SDK's distance unit.
    pub distance: f64,
    /// Ordered turn-by-turn instruction strings.
    pub instructions: Vec<String>,
    /// Drawable coordinate sequence of the route.
    pub coordinates: Vec<Point>,
}

/// Where the camera animates to when focusing a space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraTarget {
    pub center: Point,
    pub zoom_level: f64,
    pub pitch: f64,
    pub bearing: f64,
}

/// Visual parameters of a tap-drawn path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub near_radius: f64,
    pub far_radius: f64,
    pub color: String,
}

/// Operations the bridge delegates to the mapping SDK.
///
/// No method here retries, times out, or cancels: every SDK failure surfaces
/// once and the calling operation ends (see the error design in
/// [`crate::error`]).
#[async_trait(?Send)]
pub trait MapSdk {
    /// Load and render the map, returning the data snapshot the bridge keeps.
    /// Load failures are the SDK's own to report; the bridge never sees them.
    async fn load_map_data(&mut self, options: &MapOptions) -> MapData;

    /// Animate the camera to the given target.
    fn animate_camera(&mut self, target: CameraTarget);

    /// Switch the visible floor.
    fn set_floor(&mut self, floor: &FloorId);

    /// Compute a route between two spaces. `None` when the SDK finds no path.
    async fn get_directions(
        &mut self,
        start: &SpaceId,
        destination: &SpaceId,
        accessible: bool,
    ) -> Option<Directions>;

    /// Remove the currently drawn navigation, if any.
    fn clear_navigation(&mut self);

    /// Draw the given route as the active navigation.
    fn draw_navigation(&mut self, directions: &Directions);

    /// Draw a standalone path along the given coordinates.
    fn add_path(&mut self, coordinates: &[Point], style: &PathStyle);

    /// Remove every standalone path.
    fn remove_all_paths(&mut self);

    /// Overwrite one space's visual / interaction state.
    fn update_space_state(&mut self, space: &SpaceId, state: &SpaceState);

    /// Turn on the SDK's space labels.
    fn show_labels(&mut self);
}
