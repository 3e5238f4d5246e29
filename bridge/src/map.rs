//! Map data model: spaces, floors, and the lookup rules operations share.
//!
//! The SDK owns this data; the bridge holds a read-only snapshot taken at
//! map-data load and never mutates it (a space's *visual* state lives on the
//! SDK side and is written through [`crate::sdk::MapSdk::update_space_state`]).
//! Lookups are exact, case-sensitive equality; the first match in iteration
//! order wins — there is deliberately no disambiguation when several spaces
//! share a name or number.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use serde::{Deserialize, Serialize};

use crate::consts;

/// SDK-issued identifier for a space. Opaque to the bridge.
pub type SpaceId = String;

/// SDK-issued identifier for a floor. Opaque to the bridge.
pub type FloorId = String;

/// A point in the map's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A named, navigable indoor unit (a room, typically).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: SpaceId,
    pub name: String,
    /// Room number, when the map data carries one.
    #[serde(default)]
    pub number: Option<String>,
    /// Center of the space's geometry; the camera target for focus.
    pub center: Point,
}

/// A level of the building. `elevation` is used only to order the floor
/// selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: FloorId,
    pub name: String,
    pub elevation: f64,
}

/// One entry of the floor-selector dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorOption {
    pub id: FloorId,
    pub name: String,
}

/// Visual / interaction state written onto a space.
///
/// `None` colors serialize as JSON `null`, which the SDK reads as "clear this
/// attribute" — so every field is always present on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceState {
    pub interactive: bool,
    pub hover_color: Option<String>,
    pub color: Option<String>,
    pub opacity: f64,
}

impl SpaceState {
    /// Default state: tappable, standard hover color, no fill override.
    #[must_use]
    pub fn base() -> Self {
        Self {
            interactive: true,
            hover_color: Some(consts::HOVER_COLOR.to_owned()),
            color: None,
            opacity: 1.0,
        }
    }

    /// Non-interactive state used while a tap-drawn path is displayed.
    #[must_use]
    pub fn inert() -> Self {
        Self { interactive: false, hover_color: None, color: None, opacity: 1.0 }
    }

    /// Highlight applied to the current search result.
    #[must_use]
    pub fn highlighted() -> Self {
        Self {
            interactive: true,
            hover_color: Some(consts::HOVER_COLOR.to_owned()),
            color: Some(consts::HIGHLIGHT_COLOR.to_owned()),
            opacity: 1.0,
        }
    }
}

/// Read-only snapshot of the loaded map data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapData {
    pub spaces: Vec<Space>,
    pub floors: Vec<Floor>,
}

impl MapData {
    /// Exact name match over spaces.
    #[must_use]
    pub fn space_by_name(&self, name: &str) -> Option<&Space> {
        self.spaces.iter().find(|s| s.name == name)
    }

    /// Exact name match, falling back to exact id match. Used by focus.
    #[must_use]
    pub fn space_by_name_or_id(&self, identifier: &str) -> Option<&Space> {
        self.space_by_name(identifier)
            .or_else(|| self.spaces.iter().find(|s| s.id == identifier))
    }

    /// Exact name match, falling back to exact room-number match. Used by
    /// search.
    #[must_use]
    pub fn space_by_name_or_number(&self, identifier: &str) -> Option<&Space> {
        self.space_by_name(identifier)
            .or_else(|| self.spaces.iter().find(|s| s.number.as_deref() == Some(identifier)))
    }

    /// Exact name match over floors.
    #[must_use]
    pub fn floor_by_name(&self, name: &str) -> Option<&Floor> {
        self.floors.iter().find(|f| f.name == name)
    }

    /// Floors in non-decreasing elevation order. The sort is stable, so
    /// floors sharing an elevation keep their map-data order.
    #[must_use]
    pub fn floors_by_elevation(&self) -> Vec<&Floor> {
        let mut floors: Vec<&Floor> = self.floors.iter().collect();
        floors.sort_by(|a, b| a.elevation.total_cmp(&b.elevation));
        floors
    }
}
