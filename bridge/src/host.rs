//! Host-facing dispatch layer.
//!
//! DESIGN
//! ======
//! [`BridgeCore`] returns messages and outcomes; this layer owns everything
//! outbound — channel posts, the search toast, the directions panel, the
//! floor selector. Each host-invoked operation maps to at most one channel
//! post, and for `setFloor` / `getDirections` to exactly one, because the
//! post sits on the single return path.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use channels::{Channel, ChannelSink};
use tracing::debug;

use crate::engine::{BridgeCore, SearchOutcome, TapOutcome};
use crate::map::{FloorId, FloorOption};
use crate::sdk::{Directions, MapOptions, MapSdk};

/// Page-side collaborators: the DOM widgets around the map surface.
pub trait PageUi {
    /// Show the transient "not found" toast; the implementation dismisses it
    /// after [`crate::consts::TOAST_DISMISS_MS`].
    fn show_error_toast(&mut self, message: &str);

    /// Display a computed route in the directions panel.
    fn show_directions(&mut self, directions: &Directions);

    /// Fill the floor dropdown with the given entries, in the given order.
    fn populate_floor_selector(&mut self, options: &[FloorOption]);
}

/// The bridge as the host shell sees it: one method per host-invocable
/// operation, wired to the channels and page widgets.
pub struct Bridge<S: MapSdk, C: ChannelSink, U: PageUi> {
    pub core: BridgeCore<S>,
    pub channels: C,
    pub ui: U,
}

impl<S: MapSdk, C: ChannelSink, U: PageUi> Bridge<S, C, U> {
    pub fn new(sdk: S, channels: C, ui: U) -> Self {
        Self { core: BridgeCore::new(sdk), channels, ui }
    }

    /// Load the map and populate the floor selector.
    pub async fn load(&mut self, options: &MapOptions) {
        self.core.load(options).await;
        self.ui.populate_floor_selector(&self.core.floor_options());
    }

    /// `focusSpace`: no result, no notification.
    pub fn focus_space(&mut self, identifier: &str) {
        self.core.focus_space(identifier);
    }

    /// `setFloor`: exactly one notification on the floors channel.
    pub fn set_floor(&mut self, floor_name: &str) {
        let message = self.core.set_floor(floor_name);
        self.channels.post(Channel::Floors, &message.to_json());
    }

    /// `getDirections`: exactly one notification on the directions channel.
    pub async fn get_directions(&mut self, start: &str, destination: &str, accessible: bool) {
        let message = self.core.get_directions(start, destination, accessible).await;
        self.channels.post(Channel::Directions, &message.to_json());
    }

    /// `searchAndHighlight`: highlights on a match, toasts on a miss.
    pub fn search_and_highlight(&mut self, identifier: &str) {
        if self.core.search_and_highlight(identifier) == SearchOutcome::NotFound {
            self.ui.show_error_toast(&format!("Room \"{identifier}\" not found"));
        }
    }

    /// Map tap handler: forwards drawn directions to the panel.
    pub async fn on_map_tap(&mut self, tapped: Option<&str>) {
        match self.core.on_map_tap(tapped).await {
            TapOutcome::PathDrawn(directions) => self.ui.show_directions(&directions),
            outcome => debug!(?outcome, "tap handled"),
        }
    }

    /// Floor dropdown change: switch floors with no notification.
    pub fn select_floor(&mut self, floor: &FloorId) {
        self.core.select_floor(floor);
    }
}
