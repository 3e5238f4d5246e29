//! Host bridge between a mobile application shell and an embedded indoor map.
//!
//! The map itself — rendering, floor geometry, pathfinding, camera animation —
//! belongs to an external mapping SDK running in the web view. This crate owns
//! only the contract around it: the operations the host shell may invoke on
//! the map surface, the session state those operations share, and the
//! notification messages that report outcomes back over the host's channels
//! (see the `channels` crate).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Operation logic, testable without a browser ([`engine::BridgeCore`]) |
//! | [`host`] | Dispatch facade owning outbound concerns ([`host::Bridge`]) |
//! | [`map`] | Spaces, floors, lookup rules, floor-selector ordering |
//! | [`sdk`] | The [`sdk::MapSdk`] seam to the external mapping SDK |
//! | [`session`] | Bridge-owned selection state and the tap-cycle state machine |
//! | [`error`] | Operation error kinds |
//! | [`consts`] | Fixed camera, path, and highlight parameters |
//! | `webview` | Browser boundary (feature `webview`, wasm32) |

pub mod consts;
pub mod engine;
pub mod error;
pub mod host;
pub mod map;
pub mod sdk;
pub mod session;

#[cfg(feature = "webview")]
pub mod webview;
