//! Fixed visual parameters for the map surface.

// ── Camera (focusSpace) ─────────────────────────────────────────

/// Zoom level the camera animates to when focusing a space.
pub const FOCUS_ZOOM_LEVEL: f64 = 20.0;

/// Camera pitch in degrees when focusing a space.
pub const FOCUS_PITCH: f64 = 45.0;

/// Camera bearing in degrees when focusing a space.
pub const FOCUS_BEARING: f64 = 0.0;

// ── Tap-to-path drawing ─────────────────────────────────────────

/// Path radius at the near end, in map units.
pub const PATH_NEAR_RADIUS: f64 = 0.5;

/// Path radius at the far end, in map units.
pub const PATH_FAR_RADIUS: f64 = 0.5;

/// Fill color of the drawn path.
pub const PATH_COLOR: &str = "#912338";

// ── Space visual states ─────────────────────────────────────────

/// Hover color applied to interactive spaces.
pub const HOVER_COLOR: &str = "#f26336";

/// Fill color applied to the highlighted space.
pub const HIGHLIGHT_COLOR: &str = "#f26336";

// ── Search toast ────────────────────────────────────────────────

/// How long the "room not found" toast stays visible, in milliseconds.
pub const TOAST_DISMISS_MS: u32 = 3000;
