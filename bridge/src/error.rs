//! Operation error kinds.
//!
//! Every failure an operation can report crosses the bridge as one of these
//! kinds, converted by the dispatch layer into a single error notification on
//! the relevant channel. The `Display` strings are the contract: they travel
//! verbatim in the `message` field of error payloads, so the host shows them
//! to the user as-is.

/// Why a host-invoked operation could not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// No floor in the current map data has the requested name.
    #[error("Floor \"{0}\" not found")]
    NotFound(String),
    /// The map surface has not finished loading.
    #[error("mapView is not initialized")]
    NotInitialized,
    /// The start or destination space name matched nothing.
    #[error("Invalid start or destination")]
    InvalidEndpoint,
    /// The SDK computed no path between the endpoints.
    #[error("Directions not found")]
    DirectionsNotFound,
}
