//! Host-bound notification protocol for the embedded map surface.
//!
//! This crate owns the wire representation of the messages the map surface
//! sends back to the host shell. Each channel is a one-way, named conduit;
//! every message on it is a serialized JSON object with a `type` tag
//! (`"success"` or `"error"`) and a `payload` whose shape is fixed per
//! channel. The host parses these by field name, so the serde renames here
//! are load-bearing — `floorName` and `floorId` are part of the contract.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

/// Error returned when an inbound message body cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The text was not a valid message for the channel it arrived on.
    #[error("failed to decode channel message: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A named, one-way notification channel from the map surface to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Floor-switch outcomes.
    Floors,
    /// Direction-request outcomes.
    Directions,
}

impl Channel {
    /// The name the host shell registered the channel under.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Floors => "FloorsChannel",
            Self::Directions => "DirectionsChannel",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error payload shared by every channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    /// Human-readable description of what went wrong.
    pub message: String,
}

/// Success payload for [`Channel::Floors`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorChange {
    /// Always `"success"`; the host's older parsers key off this field.
    pub status: String,
    /// Name of the floor that is now visible.
    pub floor_name: String,
    /// SDK identifier of the floor that is now visible.
    pub floor_id: String,
}

/// Success payload for [`Channel::Directions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsSummary {
    /// Total route distance, in the SDK's distance unit.
    pub distance: f64,
    /// Ordered turn-by-turn instruction strings.
    pub directions: Vec<String>,
}

/// A message on [`Channel::Floors`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum FloorsMessage {
    Success(FloorChange),
    Error(Fault),
}

impl FloorsMessage {
    /// Build the success message for a completed floor switch.
    #[must_use]
    pub fn success(floor_name: String, floor_id: String) -> Self {
        Self::Success(FloorChange { status: "success".to_owned(), floor_name, floor_id })
    }

    /// Build the error message for a failed floor switch.
    #[must_use]
    pub fn error(message: String) -> Self {
        Self::Error(Fault { message })
    }

    /// Serialize for `postMessage`.
    #[must_use]
    pub fn to_json(&self) -> String {
        // Serializing a struct of plain strings cannot fail; serde_json only
        // errors on non-string map keys or a failing Serialize impl.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a message previously produced by [`Self::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Decode`] for malformed or mistagged text.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A message on [`Channel::Directions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum DirectionsMessage {
    Success(DirectionsSummary),
    Error(Fault),
}

impl DirectionsMessage {
    /// Build the success message for a computed route.
    #[must_use]
    pub fn success(distance: f64, directions: Vec<String>) -> Self {
        Self::Success(DirectionsSummary { distance, directions })
    }

    /// Build the error message for a failed direction request.
    #[must_use]
    pub fn error(message: String) -> Self {
        Self::Error(Fault { message })
    }

    /// Serialize for `postMessage`.
    #[must_use]
    pub fn to_json(&self) -> String {
        // See FloorsMessage::to_json on why this cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a message previously produced by [`Self::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Decode`] for malformed or mistagged text.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Outbound side of a channel: whatever the host wired up to receive
/// `postMessage` calls. The dispatch layer posts exactly one message per
/// host-invoked operation.
pub trait ChannelSink {
    /// Deliver one serialized message on the named channel.
    fn post(&mut self, channel: Channel, message: &str);
}
