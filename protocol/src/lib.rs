//! Shared message catalog and JSON codec for the realtime board transport.
//!
//! This crate owns the wire representation used by `server`, `canvas` and
//! `cli`. Every message is a JSON object whose `type` field selects one
//! variant of [`ServerMessage`] or [`ClientMessage`]; the remaining fields are
//! variant-specific. Unknown fields are ignored, missing required fields make
//! the whole message invalid.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable catalog index of a word tile.
pub type WordId = u32;

/// Opaque, server-assigned session identifier.
pub type ClientId = String;

// =============================================================================
// ERRORS
// =============================================================================

/// Error returned by the `decode_*` functions.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The text is not a JSON document.
    #[error("malformed json: {0}")]
    Json(#[source] serde_json::Error),
    /// The document is not an object with a string `type` field.
    #[error("message has no string `type` field")]
    MissingType,
    /// The `type` field names no message in the catalog.
    #[error("unknown message type: {0}")]
    UnknownType(String),
    /// The `type` is known but required fields are missing or mistyped.
    #[error("invalid `{kind}` message: {source}")]
    Invalid {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Error returned by the `encode_*` functions.
#[derive(Debug, thiserror::Error)]
#[error("failed to encode message: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

// =============================================================================
// RECORDS
// =============================================================================

/// A word tile. Position is meaningful only while `on_canvas` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: WordId,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub on_canvas: bool,
}

impl Word {
    /// A catalog word that starts in the tray.
    pub fn new(id: WordId, text: impl Into<String>) -> Self {
        Self { id, text: text.into(), x: 0.0, y: 0.0, on_canvas: false }
    }
}

/// Public view of one connected session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: ClientId,
    pub color: PaletteColor,
    pub cursor_x: f64,
    pub cursor_y: f64,
}

/// Fixed presence palette. Serialized as the CSS hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaletteColor {
    #[serde(rename = "#FFB3B3")]
    Red,
    #[serde(rename = "#BAFFC9")]
    Green,
    #[serde(rename = "#BAE1FF")]
    Blue,
    #[serde(rename = "#FFE4BA")]
    Orange,
    #[serde(rename = "#E2BAFF")]
    Purple,
    #[serde(rename = "#FFDFBA")]
    Peach,
    #[serde(rename = "#FFC9DE")]
    Pink,
    #[serde(rename = "#C4FAF8")]
    Turquoise,
    #[serde(rename = "#DBBAFF")]
    Lavender,
    #[serde(rename = "#FFFFBA")]
    Yellow,
}

impl PaletteColor {
    /// Every palette entry, in palette order.
    pub const ALL: [Self; 10] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Orange,
        Self::Purple,
        Self::Peach,
        Self::Pink,
        Self::Turquoise,
        Self::Lavender,
        Self::Yellow,
    ];

    /// CSS hex string for this color.
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Self::Red => "#FFB3B3",
            Self::Green => "#BAFFC9",
            Self::Blue => "#BAE1FF",
            Self::Orange => "#FFE4BA",
            Self::Purple => "#E2BAFF",
            Self::Peach => "#FFDFBA",
            Self::Pink => "#FFC9DE",
            Self::Turquoise => "#C4FAF8",
            Self::Lavender => "#DBBAFF",
            Self::Yellow => "#FFFFBA",
        }
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

// =============================================================================
// MESSAGES
// =============================================================================

/// Server → client messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Full snapshot, sent once to a newly connected session.
    Init {
        /// The receiving session's own id, used to filter its own cursor echoes.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_id: Option<ClientId>,
        words: Vec<Word>,
        clients: Vec<Session>,
    },
    WordMoved { word_id: WordId, x: f64, y: f64, moved_by: ClientId },
    WordAddedToCanvas { word_id: WordId, x: f64, y: f64, added_by: ClientId },
    WordRemovedFromCanvas { word_id: WordId, removed_by: ClientId },
    /// Full replacement session list, sent on every join and leave.
    Clients { clients: Vec<Session> },
    CursorMoved { client_id: ClientId, x: f64, y: f64, color: PaletteColor },
}

impl ServerMessage {
    /// Every `type` tag in the server catalog.
    pub const TYPES: [&'static str; 6] =
        ["init", "wordMoved", "wordAddedToCanvas", "wordRemovedFromCanvas", "clients", "cursorMoved"];

    /// The wire `type` tag of this message.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::WordMoved { .. } => "wordMoved",
            Self::WordAddedToCanvas { .. } => "wordAddedToCanvas",
            Self::WordRemovedFromCanvas { .. } => "wordRemovedFromCanvas",
            Self::Clients { .. } => "clients",
            Self::CursorMoved { .. } => "cursorMoved",
        }
    }
}

/// Client → server messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    MoveWord { word_id: WordId, x: f64, y: f64 },
    AddToCanvas { word_id: WordId, x: f64, y: f64 },
    RemoveFromCanvas { word_id: WordId },
    Cursor { x: f64, y: f64 },
}

impl ClientMessage {
    /// Every `type` tag in the client catalog.
    pub const TYPES: [&'static str; 4] = ["moveWord", "addToCanvas", "removeFromCanvas", "cursor"];

    /// The wire `type` tag of this message.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MoveWord { .. } => "moveWord",
            Self::AddToCanvas { .. } => "addToCanvas",
            Self::RemoveFromCanvas { .. } => "removeFromCanvas",
            Self::Cursor { .. } => "cursor",
        }
    }
}

// =============================================================================
// CODEC
// =============================================================================

/// Decode one inbound client message.
///
/// # Errors
///
/// Returns a [`DecodeError`] describing why the text was rejected.
pub fn decode_client_message(text: &str) -> Result<ClientMessage, DecodeError> {
    decode_tagged(text, &ClientMessage::TYPES)
}

/// Decode one inbound server message.
///
/// # Errors
///
/// Returns a [`DecodeError`] describing why the text was rejected.
pub fn decode_server_message(text: &str) -> Result<ServerMessage, DecodeError> {
    decode_tagged(text, &ServerMessage::TYPES)
}

/// Encode a server message as a JSON text frame.
///
/// # Errors
///
/// Returns an [`EncodeError`] if serialization fails.
pub fn encode_server_message(message: &ServerMessage) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(message)?)
}

/// Encode a client message as a JSON text frame.
///
/// # Errors
///
/// Returns an [`EncodeError`] if serialization fails.
pub fn encode_client_message(message: &ClientMessage) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(message)?)
}

fn decode_tagged<T>(text: &str, known: &[&str]) -> Result<T, DecodeError>
where
    T: serde::de::DeserializeOwned,
{
    let value: Value = serde_json::from_str(text).map_err(DecodeError::Json)?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingType)?
        .to_owned();

    if !known.contains(&kind.as_str()) {
        return Err(DecodeError::UnknownType(kind));
    }

    serde_json::from_value(value).map_err(|source| DecodeError::Invalid { kind, source })
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
