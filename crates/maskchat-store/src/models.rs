//! Domain model structs persisted in the local SQLite database.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to a UI layer or printed as JSON by the CLI.

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Name of the mask every dialogue falls back to.
pub const DEFAULT_MASK: &str = "default";

/// Declared column lengths. SQLite ignores them, so they are checked before
/// every write.
pub const MAX_MASK_NAME: usize = 50;
pub const MAX_MASK_DESCRIBE: usize = 500;
pub const MAX_DIALOGUE_NAME: usize = 50;
pub const MAX_SEND_INFO: usize = 2000;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sender {
    User,
    Gpt,
}

impl Sender {
    pub fn name(&self) -> &'static str {
        match self {
            Sender::User => "USER",
            Sender::Gpt => "GPT",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(Sender::User),
            "GPT" => Some(Sender::Gpt),
            _ => None,
        }
    }
}

/// Payload kind of a message. Image and audio payloads carry a path or
/// reference rather than the content itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SendType {
    Text,
    Image,
    Audio,
}

impl SendType {
    pub fn name(&self) -> &'static str {
        match self {
            SendType::Text => "TEXT",
            SendType::Image => "IMAGE",
            SendType::Audio => "AUDIO",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "TEXT" => Some(SendType::Text),
            "IMAGE" => Some(SendType::Image),
            "AUDIO" => Some(SendType::Audio),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for SendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ToSql for Sender {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.name()))
    }
}

impl FromSql for Sender {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let name = value.as_str()?;
        Sender::from_name(name).ok_or_else(|| {
            FromSqlError::Other(Box::new(StoreError::InvalidEnum {
                kind: "sender",
                value: name.to_string(),
            }))
        })
    }
}

impl ToSql for SendType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.name()))
    }
}

impl FromSql for SendType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let name = value.as_str()?;
        SendType::from_name(name).ok_or_else(|| {
            FromSqlError::Other(Box::new(StoreError::InvalidEnum {
                kind: "send_type",
                value: name.to_string(),
            }))
        })
    }
}

// ---------------------------------------------------------------------------
// Mask
// ---------------------------------------------------------------------------

/// A reusable persona.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mask {
    /// Surrogate key assigned by SQLite on insert.
    pub mask_id: i64,
    /// Unique across all masks.
    pub mask_name: String,
    /// Free text, empty when not given.
    pub mask_describe: String,
}

/// A mask that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMask {
    pub mask_name: String,
    pub mask_describe: String,
}

impl NewMask {
    pub fn new(name: impl Into<String>, describe: impl Into<String>) -> Self {
        Self {
            mask_name: name.into(),
            mask_describe: describe.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_len("mask_name", &self.mask_name, MAX_MASK_NAME)?;
        check_len("mask_describe", &self.mask_describe, MAX_MASK_DESCRIBE)
    }
}

// ---------------------------------------------------------------------------
// Dialogue
// ---------------------------------------------------------------------------

/// A named conversation. The name is the primary key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dialogue {
    pub dialogue_name: String,
    /// `None` once the referenced mask has been deleted.
    pub mask_id: Option<i64>,
}

impl Dialogue {
    pub fn new(name: impl Into<String>, mask_id: i64) -> Self {
        Self {
            dialogue_name: name.into(),
            mask_id: Some(mask_id),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_len("dialogue_name", &self.dialogue_name, MAX_DIALOGUE_NAME)
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single turn in a dialogue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Surrogate key; ascending ids follow insertion order.
    pub id: i64,
    pub sender: Sender,
    pub send_type: SendType,
    pub send_time: DateTime<Utc>,
    /// Text, or a path/reference for image and audio payloads.
    pub send_info: String,
    pub send_succeed: bool,
    pub dialogue_name: String,
}

/// A message that has not been inserted yet.
///
/// `send_time` left as `None` is stamped with the clock at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender: Sender,
    pub send_type: SendType,
    pub send_info: String,
    pub send_succeed: bool,
    pub send_time: Option<DateTime<Utc>>,
}

impl NewMessage {
    pub fn new(
        sender: Sender,
        send_type: SendType,
        send_info: impl Into<String>,
        send_succeed: bool,
    ) -> Self {
        Self {
            sender,
            send_type,
            send_info: send_info.into(),
            send_succeed,
            send_time: None,
        }
    }

    /// Shorthand for a successfully sent text message.
    pub fn text(sender: Sender, send_info: impl Into<String>) -> Self {
        Self::new(sender, SendType::Text, send_info, true)
    }

    pub fn sent_at(mut self, time: DateTime<Utc>) -> Self {
        self.send_time = Some(time);
        self
    }
}

pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(StoreError::FieldTooLong { field, len, max });
    }
    Ok(())
}
