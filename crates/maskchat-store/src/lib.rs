//! # maskchat-store
//!
//! Local persistence for a chat application, backed by SQLite.
//!
//! The crate stores reusable personas ([`Mask`]), named conversations
//! ([`Dialogue`]) bound to a persona, and the ordered [`Message`]s inside each
//! conversation.  [`ChatStore`] owns a synchronous `rusqlite::Connection` and
//! runs every operation inside its own transaction; [`BestEffort`] wraps it
//! for callers that prefer logged failures over returned errors.

pub mod best_effort;
pub mod config;
pub mod database;
pub mod dialogues;
pub mod log_sink;
pub mod masks;
pub mod messages;
pub mod migrations;
pub mod models;
pub mod report;
pub mod store;

mod error;

pub use best_effort::BestEffort;
pub use config::StoreConfig;
pub use database::{Database, Session};
pub use dialogues::DialogueCreation;
pub use error::{Result, StoreError};
pub use log_sink::{LogSink, TracingSink};
pub use models::*;
pub use report::ReportRequest;
pub use store::ChatStore;
