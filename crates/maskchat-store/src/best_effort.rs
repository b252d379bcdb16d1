//! Log-and-continue view of a [`ChatStore`].
//!
//! Every operation mirrors the typed API but never returns an error: failures
//! are written to the [`LogSink`] and the caller receives a neutral value
//! (`None`, an empty `Vec`, or nothing).  Use this where a storage hiccup must
//! not interrupt the chat flow; use [`ChatStore`] directly to tell not-found,
//! constraint violations and storage faults apart.

use chrono::{DateTime, Utc};

use crate::error::{Result, StoreError};
use crate::log_sink::LogSink;
use crate::models::{Dialogue, Mask, Message, NewMessage, SendType, Sender};
use crate::report::ReportRequest;
use crate::store::ChatStore;

pub struct BestEffort<'a> {
    store: &'a ChatStore,
    sink: &'a dyn LogSink,
}

impl<'a> BestEffort<'a> {
    pub fn new(store: &'a ChatStore, sink: &'a dyn LogSink) -> Self {
        Self { store, sink }
    }

    fn absorb<T>(&self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.sink.log(&err.to_string());
                None
            }
        }
    }

    /// Like [`Self::absorb`], but lookup misses are not worth a log line.
    fn absorb_lookup<T>(&self, result: Result<T>) -> Option<T> {
        match result {
            Err(err) if err.is_not_found() => None,
            other => self.absorb(other),
        }
    }

    pub fn add_mask(&self, name: &str, describe: &str) {
        self.absorb(self.store.add_mask(name, describe));
    }

    pub fn get_mask(&self, name: &str) -> Option<Mask> {
        self.absorb_lookup(self.store.get_mask(name))
    }

    pub fn delete_mask(&self, name: &str) {
        self.absorb(self.store.delete_mask(name));
    }

    pub fn create_dialogue(&self, name: &str, mask_name: &str) {
        self.absorb(self.store.create_dialogue(name, mask_name));
    }

    pub fn get_dialogue(&self, name: &str) -> Option<Dialogue> {
        self.absorb_lookup(self.store.get_dialogue(name))
    }

    /// `send_time` of `None` stamps the message with the current time.
    pub fn add_message(
        &self,
        dialogue_name: &str,
        sender: Sender,
        send_type: SendType,
        send_info: &str,
        send_succeed: bool,
        send_time: Option<DateTime<Utc>>,
    ) {
        let mut message = NewMessage::new(sender, send_type, send_info, send_succeed);
        message.send_time = send_time;
        self.absorb(self.store.add_message(dialogue_name, message));
    }

    pub fn update_message(&self, id: i64, new_send_info: &str) {
        self.absorb(self.store.update_message(id, new_send_info));
    }

    pub fn delete_message(&self, id: i64) {
        self.absorb(self.store.delete_message(id));
    }

    pub fn get_messages(&self, dialogue_name: &str) -> Vec<Message> {
        self.absorb(self.store.get_messages(dialogue_name))
            .unwrap_or_default()
    }

    /// Render a report specifier (see [`ReportRequest`]).
    ///
    /// Diagnostics take the place of the report: a missing dialogue yields a
    /// single not-found line, a truncated `messages` request yields
    /// `"missing parameters"`, and an unknown specifier is logged and yields
    /// an empty string.
    pub fn render(&self, spec: &str) -> String {
        let outcome = spec
            .parse::<ReportRequest>()
            .and_then(|request| self.store.report(&request));

        match outcome {
            Ok(text) => text,
            Err(StoreError::DialogueNotFound(name)) => format!("dialogue {name} not found"),
            Err(StoreError::MissingParameters) => "missing parameters".to_string(),
            Err(err @ StoreError::UnknownSpecifier(_)) => {
                self.sink.log(&err.to_string());
                String::new()
            }
            Err(err) => {
                let text = err.to_string();
                self.sink.log(&text);
                text
            }
        }
    }
}
