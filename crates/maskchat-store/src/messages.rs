use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::dialogues::find_dialogue;
use crate::error::{Result, StoreError};
use crate::models::{check_len, Message, NewMessage, MAX_SEND_INFO};
use crate::store::ChatStore;

const MESSAGE_COLUMNS: &str =
    "id, sender, send_type, send_time, send_info, send_succeed, dialogue_name";

impl ChatStore {
    /// Append a message to the dialogue `dialogue_name`.
    ///
    /// The dialogue must exist; otherwise nothing is written and
    /// [`StoreError::DialogueNotFound`] is returned.
    pub fn add_message(&self, dialogue_name: &str, message: NewMessage) -> Result<Message> {
        check_len("send_info", &message.send_info, MAX_SEND_INFO)?;
        // Bound per call so messages inserted without a time never share one.
        let send_time = message.send_time.unwrap_or_else(Utc::now);

        self.database().with_session(|s| {
            let conn = s.conn();
            if find_dialogue(conn, dialogue_name)?.is_none() {
                return Err(StoreError::DialogueNotFound(dialogue_name.to_string()));
            }

            conn.execute(
                "INSERT INTO message (sender, send_type, send_time, send_info, send_succeed, dialogue_name)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    message.sender,
                    message.send_type,
                    send_time.to_rfc3339(),
                    message.send_info,
                    message.send_succeed,
                    dialogue_name,
                ],
            )?;
            let id = conn.last_insert_rowid();
            tracing::debug!(id, dialogue = dialogue_name, "message inserted");

            Ok(Message {
                id,
                sender: message.sender,
                send_type: message.send_type,
                send_time,
                send_info: message.send_info.clone(),
                send_succeed: message.send_succeed,
                dialogue_name: dialogue_name.to_string(),
            })
        })
    }

    /// Overwrite the payload of message `id`, leaving every other field as is.
    pub fn update_message(&self, id: i64, new_send_info: &str) -> Result<Message> {
        check_len("send_info", new_send_info, MAX_SEND_INFO)?;

        self.database().with_session(|s| {
            let mut message =
                find_message(s.conn(), id)?.ok_or(StoreError::MessageNotFound(id))?;

            s.conn().execute(
                "UPDATE message SET send_info = ?1 WHERE id = ?2",
                params![new_send_info, id],
            )?;
            tracing::debug!(id, "message updated");

            message.send_info = new_send_info.to_string();
            Ok(message)
        })
    }

    pub fn delete_message(&self, id: i64) -> Result<()> {
        self.database().with_session(|s| {
            let affected = s
                .conn()
                .execute("DELETE FROM message WHERE id = ?1", params![id])?;
            if affected == 0 {
                return Err(StoreError::MessageNotFound(id));
            }
            tracing::debug!(id, "message deleted");
            Ok(())
        })
    }

    pub fn get_message(&self, id: i64) -> Result<Message> {
        self.database()
            .with_session(|s| find_message(s.conn(), id)?.ok_or(StoreError::MessageNotFound(id)))
    }

    /// All messages of a dialogue in insertion order.
    ///
    /// An unknown dialogue simply has no messages.
    pub fn get_messages(&self, dialogue_name: &str) -> Result<Vec<Message>> {
        self.database().with_session(|s| {
            let mut stmt = s.conn().prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM message
                 WHERE dialogue_name = ?1
                 ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map(params![dialogue_name], row_to_message)?;

            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
    }

    /// The newest `count` messages of a dialogue, newest first.
    pub fn recent_messages(&self, dialogue_name: &str, count: u32) -> Result<Vec<Message>> {
        self.database()
            .with_session(|s| recent_messages(s.conn(), dialogue_name, count))
    }
}

pub(crate) fn recent_messages(
    conn: &Connection,
    dialogue_name: &str,
    count: u32,
) -> Result<Vec<Message>> {
    if find_dialogue(conn, dialogue_name)?.is_none() {
        return Err(StoreError::DialogueNotFound(dialogue_name.to_string()));
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM message
         WHERE dialogue_name = ?1
         ORDER BY id DESC
         LIMIT ?2"
    ))?;
    let rows = stmt.query_map(params![dialogue_name, count], row_to_message)?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(StoreError::Sqlite)
}

fn find_message(conn: &Connection, id: i64) -> Result<Option<Message>> {
    let message = conn
        .query_row(
            &format!("SELECT {MESSAGE_COLUMNS} FROM message WHERE id = ?1"),
            params![id],
            row_to_message,
        )
        .optional()?;
    Ok(message)
}

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<Message> {
    let ts_str: String = row.get(3)?;
    let send_time: DateTime<Utc> = DateTime::parse_from_rfc3339(&ts_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Message {
        id: row.get(0)?,
        sender: row.get(1)?,
        send_type: row.get(2)?,
        send_time,
        send_info: row.get(4)?,
        send_succeed: row.get(5)?,
        dialogue_name: row.get(6)?,
    })
}
