//! Human-readable listings of stored masks, dialogues and messages.
//!
//! A report is requested with a short specifier string:
//!
//! | specifier                  | output                                   |
//! |----------------------------|------------------------------------------|
//! | `dialogues`                | one line per dialogue                    |
//! | `masks`                    | one line per mask                        |
//! | `messages <dialogue> <n>`  | the newest `n` messages, newest first    |

use std::str::FromStr;

use crate::dialogues::list_dialogues;
use crate::error::{Result, StoreError};
use crate::masks::list_masks;
use crate::messages::recent_messages;
use crate::models::{Dialogue, Mask, Message};
use crate::store::ChatStore;

/// Parsed form of a report specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRequest {
    Dialogues,
    Masks,
    Messages { dialogue: String, count: u32 },
}

impl FromStr for ReportRequest {
    type Err = StoreError;

    fn from_str(spec: &str) -> Result<Self> {
        let mut tokens = spec.split_whitespace();
        match tokens.next() {
            Some("dialogues") if tokens.next().is_none() => Ok(ReportRequest::Dialogues),
            Some("masks") if tokens.next().is_none() => Ok(ReportRequest::Masks),
            Some("messages") => {
                let (Some(dialogue), Some(count)) = (tokens.next(), tokens.next()) else {
                    return Err(StoreError::MissingParameters);
                };
                if tokens.next().is_some() {
                    return Err(StoreError::InvalidRequest(format!(
                        "too many parameters in `{}`",
                        spec.trim()
                    )));
                }
                let count = count.parse::<u32>().map_err(|_| {
                    StoreError::InvalidRequest(format!("message count `{count}` is not a number"))
                })?;
                Ok(ReportRequest::Messages {
                    dialogue: dialogue.to_string(),
                    count,
                })
            }
            _ => Err(StoreError::UnknownSpecifier(spec.trim().to_string())),
        }
    }
}

impl ChatStore {
    /// Render a report as newline-joined lines, inside one read session.
    pub fn report(&self, request: &ReportRequest) -> Result<String> {
        self.database().with_session(|s| {
            let lines: Vec<String> = match request {
                ReportRequest::Dialogues => list_dialogues(s.conn())?
                    .iter()
                    .map(dialogue_line)
                    .collect(),
                ReportRequest::Masks => list_masks(s.conn())?.iter().map(mask_line).collect(),
                ReportRequest::Messages { dialogue, count } => {
                    recent_messages(s.conn(), dialogue, *count)?
                        .iter()
                        .map(message_line)
                        .collect()
                }
            };
            Ok(lines.join("\n"))
        })
    }
}

fn dialogue_line(d: &Dialogue) -> String {
    let mask_id = d
        .mask_id
        .map_or_else(|| "none".to_string(), |id| id.to_string());
    format!("dialogue: {}, mask id: {}", d.dialogue_name, mask_id)
}

fn mask_line(m: &Mask) -> String {
    format!(
        "mask id: {}, name: {}, description: {}",
        m.mask_id, m.mask_name, m.mask_describe
    )
}

fn message_line(m: &Message) -> String {
    format!(
        "message id: {}, sender: {}, sent at: {}, type: {}, content: {}, succeeded: {}",
        m.id,
        m.sender.name(),
        m.send_time.format("%Y-%m-%d %H:%M:%S%.6f"),
        m.send_type.name(),
        m.send_info,
        m.send_succeed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewMessage, Sender};

    #[test]
    fn parses_specifiers() {
        assert_eq!("dialogues".parse::<ReportRequest>().unwrap(), ReportRequest::Dialogues);
        assert_eq!(" masks ".parse::<ReportRequest>().unwrap(), ReportRequest::Masks);
        assert_eq!(
            "messages Dialogue1 6".parse::<ReportRequest>().unwrap(),
            ReportRequest::Messages {
                dialogue: "Dialogue1".into(),
                count: 6
            }
        );
    }

    #[test]
    fn rejects_malformed_specifiers() {
        assert!(matches!(
            "messages".parse::<ReportRequest>(),
            Err(StoreError::MissingParameters)
        ));
        assert!(matches!(
            "messages D".parse::<ReportRequest>(),
            Err(StoreError::MissingParameters)
        ));
        assert!(matches!(
            "messages D five".parse::<ReportRequest>(),
            Err(StoreError::InvalidRequest(_))
        ));
        assert!(matches!(
            "messages D 5 extra".parse::<ReportRequest>(),
            Err(StoreError::InvalidRequest(_))
        ));
        assert!(matches!(
            "users".parse::<ReportRequest>(),
            Err(StoreError::UnknownSpecifier(ref s)) if s == "users"
        ));
        assert!(matches!(
            "masks please".parse::<ReportRequest>(),
            Err(StoreError::UnknownSpecifier(_))
        ));
    }

    #[test]
    fn masks_report_lists_every_mask() {
        let store = ChatStore::open_in_memory().unwrap();
        store.add_mask("Mask1", "test mask").unwrap();

        let out = store.report(&ReportRequest::Masks).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "mask id: 1, name: default, description: ");
        assert_eq!(lines[1], "mask id: 2, name: Mask1, description: test mask");
    }

    #[test]
    fn dialogues_report_shows_mask_ids() {
        let store = ChatStore::open_in_memory().unwrap();
        store.add_mask("M1", "").unwrap();
        store.create_dialogue("D1", "M1").unwrap();
        store.create_dialogue("D2", "").unwrap();

        let out = store.report(&ReportRequest::Dialogues).unwrap();
        assert_eq!(out, "dialogue: D1, mask id: 2\ndialogue: D2, mask id: 1");

        store.delete_mask("M1").unwrap();
        let out = store.report(&ReportRequest::Dialogues).unwrap();
        assert!(out.starts_with("dialogue: D1, mask id: none"));
    }

    #[test]
    fn messages_report_shows_newest_first() {
        let store = ChatStore::open_in_memory().unwrap();
        store.create_dialogue("D", "").unwrap();
        for i in 1..=30 {
            store
                .add_message("D", NewMessage::text(Sender::User, i.to_string()))
                .unwrap();
        }

        let out = store.report(&"messages D 5".parse().unwrap()).unwrap();
        let ids: Vec<_> = out
            .lines()
            .map(|line| {
                line.strip_prefix("message id: ")
                    .and_then(|rest| rest.split(',').next())
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(ids, ["30", "29", "28", "27", "26"]);
        assert!(out
            .lines()
            .next()
            .unwrap()
            .ends_with("type: TEXT, content: 30, succeeded: true"));

        let quiet = |_: &str| {};
        let rendered = store.best_effort(&quiet).render("messages D 5");
        assert_eq!(rendered, out);
    }

    #[test]
    fn messages_report_for_unknown_dialogue_is_not_found() {
        let store = ChatStore::open_in_memory().unwrap();
        let err = store
            .report(&ReportRequest::Messages {
                dialogue: "ghost".into(),
                count: 5,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::DialogueNotFound(ref n) if n == "ghost"));
    }
}
