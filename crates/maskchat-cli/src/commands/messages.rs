use clap::{Args, ValueEnum};

use maskchat_store::{ChatStore, Message, NewMessage, SendType, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SenderArg {
    User,
    Gpt,
}

impl From<SenderArg> for Sender {
    fn from(arg: SenderArg) -> Self {
        match arg {
            SenderArg::User => Sender::User,
            SenderArg::Gpt => Sender::Gpt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Text,
    Image,
    Audio,
}

impl From<KindArg> for SendType {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Text => SendType::Text,
            KindArg::Image => SendType::Image,
            KindArg::Audio => SendType::Audio,
        }
    }
}

#[derive(Debug, Args)]
pub struct SendArgs {
    pub dialogue: String,

    /// Text, or a file path for image and audio messages
    pub content: String,

    #[arg(long, value_enum, default_value_t = SenderArg::User)]
    pub sender: SenderArg,

    #[arg(long, value_enum, default_value_t = KindArg::Text)]
    pub kind: KindArg,

    /// Record the send attempt as failed
    #[arg(long)]
    pub failed: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: i64,
    pub content: String,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    pub dialogue: String,

    /// Print the messages as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub fn send(store: &ChatStore, args: SendArgs) -> anyhow::Result<String> {
    let message = NewMessage::new(
        args.sender.into(),
        args.kind.into(),
        args.content,
        !args.failed,
    );
    let stored = store.add_message(&args.dialogue, message)?;
    Ok(format!("message {} added to {}", stored.id, stored.dialogue_name))
}

pub fn edit(store: &ChatStore, args: EditArgs) -> anyhow::Result<String> {
    let updated = store.update_message(args.id, &args.content)?;
    Ok(format!("message {} updated", updated.id))
}

pub fn remove(store: &ChatStore, args: RemoveArgs) -> anyhow::Result<String> {
    store.delete_message(args.id)?;
    Ok(format!("message {} deleted", args.id))
}

pub fn history(store: &ChatStore, args: HistoryArgs) -> anyhow::Result<String> {
    let messages = store.get_messages(&args.dialogue)?;
    if args.json {
        return Ok(serde_json::to_string_pretty(&messages)?);
    }
    Ok(messages.iter().map(history_line).collect::<Vec<_>>().join("\n"))
}

fn history_line(m: &Message) -> String {
    let status = if m.send_succeed { "" } else { " (failed)" };
    format!(
        "[{}] #{} {} {}: {}{}",
        m.send_time.format("%Y-%m-%d %H:%M:%S"),
        m.id,
        m.sender,
        m.send_type,
        m.send_info,
        status
    )
}
