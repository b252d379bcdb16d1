use clap::Args;

use maskchat_store::{ChatStore, SendType, Sender, TracingSink};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Report specifier, e.g. `masks` or `messages Dialogue1 5`
    #[arg(required = true, num_args = 1..)]
    pub spec: Vec<String>,
}

/// Diagnostics (unknown specifier, missing dialogue) are printed in place of
/// the report rather than failing the command.
pub fn execute(store: &ChatStore, args: RenderArgs) -> anyhow::Result<String> {
    let sink = TracingSink;
    Ok(store.best_effort(&sink).render(&args.spec.join(" ")))
}

pub fn demo(store: &ChatStore) -> anyhow::Result<String> {
    let sink = TracingSink;
    let api = store.best_effort(&sink);

    api.add_mask("Mask1", "test mask");
    api.create_dialogue("Dialogue1", "Mask1");
    for i in 0..30 {
        api.add_message(
            "Dialogue1",
            Sender::User,
            SendType::Text,
            &i.to_string(),
            true,
            None,
        );
    }

    Ok([
        api.render("dialogues"),
        api.render("masks"),
        api.render("messages Dialogue1 6"),
    ]
    .join("\n"))
}
