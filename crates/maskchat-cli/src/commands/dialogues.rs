use clap::Args;

use maskchat_store::{ChatStore, DialogueCreation};

#[derive(Debug, Args)]
pub struct CreateDialogueArgs {
    pub name: String,

    /// Mask to bind; unknown or omitted falls back to `default`
    #[arg(long, default_value = "")]
    pub mask: String,
}

pub fn create(store: &ChatStore, args: CreateDialogueArgs) -> anyhow::Result<String> {
    let message = match store.create_dialogue(&args.name, &args.mask)? {
        DialogueCreation::Created(d) => format!("created dialogue {}", d.dialogue_name),
        DialogueCreation::AlreadyExists(d) => {
            format!("dialogue {} already exists", d.dialogue_name)
        }
    };
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_create_reports_existing() {
        let store = ChatStore::open_in_memory().unwrap();
        let args = || CreateDialogueArgs {
            name: "D1".into(),
            mask: String::new(),
        };
        assert_eq!(create(&store, args()).unwrap(), "created dialogue D1");
        assert_eq!(create(&store, args()).unwrap(), "dialogue D1 already exists");
    }
}
