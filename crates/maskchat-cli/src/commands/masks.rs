use clap::Args;

use maskchat_store::ChatStore;

#[derive(Debug, Args)]
pub struct AddMaskArgs {
    /// Unique mask name
    pub name: String,

    /// Free-text description of the persona
    #[arg(long, default_value = "")]
    pub describe: String,
}

#[derive(Debug, Args)]
pub struct DeleteMaskArgs {
    pub name: String,
}

pub fn add(store: &ChatStore, args: AddMaskArgs) -> anyhow::Result<String> {
    let mask = store.add_mask(&args.name, &args.describe)?;
    Ok(format!("added mask {} (id {})", mask.mask_name, mask.mask_id))
}

pub fn delete(store: &ChatStore, args: DeleteMaskArgs) -> anyhow::Result<String> {
    let mask = store.delete_mask(&args.name)?;
    Ok(format!("deleted mask {} (id {})", mask.mask_name, mask.mask_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_delete() {
        let store = ChatStore::open_in_memory().unwrap();
        let out = add(
            &store,
            AddMaskArgs {
                name: "M1".into(),
                describe: "helper".into(),
            },
        )
        .unwrap();
        assert_eq!(out, "added mask M1 (id 2)");

        let out = delete(&store, DeleteMaskArgs { name: "M1".into() }).unwrap();
        assert_eq!(out, "deleted mask M1 (id 2)");

        let err = delete(&store, DeleteMaskArgs { name: "M1".into() }).unwrap_err();
        assert_eq!(err.to_string(), "Mask 'M1' not found");
    }
}
