// policy.rs — Policy subcommands: show, init.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use clap::Subcommand;
use dv_policy::{PolicyDocument, PolicyStore, Rule};

#[derive(Subcommand)]
pub enum PolicyCommands {
    /// Summarize the project's policy file.
    Show,
    /// Create an empty policy file.
    Init,
}

pub fn execute(cmd: &PolicyCommands, project_root: &Path) -> anyhow::Result<()> {
    let store = PolicyStore::for_project(project_root);

    match cmd {
        PolicyCommands::Show => {
            let policy = store
                .load()
                .with_context(|| format!("loading policy from {}", store.path().display()))?;

            println!(
                "Policy {} (version {})",
                store.path().display(),
                policy.version
            );
            print_category("ignore", &policy.ignore);
            print_category("patch", &policy.patch);
            Ok(())
        }
        PolicyCommands::Init => {
            if store.path().exists() {
                anyhow::bail!("policy file already exists at {}", store.path().display());
            }
            store.save(&PolicyDocument::default())?;
            println!("Created {}", store.path().display());
            Ok(())
        }
    }
}

fn print_category(name: &str, rules: &BTreeMap<String, Vec<Rule>>) {
    if rules.is_empty() {
        println!("  {}: none", name);
        return;
    }
    for (id, rules) in rules {
        println!("  {} {}: {} rule(s)", name, id, rules.len());
    }
}
