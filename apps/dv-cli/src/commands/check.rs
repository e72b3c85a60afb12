// check.rs — Check subcommand: resolve a vulnerability against the policy.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use dv_policy::{resolve, LoadOptions, PolicyStore, Vulnerability};
use tracing::debug;

#[derive(Args)]
pub struct CheckArgs {
    /// Path to a JSON vulnerability record: {"id": "...", "from": [...]}.
    #[arg(long, conflicts_with_all = ["id", "from"])]
    pub file: Option<PathBuf>,

    /// Vulnerability id (used with --from).
    #[arg(long, requires = "from")]
    pub id: Option<String>,

    /// Dependency chain entry, root project first, vulnerable package
    /// last. Repeat per entry: --from root@1.0.0 --from dep@2.0.0
    #[arg(long, requires = "id")]
    pub from: Vec<String>,

    /// Skip the policy file and treat every vulnerability as uncovered.
    #[arg(long)]
    pub ignore_policy: bool,
}

/// Returns whether the vulnerability is covered by the policy.
pub fn execute(args: &CheckArgs, project_root: &Path) -> anyhow::Result<bool> {
    let vuln = read_vulnerability(args)?;

    let store = PolicyStore::for_project(project_root);
    let policy = store
        .load_with(&LoadOptions {
            ignore_policy: args.ignore_policy,
        })
        .with_context(|| format!("loading policy from {}", store.path().display()))?;

    debug!(
        id = %vuln.id,
        ignore_rules = policy.ignore.len(),
        patch_rules = policy.patch.len(),
        "resolving vulnerability"
    );

    match resolve(&policy, &vuln) {
        Some(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(true)
        }
        None => {
            println!("{} is not covered by the policy", vuln.id);
            Ok(false)
        }
    }
}

/// Build the vulnerability record from --file or the inline flags.
fn read_vulnerability(args: &CheckArgs) -> anyhow::Result<Vulnerability> {
    if let Some(file) = &args.file {
        let data = fs::read_to_string(file)
            .with_context(|| format!("reading vulnerability record {}", file.display()))?;
        let vuln = serde_json::from_str(&data)
            .with_context(|| format!("parsing vulnerability record {}", file.display()))?;
        return Ok(vuln);
    }

    match &args.id {
        Some(id) => Ok(Vulnerability {
            id: id.clone(),
            from: args.from.clone(),
        }),
        None => anyhow::bail!("provide --file, or --id with --from"),
    }
}
