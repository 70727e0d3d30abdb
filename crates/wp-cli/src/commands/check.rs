//! Implementation of `wp-composer check`

use colored::Colorize;
use serde::Serialize;
use wp_manifest::Change;

use super::Project;
use crate::cli::PublicDirArgs;
use crate::error::{CliError, Result};

#[derive(Serialize)]
struct CheckReport<'a> {
    configured: bool,
    changes: &'a [Change],
}

/// Fail when `configure` would change the manifest. Never prompts.
pub fn run_check(project: &Project, public_dir: Option<String>, json: bool) -> Result<()> {
    let args = PublicDirArgs {
        public_dir,
        require_public_dir: false,
        no_interaction: true,
    };
    let reconciler = project.reconciler(&args)?;
    let outcome = project.manifest.reconcile_in_place(&reconciler, true)?;
    let name = project.manifest_name();

    if json {
        let report = CheckReport {
            configured: !outcome.is_changed(),
            changes: &outcome.changes,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if outcome.is_changed() {
        println!("{} {} needs configuration:", "!!".yellow().bold(), name);
        for change in &outcome.changes {
            println!("  {} {}", "-".yellow(), change);
        }
    } else {
        println!("{} {} is configured", "OK".green().bold(), name);
    }

    if outcome.is_changed() {
        return Err(CliError::user(format!(
            "{} needs configuration; run `wp-composer configure`",
            name
        )));
    }
    Ok(())
}
