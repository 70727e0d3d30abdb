//! Implementation of `wp-composer configure`

use colored::Colorize;

use super::Project;
use crate::cli::PublicDirArgs;
use crate::error::Result;

/// Reconcile the manifest and write it back when anything changed.
pub fn run_configure(project: &Project, args: &PublicDirArgs, dry_run: bool) -> Result<()> {
    let reconciler = project.reconciler(args)?;
    let outcome = project.manifest.reconcile_in_place(&reconciler, dry_run)?;
    let name = project.manifest_name();

    if !outcome.is_changed() {
        println!("{} {} is already configured", "OK".green().bold(), name);
        return Ok(());
    }

    if dry_run {
        print!("{}", outcome.unified_diff(name));
        println!();
        println!(
            "{} {} change(s) would be made (dry run)",
            "=>".blue().bold(),
            outcome.changes.len()
        );
        return Ok(());
    }

    for change in &outcome.changes {
        println!("  {} {}", "+".green(), change);
    }
    println!("{} Updated {}", "OK".green().bold(), name);
    Ok(())
}
