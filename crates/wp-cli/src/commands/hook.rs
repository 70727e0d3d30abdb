//! Implementation of `wp-composer hook` and `wp-composer events`

use colored::Colorize;
use wp_manifest::{EventMap, EventRunner, HandlerReport, LifecycleEvent};

use super::Project;
use crate::cli::PublicDirArgs;
use crate::error::Result;

/// Run the handlers registered for `event`.
pub fn run_hook(
    project: &Project,
    event: &str,
    package: Option<&str>,
    args: &PublicDirArgs,
) -> Result<()> {
    let event: LifecycleEvent = event.parse()?;
    let reconciler = project.reconciler(args)?;
    let runner = EventRunner::new(project.root.clone(), project.manifest.clone(), &reconciler);

    for report in runner.dispatch(event, package)? {
        match report {
            HandlerReport::Configured(outcome) if outcome.is_changed() => {
                for change in &outcome.changes {
                    println!("  {} {}", "+".green(), change);
                }
                println!("{} Updated {}", "OK".green().bold(), project.manifest_name());
            }
            HandlerReport::Configured(_) => {
                println!("{} {} is already configured", "OK".green().bold(), project.manifest_name());
            }
            HandlerReport::InstallDirectory(dir) => {
                println!("WordPress install directory: {}", dir.cyan());
            }
            HandlerReport::Cleaned { path, removed: true } => {
                println!("{} Removed {}", "OK".green().bold(), path);
            }
            HandlerReport::Cleaned { path, removed: false } => {
                println!("Nothing to clean at {}", path);
            }
            HandlerReport::Skipped { reason } => {
                println!("{} {}", "skipped:".dimmed(), reason);
            }
        }
    }
    Ok(())
}

/// Print the event table.
pub fn run_events() -> Result<()> {
    let map = EventMap::standard();
    for event in map.events() {
        let handlers: Vec<String> = map
            .handlers_for(event)
            .iter()
            .map(|h| format!("{:?}", h))
            .collect();
        println!("{:<22} {}", event.to_string().cyan(), handlers.join(", "));
    }
    Ok(())
}
