//! wp-composer CLI
//!
//! Keeps a WordPress project's composer.json configured.

mod cli;
mod commands;
mod error;
mod interactive;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::Project;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    let project = Project::from_manifest(&cli.manifest);

    match cli.command {
        Some(cmd) => execute_command(&project, cmd),
        None => {
            println!("{} WordPress Composer configurator", "wp-composer".green().bold());
            println!();
            println!("Run {} for available commands.", "wp-composer --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(project: &Project, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Configure {
            public_dir,
            dry_run,
        } => commands::run_configure(project, &public_dir, dry_run),
        Commands::Check { public_dir, json } => commands::run_check(project, public_dir, json),
        Commands::Gitignore {
            template,
            public_dir,
            dry_run,
        } => commands::run_gitignore(project, &template, &public_dir, dry_run),
        Commands::Hook {
            event,
            package,
            public_dir,
        } => commands::run_hook(project, &event, package.as_deref(), &public_dir),
        Commands::Events => commands::run_events(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PublicDirArgs;
    use std::fs;
    use tempfile::TempDir;

    fn quiet() -> PublicDirArgs {
        PublicDirArgs {
            public_dir: None,
            require_public_dir: false,
            no_interaction: true,
        }
    }

    fn project_with(manifest: &str) -> (TempDir, Project) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("composer.json");
        fs::write(&path, manifest).unwrap();
        let project = Project::from_manifest(&path);
        (temp, project)
    }

    #[test]
    fn test_configure_then_check() {
        let (_temp, project) = project_with("{}");

        assert!(commands::run_check(&project, None, false).is_err());
        commands::run_configure(&project, &quiet(), false).unwrap();
        commands::run_check(&project, None, false).unwrap();
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let (temp, project) = project_with("{}");

        commands::run_configure(&project, &quiet(), true).unwrap();

        let content = fs::read_to_string(temp.path().join("composer.json")).unwrap();
        assert_eq!(content, "{}");
    }

    #[test]
    fn test_hook_rejects_unknown_event() {
        let (_temp, project) = project_with("{}");

        let err = commands::run_hook(&project, "post-autoload-dump", None, &quiet()).unwrap_err();
        assert!(err.to_string().contains("post-autoload-dump"));
    }

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }
}
