//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// wp-composer - Keep composer.json set up for a WordPress project
#[derive(Parser, Debug)]
#[command(name = "wp-composer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the project manifest
    #[arg(
        long,
        global = true,
        env = "WP_COMPOSER_MANIFEST",
        default_value = "composer.json"
    )]
    pub manifest: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// How the public directory is chosen
#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct PublicDirArgs {
    /// Public (web root) directory, overriding extra.public-dir
    #[arg(long, env = "WP_PUBLIC_DIR")]
    pub public_dir: Option<String>,

    /// Fail instead of defaulting to "public" when no directory is found
    #[arg(long)]
    pub require_public_dir: bool,

    /// Never prompt
    #[arg(short = 'n', long)]
    pub no_interaction: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Configure composer.json for WordPress
    ///
    /// Adds the public and install directories, the wpackagist repository,
    /// installer paths and package sorting, then orders the properties.
    ///
    /// Examples:
    ///   wp-composer configure                  # Configure ./composer.json
    ///   wp-composer configure --public-dir web # Use web/ as web root
    ///   wp-composer configure --dry-run        # Show the diff only
    Configure {
        #[command(flatten)]
        public_dir: PublicDirArgs,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Check whether composer.json needs configuring
    ///
    /// Exits with an error when `configure` would change anything.
    Check {
        /// Public (web root) directory, overriding extra.public-dir
        #[arg(long, env = "WP_PUBLIC_DIR")]
        public_dir: Option<String>,

        /// Output as JSON for CI/CD integration
        #[arg(long)]
        json: bool,
    },

    /// Merge a .gitignore template into the project's .gitignore
    Gitignore {
        /// Template file; `{{ APP_PUBLIC }}` is replaced by the public directory
        #[arg(long)]
        template: PathBuf,

        #[command(flatten)]
        public_dir: PublicDirArgs,

        /// Print the merged file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the handlers for a package-manager lifecycle event
    ///
    /// Examples:
    ///   wp-composer hook pre-install-cmd
    ///   wp-composer hook post-package-install --package johnpbloch/wordpress
    Hook {
        /// Event name, e.g. pre-update-cmd
        event: String,

        /// Package the event is about
        #[arg(long)]
        package: Option<String>,

        #[command(flatten)]
        public_dir: PublicDirArgs,
    },

    /// List lifecycle events and their handlers
    Events,
}
