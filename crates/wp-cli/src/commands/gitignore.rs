//! Implementation of `wp-composer gitignore`

use std::collections::HashMap;
use std::path::Path;

use colored::Colorize;
use wp_fs::{NormalizedPath, io};
use wp_manifest::{compile_template, merge_gitignore};

use super::Project;
use crate::cli::PublicDirArgs;
use crate::error::Result;

/// Compile the template and merge it into the project's `.gitignore`.
pub fn run_gitignore(
    project: &Project,
    template: &Path,
    args: &PublicDirArgs,
    dry_run: bool,
) -> Result<()> {
    let public_dir = project.public_dir(args)?;
    let source = io::read_text(&NormalizedPath::new(template))?;
    let data = HashMap::from([("APP_PUBLIC", public_dir)]);
    let compiled = compile_template(&source, &data);

    let target = project.root.join(".gitignore");
    let existing = io::read_text_if_exists(&target)?;
    let merged = merge_gitignore(&compiled, existing.as_deref());

    if dry_run {
        print!("{}", merged);
        return Ok(());
    }

    if existing.as_deref() == Some(merged.as_str()) {
        println!("{} .gitignore is up to date", "OK".green().bold());
        return Ok(());
    }

    io::write_text(&target, &merged)?;
    tracing::info!(path = %target, "wrote .gitignore");
    println!("{} Updated .gitignore", "OK".green().bold());
    Ok(())
}
