use crate::commands::common::CommandContext;
use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_config::{LoaderExtension, PatternSet};
use graphql_loader::{FileFilter, Loader, LoaderOptions};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Generate and write modules for `files`, or for every project document.
#[tracing::instrument(skip(config_path, files, output_opts), fields(project = ?project_name))]
pub async fn run(
    config_path: Option<PathBuf>,
    project_name: Option<&str>,
    files: Vec<PathBuf>,
    output_opts: OutputOptions,
) -> Result<()> {
    let start_time = std::time::Instant::now();
    let ctx = CommandContext::load(config_path, project_name)?;
    let extension = ctx.loader_extension()?;

    let (loader, entries) = if files.is_empty() {
        let patterns = ctx.project.pattern_set()?;
        let entries = discover_documents(&patterns, &ctx.base_dir)?;
        (ctx.loader()?, entries)
    } else {
        // Explicitly named files are built even if the project patterns skip them
        let entries = files
            .iter()
            .map(std::path::absolute)
            .collect::<std::io::Result<Vec<_>>>()
            .context("Failed to resolve input paths")?;
        (
            Loader::new(LoaderOptions::default().with_filter(FileFilter::custom(|_| true))),
            entries,
        )
    };

    if entries.is_empty() {
        if output_opts.show_info {
            println!(
                "{} {}",
                "!".yellow().bold(),
                "No GraphQL documents matched the configured patterns.".yellow()
            );
        }
        return Ok(());
    }

    tracing::info!(files = entries.len(), "Building modules");

    let mut written = 0usize;
    let mut failures = Vec::new();
    for entry in &entries {
        match build_one(&loader, &extension, entry, &ctx.base_dir).await {
            Ok(Some(output)) => {
                written += 1;
                if output_opts.show_info {
                    println!(
                        "{} {} {} {}",
                        "✓".green(),
                        display_path(entry, &ctx.base_dir),
                        "→".dimmed(),
                        display_path(&output, &ctx.base_dir).dimmed()
                    );
                }
            }
            Ok(None) => {
                tracing::debug!(path = %entry.display(), "Skipped by filter");
            }
            Err(error) => {
                eprintln!(
                    "{} {}: {error:#}",
                    "✗".red().bold(),
                    display_path(entry, &ctx.base_dir)
                );
                failures.push(error);
            }
        }
    }

    if output_opts.show_info {
        println!();
        let summary = format!("Wrote {written} module(s)");
        if failures.is_empty() {
            println!("{}", format!("✓ {summary}").green().bold());
        } else {
            println!(
                "{}",
                format!("✗ {summary}, {} file(s) failed", failures.len()).red()
            );
        }
        println!(
            "  {} {:.2}s",
            "⏱".dimmed(),
            start_time.elapsed().as_secs_f64()
        );
    }

    let failed = failures.len();
    match failures.into_iter().next() {
        Some(first) => Err(first.context(format!("{failed} file(s) failed to build"))),
        None => Ok(()),
    }
}

/// Generate one module and write it per the loader extension.
async fn build_one(
    loader: &Loader,
    extension: &LoaderExtension,
    entry: &Path,
    base_dir: &Path,
) -> Result<Option<PathBuf>> {
    let Some(module) = loader
        .load(entry)
        .await
        .with_context(|| format!("Failed to generate {}", entry.display()))?
    else {
        return Ok(None);
    };

    let output = extension.output_path(entry, base_dir);
    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(&output, module)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(Some(output))
}

/// Files under `base_dir` matching the project's patterns, in path order.
pub fn discover_documents(patterns: &PatternSet, base_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();

    for pattern in patterns.include_patterns() {
        let full_pattern = base_dir.join(pattern);
        let full_pattern = full_pattern.to_string_lossy();
        let paths = glob::glob(&full_pattern)
            .with_context(|| format!("Invalid document pattern: {pattern}"))?;

        for path in paths {
            match path {
                Ok(path) if path.is_file() && patterns.matches(&path, base_dir) => {
                    found.insert(path);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Skipping unreadable path"),
            }
        }
    }

    Ok(found.into_iter().collect())
}

fn display_path(path: &Path, base_dir: &Path) -> String {
    path.strip_prefix(base_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
