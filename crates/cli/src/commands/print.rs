use anyhow::{Context, Result};
use graphql_loader::{FileFilter, Loader, LoaderOptions};
use std::io::Write;
use std::path::Path;

/// Write the generated module for `file` to stdout.
///
/// The file is loaded whatever its extension.
#[tracing::instrument(fields(file = %file.display()))]
pub async fn run(file: &Path) -> Result<()> {
    let loader = Loader::new(LoaderOptions::default().with_filter(FileFilter::custom(|_| true)));
    let module = loader
        .load(file)
        .await
        .with_context(|| format!("Failed to generate {}", file.display()))?
        .context("File was rejected by the loader filter")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{module}").context("Failed to write to stdout")?;
    Ok(())
}
