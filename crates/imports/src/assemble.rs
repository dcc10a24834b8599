use crate::parse::ParsedFile;

/// Concatenate ordered file bodies, one blank line between each.
#[must_use]
pub fn assemble(files: &[&ParsedFile]) -> String {
    files
        .iter()
        .map(|file| file.body.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
