//! Splitting one GraphQL file into its `#import` header and its body.
//!
//! Imports form a contiguous header: blank lines and `#` comments may be
//! interleaved with them, but the first line of real content closes the
//! header. From then on every line, including ones that look like imports,
//! belongs to the body.

use crate::path::resolve_import_path;
use crate::{ImportError, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncBufReadExt;

/// Recognized import directive prefixes, matched at the start of a line.
const IMPORT_PREFIXES: &[&str] = &["#import ", "# import "];

/// A pointer from one GraphQL file to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportReference {
    /// The directive text after the prefix, as written (quotes included)
    pub relative_path: String,
    /// Normalized target path, used as the file's identity
    pub absolute_path: PathBuf,
}

/// A GraphQL file with its import header stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub file_path: PathBuf,
    /// Trimmed GraphQL source without the import lines
    pub body: String,
    /// Imports in declaration order
    pub imports: Vec<ImportReference>,
}

/// Line-at-a-time parser for a single file.
#[derive(Debug)]
pub struct ImportParser {
    file_path: PathBuf,
    body: String,
    imports: Vec<ImportReference>,
    has_exhausted_imports: bool,
}

impl ImportParser {
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            body: String::new(),
            imports: Vec::new(),
            has_exhausted_imports: false,
        }
    }

    /// Feed the next line of the file, without its line terminator.
    pub fn push_line(&mut self, line: &str) {
        if self.has_exhausted_imports {
            self.push_body_line(line);
            return;
        }

        if let Some(written) = strip_import_prefix(line) {
            self.push_import(written);
        } else if !line.trim().is_empty() && !line.starts_with('#') {
            self.has_exhausted_imports = true;
            self.push_body_line(line);
        }
    }

    #[must_use]
    pub fn finish(self) -> ParsedFile {
        ParsedFile {
            file_path: self.file_path,
            body: self.body.trim().to_string(),
            imports: self.imports,
        }
    }

    fn push_import(&mut self, written: &str) {
        let unquoted: String = written.chars().filter(|&c| !matches!(c, '"' | '\'')).collect();
        let absolute_path = resolve_import_path(&self.file_path, unquoted.trim());

        tracing::trace!(
            file = %self.file_path.display(),
            import = %absolute_path.display(),
            "Found import"
        );

        self.imports.push(ImportReference {
            relative_path: written.to_string(),
            absolute_path,
        });
    }

    fn push_body_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push('\n');
    }
}

fn strip_import_prefix(line: &str) -> Option<&str> {
    IMPORT_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
}

/// Parse in-memory file contents.
#[must_use]
pub fn parse_source(file_path: &Path, source: &str) -> ParsedFile {
    let mut parser = ImportParser::new(file_path);
    for line in source.lines() {
        parser.push_line(line);
    }
    parser.finish()
}

/// Read and parse a file, streaming it line by line.
pub async fn parse_file(file_path: PathBuf) -> Result<ParsedFile> {
    let file = tokio::fs::File::open(&file_path)
        .await
        .map_err(|e| ImportError::from_io(file_path.clone(), e))?;

    let mut lines = tokio::io::BufReader::new(file).lines();
    let mut parser = ImportParser::new(file_path.clone());

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ImportError::from_io(file_path.clone(), e))?
    {
        parser.push_line(&line);
    }

    let parsed = parser.finish();
    tracing::debug!(
        path = %parsed.file_path.display(),
        imports = parsed.imports.len(),
        body_len = parsed.body.len(),
        "Parsed GraphQL file"
    );

    Ok(parsed)
}
