//! Sorbet text formatter

use crate::document::{Document, CONTINUATION_PREFIX, SEPARATOR_PADDED};
use anyhow::{Context, Result};

/// Formats documents as Sorbet text.
///
/// Output is designed to be re-parseable: `parse(format(doc))` yields the
/// same entries for documents whose keys and value lines are already in
/// canonical form (trimmed, keys free of `=>` and a leading `>`).
pub struct Formatter {
    // Currently stateless, but reserved for future options
}

impl Formatter {
    /// Create a new formatter
    pub fn new() -> Self {
        Self {}
    }

    /// Format a single key-value pair.
    ///
    /// Single-line values become `key => value`; each further value line
    /// is emitted as a `> ` continuation line.
    pub fn format_pair(&self, key: &str, value: &str) -> String {
        let mut lines = value.split('\n');
        let mut output = String::with_capacity(key.len() + value.len() + SEPARATOR_PADDED.len());

        output.push_str(key);
        output.push_str(SEPARATOR_PADDED);

        // split() yields at least one item for any str, but the contract
        // covers the empty case by emitting the bare separator.
        if let Some(first) = lines.next() {
            output.push_str(first);
        }
        for line in lines {
            output.push('\n');
            output.push_str(CONTINUATION_PREFIX);
            output.push_str(line);
        }

        output
    }

    /// Format a whole document, entries in the document's iteration order
    /// joined with `\n`. No trailing newline is appended.
    pub fn format(&self, document: &Document) -> String {
        document
            .iter()
            .map(|(key, value)| self.format_pair(key, value))
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Format a document directly to a writer
    pub fn write_to_writer<W: std::io::Write>(
        &self,
        document: &Document,
        mut writer: W,
    ) -> Result<()> {
        let formatted = self.format(document);
        writer.write_all(formatted.as_bytes())?;
        Ok(())
    }

    /// Format a document to a file
    pub fn write_to_file(&self, document: &Document, path: &std::path::Path) -> Result<()> {
        let formatted = self.format(document);
        std::fs::write(path, formatted)
            .with_context(|| format!("Failed to write: {}", path.display()))?;
        Ok(())
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a single key-value pair as Sorbet text
pub fn format_pair(key: &str, value: &str) -> String {
    Formatter::new().format_pair(key, value)
}

/// Format a whole document as Sorbet text
pub fn format(document: &Document) -> String {
    Formatter::new().format(document)
}
