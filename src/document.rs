//! Document data structures and diagnostics

use indexmap::IndexMap;
use std::fmt;

// Sorbet format constants
pub const SEPARATOR: &str = "=>";
pub const SEPARATOR_PADDED: &str = " => ";
pub const CONTINUATION_MARKER: char = '>';
pub const CONTINUATION_PREFIX: &str = "> ";

/// An ordered mapping of string keys to string values.
///
/// Backed by an [`IndexMap`] so that iteration follows insertion order,
/// which makes formatter output deterministic. Inserting an existing key
/// overwrites its value and keeps the key's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document(IndexMap<String, String>);

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Insert a key-value pair, returning the previous value if the key
    /// was already present (last write wins)
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Get the value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether the document contains the given key
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a key, returning its value if present.
    /// Preserves the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the document has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(String, String)> for Document {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Document {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Kind of malformed-input report emitted during parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A line contains the pair separator but does not split into
    /// exactly two parts
    Syntax,
    /// A continuation line appeared before any key was declared
    SyntaxException,
}

impl DiagnosticKind {
    /// Human-readable prefix used when surfacing the diagnostic
    pub fn prefix(&self) -> &'static str {
        match self {
            DiagnosticKind::Syntax => "Syntax Error",
            DiagnosticKind::SyntaxException => "Syntax Exception",
        }
    }
}

/// A non-fatal malformed-input report.
///
/// Diagnostics are informational only: the parser skips the offending
/// line's contribution and keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn syntax(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Syntax,
            message: message.into(),
        }
    }

    pub fn syntax_exception(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::SyntaxException,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.prefix(), self.message)
    }
}

/// Receives malformed-input reports from the parser.
///
/// Fire-and-forget: implementations must not panic, and nothing a sink
/// does can change what the parser returns.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Sink that prints each diagnostic to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        eprintln!("{}", diagnostic);
    }
}

/// Sink that buffers diagnostics in emission order.
///
/// Callers who need strict validation can parse with a `CollectingSink`
/// and treat a non-empty buffer as a soft failure.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics collected so far, in emission order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
