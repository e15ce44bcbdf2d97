//! # sorbet
//!
//! Parser and formatter for the Sorbet configuration format: a minimal
//! line-oriented key-value text format with multi-line values.
//!
//! ## Format
//!
//! Each pair lives on a line with a `=>` separator; lines starting with
//! `>` continue the previous value; anything else is ignored:
//!
//! ```text
//! host => example.com
//! motd => Welcome!
//! > Second line of the message.
//! > Third line.
//! ```
//!
//! Keys, values, and each continuation line are trimmed of surrounding
//! whitespace. A repeated key overwrites the earlier entry.
//!
//! ## Parsing is best-effort
//!
//! [`parse`] never fails. Malformed lines (a `=>` line that splits into
//! more than two parts, or a continuation line before any key) are
//! reported to a [`DiagnosticSink`] and skipped; the rest of the input
//! still parses. The default sink prints to stderr; use
//! [`CollectingSink`] to capture diagnostics instead:
//!
//! ```rust
//! use sorbet::{CollectingSink, Parser};
//!
//! let mut parser = Parser::with_sink(CollectingSink::new());
//! let doc = parser.parse("a => b => c\nkey => value");
//!
//! assert_eq!(doc.get("key"), Some("value"));
//! assert_eq!(parser.into_sink().diagnostics().len(), 1);
//! ```
//!
//! ## Round trip
//!
//! [`format`] output is re-parseable: parsing it yields the document it
//! was produced from, provided keys and value lines are in canonical
//! form (trimmed, keys free of `=>` and not starting with `>`).
//!
//! ```rust
//! use sorbet::Document;
//!
//! let mut doc = Document::new();
//! doc.insert("greeting", "hello\nworld");
//!
//! let text = sorbet::format(&doc);
//! assert_eq!(text, "greeting => hello\n> world");
//! assert_eq!(sorbet::parse(&text), doc);
//! ```

pub mod document;
pub mod parser;
pub mod formatter;

pub use document::{
    CollectingSink, ConsoleSink, Diagnostic, DiagnosticKind, DiagnosticSink, Document,
};
pub use formatter::{format, format_pair, Formatter};
pub use parser::{parse, Parser};
