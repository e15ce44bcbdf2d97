//! Sorbet text parser

use crate::document::{
    ConsoleSink, Diagnostic, DiagnosticSink, Document, CONTINUATION_MARKER, SEPARATOR,
};

/// A key-value pair being accumulated, not yet committed to the document.
/// The value grows as continuation lines are appended and is trimmed as a
/// whole when the pair is committed.
#[derive(Debug)]
struct PendingEntry {
    key: String,
    value: String,
}

impl PendingEntry {
    fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        }
    }

    /// Append one continuation line's content. Continuation lines join
    /// with a newline, each trimmed individually.
    fn append_continuation(&mut self, content: &str) {
        if self.value.is_empty() {
            self.value = content.to_string();
        } else {
            self.value.push('\n');
            self.value.push_str(content);
        }
    }

    fn commit(self, document: &mut Document) {
        document.insert(self.key, self.value.trim().to_string());
    }
}

/// Parses Sorbet text into a [`Document`].
///
/// Parsing is best-effort and never fails: malformed lines are reported
/// to the diagnostic sink and skipped, and the parser keeps going.
pub struct Parser<S = ConsoleSink> {
    sink: S,
}

impl Parser<ConsoleSink> {
    /// Create a parser that prints diagnostics to stderr
    pub fn new() -> Self {
        Self { sink: ConsoleSink }
    }
}

impl Default for Parser<ConsoleSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticSink> Parser<S> {
    /// Create a parser that reports diagnostics to the given sink
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    /// Consume the parser and return its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Parse Sorbet text into a document.
    ///
    /// Input is split on `\n`. Lines containing `=>` start a new pair and
    /// commit the previous one; trimmed lines starting with `>` append to
    /// the current pair's value; everything else is ignored. A trailing
    /// `\r` before the split point is removed by the format's trimming
    /// rules, so CRLF input parses the same as LF input without a
    /// normalization pass.
    pub fn parse(&mut self, input: &str) -> Document {
        let mut document = Document::new();
        let mut pending: Option<PendingEntry> = None;

        for line in input.split('\n') {
            if line.contains(SEPARATOR) {
                // A new pair line ends the previous pair's continuation
                // block, so commit it before anything else.
                if let Some(entry) = pending.take() {
                    entry.commit(&mut document);
                }

                let parts: Vec<&str> = line.split(SEPARATOR).collect();
                if parts.len() == 2 {
                    pending = Some(PendingEntry::new(parts[0], parts[1]));
                } else {
                    self.sink.report(Diagnostic::syntax(format!(
                        "Syntax error! Expected [key] => [value] at: {line}"
                    )));
                }
                continue;
            }

            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix(CONTINUATION_MARKER) {
                match pending {
                    Some(ref mut entry) => entry.append_continuation(rest.trim()),
                    None => self.sink.report(Diagnostic::syntax_exception(format!(
                        "Continuation line without a key at: {line}"
                    ))),
                }
            }
            // Anything else (blank lines included) is a separator line
            // and contributes nothing.
        }

        // The final pair has no following separator line to commit it.
        if let Some(entry) = pending.take() {
            entry.commit(&mut document);
        }

        document
    }
}

/// Parse Sorbet text, printing diagnostics to stderr
pub fn parse(input: &str) -> Document {
    Parser::new().parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CollectingSink, DiagnosticKind};

    fn parse_collecting(input: &str) -> (Document, Vec<Diagnostic>) {
        let mut parser = Parser::with_sink(CollectingSink::new());
        let document = parser.parse(input);
        (document, parser.into_sink().into_diagnostics())
    }

    #[test]
    fn test_parse_single_pair() {
        let (doc, diags) = parse_collecting("key => value");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("key"), Some("value"));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_parse_multiple_pairs() {
        let (doc, diags) = parse_collecting("key1 => value1\nkey2 => value2\nkey3 => value3");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.get("key1"), Some("value1"));
        assert_eq!(doc.get("key2"), Some("value2"));
        assert_eq!(doc.get("key3"), Some("value3"));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_parse_continuation_lines() {
        let input = "key1 => value1\n> cont1\nkey2 => value2\n> cont2\n> more";
        let (doc, diags) = parse_collecting(input);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("key1"), Some("value1\ncont1"));
        assert_eq!(doc.get("key2"), Some("value2\ncont2\nmore"));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        let (doc, diags) = parse_collecting("");
        assert!(doc.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_blank_lines_between_pairs_are_ignored() {
        let input = "key1 => value1\n\n\nkey2 => value2\n";
        let (doc, diags) = parse_collecting(input);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("key1"), Some("value1"));
        assert_eq!(doc.get("key2"), Some("value2"));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_blank_lines_do_not_break_continuation_blocks() {
        let input = "key => value\n\n> late continuation";
        let (doc, _) = parse_collecting(input);
        assert_eq!(doc.get("key"), Some("value\nlate continuation"));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let (doc, _) = parse_collecting("  key  =>  value  ");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("key"), Some("value"));
    }

    #[test]
    fn test_continuation_lines_trimmed_individually() {
        let input = "key => value\n  >   padded content  ";
        let (doc, _) = parse_collecting(input);
        assert_eq!(doc.get("key"), Some("value\npadded content"));
    }

    #[test]
    fn test_continuation_into_empty_value() {
        let input = "key =>\n> only line";
        let (doc, _) = parse_collecting(input);
        assert_eq!(doc.get("key"), Some("only line"));
    }

    #[test]
    fn test_orphan_continuation_reports_exception() {
        let (doc, diags) = parse_collecting("> orphan");

        assert!(doc.is_empty());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::SyntaxException);
        assert_eq!(diags[0].message, "Continuation line without a key at: > orphan");
    }

    #[test]
    fn test_double_separator_reports_syntax_error() {
        let (doc, diags) = parse_collecting("a => b => c");

        assert!(doc.is_empty());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::Syntax);
        assert_eq!(
            diags[0].message,
            "Syntax error! Expected [key] => [value] at: a => b => c"
        );
    }

    #[test]
    fn test_malformed_line_still_commits_previous_pair() {
        let input = "good => value\n> extra\nbad => b => c\nnext => ok";
        let (doc, diags) = parse_collecting(input);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("good"), Some("value\nextra"));
        assert_eq!(doc.get("next"), Some("ok"));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::Syntax);
    }

    #[test]
    fn test_malformed_line_discards_following_continuations() {
        // The continuation after the bad line has no key to attach to.
        let input = "bad => b => c\n> stray";
        let (doc, diags) = parse_collecting(input);

        assert!(doc.is_empty());
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].kind, DiagnosticKind::Syntax);
        assert_eq!(diags[1].kind, DiagnosticKind::SyntaxException);
    }

    #[test]
    fn test_duplicate_key_last_occurrence_wins() {
        let input = "key => first\nkey => second";
        let (doc, diags) = parse_collecting(input);

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("key"), Some("second"));
        // Redeclaring a key is permitted, not an error.
        assert!(diags.is_empty());
    }

    #[test]
    fn test_separator_line_wins_over_continuation_marker() {
        // A line with "=>" is a pair line even when it starts with ">".
        let input = "key => value\n> sub => nested";
        let (doc, _) = parse_collecting(input);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("key"), Some("value"));
        assert_eq!(doc.get("> sub"), Some("nested"));
    }

    #[test]
    fn test_non_marker_lines_ignored() {
        let input = "# a comment-looking line\nkey => value\nplain prose";
        let (doc, diags) = parse_collecting(input);

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("key"), Some("value"));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_crlf_input_parses_like_lf() {
        let input = "key1 => value1\r\n> cont\r\nkey2 => value2\r\n";
        let (doc, diags) = parse_collecting(input);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("key1"), Some("value1\ncont"));
        assert_eq!(doc.get("key2"), Some("value2"));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_console_parser_convenience() {
        let doc = parse("key => value");
        assert_eq!(doc.get("key"), Some("value"));
    }
}
