//! Line-local syntax highlighting.
//!
//! Classification is a pure function over a single line of text: an ordered
//! list of regex rules is matched against the line, earliest match wins, ties
//! resolved by rule order, and every unmatched region is filled with the
//! plain class. The returned spans always partition `[0, line.len())` in byte
//! offsets, so the renderer can call [`Highlighter::classify`] every frame
//! with no cached state.

use regex::Regex;

/// Token classes assigned to highlight spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Unclassified text.
    Plain,
    /// A mapping key up to and including its colon.
    Key,
    /// A `#` comment running to end of line.
    Comment,
    /// A single- or double-quoted string.
    Str,
    /// Structural punctuation (sequence dashes, brackets, braces).
    Punct,
}

/// A classified region of a line: byte offsets `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Token class for this span.
    pub class: TokenClass,
}

/// An ordered classification rule: pattern plus the class it assigns.
struct Rule {
    pattern: Regex,
    class: TokenClass,
}

/// Stateless line classifier with compiled rules.
pub struct Highlighter {
    rules: Vec<Rule>,
}

impl Highlighter {
    /// Compile the default rule set.
    ///
    /// Rule order is the precedence order for matches starting at the same
    /// offset: strings before comments (a `#` inside quotes is not a
    /// comment), comments before keys.
    pub fn new() -> Self {
        let rules = [
            (r#""[^"]*"|'[^']*'"#, TokenClass::Str),
            (r"#.*$", TokenClass::Comment),
            (r"^\s*[^\s:#]+:", TokenClass::Key),
            (r"[-\[\]{},]", TokenClass::Punct),
        ];
        Self {
            rules: rules
                .into_iter()
                .map(|(pattern, class)| Rule {
                    pattern: Regex::new(pattern).expect("invalid highlight pattern"),
                    class,
                })
                .collect(),
        }
    }

    /// Classify a line into spans covering `[0, line.len())`.
    ///
    /// The spans are ordered, gap-free, and non-overlapping. An empty line
    /// yields no spans.
    pub fn classify(&self, line: &str) -> Vec<HighlightSpan> {
        // Collect every rule match, then keep the earliest-starting
        // non-overlapping ones; ties at the same start go to the earlier rule.
        let mut matches: Vec<HighlightSpan> = Vec::new();
        for rule in &self.rules {
            for found in rule.pattern.find_iter(line) {
                if found.start() < found.end() {
                    matches.push(HighlightSpan {
                        start: found.start(),
                        end: found.end(),
                        class: rule.class,
                    });
                }
            }
        }
        // Stable sort preserves rule order for equal starts.
        matches.sort_by_key(|span| span.start);

        let mut spans: Vec<HighlightSpan> = Vec::new();
        let mut pos = 0;
        for span in matches {
            if span.start < pos {
                continue;
            }
            if span.start > pos {
                spans.push(HighlightSpan {
                    start: pos,
                    end: span.start,
                    class: TokenClass::Plain,
                });
            }
            spans.push(span);
            pos = span.end;
        }
        if pos < line.len() {
            spans.push(HighlightSpan {
                start: pos,
                end: line.len(),
                class: TokenClass::Plain,
            });
        }
        spans
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partition(line: &str, spans: &[HighlightSpan]) {
        let mut pos = 0;
        for span in spans {
            assert_eq!(span.start, pos, "gap or overlap at {pos} in {line:?}");
            assert!(span.end > span.start, "empty span in {line:?}");
            pos = span.end;
        }
        assert_eq!(pos, line.len(), "spans do not cover {line:?}");
    }

    fn classes(spans: &[HighlightSpan]) -> Vec<TokenClass> {
        spans.iter().map(|span| span.class).collect()
    }

    #[test]
    fn test_empty_line_has_no_spans() {
        let highlighter = Highlighter::new();
        assert!(highlighter.classify("").is_empty());
    }

    #[test]
    fn test_plain_line() {
        let highlighter = Highlighter::new();
        let spans = highlighter.classify("just some text");
        assert_partition("just some text", &spans);
        assert_eq!(classes(&spans), vec![TokenClass::Plain]);
    }

    #[test]
    fn test_key_and_value() {
        let highlighter = Highlighter::new();
        let line = "name: server";
        let spans = highlighter.classify(line);
        assert_partition(line, &spans);
        assert_eq!(spans[0].class, TokenClass::Key);
        assert_eq!(&line[spans[0].start..spans[0].end], "name:");
    }

    #[test]
    fn test_indented_key() {
        let highlighter = Highlighter::new();
        let line = "  port: 8080";
        let spans = highlighter.classify(line);
        assert_partition(line, &spans);
        assert_eq!(&line[spans[0].start..spans[0].end], "  port:");
        assert_eq!(spans[0].class, TokenClass::Key);
    }

    #[test]
    fn test_comment_to_end_of_line() {
        let highlighter = Highlighter::new();
        let line = "value # trailing note";
        let spans = highlighter.classify(line);
        assert_partition(line, &spans);
        let last = spans.last().unwrap();
        assert_eq!(last.class, TokenClass::Comment);
        assert_eq!(&line[last.start..last.end], "# trailing note");
    }

    #[test]
    fn test_hash_inside_string_is_not_comment() {
        let highlighter = Highlighter::new();
        let line = r#"key: "a # b""#;
        let spans = highlighter.classify(line);
        assert_partition(line, &spans);
        assert!(spans.iter().any(|s| s.class == TokenClass::Str));
        assert!(!spans.iter().any(|s| s.class == TokenClass::Comment));
    }

    #[test]
    fn test_sequence_dash_is_punct() {
        let highlighter = Highlighter::new();
        let line = "- item";
        let spans = highlighter.classify(line);
        assert_partition(line, &spans);
        assert_eq!(spans[0].class, TokenClass::Punct);
    }

    #[test]
    fn test_partition_property_on_varied_lines() {
        let highlighter = Highlighter::new();
        let lines = [
            "a: 1",
            "# full line comment",
            "   ",
            "steps: [one, two] # inline",
            r#"msg: 'hello # world'"#,
            "no colon here",
            "::",
            "key:",
            "深い: 値 # コメント",
        ];
        for line in lines {
            let spans = highlighter.classify(line);
            assert_partition(line, &spans);
        }
    }

    #[test]
    fn test_classify_is_deterministic() {
        let highlighter = Highlighter::new();
        let line = "key: value # note";
        assert_eq!(highlighter.classify(line), highlighter.classify(line));
    }
}
