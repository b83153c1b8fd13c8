//! Long-form document cleaning.
//!
//! Tokenized corpora encode brackets and quotes as alias tokens (`-lrb-` for `(`, etc.).
//! [ArticleCleaner] puts the literal characters back and makes sure the document ends with a period:
//!
//! ```text
//! -LRB- see table -RRB- results are good
//! ```
//!
//! becomes
//!
//! ```text
//! ( see table ) results are good .
//! ```
use itertools::Itertools;

use super::Normalize;

/// Lower-cased alias tokens and their literal replacement.
const BRACKET_ALIASES: [(&str, &str); 8] = [
    ("-lrb-", "("),
    ("-rrb-", ")"),
    ("-lcb-", "{"),
    ("-rcb-", "}"),
    ("-lsb-", "["),
    ("-rsb-", "]"),
    ("``", "\""),
    ("''", "\""),
];

/// Replaces bracket aliases and appends ` .` when the text does not end with a period.
///
/// An empty line becomes `.` rather than ` .`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArticleCleaner;

impl ArticleCleaner {
    fn substitute(token: &str) -> &str {
        BRACKET_ALIASES
            .iter()
            .find(|(alias, _)| *alias == token)
            .map_or(token, |&(_, literal)| literal)
    }
}

impl Normalize for ArticleCleaner {
    fn normalize(&self, line: &str) -> String {
        let lower = line.to_lowercase();
        let mut cleaned = lower.split(' ').map(Self::substitute).join(" ");

        if cleaned.is_empty() {
            cleaned.push('.');
        } else if !cleaned.ends_with('.') {
            cleaned.push_str(" .");
        }
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_replaced() {
        let c = ArticleCleaner;
        assert_eq!(
            c.normalize("-LRB- see table -RRB- and -LSB- 1 -RSB- -LCB- x -RCB-"),
            "( see table ) and [ 1 ] { x } ."
        );
    }

    #[test]
    fn quotes_replaced() {
        let c = ArticleCleaner;
        assert_eq!(c.normalize("`` quoted '' text ."), "\" quoted \" text .");
    }

    #[test]
    fn aliases_only_match_whole_tokens() {
        let c = ArticleCleaner;
        assert_eq!(c.normalize("x-lrb- -lrb-x"), "x-lrb- -lrb-x .");
    }

    #[test]
    fn period_kept() {
        let c = ArticleCleaner;
        assert_eq!(c.normalize("we propose a method."), "we propose a method.");
        assert_eq!(c.normalize("we propose a method"), "we propose a method .");
    }

    #[test]
    fn empty_line() {
        assert_eq!(ArticleCleaner.normalize(""), ".");
    }

    #[test]
    fn idempotent() {
        let c = ArticleCleaner;
        for line in [
            "-LRB- a -RRB- b",
            "`` c '' d.",
            "plain text",
            "",
            "double  space -lcb-",
        ] {
            let once = c.normalize(line);
            assert_eq!(c.normalize(&once), once, "input: {:?}", line);
        }
    }
}
