//! Short post cleaning.
//!
//! Posts are lower-cased and split on single spaces, then go through four rules, in order:
//!
//! 1. [strip_retweet_prefix]: leading `rt @user :` triplets are dropped, as long as more tokens follow.
//! 2. [drop_inline_retweets]: an `rt` token directly followed by a `@mention` is dropped along with the mention.
//! 3. [scrub]: empty tokens, ellipses, `pdf`/`doc`/`~`, `[...]` spans and arXiv citations are removed.
//! 4. a trailing `.` token is dropped.
//!
//! Each rule reads an immutable token slice and returns the kept tokens.
use itertools::Itertools;

use super::Normalize;

pub const SENTENCE_START: &str = "<s>";
pub const SENTENCE_END: &str = "</s>";

const RETWEET: &str = "rt";
const RETWEET_PREFIX_LEN: usize = 3;
const DROPPED: [&str; 3] = ["pdf", "doc", "~"];
const ARXIV_OPENING: &str = "(arxiv";

/// Skip leading retweet prefixes (`rt`, handle, separator).
///
/// A prefix is only skipped when tokens remain after it,
/// so `rt x y rt z w` keeps `rt z w`.
pub fn strip_retweet_prefix<'a, 'b>(tokens: &'b [&'a str]) -> &'b [&'a str] {
    let mut start = 0;
    while tokens.len() - start > RETWEET_PREFIX_LEN && tokens[start] == RETWEET {
        start += RETWEET_PREFIX_LEN;
    }
    &tokens[start..]
}

/// Remove every `rt` token that is immediately followed by a `@mention`, along with the mention.
pub fn drop_inline_retweets<'a>(tokens: &[&'a str]) -> Vec<&'a str> {
    let mut kept = Vec::with_capacity(tokens.len());
    let mut idx = 0;
    while idx < tokens.len() {
        let is_mention = tokens
            .get(idx + 1)
            .map_or(false, |next| next.starts_with('@'));
        if tokens[idx] == RETWEET && is_mention {
            idx += 2;
        } else {
            kept.push(tokens[idx]);
            idx += 1;
        }
    }
    kept
}

fn is_ellipsis(token: &str) -> bool {
    token == "…" || (token.len() >= 3 && token.chars().all(|c| c == '.'))
}

fn is_hashtag(token: &str) -> bool {
    token.starts_with('#')
}

/// States of [scrub].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Regular text, tokens are kept unless they are noise.
    Text,
    /// Inside a `[` ... `]` span.
    Bracket,
    /// Inside an `(arxiv` ... `)` citation.
    Citation,
    /// After a citation, until the next hashtag.
    Link,
}

/// Remove noise tokens, bracketed spans and arXiv citations.
///
/// A bracketed span opens on any token starting with `[` (so `[` as well as `[1`)
/// and closes on the first token ending with `]`, the opener included.
/// An `(arxiv` token opens a citation that runs through the first token starting or ending with `)`
/// (so `)` as well as `1234)`),
/// then everything up to the next hashtag is removed too (the link that usually follows).
/// A `.` right before the citation is removed with it.
/// Unterminated spans run to the end of the post.
pub fn scrub<'a>(tokens: &[&'a str]) -> Vec<&'a str> {
    let mut kept: Vec<&'a str> = Vec::with_capacity(tokens.len());
    let mut state = Scan::Text;

    for &token in tokens {
        state = match state {
            Scan::Text => {
                if is_hashtag(token) {
                    kept.push(token);
                    Scan::Text
                } else if token.is_empty() || is_ellipsis(token) || DROPPED.contains(&token) {
                    Scan::Text
                } else if token.starts_with('[') {
                    if token.len() > 1 && token.ends_with(']') {
                        Scan::Text
                    } else {
                        Scan::Bracket
                    }
                } else if token.starts_with(ARXIV_OPENING) {
                    if kept.last() == Some(&".") {
                        kept.pop();
                    }
                    if token.ends_with(')') {
                        Scan::Link
                    } else {
                        Scan::Citation
                    }
                } else {
                    kept.push(token);
                    Scan::Text
                }
            }
            Scan::Bracket if token.ends_with(']') => Scan::Text,
            Scan::Bracket => Scan::Bracket,
            Scan::Citation if token.starts_with(')') || token.ends_with(')') => Scan::Link,
            Scan::Citation => Scan::Citation,
            Scan::Link if is_hashtag(token) => {
                kept.push(token);
                Scan::Text
            }
            Scan::Link => Scan::Link,
        };
    }

    kept
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PostCleaner;

impl PostCleaner {
    /// Apply the four rules on an already lower-cased token sequence.
    pub fn clean_tokens<'a>(&self, tokens: &[&'a str]) -> Vec<&'a str> {
        let tokens = strip_retweet_prefix(tokens);
        let tokens = drop_inline_retweets(tokens);
        let mut tokens = scrub(&tokens);
        if tokens.last() == Some(&".") {
            tokens.pop();
        }
        tokens
    }

    /// Build the abstract of an item: `<s> {title} </s> <s> {post} </s>`,
    /// both title and post being cleaned.
    pub fn compose(&self, title: &str, post: &str) -> String {
        let title_lower = title.to_lowercase();
        let post_lower = post.to_lowercase();
        let title_tokens: Vec<&str> = title_lower.split(' ').collect();
        let post_tokens: Vec<&str> = post_lower.split(' ').collect();

        let abstract_ = std::iter::once(SENTENCE_START)
            .chain(self.clean_tokens(&title_tokens))
            .chain([SENTENCE_END, SENTENCE_START])
            .chain(self.clean_tokens(&post_tokens))
            .chain(std::iter::once(SENTENCE_END))
            .join(" ");
        abstract_
    }
}

impl Normalize for PostCleaner {
    fn normalize(&self, line: &str) -> String {
        let lower = line.to_lowercase();
        let tokens: Vec<&str> = lower.split(' ').collect();
        self.clean_tokens(&tokens).join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(s: &str) -> Vec<&str> {
        s.split(' ').collect()
    }

    #[test]
    fn retweet_prefix_repeated() {
        let tokens = split("rt x y rt z w");
        assert_eq!(strip_retweet_prefix(&tokens), ["rt", "z", "w"]);

        let tokens = split("rt @a : rt @b : new paper");
        assert_eq!(strip_retweet_prefix(&tokens), ["new", "paper"]);
    }

    #[test]
    fn retweet_prefix_untouched() {
        let tokens = split("new rt @a : paper");
        assert_eq!(strip_retweet_prefix(&tokens), tokens.as_slice());
        let empty: Vec<&str> = vec![];
        assert!(strip_retweet_prefix(&empty).is_empty());
    }

    #[test]
    fn inline_retweet() {
        let tokens = split("great work rt @alice check this");
        assert_eq!(
            drop_inline_retweets(&tokens),
            ["great", "work", "check", "this"]
        );
    }

    #[test]
    fn inline_retweet_needs_mention() {
        let tokens = split("great rt work rt");
        assert_eq!(drop_inline_retweets(&tokens), tokens);
    }

    #[test]
    fn scrub_noise() {
        let tokens = split("a  ... pdf b … doc ~ c #d");
        assert_eq!(scrub(&tokens), ["a", "b", "c", "#d"]);
    }

    #[test]
    fn scrub_brackets() {
        let tokens = split("see [ 1 , 2 ] and [3] here");
        assert_eq!(scrub(&tokens), ["see", "and", "here"]);

        let tokens = split("see [ unterminated span");
        assert_eq!(scrub(&tokens), ["see"]);
    }

    #[test]
    fn scrub_arxiv() {
        let tokens = split("new paper . (arxiv 1234.5678 ) http://arxiv.org/abs/1234 #nlp #ml");
        assert_eq!(scrub(&tokens), ["new", "paper", "#nlp", "#ml"]);

        let tokens = split("new paper (arxiv:1234) link #nlp");
        assert_eq!(scrub(&tokens), ["new", "paper", "#nlp"]);
    }

    #[test]
    fn scrub_citation_closed_by_suffix() {
        let tokens = split("see (arxiv 1234) link #nlp");
        assert_eq!(scrub(&tokens), ["see", "#nlp"]);

        let tokens = split("see [1 2] and");
        assert_eq!(scrub(&tokens), ["see", "and"]);
    }

    #[test]
    fn scrub_arxiv_unterminated() {
        let tokens = split("new paper (arxiv 1234 ) http://arxiv.org/abs/1234");
        assert_eq!(scrub(&tokens), ["new", "paper"]);

        let tokens = split("new paper (arxiv 1234 #nlp");
        assert_eq!(scrub(&tokens), ["new", "paper"]);
    }

    #[test]
    fn hashtags_kept() {
        let tokens = split("#pdf #[x] #~");
        assert_eq!(scrub(&tokens), tokens);
    }

    #[test]
    fn trailing_period_dropped() {
        assert_eq!(PostCleaner.normalize("Nice Results ."), "nice results");
        assert_eq!(PostCleaner.normalize("nice results."), "nice results.");
    }

    #[test]
    fn full_rules() {
        let c = PostCleaner;
        assert_eq!(
            c.normalize("RT @bob : We beat SOTA rt @carol ... [ pdf ] . (arXiv 1701.1 ) http://x #DeepLearning"),
            "we beat sota #deeplearning"
        );
    }

    #[test]
    fn compose_abstract() {
        let c = PostCleaner;
        assert_eq!(
            c.compose("A Title .", "rt @x : great paper ."),
            "<s> a title </s> <s> great paper </s>"
        );
        assert_eq!(c.compose("", ""), "<s> </s> <s> </s>");
    }
}
