/*! Vocabulary building

Token frequencies are counted over the training split.
Counts are kept alongside first-seen order so that ranking is reproducible:
tokens are sorted by decreasing count, ties keeping the order in which tokens first appeared.
!*/
use std::{collections::HashMap, io::Write};

use crate::{
    error::Error,
    transformers::{SENTENCE_END, SENTENCE_START},
};

#[derive(Debug, Default, Clone)]
pub struct Vocab {
    /// token -> position in `counts`
    index: HashMap<String, usize>,
    /// `(token, count)` in first-seen order
    counts: Vec<(String, u64)>,
}

impl Vocab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a single token. Surrounding whitespace is stripped and empty tokens are ignored.
    pub fn add(&mut self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            return;
        }
        match self.index.get(token) {
            Some(&pos) => self.counts[pos].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.counts.len());
                self.counts.push((token.to_string(), 1));
            }
        }
    }

    /// Count the tokens of a written record: every article token,
    /// and every abstract token except sentence boundary markers.
    pub fn update(&mut self, article: &str, abstract_: &str) {
        for token in article.split(' ') {
            self.add(token);
        }
        for token in abstract_
            .split(' ')
            .filter(|t| *t != SENTENCE_START && *t != SENTENCE_END)
        {
            self.add(token);
        }
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Get the count of `token`.
    pub fn count(&self, token: &str) -> u64 {
        self.index
            .get(token)
            .map_or(0, |&pos| self.counts[pos].1)
    }

    /// At most `k` entries, by decreasing count then first-seen order.
    pub fn most_common(&self, k: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect();
        // stable sort keeps first-seen order on ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(k);
        ranked
    }

    /// Write the `k` most common tokens as `token count` lines.
    pub fn write_top<W: Write>(&self, k: usize, mut w: W) -> Result<(), Error> {
        for (token, count) in self.most_common(k) {
            writeln!(w, "{} {}", token, count)?;
        }
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_ties_first_seen() {
        let mut v = Vocab::new();
        for token in "b a c a b d a".split(' ') {
            v.add(token);
        }
        assert_eq!(v.most_common(10), vec![("a", 3), ("b", 2), ("c", 1), ("d", 1)]);
        assert_eq!(v.most_common(3), vec![("a", 3), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn markers_and_empties_skipped() {
        let mut v = Vocab::new();
        v.update("the  paper .", "<s> the title </s> <s> nice paper </s>");
        assert_eq!(v.count("<s>"), 0);
        assert_eq!(v.count("</s>"), 0);
        assert_eq!(v.count(""), 0);
        assert_eq!(v.count("the"), 2);
        assert_eq!(v.count("paper"), 2);
        assert_eq!(v.len(), 5);
    }

    #[test]
    fn write_top_k() {
        let mut v = Vocab::new();
        for (token, n) in [("x", 1), ("y", 4), ("z", 4), ("w", 2)] {
            for _ in 0..n {
                v.add(token);
            }
        }
        let mut buf = Vec::new();
        v.write_top(3, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "y 4\nz 4\nw 2\n");

        let counts: Vec<u64> = text
            .lines()
            .map(|l| l.rsplit(' ').next().unwrap().parse().unwrap())
            .collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }
}
