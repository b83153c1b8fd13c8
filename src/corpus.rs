/*! Corpus loading

A dataset directory holds three line-aligned files:

- `summaries_tokenized`: one long-form document per line,
- `tweets_tokenized`: one short post per line,
- `titles_tokenized`: one title per line.

Line `i` of each file describes the same item.
Files are fully loaded in memory.
!*/
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, info};

use crate::error::Error;

pub const SUMMARIES_FILE: &str = "summaries_tokenized";
pub const TWEETS_FILE: &str = "tweets_tokenized";
pub const TITLES_FILE: &str = "titles_tokenized";

/// Ensure that `dataset_dir` contains the three corpus files.
///
/// Returns [Error::MissingInputs] listing the absent ones.
pub fn check_dataset_dir(dataset_dir: &Path) -> Result<(), Error> {
    if !dataset_dir.is_dir() {
        return Err(Error::Custom(format!(
            "{:?} is not a directory",
            dataset_dir
        )));
    }

    let missing: Vec<String> = [SUMMARIES_FILE, TWEETS_FILE, TITLES_FILE]
        .iter()
        .filter(|name| !dataset_dir.join(name).is_file())
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingInputs(missing))
    }
}

/// Read a text file, trimming each line.
pub fn read_text_file(path: &Path) -> Result<Vec<String>, Error> {
    debug!("reading {:?}", path);
    let f = File::open(path)?;
    BufReader::new(f)
        .lines()
        .map(|line| Ok(line?.trim().to_string()))
        .collect()
}

/// Three index-aligned sequences of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    summaries: Vec<String>,
    tweets: Vec<String>,
    titles: Vec<String>,
}

/// Borrowed view of the corpus entries sharing an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<'a> {
    pub summary: &'a str,
    pub tweet: &'a str,
    pub title: &'a str,
}

impl Corpus {
    /// Build a corpus from in-memory sequences.
    ///
    /// Fails with [Error::CorpusLength] if any sequence is not `expected` long.
    pub fn new(
        summaries: Vec<String>,
        tweets: Vec<String>,
        titles: Vec<String>,
        expected: usize,
    ) -> Result<Self, Error> {
        for (name, seq) in [
            (SUMMARIES_FILE, &summaries),
            (TWEETS_FILE, &tweets),
            (TITLES_FILE, &titles),
        ] {
            if seq.len() != expected {
                return Err(Error::CorpusLength {
                    file: name.to_string(),
                    expected,
                    found: seq.len(),
                });
            }
        }

        Ok(Self {
            summaries,
            tweets,
            titles,
        })
    }

    /// Check `dataset_dir` and load its three files.
    pub fn from_dir(dataset_dir: &Path, expected: usize) -> Result<Self, Error> {
        check_dataset_dir(dataset_dir)?;
        let summaries = read_text_file(&dataset_dir.join(SUMMARIES_FILE))?;
        let tweets = read_text_file(&dataset_dir.join(TWEETS_FILE))?;
        let titles = read_text_file(&dataset_dir.join(TITLES_FILE))?;
        info!("loaded {} items from {:?}", summaries.len(), dataset_dir);

        Self::new(summaries, tweets, titles, expected)
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Get the entries at `index`.
    pub fn get(&self, index: usize) -> Result<Item<'_>, Error> {
        match (
            self.summaries.get(index),
            self.tweets.get(index),
            self.titles.get(index),
        ) {
            (Some(summary), Some(tweet), Some(title)) => Ok(Item {
                summary,
                tweet,
                title,
            }),
            _ => Err(Error::IndexOutOfRange {
                index,
                len: self.len(),
            }),
        }
    }
}
