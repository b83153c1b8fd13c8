/*! Run configuration

Every constant of a packaging run lives in a [Config], built once and passed by reference.

Configurations can be read from a JSON file, where any missing field takes its default value:

```json
{ "seed": 7, "split": { "train": 0.9, "val": 0.95 } }
```
!*/
use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Cut points of the shuffled index sequence, as fractions of the expected item count.
///
/// Indices `[0, train*N)` go to the training split, `[train*N, val*N)` to validation
/// and the rest to test. Products are truncated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitFractions {
    pub train: f64,
    pub val: f64,
}

impl SplitFractions {
    /// 90/5/5 split.
    pub fn wide() -> Self {
        Self {
            train: 0.9,
            val: 0.95,
        }
    }

    /// Truncated cut points for `n` items.
    pub fn cuts(&self, n: usize) -> (usize, usize) {
        let nf = n as f64;
        ((self.train * nf) as usize, (self.val * nf) as usize)
    }
}

impl Default for SplitFractions {
    /// 80/10/10 split.
    fn default() -> Self {
        Self {
            train: 0.8,
            val: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed of the split shuffle.
    pub seed: u64,
    /// Number of lines each corpus file must hold.
    pub expected_items: usize,
    pub split: SplitFractions,
    /// Number of entries kept in the vocabulary file.
    pub vocab_size: usize,
    /// Number of frames per chunk file.
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 42,
            expected_items: 33445,
            split: SplitFractions::default(),
            vocab_size: 77801,
            chunk_size: 1000,
        }
    }
}

impl Config {
    /// Read a (possibly partial) configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let f = File::open(path)?;
        let config: Config = serde_json::from_reader(BufReader::new(f))?;
        Ok(config)
    }

    /// Check that the configuration describes a feasible run.
    pub fn validate(&self) -> Result<(), Error> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be positive".to_string()));
        }

        let SplitFractions { train, val } = self.split;
        if !(0.0..=1.0).contains(&train) || !(0.0..=1.0).contains(&val) || train > val {
            return Err(Error::Config(format!(
                "split fractions must satisfy 0 <= train <= val <= 1 (got {} and {})",
                train, val
            )));
        }

        Ok(())
    }
}
