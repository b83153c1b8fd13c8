//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use crate::{
    config::{Config, SplitFractions},
    error::Error,
};

#[derive(Debug, StructOpt)]
/// Packaging of a summary/tweet dataset into chunked binary datafiles.
///
/// ```sh
/// tweetsum 0.1.0
///
/// USAGE:
///     tweetsum [FLAGS] [OPTIONS] <dataset-dir>
///
/// FLAGS:
///     -h, --help            Prints help information
///         --no-checksums    do not write the checksum file
///     -V, --version         Prints version information
///         --wide-split      use a 90/5/5 split instead of 80/10/10
///
/// OPTIONS:
///     -c, --config <config>                    JSON configuration file
///     -d, --dst <dst>                          datafiles destination [default: processed]
///     -n, --expected-items <expected-items>    number of lines of each corpus file
///
/// ARGS:
///     <dataset-dir>    directory containing summaries_tokenized, tweets_tokenized and titles_tokenized
/// ```
#[structopt(name = "tweetsum", about = "dataset packaging tool.")]
pub struct Tweetsum {
    #[structopt(
        parse(from_os_str),
        help = "directory containing summaries_tokenized, tweets_tokenized and titles_tokenized"
    )]
    pub dataset_dir: PathBuf,
    #[structopt(
        parse(from_os_str),
        short = "d",
        long = "dst",
        help = "datafiles destination",
        default_value = "processed"
    )]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        short = "c",
        long = "config",
        help = "JSON configuration file"
    )]
    pub config: Option<PathBuf>,
    #[structopt(
        short = "n",
        long = "expected-items",
        help = "number of lines of each corpus file"
    )]
    pub expected_items: Option<usize>,
    #[structopt(long = "wide-split", help = "use a 90/5/5 split instead of 80/10/10")]
    pub wide_split: bool,
    #[structopt(long = "no-checksums", help = "do not write the checksum file")]
    pub no_checksums: bool,
}

impl Tweetsum {
    /// Resolve the run configuration: defaults, then config file, then command line flags.
    pub fn config(&self) -> Result<Config, Error> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };

        if let Some(n) = self.expected_items {
            config.expected_items = n;
        }
        if self.wide_split {
            config.split = SplitFractions::wide();
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let opt = Tweetsum::from_iter(["tweetsum", "data", "-n", "10", "--wide-split"]);
        assert_eq!(opt.dataset_dir, PathBuf::from("data"));
        assert_eq!(opt.dst, PathBuf::from("processed"));
        let config = opt.config().unwrap();
        assert_eq!(config.expected_items, 10);
        assert_eq!(config.split, SplitFractions::wide());
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn dataset_dir_required() {
        assert!(Tweetsum::from_iter_safe(["tweetsum"]).is_err());
    }
}
