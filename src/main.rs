//! # tweetsum
//!
//! Packages a summary/tweet dataset into train/val/test datafiles for summarization models.
//!
//! The dataset directory holds three line-aligned files:
//! `summaries_tokenized`, `tweets_tokenized` and `titles_tokenized`.
//! They are split deterministically, cleaned, and written as length-prefixed binary records,
//! along with a vocabulary of the training split and fixed-size chunks of each split.
//!
//! ## Getting started
//!
//! ```sh
//! RUST_LOG=info tweetsum -d processed path/to/dataset
//! ```
//!
use log::{debug, error, info};
use structopt::StructOpt;

use tweetsum::{
    cli::Tweetsum,
    error::Error,
    pipeline::{Datafiles, Pipeline},
};

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = Tweetsum::from_args();
    debug!("cli args\n{:#?}", opt);

    let config = opt.config().map_err(|e| {
        error!("{}", e);
        e
    })?;

    let p = Datafiles::new(opt.dataset_dir, opt.dst, config).with_checksums(!opt.no_checksums);
    match p.run() {
        Ok(report) => {
            info!(
                "done: {} train, {} val, {} test records, {} distinct tokens",
                report.train, report.val, report.test, report.vocab_tokens
            );
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e)
        }
    }
}
