/*! Datafiles pipeline

Builds, from a dataset directory:

```text
<dst>/
├── test.bin
├── val.bin
├── train.bin
├── vocab
├── checksums.sha384
└── chunked/
    ├── train_000.bin
    ├── ...
    └── test_NNN.bin
```

Steps are run sequentially:

1. the dataset directory and configuration are checked, nothing is written if they are invalid,
2. the corpus is loaded and split,
3. each split is normalized and written as a frame stream, the training one feeding the vocabulary,
4. the vocabulary is written,
5. each frame stream is chunked,
6. checksums are computed (optional).
!*/
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    config::Config,
    corpus::{check_dataset_dir, Corpus},
    error::Error,
    io::{FrameWriter, Record},
    processing::{
        chunk::chunk_all,
        package::gen_checksum_file,
        split::{split, SPLIT_NAMES},
        Vocab,
    },
    transformers::{ArticleCleaner, Normalize, PostCleaner},
};

use super::Pipeline;

pub const VOCAB_FILE: &str = "vocab";

/// Progress is logged every `PROGRESS_STEP` corpus indices.
const PROGRESS_STEP: usize = 1000;

pub struct Datafiles {
    src: PathBuf,
    dst: PathBuf,
    config: Config,
    checksums: bool,
}

/// Outcome of a [Datafiles] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub train: usize,
    pub val: usize,
    pub test: usize,
    /// distinct tokens seen in the training split
    pub vocab_tokens: usize,
    pub chunks_dir: PathBuf,
}

impl Datafiles {
    pub fn new(src: PathBuf, dst: PathBuf, config: Config) -> Self {
        Self {
            src,
            dst,
            config,
            checksums: true,
        }
    }

    /// Enable or disable the checksum file.
    pub fn with_checksums(mut self, checksums: bool) -> Self {
        self.checksums = checksums;
        self
    }

    fn write_vocab(&self, vocab: &Vocab) -> Result<(), Error> {
        let path = self.dst.join(VOCAB_FILE);
        info!("writing vocab file {:?}", path);
        let f = File::create(path)?;
        vocab.write_top(self.config.vocab_size, BufWriter::new(f))?;
        info!("finished writing vocab file");
        Ok(())
    }
}

/// Normalize the items of `corpus` at `line_nums` and write them to `out_file`.
///
/// Items are written in the order of `line_nums`.
/// If `vocab` is provided, the written records' tokens are counted into it.
pub fn write_to_bin(
    corpus: &Corpus,
    line_nums: &[usize],
    out_file: &Path,
    mut vocab: Option<&mut Vocab>,
) -> Result<u64, Error> {
    info!("making bin file {:?}", out_file);
    let article_cleaner = ArticleCleaner;
    let post_cleaner = PostCleaner;
    let nb_items = corpus.len();

    let f = File::create(out_file)?;
    let mut writer = FrameWriter::new(BufWriter::new(f));

    for &idx in line_nums {
        if idx % PROGRESS_STEP == 0 {
            info!(
                "Writing {} of {}; {:.2} percent done",
                idx,
                nb_items,
                idx as f64 * 100.0 / nb_items as f64
            );
        }

        let item = corpus.get(idx)?;
        let article = article_cleaner.normalize(item.summary);
        let abstract_ = post_cleaner.compose(item.title, item.tweet);

        if let Some(v) = vocab.as_deref_mut() {
            v.update(&article, &abstract_);
        }

        writer.write_record(&Record::new(article.into_bytes(), abstract_.into_bytes()))?;
    }

    let nb_frames = writer.nb_frames();
    writer.into_inner()?;
    info!("finished writing file {:?} ({} records)", out_file, nb_frames);
    Ok(nb_frames)
}

impl Pipeline<Report> for Datafiles {
    fn run(&self) -> Result<Report, Error> {
        // preconditions are checked before anything is written
        self.config.validate()?;
        check_dataset_dir(&self.src)?;
        debug!("config: {:#?}", self.config);

        let corpus = Corpus::from_dir(&self.src, self.config.expected_items)?;
        let splits = split(
            self.config.expected_items,
            self.config.seed,
            &self.config.split,
        );

        std::fs::create_dir_all(&self.dst)?;

        let mut vocab = Vocab::new();
        for name in SPLIT_NAMES {
            let line_nums = splits
                .get(name)
                .ok_or_else(|| Error::Custom(format!("unknown split {}", name)))?;
            let out_file = self.dst.join(format!("{}.bin", name));
            let vocab = if name == "train" {
                Some(&mut vocab)
            } else {
                None
            };
            write_to_bin(&corpus, line_nums, &out_file, vocab)?;
        }

        self.write_vocab(&vocab)?;

        let chunks_dir = chunk_all(&self.dst, self.config.chunk_size)?;

        if self.checksums {
            let path = gen_checksum_file(&self.dst)?;
            info!("checksums written to {:?}", path);
        }

        Ok(Report {
            train: splits.train.len(),
            val: splits.val.len(),
            test: splits.test.len(),
            vocab_tokens: vocab.len(),
            chunks_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::BufReader;

    use super::*;
    use crate::io::FrameReader;

    fn corpus() -> Corpus {
        let summaries = vec![
            "-LRB- first -RRB- article".to_string(),
            "second article.".to_string(),
            "third".to_string(),
        ];
        let tweets = vec![
            "RT @a : first post .".to_string(),
            "second post [ 1 ]".to_string(),
            "third post".to_string(),
        ];
        let titles = vec!["T1".to_string(), "T2".to_string(), "T3".to_string()];
        Corpus::new(summaries, tweets, titles, 3).unwrap()
    }

    #[test]
    fn written_records() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("x.bin");
        let mut vocab = Vocab::new();
        let n = write_to_bin(&corpus(), &[0, 2], &out, Some(&mut vocab)).unwrap();
        assert_eq!(n, 2);

        let reader = FrameReader::new(BufReader::new(File::open(&out).unwrap()));
        let records: Vec<Record> = reader.map(|f| f.unwrap().to_record().unwrap()).collect();
        assert_eq!(
            records,
            vec![
                Record::new(
                    b"( first ) article .".to_vec(),
                    b"<s> t1 </s> <s> first post </s>".to_vec()
                ),
                Record::new(b"third .".to_vec(), b"<s> t3 </s> <s> third post </s>".to_vec()),
            ]
        );

        assert_eq!(vocab.count("first"), 2);
        assert_eq!(vocab.count("second"), 0);
        assert_eq!(vocab.count("<s>"), 0);
    }

    #[test]
    fn index_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("x.bin");
        assert!(matches!(
            write_to_bin(&corpus(), &[0, 3], &out, None),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn missing_inputs_write_nothing() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let out = dst.path().join("processed");
        let p = Datafiles::new(src.path().to_path_buf(), out.clone(), Config::default());
        assert!(matches!(p.run(), Err(Error::MissingInputs(_))));
        assert!(!out.exists());
    }
}
