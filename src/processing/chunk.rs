/*! Chunking

Re-shards `<split>.bin` frame streams into `chunked/<split>_<nnn>.bin` files
of at most `chunk_size` frames each. Frames are copied without being decoded.

Chunk files are created on the first frame they receive,
so an empty stream yields no chunk file and a stream of exactly `k * chunk_size` frames yields `k` files.
Chunk files of a split left by a previous run are removed before chunking that split.
!*/
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    error::Error,
    io::{Frame, FrameReader, FrameWriter},
};

pub const CHUNKS_DIR: &str = "chunked";

/// Split names, in chunking order.
pub const CHUNKED_SPLITS: [&str; 3] = ["train", "val", "test"];

/// Path of the chunk file number `idx` of `split`.
pub fn chunk_path(chunks_dir: &Path, split: &str, idx: usize) -> PathBuf {
    chunks_dir.join(format!("{}_{:03}.bin", split, idx))
}

/// Rotating frame writer.
///
/// Opens `<split>_000.bin`, then moves on to the next file every `chunk_size` frames.
pub struct ChunkWriter {
    split: String,
    dst: PathBuf,
    current: Option<FrameWriter<BufWriter<File>>>,
    frames_in_current: usize,
    chunk_size: usize,
    pub nb_files: usize,
}

impl ChunkWriter {
    /// Create a new [ChunkWriter].
    /// Note that nothing is created/written unless a write is performed.
    pub fn new(dst: &Path, split: &str, chunk_size: usize) -> Self {
        Self {
            split: split.to_string(),
            dst: dst.to_path_buf(),
            current: None,
            frames_in_current: 0,
            chunk_size,
            nb_files: 0,
        }
    }

    /// Close the current file (if any) and open the next one.
    fn create_next_file(&mut self) -> Result<(), Error> {
        self.close_current()?;

        let path = chunk_path(&self.dst, &self.split, self.nb_files);
        debug!("creating {:?}", path);
        let f = File::create(path)?;

        self.current = Some(FrameWriter::new(BufWriter::new(f)));
        self.frames_in_current = 0;
        self.nb_files += 1;
        Ok(())
    }

    fn close_current(&mut self) -> Result<(), Error> {
        if let Some(w) = self.current.take() {
            w.into_inner()?;
        }
        Ok(())
    }

    pub fn write(&mut self, frame: &Frame) -> Result<(), Error> {
        if self.current.is_none() || self.frames_in_current == self.chunk_size {
            self.create_next_file()?;
        }

        match &mut self.current {
            Some(w) => w.write_frame(frame)?,
            None => return Err(Error::Custom("no chunk file open".to_string())),
        }
        self.frames_in_current += 1;
        Ok(())
    }

    /// Flush the last chunk file and return the number of files written.
    pub fn finish(mut self) -> Result<usize, Error> {
        self.close_current()?;
        Ok(self.nb_files)
    }
}

/// Chunk `<src>/<split>.bin` into `chunks_dir`.
///
/// Returns the number of chunk files written.
pub fn chunk_file(
    src: &Path,
    chunks_dir: &Path,
    split: &str,
    chunk_size: usize,
) -> Result<usize, Error> {
    if chunk_size == 0 {
        return Err(Error::Config("chunk_size must be positive".to_string()));
    }

    let in_file = src.join(format!("{}.bin", split));
    info!("[{}] splitting {:?} into chunks", split, in_file);
    let reader_file = File::open(&in_file)?;

    for stale in chunk_paths(chunks_dir, split)? {
        debug!("removing stale chunk {:?}", stale);
        std::fs::remove_file(stale)?;
    }

    let reader = FrameReader::new(BufReader::new(reader_file));
    let mut writer = ChunkWriter::new(chunks_dir, split, chunk_size);

    for frame in reader {
        writer.write(&frame?)?;
    }

    let nb_files = writer.finish()?;
    info!("[{}] {} chunk files written", split, nb_files);
    Ok(nb_files)
}

/// Chunk every split of `src` into `src/chunked`, creating the directory if needed.
pub fn chunk_all(src: &Path, chunk_size: usize) -> Result<PathBuf, Error> {
    let chunks_dir = src.join(CHUNKS_DIR);
    std::fs::create_dir_all(&chunks_dir)?;

    for split in CHUNKED_SPLITS {
        chunk_file(src, &chunks_dir, split, chunk_size)?;
    }

    info!("saved chunked data in {:?}", chunks_dir);
    Ok(chunks_dir)
}

/// List the chunk files of `split`, by increasing chunk index.
pub fn chunk_paths(chunks_dir: &Path, split: &str) -> Result<Vec<PathBuf>, Error> {
    let pattern = chunks_dir.join(format!("{}_*.bin", split));
    let pattern = pattern
        .to_str()
        .ok_or_else(|| Error::Custom(format!("invalid chunk directory: {:?}", chunks_dir)))?;

    let mut paths = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
    // zero padding only guarantees ordering below 1000 chunks
    paths.sort_by_key(|p| chunk_index(p));
    Ok(paths)
}

fn chunk_index(path: &Path) -> Option<usize> {
    path.file_stem()?
        .to_str()?
        .rsplit('_')
        .next()?
        .parse()
        .ok()
}
