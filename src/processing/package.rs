/*! Packaging (prepping for distribution) utilities

Once datafiles and chunks are written, a sha384sum is computed for each of them
and written into a single `checksums.sha384` file, _usually_ compatible with `sha384sum -c` implementations.
!*/
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use sha2::Digest;
use sha2::Sha384;

use crate::error::Error;

pub const CHECKSUM_FILE: &str = "checksums.sha384";

/// Collect the produced files of `dst`: `*.bin`, `chunked/*.bin` and `vocab`, relative to `dst`.
fn produced_files(dst: &Path) -> Result<Vec<PathBuf>, Error> {
    let stub = dst
        .to_str()
        .ok_or_else(|| Error::Custom(format!("invalid destination: {:?}", dst)))?;

    let mut files = Vec::new();
    for pattern in [
        format!("{}/*.bin", stub),
        format!("{}/chunked/*.bin", stub),
        format!("{}/vocab", stub),
    ] {
        for path in glob::glob(&pattern)? {
            let path = path?;
            let relative = path
                .strip_prefix(dst)
                .map_err(|e| Error::Custom(e.to_string()))?
                .to_path_buf();
            files.push(relative);
        }
    }
    files.sort();
    Ok(files)
}

/// Create the checksum file of `dst`, returning its path.
pub fn gen_checksum_file(dst: &Path) -> Result<PathBuf, Error> {
    let files = produced_files(dst)?;
    debug!("files to hash: {:#?}", files);

    let mut hasher = Sha384::new();
    let checksum_filepath = dst.join(CHECKSUM_FILE);
    let mut checksum_file = File::create(&checksum_filepath)?;

    // write filenames and hashes in sha384sum -c compatible format.
    for filename in files {
        info!("hashing {:?}", filename);
        let hash = get_hash(&dst.join(&filename), &mut hasher)?;
        writeln!(&mut checksum_file, "{}  {}", hash, filename.display())?;
    }

    Ok(checksum_filepath)
}

/// compute the hash of the file pointed by the filepath by using [io::copy] between a file handler and the hasher.
#[inline]
fn get_hash(filepath: &Path, hasher: &mut Sha384) -> Result<String, Error> {
    let mut f = File::open(filepath)?;
    io::copy(&mut f, hasher)?;
    let result = format!("{:x}", hasher.finalize_reset());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_lines() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("chunked")).unwrap();
        std::fs::write(dir.path().join("train.bin"), b"abc").unwrap();
        std::fs::write(dir.path().join("chunked/train_000.bin"), b"abc").unwrap();
        std::fs::write(dir.path().join("vocab"), b"a 1\n").unwrap();
        std::fs::write(dir.path().join("unrelated.txt"), b"x").unwrap();

        let path = gen_checksum_file(dir.path()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);

        // sha384("abc")
        let abc = "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7";
        assert_eq!(lines[0], format!("{}  chunked/train_000.bin", abc));
        assert_eq!(lines[1], format!("{}  train.bin", abc));
        assert!(lines[2].ends_with("  vocab"));
    }
}
