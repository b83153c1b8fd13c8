//! Pipelines.
//!
//! The module provides a light [Pipeline] trait,
//! implemented by [Datafiles], which builds the whole set of datafiles from a dataset directory.
mod datafiles;

pub use datafiles::{write_to_bin, Datafiles, Report};

use crate::error::Error;

/// A runnable pipeline, generic over what a run returns.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
