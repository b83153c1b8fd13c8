/*! Content processing

Structures and functions that turn a loaded corpus into packaged datafiles:

- [split]: deterministic train/val/test partitioning,
- [vocab]: token frequencies of the training split,
- [chunk]: re-sharding of datafiles into fixed-size chunks,
- [package]: checksums of the produced files.
!*/
pub mod chunk;
pub mod package;
pub mod split;
pub mod vocab;

pub use split::Splits;
pub use vocab::Vocab;
