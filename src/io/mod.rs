/*!
# IO utilities

Binary datafile reading and writing.

- [record]: the `(article, abstract)` record and its payload encoding,
- [frame]: length-prefixed framing of payloads into streams.
!*/
pub mod frame;
pub mod record;

pub use frame::{Frame, FrameReader, FrameWriter};
pub use record::Record;
