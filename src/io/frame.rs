/*! Length-prefixed framing

A frame stream is a concatenation of `(length, payload)` frames,
`length` being a little-endian `i64` and `payload` being `length` bytes.

Reading stops cleanly only when no byte at all can be read at a frame boundary.
A partial header, a negative length or a short payload are [Error::Corruption].
!*/
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

use crate::error::Error;

use super::Record;

pub const HEADER_LEN: usize = 8;

/// Raw frame payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    payload: Vec<u8>,
}

impl Frame {
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }

    /// Payload length, as written in the header.
    pub fn len(&self) -> i64 {
        self.payload.len() as i64
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Get a reference to the frame's payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Header followed by payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.payload.len());
        buf.extend_from_slice(&self.len().to_le_bytes());
        buf.extend_from_slice(&self.payload);
        buf
    }

    /// Decode the payload as a [Record].
    pub fn to_record(&self) -> Result<Record, Error> {
        Record::from_payload(&self.payload)
    }
}

/// Appends frames to an inner writer.
///
/// Each frame is handed to the inner writer in a single `write_all` call.
pub struct FrameWriter<W: Write> {
    inner: W,
    nb_frames: u64,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            nb_frames: 0,
        }
    }

    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), Error> {
        self.inner.write_all(&frame.encode())?;
        self.nb_frames += 1;
        Ok(())
    }

    /// Serialize `record` and append it as a frame.
    pub fn write_record(&mut self, record: &Record) -> Result<(), Error> {
        self.write_frame(&Frame::new(record.to_payload()?))
    }

    /// Number of frames written so far.
    pub fn nb_frames(&self) -> u64 {
        self.nb_frames
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.inner.flush()?;
        Ok(())
    }

    /// Flush and give back the inner writer.
    pub fn into_inner(mut self) -> Result<W, Error> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Lazy iterator over the frames of a stream.
///
/// The iterator is fused after the first error. [FrameReader::rewind] restarts from the beginning.
#[derive(Debug)]
pub struct FrameReader<R: Read + Seek> {
    inner: R,
    offset: u64,
    failed: bool,
}

impl<R: Read + Seek> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            failed: false,
        }
    }

    /// Go back to the first frame of the stream.
    pub fn rewind(&mut self) -> Result<(), Error> {
        self.inner.seek(SeekFrom::Start(0))?;
        self.offset = 0;
        self.failed = false;
        Ok(())
    }

    /// Fill `buf` as much as possible, returning the number of bytes read.
    fn read_up_to(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, Error> {
        let mut header = [0u8; HEADER_LEN];
        let read = self.read_up_to(&mut header)?;
        if read == 0 {
            return Ok(None);
        }
        if read < HEADER_LEN {
            return Err(Error::Corruption {
                offset: self.offset,
                reason: format!("truncated header ({} of {} bytes)", read, HEADER_LEN),
            });
        }

        let length = i64::from_le_bytes(header);
        let length = usize::try_from(length).map_err(|_| Error::Corruption {
            offset: self.offset,
            reason: format!("invalid frame length {}", length),
        })?;

        let mut payload = Vec::new();
        let read = (&mut self.inner)
            .take(length as u64)
            .read_to_end(&mut payload)?;
        if read < length {
            return Err(Error::Corruption {
                offset: self.offset,
                reason: format!("truncated payload ({} of {} bytes)", read, length),
            });
        }

        self.offset += (HEADER_LEN + length) as u64;
        Ok(Some(Frame::new(payload)))
    }
}

impl<R: Read + Seek> Iterator for FrameReader<R> {
    type Item = Result<Frame, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_frame() {
            Ok(frame) => frame.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
