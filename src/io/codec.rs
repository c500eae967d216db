//! Big-endian primitive encoding on top of `std::io` streams.

use super::{GraphIoError, GraphIoResult};
use bytes::{Buf, BufMut, BytesMut};
use std::io::{Read, Write};

const FLUSH_THRESHOLD: usize = 64 * 1024;

/// Buffered big-endian writer. Call [`RawWriter::flush`] when done.
pub struct RawWriter<'a> {
    out: &'a mut dyn Write,
    buf: BytesMut,
}

impl<'a> RawWriter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self {
            out,
            buf: BytesMut::with_capacity(FLUSH_THRESHOLD),
        }
    }

    pub fn write_int(&mut self, value: i32) -> GraphIoResult<()> {
        self.buf.put_i32(value);
        self.maybe_flush()
    }

    pub fn write_double(&mut self, value: f64) -> GraphIoResult<()> {
        self.buf.put_f64(value);
        self.maybe_flush()
    }

    /// Length-prefixed UTF-8.
    pub fn write_utf(&mut self, value: &str) -> GraphIoResult<()> {
        let len = i32::try_from(value.len()).map_err(|_| GraphIoError::Invalid {
            what: "string length",
            value: value.len() as i64,
        })?;
        self.buf.put_i32(len);
        self.buf.put_slice(value.as_bytes());
        self.maybe_flush()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> GraphIoResult<()> {
        self.buf.put_slice(bytes);
        self.maybe_flush()
    }

    /// Write out everything buffered so far and flush the underlying stream.
    pub fn flush(&mut self) -> GraphIoResult<()> {
        self.out.write_all(&self.buf)?;
        self.buf.clear();
        self.out.flush()?;
        Ok(())
    }

    fn maybe_flush(&mut self) -> GraphIoResult<()> {
        if self.buf.len() >= FLUSH_THRESHOLD {
            self.out.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }
}

/// Upper bound on up-front allocation driven by counts read from a file.
const MAX_CAPACITY_HINT: usize = 1 << 16;

/// Initial capacity for a collection of `count` elements announced by the
/// input. Larger collections grow as their elements actually arrive.
pub fn capacity_hint(count: usize) -> usize {
    count.min(MAX_CAPACITY_HINT)
}

/// Big-endian reader mirroring [`RawWriter`].
pub struct RawReader<'a> {
    input: &'a mut dyn Read,
}

impl<'a> RawReader<'a> {
    pub fn new(input: &'a mut dyn Read) -> Self {
        Self { input }
    }

    pub fn read_int(&mut self) -> GraphIoResult<i32> {
        let mut raw = [0u8; 4];
        self.input.read_exact(&mut raw)?;
        Ok(raw.as_slice().get_i32())
    }

    /// An int that must be a valid count.
    pub fn read_count(&mut self, what: &'static str) -> GraphIoResult<usize> {
        let value = self.read_int()?;
        usize::try_from(value).map_err(|_| GraphIoError::Invalid {
            what,
            value: value as i64,
        })
    }

    pub fn read_double(&mut self) -> GraphIoResult<f64> {
        let mut raw = [0u8; 8];
        self.input.read_exact(&mut raw)?;
        Ok(raw.as_slice().get_f64())
    }

    /// A length-prefixed UTF-8 string. The buffer grows with the bytes
    /// actually read, never with the declared length.
    pub fn read_utf(&mut self) -> GraphIoResult<String> {
        let len = self.read_count("string length")?;
        let mut raw = Vec::with_capacity(capacity_hint(len));
        let read = (&mut *self.input).take(len as u64).read_to_end(&mut raw)?;
        if read < len {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("string of {} bytes truncated after {}", len, read),
            )
            .into());
        }
        Ok(String::from_utf8(raw)?)
    }

    pub fn read_bytes(&mut self, bytes: &mut [u8]) -> GraphIoResult<()> {
        self.input.read_exact(bytes)?;
        Ok(())
    }
}
