//! Little-endian field readers and writers.
//!
//! These operate on a single already-framed message buffer; framing and
//! transport are the connection layer's concern. All multi-byte integers are
//! little-endian, strings carry a `u16` byte-length prefix followed by UTF-8
//! data, and positions are `u16 x`, `u16 y`, `u8 z`.

use bytes::{BufMut, Bytes, BytesMut};
use glimmer_world::Position;

use crate::error::ProtoError;

/// Longest string a frame can carry, in bytes. The length prefix is a `u16`.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// A cursor over a framed message buffer.
#[derive(Debug)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Create a reader over the full buffer.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current cursor offset from the start of the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ProtoError> {
        if self.remaining() < len {
            return Err(ProtoError::Malformed("buffer exhausted"));
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read the next byte without advancing the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::Malformed`] if the buffer is exhausted.
    pub fn peek_u8(&self) -> Result<u8, ProtoError> {
        if self.remaining() < 1 {
            return Err(ProtoError::Malformed("buffer exhausted"));
        }
        Ok(self.buf[self.pos])
    }

    /// Read a `u8`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::Malformed`] if the buffer is exhausted.
    pub fn read_u8(&mut self) -> Result<u8, ProtoError> {
        Ok(self.take(1)?[0])
    }

    /// Read a little-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::Malformed`] if the buffer is exhausted.
    pub fn read_u16(&mut self) -> Result<u16, ProtoError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::Malformed`] if the buffer is exhausted.
    pub fn read_u32(&mut self) -> Result<u32, ProtoError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a length-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::Malformed`] if the buffer is exhausted or the
    /// string data is not valid UTF-8.
    pub fn read_string(&mut self) -> Result<String, ProtoError> {
        let len = usize::from(self.read_u16()?);
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| ProtoError::Malformed("string is not valid utf-8"))
    }

    /// Read a map position (`u16 x`, `u16 y`, `u8 z`).
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::Malformed`] if the buffer is exhausted.
    pub fn read_position(&mut self) -> Result<Position, ProtoError> {
        let x = self.read_u16()?;
        let y = self.read_u16()?;
        let z = self.read_u8()?;
        Ok(Position::new(x, y, z))
    }
}

/// Builds a framed message buffer.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: BytesMut,
}

impl WireWriter {
    /// Create an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write a `u8`.
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Write a little-endian `u16`.
    pub fn write_u16(&mut self, value: u16) {
        self.buf.put_u16_le(value);
    }

    /// Write a little-endian `u32`.
    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    /// Write a length-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::StringTooLong`] if `value` exceeds
    /// [`MAX_STRING_LEN`]. Nothing is written in that case.
    pub fn write_string(&mut self, value: &str) -> Result<(), ProtoError> {
        let len = u16::try_from(value.len())
            .map_err(|_| ProtoError::StringTooLong(value.len()))?;
        self.buf.put_u16_le(len);
        self.buf.put_slice(value.as_bytes());
        Ok(())
    }

    /// Write a map position (`u16 x`, `u16 y`, `u8 z`).
    pub fn write_position(&mut self, position: Position) {
        self.buf.put_u16_le(position.x);
        self.buf.put_u16_le(position.y);
        self.buf.put_u8(position.z);
    }

    /// Freeze the written bytes into an immutable frame.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}
