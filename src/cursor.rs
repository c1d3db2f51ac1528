use crate::buffer::Buffer;
use crate::endian::Canonical;
use crate::error::{Error, Result};

// Widest value the cursor handles.
const MAX_WIDTH: usize = 8;

/// BufferWriter appends typed values to a borrowed buffer. Multi-byte
/// integers are always written big-endian.
pub struct BufferWriter<'a> {
    buffer: &'a mut Buffer,
}

impl<'a> BufferWriter<'a> {
    /// new returns a writer appending to `buffer`.
    pub fn new(buffer: &'a mut Buffer) -> Self {
        Self { buffer }
    }

    /// write appends `value` in canonical byte order.
    pub fn write<T: Canonical>(&mut self, value: T) -> &mut Self {
        let mut tmp = [0u8; MAX_WIDTH];
        value.to_canonical().write_native(&mut tmp[..T::WIDTH]);
        self.buffer.append(&tmp[..T::WIDTH]);
        self
    }

    /// write_bytes appends a raw byte run.
    pub fn write_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buffer.append(data);
        self
    }

    /// write_cstr appends the text followed by a NUL terminator.
    pub fn write_cstr(&mut self, s: &str) -> &mut Self {
        self.buffer.append_cstr(s);
        self
    }

    /// write_buffer appends the content of another buffer verbatim.
    pub fn write_buffer(&mut self, other: &Buffer) -> &mut Self {
        self.buffer.append(other);
        self
    }
}

/// BufferReader reads typed values sequentially from a borrowed buffer.
///
/// The position always stays within `0..=len()`. Running out of bytes is
/// never a panic: raw reads come up short and typed reads return
/// [`Error::ShortRead`] without consuming anything.
#[derive(Debug, Clone, Copy)]
pub struct BufferReader<'a> {
    buffer: &'a Buffer,
    position: usize,
}

impl<'a> BufferReader<'a> {
    /// new returns a reader positioned at the start of `buffer`.
    pub fn new(buffer: &'a Buffer) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// position is the offset of the next byte to read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// remaining is the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// at_end reports whether every byte has been read.
    pub fn at_end(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// seek moves to `position`, clamped to the buffer size, and returns the
    /// previous position.
    pub fn seek(&mut self, position: usize) -> usize {
        let prev = self.position;
        self.position = position.min(self.buffer.len());
        prev
    }

    /// read_bytes copies up to `out.len()` bytes and returns how many were
    /// copied.
    pub fn read_bytes(&mut self, out: &mut [u8]) -> usize {
        let count = out.len().min(self.remaining());
        out[..count].copy_from_slice(&self.buffer[self.position..self.position + count]);
        self.position += count;
        count
    }

    /// read consumes exactly `T::WIDTH` bytes and converts them from
    /// canonical order.
    pub fn read<T: Canonical>(&mut self) -> Result<T> {
        let available = self.remaining();
        if available < T::WIDTH {
            return Err(Error::ShortRead {
                needed: T::WIDTH,
                available,
            });
        }

        let bytes = &self.buffer[self.position..self.position + T::WIDTH];
        self.position += T::WIDTH;
        Ok(T::read_native(bytes).from_canonical())
    }

    /// read_cstr returns the bytes between the position and the next NUL,
    /// then skips past the terminator. Without a terminator nothing is
    /// consumed and `None` is returned.
    pub fn read_cstr(&mut self) -> Option<&'a [u8]> {
        let buffer: &'a Buffer = self.buffer;
        let rest: &'a [u8] = &buffer.as_slice()[self.position..];
        let nul = rest.iter().position(|b| *b == 0)?;
        self.position += nul + 1;
        Some(&rest[..nul])
    }

    /// read_string reads a NUL terminated UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let mut ahead = *self;
        let bytes = ahead.read_cstr().ok_or(Error::Unterminated)?;
        let s = std::str::from_utf8(bytes)?.to_owned();
        *self = ahead;
        Ok(s)
    }

    /// read_into fills `target` up to its current size and shrinks it to the
    /// number of bytes actually read.
    pub fn read_into(&mut self, target: &mut Buffer) -> usize {
        let count = self.read_bytes(target);
        target.resize(count);
        count
    }
}
