use std::ffi::CStr;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::codec;
use crate::error::{Error, Result};

/// Allocation granularity used when an insert outgrows the buffer.
pub const GROWTH_UNIT: usize = 64;

/// Extra capacity requested when `len` more bytes do not fit: always at least
/// one whole unit beyond the exact need.
fn growth_for(len: usize) -> usize {
    ((len + GROWTH_UNIT) / GROWTH_UNIT + 1) * GROWTH_UNIT
}

/// Buffer is an owned, growable byte region with an explicit logical size
/// and allocated capacity.
///
/// `storage.len()` is the capacity; only the first `size` bytes are content.
/// Dereferencing yields the content slice, so indexing is bounds checked.
#[derive(Default)]
pub struct Buffer {
    storage: Vec<u8>,
    size: usize,
}

impl Buffer {
    /// new returns an empty buffer without allocating.
    pub fn new() -> Self {
        Self::default()
    }

    /// with_size returns a zero-filled buffer of `size` bytes.
    pub fn with_size(size: usize) -> Self {
        let mut b = Self::new();
        b.resize(size);
        b
    }

    /// len is the number of content bytes.
    pub fn len(&self) -> usize {
        self.size
    }

    /// size is the logical length, same as `len`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// capacity is the number of allocated bytes, never less than `len`.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// is_empty reports whether the buffer holds no content.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// as_slice borrows the content bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.size]
    }

    /// as_mut_slice mutably borrows the content bytes.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.storage[..self.size]
    }

    /// reserve makes room for at least `capacity` bytes. A fresh allocation is
    /// zero-filled and the current content is copied over.
    pub fn reserve(&mut self, capacity: usize) {
        if capacity <= self.storage.len() {
            return;
        }

        log::trace!(
            "buffer realloc: capacity {} -> {} (size {})",
            self.storage.len(),
            capacity,
            self.size
        );
        let mut tmp = vec![0u8; capacity];
        tmp[..self.size].copy_from_slice(&self.storage[..self.size]);
        self.storage = tmp;
    }

    /// resize sets the logical size to `size`, growing storage if needed.
    ///
    /// Bytes exposed by growing within the current capacity keep whatever
    /// they held before; only a fresh allocation guarantees zeros.
    pub fn resize(&mut self, size: usize) -> &mut Self {
        self.reserve(size);
        self.size = size;
        self
    }

    /// truncate shrinks the buffer to exactly `size` bytes, releasing the
    /// excess allocation. Does nothing if `size >= len()`.
    pub fn truncate(&mut self, size: usize) -> &mut Self {
        if self.size <= size {
            return self;
        }
        if size == 0 {
            self.clear();
            return self;
        }

        self.storage = self.storage[..size].to_vec();
        self.size = size;
        self
    }

    /// insert copies `data` in at byte offset `pos`, shifting `pos..len()`
    /// right. Inserting at `pos == len()` appends without shifting.
    pub fn insert(&mut self, pos: usize, data: &[u8]) -> Result<&mut Self> {
        if pos > self.size {
            return Err(Error::out_of_range(pos, data.len(), self.size));
        }
        if data.is_empty() {
            return Ok(self);
        }

        let len = data.len();
        self.ensure_room(len);

        if pos < self.size {
            self.storage.copy_within(pos..self.size, pos + len);
        }
        self.storage[pos..pos + len].copy_from_slice(data);
        self.size += len;

        Ok(self)
    }

    /// insert_byte inserts a single byte at `pos`.
    pub fn insert_byte(&mut self, pos: usize, byte: u8) -> Result<&mut Self> {
        self.insert(pos, &[byte])
    }

    /// insert_cstr inserts the string through and including its NUL terminator.
    pub fn insert_cstr(&mut self, pos: usize, s: &CStr) -> Result<&mut Self> {
        self.insert(pos, s.to_bytes_with_nul())
    }

    /// append adds `data` at the end.
    pub fn append(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();
        if len == 0 {
            return self;
        }
        self.ensure_room(len);

        self.storage[self.size..self.size + len].copy_from_slice(data);
        self.size += len;
        self
    }

    /// append_byte adds a single byte at the end.
    pub fn append_byte(&mut self, byte: u8) -> &mut Self {
        self.append(&[byte])
    }

    /// append_cstr adds the text of `s` followed by a NUL terminator.
    pub fn append_cstr(&mut self, s: &str) -> &mut Self {
        self.append(s.as_bytes()).append_byte(0)
    }

    /// remove deletes `len` bytes starting at `pos`, shifting the tail left.
    pub fn remove(&mut self, pos: usize, len: usize) -> Result<()> {
        let end = pos
            .checked_add(len)
            .filter(|end| *end <= self.size)
            .ok_or_else(|| Error::out_of_range(pos, len, self.size))?;

        self.storage.copy_within(end..self.size, pos);
        self.size -= len;
        Ok(())
    }

    /// remove_at deletes the byte at `pos`.
    pub fn remove_at(&mut self, pos: usize) -> Result<()> {
        self.remove(pos, 1)
    }

    // Grows by growth_for(len) when `len` more bytes would not fit.
    fn ensure_room(&mut self, len: usize) {
        if len > self.storage.len() - self.size {
            self.reserve(self.storage.len() + growth_for(len));
        }
    }

    /// clear releases the storage and resets size and capacity to zero.
    pub fn clear(&mut self) {
        self.storage = Vec::new();
        self.size = 0;
    }

    /// swap exchanges contents and allocations with `other`.
    pub fn swap(&mut self, other: &mut Buffer) {
        std::mem::swap(self, other);
    }

    /// take moves the contents out, leaving this buffer empty.
    pub fn take(&mut self) -> Buffer {
        std::mem::take(self)
    }

    /// mid copies `len` bytes starting at `pos`, or everything from `pos` to
    /// the end when `len` is `None`.
    pub fn mid(&self, pos: usize, len: Option<usize>) -> Result<Buffer> {
        if pos > self.size {
            return Err(Error::out_of_range(pos, len.unwrap_or(0), self.size));
        }
        let len = len.unwrap_or(self.size - pos);
        let end = pos
            .checked_add(len)
            .filter(|end| *end <= self.size)
            .ok_or_else(|| Error::out_of_range(pos, len, self.size))?;

        Ok(Buffer::from(&self.storage[pos..end]))
    }

    /// to_string_lossy decodes the first `len` bytes as UTF-8, or the whole
    /// content when `len` is `None`, zero or not smaller than the size.
    pub fn to_string_lossy(&self, len: Option<usize>) -> String {
        let n = match len {
            Some(n) if n > 0 && n < self.size => n,
            _ => self.size,
        };
        String::from_utf8_lossy(&self.storage[..n]).into_owned()
    }

    /// to_hex renders the content as uppercase hex.
    pub fn to_hex(&self) -> String {
        codec::hex_encode(self)
    }

    /// from_hex decodes hex text, truncating at the first invalid pair.
    pub fn from_hex(text: &str) -> Buffer {
        codec::hex_decode(text)
    }

    /// to_base64 renders the content as padded standard base64.
    pub fn to_base64(&self) -> String {
        codec::base64_encode(self)
    }

    /// from_base64 decodes base64 text up to the first padding or invalid symbol.
    pub fn from_base64(text: &str) -> Buffer {
        codec::base64_decode(text)
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl DerefMut for Buffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Clone for Buffer {
    // The copy is sized to the content, not to the source's capacity.
    fn clone(&self) -> Self {
        let mut b = Buffer::with_size(self.size);
        b.storage.copy_from_slice(self.as_slice());
        b
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Buffer {}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("size", &self.size)
            .field("capacity", &self.storage.len())
            .field("data", &self.to_hex())
            .finish()
    }
}

impl From<&[u8]> for Buffer {
    fn from(data: &[u8]) -> Self {
        let mut b = Buffer::new();
        b.append(data);
        b
    }
}

impl From<&str> for Buffer {
    fn from(data: &str) -> Self {
        Buffer::from(data.as_bytes())
    }
}

impl From<&CStr> for Buffer {
    fn from(data: &CStr) -> Self {
        Buffer::from(data.to_bytes_with_nul())
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(storage: Vec<u8>) -> Self {
        let size = storage.len();
        Buffer { storage, size }
    }
}

impl From<Buffer> for Vec<u8> {
    fn from(mut b: Buffer) -> Self {
        b.storage.truncate(b.size);
        b.storage
    }
}
