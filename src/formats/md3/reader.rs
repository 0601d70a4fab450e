//! Bounds-checked access to raw MD3 file bytes
//!
//! The format mixes two addressing modes: the surface list is walked with
//! a cursor (each surface declares where the next one starts), while the
//! blocks inside a surface are addressed by offsets relative to that
//! surface's start. `Md3Reader` exposes both, validating every read
//! against the true file length.

use crate::error::{Error, Result};

/// A byte source of known total length with an explicit cursor.
#[derive(Debug)]
pub struct Md3Reader<'a> {
    data: &'a [u8],
    cursor: u64,
}

impl<'a> Md3Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    /// Total length of the backing file in bytes.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position.
    pub fn position(&self) -> u64 {
        self.cursor
    }

    /// Move the cursor to an absolute offset. The offset may equal the
    /// file length (one past the last byte) but not exceed it.
    pub fn set_position(&mut self, offset: u64) -> Result<()> {
        if offset > self.len() {
            return Err(Error::OutOfBounds {
                offset,
                len: 0,
                file_size: self.len(),
            });
        }
        self.cursor = offset;
        Ok(())
    }

    /// Read `len` bytes starting at `offset`, leaving the cursor just past
    /// the block. Fails without reading if the block reaches beyond the
    /// end of the file; `u64` arithmetic keeps hostile offset/length pairs
    /// from wrapping.
    pub fn read_at(&mut self, offset: u64, len: u64) -> Result<&'a [u8]> {
        let end = offset.checked_add(len).ok_or(Error::OutOfBounds {
            offset,
            len,
            file_size: self.len(),
        })?;
        if end > self.len() {
            return Err(Error::OutOfBounds {
                offset,
                len,
                file_size: self.len(),
            });
        }
        self.cursor = end;
        Ok(&self.data[offset as usize..end as usize])
    }

    /// Read `len` bytes at the current cursor, advancing it.
    pub fn read_cursor(&mut self, len: u64) -> Result<&'a [u8]> {
        self.read_at(self.cursor, len)
    }
}
