//! Byte arena and borrowed sub-range views.
//!
//! A [`DeviceMemory`] owns its bytes; [`MemorySlice`] and [`MemorySliceMut`] address an
//! `(offset, len)` window into it without copying and cannot outlive it.

use crate::error::MemoryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMemory {
    bytes: Vec<u8>,
}

fn check_range(offset: usize, len: usize, size: usize) -> Result<(), MemoryError> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(()),
        _ => Err(MemoryError::OutOfBounds { offset, len, size }),
    }
}

impl DeviceMemory {
    /// Allocates `size` zeroed bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn slice(&self, offset: usize, len: usize) -> Result<MemorySlice<'_>, MemoryError> {
        check_range(offset, len, self.bytes.len())?;
        Ok(MemorySlice {
            memory: self,
            offset,
            len,
        })
    }

    pub fn slice_mut(
        &mut self,
        offset: usize,
        len: usize,
    ) -> Result<MemorySliceMut<'_>, MemoryError> {
        check_range(offset, len, self.bytes.len())?;
        Ok(MemorySliceMut {
            memory: self,
            offset,
            len,
        })
    }
}

/// Read-only window into a [`DeviceMemory`].
#[derive(Debug, Clone, Copy)]
pub struct MemorySlice<'a> {
    memory: &'a DeviceMemory,
    offset: usize,
    len: usize,
}

impl<'a> MemorySlice<'a> {
    /// Offset of the window within its arena.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bytes(&self) -> &'a [u8] {
        &self.memory.bytes[self.offset..self.offset + self.len]
    }

    /// Narrows the window; `offset` is relative to this slice.
    pub fn subslice(&self, offset: usize, len: usize) -> Result<MemorySlice<'a>, MemoryError> {
        check_range(offset, len, self.len)?;
        Ok(MemorySlice {
            memory: self.memory,
            offset: self.offset + offset,
            len,
        })
    }

    pub fn read_u32(&self, at: usize) -> Result<u32, MemoryError> {
        check_range(at, 4, self.len)?;
        let b = &self.bytes()[at..at + 4];
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_f32(&self, at: usize) -> Result<f32, MemoryError> {
        self.read_u32(at).map(f32::from_bits)
    }

    /// Reads four consecutive little-endian `f32`s, e.g. a clip-space position.
    pub fn read_vec4(&self, at: usize) -> Result<[f32; 4], MemoryError> {
        check_range(at, 16, self.len)?;
        Ok([
            self.read_f32(at)?,
            self.read_f32(at + 4)?,
            self.read_f32(at + 8)?,
            self.read_f32(at + 12)?,
        ])
    }
}

/// Writable window into a [`DeviceMemory`].
#[derive(Debug)]
pub struct MemorySliceMut<'a> {
    memory: &'a mut DeviceMemory,
    offset: usize,
    len: usize,
}

impl MemorySliceMut<'_> {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bytes(&self) -> &[u8] {
        &self.memory.bytes[self.offset..self.offset + self.len]
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.memory.bytes[self.offset..self.offset + self.len]
    }

    /// Reborrows a narrower window; `offset` is relative to this slice.
    pub fn subslice_mut(
        &mut self,
        offset: usize,
        len: usize,
    ) -> Result<MemorySliceMut<'_>, MemoryError> {
        check_range(offset, len, self.len)?;
        Ok(MemorySliceMut {
            memory: &mut *self.memory,
            offset: self.offset + offset,
            len,
        })
    }

    /// Copies `src` into the window starting at byte `at`.
    pub fn write_bytes(&mut self, at: usize, src: &[u8]) -> Result<(), MemoryError> {
        check_range(at, src.len(), self.len)?;
        self.bytes_mut()[at..at + src.len()].copy_from_slice(src);
        Ok(())
    }

    pub fn write_u32(&mut self, at: usize, value: u32) -> Result<(), MemoryError> {
        self.write_bytes(at, &value.to_le_bytes())
    }

    pub fn write_f32(&mut self, at: usize, value: f32) -> Result<(), MemoryError> {
        self.write_u32(at, value.to_bits())
    }
}
