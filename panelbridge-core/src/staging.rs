//! Frame staging buffer
//!
//! Coalesces the SEND calls of one frame into a single addressed
//! transmission. Capacity is fixed at compile time and every append is
//! bounds-checked.

use heapless::Vec;

use crate::config::STAGING_CAPACITY;
use crate::error::LinkError;

/// Fixed-capacity byte store with a write cursor
#[derive(Debug, Clone, Default)]
pub struct StagingBuffer<const N: usize = STAGING_CAPACITY> {
    bytes: Vec<u8, N>,
    /// Set when an append was rejected since the last reset
    overflowed: bool,
}

impl<const N: usize> StagingBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            overflowed: false,
        }
    }

    /// Move the cursor back to zero and clear the overflow flag
    pub fn reset(&mut self) {
        self.bytes.clear();
        self.overflowed = false;
    }

    /// Append bytes at the cursor
    ///
    /// Either the whole slice is appended or nothing is. A rejected append
    /// marks the buffer overflowed until the next [`reset`](Self::reset).
    pub fn append(&mut self, data: &[u8]) -> Result<(), LinkError> {
        if self.bytes.extend_from_slice(data).is_err() {
            self.overflowed = true;
            return Err(LinkError::BufferOverflow);
        }
        Ok(())
    }

    /// Bytes staged since the last reset
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Current cursor position
    pub fn cursor(&self) -> usize {
        self.bytes.len()
    }

    /// Total capacity in bytes
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Remaining space before the buffer is full
    pub fn remaining(&self) -> usize {
        N - self.bytes.len()
    }

    /// Check if an append was rejected since the last reset
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }
}
