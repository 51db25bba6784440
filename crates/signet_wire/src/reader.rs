//! # Byte Reader
//!
//! Sequential little-endian decoder over a borrowed byte slice.
//!
//! ## Design
//!
//! - Monotonic read position, bounds-checked on every read
//! - Reads past the end fail with [`WireError::OutOfRange`]; the position
//!   is left where the failed read started
//! - No type tags on the wire: the reader trusts the caller to issue the
//!   exact reads the writer issued, in the same order
//! - Byte runs are borrowed from the input slice, never copied

use crate::error::{WireError, WireResult};
use crate::packet::Serializable;
use crate::MAX_PACKED_FLAGS;
use std::collections::HashMap;
use std::hash::Hash;

/// Packet reader - decodes values from a borrowed byte slice.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader over a complete message slice.
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, position: 0 }
    }

    /// Returns the current read position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes remaining.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.position)
    }

    /// Borrows `len` raw bytes from the slice and advances past them.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] when fewer than `len` bytes remain.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> WireResult<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(WireError::OutOfRange {
                position: self.position,
                requested: len,
                available,
            });
        }
        let bytes = &self.buf[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    /// Reads a boolean byte; any nonzero value decodes as true.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] at end of slice.
    #[inline]
    pub fn read_bool(&mut self) -> WireResult<bool> {
        Ok(self.read_array::<1>()?[0] != 0)
    }

    /// Reads a single unsigned byte.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] at end of slice.
    #[inline]
    pub fn read_u8(&mut self) -> WireResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads a single signed byte.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] at end of slice.
    #[inline]
    pub fn read_i8(&mut self) -> WireResult<i8> {
        Ok(i8::from_le_bytes(self.read_array::<1>()?))
    }

    /// Reads a u16 in little-endian format.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] when fewer than 2 bytes remain.
    #[inline]
    pub fn read_u16(&mut self) -> WireResult<u16> {
        Ok(u16::from_le_bytes(self.read_array::<2>()?))
    }

    /// Reads an i16 in little-endian format.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] when fewer than 2 bytes remain.
    #[inline]
    pub fn read_i16(&mut self) -> WireResult<i16> {
        Ok(i16::from_le_bytes(self.read_array::<2>()?))
    }

    /// Reads a u32 in little-endian format.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] when fewer than 4 bytes remain.
    #[inline]
    pub fn read_u32(&mut self) -> WireResult<u32> {
        Ok(u32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads an i32 in little-endian format.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] when fewer than 4 bytes remain.
    #[inline]
    pub fn read_i32(&mut self) -> WireResult<i32> {
        Ok(i32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads a u64 in little-endian format.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] when fewer than 8 bytes remain.
    #[inline]
    pub fn read_u64(&mut self) -> WireResult<u64> {
        Ok(u64::from_le_bytes(self.read_array::<8>()?))
    }

    /// Reads an i64 in little-endian format.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] when fewer than 8 bytes remain.
    #[inline]
    pub fn read_i64(&mut self) -> WireResult<i64> {
        Ok(i64::from_le_bytes(self.read_array::<8>()?))
    }

    /// Reads an f32 bit pattern in little-endian format.
    ///
    /// NaN payloads survive bit-exactly.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] when fewer than 4 bytes remain.
    #[inline]
    pub fn read_f32(&mut self) -> WireResult<f32> {
        Ok(f32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads an f64 bit pattern in little-endian format.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] when fewer than 8 bytes remain.
    #[inline]
    pub fn read_f64(&mut self) -> WireResult<f64> {
        Ok(f64::from_le_bytes(self.read_array::<8>()?))
    }

    /// Reads count-prefixed UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] when the slice runs out,
    /// [`WireError::InvalidCount`] on a negative count, and
    /// [`WireError::InvalidText`] when the bytes are not valid UTF-8.
    pub fn read_str(&mut self) -> WireResult<String> {
        let count = self.read_count()?;
        let position = self.position;
        let bytes = self.read_bytes(count)?;
        let text = std::str::from_utf8(bytes)
            .map_err(|source| WireError::InvalidText { position, source })?;
        Ok(text.to_owned())
    }

    /// Unpacks one octet into 8 flags, bit 0 first.
    ///
    /// The writer zeroes unused high bits, so callers that packed fewer
    /// than 8 flags simply use the leading ones.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] at end of slice.
    pub fn read_flags(&mut self) -> WireResult<[bool; MAX_PACKED_FLAGS]> {
        let octet = self.read_u8()?;
        let mut flags = [false; MAX_PACKED_FLAGS];
        for (bit, flag) in flags.iter_mut().enumerate() {
            *flag = octet & (1 << bit) != 0;
        }
        Ok(flags)
    }

    /// Reads a counted sequence: a leading 4-byte count, then `count`
    /// elements through `decode`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidCount`] on a negative count, plus
    /// whatever `decode` reports per element.
    pub fn read_seq<T, F>(&mut self, decode: F) -> WireResult<Vec<T>>
    where
        F: FnMut(&mut Self) -> WireResult<T>,
    {
        let count = self.read_count()?;
        self.read_seq_fixed(count, decode)
    }

    /// Reads a sequence of known arity: no count on the wire.
    ///
    /// # Errors
    ///
    /// Propagates whatever `decode` reports per element.
    pub fn read_seq_fixed<T, F>(&mut self, count: usize, mut decode: F) -> WireResult<Vec<T>>
    where
        F: FnMut(&mut Self) -> WireResult<T>,
    {
        // Capacity is a hint capped by bytes remaining, so a hostile count
        // cannot force a huge allocation before element reads start failing.
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(decode(self)?);
        }
        Ok(items)
    }

    /// Reads a counted mapping: a leading 4-byte count, then key bytes
    /// followed by value bytes per entry.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidCount`] on a negative count, plus
    /// whatever the entry decoders report.
    pub fn read_map<K, V, FK, FV>(
        &mut self,
        decode_key: FK,
        decode_value: FV,
    ) -> WireResult<HashMap<K, V>>
    where
        K: Eq + Hash,
        FK: FnMut(&mut Self) -> WireResult<K>,
        FV: FnMut(&mut Self) -> WireResult<V>,
    {
        let count = self.read_count()?;
        self.read_map_fixed(count, decode_key, decode_value)
    }

    /// Reads a mapping of known arity: no count on the wire.
    ///
    /// # Errors
    ///
    /// Propagates whatever the entry decoders report.
    pub fn read_map_fixed<K, V, FK, FV>(
        &mut self,
        count: usize,
        mut decode_key: FK,
        mut decode_value: FV,
    ) -> WireResult<HashMap<K, V>>
    where
        K: Eq + Hash,
        FK: FnMut(&mut Self) -> WireResult<K>,
        FV: FnMut(&mut Self) -> WireResult<V>,
    {
        let mut entries = HashMap::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            let key = decode_key(self)?;
            let value = decode_value(self)?;
            entries.insert(key, value);
        }
        Ok(entries)
    }

    /// Reads a nested composite by default-constructing it and invoking
    /// its own decode routine.
    ///
    /// # Errors
    ///
    /// Propagates whatever the composite's decode reports.
    #[inline]
    pub fn read_value<T>(&mut self) -> WireResult<T>
    where
        T: Serializable + Default,
    {
        let mut value = T::default();
        value.decode(self)?;
        Ok(value)
    }

    // Fixed-width scalar reads all funnel through here.
    fn read_array<const N: usize>(&mut self) -> WireResult<[u8; N]> {
        let available = self.remaining();
        if N > available {
            return Err(WireError::OutOfRange {
                position: self.position,
                requested: N,
                available,
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.position..self.position + N]);
        self.position += N;
        Ok(out)
    }

    // Counts are signed 32-bit on the wire; negative is malformed input.
    fn read_count(&mut self) -> WireResult<usize> {
        let position = self.position;
        let count = self.read_i32()?;
        usize::try_from(count).map_err(|_| WireError::InvalidCount { position, count })
    }
}
