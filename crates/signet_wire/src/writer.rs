//! # Byte Writer
//!
//! Sequential little-endian encoder over a growable buffer.
//!
//! ## Design
//!
//! - Append-only: the write position is always the end of the buffer
//! - Every multi-byte scalar goes through `to_le_bytes`
//! - Writes are infallible; the buffer grows transparently
//! - One writer per message, consumed by [`into_bytes`](ByteWriter::into_bytes)

use crate::packet::Serializable;
use crate::MAX_PACKED_FLAGS;
use std::collections::HashMap;

/// Packet writer - appends values to a growable byte buffer.
///
/// Field order is the wire contract: the matching reader must issue the
/// same reads in the same order, because nothing on the wire says what
/// kind of value comes next.
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates a writer with an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a writer preallocated for `capacity` bytes.
    ///
    /// Used by envelope encoding when a fixed-size descriptor supplies a
    /// measured body length.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of bytes written so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns a snapshot of all bytes written so far.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer and returns the finished buffer.
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Writes a boolean as a single byte (1 for true, 0 for false).
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    /// Writes a single unsigned byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Writes a single signed byte.
    #[inline]
    pub fn write_i8(&mut self, value: i8) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a u16 in little-endian format.
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an i16 in little-endian format.
    #[inline]
    pub fn write_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a u32 in little-endian format.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an i32 in little-endian format.
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a u64 in little-endian format.
    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an i64 in little-endian format.
    #[inline]
    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an f32 bit pattern in little-endian format.
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an f64 bit pattern in little-endian format.
    #[inline]
    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a raw byte run with no count prefix.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes text as a 4-byte count of UTF-8 bytes followed by the bytes.
    ///
    /// # Panics
    ///
    /// Panics if the text is longer than `i32::MAX` bytes.
    pub fn write_str(&mut self, value: &str) {
        self.write_count(value.len());
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Packs up to 8 booleans into a single byte.
    ///
    /// Bit `i` (least-significant first) is set when `flags[i]` is true;
    /// unused high bits stay zero.
    ///
    /// # Panics
    ///
    /// Panics if more than 8 flags are supplied.
    pub fn write_flags(&mut self, flags: &[bool]) {
        assert!(
            flags.len() <= MAX_PACKED_FLAGS,
            "cannot pack {} flags into one byte",
            flags.len()
        );
        let mut octet = 0u8;
        for (bit, flag) in flags.iter().enumerate() {
            if *flag {
                octet |= 1 << bit;
            }
        }
        self.buf.push(octet);
    }

    /// Writes a counted sequence: a 4-byte element count, then each
    /// element through `encode` in order.
    ///
    /// # Panics
    ///
    /// Panics if the sequence is longer than `i32::MAX` elements.
    pub fn write_seq<T, F>(&mut self, items: &[T], encode: F)
    where
        F: FnMut(&mut Self, &T),
    {
        self.write_count(items.len());
        self.write_seq_fixed(items, encode);
    }

    /// Writes a fixed-arity sequence: elements only, no count prefix.
    ///
    /// Used when the consumer already knows the arity from context, such
    /// as a fixed-size packet body.
    pub fn write_seq_fixed<T, F>(&mut self, items: &[T], mut encode: F)
    where
        F: FnMut(&mut Self, &T),
    {
        for item in items {
            encode(self, item);
        }
    }

    /// Writes a counted mapping: a 4-byte entry count, then key bytes
    /// followed by value bytes per entry.
    ///
    /// Iteration order is whatever the map yields; it carries no meaning
    /// on the wire.
    ///
    /// # Panics
    ///
    /// Panics if the mapping has more than `i32::MAX` entries.
    pub fn write_map<K, V, FK, FV>(&mut self, entries: &HashMap<K, V>, encode_key: FK, encode_value: FV)
    where
        FK: FnMut(&mut Self, &K),
        FV: FnMut(&mut Self, &V),
    {
        self.write_count(entries.len());
        self.write_map_fixed(entries, encode_key, encode_value);
    }

    /// Writes a mapping with no count prefix (arity known from context).
    pub fn write_map_fixed<K, V, FK, FV>(
        &mut self,
        entries: &HashMap<K, V>,
        mut encode_key: FK,
        mut encode_value: FV,
    ) where
        FK: FnMut(&mut Self, &K),
        FV: FnMut(&mut Self, &V),
    {
        for (key, value) in entries {
            encode_key(self, key);
            encode_value(self, value);
        }
    }

    /// Writes a nested composite by invoking its own encode routine
    /// against this writer.
    ///
    /// Nesting depth is unbounded and cycles are not detected; the caller
    /// must not feed cyclic structures.
    #[inline]
    pub fn write_value<T: Serializable>(&mut self, value: &T) {
        value.encode(self);
    }

    // Counts are signed 32-bit on the wire.
    fn write_count(&mut self, len: usize) {
        assert!(
            len <= i32::MAX as usize,
            "length {len} exceeds wire count range"
        );
        self.write_i32(len as i32);
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}
