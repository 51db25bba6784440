//! # Open Codec Table
//!
//! Per-type encode/decode registrations for foreign types.
//!
//! The table starts empty and the core never pre-registers or guesses a
//! conversion: callers populate codecs for exactly the types they need,
//! and a lookup for anything else fails with
//! [`WireError::UnsupportedType`].

use crate::error::{WireError, WireResult};
use crate::reader::ByteReader;
use crate::writer::ByteWriter;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

type EncodeFn<T> = Box<dyn Fn(&T, &mut ByteWriter) + Send + Sync>;
type DecodeFn<T> = Box<dyn Fn(&mut ByteReader<'_>) -> WireResult<T> + Send + Sync>;

// The closures themselves are stored type-erased; lookups downcast the
// closure back to its concrete signature, never the value being coded.
struct CodecEntry {
    encode: Box<dyn Any + Send + Sync>,
    decode: Box<dyn Any + Send + Sync>,
}

/// Table of caller-supplied codecs keyed by type.
///
/// Same lifecycle as the packet registry: populate with `&mut self`
/// during startup, code values through `&self` afterwards.
pub struct CodecTable {
    entries: HashMap<TypeId, CodecEntry>,
}

impl CodecTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers an encode/decode pair for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::DuplicateCodec`] when `T` already has a
    /// codec; the existing pair stays active.
    pub fn register<T, E, D>(&mut self, encode: E, decode: D) -> WireResult<()>
    where
        T: 'static,
        E: Fn(&T, &mut ByteWriter) + Send + Sync + 'static,
        D: Fn(&mut ByteReader<'_>) -> WireResult<T> + Send + Sync + 'static,
    {
        let key = TypeId::of::<T>();
        if self.entries.contains_key(&key) {
            return Err(WireError::DuplicateCodec(type_name::<T>()));
        }
        let encode: EncodeFn<T> = Box::new(encode);
        let decode: DecodeFn<T> = Box::new(decode);
        self.entries.insert(
            key,
            CodecEntry {
                encode: Box::new(encode),
                decode: Box::new(decode),
            },
        );
        tracing::debug!("registered codec for type {}", type_name::<T>());
        Ok(())
    }

    /// Encodes a value through its registered codec.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnsupportedType`] when no codec is registered
    /// for `T`.
    pub fn encode<T: 'static>(&self, value: &T, writer: &mut ByteWriter) -> WireResult<()> {
        let encode = self
            .entry::<T>()?
            .encode
            .downcast_ref::<EncodeFn<T>>()
            .ok_or_else(|| WireError::UnsupportedType(type_name::<T>()))?;
        encode(value, writer);
        Ok(())
    }

    /// Decodes a value through its registered codec.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnsupportedType`] when no codec is registered
    /// for `T`, plus whatever the codec itself reports.
    pub fn decode<T: 'static>(&self, reader: &mut ByteReader<'_>) -> WireResult<T> {
        let decode = self
            .entry::<T>()?
            .decode
            .downcast_ref::<DecodeFn<T>>()
            .ok_or_else(|| WireError::UnsupportedType(type_name::<T>()))?;
        decode(reader)
    }

    /// Returns true if a codec is registered for `T`.
    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of registered codecs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no codec has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry<T: 'static>(&self) -> WireResult<&CodecEntry> {
        self.entries
            .get(&TypeId::of::<T>())
            .ok_or_else(|| WireError::UnsupportedType(type_name::<T>()))
    }
}

impl Default for CodecTable {
    fn default() -> Self {
        Self::new()
    }
}
