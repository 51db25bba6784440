//! # Packet Capability & Descriptors
//!
//! The traits every wire value implements, and the registration record
//! that describes one packet variant.
//!
//! ## Design
//!
//! - [`Serializable`] is the whole contract for any value on the wire:
//!   encode against a writer, decode in place from a reader
//! - [`Packet`] adds the envelope id and an `Any` seam so polymorphically
//!   decoded boxes can be dispatched to concrete types
//! - [`PacketDescriptor`] is plain data; the registry owns the behavior

use crate::error::WireResult;
use crate::reader::ByteReader;
use crate::writer::ByteWriter;
use std::any::Any;
use std::fmt;

/// Envelope id type - a 16-bit signed integer unique per registered variant.
pub type PacketId = i16;

/// Capability implemented by every value that crosses the wire.
///
/// Field order is the entire contract: `decode` must issue the exact
/// reads `encode` issued, in the same order. The wire carries no type
/// tags, so a mismatched read silently produces wrong values rather
/// than erroring. That is a caller-correctness issue by design.
pub trait Serializable {
    /// Appends this value's encoding to the writer.
    fn encode(&self, writer: &mut ByteWriter);

    /// Populates this value in place from the reader.
    ///
    /// # Errors
    ///
    /// Returns an error when the slice runs out of bytes or a payload is
    /// malformed under the pinned wire format.
    fn decode(&mut self, reader: &mut ByteReader<'_>) -> WireResult<()>;
}

/// A discriminated message variant carrying its envelope id.
///
/// Implementations keep `id()` consistent with the descriptor they
/// register under; the descriptor is authoritative for routing, `id()`
/// is what encoding stamps into the envelope.
pub trait Packet: Serializable + Any + Send + fmt::Debug {
    /// The id stamped into this packet's envelope.
    fn id(&self) -> PacketId;

    /// Upcast used by the downcast helpers on `dyn Packet`.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast used by the downcast helpers on `dyn Packet`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Packet {
    /// Returns true if the boxed packet is a `P`.
    #[must_use]
    pub fn is<P: Packet>(&self) -> bool {
        self.as_any().is::<P>()
    }

    /// Borrows the concrete packet type, if this is one.
    #[must_use]
    pub fn downcast_ref<P: Packet>(&self) -> Option<&P> {
        self.as_any().downcast_ref()
    }

    /// Mutably borrows the concrete packet type, if this is one.
    #[must_use]
    pub fn downcast_mut<P: Packet>(&mut self) -> Option<&mut P> {
        self.as_any_mut().downcast_mut()
    }
}

/// Registration record for one packet variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketDescriptor {
    /// Envelope id this variant claims.
    pub id: PacketId,
    /// Whether every instance encodes to the same body length.
    pub fixed_size: bool,
    /// Cached body length in bytes, excluding the 2-byte id.
    ///
    /// Lazily measured at registration when `fixed_size` is set and no
    /// length was supplied. Only ever a preallocation hint: instances are
    /// never validated against it.
    pub cached_size: Option<usize>,
}

impl PacketDescriptor {
    /// Descriptor for a variable-size variant.
    #[must_use]
    pub const fn new(id: PacketId) -> Self {
        Self {
            id,
            fixed_size: false,
            cached_size: None,
        }
    }

    /// Descriptor for a fixed-size variant.
    ///
    /// The body length is measured once at registration unless supplied
    /// via [`with_cached_size`](Self::with_cached_size).
    #[must_use]
    pub const fn fixed(id: PacketId) -> Self {
        Self {
            id,
            fixed_size: true,
            cached_size: None,
        }
    }

    /// Supplies a known body length, skipping the measurement encode.
    #[must_use]
    pub const fn with_cached_size(mut self, size: usize) -> Self {
        self.cached_size = Some(size);
        self
    }
}
