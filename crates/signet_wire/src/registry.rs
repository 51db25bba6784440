//! # Packet Registry
//!
//! Id-to-factory table enabling polymorphic decode, plus the envelope
//! codec itself.
//!
//! ## Envelope Layout
//!
//! ```text
//! +----------------+---------------------------+
//! | id: i16 (LE)   | body: variant-defined     |
//! +----------------+---------------------------+
//! ```
//!
//! No outer length field: the transport delivers one complete message
//! slice per decode call.
//!
//! ## Lifecycle
//!
//! Registration takes `&mut self` and decoding takes `&self`, so the
//! populate-then-read-many lifecycle is enforced by the borrow system:
//! share a populated registry behind `Arc` or a `OnceLock` and further
//! registration is impossible without exclusive access.

use crate::error::{WireError, WireResult};
use crate::packet::{Packet, PacketDescriptor, PacketId};
use crate::reader::ByteReader;
use crate::writer::ByteWriter;
use crate::ENVELOPE_ID_BYTES;
use std::collections::HashMap;

/// Factory producing a default (unpopulated) instance of one variant.
pub type PacketFactory = Box<dyn Fn() -> Box<dyn Packet> + Send + Sync>;

struct RegistryEntry {
    descriptor: PacketDescriptor,
    factory: PacketFactory,
}

/// Table of registered packet variants keyed by envelope id.
///
/// Built through explicit registration calls during single-threaded
/// startup; a conflict on an id is rejected, never overwritten.
pub struct PacketRegistry {
    entries: HashMap<PacketId, RegistryEntry>,
}

impl PacketRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers a variant under the descriptor's id.
    ///
    /// When the descriptor asks for fixed size without a supplied length,
    /// the factory is invoked once and the default instance's body is
    /// encoded to measure it. The measured length is a preallocation hint
    /// for [`to_bytes`](Self::to_bytes) and is never validated against
    /// later instances.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::DuplicateRegistration`] when the id is already
    /// claimed; the existing registration stays active.
    pub fn register<F>(&mut self, descriptor: PacketDescriptor, factory: F) -> WireResult<()>
    where
        F: Fn() -> Box<dyn Packet> + Send + Sync + 'static,
    {
        if self.entries.contains_key(&descriptor.id) {
            return Err(WireError::DuplicateRegistration(descriptor.id));
        }

        let mut descriptor = descriptor;
        if descriptor.fixed_size && descriptor.cached_size.is_none() {
            let instance = factory();
            debug_assert_eq!(
                instance.id(),
                descriptor.id,
                "descriptor id does not match the variant's own id"
            );
            let mut probe = ByteWriter::new();
            instance.encode(&mut probe);
            descriptor.cached_size = Some(probe.len());
            tracing::debug!(
                "measured packet id {} body at {} bytes",
                descriptor.id,
                probe.len()
            );
        }

        tracing::debug!(
            "registered packet id {} (fixed size: {})",
            descriptor.id,
            descriptor.fixed_size
        );
        self.entries.insert(
            descriptor.id,
            RegistryEntry {
                descriptor,
                factory: Box::new(factory),
            },
        );
        Ok(())
    }

    /// Registers a variant whose factory is plain default construction.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::DuplicateRegistration`] when the id is already
    /// claimed; the existing registration stays active.
    pub fn register_default<P>(&mut self, descriptor: PacketDescriptor) -> WireResult<()>
    where
        P: Packet + Default,
    {
        self.register(descriptor, || Box::new(P::default()))
    }

    /// Returns the stored descriptor for an id, with any measured size.
    #[must_use]
    pub fn descriptor(&self, id: PacketId) -> Option<&PacketDescriptor> {
        self.entries.get(&id).map(|entry| &entry.descriptor)
    }

    /// Returns true if the id has a registered factory.
    #[must_use]
    pub fn contains(&self, id: PacketId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Returns the number of registered variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encodes a packet into its envelope: the 2-byte id, then the body.
    ///
    /// Registration is not required for encoding; a registered fixed-size
    /// descriptor only improves the initial buffer allocation.
    #[must_use]
    pub fn to_bytes(&self, packet: &dyn Packet) -> Vec<u8> {
        let id = packet.id();
        let hint = self
            .entries
            .get(&id)
            .and_then(|entry| entry.descriptor.cached_size);
        let mut writer = match hint {
            Some(body) => ByteWriter::with_capacity(body + ENVELOPE_ID_BYTES),
            None => ByteWriter::new(),
        };
        writer.write_i16(id);
        packet.encode(&mut writer);
        writer.into_bytes()
    }

    /// Decodes an envelope: reads the 2-byte id, builds the registered
    /// variant from its factory, and populates it from the remaining
    /// bytes.
    ///
    /// Callers that expect a specific variant dispatch on the result with
    /// [`downcast_ref`](crate::packet::Packet) and friends.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] when the slice is shorter than
    /// the id, [`WireError::UnknownPacketId`] when no factory is
    /// registered for the id, and whatever the variant's own decode
    /// reports for the body.
    pub fn from_bytes(&self, bytes: &[u8]) -> WireResult<Box<dyn Packet>> {
        let mut reader = ByteReader::new(bytes);
        let id = reader.read_i16()?;
        let entry = self
            .entries
            .get(&id)
            .ok_or(WireError::UnknownPacketId(id))?;
        let mut packet = (entry.factory)();
        packet.decode(&mut reader)?;
        Ok(packet)
    }
}

impl Default for PacketRegistry {
    fn default() -> Self {
        Self::new()
    }
}
