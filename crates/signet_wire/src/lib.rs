//! # SIGNET Wire
//!
//! Binary envelope codec for discriminated message variants.
//!
//! ## Architecture
//!
//! 1. **Cursor pair** - [`ByteWriter`] appends little-endian encodings to
//!    a growable buffer, [`ByteReader`] replays them from a borrowed
//!    slice with bounds-checked reads
//! 2. **Serializable capability** - two methods per participating value;
//!    field order is the entire wire contract
//! 3. **Packet registry** - explicit id-to-factory table so raw bytes
//!    decode into the right variant without the caller naming a type
//! 4. **Open codec table** - per-type codecs callers populate for foreign
//!    types; the core guesses nothing
//!
//! ## Wire Format
//!
//! ```text
//! envelope:  [id: i16 LE][body: variant-defined bytes]
//! sequence:  [count: i32 LE][element bytes ...]        counted form
//! mapping:   [count: i32 LE][key ++ value bytes ...]   counted form
//! flags:     [1 octet, bit 0 = first flag]
//! text:      [count: i32 LE][UTF-8 bytes]
//! ```
//!
//! There is no outer length field and no per-field tagging: the transport
//! delimits messages, and readers must mirror their writers exactly.
//!
//! ## Example
//!
//! ```rust,ignore
//! use signet_wire::{PacketDescriptor, PacketRegistry};
//!
//! // Startup: enumerate the variant table once, single-threaded.
//! let mut registry = PacketRegistry::new();
//! registry.register_default::<MovePacket>(PacketDescriptor::fixed(0))?;
//! registry.register_default::<ChatPacket>(PacketDescriptor::new(1))?;
//!
//! // Steady state: encode and decode through shared `&registry`.
//! let bytes = registry.to_bytes(&MovePacket::new(x, y, z));
//! let packet = registry.from_bytes(&bytes)?;
//! if let Some(movement) = packet.downcast_ref::<MovePacket>() {
//!     apply(movement);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod convert;
pub mod error;
pub mod packet;
pub mod reader;
pub mod registry;
pub mod writer;

pub use convert::CodecTable;
pub use error::{WireError, WireResult};
pub use packet::{Packet, PacketDescriptor, PacketId, Serializable};
pub use reader::ByteReader;
pub use registry::{PacketFactory, PacketRegistry};
pub use writer::ByteWriter;

/// Number of bytes the envelope id occupies on the wire.
pub const ENVELOPE_ID_BYTES: usize = 2;

/// Number of bytes a container or text count occupies on the wire.
pub const COUNT_BYTES: usize = 4;

/// Maximum number of booleans one packed octet can carry.
pub const MAX_PACKED_FLAGS: usize = 8;
