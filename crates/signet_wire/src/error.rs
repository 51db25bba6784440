//! # Wire Error Types
//!
//! All errors that can occur while encoding, decoding, or registering packets.

use crate::packet::PacketId;
use thiserror::Error;

/// Errors that can occur in the wire codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// A read would consume bytes past the end of the supplied slice.
    #[error("out of range: need {requested} bytes at position {position}, have {available}")]
    OutOfRange {
        /// Read position at the time of the failed read.
        position: usize,
        /// Number of bytes the read required.
        requested: usize,
        /// Number of bytes remaining in the slice.
        available: usize,
    },

    /// Decode found an id with no registered factory.
    #[error("unknown packet id: {0}")]
    UnknownPacketId(PacketId),

    /// A second registration was attempted under an id already present.
    #[error("packet id {0} is already registered")]
    DuplicateRegistration(PacketId),

    /// A container count on the wire was negative.
    #[error("invalid element count {count} at position {position}")]
    InvalidCount {
        /// Read position of the count field.
        position: usize,
        /// The count value read from the wire.
        count: i32,
    },

    /// Text bytes were not valid UTF-8.
    #[error("invalid utf-8 in text at position {position}")]
    InvalidText {
        /// Read position of the text payload.
        position: usize,
        /// The underlying validation failure.
        source: std::str::Utf8Error,
    },

    /// No codec was registered for the requested type.
    #[error("no codec registered for type {0}")]
    UnsupportedType(&'static str),

    /// A second codec was registered for a type already present.
    #[error("codec for type {0} is already registered")]
    DuplicateCodec(&'static str),
}

/// Result type for wire operations.
pub type WireResult<T> = Result<T, WireError>;
