//! # SIGNET
//!
//! The demo crate: a small message catalog built on `signet_wire`, plus
//! the measuring tools that keep the codec honest.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        SIGNET                            │
//! ├──────────────────────────────────────────────────────────┤
//! │                                                          │
//! │  messages.rs          the example catalog                │
//! │    PathSample         fixed composite array (36 B body)  │
//! │    InputFlags         packed octet (1 B body)            │
//! │    ScoreSync          counted sequence                   │
//! │    LatencyReport      mapping                            │
//! │    ChatRelay          text + nested composite            │
//! │                                                          │
//! │  bin/codec_benchmark  wall-clock encode/decode loops     │
//! │  benches/             criterion comparison vs bincode    │
//! │                                                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here feeds back into `signet_wire`; the catalog is a consumer
//! like any other.

pub mod messages;

// Re-export the wire layer
pub use signet_wire as wire;

// Re-export the catalog surface
pub use messages::{
    register_messages, ChatRelay, InputFlags, LatencyReport, PathSample, ScoreSync, Vec3,
};
