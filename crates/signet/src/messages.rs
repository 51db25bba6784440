//! # Example Message Catalog
//!
//! One packet per codec surface: fixed composite arrays, packed flags,
//! counted sequences, mappings, and text with nesting. The catalog is
//! registered through [`register_messages`], the startup routine that
//! enumerates the variant table once.

use serde::{Deserialize, Serialize};
use signet_wire::{
    ByteReader, ByteWriter, Packet, PacketDescriptor, PacketId, PacketRegistry, Serializable,
    WireResult,
};
use std::any::Any;
use std::collections::HashMap;

/// 3D vector - the example composite every fixed-size body builds on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Encoded size in bytes: three f32 components.
    pub const WIRE_SIZE: usize = 12;
}

impl Serializable for Vec3 {
    fn encode(&self, writer: &mut ByteWriter) {
        writer.write_f32(self.x);
        writer.write_f32(self.y);
        writer.write_f32(self.z);
    }

    fn decode(&mut self, reader: &mut ByteReader<'_>) -> WireResult<()> {
        self.x = reader.read_f32()?;
        self.y = reader.read_f32()?;
        self.z = reader.read_f32()?;
        Ok(())
    }
}

/// Three sampled waypoints along a movement path.
///
/// Fixed-size body: the arity is carried by the descriptor, not the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSample {
    /// The sampled waypoints, oldest first.
    pub points: [Vec3; 3],
}

impl PathSample {
    /// Envelope id.
    pub const ID: PacketId = 0;

    /// Encoded body size in bytes.
    pub const BODY_SIZE: usize = 3 * Vec3::WIRE_SIZE;
}

impl Serializable for PathSample {
    fn encode(&self, writer: &mut ByteWriter) {
        writer.write_seq_fixed(&self.points, |w, point| w.write_value(point));
    }

    fn decode(&mut self, reader: &mut ByteReader<'_>) -> WireResult<()> {
        for point in &mut self.points {
            point.decode(reader)?;
        }
        Ok(())
    }
}

impl Packet for PathSample {
    fn id(&self) -> PacketId {
        Self::ID
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-tick input state, packed into a single octet on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFlags {
    /// Moving forward.
    pub forward: bool,
    /// Moving backward.
    pub back: bool,
    /// Strafing left.
    pub left: bool,
    /// Strafing right.
    pub right: bool,
    /// Jump pressed this tick.
    pub jump: bool,
    /// Sprint held.
    pub sprint: bool,
    /// Crouch held.
    pub crouch: bool,
    /// Interact pressed this tick.
    pub interact: bool,
}

impl InputFlags {
    /// Envelope id.
    pub const ID: PacketId = 1;

    /// Encoded body size in bytes.
    pub const BODY_SIZE: usize = 1;
}

impl Serializable for InputFlags {
    fn encode(&self, writer: &mut ByteWriter) {
        writer.write_flags(&[
            self.forward,
            self.back,
            self.left,
            self.right,
            self.jump,
            self.sprint,
            self.crouch,
            self.interact,
        ]);
    }

    fn decode(&mut self, reader: &mut ByteReader<'_>) -> WireResult<()> {
        let [forward, back, left, right, jump, sprint, crouch, interact] = reader.read_flags()?;
        self.forward = forward;
        self.back = back;
        self.left = left;
        self.right = right;
        self.jump = jump;
        self.sprint = sprint;
        self.crouch = crouch;
        self.interact = interact;
        Ok(())
    }
}

impl Packet for InputFlags {
    fn id(&self) -> PacketId {
        Self::ID
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Score totals for every active player, in standings order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSync {
    /// One total per player.
    pub scores: Vec<i32>,
}

impl ScoreSync {
    /// Envelope id.
    pub const ID: PacketId = 2;
}

impl Serializable for ScoreSync {
    fn encode(&self, writer: &mut ByteWriter) {
        writer.write_seq(&self.scores, |w, score| w.write_i32(*score));
    }

    fn decode(&mut self, reader: &mut ByteReader<'_>) -> WireResult<()> {
        self.scores = reader.read_seq(ByteReader::read_i32)?;
        Ok(())
    }
}

impl Packet for ScoreSync {
    fn id(&self) -> PacketId {
        Self::ID
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Measured round-trip latency per peer, in milliseconds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyReport {
    /// Peer id to smoothed latency.
    pub millis_by_peer: HashMap<i32, f32>,
}

impl LatencyReport {
    /// Envelope id.
    pub const ID: PacketId = 3;
}

impl Serializable for LatencyReport {
    fn encode(&self, writer: &mut ByteWriter) {
        writer.write_map(
            &self.millis_by_peer,
            |w, peer| w.write_i32(*peer),
            |w, millis| w.write_f32(*millis),
        );
    }

    fn decode(&mut self, reader: &mut ByteReader<'_>) -> WireResult<()> {
        self.millis_by_peer = reader.read_map(ByteReader::read_i32, ByteReader::read_f32)?;
        Ok(())
    }
}

impl Packet for LatencyReport {
    fn id(&self) -> PacketId {
        Self::ID
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Chat line relayed to a channel, stamped with where it was said.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRelay {
    /// Channel the line goes to.
    pub channel: String,
    /// Sender account id.
    pub sender: i64,
    /// Where the sender stood when speaking.
    pub origin: Vec3,
    /// The line itself.
    pub text: String,
}

impl ChatRelay {
    /// Envelope id.
    pub const ID: PacketId = 4;
}

impl Serializable for ChatRelay {
    fn encode(&self, writer: &mut ByteWriter) {
        writer.write_str(&self.channel);
        writer.write_i64(self.sender);
        writer.write_value(&self.origin);
        writer.write_str(&self.text);
    }

    fn decode(&mut self, reader: &mut ByteReader<'_>) -> WireResult<()> {
        self.channel = reader.read_str()?;
        self.sender = reader.read_i64()?;
        self.origin = reader.read_value()?;
        self.text = reader.read_str()?;
        Ok(())
    }
}

impl Packet for ChatRelay {
    fn id(&self) -> PacketId {
        Self::ID
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Registers the whole catalog - the deterministic startup table.
///
/// Fixed-size variants let the registry measure their bodies here, so
/// every later encode of those ids preallocates exactly.
///
/// # Errors
///
/// Returns [`signet_wire::WireError::DuplicateRegistration`] when called
/// against a registry that already holds one of the catalog ids.
pub fn register_messages(registry: &mut PacketRegistry) -> WireResult<()> {
    registry.register_default::<PathSample>(PacketDescriptor::fixed(PathSample::ID))?;
    registry.register_default::<InputFlags>(PacketDescriptor::fixed(InputFlags::ID))?;
    registry.register_default::<ScoreSync>(PacketDescriptor::new(ScoreSync::ID))?;
    registry.register_default::<LatencyReport>(PacketDescriptor::new(LatencyReport::ID))?;
    registry.register_default::<ChatRelay>(PacketDescriptor::new(ChatRelay::ID))?;
    Ok(())
}
