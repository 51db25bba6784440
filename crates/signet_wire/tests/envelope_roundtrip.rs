//! Integration tests for the envelope codec: the round-trip law, the wire
//! scenarios, and error distinctness, end to end through a populated
//! registry.

use signet_wire::{
    ByteReader, ByteWriter, PacketDescriptor, PacketId, PacketRegistry, Serializable, WireError,
    WireResult, COUNT_BYTES, ENVELOPE_ID_BYTES,
};
use std::any::Any;
use std::collections::HashMap;

/// 3-component float triple used by the fixed-size scenario.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Triple {
    x: f32,
    y: f32,
    z: f32,
}

impl Triple {
    const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Serializable for Triple {
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

macro_rules! impl_packet {
    ($ty:ty, $id:expr) => {
        impl signet_wire::Packet for $ty {
            fn id(&self) -> PacketId {
                $id
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }
    };
}

#[derive(Debug, Default, Clone, PartialEq)]
struct TriplePacket {
    triples: [Triple; 3],
}

impl Serializable for TriplePacket {
    fn encode(&self, writer: &mut ByteWriter) {
        writer.write_seq_fixed(&self.triples, |w, t| w.write_value(t));
    }

    fn decode(&mut self, reader: &mut ByteReader<'_>) -> WireResult<()> {
        for triple in &mut self.triples {
            triple.decode(reader)?;
        }
        Ok(())
    }
}

impl_packet!(TriplePacket, 0);

#[derive(Debug, Default, Clone, PartialEq)]
struct FlagsPacket {
    flags: [bool; 8],
}

impl Serializable for FlagsPacket {
    fn encode(&self, writer: &mut ByteWriter) {
        writer.write_flags(&self.flags);
    }

    fn decode(&mut self, reader: &mut ByteReader<'_>) -> WireResult<()> {
        self.flags = reader.read_flags()?;
        Ok(())
    }
}

impl_packet!(FlagsPacket, 1);

#[derive(Debug, Default, Clone, PartialEq)]
struct SequencePacket {
    values: Vec<i32>,
}

impl Serializable for SequencePacket {
    fn encode(&self, writer: &mut ByteWriter) {
        writer.write_seq(&self.values, |w, v| w.write_i32(*v));
    }

    fn decode(&mut self, reader: &mut ByteReader<'_>) -> WireResult<()> {
        self.values = reader.read_seq(ByteReader::read_i32)?;
        Ok(())
    }
}

impl_packet!(SequencePacket, 2);

#[derive(Debug, Default, Clone, PartialEq)]
struct MappingPacket {
    entries: HashMap<i32, f32>,
}

impl Serializable for MappingPacket {
    fn encode(&self, writer: &mut ByteWriter) {
        writer.write_map(&self.entries, |w, k| w.write_i32(*k), |w, v| w.write_f32(*v));
    }

    fn decode(&mut self, reader: &mut ByteReader<'_>) -> WireResult<()> {
        self.entries = reader.read_map(ByteReader::read_i32, ByteReader::read_f32)?;
        Ok(())
    }
}

impl_packet!(MappingPacket, 3);

fn scenario_registry() -> PacketRegistry {
    let mut registry = PacketRegistry::new();
    registry
        .register_default::<TriplePacket>(PacketDescriptor::fixed(0))
        .unwrap();
    registry
        .register_default::<FlagsPacket>(PacketDescriptor::fixed(1))
        .unwrap();
    registry
        .register_default::<SequencePacket>(PacketDescriptor::new(2))
        .unwrap();
    registry
        .register_default::<MappingPacket>(PacketDescriptor::new(3))
        .unwrap();
    registry
}

#[test]
fn test_primitive_roundtrip_law() {
    let mut writer = ByteWriter::new();
    writer.write_bool(true);
    writer.write_i8(-8);
    writer.write_u8(200);
    writer.write_i16(-1600);
    writer.write_u16(61000);
    writer.write_i32(-3_000_000);
    writer.write_u32(4_000_000_000);
    writer.write_i64(i64::MIN);
    writer.write_u64(u64::MAX);
    writer.write_f32(std::f32::consts::PI);
    writer.write_f64(-std::f64::consts::E);
    writer.write_str("envelope ✉");
    let bytes = writer.into_bytes();

    let mut reader = ByteReader::new(&bytes);
    assert!(reader.read_bool().unwrap());
    assert_eq!(reader.read_i8().unwrap(), -8);
    assert_eq!(reader.read_u8().unwrap(), 200);
    assert_eq!(reader.read_i16().unwrap(), -1600);
    assert_eq!(reader.read_u16().unwrap(), 61000);
    assert_eq!(reader.read_i32().unwrap(), -3_000_000);
    assert_eq!(reader.read_u32().unwrap(), 4_000_000_000);
    assert_eq!(reader.read_i64().unwrap(), i64::MIN);
    assert_eq!(reader.read_u64().unwrap(), u64::MAX);
    assert_eq!(reader.read_f32().unwrap(), std::f32::consts::PI);
    assert_eq!(reader.read_f64().unwrap(), -std::f64::consts::E);
    assert_eq!(reader.read_str().unwrap(), "envelope ✉");
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_nan_bit_patterns_survive() {
    let quiet = f32::from_bits(0x7FC0_0001);
    let mut writer = ByteWriter::new();
    writer.write_f32(quiet);
    let bytes = writer.into_bytes();

    let mut reader = ByteReader::new(&bytes);
    let back = reader.read_f32().unwrap();
    assert!(back.is_nan());
    assert_eq!(back.to_bits(), 0x7FC0_0001);
}

#[test]
fn test_raw_byte_runs_roundtrip() {
    let payload = [0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x7F];

    let mut writer = ByteWriter::new();
    writer.write_u8(payload.len() as u8);
    writer.write_bytes(&payload);
    writer.write_u16(0x0102);
    let bytes = writer.into_bytes();
    // Byte runs carry no count prefix of their own.
    assert_eq!(bytes.len(), 1 + payload.len() + 2);

    let mut reader = ByteReader::new(&bytes);
    let len = usize::from(reader.read_u8().unwrap());
    assert_eq!(reader.read_bytes(len).unwrap(), &payload);
    assert_eq!(reader.read_u16().unwrap(), 0x0102);
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_float_triple_scenario() {
    let registry = scenario_registry();
    let sent = TriplePacket {
        triples: [
            Triple::new(1.0, 2.0, 3.0),
            Triple::new(4.0, 5.0, 6.0),
            Triple::new(7.0, 8.0, 9.0),
        ],
    };

    let bytes = registry.to_bytes(&sent);
    // 3 triples x 3 components x 4 bytes, behind the id.
    assert_eq!(bytes.len(), ENVELOPE_ID_BYTES + 36);
    assert_eq!(registry.descriptor(0).unwrap().cached_size, Some(36));

    let received = registry.from_bytes(&bytes).unwrap();
    assert_eq!(received.downcast_ref::<TriplePacket>(), Some(&sent));
}

#[test]
fn test_bool_octet_scenario() {
    let registry = scenario_registry();
    let sent = FlagsPacket {
        flags: [true, false, true, true, false, true, false, false],
    };

    let bytes = registry.to_bytes(&sent);
    assert_eq!(bytes.len(), ENVELOPE_ID_BYTES + 1);
    assert_eq!(bytes[ENVELOPE_ID_BYTES], 0b0010_1101);

    let received = registry.from_bytes(&bytes).unwrap();
    assert_eq!(received.downcast_ref::<FlagsPacket>(), Some(&sent));
}

#[test]
fn test_flag_packing_is_bit_exact_for_all_octets() {
    for octet in 0..=u8::MAX {
        let flags: Vec<bool> = (0..8).map(|bit| octet & (1 << bit) != 0).collect();

        let mut writer = ByteWriter::new();
        writer.write_flags(&flags);
        assert_eq!(writer.as_bytes(), &[octet]);

        let bytes = writer.into_bytes();
        let mut reader = ByteReader::new(&bytes);
        let unpacked = reader.read_flags().unwrap();
        assert_eq!(unpacked.as_slice(), flags.as_slice());
    }
}

#[test]
fn test_integer_sequence_scenario() {
    let registry = scenario_registry();
    let sent = SequencePacket {
        values: vec![6, 7, 8, 9, 10],
    };

    let bytes = registry.to_bytes(&sent);
    assert_eq!(bytes.len(), ENVELOPE_ID_BYTES + COUNT_BYTES + 5 * 4);

    let received = registry.from_bytes(&bytes).unwrap();
    let sequence = received.downcast_ref::<SequencePacket>().unwrap();
    assert_eq!(sequence.values, vec![6, 7, 8, 9, 10]);
}

#[test]
fn test_mapping_scenario_order_irrelevant() {
    let registry = scenario_registry();
    let entries: HashMap<i32, f32> = [(1, 2.0), (3, 4.0), (5, 6.0), (7, 8.0), (9, 10.0)]
        .into_iter()
        .collect();
    let sent = MappingPacket {
        entries: entries.clone(),
    };

    let bytes = registry.to_bytes(&sent);
    assert_eq!(bytes.len(), ENVELOPE_ID_BYTES + COUNT_BYTES + 5 * (4 + 4));

    // Key-value pairs compare as a set: HashMap equality ignores order.
    let received = registry.from_bytes(&bytes).unwrap();
    let mapping = received.downcast_ref::<MappingPacket>().unwrap();
    assert_eq!(mapping.entries, entries);
}

#[test]
fn test_known_arity_mapping_omits_count() {
    let entries: HashMap<i32, f32> = [(2, 4.0), (6, 36.0), (10, 100.0)].into_iter().collect();

    let mut writer = ByteWriter::new();
    writer.write_map_fixed(&entries, |w, k| w.write_i32(*k), |w, v| w.write_f32(*v));
    let bytes = writer.into_bytes();
    // Arity agreed out of band, so only the pairs hit the wire.
    assert_eq!(bytes.len(), 3 * (4 + 4));

    let mut reader = ByteReader::new(&bytes);
    let decoded = reader
        .read_map_fixed(entries.len(), ByteReader::read_i32, ByteReader::read_f32)
        .unwrap();
    assert_eq!(decoded, entries);
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_fixed_size_body_is_constant_across_values() {
    let registry = scenario_registry();

    let zeros = registry.to_bytes(&TriplePacket::default());
    let filled = registry.to_bytes(&TriplePacket {
        triples: [Triple::new(-1.5, 1e30, f32::MIN); 3],
    });
    assert_eq!(zeros.len(), filled.len());

    let none = registry.to_bytes(&FlagsPacket::default());
    let all = registry.to_bytes(&FlagsPacket { flags: [true; 8] });
    assert_eq!(none.len(), all.len());
}

#[test]
fn test_unknown_id_distinct_from_short_slice() {
    let registry = scenario_registry();

    let unknown = registry.from_bytes(&999i16.to_le_bytes()).unwrap_err();
    assert_eq!(unknown, WireError::UnknownPacketId(999));

    let short = registry.from_bytes(&[0u8]).unwrap_err();
    assert!(matches!(short, WireError::OutOfRange { .. }));

    // A registered id with a truncated body is also a bounds failure.
    let mut truncated = Vec::from(0i16.to_le_bytes());
    truncated.extend_from_slice(&[0u8; 10]);
    let err = registry.from_bytes(&truncated).unwrap_err();
    assert!(matches!(err, WireError::OutOfRange { .. }));
}

#[test]
fn test_duplicate_registration_keeps_original_factory() {
    let mut registry = scenario_registry();
    let err = registry.register_default::<FlagsPacket>(PacketDescriptor::fixed(0));
    assert_eq!(err.unwrap_err(), WireError::DuplicateRegistration(0));

    // Id 0 still decodes as the originally registered variant.
    let bytes = registry.to_bytes(&TriplePacket::default());
    let received = registry.from_bytes(&bytes).unwrap();
    assert!(received.is::<TriplePacket>());
}

/// Probe variant whose id is data-driven, for sweeping the id range.
#[derive(Debug, Clone, Copy)]
struct Probe {
    id: PacketId,
}

impl Serializable for Probe {
    fn encode(&self, _writer: &mut ByteWriter) {}

    fn decode(&mut self, _reader: &mut ByteReader<'_>) -> WireResult<()> {
        Ok(())
    }
}

impl signet_wire::Packet for Probe {
    fn id(&self) -> PacketId {
        self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn test_envelope_id_roundtrips_across_full_range() {
    let mut registry = PacketRegistry::new();
    for id in PacketId::MIN..=PacketId::MAX {
        registry
            .register(PacketDescriptor::new(id), move || Box::new(Probe { id }))
            .unwrap();
    }
    assert_eq!(registry.len(), 65536);

    let mut verified = 0usize;
    for id in PacketId::MIN..=PacketId::MAX {
        let bytes = registry.to_bytes(&Probe { id });
        assert_eq!(bytes, id.to_le_bytes());
        let packet = registry.from_bytes(&bytes).unwrap();
        assert_eq!(packet.id(), id);
        verified += 1;
    }

    println!("\n=== Envelope Id Range Sweep ===");
    println!("Ids verified: {verified}");
}
