//! # Codec Benchmark
//!
//! EVERY NANOSECOND IS MEASURED.
//!
//! Round-trips the whole message catalog once to prove the codec honest,
//! then hammers the hot paths with timed loops:
//! - Fixed-size encode hits the preallocation fast path
//! - Counted payloads exercise sequence and mapping framing
//! - Every decode runs through the registry dispatch

use std::collections::HashMap;
use std::time::Instant;

use signet::wire::{Packet, PacketRegistry, ENVELOPE_ID_BYTES};
use signet::{
    register_messages, ChatRelay, InputFlags, LatencyReport, PathSample, ScoreSync, Vec3,
};

/// Configuration for the benchmark run.
struct BenchConfig {
    /// Timed iterations per loop.
    rounds: u64,
    /// Untimed iterations before each loop.
    warmup: u64,
    /// Scores carried by the sequence payload.
    sequence_len: usize,
    /// Peers carried by the mapping payload.
    mapping_len: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            rounds: 200_000,
            warmup: 20_000,
            sequence_len: 64,
            mapping_len: 32,
        }
    }
}

/// Result of one timed loop.
struct LoopStats {
    /// Average cost per operation.
    ns_per_op: f64,
    /// Envelope bytes processed per second.
    mb_per_sec: f64,
    /// Fold of decoded state, printed so the loops cannot be optimized out.
    state_hash: u64,
}

/// The three waypoint samples every fixed-size test rides on.
fn sample_path() -> PathSample {
    PathSample {
        points: [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        ],
    }
}

fn sample_flags() -> InputFlags {
    InputFlags {
        forward: true,
        left: true,
        right: true,
        sprint: true,
        ..InputFlags::default()
    }
}

fn sample_scores(len: usize) -> ScoreSync {
    ScoreSync {
        scores: (0..len).map(|i| i as i32 * 3 - 7).collect(),
    }
}

fn sample_latency(len: usize) -> LatencyReport {
    let mut millis_by_peer = HashMap::with_capacity(len);
    for peer in 0..len {
        millis_by_peer.insert(peer as i32, 16.0 + peer as f32 * 0.25);
    }
    LatencyReport { millis_by_peer }
}

fn sample_chat() -> ChatRelay {
    ChatRelay {
        channel: "global".to_owned(),
        sender: 7_700_000_001,
        origin: Vec3::new(1.0, 2.0, 3.0),
        text: "the envelope holds".to_owned(),
    }
}

/// Encodes, decodes through the registry, and compares against the original.
fn verify<P: Packet + PartialEq>(registry: &PacketRegistry, label: &str, packet: &P) -> bool {
    let bytes = registry.to_bytes(packet);
    let decoded = match registry.from_bytes(&bytes) {
        Ok(decoded) => decoded,
        Err(error) => {
            println!("│ ✗ {label:<14} decode failed: {error}");
            return false;
        }
    };
    let matches = decoded.downcast_ref::<P>() == Some(packet);
    let mark = if matches { '✓' } else { '✗' };
    println!(
        "│ {} {:<14} id {:>2}  {:>4} bytes ({} id + {} body)",
        mark,
        label,
        packet.id(),
        bytes.len(),
        ENVELOPE_ID_BYTES,
        bytes.len() - ENVELOPE_ID_BYTES,
    );
    matches
}

/// Times `rounds` encodes of one packet.
fn time_encode(registry: &PacketRegistry, packet: &dyn Packet, config: &BenchConfig) -> LoopStats {
    let mut state_hash: u64 = 0;
    for _ in 0..config.warmup {
        let bytes = registry.to_bytes(packet);
        state_hash ^= bytes.len() as u64;
    }

    let mut total_bytes: u64 = 0;
    let start = Instant::now();
    for _ in 0..config.rounds {
        let bytes = registry.to_bytes(packet);
        total_bytes += bytes.len() as u64;
        state_hash = state_hash.wrapping_add(u64::from(bytes[bytes.len() - 1]));
    }
    let elapsed = start.elapsed();

    LoopStats {
        ns_per_op: elapsed.as_nanos() as f64 / config.rounds as f64,
        mb_per_sec: total_bytes as f64 / (1024.0 * 1024.0) / elapsed.as_secs_f64(),
        state_hash,
    }
}

/// Times `rounds` registry decodes of one pre-encoded envelope.
fn time_decode(registry: &PacketRegistry, bytes: &[u8], config: &BenchConfig) -> LoopStats {
    let mut state_hash: u64 = 0;
    for _ in 0..config.warmup {
        let packet = registry.from_bytes(bytes).expect("warmup decode failed");
        state_hash ^= packet.id() as u64;
    }

    let start = Instant::now();
    for _ in 0..config.rounds {
        let packet = registry.from_bytes(bytes).expect("timed decode failed");
        state_hash = state_hash.wrapping_add(packet.id() as u64);
    }
    let elapsed = start.elapsed();

    let total_bytes = bytes.len() as u64 * config.rounds;
    LoopStats {
        ns_per_op: elapsed.as_nanos() as f64 / config.rounds as f64,
        mb_per_sec: total_bytes as f64 / (1024.0 * 1024.0) / elapsed.as_secs_f64(),
        state_hash,
    }
}

fn print_stats(label: &str, stats: &LoopStats) {
    println!(
        "│ {:<26} {:>9.1} ns/op {:>9.1} MB/s  (hash {:016x})",
        label, stats.ns_per_op, stats.mb_per_sec, stats.state_hash,
    );
}

fn main() {
    let config = BenchConfig::default();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                     SIGNET CODEC BENCHMARK                       ║");
    println!("║                 EVERY NANOSECOND IS MEASURED                     ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Rounds:        {}", config.rounds);
    println!("  Warmup:        {}", config.warmup);
    println!("  Sequence Len:  {}", config.sequence_len);
    println!("  Mapping Len:   {}", config.mapping_len);
    println!();

    let mut registry = PacketRegistry::new();
    register_messages(&mut registry).expect("catalog registration failed");
    println!("Registered {} packet variants.", registry.len());
    println!();

    // === VERIFICATION ===
    println!("┌─ Round-Trip Verification ────────────────────────────────────────┐");
    let mut all_ok = true;
    all_ok &= verify(&registry, "PathSample", &sample_path());
    all_ok &= verify(&registry, "InputFlags", &sample_flags());
    all_ok &= verify(&registry, "ScoreSync", &sample_scores(5));
    all_ok &= verify(&registry, "LatencyReport", &sample_latency(5));
    all_ok &= verify(&registry, "ChatRelay", &sample_chat());
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    // === TIMED LOOPS ===
    let path = sample_path();
    let scores = sample_scores(config.sequence_len);
    let latency = sample_latency(config.mapping_len);
    let chat = sample_chat();

    let path_bytes = registry.to_bytes(&path);
    let scores_bytes = registry.to_bytes(&scores);
    let latency_bytes = registry.to_bytes(&latency);
    let chat_bytes = registry.to_bytes(&chat);

    println!("┌─ Encode ─────────────────────────────────────────────────────────┐");
    print_stats("path (fixed 36 B body)", &time_encode(&registry, &path, &config));
    print_stats("scores (counted i32)", &time_encode(&registry, &scores, &config));
    print_stats("latency (mapping)", &time_encode(&registry, &latency, &config));
    print_stats("chat (text + nested)", &time_encode(&registry, &chat, &config));
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    println!("┌─ Decode (registry dispatch) ─────────────────────────────────────┐");
    print_stats("path (fixed 36 B body)", &time_decode(&registry, &path_bytes, &config));
    print_stats("scores (counted i32)", &time_decode(&registry, &scores_bytes, &config));
    print_stats("latency (mapping)", &time_decode(&registry, &latency_bytes, &config));
    print_stats("chat (text + nested)", &time_decode(&registry, &chat_bytes, &config));
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    // === VERDICT ===
    println!("╔══════════════════════════════════════════════════════════════════╗");
    if all_ok {
        println!("║  ✓ CODEC HONEST                                                  ║");
        println!("║    Every catalog variant decoded back to its original value.     ║");
    } else {
        println!("║  ✗ CODEC BROKEN                                                  ║");
        println!("║    At least one round-trip diverged. Numbers above are suspect.  ║");
    }
    println!("╚══════════════════════════════════════════════════════════════════╝");
}
