//! Test support for the NBT workspace.
//!
//! Builds tag streams byte by byte so integration tests and benches can
//! describe documents without hex literals. This is deliberately a dumb
//! byte writer with no knowledge of [`nbt_types::Node`]: the decoder under
//! test should never be checked against a model of itself.

#![allow(clippy::pedantic)]

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use nbt_types::TagKind;

fn name(out: &mut Vec<u8>, s: &str) {
    let len = u16::try_from(s.len()).expect("name longer than u16::MAX");
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(s.as_bytes());
}

/// Entries of one compound, in the order they are added.
#[derive(Default)]
pub struct CompoundBuilder {
    buf: Vec<u8>,
}

impl CompoundBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry with an arbitrary kind byte and pre-encoded payload.
    pub fn raw(mut self, kind: u8, key: &str, payload: &[u8]) -> Self {
        self.buf.push(kind);
        name(&mut self.buf, key);
        self.buf.extend_from_slice(payload);
        self
    }

    pub fn byte(self, key: &str, v: i8) -> Self {
        self.raw(0x01, key, &v.to_be_bytes())
    }

    pub fn short(self, key: &str, v: i16) -> Self {
        self.raw(0x02, key, &v.to_be_bytes())
    }

    pub fn int(self, key: &str, v: i32) -> Self {
        self.raw(0x03, key, &v.to_be_bytes())
    }

    pub fn long(self, key: &str, v: i64) -> Self {
        self.raw(0x04, key, &v.to_be_bytes())
    }

    pub fn float(self, key: &str, v: f32) -> Self {
        self.raw(0x05, key, &v.to_bits().to_be_bytes())
    }

    pub fn double(self, key: &str, v: f64) -> Self {
        self.raw(0x06, key, &v.to_bits().to_be_bytes())
    }

    pub fn string(self, key: &str, v: &str) -> Self {
        let mut payload = Vec::new();
        name(&mut payload, v);
        self.raw(0x08, key, &payload)
    }

    pub fn list(self, key: &str, list: ListBuilder) -> Self {
        self.raw(0x09, key, &list.payload())
    }

    pub fn compound(self, key: &str, inner: CompoundBuilder) -> Self {
        self.raw(0x0A, key, &inner.payload())
    }

    pub fn int_array(self, key: &str, values: &[i32]) -> Self {
        let mut payload = i32::try_from(values.len()).unwrap().to_be_bytes().to_vec();
        for v in values {
            payload.extend_from_slice(&v.to_be_bytes());
        }
        self.raw(0x0B, key, &payload)
    }

    /// Entries followed by the End tag.
    pub fn payload(mut self) -> Vec<u8> {
        self.buf.push(0x00);
        self.buf
    }

    /// A complete document: root compound kind, root name, entries, End.
    pub fn document(self, root_name: &str) -> Vec<u8> {
        let mut out = vec![0x0A];
        name(&mut out, root_name);
        out.extend(self.payload());
        out
    }
}

/// Elements of one list. The declared count defaults to the number of
/// pushed elements and can be overridden to build malformed lists.
pub struct ListBuilder {
    kind: TagKind,
    count: Option<i32>,
    items: usize,
    buf: Vec<u8>,
}

impl ListBuilder {
    pub fn new(kind: TagKind) -> Self {
        Self {
            kind,
            count: None,
            items: 0,
            buf: Vec::new(),
        }
    }

    pub fn raw(mut self, payload: &[u8]) -> Self {
        self.buf.extend_from_slice(payload);
        self.items += 1;
        self
    }

    pub fn float(self, v: f32) -> Self {
        self.raw(&v.to_bits().to_be_bytes())
    }

    pub fn double(self, v: f64) -> Self {
        self.raw(&v.to_bits().to_be_bytes())
    }

    pub fn int(self, v: i32) -> Self {
        self.raw(&v.to_be_bytes())
    }

    pub fn string(self, v: &str) -> Self {
        let mut payload = Vec::new();
        name(&mut payload, v);
        self.raw(&payload)
    }

    pub fn compound(self, inner: CompoundBuilder) -> Self {
        self.raw(&inner.payload())
    }

    /// Declare `count` elements regardless of how many were pushed.
    pub fn declared_count(mut self, count: i32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn payload(self) -> Vec<u8> {
        let count = self
            .count
            .unwrap_or_else(|| i32::try_from(self.items).unwrap());
        let mut out = vec![self.kind.wire_id()];
        out.extend_from_slice(&count.to_be_bytes());
        out.extend(self.buf);
        out
    }
}

/// Gzip a byte buffer the way save files are stored.
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).expect("write to Vec");
    enc.finish().expect("finish gzip")
}

/// A small world-save document touching every supported kind.
///
/// Entries are deliberately not in key order.
pub fn level_document() -> Vec<u8> {
    let inventory = ListBuilder::new(TagKind::Compound)
        .compound(
            CompoundBuilder::new()
                .byte("Slot", 0)
                .string("id", "minecraft:stone")
                .byte("Count", 64),
        )
        .compound(
            CompoundBuilder::new()
                .byte("Slot", 8)
                .string("id", "minecraft:diamond_sword")
                .byte("Count", 1),
        );

    let player = CompoundBuilder::new()
        .list(
            "Pos",
            ListBuilder::new(TagKind::Double)
                .double(8.5)
                .double(64.0)
                .double(-3.25),
        )
        .list(
            "Rotation",
            ListBuilder::new(TagKind::Float).float(90.0).float(-12.5),
        )
        .float("Health", 20.0)
        .int_array("UUID", &[1, -2, 3, -4])
        .list("Inventory", inventory)
        .int("foodLevel", 20)
        .short("Air", 300);

    let data_packs = CompoundBuilder::new()
        .list("Enabled", ListBuilder::new(TagKind::String).string("vanilla"))
        .list("Disabled", ListBuilder::new(TagKind::End));

    let game_rules = CompoundBuilder::new()
        .string("keepInventory", "false")
        .string("doDaylightCycle", "true");

    let data = CompoundBuilder::new()
        .string("LevelName", "New World")
        .int("version", 19133)
        .long("RandomSeed", -4_530_634_556_500_121_041)
        .byte("hardcore", 0)
        .byte("raining", 1)
        .int("rainTime", 12000)
        .double("BorderSize", 60_000_000.0)
        .double("BorderCenterX", 0.0)
        .long("Time", 24000)
        .compound("DataPacks", data_packs)
        .compound("Player", player)
        .compound("GameRules", game_rules);

    CompoundBuilder::new().compound("Data", data).document("")
}
