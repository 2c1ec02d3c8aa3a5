//! Conformance tests: golden documents decoded and dumped to insta snapshots.
//!
//! Each test reads a committed binary fixture from `tests/golden/`, decodes
//! it through one of the public entry points, and compares either the
//! decoded values or the `Display` dump against a stored snapshot.
//!
//! The fixtures are produced by `src/bin/generate_golden.rs` from
//! [`nbt_tests::level_document`]; `golden_raw_matches_builder` fails if the
//! two drift apart.

use std::path::{Path, PathBuf};

use insta::assert_snapshot;
use nbt_decoder::{ErrorKind, decode_from_stream, read_from_path, read_from_stream};
use nbt_types::{Dump, Node, TagKind};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn golden_path(subpath: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(subpath)
}

fn golden(subpath: &str) -> Vec<u8> {
    let path = golden_path(subpath);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()))
}

// ── level ─────────────────────────────────────────────────────────────────────

#[test]
fn golden_raw_matches_builder() {
    assert_eq!(golden("level/level.raw"), nbt_tests::level_document());
}

#[test]
fn level_tree_dump() {
    let tree = read_from_path(golden_path("level/level.dat")).unwrap();
    assert_snapshot!("level_tree", tree.to_string());
}

#[test]
fn level_player_dump() {
    let tree = read_from_path(golden_path("level/level.dat")).unwrap();
    let player = tree.lookup("Data.Player").unwrap();
    assert_snapshot!("level_player", Dump::new(Some("Player"), player).to_string());
}

#[test]
fn compressed_and_raw_decode_identically() {
    let from_file = read_from_path(golden_path("level/level.dat")).unwrap();
    let from_stream = read_from_stream(golden("level/level.dat").as_slice()).unwrap();
    let from_raw = decode_from_stream(golden("level/level.raw").as_slice()).unwrap();
    assert_eq!(from_file, from_stream);
    assert_eq!(from_file, from_raw);
}

#[test]
fn level_values() {
    let tree = read_from_path(golden_path("level/level.dat")).unwrap();

    assert_eq!(tree.name, "");
    assert_eq!(tree.root.len(), 1);
    assert_eq!(
        tree.lookup("Data.LevelName").and_then(Node::as_str),
        Some("New World")
    );
    assert_eq!(
        tree.lookup("Data.RandomSeed").and_then(Node::as_i64),
        Some(-4_530_634_556_500_121_041)
    );
    assert_eq!(
        tree.lookup("Data.BorderSize").and_then(Node::as_f64),
        Some(60_000_000.0)
    );
    assert_eq!(
        tree.lookup("Data.Player.Health").and_then(Node::as_f32),
        Some(20.0)
    );
    assert_eq!(
        tree.lookup("Data.Player.UUID").and_then(Node::as_int_array),
        Some(&[1, -2, 3, -4][..])
    );
    assert_eq!(
        tree.lookup("Data.Player.Air").and_then(Node::as_i16),
        Some(300)
    );
}

#[test]
fn level_lists() {
    let tree = read_from_path(golden_path("level/level.dat")).unwrap();

    let pos = tree.lookup("Data.Player.Pos").and_then(Node::as_list).unwrap();
    assert_eq!(pos.element_kind, TagKind::Double);
    assert_eq!(
        pos.items,
        vec![Node::Double(8.5), Node::Double(64.0), Node::Double(-3.25)]
    );

    let inventory = tree
        .lookup("Data.Player.Inventory")
        .and_then(Node::as_list)
        .unwrap();
    assert_eq!(inventory.len(), 2);
    let sword = inventory.items[1].as_compound().unwrap();
    assert_eq!(
        sword.get("id").and_then(Node::as_str),
        Some("minecraft:diamond_sword")
    );
    assert_eq!(sword.get("Slot").and_then(Node::as_i8), Some(8));

    let disabled = tree
        .lookup("Data.DataPacks.Disabled")
        .and_then(Node::as_list)
        .unwrap();
    assert!(disabled.is_empty());
    assert_eq!(disabled.element_kind, TagKind::End);
}

#[test]
fn truncated_level_reports_a_path_inside_data() {
    let raw = golden("level/level.raw");
    let err = decode_from_stream(&raw[..raw.len() / 2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
    assert!(err.path().starts_with("Data"), "path was {:?}", err.path());
}

// ── edge_cases ────────────────────────────────────────────────────────────────

#[test]
fn empty_document() {
    let tree = read_from_path(golden_path("edge_cases/empty.dat")).unwrap();
    assert!(tree.root.is_empty());
    assert_eq!(tree.to_string(), "TAG_Compound(''): 0 entries\n{\n}");
}
