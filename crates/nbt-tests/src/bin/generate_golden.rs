//! Golden fixture generator for the NBT conformance test suite.
//!
//! Writes the binary documents under `tests/golden/`. Run it after changing
//! [`nbt_tests::level_document`] and commit the output. Snapshot files
//! (`.snap`) are updated separately via `cargo insta review`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p nbt-tests
//! ```
//!
//! # Generated fixtures
//!
//! | File                 | Contents                                   |
//! |----------------------|--------------------------------------------|
//! | level/level.dat      | Sample world save, gzip-compressed          |
//! | level/level.raw      | Same document, uncompressed                 |
//! | edge_cases/empty.dat | Root compound with no entries, gzip         |

use std::path::Path;

use nbt_tests::{CompoundBuilder, gzip, level_document};

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    let level = level_document();
    write_file(&golden_dir.join("level/level.dat"), &gzip(&level));
    write_file(&golden_dir.join("level/level.raw"), &level);
    write_file(
        &golden_dir.join("edge_cases/empty.dat"),
        &gzip(&CompoundBuilder::new().document("")),
    );

    println!("All golden fixtures written to {}", golden_dir.display());
}

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {}", path.display());
}
