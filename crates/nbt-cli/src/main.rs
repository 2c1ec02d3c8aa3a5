/// `nbt`: decode one tag file and print it.
///
/// # Usage
///
/// ```text
/// nbt <FILE> [OPTIONS]
///
/// Options:
///   --format <tree|json>  Output format (default: tree)
///   --get <PATH>          Print only the node at a dotted key path
///   --raw                 Treat the file as uncompressed
///   --max-depth <N>       Nesting limit (default: 512)
///   -o, --output <FILE>   Write to a file instead of stdout
///   -v, --verbose         Log decoder progress to stderr
///   -h, --help            Print help
///   -V, --version         Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                   |
/// |------|-------------------------------------------|
/// | 0    | Success                                   |
/// | 1    | Error (I/O failure, undecodable file ...) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::Parser;
use nbt_decoder::config::DEFAULT_MAX_DEPTH;
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod render_json;

/// Decode a gzip-compressed (or raw) tag tree file.
#[derive(Parser)]
#[command(name = "nbt", version, about = "Tag tree file decoder")]
pub struct DecodeArgs {
    /// Path to the file to decode, e.g. `level.dat`.
    pub file: PathBuf,

    /// Output format: `tree` or `json`.
    #[arg(long, default_value = "tree")]
    pub format: String,

    /// Dotted key path to print instead of the whole tree (e.g. `Data.Player`).
    #[arg(long)]
    pub get: Option<String>,

    /// Skip gzip detection and decode the file as an uncompressed stream.
    #[arg(long)]
    pub raw: bool,

    /// Maximum compound/list nesting accepted before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Write rendered output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log decoder progress to stderr. `RUST_LOG` overrides the level.
    #[arg(short, long)]
    pub verbose: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("nbt=debug,nbt_decoder=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = DecodeArgs::parse();

    if args.verbose {
        init_tracing();
    }

    if let Err(e) = cmd_decode::run(&args) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
