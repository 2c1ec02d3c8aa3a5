/// Implementation of the single `nbt` command.
///
/// Opens the file, decodes it (sniffing for gzip unless `--raw`), then
/// renders either the whole tree or the node at `--get` in the chosen
/// format.
///
/// ```text
/// ┌────────┬───────────────────────────────────────────────────────────┐
/// │ Format │ Output                                                    │
/// ├────────┼───────────────────────────────────────────────────────────┤
/// │ tree   │ TAG_Int('x'): 42 style indented dump          (default)   │
/// │ json   │ pretty-printed JSON object, scalars as numbers/strings    │
/// └────────┴───────────────────────────────────────────────────────────┘
/// ```
use std::fs::{self, File};
use std::io::{self, BufReader, Write as _};

use anyhow::{Context, Result, anyhow};
use nbt_decoder::DecoderConfig;
use nbt_types::Dump;
use tracing::debug;

use crate::{DecodeArgs, render_json};

/// Output formats accepted by `--format`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Tree,
    Json,
}

/// Run the decode command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, it does not decode, the
/// `--get` path does not exist, or the output cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let format = parse_format(&args.format)?;
    let config = DecoderConfig {
        max_depth: args.max_depth,
        ..DecoderConfig::default()
    };

    let file =
        File::open(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let reader = BufReader::new(file);

    let tree = if args.raw {
        nbt_decoder::decode_from_stream_with_config(reader, config)
    } else {
        nbt_decoder::read_detected(reader, config)
    }
    .with_context(|| format!("failed to decode {}", args.file.display()))?;
    debug!(entries = tree.root.len(), "tree ready");

    let rendered = match &args.get {
        Some(path) => {
            let node = tree
                .lookup(path)
                .ok_or_else(|| anyhow!("no node at path {path:?}"))?;
            let leaf = path.rsplit('.').next().unwrap_or(path);
            match format {
                OutputFormat::Tree => Dump::new(Some(leaf), node).to_string(),
                OutputFormat::Json => render_json::to_pretty(&render_json::node_to_json(node))?,
            }
        }
        None => match format {
            OutputFormat::Tree => tree.to_string(),
            OutputFormat::Json => render_json::to_pretty(&render_json::tree_to_json(&tree))?,
        },
    };

    if let Some(path) = &args.output {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(rendered.as_bytes())
            .context("cannot write to stdout")?;
        if !rendered.ends_with('\n') {
            handle.write_all(b"\n").context("cannot write to stdout")?;
        }
    }

    Ok(())
}

/// Parses the `--format` string to an [`OutputFormat`].
///
/// # Errors
///
/// Returns an error for unrecognised format names.
fn parse_format(s: &str) -> Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "tree" | "text" => Ok(OutputFormat::Tree),
        "json" => Ok(OutputFormat::Json),
        _ => Err(anyhow!("unknown format {s:?} (expected tree|json)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        assert_eq!(parse_format("tree").unwrap(), OutputFormat::Tree);
        assert_eq!(parse_format("JSON").unwrap(), OutputFormat::Json);
        assert!(parse_format("yaml").is_err());
    }
}
