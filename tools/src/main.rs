//! compile_dict: build `<name>.fst` + `<name>.bincode` from a text dictionary.
//!
//! The engine's data directory prefers these artifacts over the text file
//! with the same stem, so `input-yale.utf-8` compiles to `input-yale.fst`
//! and `input-yale.bincode` by default.

use anyhow::{bail, Context, Result};
use cantoinput_core::Dictionary;
use clap::Parser;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "compile_dict", about = "Compile a romanization dictionary to fst + bincode")]
struct Args {
    /// Text dictionary (`<key> <candidates…>` per line)
    input: PathBuf,

    /// Output directory
    out_dir: PathBuf,

    /// Artifact stem; defaults to the input file stem
    #[arg(long)]
    name: Option<String>,

    /// Print the entries under this prefix after compiling
    #[arg(long)]
    show: Option<String>,
}

fn artifact_stem(input: &Path, name: Option<&str>) -> Result<String> {
    if let Some(name) = name {
        return Ok(name.to_string());
    }
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .with_context(|| format!("cannot derive an artifact name from {}", input.display()))
}

/// Re-open the written fst and check it agrees with the payload count.
fn verify_fst(path: &Path, expected: usize) -> Result<()> {
    let mut buf = Vec::new();
    File::open(path)?.read_to_end(&mut buf)?;
    let map = fst::Map::new(buf)?;
    if map.len() != expected {
        bail!("{} holds {} keys, expected {}", path.display(), map.len(), expected);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let stem = artifact_stem(&args.input, args.name.as_deref())?;

    let file = File::open(&args.input).with_context(|| format!("opening {}", args.input.display()))?;
    let dict = Dictionary::load(BufReader::new(file));
    if dict.is_empty() {
        bail!("{} contains no entries", args.input.display());
    }

    fs::create_dir_all(&args.out_dir)?;
    let fst_path = args.out_dir.join(format!("{}.fst", stem));
    let bincode_path = args.out_dir.join(format!("{}.bincode", stem));
    dict.save_compiled(&fst_path, &bincode_path)?;
    verify_fst(&fst_path, dict.len())?;

    info!(entries = dict.len(), "compiled {}", args.input.display());
    println!(
        "Wrote {} keys to {} and {}",
        dict.len(),
        fst_path.display(),
        bincode_path.display()
    );

    if let Some(prefix) = &args.show {
        let compiled = Dictionary::load_compiled(&fst_path, &bincode_path)?;
        for (key, value) in compiled.lookup_prefix(prefix) {
            println!("  {} -> {}", key, value);
        }
    }

    Ok(())
}
