//! Index preparation tool
//!
//! Reads a keyword file (one 15-character keyword per line), builds the
//! finalized index, and writes the serialized form to standard output.
//! Blank lines and lines that are not exactly 15 in-alphabet characters are
//! skipped, so a database file with stray headers or trailing junk still
//! indexes cleanly.

use anyhow::{Context, Result};
use fuzzdex::{write_index, IndexBuilder, Keyword};
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = fuzzdex::args::prep_args();
    let path = matches
        .get_one::<String>("keywords")
        .expect("keyword file is required");

    let file = File::open(path).with_context(|| format!("cannot open {path}"))?;
    let mut builder = IndexBuilder::new();
    let mut skipped = 0usize;

    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("error reading {path}"))?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        match Keyword::parse(line.as_bytes()) {
            Some(kw) => {
                builder
                    .insert(kw)
                    .context("keyword database is too large")?;
            }
            None => skipped += 1,
        }
    }

    debug!(
        "read {} keywords from {path} ({skipped} malformed lines skipped)",
        builder.len()
    );

    let index = builder.finalize();

    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    write_index(&index, &mut out).context("failed to write index to stdout")?;
    out.flush()?;
    Ok(())
}
