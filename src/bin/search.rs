//! Query answering tool
//!
//! Loads a prepared index, reads one query per line, and writes one ASCII
//! '0' or '1' per query to standard output (in input order), followed by a
//! single trailing newline. Malformed queries answer '0'.
//!
//! With `--threads N` the batch is fanned across a rayon pool; every worker
//! gets its own searcher (visited state is per-searcher, never shared), and
//! the output order is still the input order.

use anyhow::{Context, Result};
use fuzzdex::{read_index, Index};
use log::debug;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

fn answer_serial(index: &Index, queries: &[String], k: u32) -> Vec<u8> {
    let mut searcher = index.searcher();
    queries
        .iter()
        .map(|q| if searcher.search(q.as_bytes(), k) { b'1' } else { b'0' })
        .collect()
}

fn answer_parallel(index: &Index, queries: &[String], k: u32, threads: usize) -> Result<Vec<u8>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("failed to build worker pool")?;
    Ok(pool.install(|| {
        queries
            .par_iter()
            .map_init(
                || index.searcher(),
                |searcher, q| {
                    if searcher.search(q.as_bytes(), k) {
                        b'1'
                    } else {
                        b'0'
                    }
                },
            )
            .collect()
    }))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = fuzzdex::args::search_args();
    let query_path = matches
        .get_one::<String>("queries")
        .expect("query file is required");
    let index_path = matches
        .get_one::<String>("index")
        .expect("index file is required");
    let k = *matches.get_one::<u32>("distance").expect("has default");
    let threads = *matches.get_one::<usize>("threads").expect("has default");

    let file = File::open(index_path).with_context(|| format!("cannot open {index_path}"))?;
    let index = read_index(&mut BufReader::new(file))
        .with_context(|| format!("failed to load index from {index_path}"))?;
    debug!("loaded index with {} keywords", index.len());

    let file = File::open(query_path).with_context(|| format!("cannot open {query_path}"))?;
    let queries: Vec<String> = BufReader::new(file)
        .lines()
        .map(|line| line.map(|l| l.trim_end_matches('\r').to_string()))
        .collect::<io::Result<_>>()
        .with_context(|| format!("error reading {query_path}"))?;

    let answers = if threads > 1 {
        answer_parallel(&index, &queries, k, threads)?
    } else {
        answer_serial(&index, &queries, k)
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(&answers)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
