//! Query batch timing tool
//!
//! Runs one or more query files against a prepared index, reports hit counts
//! and elapsed time, and appends one CSV row per dataset to
//! `<records-dir>/<dataset>.csv`. The dataset name is the query file's stem
//! with any `query_` prefix stripped, unless `--dataset` overrides it.

use anyhow::{Context, Result};
use fuzzdex::read_index;
use rustc_hash::FxHashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Default, Clone, Copy)]
struct BatchStats {
    queries: usize,
    hits: usize,
    elapsed_sec: f64,
}

fn derive_dataset(query_path: &str) -> String {
    let stem = Path::new(query_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    let stem = stem.strip_prefix("query_").unwrap_or(stem);
    if stem.is_empty() {
        "unknown".to_string()
    } else {
        stem.to_string()
    }
}

fn append_record(records_dir: &str, dataset: &str, stats: &BatchStats) -> Result<()> {
    fs::create_dir_all(records_dir)
        .with_context(|| format!("cannot create records dir {records_dir}"))?;
    let path = Path::new(records_dir).join(format!("{dataset}.csv"));
    let fresh = !path.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    if fresh {
        writeln!(file, "dataset,queries,hits,elapsed_sec,queries_per_sec")?;
    }
    let qps = if stats.elapsed_sec > 0.0 {
        stats.queries as f64 / stats.elapsed_sec
    } else {
        0.0
    };
    writeln!(
        file,
        "{dataset},{},{},{:.6},{:.1}",
        stats.queries, stats.hits, stats.elapsed_sec, qps
    )?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = fuzzdex::args::perf_args();
    let index_path = matches
        .get_one::<String>("index")
        .expect("index file is required");
    let query_paths: Vec<&String> = matches
        .get_many::<String>("queries")
        .expect("query files are required")
        .collect();
    let k = *matches.get_one::<u32>("distance").expect("has default");
    let dataset_override = matches.get_one::<String>("dataset");
    let records_dir = matches
        .get_one::<String>("records-dir")
        .expect("has default");

    let file = File::open(index_path).with_context(|| format!("cannot open {index_path}"))?;
    let index = read_index(&mut BufReader::new(file))
        .with_context(|| format!("failed to load index from {index_path}"))?;

    let mut by_dataset: FxHashMap<String, BatchStats> = FxHashMap::default();

    for query_path in query_paths {
        let file =
            File::open(query_path).with_context(|| format!("cannot open {query_path}"))?;
        let queries: Vec<String> = BufReader::new(file)
            .lines()
            .map(|line| line.map(|l| l.trim_end_matches('\r').to_string()))
            .collect::<std::io::Result<_>>()
            .with_context(|| format!("error reading {query_path}"))?;

        let mut searcher = index.searcher();
        let started = Instant::now();
        let hits = queries
            .iter()
            .filter(|q| searcher.search(q.as_bytes(), k))
            .count();
        let elapsed_sec = started.elapsed().as_secs_f64();

        let dataset = dataset_override
            .cloned()
            .unwrap_or_else(|| derive_dataset(query_path));
        let entry = by_dataset.entry(dataset).or_default();
        entry.queries += queries.len();
        entry.hits += hits;
        entry.elapsed_sec += elapsed_sec;
    }

    for (dataset, stats) in &by_dataset {
        println!(
            "{dataset}: {} hits / {} queries in {:.6}s",
            stats.hits, stats.queries, stats.elapsed_sec
        );
        append_record(records_dir, dataset, stats)?;
    }
    Ok(())
}
