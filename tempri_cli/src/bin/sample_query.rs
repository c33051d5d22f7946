//! Extracts random connected queries from a graph, for benchmarking the
//! matcher.

use std::path::{Path, PathBuf};

use clap::Parser;
use tempri_common::io::{GraphReader, GraphWriter};
use tempri_common::sampling::extract_random_subgraph;
use tracing::{info, warn};

/// Random query extractor - write connected subgraphs of a graph with fresh
/// timestamps
#[derive(Parser, Debug)]
#[command(name = "tempri_sample")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph to sample from
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Number of edges in each query
    #[arg(short = 'n', long)]
    edges: usize,

    /// Output file; further queries go to `<output>.1`, `<output>.2`, ...
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Treat the graph as undirected
    #[arg(short = 'u', long, default_value_t = false)]
    undirected: bool,

    /// Seed of the first query; query `k` uses `seed + k`
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of queries to extract
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Seeds tried per query before giving up
    #[arg(long, default_value_t = 100)]
    attempts: u64,
}

fn output_path(base: &Path, k: usize) -> PathBuf {
    if k == 0 {
        return base.to_path_buf();
    }
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{k}"));
    PathBuf::from(name)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut reader = GraphReader::new();
    let graph = reader.read_graph(&args.input, None, !args.undirected)?;
    let writer = GraphWriter::new(reader.labels());

    let mut seed = args.seed;
    for k in 0..args.count {
        let last = seed.saturating_add(args.attempts);
        let query = loop {
            if seed >= last {
                break None;
            }
            let found = extract_random_subgraph(&graph, args.edges, seed);
            seed += 1;
            if found.is_some() {
                break found;
            }
        };
        let Some(query) = query else {
            warn!(
                "no connected {}-edge query found in {} attempts; stopping after {k} queries",
                args.edges, args.attempts
            );
            break;
        };
        let path = output_path(&args.output, k);
        writer.write_query(&query, &path)?;
        info!(
            "query {k}: {} nodes, {} edges -> '{}'",
            query.num_nodes(),
            query.num_edges(),
            path.display()
        );
    }
    Ok(())
}
