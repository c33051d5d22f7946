//! Temporal subgraph matcher CLI
//!
//! Loads a query and a target graph, counts the temporal occurrences of the
//! query in the target and optionally prints each of them.

#[cfg(feature = "jemalloc")]
#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;
mod stats;

use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use tempri_common::io::{GraphReader, OccurrenceFormatter};
use tempri_subgraph::{Occurrence, SearchControl, TemporalMatcher};
use tracing::{info, warn};

use args::Args;
use stats::RunStats;

/// Cancel `control` once `after` has elapsed.
fn spawn_watchdog(control: SearchControl, after: Duration) {
    thread::spawn(move || {
        thread::sleep(after);
        let snap = control.snapshot();
        warn!(
            "timeout after {:?}: {} of {} roots scanned, {} occurrences so far",
            after, snap.scanned_roots, snap.total_roots, snap.occurrences
        );
        control.cancel();
    });
}

/// Runs the matcher.
///
/// 1. Initializes logging
/// 2. Parses command-line arguments
/// 3. Loads the query, then the target pruned to the query's labels
/// 4. Counts (or prints) the occurrences
/// 5. Reports timings and optionally appends them to a CSV file
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let config = args.to_config();
    #[cfg(not(feature = "rayon"))]
    if config.parallel {
        warn!("built without the `rayon` feature; searching sequentially");
    }

    let total = Instant::now();
    let mut reader = GraphReader::new();
    info!("reading query '{}'", args.query.display());
    let query = reader.read_graph(&args.query, None, config.directed)?;
    info!("reading target '{}'", args.target.display());
    let target = reader.read_graph(&args.target, Some(&query), config.directed)?;
    let read_secs = total.elapsed().as_secs_f64();
    println!("Time for reading: {read_secs:.3} secs");

    let control = SearchControl::new();
    if let Some(secs) = args.timeout {
        spawn_watchdog(control.clone(), Duration::from_secs(secs));
    }
    let matcher = TemporalMatcher::new(&query, &target, &config)?.with_control(control.clone());

    let started = Instant::now();
    let occurrences = if config.dump {
        let formatter = OccurrenceFormatter::with_labels(reader.labels());
        println!("Nodes\tEdges");
        let mut print = |occurrence: Occurrence| println!("{}", formatter.format(occurrence.graph()));
        matcher.enumerate_with(&mut print)
    } else {
        matcher.count()
    };
    let match_secs = started.elapsed().as_secs_f64();

    let cancelled = control.is_cancelled();
    if cancelled {
        warn!("search cancelled; the count below is partial");
    }
    println!("Time for matching: {match_secs:.3} secs");
    println!("Total time: {:.3} secs", total.elapsed().as_secs_f64());
    println!("Number of occurrences: {occurrences}");

    #[cfg(feature = "profiling")]
    tempri_subgraph::profiling::report();

    if let Some(path) = &args.stats_csv {
        RunStats {
            target: args.target.display().to_string(),
            query: args.query.display().to_string(),
            delta: config.delta.to_string(),
            directed: config.directed,
            occurrences,
            cancelled,
            read_secs,
            match_secs,
        }
        .append_to(path)?;
        info!("appended run statistics to '{}'", path.display());
    }

    Ok(())
}
