use std::path::PathBuf;

use clap::Parser;
use tempri_common::{Config, Delta, Timestamp};

/// Temporal subgraph matcher - count or list the occurrences of a temporal
/// query graph in a target graph
#[derive(Parser, Debug)]
#[command(name = "tempri")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the target graph file
    #[arg(short = 't', long)]
    pub target: PathBuf,

    /// Path to the query graph file
    #[arg(short = 'q', long)]
    pub query: PathBuf,

    /// Maximum timestamp span of an occurrence (unbounded if omitted)
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    pub delta: Option<Timestamp>,

    /// Treat both graphs as undirected
    #[arg(short = 'u', long, default_value_t = false)]
    pub undirected: bool,

    /// Print every occurrence instead of only counting
    #[arg(short = 'o', long, default_value_t = false)]
    pub dump: bool,

    /// Split the search over root candidates in parallel
    #[arg(short = 'p', long, default_value_t = false)]
    pub parallel: bool,

    /// Cancel the search after this many seconds and report the partial count
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Append a row of run statistics to this CSV file
    #[arg(long)]
    pub stats_csv: Option<PathBuf>,
}

impl Args {
    /// Convert command-line arguments into internal configuration
    pub fn to_config(&self) -> Config {
        Config::builder()
            .delta(Delta::from_option(self.delta))
            .directed(!self.undirected)
            .dump(self.dump)
            .parallel(self.parallel)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_count_directed_unbounded() {
        let args = Args::try_parse_from(["tempri", "-t", "g.txt", "-q", "q.txt"]).unwrap();
        assert_eq!(args.to_config(), Config::default());
    }

    #[test]
    fn flags_map_onto_config() {
        let args = Args::try_parse_from([
            "tempri", "-t", "g.txt", "-q", "q.txt", "-d", "30", "-u", "-o", "-p",
        ])
        .unwrap();
        let cfg = args.to_config();
        assert_eq!(cfg.delta, Delta::Within(30));
        assert!(!cfg.directed);
        assert!(cfg.dump);
        assert!(cfg.parallel);
    }

    #[test]
    fn negative_delta_is_accepted() {
        let args = Args::try_parse_from(["tempri", "-t", "g", "-q", "q", "-d", "-4"]).unwrap();
        assert_eq!(args.to_config().delta, Delta::Within(-4));
    }

    #[test]
    fn missing_or_unknown_flags_are_rejected() {
        assert!(Args::try_parse_from(["tempri", "-t", "g.txt"]).is_err());
        assert!(Args::try_parse_from(["tempri", "-t", "g", "-q", "q", "--bogus"]).is_err());
    }
}
