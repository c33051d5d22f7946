#![allow(dead_code)]

use std::sync::Once;

use tempri_common::io::GraphReader;
use tempri_common::{Config, ConfigBuilder, TemporalGraph};

use crate::TemporalMatcher;

static INIT: Once = Once::new();

/// Configures logging for the test runner.
pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Specification for a temporal matching test over inline graph texts.
#[derive(Default)]
pub struct TestSpec<'a> {
    /// Target graph in the text format read by [`GraphReader`].
    pub target: &'a str,
    /// Query graph in the same format.
    pub query: &'a str,
    /// Number of occurrences expected.
    pub expected_count: u64,
    /// Optional configuration builder to override defaults.
    pub config_fn: Option<fn(ConfigBuilder) -> ConfigBuilder>,
}

/// Load both graphs through one reader (shared labels) with pattern pruning,
/// run the matcher and compare the count.
#[track_caller]
pub fn run_count_test(spec: TestSpec) -> Result<(), Box<dyn std::error::Error>> {
    setup_test_logging();

    let mut builder = Config::builder();
    if let Some(f) = spec.config_fn {
        builder = f(builder);
    }
    let config = builder.build();

    let mut reader = GraphReader::new();
    let query: TemporalGraph = reader.parse_str(spec.query, None, config.directed)?;
    let target: TemporalGraph = reader.parse_str(spec.target, Some(&query), config.directed)?;

    let found = TemporalMatcher::new(&query, &target, &config)?.count();
    if found != spec.expected_count {
        tracing::error!(
            "expected {} occurrences, found {}\nquery:\n{}\ntarget:\n{}",
            spec.expected_count,
            found,
            query,
            target
        );
        return Err(format!("expected {} occurrences, found {found}", spec.expected_count).into());
    }
    Ok(())
}

/// Defines a counting test for the temporal matcher.
#[macro_export]
macro_rules! temporal_query_test {
    (
        name: $test_name:ident,
        query: $query:expr,
        target: $target:expr,
        expect: $count:expr
    ) => {
        #[test]
        fn $test_name() -> Result<(), Box<dyn std::error::Error>> {
            $crate::test_harness::run_count_test($crate::test_harness::TestSpec {
                target: $target,
                query: $query,
                expected_count: $count,
                ..Default::default()
            })
        }
    };

    (
        name: $test_name:ident,
        query: $query:expr,
        target: $target:expr,
        expect: $count:expr,
        config: $cfg_closure:expr
    ) => {
        #[test]
        fn $test_name() -> Result<(), Box<dyn std::error::Error>> {
            $crate::test_harness::run_count_test($crate::test_harness::TestSpec {
                target: $target,
                query: $query,
                expected_count: $count,
                config_fn: Some($cfg_closure),
            })
        }
    };
}
