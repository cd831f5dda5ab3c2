use anyhow::bail;
use clap::Parser;
use core::time::Duration;
use numpool::{
    DEFAULT_EVEN_ACTIVATION_THRESHOLD, DEFAULT_MAX_ENTRIES, EngineConfig, EvenActivation,
};

/// Runtime configuration for the `numpool` binary.
///
/// Every flag can also be set through the environment variable named below
/// it, or through a `.env` file in the working directory. The defaults match
/// a full-size run.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "numpool",
    version,
    about = "Fills a bounded pool with odd, even and negated-prime integers, then sorts it"
)]
pub struct CliArgs {
    /// Hard cap on the number of values in the pool.
    ///
    /// Environment variable: `MAX_ENTRIES`
    #[arg(long, env = "MAX_ENTRIES", default_value_t = DEFAULT_MAX_ENTRIES)]
    pub max_entries: usize,

    /// Pool size at which the even producer is activated.
    ///
    /// A value above `MAX_ENTRIES` keeps the even producer off for the whole
    /// run, unless `--eager-even` is set.
    ///
    /// Environment variable: `EVEN_THRESHOLD`
    #[arg(long, env = "EVEN_THRESHOLD", default_value_t = DEFAULT_EVEN_ACTIVATION_THRESHOLD)]
    pub even_threshold: usize,

    /// Wall-clock budget for the run, in milliseconds.
    ///
    /// Environment variable: `TIMEOUT_MS`
    #[arg(long, env = "TIMEOUT_MS", default_value_t = 300_000)]
    pub timeout_ms: u64,

    /// Back-off after each producer iteration, in milliseconds.
    ///
    /// Environment variable: `PRODUCER_INTERVAL_MS`
    #[arg(long, env = "PRODUCER_INTERVAL_MS", default_value_t = 10)]
    pub producer_interval_ms: u64,

    /// How often the coordinator checks the pool, in milliseconds.
    ///
    /// Environment variable: `POLL_INTERVAL_MS`
    #[arg(long, env = "POLL_INTERVAL_MS", default_value_t = 10)]
    pub poll_interval_ms: u64,

    /// Launch one even producer at start instead of waiting for the
    /// threshold.
    ///
    /// Environment variable: `EAGER_EVEN`
    #[arg(long, env = "EAGER_EVEN", default_value_t = false)]
    pub eager_even: bool,

    /// Hand the sorted pool to an in-memory sink after the run and report
    /// how many records were saved.
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Print the run summary as JSON instead of text.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub save: bool,
    pub json: bool,
}

impl TryFrom<CliArgs> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.max_entries == 0 {
            bail!("MAX_ENTRIES must be greater than 0");
        }

        if args.timeout_ms == 0 {
            bail!("TIMEOUT_MS must be greater than 0");
        }

        if args.producer_interval_ms == 0 || args.poll_interval_ms == 0 {
            bail!(
                "PRODUCER_INTERVAL_MS ({}) and POLL_INTERVAL_MS ({}) must both be greater than 0",
                args.producer_interval_ms,
                args.poll_interval_ms
            );
        }

        let even_activation = if args.eager_even {
            EvenActivation::Eager
        } else {
            EvenActivation::Deferred
        };

        let engine = EngineConfig::default()
            .with_max_entries(args.max_entries)
            .with_even_activation_threshold(args.even_threshold)
            .with_timeout(Duration::from_millis(args.timeout_ms))
            .with_producer_interval(Duration::from_millis(args.producer_interval_ms))
            .with_poll_interval(Duration::from_millis(args.poll_interval_ms))
            .with_even_activation(even_activation);
        engine.validate()?;

        Ok(Self {
            engine,
            save: args.save,
            json: args.json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(core::iter::once("numpool").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn maps_flags_onto_the_engine_config() {
        let args = parse(&[
            "--max-entries",
            "500",
            "--even-threshold",
            "100",
            "--timeout-ms",
            "2000",
            "--producer-interval-ms",
            "1",
            "--poll-interval-ms",
            "5",
            "--eager-even",
            "--json",
        ]);
        let config = AppConfig::try_from(args).unwrap();

        assert_eq!(config.engine.max_entries, 500);
        assert_eq!(config.engine.even_activation_threshold, 100);
        assert_eq!(config.engine.timeout, Duration::from_secs(2));
        assert_eq!(config.engine.producer_interval, Duration::from_millis(1));
        assert_eq!(config.engine.poll_interval, Duration::from_millis(5));
        assert_eq!(config.engine.even_activation, EvenActivation::Eager);
        assert!(config.json);
        assert!(!config.save);
    }

    #[test]
    fn rejects_zero_max_entries() {
        let err = AppConfig::try_from(parse(&["--max-entries", "0"])).unwrap_err();
        assert_eq!(err.to_string(), "MAX_ENTRIES must be greater than 0");
    }

    #[test]
    fn rejects_zero_intervals() {
        assert!(AppConfig::try_from(parse(&["--poll-interval-ms", "0"])).is_err());
        assert!(AppConfig::try_from(parse(&["--producer-interval-ms", "0"])).is_err());
        assert!(AppConfig::try_from(parse(&["--timeout-ms", "0"])).is_err());
    }

    #[test]
    fn rejects_non_numeric_input() {
        let result = CliArgs::try_parse_from(["numpool", "--max-entries", "lots"]);
        assert!(result.is_err());
    }
}
