//! Command line interface.
//!
//! `healthz single` probes once and exits 0/1; `healthz loop` retries with
//! capped exponential backoff until the endpoint is healthy. Durations
//! accept `500ms`, `5s`, `2m`, or a bare number of seconds.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

/// healthz: test if an endpoint is healthy
#[derive(Parser, Debug)]
#[command(name = "healthz", version, about)]
pub struct Cli {
    /// Log level filter (e.g. "healthz=debug")
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Test once if an endpoint is healthy
    Single(ProbeArgs),
    /// Continuously test an endpoint until it is healthy
    Loop(LoopArgs),
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// TCP/HTTP(S) endpoint URL, for example tcp://example:4000
    #[arg(short, long)]
    pub endpoint: String,

    /// Connection timeout per attempt
    #[arg(short, long, default_value = "5s", value_parser = parse_duration)]
    pub timeout: Duration,
}

#[derive(Args, Debug)]
pub struct LoopArgs {
    #[command(flatten)]
    pub probe: ProbeArgs,

    /// Rate at which to back off from retries, must be >= 1
    #[arg(short, long, default_value_t = 1.0, value_parser = parse_backoff)]
    pub backoff: f64,

    /// Minimum time to wait before retrying
    #[arg(short, long, default_value = "1s", value_parser = parse_duration)]
    pub min: Duration,

    /// Maximum time to wait before retrying
    #[arg(short = 'x', long, default_value = "120s", value_parser = parse_duration)]
    pub max: Duration,

    /// Give up after this many failed attempts (default: retry forever)
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

/// Parse a duration like "500ms", "5s", "2m", or "10" (seconds).
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let parsed = if let Some(ms) = s.strip_suffix("ms") {
        ms.parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| Duration::from_secs(m * 60))
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    };
    parsed.ok_or_else(|| format!("invalid duration `{s}` (expected e.g. 500ms, 5s, 2m)"))
}

/// Parse the backoff multiplier, rejecting values below 1.0 which would
/// make the delay shrink instead of grow.
fn parse_backoff(s: &str) -> Result<f64, String> {
    let factor: f64 = s
        .parse()
        .map_err(|_| format!("invalid backoff multiplier `{s}`"))?;
    if factor < 1.0 {
        return Err(format!("backoff multiplier must be >= 1.0, got {factor}"));
    }
    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("5s"), Ok(Duration::from_secs(5)));
        assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse_duration("10"), Ok(Duration::from_secs(10)));
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert!(parse_duration("fast").is_err());
        assert!(parse_duration("1.5s").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn parse_backoff_accepts_one_and_above() {
        assert_eq!(parse_backoff("1.0"), Ok(1.0));
        assert_eq!(parse_backoff("2.5"), Ok(2.5));
    }

    #[test]
    fn parse_backoff_rejects_below_one() {
        assert!(parse_backoff("0.5").unwrap_err().contains(">= 1.0"));
        assert!(parse_backoff("nope").is_err());
    }

    #[test]
    fn single_defaults() {
        let cli = Cli::try_parse_from(["healthz", "single", "-e", "tcp://db:5432"]).unwrap();
        match cli.command {
            Command::Single(args) => {
                assert_eq!(args.endpoint, "tcp://db:5432");
                assert_eq!(args.timeout, Duration::from_secs(5));
            }
            other => panic!("expected single, got {other:?}"),
        }
    }

    #[test]
    fn loop_defaults() {
        let cli = Cli::try_parse_from(["healthz", "loop", "-e", "http://api/health"]).unwrap();
        match cli.command {
            Command::Loop(args) => {
                assert_eq!(args.backoff, 1.0);
                assert_eq!(args.min, Duration::from_secs(1));
                assert_eq!(args.max, Duration::from_secs(120));
                assert_eq!(args.max_attempts, None);
            }
            other => panic!("expected loop, got {other:?}"),
        }
    }

    #[test]
    fn loop_short_flags() {
        let cli = Cli::try_parse_from([
            "healthz", "loop", "-e", "tcp://db:5432", "-t", "2s", "-b", "2.0", "-m", "500ms",
            "-x", "30s",
        ])
        .unwrap();
        match cli.command {
            Command::Loop(args) => {
                assert_eq!(args.probe.timeout, Duration::from_secs(2));
                assert_eq!(args.backoff, 2.0);
                assert_eq!(args.min, Duration::from_millis(500));
                assert_eq!(args.max, Duration::from_secs(30));
            }
            other => panic!("expected loop, got {other:?}"),
        }
    }

    #[test]
    fn loop_rejects_shrinking_backoff() {
        let err = Cli::try_parse_from(["healthz", "loop", "-e", "tcp://db:5432", "-b", "0.9"]);
        assert!(err.is_err());
    }
}
