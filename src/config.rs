//! Configuration Module
//!
//! Server configuration from command-line flags, with environment variable
//! fallbacks and sensible defaults.

use std::time::Duration;

use clap::Parser;
use tracing::Level;

/// Server configuration parameters.
///
/// Every flag falls back to an environment variable, then to a default.
#[derive(Debug, Clone, Parser)]
#[command(name = "lru_cache_server", version, about = "In-memory LRU cache server with TTL expiry")]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "SERVER_HOST_PORT", default_value = "localhost:8080")]
    pub server_host_port: String,

    /// Maximum number of entries the cache can hold (0 stores nothing)
    #[arg(long, env = "CACHE_SIZE", default_value_t = 10)]
    pub cache_size: usize,

    /// TTL applied when a request does not specify one (e.g. `1m`, `90s`, `1h30m`)
    #[arg(long, env = "DEFAULT_CACHE_TTL", default_value = "1m", value_parser = parse_duration)]
    pub default_cache_ttl: Duration,

    /// Log verbosity: debug, info, warn or error
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Period of the background expiry sweep; `0s` disables it
    #[arg(long, env = "CLEANUP_INTERVAL", default_value = "0s", value_parser = parse_duration)]
    pub cleanup_interval: Duration,

    /// How long shutdown waits for in-flight requests before dropping them
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value = "10s", value_parser = parse_duration)]
    pub shutdown_timeout: Duration,
}

impl Config {
    /// Maps the configured log level onto a tracing level.
    ///
    /// Returns `None` for unrecognized names; callers fall back to `WARN`.
    pub fn tracing_level(&self) -> Option<Level> {
        match self.log_level.to_ascii_lowercase().as_str() {
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }

    /// Returns true when the periodic expiry sweep should run.
    pub fn cleanup_enabled(&self) -> bool {
        !self.cleanup_interval.is_zero()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host_port: "localhost:8080".to_string(),
            cache_size: 10,
            default_cache_ttl: Duration::from_secs(60),
            log_level: "warn".to_string(),
            cleanup_interval: Duration::ZERO,
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

// == Duration Parsing ==
/// Parses a duration written as a sequence of `<number><unit>` pairs.
///
/// Units: `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`. Fractions are allowed
/// (`1.5h`) and pairs add up (`1m30s`). A bare integer is read as seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty duration".to_string());
    }
    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let is_number_char = |c: char| c.is_ascii_digit() || c == '.';
    let mut total = Duration::ZERO;
    let mut rest = trimmed;

    while !rest.is_empty() {
        let number_len = rest.find(|c| !is_number_char(c)).unwrap_or(rest.len());
        if number_len == 0 {
            return Err(format!("invalid duration '{input}': expected a number"));
        }
        let (number, tail) = rest.split_at(number_len);
        let unit_len = tail.find(is_number_char).unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid duration '{input}': bad number '{number}'"))?;
        let unit_secs = match unit {
            "ns" => 1e-9,
            "us" | "µs" => 1e-6,
            "ms" => 1e-3,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            "" => return Err(format!("invalid duration '{input}': missing unit after '{number}'")),
            other => return Err(format!("invalid duration '{input}': unknown unit '{other}'")),
        };

        let part = Duration::try_from_secs_f64(value * unit_secs)
            .map_err(|e| format!("invalid duration '{input}': {e}"))?;
        total = total
            .checked_add(part)
            .ok_or_else(|| format!("invalid duration '{input}': overflow"))?;
        rest = tail;
    }

    Ok(total)
}
