//! Defaults and bounds shared by the terminal and web front ends.

use std::ops::RangeInclusive;

use crate::error::{DrawError, DrawResult};

/// Attempts per draw when the caller does not say otherwise.
pub const DEFAULT_MAX_ATTEMPTS: usize = 2000;

/// Attempt counts accepted from the web form.
pub const WEB_ATTEMPTS_RANGE: RangeInclusive<usize> = 500..=5000;

/// Automatic seeds are the wall clock in milliseconds modulo this, short
/// enough to read out and type back in.
pub const AUTO_SEED_MODULUS: i64 = 1_000_000;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Draws kept in memory by the web server for export.
pub const DRAW_ARCHIVE_CAPACITY: usize = 64;

/// Settings of the web server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub bind: String,
    pub port: u16,
    pub archive_capacity: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            archive_capacity: DRAW_ARCHIVE_CAPACITY,
        }
    }
}

/// Checks an attempt count coming from the web form.
pub fn web_attempts(requested: Option<usize>) -> DrawResult<usize> {
    let attempts = requested.unwrap_or(DEFAULT_MAX_ATTEMPTS);
    if !WEB_ATTEMPTS_RANGE.contains(&attempts) {
        return Err(DrawError::InvalidConfig(format!(
            "max_attempts must be between {} and {}",
            WEB_ATTEMPTS_RANGE.start(),
            WEB_ATTEMPTS_RANGE.end()
        )));
    }
    Ok(attempts)
}
