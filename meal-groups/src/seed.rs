use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AUTO_SEED_MODULUS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedSource {
    /// Typed in by the user.
    Manual,
    /// Derived from the clock because no seed was given.
    Automatic,
}

/// The seed a draw actually used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSeed {
    pub value: u64,
    pub source: SeedSource,
}

impl ResolvedSeed {
    pub fn manual(value: u64) -> Self {
        ResolvedSeed { value, source: SeedSource::Manual }
    }
}

/// Turns optional user input into a seed, using the current time when the
/// input is missing or blank.
pub fn resolve_seed(input: Option<&str>) -> ResolvedSeed {
    resolve_seed_at(input, Utc::now())
}

pub fn resolve_seed_at(input: Option<&str>, now: DateTime<Utc>) -> ResolvedSeed {
    let trimmed = input.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return ResolvedSeed {
            value: automatic_seed(now),
            source: SeedSource::Automatic,
        };
    }
    let value = trimmed.parse::<u64>().unwrap_or_else(|_| text_seed(trimmed));
    ResolvedSeed::manual(value)
}

pub fn automatic_seed(now: DateTime<Utc>) -> u64 {
    now.timestamp_millis().rem_euclid(AUTO_SEED_MODULUS) as u64
}

/// 64-bit FNV-1a, so a word typed as seed maps to the same number everywhere.
pub fn text_seed(text: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    text.bytes()
        .fold(OFFSET_BASIS, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}
