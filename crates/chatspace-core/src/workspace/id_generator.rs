//! Workspace id generation.
//!
//! The editor never builds ids itself; it asks an injected generator and
//! checks the answer against the reserved id and the ids already saved.

use std::str::FromStr;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::model::{EVERYTHING_WORKSPACE_ID, Workspace};
use crate::error::{ChatspaceError, Result};

/// How many candidates [`generate_unique_id`] tries before giving up.
const MAX_ID_ATTEMPTS: usize = 16;

/// Source of fresh workspace ids.
pub trait WorkspaceIdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Epoch-millisecond ids, strictly increasing within one process.
///
/// Two calls in the same millisecond get consecutive values instead of the
/// same one.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    last: AtomicI64,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkspaceIdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self.last.compare_exchange_weak(
                last,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate.to_string(),
                Err(actual) => last = actual,
            }
        }
    }
}

/// Random UUID v4 ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl WorkspaceIdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Counter ids `"1"`, `"2"`, ... for deterministic tests.
#[derive(Debug)]
pub struct SequenceIdGenerator {
    next: AtomicU64,
}

impl SequenceIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Starts the sequence at `first`. A start of 0 still yields `"0"` once,
    /// which [`generate_unique_id`] skips.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequenceIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceIdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Which generator a host should build, as named in configuration.
///
/// [`SequenceIdGenerator`] is left out: it restarts at 1 in every process.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Timestamp,
    Uuid,
}

impl IdStrategy {
    pub fn build(self) -> Box<dyn WorkspaceIdGenerator> {
        match self {
            IdStrategy::Timestamp => Box::new(TimestampIdGenerator::new()),
            IdStrategy::Uuid => Box::new(UuidIdGenerator),
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        IdStrategy::from_str(value)
            .map_err(|_| ChatspaceError::config(format!("unknown id strategy '{}'", value)))
    }
}

/// Draws ids from `generator` until one is neither reserved nor taken.
pub fn generate_unique_id(
    generator: &dyn WorkspaceIdGenerator,
    existing: &[Workspace],
) -> Result<String> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = generator.next_id();
        let reserved = candidate.is_empty() || candidate == EVERYTHING_WORKSPACE_ID;
        if !reserved && !existing.iter().any(|w| w.id == candidate) {
            return Ok(candidate);
        }
    }
    Err(ChatspaceError::internal(format!(
        "could not generate a unique workspace id after {} attempts",
        MAX_ID_ATTEMPTS
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FixedIdGenerator(&'static str);

    impl WorkspaceIdGenerator for FixedIdGenerator {
        fn next_id(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_timestamp_ids_strictly_increase() {
        let generator = TimestampIdGenerator::new();
        let ids: Vec<i64> = (0..100)
            .map(|_| generator.next_id().parse().unwrap())
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(ids[0] > 0);
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let generator = UuidIdGenerator;
        let ids: HashSet<String> = (0..50).map(|_| generator.next_id()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_sequence_starts_at_one() {
        let generator = SequenceIdGenerator::new();
        assert_eq!(generator.next_id(), "1");
        assert_eq!(generator.next_id(), "2");
    }

    #[test]
    fn test_unique_id_skips_reserved_id() {
        let generator = SequenceIdGenerator::starting_at(0);
        let id = generate_unique_id(&generator, &[]).unwrap();
        assert_eq!(id, "1");
    }

    #[test]
    fn test_unique_id_skips_existing_ids() {
        let generator = SequenceIdGenerator::new();
        let existing = vec![
            Workspace::new("1", "A", vec![1]),
            Workspace::new("2", "B", vec![1]),
        ];
        assert_eq!(generate_unique_id(&generator, &existing).unwrap(), "3");
    }

    #[test]
    fn test_unique_id_gives_up_on_stuck_generator() {
        let err = generate_unique_id(&FixedIdGenerator("0"), &[]).unwrap_err();
        assert!(matches!(err, ChatspaceError::Internal(_)));
    }

    #[test]
    fn test_id_strategy_parse() {
        assert_eq!(IdStrategy::parse("uuid").unwrap(), IdStrategy::Uuid);
        assert_eq!(IdStrategy::parse("timestamp").unwrap(), IdStrategy::Timestamp);
        assert!(IdStrategy::parse("sequence").is_err());
        assert_eq!(IdStrategy::Uuid.to_string(), "uuid");
    }

    #[test]
    fn test_id_strategy_build() {
        let generator = IdStrategy::Timestamp.build();
        assert!(generator.next_id().parse::<i64>().is_ok());
        let generator = IdStrategy::Uuid.build();
        assert!(uuid::Uuid::parse_str(&generator.next_id()).is_ok());
    }
}
