//! Engine configuration that pipelines carry from construction to every stage.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What `single_or_default` does when more than one element matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultipleMatchPolicy {
    /// Surface `MultipleMatches`, same as `single`.
    #[default]
    Raise,
    /// Treat an ambiguous match like no match and return the absent value.
    Absent,
}

impl MultipleMatchPolicy {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raise" => Some(Self::Raise),
            "absent" => Some(Self::Absent),
            _ => None,
        }
    }
}

/// Upper bound on what a buffered stage reserves up front; larger inputs grow
/// the table as it fills. Unbounded sources report a lower size bound of
/// `usize::MAX`, which must never reach an allocator.
pub const MAX_PREALLOC: usize = 1 << 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial capacity for seen-sets and join indexes. `None` lets the
    /// buffered stage size itself from the input's size hint. Either way the
    /// reservation is capped at `MAX_PREALLOC`.
    pub hash_capacity_hint: Option<usize>,

    /// Multiple-match behaviour of `single_or_default`.
    pub single_or_default: MultipleMatchPolicy,

    /// Emit tracing events when buffered stages materialize and when element
    /// selection misses. Only has an effect with the `tracing` feature.
    pub trace_operators: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hash_capacity_hint: None,
            single_or_default: MultipleMatchPolicy::Raise,
            trace_operators: false,
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `SEQUERY_HASH_CAPACITY_HINT`: initial hash capacity, capped at
    ///   `MAX_PREALLOC`
    /// - `SEQUERY_SINGLE_OR_DEFAULT`: `raise` or `absent`
    /// - `SEQUERY_TRACE_OPERATORS`: `true`/`false`/`1`/`0`
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("SEQUERY_HASH_CAPACITY_HINT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.hash_capacity_hint = Some(v.min(MAX_PREALLOC)).filter(|v| *v > 0);
            }
        }

        if let Ok(s) = std::env::var("SEQUERY_SINGLE_OR_DEFAULT") {
            if let Some(policy) = MultipleMatchPolicy::parse(&s) {
                cfg.single_or_default = policy;
            }
        }

        if let Ok(s) = std::env::var("SEQUERY_TRACE_OPERATORS") {
            if let Some(v) = parse_flag(&s) {
                cfg.trace_operators = v;
            }
        }

        cfg
    }

    /// Parse a JSON document; missing fields take their defaults. A capacity
    /// hint above `MAX_PREALLOC` is clamped to it.
    pub fn from_json(s: &str) -> Result<Self> {
        let mut cfg: Self = serde_json::from_str(s)?;
        match cfg.hash_capacity_hint {
            Some(0) => {
                return Err(Error::Config(
                    "hash_capacity_hint must be positive when set".into(),
                ));
            }
            Some(v) => cfg.hash_capacity_hint = Some(v.min(MAX_PREALLOC)),
            None => {}
        }
        Ok(cfg)
    }

    /// Capacity to reserve for a hash structure that will receive roughly
    /// `expected` entries, never more than `MAX_PREALLOC`.
    pub fn hash_capacity(&self, expected: usize) -> usize {
        self.hash_capacity_hint.unwrap_or(expected).min(MAX_PREALLOC)
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
