//! # Graph Drill - Core Library
//!
//! Mastery-based graph theory drill.
//!
//! Each round the engine generates a random sparse graph over a fixed
//! vertex alphabet, asks the learner a structural question about it
//! (node count, cardinality, degree, edge existence), grades the
//! free-text answer against the computed ground truth, and tracks a
//! rolling window of correctness to decide when mastery is reached.
//!
//! ## Design Philosophy
//! - The graph engine is the core: one edge list, two derived caches
//!   (adjacency list and matrix), never allowed to diverge.
//! - Invalid edges are silently rejected, not errors. Generation must be
//!   robust against randomly chosen invalid candidates.
//! - Everything is deterministic given the rng seed.
//! - Single-threaded and synchronous: every operation runs to completion
//!   in response to a discrete trigger (round start, answer submission).

pub mod graph;
pub mod mastery;
pub mod question;
pub mod session;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use graph::generator::TopologyEntry;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Unified error type for the drill.
#[derive(Error, Debug)]
pub enum DrillError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Graph generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type DrillResult<T> = Result<T, DrillError>;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Top-level configuration for the drill.
///
/// Loaded from `graph-drill.toml` in the working directory or a path
/// supplied via CLI flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Mastery window settings.
    pub mastery: MasteryConfig,

    /// Graph generation settings.
    pub graph: GraphGenConfig,

    /// Optional custom candidate-neighbor topology. When absent, the
    /// built-in 9-vertex base topology is used. Loaded once at startup,
    /// immutable thereafter.
    pub topology: Option<Vec<TopologyEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryConfig {
    /// How many correct answers establish mastery.
    pub numerator: u32,

    /// Out of how many recent attempts (the history window length).
    pub denominator: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphGenConfig {
    /// Undirected semantics: edges are mirrored at insertion, and degree /
    /// cardinality are computed over logical (two-way) edges.
    pub undirected: bool,

    /// Maximum edge cost. Costs are drawn uniformly from [0, max_cost].
    pub max_cost: u32,

    /// Fixed rng seed for reproducible sessions. None = seed from entropy.
    pub seed: Option<u64>,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            mastery: MasteryConfig {
                numerator: 4,
                denominator: 5,
            },
            graph: GraphGenConfig {
                undirected: true,
                max_cost: 9,
                seed: None,
            },
            topology: None,
        }
    }
}

impl DrillConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> DrillResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DrillConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default configuration to a TOML file.
    pub fn write_default(path: &std::path::Path) -> DrillResult<()> {
        let config = Self::default();
        let content =
            toml::to_string_pretty(&config).map_err(|e| DrillError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject configurations the engine cannot honor.
    pub fn validate(&self) -> DrillResult<()> {
        if self.mastery.denominator == 0 {
            return Err(DrillError::Config(
                "mastery.denominator must be at least 1".to_string(),
            ));
        }
        if self.mastery.numerator == 0 || self.mastery.numerator > self.mastery.denominator {
            return Err(DrillError::Config(format!(
                "mastery.numerator must be in [1, {}], got {}",
                self.mastery.denominator, self.mastery.numerator
            )));
        }
        if let Some(entries) = &self.topology {
            if entries.is_empty() {
                return Err(DrillError::Config(
                    "custom topology must name at least one vertex".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Core Types
// ---------------------------------------------------------------------------

/// Outcome of grading a single submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// A single computed ground-truth answer.
///
/// Questions produce a small ordered list of these so compound
/// (multi-part) questions are handled uniformly by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerValue {
    /// An integer answer (counts, degrees, cardinality).
    Count(u32),
    /// A yes/no answer (edge existence).
    Truth(bool),
}

impl AnswerValue {
    /// Lenient comparison against a learner's free-text submission.
    ///
    /// Counts accept any string that parses to the same integer.
    /// Truths accept yes/no, y/n, and true/false, case-insensitively.
    pub fn matches(&self, submission: &str) -> bool {
        let text = submission.trim();
        match self {
            AnswerValue::Count(n) => text.parse::<u32>().map(|v| v == *n).unwrap_or(false),
            AnswerValue::Truth(b) => {
                let lowered = text.to_ascii_lowercase();
                match lowered.as_str() {
                    "yes" | "y" | "true" => *b,
                    "no" | "n" | "false" => !*b,
                    _ => false,
                }
            }
        }
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerValue::Count(n) => write!(f, "{}", n),
            AnswerValue::Truth(true) => write!(f, "yes"),
            AnswerValue::Truth(false) => write!(f, "no"),
        }
    }
}
