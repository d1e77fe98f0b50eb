//! # Session Context
//!
//! One learner's drill session: the active graph, the bound question, the
//! mastery tracker, and the host-visible parameter table. Constructed once
//! at startup and passed by reference wherever it is needed; there are no
//! ambient globals.
//!
//! The session owns the only mutable state in the system. Regenerating a
//! round fully replaces the previous graph and its caches; the mastery
//! tracker persists across regenerations.

use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::graph::generator::{GraphGenerator, Topology};
use crate::graph::GraphStore;
use crate::mastery::{MasteryStatus, MasteryTracker};
use crate::question::Question;
use crate::{AnswerValue, DrillConfig, DrillError, DrillResult, Verdict};

/// How many times a round may regenerate before giving up on producing a
/// graph with at least one edge. The base topology fails all attempts
/// only with vanishing probability; degenerate custom topologies (e.g. a
/// single vertex) fail deterministically and surface an error instead of
/// looping.
const MAX_GENERATION_ATTEMPTS: u32 = 32;

/// A host-visible parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamValue {
    Bool(bool),
    Int(u32),
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(n) => write!(f, "{}", n),
        }
    }
}

/// The boundary through which parameter values flow to the host
/// grading/telemetry collaborator. The core publishes; the host observes.
pub trait HostSink {
    fn publish(&mut self, name: &str, value: ParamValue);
}

/// Ordered table of named, externally visible parameters.
///
/// Composition replaces the original host-model inheritance: the session
/// owns this plain table and pushes it through a `HostSink` adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposedParams {
    entries: Vec<(String, ParamValue)>,
}

impl ExposedParams {
    fn new(numerator: u32, denominator: u32, undirected: bool) -> Self {
        Self {
            entries: vec![
                ("mastery".to_string(), ParamValue::Bool(false)),
                ("numerator".to_string(), ParamValue::Int(numerator)),
                ("denominator".to_string(), ParamValue::Int(denominator)),
                ("undirected".to_string(), ParamValue::Bool(undirected)),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    fn set(&mut self, name: &str, value: ParamValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value;
        }
    }

    /// Publish every parameter, in table order, to the host boundary.
    pub fn publish_to(&self, sink: &mut dyn HostSink) {
        for (name, value) in &self.entries {
            sink.publish(name, *value);
        }
    }
}

/// Result of grading one submitted answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub verdict: Verdict,
    /// The ground-truth answer set the submission was compared against.
    pub expected: Vec<AnswerValue>,
    /// Whether the session is mastered after recording this answer.
    pub mastery_reached: bool,
}

/// Snapshot of session state for the CLI status line and JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatus {
    pub started_at: DateTime<Utc>,
    pub rounds_played: u64,
    pub undirected: bool,
    pub node_count: usize,
    pub cardinality: usize,
    pub mastery: MasteryStatus,
}

/// One learner's drill session.
pub struct Session {
    generator: GraphGenerator,
    undirected: bool,
    store: GraphStore,
    current: Option<Question>,
    tracker: MasteryTracker,
    params: ExposedParams,
    rng: StdRng,
    started_at: DateTime<Utc>,
    rounds_played: u64,
}

impl Session {
    /// Build a session from configuration. The rng is seeded from config
    /// when a seed is given (reproducible sessions), else from entropy.
    pub fn new(config: &DrillConfig) -> DrillResult<Self> {
        config.validate()?;

        let topology = match &config.topology {
            Some(entries) => Topology::from_entries(entries.clone()),
            None => Topology::base(),
        };
        let rng = match config.graph.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            generator: GraphGenerator::new(
                topology,
                config.graph.undirected,
                config.graph.max_cost,
            ),
            undirected: config.graph.undirected,
            store: GraphStore::new(config.graph.undirected),
            current: None,
            tracker: MasteryTracker::new(config.mastery.numerator, config.mastery.denominator),
            params: ExposedParams::new(
                config.mastery.numerator,
                config.mastery.denominator,
                config.graph.undirected,
            ),
            rng,
            started_at: Utc::now(),
            rounds_played: 0,
        })
    }

    /// Start a new round: fully replace the graph with a fresh one that
    /// holds at least one edge, then bind and return a new question.
    ///
    /// The ≥1-edge guarantee is established here, before any question is
    /// asked, so downstream vertex probes never see an edgeless graph.
    pub fn next_round(&mut self) -> DrillResult<&Question> {
        let mut attempts = 0;
        self.store = loop {
            attempts += 1;
            let candidate = self.generator.generate(&mut self.rng);
            if candidate.edge_entry_count() > 0 {
                break candidate;
            }
            if attempts >= MAX_GENERATION_ATTEMPTS {
                return Err(DrillError::Generation(format!(
                    "topology produced no edges in {} attempts",
                    attempts
                )));
            }
        };

        self.rounds_played += 1;
        let question = Question::choose(&self.store, &mut self.rng);
        debug!(
            "round {}: {} nodes, {} edges, question: {}",
            self.rounds_played,
            self.store.connected_vertices().len(),
            self.store.cardinality(),
            question.text
        );
        Ok(self.current.insert(question))
    }

    /// Grade a free-text submission against the current question, record
    /// the verdict, and refresh the exposed parameters.
    ///
    /// Returns None when no question is bound (caller bug: `next_round`
    /// must run first).
    pub fn submit_answer(&mut self, submission: &str) -> Option<AnswerOutcome> {
        let question = self.current.as_ref()?;
        let verdict = question.grade(&self.store, submission);
        let expected = question.compute_answer(&self.store);

        self.tracker.record_answer(verdict);
        let mastered = self.tracker.mastery_reached();
        self.params.set("mastery", ParamValue::Bool(mastered));

        info!(
            "answer {:?} (expected {}), correct {}/{} in window",
            verdict,
            expected
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(","),
            self.tracker.history().correct_count(),
            self.tracker.denominator()
        );

        Some(AnswerOutcome {
            verdict,
            expected,
            mastery_reached: mastered,
        })
    }

    // -----------------------------------------------------------------------
    // Host parameter boundary
    // -----------------------------------------------------------------------

    /// Read a host-visible parameter.
    pub fn get_param(&self, name: &str) -> Option<ParamValue> {
        self.params.get(name)
    }

    /// Write a host-visible parameter, applying its side effect:
    /// `numerator` retunes the tracker, `denominator` reinitializes the
    /// answer history at the new length, `undirected` takes effect on the
    /// next generated graph.
    pub fn set_param(&mut self, name: &str, value: ParamValue) -> DrillResult<()> {
        match (name, value) {
            ("mastery", ParamValue::Bool(b)) => {
                self.params.set("mastery", ParamValue::Bool(b));
            }
            ("numerator", ParamValue::Int(n)) => {
                // Same bounds the config path enforces: numerator 0 would
                // grant mastery with an all-unanswered window, and a
                // numerator above the denominator makes mastery unreachable.
                if n == 0 || n > self.tracker.denominator() {
                    return Err(DrillError::Config(format!(
                        "numerator must be in [1, {}], got {}",
                        self.tracker.denominator(),
                        n
                    )));
                }
                self.tracker.set_numerator(n);
                self.params.set("numerator", ParamValue::Int(n));
                self.params
                    .set("mastery", ParamValue::Bool(self.tracker.mastery_reached()));
            }
            ("denominator", ParamValue::Int(d)) => {
                if d == 0 {
                    return Err(DrillError::Config(
                        "denominator must be at least 1".to_string(),
                    ));
                }
                if d < self.tracker.numerator() {
                    return Err(DrillError::Config(format!(
                        "denominator must be at least the numerator ({}), got {}",
                        self.tracker.numerator(),
                        d
                    )));
                }
                self.tracker.set_denominator(d);
                self.params.set("denominator", ParamValue::Int(d));
            }
            ("undirected", ParamValue::Bool(b)) => {
                self.undirected = b;
                self.generator.set_undirected(b);
                self.params.set("undirected", ParamValue::Bool(b));
            }
            (name, value) => {
                return Err(DrillError::Config(format!(
                    "unknown parameter or mismatched type: {} = {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Push all exposed parameters through the host adapter.
    pub fn publish_params(&self, sink: &mut dyn HostSink) {
        self.params.publish_to(sink);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn tracker(&self) -> &MasteryTracker {
        &self.tracker
    }

    pub fn mastery_reached(&self) -> bool {
        self.tracker.mastery_reached()
    }

    /// Get a snapshot of session state for reporting.
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            started_at: self.started_at,
            rounds_played: self.rounds_played,
            undirected: self.undirected,
            node_count: self.store.node_count(),
            cardinality: self.store.cardinality(),
            mastery: self.tracker.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_config(seed: u64) -> DrillConfig {
        let mut config = DrillConfig::default();
        config.graph.seed = Some(seed);
        config
    }

    /// Host sink that records everything published to it.
    struct RecordingSink {
        published: Vec<(String, ParamValue)>,
    }

    impl HostSink for RecordingSink {
        fn publish(&mut self, name: &str, value: ParamValue) {
            self.published.push((name.to_string(), value));
        }
    }

    #[test]
    fn test_session_defaults_exposed() {
        let session = Session::new(&DrillConfig::default()).unwrap();
        assert_eq!(session.get_param("mastery"), Some(ParamValue::Bool(false)));
        assert_eq!(session.get_param("numerator"), Some(ParamValue::Int(4)));
        assert_eq!(session.get_param("denominator"), Some(ParamValue::Int(5)));
        assert_eq!(session.get_param("undirected"), Some(ParamValue::Bool(true)));
        assert_eq!(session.get_param("bogus"), None);
    }

    #[test]
    fn test_next_round_replaces_graph_and_binds_question() {
        let mut session = Session::new(&seeded_config(9)).unwrap();
        assert!(session.current_question().is_none());

        session.next_round().unwrap();
        let first_edges = session.store().edge_list().to_vec();
        assert!(!first_edges.is_empty());
        assert!(session.current_question().is_some());

        // A long run of rounds always yields a questionable graph.
        for _ in 0..50 {
            session.next_round().unwrap();
            assert!(session.store().edge_entry_count() > 0);
        }
    }

    #[test]
    fn test_submit_without_question_is_none() {
        let mut session = Session::new(&seeded_config(9)).unwrap();
        assert!(session.submit_answer("3").is_none());
    }

    #[test]
    fn test_correct_answer_advances_mastery() {
        let mut session = Session::new(&seeded_config(21)).unwrap();
        session.set_param("numerator", ParamValue::Int(1)).unwrap();

        session.next_round().unwrap();
        let question = session.current_question().unwrap().clone();
        let expected = question.compute_answer(session.store());
        let text = expected
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let outcome = session.submit_answer(&text).unwrap();
        assert_eq!(outcome.verdict, Verdict::Correct);
        assert!(outcome.mastery_reached);
        assert_eq!(session.get_param("mastery"), Some(ParamValue::Bool(true)));
    }

    #[test]
    fn test_wrong_answer_records_incorrect() {
        let mut session = Session::new(&seeded_config(5)).unwrap();
        session.next_round().unwrap();
        // No graph over the base topology has 999 of anything, and "999"
        // matches no truth answer either.
        let outcome = session.submit_answer("999").unwrap();
        assert_eq!(outcome.verdict, Verdict::Incorrect);
        assert!(!outcome.mastery_reached);
    }

    #[test]
    fn test_set_denominator_reinitializes_window() {
        let mut session = Session::new(&seeded_config(5)).unwrap();
        session.next_round().unwrap();
        session.submit_answer("0").unwrap();

        session.set_param("denominator", ParamValue::Int(8)).unwrap();
        assert_eq!(session.tracker().history().len(), 8);
        assert_eq!(session.tracker().history().correct_count(), 0);
        assert_eq!(session.get_param("denominator"), Some(ParamValue::Int(8)));
    }

    #[test]
    fn test_set_denominator_zero_rejected() {
        let mut session = Session::new(&seeded_config(5)).unwrap();
        assert!(session.set_param("denominator", ParamValue::Int(0)).is_err());
    }

    #[test]
    fn test_set_numerator_out_of_bounds_rejected() {
        let mut session = Session::new(&seeded_config(5)).unwrap();

        // Numerator 0 would satisfy the mastery count with an
        // all-unanswered window; the write must be rejected outright.
        assert!(session.set_param("numerator", ParamValue::Int(0)).is_err());
        assert!(!session.mastery_reached());
        assert_eq!(session.get_param("mastery"), Some(ParamValue::Bool(false)));
        assert_eq!(session.get_param("numerator"), Some(ParamValue::Int(4)));

        // Above the denominator, mastery would be unreachable.
        assert!(session.set_param("numerator", ParamValue::Int(6)).is_err());
        assert_eq!(session.tracker().numerator(), 4);
    }

    #[test]
    fn test_set_denominator_below_numerator_rejected() {
        let mut session = Session::new(&seeded_config(5)).unwrap();
        assert!(session.set_param("denominator", ParamValue::Int(3)).is_err());
        assert_eq!(session.tracker().denominator(), 5);
        assert_eq!(session.get_param("denominator"), Some(ParamValue::Int(5)));

        // Equal to the numerator is the smallest honorable window.
        assert!(session.set_param("denominator", ParamValue::Int(4)).is_ok());
        assert_eq!(session.tracker().history().len(), 4);
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let mut session = Session::new(&seeded_config(5)).unwrap();
        assert!(session.set_param("mastery", ParamValue::Int(1)).is_err());
        assert!(session
            .set_param("undirected", ParamValue::Int(1))
            .is_err());
    }

    #[test]
    fn test_undirected_toggle_applies_next_round() {
        let mut session = Session::new(&seeded_config(13)).unwrap();
        session.next_round().unwrap();
        assert!(session.store().is_undirected());

        session.set_param("undirected", ParamValue::Bool(false)).unwrap();
        // Current graph is untouched until the next regeneration.
        assert!(session.store().is_undirected());
        session.next_round().unwrap();
        assert!(!session.store().is_undirected());
    }

    #[test]
    fn test_publish_params_order_and_values() {
        let session = Session::new(&DrillConfig::default()).unwrap();
        let mut sink = RecordingSink { published: vec![] };
        session.publish_params(&mut sink);

        let names: Vec<&str> = sink.published.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["mastery", "numerator", "denominator", "undirected"]);
    }

    #[test]
    fn test_status_snapshot() {
        let mut session = Session::new(&seeded_config(2)).unwrap();
        session.next_round().unwrap();
        session.submit_answer("0").unwrap();

        let status = session.status();
        assert_eq!(status.rounds_played, 1);
        assert!(status.undirected);
        assert_eq!(status.node_count, 9);
        assert!(status.cardinality > 0);
        assert_eq!(status.mastery.history.len(), 5);
    }
}
