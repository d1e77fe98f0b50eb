//! # Mastery Tracker
//!
//! Rolling-window mastery bookkeeping: a fixed-length history of answer
//! correctness and a two-state machine (`Practicing` -> `Mastered`).
//!
//! Mastery means at least `numerator` correct answers within the last
//! `denominator` attempts. The history starts all-unanswered; unanswered
//! slots never count toward mastery. `Mastered` is terminal: later wrong
//! answers can age correct entries out of the window, but the state never
//! reverts.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::Verdict;

/// One slot of the answer history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Correctness {
    /// No answer recorded for this slot yet.
    Unanswered,
    Correct,
    Incorrect,
}

impl From<Verdict> for Correctness {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Correct => Correctness::Correct,
            Verdict::Incorrect => Correctness::Incorrect,
        }
    }
}

/// Fixed-capacity FIFO of answer outcomes.
///
/// Always holds exactly `capacity` entries: pushing evicts the oldest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerHistory {
    entries: VecDeque<Correctness>,
    capacity: usize,
}

impl AnswerHistory {
    /// A history of the given length, all slots unanswered. The length is
    /// clamped to at least 1: a zero-length window could not keep its
    /// fixed length under push/evict.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: std::iter::repeat(Correctness::Unanswered)
                .take(capacity)
                .collect(),
            capacity,
        }
    }

    /// Record an outcome at the back, evicting the front (oldest) entry.
    pub fn push(&mut self, entry: Correctness) {
        self.entries.pop_front();
        self.entries.push_back(entry);
    }

    /// Number of correct entries currently in the window.
    pub fn correct_count(&self) -> u32 {
        self.entries
            .iter()
            .filter(|&&e| e == Correctness::Correct)
            .count() as u32
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest-first view of the window, for rendering.
    pub fn entries(&self) -> impl Iterator<Item = Correctness> + '_ {
        self.entries.iter().copied()
    }
}

/// The tracker's two states. `Mastered` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MasteryPhase {
    Practicing,
    Mastered,
}

/// Snapshot of tracker state for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryStatus {
    pub numerator: u32,
    pub denominator: u32,
    pub phase: MasteryPhase,
    pub correct_in_window: u32,
    pub history: Vec<Correctness>,
}

/// Rolling mastery state, independent of graph lifecycle: it persists
/// across graph regenerations for the whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryTracker {
    numerator: u32,
    denominator: u32,
    history: AnswerHistory,
    phase: MasteryPhase,
}

impl MasteryTracker {
    /// A fresh tracker in `Practicing` with an all-unanswered window.
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
            history: AnswerHistory::new(denominator as usize),
            phase: MasteryPhase::Practicing,
        }
    }

    /// Record a graded answer and run the state transition.
    /// Returns the phase after the push.
    pub fn record_answer(&mut self, verdict: Verdict) -> MasteryPhase {
        self.history.push(verdict.into());
        self.evaluate();
        self.phase
    }

    /// `Practicing -> Mastered` once the window holds enough corrects.
    /// Never transitions out of `Mastered`.
    fn evaluate(&mut self) {
        if self.phase == MasteryPhase::Practicing
            && self.history.correct_count() >= self.numerator
        {
            self.phase = MasteryPhase::Mastered;
        }
    }

    pub fn mastery_reached(&self) -> bool {
        self.phase == MasteryPhase::Mastered
    }

    pub fn phase(&self) -> MasteryPhase {
        self.phase
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    pub fn history(&self) -> &AnswerHistory {
        &self.history
    }

    /// Change the mastery threshold. Re-evaluates immediately, so a
    /// window that already satisfies the new threshold masters now.
    pub fn set_numerator(&mut self, numerator: u32) {
        self.numerator = numerator;
        self.evaluate();
    }

    /// Change the window length. Reinitializes the history to the new
    /// length, all slots unanswered. Phase is untouched (terminal
    /// `Mastered` survives the reset).
    pub fn set_denominator(&mut self, denominator: u32) {
        self.denominator = denominator;
        self.history = AnswerHistory::new(denominator as usize);
    }

    /// Get a snapshot of current state for reporting.
    pub fn status(&self) -> MasteryStatus {
        MasteryStatus {
            numerator: self.numerator,
            denominator: self.denominator,
            phase: self.phase,
            correct_in_window: self.history.correct_count(),
            history: self.history.entries().collect(),
        }
    }
}
