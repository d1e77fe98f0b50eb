//! # Question Engine
//!
//! Fixed catalog of structural questions about the current graph. Each
//! kind pairs a template (literal fragments interleaved with bound vertex
//! references) with an answer rule computed from the `GraphStore`.
//!
//! Questions are bound and rendered once at creation and immutable after
//! that; re-running the selection with the same rng seed and graph yields
//! the same question.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::graph::{GraphStore, VertexId};
use crate::{AnswerValue, Verdict};

/// The question catalog. One entry per answer-computation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// How many vertices have at least one edge.
    NodeCount,
    /// How many logical edges the graph holds.
    Cardinality,
    /// Degree of one bound vertex (bound with degree > 0).
    DegreeOfNode,
    /// Whether an edge exists between two independently bound vertices.
    EdgeExistence,
}

impl QuestionKind {
    /// All catalog entries, in selection order.
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::NodeCount,
        QuestionKind::Cardinality,
        QuestionKind::DegreeOfNode,
        QuestionKind::EdgeExistence,
    ];

    /// Number of catalog entries.
    pub const COUNT: usize = 4;

    /// How many vertex references the template binds.
    pub fn bound_count(&self) -> usize {
        match self {
            QuestionKind::NodeCount | QuestionKind::Cardinality => 0,
            QuestionKind::DegreeOfNode => 1,
            QuestionKind::EdgeExistence => 2,
        }
    }

    /// The template: literal fragments interleaved with references into
    /// the bound-vertex list.
    fn template(&self) -> &'static [Fragment] {
        match self {
            QuestionKind::NodeCount => &[Fragment::Literal("How many nodes are in the graph?")],
            QuestionKind::Cardinality => {
                &[Fragment::Literal("What is the cardinality of the graph?")]
            }
            QuestionKind::DegreeOfNode => &[
                Fragment::Literal("What is the degree of node "),
                Fragment::Vertex(0),
                Fragment::Literal("?"),
            ],
            QuestionKind::EdgeExistence => &[
                Fragment::Literal("Is there an edge between node "),
                Fragment::Vertex(0),
                Fragment::Literal(" and node "),
                Fragment::Vertex(1),
                Fragment::Literal("?"),
            ],
        }
    }
}

/// One template piece: literal text or a reference to a bound vertex.
#[derive(Debug, Clone, Copy)]
enum Fragment {
    Literal(&'static str),
    Vertex(usize),
}

/// A bound question: kind, bound vertices, and the rendered text.
///
/// Holds only vertex identifiers, never copies of graph structure; the
/// answer is recomputed from the store on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub kind: QuestionKind,
    pub bound: Vec<VertexId>,
    pub text: String,
}

impl Question {
    /// Pick a kind uniformly at random, bind its vertex references by
    /// drawing connected vertices independently, and render the template.
    ///
    /// Precondition (inherited from the vertex probe): the store holds at
    /// least one edge.
    pub fn choose<R: Rng>(store: &GraphStore, rng: &mut R) -> Question {
        let kind = QuestionKind::ALL[rng.gen_range(0..QuestionKind::COUNT)];
        let bound: Vec<VertexId> = (0..kind.bound_count())
            .map(|_| store.random_vertex_with_positive_degree(rng))
            .collect();
        Self::bind(kind, bound)
    }

    /// Bind a specific kind to specific vertices. Used by `choose` and by
    /// tests that need a known question.
    pub fn bind(kind: QuestionKind, bound: Vec<VertexId>) -> Question {
        debug_assert_eq!(bound.len(), kind.bound_count());
        let mut text = String::new();
        for fragment in kind.template() {
            match fragment {
                Fragment::Literal(s) => text.push_str(s),
                Fragment::Vertex(i) => text.push(bound[*i].0),
            }
        }
        Question { kind, bound, text }
    }

    /// Compute the ground-truth answer set from the store.
    ///
    /// Always a small ordered list so compound questions are handled
    /// uniformly; every catalog entry currently yields one value.
    pub fn compute_answer(&self, store: &GraphStore) -> Vec<AnswerValue> {
        match self.kind {
            QuestionKind::NodeCount => {
                vec![AnswerValue::Count(store.connected_vertices().len() as u32)]
            }
            QuestionKind::Cardinality => vec![AnswerValue::Count(store.cardinality() as u32)],
            QuestionKind::DegreeOfNode => {
                vec![AnswerValue::Count(store.degree(self.bound[0]) as u32)]
            }
            QuestionKind::EdgeExistence => vec![AnswerValue::Truth(
                store.find_edge(self.bound[0], self.bound[1]).is_some(),
            )],
        }
    }

    /// Grade a learner's free-text submission against the answer set.
    ///
    /// Multi-part submissions are comma-separated and matched in order;
    /// part count must equal the answer count.
    pub fn grade(&self, store: &GraphStore, submission: &str) -> Verdict {
        let answers = self.compute_answer(store);
        let parts: Vec<&str> = submission.split(',').collect();
        if parts.len() != answers.len() {
            return Verdict::Incorrect;
        }
        let all_match = answers
            .iter()
            .zip(parts.iter())
            .all(|(answer, part)| answer.matches(part));
        if all_match {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }
}
