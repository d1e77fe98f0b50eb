// Graph Drill - Random Graph Engine
// nodes.rs - Vertex identifiers and the base alphabet
//
// Copyright (c) 2026 CIPS Corps. All rights reserved.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A vertex identifier: a single letter label.
///
/// Vertices carry no payload beyond identity. Position within a graph
/// (used for adjacency matrix addressing) belongs to the `GraphStore`,
/// not the id, because custom topologies may enumerate any subset of
/// labels in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub char);

impl VertexId {
    /// The fixed 9-letter base alphabet, in enumeration order.
    pub const BASE_ALPHABET: [VertexId; 9] = [
        VertexId('A'),
        VertexId('B'),
        VertexId('C'),
        VertexId('D'),
        VertexId('E'),
        VertexId('F'),
        VertexId('G'),
        VertexId('H'),
        VertexId('I'),
    ];

    /// Number of vertices in the base alphabet.
    pub const BASE_COUNT: usize = 9;

    /// Parse a single-letter label. Accepts lowercase.
    pub fn parse(text: &str) -> Option<VertexId> {
        let mut chars = text.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Some(VertexId(c.to_ascii_uppercase()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_alphabet_count() {
        assert_eq!(VertexId::BASE_ALPHABET.len(), VertexId::BASE_COUNT);
    }

    #[test]
    fn test_base_alphabet_is_unique_and_ordered() {
        for window in VertexId::BASE_ALPHABET.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn test_parse_accepts_single_letters() {
        assert_eq!(VertexId::parse("A"), Some(VertexId('A')));
        assert_eq!(VertexId::parse(" b "), Some(VertexId('B')));
        assert_eq!(VertexId::parse(""), None);
        assert_eq!(VertexId::parse("AB"), None);
        assert_eq!(VertexId::parse("3"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(VertexId('F').to_string(), "F");
    }
}
