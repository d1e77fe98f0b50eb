// Graph Drill - Random Graph Engine
// edges.rs - Edges and the derived adjacency caches
//
// Copyright (c) 2026 CIPS Corps. All rights reserved.

use serde::{Deserialize, Serialize};

use crate::graph::nodes::VertexId;

/// A directed edge with a non-negative integer cost.
///
/// Invariants (enforced by `GraphStore` insertion, not by this type):
/// `from != to`, and at most one edge exists per ordered (from, to) pair.
/// An undirected logical edge is stored as two of these with equal cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Start vertex.
    pub from: VertexId,
    /// End vertex.
    pub to: VertexId,
    /// Edge cost. Non-negativity is enforced by the type.
    pub cost: u32,
}

impl Edge {
    pub fn new(from: VertexId, to: VertexId, cost: u32) -> Self {
        Self { from, to, cost }
    }
}

/// Adjacency list cache: one row of (neighbor, cost) pairs per vertex,
/// indexed by the vertex's position in the graph's node list.
///
/// Rows preserve edge insertion order. Always rebuilt whole from the edge
/// list; never patched incrementally, so it cannot drift out of sync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdjacencyList {
    rows: Vec<Vec<(VertexId, u32)>>,
}

impl AdjacencyList {
    /// Rebuild from scratch. `position` maps a vertex id to its row index.
    pub fn rebuild<F>(node_count: usize, edges: &[Edge], position: F) -> Self
    where
        F: Fn(VertexId) -> Option<usize>,
    {
        let mut rows = vec![Vec::new(); node_count];
        for edge in edges {
            if let Some(idx) = position(edge.from) {
                rows[idx].push((edge.to, edge.cost));
            }
        }
        Self { rows }
    }

    /// Outgoing (neighbor, cost) pairs for the vertex at `position`.
    pub fn neighbors(&self, position: usize) -> &[(VertexId, u32)] {
        self.rows.get(position).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Adjacency matrix cache: a |V|x|V| grid of `Option<cost>` addressed by
/// vertex position. `cell[i][j]` is `Some(cost)` when the directed edge
/// from the i-th to the j-th vertex exists.
///
/// Row/column order is the node list's insertion order. Like the list
/// cache, it is rebuilt whole from the edge list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    cells: Vec<Vec<Option<u32>>>,
}

impl AdjacencyMatrix {
    /// Rebuild from scratch. `position` maps a vertex id to its index.
    pub fn rebuild<F>(node_count: usize, edges: &[Edge], position: F) -> Self
    where
        F: Fn(VertexId) -> Option<usize>,
    {
        let mut cells = vec![vec![None; node_count]; node_count];
        for edge in edges {
            if let (Some(i), Some(j)) = (position(edge.from), position(edge.to)) {
                cells[i][j] = Some(edge.cost);
            }
        }
        Self { cells }
    }

    /// Cost of the directed edge from position i to position j, if present.
    pub fn get(&self, i: usize, j: usize) -> Option<u32> {
        self.cells.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    /// Matrix dimension (number of rows = number of columns).
    pub fn dimension(&self) -> usize {
        self.cells.len()
    }
}
