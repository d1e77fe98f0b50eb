// Graph Drill - Random Graph Engine
// mod.rs - Module exports and GraphStore (the main interface)
//
// Copyright (c) 2026 CIPS Corps. All rights reserved.

pub mod edges;
pub mod generator;
pub mod nodes;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use edges::{AdjacencyList, AdjacencyMatrix, Edge};
pub use nodes::VertexId;

/// The graph under drill: an insertion-ordered vertex list, an edge list,
/// and two derived caches (adjacency list and adjacency matrix).
///
/// The caches are rebuilt whole from the edge list on every successful
/// insertion, so they can never diverge from it. Row/column order of the
/// matrix is the vertex insertion order.
///
/// Invalid insertions (self-loops, duplicate ordered pairs, unknown
/// endpoints) are silently skipped: generation probes candidates at
/// random and routinely hits pairs that already exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStore {
    /// Vertices in insertion order. Position here is the matrix index.
    nodes: Vec<VertexId>,

    /// Directed edge entries. In undirected mode each logical edge is two
    /// mirrored entries with equal cost.
    edges: Vec<Edge>,

    /// Derived adjacency list cache.
    adjacency: AdjacencyList,

    /// Derived adjacency matrix cache.
    matrix: AdjacencyMatrix,

    /// Undirected semantics: mirrored storage, logical-edge cardinality,
    /// distinct-neighbor degree.
    undirected: bool,
}

impl GraphStore {
    /// Create an empty graph with the given edge semantics.
    pub fn new(undirected: bool) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            adjacency: AdjacencyList::default(),
            matrix: AdjacencyMatrix::default(),
            undirected,
        }
    }

    /// Whether this graph uses undirected semantics.
    pub fn is_undirected(&self) -> bool {
        self.undirected
    }

    /// Return the graph to its starting state: no nodes and no edges.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.rebuild_caches();
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Position of a vertex in the node list, or None if absent.
    pub fn find_vertex(&self, id: VertexId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == id)
    }

    /// The directed edge (from, to), or None if absent.
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }

    /// Cost of the directed edge (from, to), or None if absent.
    pub fn edge_cost(&self, from: VertexId, to: VertexId) -> Option<u32> {
        self.find_edge(from, to).map(|e| e.cost)
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Add a vertex. No-op if the id is already present.
    pub fn add_vertex(&mut self, id: VertexId) {
        if self.find_vertex(id).is_some() {
            return;
        }
        self.nodes.push(id);
        self.rebuild_caches();
    }

    /// Add a directed edge. Silently rejected when the edge would be a
    /// self-loop, either endpoint is unknown, or the ordered pair already
    /// exists. Returns true if the edge was inserted.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, cost: u32) -> bool {
        if from == to {
            return false;
        }
        if self.find_vertex(from).is_none() || self.find_vertex(to).is_none() {
            return false;
        }
        if self.find_edge(from, to).is_some() {
            return false;
        }
        self.edges.push(Edge::new(from, to, cost));
        self.rebuild_caches();
        true
    }

    /// Add a logical undirected edge: both directed entries with the same
    /// cost, atomically. Either both are inserted or neither is.
    /// Returns true if the pair was inserted.
    pub fn add_undirected_edge(&mut self, a: VertexId, b: VertexId, cost: u32) -> bool {
        if a == b {
            return false;
        }
        if self.find_vertex(a).is_none() || self.find_vertex(b).is_none() {
            return false;
        }
        if self.find_edge(a, b).is_some() || self.find_edge(b, a).is_some() {
            return false;
        }
        self.edges.push(Edge::new(a, b, cost));
        self.edges.push(Edge::new(b, a, cost));
        self.rebuild_caches();
        true
    }

    /// Rebuild both adjacency caches from the edge list.
    fn rebuild_caches(&mut self) {
        let nodes = &self.nodes;
        let position = |id: VertexId| nodes.iter().position(|&n| n == id);
        self.adjacency = AdjacencyList::rebuild(nodes.len(), &self.edges, position);
        self.matrix = AdjacencyMatrix::rebuild(nodes.len(), &self.edges, position);
    }

    // -----------------------------------------------------------------------
    // Structural queries
    // -----------------------------------------------------------------------

    /// Number of vertices (including isolated ones).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored directed edge entries.
    pub fn edge_entry_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of logical edges: stored entries halved in undirected mode
    /// (each logical edge is two mirrored entries), otherwise the entry
    /// count itself.
    pub fn cardinality(&self) -> usize {
        if self.undirected {
            self.edges.len() / 2
        } else {
            self.edges.len()
        }
    }

    /// Degree of a vertex. Unknown vertices have degree 0.
    ///
    /// Undirected: the number of distinct vertices w with an edge between
    /// v and w in either storage direction, counted once per w.
    /// Directed: in-degree + out-degree, so a mutual pair contributes 2.
    pub fn degree(&self, id: VertexId) -> usize {
        if self.undirected {
            let i = match self.find_vertex(id) {
                Some(i) => i,
                None => return 0,
            };
            (0..self.nodes.len())
                .filter(|&j| {
                    j != i && (self.matrix.get(i, j).is_some() || self.matrix.get(j, i).is_some())
                })
                .count()
        } else {
            self.in_degree(id) + self.out_degree(id)
        }
    }

    /// Number of directed edges ending at the vertex.
    pub fn in_degree(&self, id: VertexId) -> usize {
        self.edges.iter().filter(|e| e.to == id).count()
    }

    /// Number of directed edges starting from the vertex.
    pub fn out_degree(&self, id: VertexId) -> usize {
        self.edges.iter().filter(|e| e.from == id).count()
    }

    /// Vertex ids with degree > 0, in insertion order.
    pub fn connected_vertices(&self) -> Vec<VertexId> {
        self.nodes
            .iter()
            .copied()
            .filter(|&id| self.degree(id) > 0)
            .collect()
    }

    /// All vertex ids in insertion order.
    pub fn node_list(&self) -> &[VertexId] {
        &self.nodes
    }

    /// All stored edge entries in insertion order.
    pub fn edge_list(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing (neighbor, cost) pairs of a vertex from the adjacency
    /// list cache. Empty for unknown vertices.
    pub fn neighbors(&self, id: VertexId) -> &[(VertexId, u32)] {
        match self.find_vertex(id) {
            Some(i) => self.adjacency.neighbors(i),
            None => &[],
        }
    }

    /// Cost from the adjacency matrix cache, addressed by vertex id.
    /// Agrees with `edge_cost` at all times.
    pub fn matrix_cost(&self, from: VertexId, to: VertexId) -> Option<u32> {
        let i = self.find_vertex(from)?;
        let j = self.find_vertex(to)?;
        self.matrix.get(i, j)
    }

    /// Pick a random vertex with degree > 0 by probing from a random
    /// start position and wrapping around the vertex list.
    ///
    /// Precondition: the graph holds at least one edge. The probe loops
    /// forever on an edgeless graph; callers (the session) guarantee an
    /// edge exists before questions are asked.
    pub fn random_vertex_with_positive_degree<R: Rng>(&self, rng: &mut R) -> VertexId {
        let len = self.nodes.len();
        let mut idx = rng.gen_range(0..len);
        loop {
            let id = self.nodes[idx];
            if self.degree(id) > 0 {
                return id;
            }
            idx = (idx + 1) % len;
        }
    }
}

impl fmt::Display for GraphStore {
    /// Human-readable dump of nodes and edges, for the CLI and logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nodes:")?;
        for id in &self.nodes {
            write!(f, " {}", id)?;
        }
        writeln!(f)?;
        let arrow = if self.undirected { "--" } else { "->" };
        if self.undirected {
            // Print each logical edge once, from its lexically first endpoint.
            for edge in &self.edges {
                if edge.from < edge.to {
                    writeln!(f, "  {} {} {} (cost {})", edge.from, arrow, edge.to, edge.cost)?;
                }
            }
        } else {
            for edge in &self.edges {
                writeln!(f, "  {} {} {} (cost {})", edge.from, arrow, edge.to, edge.cost)?;
            }
        }
        Ok(())
    }
}
