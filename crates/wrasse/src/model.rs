//! Graph model: colored vertex slots in integer 3-D space plus unique
//! unordered edges.
//!
//! Vertex indices are stable for the lifetime of a graph. A pruned vertex
//! leaves a tombstone (`None` slot) behind so edges never need renumbering;
//! tombstoned slots are invisible to verification and to hosts iterating
//! [`Graph::vertices`].

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// The fixed render palette. `Color` values index into this sequence; asking
/// the generator for more colors than it holds is a configuration error.
pub const PALETTE: [&str; 9] = [
    "#e60049", "#0bb4ff", "#50e991", "#e6d800", "#9b19f5", "#ffa300", "#dc0ab4", "#b3d4ff",
    "#00bfa0",
];

/// An index into [`PALETTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color(pub u8);

impl Color {
    /// CSS hex string for this color. Out-of-palette indices degrade to the
    /// first palette entry instead of panicking.
    pub fn hex(self) -> &'static str {
        PALETTE.get(usize::from(self.0)).copied().unwrap_or(PALETTE[0])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Position {
    pub fn distance(self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        let dz = (self.z - other.z) as f64;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vertex {
    pub position: Position,
    pub color: Color,
}

/// Host-owned highlight state for one edge. Purely presentational: the
/// verifiers report steps through a sink and never touch this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Highlight {
    #[default]
    Unmarked,
    UnderExamination,
    Confirmed,
}

/// An unordered pair of vertex indices, stored canonically (`a < b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    a: usize,
    b: usize,
    pub highlight: Highlight,
}

impl Edge {
    pub fn endpoints(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    /// The endpoint opposite `v`, or `None` if this edge is not incident to it.
    pub fn other_endpoint(&self, v: usize) -> Option<usize> {
        if self.a == v {
            Some(self.b)
        } else if self.b == v {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Canonical key for an unordered vertex pair. Shared by edge storage and the
/// pairwise-distance cache so symmetric lookups can never diverge.
pub(crate) fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("Edge endpoint {vertex} is out of range (graph has {slots} slots)")]
    EndpointOutOfRange { vertex: usize, slots: usize },
    #[error("Edge endpoint {vertex} is tombstoned")]
    EndpointTombstoned { vertex: usize },
    #[error("Self-loop on vertex {vertex}")]
    SelfLoop { vertex: usize },
    #[error("Duplicate edge between {a} and {b}")]
    DuplicateEdge { a: usize, b: usize },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    vertices: Vec<Option<Vertex>>,
    edges: Vec<Edge>,
    #[serde(skip)]
    pair_index: FxHashSet<(usize, usize)>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertex slots, tombstones included. Edge endpoints index into
    /// this range.
    pub fn slot_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of non-tombstoned vertices.
    pub fn live_count(&self) -> usize {
        self.vertices.iter().flatten().count()
    }

    pub fn vertex(&self, ix: usize) -> Option<&Vertex> {
        self.vertices.get(ix).and_then(|slot| slot.as_ref())
    }

    /// Live vertices with their slot indices, in index order.
    pub fn vertices(&self) -> impl Iterator<Item = (usize, &Vertex)> {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(ix, slot)| slot.as_ref().map(|v| (ix, v)))
    }

    pub fn has_position(&self, position: Position) -> bool {
        self.vertices
            .iter()
            .flatten()
            .any(|v| v.position == position)
    }

    pub fn add_vertex(&mut self, position: Position, color: Color) -> usize {
        let ix = self.vertices.len();
        self.vertices.push(Some(Vertex { position, color }));
        ix
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.pair_index.contains(&pair_key(a, b))
    }

    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<usize, StructuralError> {
        if a == b {
            return Err(StructuralError::SelfLoop { vertex: a });
        }
        for v in [a, b] {
            if v >= self.vertices.len() {
                return Err(StructuralError::EndpointOutOfRange {
                    vertex: v,
                    slots: self.vertices.len(),
                });
            }
            if self.vertices[v].is_none() {
                return Err(StructuralError::EndpointTombstoned { vertex: v });
            }
        }
        let key = pair_key(a, b);
        if !self.pair_index.insert(key) {
            return Err(StructuralError::DuplicateEdge { a: key.0, b: key.1 });
        }
        let ix = self.edges.len();
        self.edges.push(Edge {
            a: key.0,
            b: key.1,
            highlight: Highlight::default(),
        });
        Ok(ix)
    }

    /// Edges incident to `v` as `(edge index, opposite endpoint)` pairs.
    pub fn incident_edges(&self, v: usize) -> impl Iterator<Item = (usize, usize)> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(move |(ix, e)| e.other_endpoint(v).map(|w| (ix, w)))
    }

    /// Tombstones every vertex with no incident edge. Returns how many slots
    /// were tombstoned.
    pub fn prune_isolated(&mut self) -> usize {
        let mut connected: FxHashSet<usize> = FxHashSet::default();
        for e in &self.edges {
            let (a, b) = e.endpoints();
            connected.insert(a);
            connected.insert(b);
        }
        let mut pruned = 0;
        for (ix, slot) in self.vertices.iter_mut().enumerate() {
            if slot.is_some() && !connected.contains(&ix) {
                *slot = None;
                pruned += 1;
            }
        }
        pruned
    }

    /// Live vertex indices grouped by color. Recomputed per call; classes are
    /// derived, never stored.
    pub fn color_classes(&self) -> FxHashMap<Color, Vec<usize>> {
        let mut classes: FxHashMap<Color, Vec<usize>> = FxHashMap::default();
        for (ix, v) in self.vertices() {
            classes.entry(v.color).or_default().push(ix);
        }
        classes
    }

    /// Best-effort highlight update for hosts; out-of-range indices are
    /// ignored.
    pub fn set_highlight(&mut self, edge: usize, highlight: Highlight) {
        if let Some(e) = self.edges.get_mut(edge) {
            e.highlight = highlight;
        }
    }

    pub fn reset_highlights(&mut self) {
        for e in &mut self.edges {
            e.highlight = Highlight::default();
        }
    }

    /// Checks the structural invariants every generated graph upholds: edge
    /// endpoints in range and live, no self-loops, no duplicate pairs. A
    /// violation indicates a generator bug, not a user error.
    pub fn validate(&self) -> Result<(), StructuralError> {
        let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
        for e in &self.edges {
            let (a, b) = e.endpoints();
            if a == b {
                return Err(StructuralError::SelfLoop { vertex: a });
            }
            for v in [a, b] {
                if v >= self.vertices.len() {
                    return Err(StructuralError::EndpointOutOfRange {
                        vertex: v,
                        slots: self.vertices.len(),
                    });
                }
                if self.vertices[v].is_none() {
                    return Err(StructuralError::EndpointTombstoned { vertex: v });
                }
            }
            if !seen.insert(pair_key(a, b)) {
                return Err(StructuralError::DuplicateEdge { a, b });
            }
        }
        Ok(())
    }
}
