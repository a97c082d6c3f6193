//! Distance-bounded coloring verifiers.
//!
//! Both entry points decide the same property: no two distinct same-colored
//! vertices are reachable from each other within `max_distance` hops. They
//! never mutate the graph; each edge examination is reported to a
//! caller-supplied [`StepSink`] so hosts can highlight, pace, or ignore the
//! run as they see fit.

mod bounded;
mod dijkstra;

pub use bounded::verify_brute_force;
pub use dijkstra::verify_dijkstra;

/// Observer for verification steps. Pacing and cancellation live here: a sink
/// that sleeps inside [`StepSink::edge_examined`] animates the run without
/// the verifier knowing.
pub trait StepSink {
    /// An edge is being examined. `edge` indexes into [`crate::Graph::edges`].
    fn edge_examined(&mut self, edge: usize) {
        let _ = edge;
    }

    /// A source vertex finished its sweep without a violation. Hosts use this
    /// to repaint examined edges as confirmed.
    fn source_cleared(&mut self, vertex: usize) {
        let _ = vertex;
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl StepSink for NoopSink {}
