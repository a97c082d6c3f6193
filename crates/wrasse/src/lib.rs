#![forbid(unsafe_code)]

//! Distance-bounded graph-coloring verification over random geometric graphs.
//!
//! `wrasse` generates a random colored graph embedded in integer 3-D space and
//! decides whether any two vertices of the same color are reachable from each
//! other within a caller-chosen hop bound. Two independent algorithms answer
//! the same question (an exhaustive depth-bounded traversal, and a per-color
//! Dijkstra sweep with pairwise-distance memoization), so hosts can
//! cross-check them or pick whichever visualizes better.
//!
//! Rendering, camera controls, and pacing belong to the host; the engine only
//! reports per-edge examination events through [`verify::StepSink`] and a final
//! boolean verdict.

pub mod error;
pub mod generate;
pub mod model;
pub mod verify;

pub use error::{Error, Result};
pub use generate::{GenerateOptions, generate, generate_until_valid, generate_with};
pub use model::{Color, Edge, Graph, Highlight, PALETTE, Position, StructuralError, Vertex};
pub use verify::{NoopSink, StepSink, verify_brute_force, verify_dijkstra};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
