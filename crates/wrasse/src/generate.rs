//! Random geometric graph generation.
//!
//! Vertices are rejection-sampled onto unique integer positions inside a cube
//! sized by `vertex_count * scalar_factor`; edges are rejection-sampled with a
//! proximity bias that favors geometrically close pairs until the bias starts
//! starving progress. Both loops carry explicit attempt budgets so an
//! infeasible request surfaces as an error instead of spinning forever.

use crate::error::{Error, Result};
use crate::model::{Color, Graph, PALETTE, Position};
use crate::verify::{NoopSink, verify_brute_force};
use rand::Rng;
use tracing::debug;

/// Euclidean distance under which a sampled pair is accepted while the
/// proximity bias is active.
const PROXIMITY_LIMIT: f64 = 60.0;

/// Rejected edge samples tolerated before the proximity bias is dropped and
/// any structurally valid pair is accepted.
const PROXIMITY_GIVE_UP: usize = 500;

const PLACEMENT_ATTEMPTS_PER_VERTEX: usize = 1000;
const EDGE_ATTEMPTS_PER_EDGE: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateOptions {
    pub vertex_count: usize,
    pub edge_count: usize,
    /// How many palette entries to draw vertex colors from. Must be between 1
    /// and [`PALETTE`]'s length.
    pub color_count: usize,
    /// Scales the coordinate cube: each axis spans
    /// `[0, vertex_count * scalar_factor)`.
    pub scalar_factor: f64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            vertex_count: 30,
            edge_count: 50,
            color_count: 9,
            scalar_factor: 3.0,
        }
    }
}

/// Generates a graph with a thread-local RNG. See [`generate_with`].
pub fn generate(opts: &GenerateOptions) -> Result<Graph> {
    generate_with(opts, &mut rand::thread_rng())
}

/// Generates a random colored geometric graph.
///
/// Vertices left with no incident edge after edge placement are tombstoned,
/// so every live vertex of the returned graph has degree at least one. The
/// RNG is caller-supplied so hosts and tests can seed for reproducibility.
pub fn generate_with<R: Rng + ?Sized>(opts: &GenerateOptions, rng: &mut R) -> Result<Graph> {
    if opts.color_count == 0 || opts.color_count > PALETTE.len() {
        return Err(Error::ColorCountOutOfRange {
            requested: opts.color_count,
            available: PALETTE.len(),
        });
    }
    let possible_pairs = opts.vertex_count * opts.vertex_count.saturating_sub(1) / 2;
    if opts.edge_count > possible_pairs {
        return Err(Error::TooManyEdges {
            requested: opts.edge_count,
            vertices: opts.vertex_count,
            possible: possible_pairs,
        });
    }

    let mut g = Graph::new();
    place_vertices(&mut g, opts, rng)?;
    place_edges(&mut g, opts, rng)?;

    let pruned = g.prune_isolated();
    debug!(
        pruned,
        live = g.live_count(),
        edges = g.edge_count(),
        "generated graph"
    );
    debug_assert!(g.validate().is_ok());
    Ok(g)
}

/// Regenerates until the graph's coloring passes the distance bound.
///
/// Each attempt draws a fresh graph from `opts` and keeps the first one where
/// no two same-colored vertices lie within `max_distance` hops of each other
/// (checked with [`verify_brute_force`]). Configuration errors abort on the
/// first attempt; a request whose colorings keep colliding surfaces as
/// [`Error::RetriesExhausted`] after `attempt_cap` graphs rather than looping
/// forever.
pub fn generate_until_valid<R: Rng + ?Sized>(
    opts: &GenerateOptions,
    max_distance: u32,
    attempt_cap: usize,
    rng: &mut R,
) -> Result<Graph> {
    for attempt in 0..attempt_cap {
        let g = generate_with(opts, rng)?;
        if verify_brute_force(&g, max_distance, &mut NoopSink) {
            debug!(attempt, max_distance, "found a validly colored graph");
            return Ok(g);
        }
    }
    Err(Error::RetriesExhausted {
        attempts: attempt_cap,
        max_distance,
    })
}

fn place_vertices<R: Rng + ?Sized>(
    g: &mut Graph,
    opts: &GenerateOptions,
    rng: &mut R,
) -> Result<()> {
    let span = opts.vertex_count as f64 * opts.scalar_factor;
    let budget = opts
        .vertex_count
        .saturating_mul(PLACEMENT_ATTEMPTS_PER_VERTEX);
    let mut attempts = 0;
    while g.slot_count() < opts.vertex_count {
        if attempts >= budget {
            return Err(Error::VertexSpaceExhausted {
                placed: g.slot_count(),
                requested: opts.vertex_count,
                attempts,
            });
        }
        attempts += 1;
        let position = Position {
            x: sample_coordinate(rng, span),
            y: sample_coordinate(rng, span),
            z: sample_coordinate(rng, span),
        };
        if g.has_position(position) {
            continue;
        }
        let color = Color(rng.gen_range(0..opts.color_count) as u8);
        g.add_vertex(position, color);
    }
    Ok(())
}

fn place_edges<R: Rng + ?Sized>(g: &mut Graph, opts: &GenerateOptions, rng: &mut R) -> Result<()> {
    if opts.edge_count == 0 || opts.vertex_count < 2 {
        return Ok(());
    }
    let budget = opts
        .edge_count
        .saturating_mul(EDGE_ATTEMPTS_PER_EDGE)
        .saturating_add(PROXIMITY_GIVE_UP);
    let mut attempts = 0;
    let mut rejected = 0;
    while g.edge_count() < opts.edge_count {
        if attempts >= budget {
            return Err(Error::EdgeSpaceExhausted {
                placed: g.edge_count(),
                requested: opts.edge_count,
                attempts,
            });
        }
        attempts += 1;

        let a = rng.gen_range(0..opts.vertex_count);
        let b = rng.gen_range(0..opts.vertex_count);
        if a == b || g.has_edge(a, b) {
            rejected += 1;
            continue;
        }
        if rejected <= PROXIMITY_GIVE_UP {
            // Bias toward short edges so the graph stays visually connected.
            let (va, vb) = match (g.vertex(a), g.vertex(b)) {
                (Some(va), Some(vb)) => (va, vb),
                _ => continue,
            };
            if va.position.distance(vb.position) >= PROXIMITY_LIMIT {
                rejected += 1;
                if rejected > PROXIMITY_GIVE_UP {
                    debug!(rejected, "edge proximity bias dropped");
                }
                continue;
            }
        }
        g.add_edge(a, b)?;
    }
    Ok(())
}

fn sample_coordinate<R: Rng + ?Sized>(rng: &mut R, span: f64) -> i64 {
    (rng.r#gen::<f64>() * span).floor() as i64
}
