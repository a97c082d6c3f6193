use rand::SeedableRng;
use rand::rngs::SmallRng;
use rustc_hash::FxHashSet;
use wrasse::{
    Error, GenerateOptions, NoopSink, PALETTE, generate_until_valid, generate_with,
    verify_brute_force, verify_dijkstra,
};

#[test]
fn generated_graphs_uphold_the_structural_invariants() {
    for seed in 0..16 {
        let opts = GenerateOptions::default();
        let mut rng = SmallRng::seed_from_u64(seed);
        let g = generate_with(&opts, &mut rng).expect("default options must generate");

        assert_eq!(g.edge_count(), opts.edge_count, "seed {seed}");
        g.validate().unwrap_or_else(|err| panic!("seed {seed}: {err}"));

        // No two live vertices share a position.
        let mut positions = FxHashSet::default();
        for (_, v) in g.vertices() {
            assert!(positions.insert(v.position), "seed {seed}: duplicate position");
        }

        // Every live vertex kept at least one incident edge; colors stay in
        // the requested palette prefix.
        for (ix, v) in g.vertices() {
            assert!(
                g.incident_edges(ix).next().is_some(),
                "seed {seed}: vertex {ix} is isolated"
            );
            assert!(usize::from(v.color.0) < opts.color_count, "seed {seed}");
        }
    }
}

#[test]
fn edge_endpoints_never_reference_tombstones() {
    let opts = GenerateOptions {
        vertex_count: 40,
        edge_count: 12, // few edges, so plenty of vertices get pruned
        color_count: 4,
        scalar_factor: 3.0,
    };
    let mut rng = SmallRng::seed_from_u64(99);
    let g = generate_with(&opts, &mut rng).expect("sparse options must generate");

    assert!(g.live_count() < opts.vertex_count, "expected pruning");
    assert_eq!(g.slot_count(), opts.vertex_count, "slots stay stable");
    for e in g.edges() {
        let (a, b) = e.endpoints();
        assert!(g.vertex(a).is_some());
        assert!(g.vertex(b).is_some());
    }
}

#[test]
fn serialized_graphs_keep_tombstone_slots_as_null() {
    let opts = GenerateOptions {
        vertex_count: 40,
        edge_count: 12,
        color_count: 4,
        scalar_factor: 3.0,
    };
    let g = generate_with(&opts, &mut SmallRng::seed_from_u64(99)).unwrap();
    let value = serde_json::to_value(&g).unwrap();

    let slots = value["vertices"].as_array().unwrap();
    assert_eq!(slots.len(), opts.vertex_count, "indices stay stable on the wire");
    assert!(slots.iter().any(|s| s.is_null()), "tombstones serialize as null");
}

#[test]
fn generation_is_deterministic_under_a_seed() {
    let opts = GenerateOptions::default();
    let a = generate_with(&opts, &mut SmallRng::seed_from_u64(5)).unwrap();
    let b = generate_with(&opts, &mut SmallRng::seed_from_u64(5)).unwrap();

    let pa: Vec<_> = a.vertices().map(|(ix, v)| (ix, *v)).collect();
    let pb: Vec<_> = b.vertices().map(|(ix, v)| (ix, *v)).collect();
    assert_eq!(pa, pb);
    assert_eq!(a.edges(), b.edges());
}

#[test]
fn generate_until_valid_returns_a_graph_that_passes_the_bound() {
    // Sparse graph over the full palette: same-color collisions within two
    // hops are rare, so a valid coloring shows up well inside the cap.
    let opts = GenerateOptions {
        vertex_count: 10,
        edge_count: 5,
        color_count: 9,
        scalar_factor: 3.0,
    };
    let mut rng = SmallRng::seed_from_u64(11);
    let g = generate_until_valid(&opts, 2, 500, &mut rng).expect("a valid graph within the cap");

    assert!(verify_brute_force(&g, 2, &mut NoopSink));
    assert!(verify_dijkstra(&g, 2, &mut NoopSink));
    g.validate().unwrap();
}

#[test]
fn generate_until_valid_gives_up_when_no_coloring_can_pass() {
    // One color: every edge joins same-colored vertices at distance one, so
    // no regeneration can ever satisfy the bound.
    let opts = GenerateOptions {
        vertex_count: 6,
        edge_count: 3,
        color_count: 1,
        scalar_factor: 3.0,
    };
    let mut rng = SmallRng::seed_from_u64(0);
    assert!(matches!(
        generate_until_valid(&opts, 1, 4, &mut rng),
        Err(Error::RetriesExhausted {
            attempts: 4,
            max_distance: 1,
        })
    ));
}

#[test]
fn generate_until_valid_surfaces_configuration_errors_immediately() {
    let opts = GenerateOptions {
        color_count: 0,
        ..Default::default()
    };
    let mut rng = SmallRng::seed_from_u64(0);
    assert!(matches!(
        generate_until_valid(&opts, 2, 10, &mut rng),
        Err(Error::ColorCountOutOfRange { .. })
    ));
}

#[test]
fn full_palette_is_usable() {
    let opts = GenerateOptions {
        color_count: PALETTE.len(),
        ..Default::default()
    };
    let g = generate_with(&opts, &mut SmallRng::seed_from_u64(1)).unwrap();
    assert!(g.live_count() > 0);
}
