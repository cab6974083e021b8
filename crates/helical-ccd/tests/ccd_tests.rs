//! Integration tests for helical-ccd.

use glam::DVec2;

use helical_body::{shapes, Pose, RigidBody};
use helical_ccd::{
    compute_edge_vertex_toi, compute_edge_vertex_toi_linear, compute_volumes_fixed_toi,
    convert_edge_vertex_to_edge_edge_impacts, detect_collision_candidates, detect_collisions,
    detect_collisions_from_candidates, detect_collisions_with, interval_root_finder,
    prune_impacts, space_time_collision_volume, Candidates, CcdOptions, CollisionTypes,
    DetectionMethod, EdgeEdgeImpact, EdgeVertexCandidate, EdgeVertexImpact,
};
use helical_math::{Interval, Ternary, Vector, Vector2};
use helical_types::{EdgeId, HelicalError, VertexId};

fn make_body2(vertices: Vec<Vector2<f64>>, edges: Vec<[u32; 2]>, group: u32) -> RigidBody<2> {
    RigidBody::from_points(
        vertices,
        edges,
        Vec::new(),
        Pose::identity(),
        Pose::identity(),
        Pose::identity(),
        1.0,
        [false; 6],
        group,
    )
    .unwrap()
}

fn make_body3(
    vertices: Vec<helical_math::Vector3<f64>>,
    edges: Vec<[u32; 2]>,
    faces: Vec<[u32; 3]>,
    group: u32,
) -> RigidBody<3> {
    RigidBody::from_points(
        vertices,
        edges,
        faces,
        Pose::identity(),
        Pose::identity(),
        Pose::identity(),
        1.0,
        [false; 6],
        group,
    )
    .unwrap()
}

fn pose2(x: f64, y: f64) -> Pose<f64, 2> {
    Pose::new(Vector2::new(x, y), Vector::zero())
}

fn pose3(x: f64, y: f64, z: f64) -> Pose<f64, 3> {
    Pose::new(helical_math::Vector3::new(x, y, z), Vector::zero())
}

/// Unit edge scene: a stationary edge from (-1,0) to (1,0) and a free
/// vertex starting at (0,1) that translates by `displacement`.
fn falling_vertex_scene(
    displacement: DVec2,
) -> (Vec<RigidBody<2>>, Vec<Pose<f64, 2>>, Vec<Pose<f64, 2>>) {
    let (vertices, edges) = shapes::segment(2.0);
    let edge_body = make_body2(vertices, edges, 0);
    let point_body = make_body2(shapes::single_point::<2>(), Vec::new(), 1);
    let poses_t0 = vec![pose2(0.0, 0.0), pose2(0.0, 1.0)];
    let poses_t1 = vec![
        pose2(0.0, 0.0),
        pose2(displacement.x, 1.0 + displacement.y),
    ];
    (vec![edge_body, point_body], poses_t0, poses_t1)
}

// ─── Root Finder Tests ────────────────────────────────────────

#[test]
fn root_finder_locates_linear_root() {
    let root = interval_root_finder(
        |t| t - Interval::point(0.5),
        |_| Ok(Ternary::True),
        Interval::UNIT,
        1e-9,
    )
    .unwrap()
    .expect("root exists");
    assert!(root.lo <= 0.5 && 0.5 <= root.hi + 1e-8);
    assert!(root.width() <= 1e-9);
}

#[test]
fn root_finder_reports_no_root() {
    let root = interval_root_finder(
        |t| t + Interval::point(1.0),
        |_| Ok(Ternary::True),
        Interval::UNIT,
        1e-6,
    )
    .unwrap();
    assert!(root.is_none());
}

#[test]
fn root_finder_prunes_by_containment() {
    // Root at 0.25 is filtered out; the finder must move on to 0.75.
    let root = interval_root_finder(
        |t| (t - Interval::point(0.25)) * (t - Interval::point(0.75)),
        |t| {
            Ok(if t.hi < 0.5 {
                Ternary::False
            } else {
                Ternary::Maybe
            })
        },
        Interval::UNIT,
        1e-9,
    )
    .unwrap()
    .expect("filtered root exists");
    assert!((root.lo - 0.75).abs() < 1e-6);
}

#[test]
fn root_finder_rejects_bad_tolerance() {
    let err = interval_root_finder(
        |t| t,
        |_| Ok(Ternary::True),
        Interval::UNIT,
        0.0,
    )
    .unwrap_err();
    assert!(matches!(err, HelicalError::InvalidInput(_)));
}

#[test]
fn root_finder_propagates_containment_errors() {
    let err = interval_root_finder(
        |t| t - Interval::point(0.5),
        |_| {
            Err(HelicalError::NotImplemented(
                "no containment for this feature pair".into(),
            ))
        },
        Interval::UNIT,
        1e-6,
    )
    .unwrap_err();
    assert!(matches!(err, HelicalError::NotImplemented(_)));
}

// ─── Scenario S1/S2: Perpendicular Impact ─────────────────────

#[test]
fn s1_perpendicular_impact_at_unit_speed() {
    let (bodies, t0, t1) = falling_vertex_scene(DVec2::new(0.0, -1.0));
    let impacts = detect_collisions(
        &bodies,
        &t0,
        &t1,
        CollisionTypes::EDGE_VERTEX,
        DetectionMethod::HashGrid,
    )
    .unwrap();

    assert_eq!(impacts.ev.len(), 1);
    let impact = &impacts.ev[0];
    assert!((impact.time_of_impact - 1.0).abs() < 1e-4, "toi = {}", impact.time_of_impact);
    assert!((impact.alpha - 0.5).abs() < 1e-4, "alpha = {}", impact.alpha);
    assert!(impact.time_of_impact <= 1.0);
}

#[test]
fn s2_doubled_velocity_halves_toi() {
    let (bodies, t0, t1) = falling_vertex_scene(DVec2::new(0.0, -2.0));
    let impacts = detect_collisions(
        &bodies,
        &t0,
        &t1,
        CollisionTypes::EDGE_VERTEX,
        DetectionMethod::HashGrid,
    )
    .unwrap();

    assert_eq!(impacts.ev.len(), 1);
    let impact = &impacts.ev[0];
    assert!((impact.time_of_impact - 0.5).abs() < 1e-4);
    assert!(impact.time_of_impact <= 0.5, "TOI must be conservative");
    assert!((impact.alpha - 0.5).abs() < 1e-4);
}

#[test]
fn per_pair_entry_point_matches_facade() {
    let (bodies, t0, t1) = falling_vertex_scene(DVec2::new(0.0, -2.0));
    let result = compute_edge_vertex_toi(
        &bodies[1],
        &t0[1],
        &t1[1],
        0,
        &bodies[0],
        &t0[0],
        &t1[0],
        0,
        &CcdOptions::default(),
    )
    .unwrap()
    .expect("impact expected");
    assert!((result.toi - 0.5).abs() < 1e-4);
    assert!((result.alpha - 0.5).abs() < 1e-4);
}

// ─── Scenario S3: Tangent Impact ──────────────────────────────

#[test]
fn s3_tangent_impact_hits_endpoint() {
    let edge_body = make_body2(
        vec![Vector2::new(-0.5, 0.0), Vector2::new(-1.5, 0.0)],
        vec![[0, 1]],
        0,
    );
    let point_body = make_body2(shapes::single_point::<2>(), Vec::new(), 1);
    let bodies = vec![edge_body, point_body];
    let t0 = vec![pose2(0.0, 0.0), pose2(0.5, 0.0)];
    let t1 = vec![pose2(0.0, 0.0), pose2(-0.5, 0.0)];

    let impacts = detect_collisions(
        &bodies,
        &t0,
        &t1,
        CollisionTypes::EDGE_VERTEX,
        DetectionMethod::BruteForce,
    )
    .unwrap();

    assert_eq!(impacts.ev.len(), 1);
    let impact = &impacts.ev[0];
    assert!((impact.time_of_impact - 1.0).abs() < 1e-4);
    // The vertex grazes an endpoint: alpha is 0 or 1 within tolerance.
    let near_end = impact.alpha.abs() < 1e-4 || (impact.alpha - 1.0).abs() < 1e-4;
    assert!(near_end, "alpha = {}", impact.alpha);
}

// ─── Scenario S4: Rotating Edge, Double Impact ────────────────

#[test]
fn s4_rotating_edge_first_impact() {
    let result = compute_edge_vertex_toi_linear(
        DVec2::new(-1.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(0.0, 0.5),
        DVec2::new(1.6730970740318298, 0.8025388419628143),
        DVec2::new(-1.616142749786377, -0.6420311331748962),
        DVec2::new(0.0, -1.0),
        &CcdOptions::tight(),
    )
    .unwrap()
    .expect("double-impact fixture must collide");
    assert!(
        (result.toi - 0.4482900963).abs() < 1e-6,
        "toi = {}",
        result.toi
    );
}

#[test]
fn linear_toi_simple_cases() {
    // Unit-speed drop onto a stationary edge.
    let result = compute_edge_vertex_toi_linear(
        DVec2::new(-1.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(0.0, 1.0),
        DVec2::ZERO,
        DVec2::ZERO,
        DVec2::new(0.0, -1.0),
        &CcdOptions::default(),
    )
    .unwrap()
    .expect("impact expected");
    assert!((result.toi - 1.0).abs() < 1e-4);
    assert!((result.alpha - 0.5).abs() < 1e-4);

    // A vertex moving away never impacts.
    let result = compute_edge_vertex_toi_linear(
        DVec2::new(-1.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(0.0, 1.0),
        DVec2::ZERO,
        DVec2::ZERO,
        DVec2::new(0.0, 2.0),
        &CcdOptions::default(),
    )
    .unwrap();
    assert!(result.is_none());
}

// ─── Scenario S5: 3D Edge-Edge ────────────────────────────────

#[test]
fn s5_skew_edges_crossing() {
    let edge_a = make_body3(
        vec![
            helical_math::Vector3::new(-1.0, 0.0, 0.0),
            helical_math::Vector3::new(1.0, 0.0, 0.0),
        ],
        vec![[0, 1]],
        Vec::new(),
        0,
    );
    let edge_b = make_body3(
        vec![
            helical_math::Vector3::new(0.0, -1.0, 0.0),
            helical_math::Vector3::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1]],
        Vec::new(),
        1,
    );
    let bodies = vec![edge_a, edge_b];
    // Edge A starts at z = 1 and moves down 4 units: crossing at t = 0.25.
    let t0 = vec![pose3(0.0, 0.0, 1.0), pose3(0.0, 0.0, 0.0)];
    let t1 = vec![pose3(0.0, 0.0, -3.0), pose3(0.0, 0.0, 0.0)];

    let impacts = detect_collisions(
        &bodies,
        &t0,
        &t1,
        CollisionTypes::EDGE_EDGE,
        DetectionMethod::HashGrid,
    )
    .unwrap();

    assert_eq!(impacts.ee.len(), 1);
    let impact = &impacts.ee[0];
    assert!(impact.time_of_impact <= 0.25 + 1e-9, "conservative bound");
    assert!(impact.time_of_impact > 0.2, "toi = {}", impact.time_of_impact);
    assert!((impact.alpha_a - 0.5).abs() < 1e-3);
    assert!((impact.alpha_b - 0.5).abs() < 1e-3);
}

// ─── Scenario S6: Parallel Co-Moving Edges ────────────────────

#[test]
fn s6_parallel_comoving_edges_never_impact() {
    let (vertices, edges) = shapes::segment(2.0);
    let lower = make_body2(vertices.clone(), edges.clone(), 0);
    let upper = make_body2(vertices, edges, 1);
    let bodies = vec![lower, upper];
    let t0 = vec![pose2(0.0, 0.0), pose2(0.0, 1.0)];
    let t1 = vec![pose2(1.0, 0.0), pose2(1.0, 1.0)];

    for method in [DetectionMethod::BruteForce, DetectionMethod::HashGrid] {
        let candidates = detect_collision_candidates(
            &bodies,
            &t0,
            &t1,
            CollisionTypes::EDGE_VERTEX,
            method,
            &CcdOptions::default(),
        )
        .unwrap();
        assert!(candidates.is_empty(), "broad phase should cull everything");

        let impacts = detect_collisions(
            &bodies,
            &t0,
            &t1,
            CollisionTypes::EDGE_VERTEX,
            method,
        )
        .unwrap();
        assert!(impacts.is_empty());
    }
}

// ─── Face-Vertex ──────────────────────────────────────────────

#[test]
fn vertex_falls_onto_triangle() {
    let triangle = make_body3(
        vec![
            helical_math::Vector3::new(0.0, 0.0, 0.0),
            helical_math::Vector3::new(1.0, 0.0, 0.0),
            helical_math::Vector3::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1], [1, 2], [2, 0]],
        vec![[0, 1, 2]],
        0,
    );
    let point = make_body3(shapes::single_point::<3>(), Vec::new(), Vec::new(), 1);
    let bodies = vec![triangle, point];
    let t0 = vec![pose3(0.0, 0.0, 0.0), pose3(0.25, 0.25, 1.0)];
    let t1 = vec![pose3(0.0, 0.0, 0.0), pose3(0.25, 0.25, 0.0)];

    let impacts = detect_collisions(
        &bodies,
        &t0,
        &t1,
        CollisionTypes::FACE_VERTEX,
        DetectionMethod::HashGrid,
    )
    .unwrap();

    assert_eq!(impacts.fv.len(), 1);
    let impact = &impacts.fv[0];
    assert!((impact.time_of_impact - 1.0).abs() < 1e-4);
    assert!((impact.u - 0.25).abs() < 1e-4);
    assert!((impact.v - 0.25).abs() < 1e-4);
}

// ─── Boundary Behaviors ───────────────────────────────────────

#[test]
fn features_touching_at_start_report_zero_toi() {
    let (bodies, _, _) = falling_vertex_scene(DVec2::ZERO);
    // Vertex sits on the edge the whole step.
    let t0 = vec![pose2(0.0, 0.0), pose2(0.0, 0.0)];
    let t1 = vec![pose2(0.0, 0.0), pose2(0.0, 0.0)];

    let impacts = detect_collisions(
        &bodies,
        &t0,
        &t1,
        CollisionTypes::EDGE_VERTEX,
        DetectionMethod::BruteForce,
    )
    .unwrap();
    assert_eq!(impacts.ev.len(), 1);
    assert_eq!(impacts.ev[0].time_of_impact, 0.0);
}

#[test]
fn earliest_toi_truncates_the_search() {
    let (bodies, t0, t1) = falling_vertex_scene(DVec2::new(0.0, -1.0));
    let options = CcdOptions {
        earliest_toi: 0.5,
        ..Default::default()
    };
    let impacts = detect_collisions_with(
        &bodies,
        &t0,
        &t1,
        CollisionTypes::EDGE_VERTEX,
        DetectionMethod::BruteForce,
        &options,
    )
    .unwrap();
    assert!(impacts.is_empty(), "impact at t = 1 lies outside [0, 0.5]");
}

// ─── Determinism & Method Agreement ───────────────────────────

#[test]
fn detection_is_deterministic() {
    let (bodies, t0, t1) = falling_vertex_scene(DVec2::new(0.3, -1.5));
    let run = || {
        detect_collisions(
            &bodies,
            &t0,
            &t1,
            CollisionTypes::EDGE_VERTEX,
            DetectionMethod::HashGrid,
        )
        .unwrap()
    };
    let a = serde_json::to_string(&run()).unwrap();
    let b = serde_json::to_string(&run()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn hash_grid_agrees_with_brute_force() {
    let (vertices, edges) = shapes::regular_polygon(5, 1.0);
    let polygon = make_body2(vertices, edges, 0);
    let point = make_body2(shapes::single_point::<2>(), Vec::new(), 1);
    let bodies = vec![polygon, point];
    let t0 = vec![pose2(0.0, 0.0), pose2(3.0, 0.2)];
    let t1 = vec![pose2(0.0, 0.0), pose2(-3.0, 0.2)];

    let opts = CcdOptions::default();
    let brute = detect_collision_candidates(
        &bodies,
        &t0,
        &t1,
        CollisionTypes::EDGE_VERTEX,
        DetectionMethod::BruteForce,
        &opts,
    )
    .unwrap();
    let grid = detect_collision_candidates(
        &bodies,
        &t0,
        &t1,
        CollisionTypes::EDGE_VERTEX,
        DetectionMethod::HashGrid,
        &opts,
    )
    .unwrap();
    assert_eq!(brute.ev, grid.ev, "overlapping boxes always share a cell");

    let bi = detect_collisions_from_candidates(&bodies, &t0, &t1, &brute, &opts).unwrap();
    let gi = detect_collisions_from_candidates(&bodies, &t0, &t1, &grid, &opts).unwrap();
    assert_eq!(
        serde_json::to_string(&bi).unwrap(),
        serde_json::to_string(&gi).unwrap()
    );
}

#[test]
fn impacts_are_sorted_by_toi() {
    let (vertices, edges) = shapes::segment(2.0);
    let edge_body = make_body2(vertices, edges, 0);
    let fast = make_body2(shapes::single_point::<2>(), Vec::new(), 1);
    let slow = make_body2(shapes::single_point::<2>(), Vec::new(), 2);
    let bodies = vec![edge_body, fast, slow];
    let t0 = vec![pose2(0.0, 0.0), pose2(-0.5, 1.0), pose2(0.5, 1.0)];
    let t1 = vec![pose2(0.0, 0.0), pose2(-0.5, -1.0), pose2(0.5, 0.0)];

    let impacts = detect_collisions(
        &bodies,
        &t0,
        &t1,
        CollisionTypes::EDGE_VERTEX,
        DetectionMethod::HashGrid,
    )
    .unwrap();
    assert_eq!(impacts.ev.len(), 2);
    assert!(impacts.ev[0].time_of_impact <= impacts.ev[1].time_of_impact);
    assert!((impacts.ev[0].time_of_impact - 0.5).abs() < 1e-4);
    assert!((impacts.ev[1].time_of_impact - 1.0).abs() < 1e-4);
}

// ─── Error Surfaces ───────────────────────────────────────────

#[test]
fn mismatched_pose_counts_are_rejected() {
    let (bodies, t0, _) = falling_vertex_scene(DVec2::new(0.0, -1.0));
    let err = detect_collisions(
        &bodies,
        &t0,
        &t0[..1],
        CollisionTypes::EDGE_VERTEX,
        DetectionMethod::HashGrid,
    )
    .unwrap_err();
    assert!(matches!(err, HelicalError::InvalidInput(_)));
}

#[test]
fn invalid_options_are_rejected() {
    let (bodies, t0, t1) = falling_vertex_scene(DVec2::new(0.0, -1.0));
    for options in [
        CcdOptions {
            earliest_toi: -1.0,
            ..Default::default()
        },
        CcdOptions {
            toi_tolerance: 0.0,
            ..Default::default()
        },
    ] {
        let err = detect_collisions_with(
            &bodies,
            &t0,
            &t1,
            CollisionTypes::EDGE_VERTEX,
            DetectionMethod::HashGrid,
            &options,
        )
        .unwrap_err();
        assert!(matches!(err, HelicalError::InvalidInput(_)));
    }
}

#[test]
fn edge_vertex_in_3d_is_not_implemented() {
    let edge = make_body3(
        vec![
            helical_math::Vector3::new(-1.0, 0.0, 0.0),
            helical_math::Vector3::new(1.0, 0.0, 0.0),
        ],
        vec![[0, 1]],
        Vec::new(),
        0,
    );
    let point = make_body3(shapes::single_point::<3>(), Vec::new(), Vec::new(), 1);
    let bodies = vec![edge, point];
    let poses = vec![pose3(0.0, 0.0, 0.0), pose3(0.0, 0.0, 1.0)];

    let candidates = Candidates {
        ev: vec![EdgeVertexCandidate {
            edge_id: EdgeId(0),
            vertex_id: VertexId(2),
        }],
        ..Default::default()
    };
    let err = detect_collisions_from_candidates(
        &bodies,
        &poses,
        &poses,
        &candidates,
        &CcdOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, HelicalError::NotImplemented(_)));
}

// ─── Impact Aggregation ───────────────────────────────────────

#[test]
fn ev_to_ee_conversion_selects_incident_edges() {
    let edges = vec![[0, 1], [1, 2]];
    let ev = vec![EdgeVertexImpact {
        edge_id: EdgeId(0),
        vertex_id: VertexId(1),
        time_of_impact: 0.5,
        alpha: 0.25,
    }];
    let ee = convert_edge_vertex_to_edge_edge_impacts(&edges, &ev);
    // Vertex 1 is incident to both edges.
    assert_eq!(ee.len(), 2);
    assert_eq!(ee[0].edge_b_id, EdgeId(0));
    assert_eq!(ee[0].alpha_b, 1.0, "vertex is edge 0's second endpoint");
    assert_eq!(ee[1].edge_b_id, EdgeId(1));
    assert_eq!(ee[1].alpha_b, 0.0, "vertex is edge 1's first endpoint");
    for impact in &ee {
        assert_eq!(impact.edge_a_id, EdgeId(0));
        assert_eq!(impact.alpha_a, 0.25);
        assert_eq!(impact.time_of_impact, 0.5);
    }
}

#[test]
fn pruning_keeps_earliest_impact_per_edge() {
    let ee = vec![
        EdgeEdgeImpact {
            edge_a_id: EdgeId(0),
            edge_b_id: EdgeId(1),
            time_of_impact: 0.5,
            alpha_a: 0.0,
            alpha_b: 0.0,
        },
        EdgeEdgeImpact {
            edge_a_id: EdgeId(2),
            edge_b_id: EdgeId(1),
            time_of_impact: 0.25,
            alpha_a: 0.0,
            alpha_b: 0.0,
        },
        EdgeEdgeImpact {
            edge_a_id: EdgeId(0),
            edge_b_id: EdgeId(3),
            time_of_impact: 0.75,
            alpha_a: 0.0,
            alpha_b: 0.0,
        },
    ];
    let map = prune_impacts(&ee, 5);
    assert_eq!(map, vec![0, 1, 1, 2, -1]);

    // Each mapped impact has the minimum TOI among impacts touching
    // that edge.
    for (edge, &slot) in map.iter().enumerate() {
        if slot < 0 {
            continue;
        }
        let assigned = ee[slot as usize].time_of_impact;
        for other in &ee {
            if other.edge_a_id.index() == edge || other.edge_b_id.index() == edge {
                assert!(assigned <= other.time_of_impact);
            }
        }
    }
}

#[test]
fn conversion_then_pruning_is_deterministic() {
    let edges = vec![[0, 1], [1, 2], [2, 3]];
    let ev = vec![
        EdgeVertexImpact {
            edge_id: EdgeId(2),
            vertex_id: VertexId(1),
            time_of_impact: 0.5,
            alpha: 0.5,
        },
        EdgeVertexImpact {
            edge_id: EdgeId(0),
            vertex_id: VertexId(2),
            time_of_impact: 0.5,
            alpha: 0.1,
        },
    ];
    let ee_a = convert_edge_vertex_to_edge_edge_impacts(&edges, &ev);
    let ee_b = convert_edge_vertex_to_edge_edge_impacts(&edges, &ev);
    assert_eq!(
        serde_json::to_string(&ee_a).unwrap(),
        serde_json::to_string(&ee_b).unwrap()
    );
    assert_eq!(prune_impacts(&ee_a, 4), prune_impacts(&ee_b, 4));
}

// ─── Collision Volumes ────────────────────────────────────────

#[test]
fn space_time_volume_formula() {
    let vi = Vector2::new(-1.0, 0.0);
    let vj = Vector2::new(1.0, 0.0);
    let ui = Vector2::new(0.0, -1.0);
    let uj = Vector2::new(0.0, -1.0);

    // With epsilon = 0 the volume reduces to (1 - toi)|U . e_perp|.
    let v = space_time_collision_volume(vi, vj, ui, uj, 0.5, 0.5, 0.0);
    assert!((v - 1.0).abs() < 1e-12);

    // An impact at the end of the step has no remaining volume.
    let v = space_time_collision_volume(vi, vj, ui, uj, 1.0, 0.5, 0.25);
    assert_eq!(v, 0.0);

    // The regularization keeps grazing impacts nonzero.
    let v = space_time_collision_volume(vi, vj, Vector2::zero(), Vector2::zero(), 0.5, 0.5, 0.1);
    assert!((v - 0.5 * 0.2).abs() < 1e-12, "0.5 * sqrt(eps^2 * 4)");
}

#[test]
fn volumes_fixed_toi_per_edge() {
    let vertices = vec![
        DVec2::new(-1.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(-1.0, 1.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(5.0, 5.0),
        DVec2::new(6.0, 5.0),
    ];
    let displacements = vec![
        DVec2::ZERO,
        DVec2::ZERO,
        DVec2::new(0.0, -1.0),
        DVec2::new(0.0, -1.0),
        DVec2::ZERO,
        DVec2::ZERO,
    ];
    let edges = vec![[0, 1], [2, 3], [4, 5]];
    let ee = vec![EdgeEdgeImpact {
        edge_a_id: EdgeId(0),
        edge_b_id: EdgeId(1),
        time_of_impact: 0.5,
        alpha_a: 0.5,
        alpha_b: 0.5,
    }];
    let map = prune_impacts(&ee, edges.len());
    assert_eq!(map, vec![0, 0, -1]);

    let volumes = compute_volumes_fixed_toi(&vertices, &displacements, &edges, &ee, &map, 0.1);
    assert_eq!(volumes.len(), 3);
    // Edge 0 is static: only the regularization term survives.
    assert!((volumes[0] - 0.5 * 0.2).abs() < 1e-12);
    // Edge 1 closes at speed 1 along its perpendicular.
    assert!(volumes[1] > volumes[0]);
    // Edge 2 has no impact.
    assert_eq!(volumes[2], 0.0);
}

// ─── Conservatism ─────────────────────────────────────────────

#[test]
fn reported_toi_never_exceeds_analytic_toi() {
    // Analytic first contact at exactly t = 0.5 (S2 geometry).
    let (bodies, t0, t1) = falling_vertex_scene(DVec2::new(0.0, -2.0));
    for options in [CcdOptions::default(), CcdOptions::tight(), CcdOptions::coarse()] {
        let impacts = detect_collisions_with(
            &bodies,
            &t0,
            &t1,
            CollisionTypes::EDGE_VERTEX,
            DetectionMethod::BruteForce,
            &options,
        )
        .unwrap();
        assert_eq!(impacts.ev.len(), 1);
        let toi = impacts.ev[0].time_of_impact;
        assert!(toi <= 0.5, "conservative bound violated: {toi}");
        assert!(toi >= 0.5 - 10.0 * options.toi_tolerance.max(1e-6));
    }
}
