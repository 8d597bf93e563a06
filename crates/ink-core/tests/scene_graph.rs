//! Integration tests: SceneGraph invariants across mixed operation sequences.

use ink_core::SceneGraph;
use ink_core::config::EditorConfig;
use ink_core::geom::{Point, Size};
use ink_core::id::NodeId;
use ink_core::model::{Edge, Region, Stroke};
use pretty_assertions::assert_eq;

fn ring(g: &mut SceneGraph, n: usize) -> Vec<NodeId> {
    let ids: Vec<NodeId> = (0..n)
        .map(|i| g.create_node(Point::new(250.0 * i as f32, 0.0), format!("n{i}")))
        .collect();
    for i in 0..n {
        g.create_edge(ids[i], ids[(i + 1) % n]);
    }
    ids
}

#[test]
fn delete_removes_exactly_incident_edges() {
    let mut g = SceneGraph::new();
    let ids = ring(&mut g, 6);
    // A chord that does not touch the victim.
    g.create_edge(ids[0], ids[3]);
    let victim = ids[2];

    let mut expected: Vec<Edge> = g
        .edges()
        .into_iter()
        .filter(|e| e.source != victim && e.target != victim)
        .collect();
    expected.sort_by_key(|e| (e.source, e.target));

    g.delete_node(victim);

    let mut edges = g.edges();
    edges.sort_by_key(|e| (e.source, e.target));
    assert_eq!(edges, expected);
    assert_eq!(g.edges_of(victim), vec![]);
    assert_eq!(g.node_count(), 5);
}

#[test]
fn every_edge_endpoint_exists_after_deletes() {
    let mut g = SceneGraph::new();
    let ids = ring(&mut g, 10);
    for id in ids.iter().step_by(3) {
        g.delete_node(*id);
    }
    for e in g.edges() {
        assert!(g.contains(e.source), "dangling source {}", e.source);
        assert!(g.contains(e.target), "dangling target {}", e.target);
        assert_ne!(e.source, e.target);
    }
}

#[test]
fn hidden_nodes_keep_data_and_are_skipped_by_hit_test() {
    let mut g = SceneGraph::new();
    let a = g.create_node(Point::ZERO, "a");
    let s = Stroke::from_points([Point::new(5.0, 5.0), Point::new(9.0, 7.0)]).unwrap();
    g.append_stroke(a, Region::Title, s.clone());
    g.set_visible(a, false);

    assert_eq!(g.node_at(Point::new(10.0, 10.0)), None);
    g.set_visible(a, true);
    assert_eq!(g.node_at(Point::new(10.0, 10.0)), Some(a));
    assert_eq!(g.get(a).unwrap().title_strokes, vec![s]);
}

#[test]
fn configured_node_size_applies_on_create() {
    let mut config = EditorConfig::default();
    config.metrics.width = 240.0;
    config.metrics.height = 90.0;
    config.validate().unwrap();

    let mut g = SceneGraph::with_node_size(config.metrics.node_size());
    let id = g.create_node(Point::new(10.0, 10.0), "");
    assert_eq!(g.get(id).unwrap().size, Size::new(240.0, 90.0));
    assert_eq!(g.node_at(Point::new(249.0, 99.0)), Some(id));
    assert_eq!(g.node_at(Point::new(251.0, 99.0)), None);
}

#[test]
fn node_json_shape() {
    let mut g = SceneGraph::new();
    let id = g.create_node(Point::new(1.0, 2.0), "hello");
    let json = serde_json::to_value(g.get(id).unwrap()).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["title"], "hello");
    assert_eq!(json["position"]["x"], 1.0);
    assert_eq!(json["visible"], true);
    assert_eq!(json["title_strokes"], serde_json::json!([]));
}

#[test]
#[ignore] // Run manually with `cargo test --test scene_graph -- --nocapture --ignored`
fn benchmark_hit_test_large_board() {
    use std::time::Instant;

    let mut g = SceneGraph::new();
    for i in 0..10_000 {
        let (col, row) = (i % 100, i / 100);
        g.create_node(Point::new(col as f32 * 200.0, row as f32 * 140.0), "");
    }

    let start = Instant::now();
    let mut hits = 0;
    for i in 0..10_000 {
        let p = Point::new((i % 100) as f32 * 200.0 + 5.0, (i / 100) as f32 * 140.0 + 5.0);
        if g.node_at(p).is_some() {
            hits += 1;
        }
    }
    let duration = start.elapsed();

    assert_eq!(hits, 10_000);
    println!("10,000 hit tests over 10,000 nodes in {duration:?}");
}
