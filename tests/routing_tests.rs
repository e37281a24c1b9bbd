//! Routing and cost tests on the two-aisle warehouse fixture.

mod fixtures;

use pick_planner::graph::{LayoutGraph, build_graph};
use pick_planner::metrics::{pct_improvement, route_cost};
use pick_planner::route::Route;
use pick_planner::routing::{dynamic_route, shortest_path, shortest_path_cost, static_route};
use pick_planner::table::Table;
use pick_planner::PlannerError;

use fixtures::layout_table;

fn warehouse() -> LayoutGraph {
    build_graph(&layout_table()).unwrap()
}

// ============================================================================
// Shortest Path
// ============================================================================

#[test]
fn test_detour_beats_direct_edge() {
    let table = Table::new("layout", &["from", "to", "distance"])
        .with_row(&["A", "B", "1"])
        .with_row(&["B", "C", "1"])
        .with_row(&["A", "C", "5"]);
    let graph = build_graph(&table).unwrap();

    let (nodes, cost) = shortest_path(&graph, "A", "C").unwrap();
    assert_eq!(nodes, vec!["A", "B", "C"]);
    assert_eq!(cost, 2.0);
}

#[test]
fn test_shortest_path_cost_is_symmetric() {
    let graph = warehouse();
    let nodes: Vec<&str> = graph.nodes().collect();
    for a in &nodes {
        for b in &nodes {
            assert_eq!(
                shortest_path_cost(&graph, a, b).unwrap(),
                shortest_path_cost(&graph, b, a).unwrap(),
                "{a} <-> {b}"
            );
        }
    }
}

#[test]
fn test_shortest_path_nodes_are_adjacent() {
    let graph = warehouse();
    let (nodes, cost) = shortest_path(&graph, "START", "PACK").unwrap();
    assert_eq!(cost, 9.0);
    assert_eq!(route_cost(&graph, &Route::new(nodes)).unwrap(), cost);
}

#[test]
fn test_isolated_component_has_no_path() {
    let mut table = layout_table();
    table.push_row(&["DOCK", "OVERFLOW", "1"]);
    let graph = build_graph(&table).unwrap();

    assert_eq!(
        shortest_path(&graph, "START", "DOCK"),
        Err(PlannerError::NoPath {
            from: "START".to_string(),
            to: "DOCK".to_string()
        })
    );
    assert!(matches!(
        dynamic_route(&graph, "START", &["A1", "OVERFLOW"], Some("PACK")),
        Err(PlannerError::NoPath { .. })
    ));
}

// ============================================================================
// Whole-Order Routes
// ============================================================================

#[test]
fn test_static_route_keeps_input_order() {
    let graph = warehouse();
    let route = static_route(&graph, "START", &["A3", "A1"], Some("PACK")).unwrap();

    assert_eq!(
        route.nodes(),
        &["START", "A1", "A2", "A3", "A2", "A1", "A2", "A3", "PACK"].map(String::from)[..]
    );
    assert_eq!(route_cost(&graph, &route).unwrap(), 17.0);
}

#[test]
fn test_dynamic_route_reorders_to_nearest() {
    let graph = warehouse();
    let route = dynamic_route(&graph, "START", &["A3", "A1"], Some("PACK")).unwrap();

    assert!(route.position("A1") < route.position("A3"));
    assert_eq!(
        route.nodes(),
        &["START", "A1", "A2", "A3", "PACK"].map(String::from)[..]
    );
    assert_eq!(route_cost(&graph, &route).unwrap(), 9.0);
}

#[test]
fn test_static_visits_first_stop_first_even_when_farther() {
    let graph = warehouse();
    let route = static_route(&graph, "START", &["B3", "A1"], None).unwrap();
    let b3 = route.position("B3").unwrap();
    let a1_after_b3 = route.nodes()[b3..].iter().any(|n| n == "A1");
    assert!(a1_after_b3, "A1 must be visited after B3: {:?}", route.nodes());
}

#[test]
fn test_routes_start_and_end_where_asked() {
    let graph = warehouse();
    let stops = ["B2", "A2", "B1"];
    for route in [
        static_route(&graph, "START", &stops, Some("PACK")).unwrap(),
        dynamic_route(&graph, "START", &stops, Some("PACK")).unwrap(),
    ] {
        assert_eq!(route.nodes().first().map(String::as_str), Some("START"));
        assert_eq!(route.last(), Some("PACK"));
        for stop in stops {
            assert!(route.position(stop).is_some(), "{stop} missing from {:?}", route.nodes());
        }
        assert!(route_cost(&graph, &route).is_ok());
    }
}

#[test]
fn test_dynamic_never_worse_on_fixture_orders() {
    let graph = warehouse();
    for stops in [vec!["A3", "A1"], vec!["B2", "A2"], vec!["B1"], vec!["B3", "A1", "B1", "A3"]] {
        let fixed = static_route(&graph, "START", &stops, Some("PACK")).unwrap();
        let greedy = dynamic_route(&graph, "START", &stops, Some("PACK")).unwrap();
        assert!(route_cost(&graph, &greedy).unwrap() <= route_cost(&graph, &fixed).unwrap());
    }
}

#[test]
fn test_unknown_stop() {
    let graph = warehouse();
    assert_eq!(
        static_route(&graph, "START", &["C9"], None),
        Err(PlannerError::UnknownNode("C9".to_string()))
    );
    assert_eq!(
        dynamic_route(&graph, "START", &["A1", "C9"], None),
        Err(PlannerError::UnknownNode("C9".to_string()))
    );
}

// ============================================================================
// Metrics
// ============================================================================

#[test]
fn test_single_node_route_costs_nothing() {
    let graph = warehouse();
    for node in graph.nodes() {
        assert_eq!(route_cost(&graph, &Route::new(vec![node.to_string()])).unwrap(), 0.0);
    }
}

#[test]
fn test_improvement_of_greedy_route() {
    assert_eq!(pct_improvement(100.0, 80.0), 20.0);
    assert_eq!(pct_improvement(0.0, 50.0), 0.0);
    assert_eq!(pct_improvement(-10.0, 5.0), 0.0);
    assert_eq!(pct_improvement(17.0, 9.0), 8.0 / 17.0 * 100.0);
}
