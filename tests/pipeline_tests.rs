//! End-to-end pipeline tests: tables in, routing results and picker
//! recommendations out.

mod fixtures;

use pick_planner::forest::ForestOptions;
use pick_planner::pipeline::{PipelineOptions, PipelineOutput, run_end_to_end};
use pick_planner::table::Table;
use pick_planner::PlannerError;

use fixtures::{layout_table, orders_table, pickers_table};

fn run_fixture(options: &PipelineOptions) -> Result<PipelineOutput, PlannerError> {
    run_end_to_end(&layout_table(), &orders_table(), &pickers_table(), options)
}

fn fast_options() -> PipelineOptions {
    PipelineOptions {
        forest: ForestOptions {
            n_estimators: 20,
            ..ForestOptions::default()
        },
        ..PipelineOptions::default()
    }
}

#[test]
fn test_routing_results_per_order() {
    let output = run_fixture(&fast_options()).unwrap();

    let summary: Vec<(&str, &str, f64, f64)> = output
        .routing_results
        .iter()
        .map(|r| (r.order_id.as_str(), r.order_zone.as_str(), r.static_cost, r.dynamic_cost))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("O1", "A", 17.0, 9.0),
            ("O2", "B", 14.0, 13.0),
            ("O3", "A", 10.0, 10.0),
        ]
    );

    let o1 = &output.routing_results[0];
    assert_eq!(o1.improvement_pct, 8.0 / 17.0 * 100.0);
    assert_eq!(output.routing_results[2].improvement_pct, 0.0);
}

#[test]
fn test_training_rows_and_recommendations() {
    let output = run_fixture(&fast_options()).unwrap();

    assert_eq!(output.training_rows, 200 * 3);
    assert_eq!(output.picker_recommendations.len(), 3);
    for rec in &output.picker_recommendations {
        let ids: Vec<&str> = rec.predicted_times.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2", "P3"]);
        assert_eq!(rec.best_picker, "P1", "P1 dominates for {}", rec.order_id);

        let best = rec.predicted_times.iter().map(|(_, t)| *t).fold(f64::INFINITY, f64::min);
        assert_eq!(rec.predicted_times[0].1, best);
    }
}

#[test]
fn test_run_is_reproducible() {
    let first = run_fixture(&fast_options()).unwrap();
    let second = run_fixture(&fast_options()).unwrap();

    assert_eq!(first.routing_results, second.routing_results);
    assert_eq!(first.picker_recommendations, second.picker_recommendations);
    assert_eq!(first.graph.edges(), second.graph.edges());
}

#[test]
fn test_without_end_node() {
    let options = PipelineOptions {
        end_node: None,
        ..fast_options()
    };
    let output = run_fixture(&options).unwrap();

    let o1 = &output.routing_results[0];
    assert_eq!(o1.dynamic_route.last(), Some("A3"));
    assert_eq!(o1.dynamic_cost, 6.0);
}

#[test]
fn test_missing_layout_column_fails_run() {
    let layout = Table::new("layout", &["from", "to", "dist"]).with_row(&["START", "A1", "2"]);
    let err =
        run_end_to_end(&layout, &orders_table(), &pickers_table(), &fast_options()).unwrap_err();
    assert_eq!(
        err,
        PlannerError::Schema {
            table: "layout".to_string(),
            column: "distance".to_string()
        }
    );
}

#[test]
fn test_one_bad_order_fails_whole_run() {
    let orders = orders_table().with_row(&["O4", "Z9", "A"]);
    let err =
        run_end_to_end(&layout_table(), &orders, &pickers_table(), &fast_options()).unwrap_err();
    assert_eq!(err, PlannerError::UnknownNode("Z9".to_string()));
}

#[test]
fn test_no_pickers() {
    let pickers = Table::new(
        "pickers",
        &["picker_id", "avg_speed", "error_rate", "experience_years", "current_zone"],
    );
    let err =
        run_end_to_end(&layout_table(), &orders_table(), &pickers, &fast_options()).unwrap_err();
    assert_eq!(err, PlannerError::EmptyPickerSet);
}

#[test]
fn test_results_serialize_for_display() {
    let output = run_fixture(&fast_options()).unwrap();
    let json = serde_json::to_value(&output.routing_results[0]).unwrap();
    assert_eq!(json["order_id"], "O1");
    assert_eq!(json["static_cost"], 17.0);
    assert!(json["dynamic_route"]["nodes"].is_array());
}
