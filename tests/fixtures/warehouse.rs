//! Two-aisle warehouse used across integration tests.
//!
//! ```text
//!   START --2-- A1 --2-- A2 --2-- A3 --3-- PACK
//!     |         |        |        |         |
//!     3         4        4        4         3
//!     |         |        |        |         |
//!     +-------- B1 --2-- B2 --2-- B3 -------+
//! ```

use pick_planner::table::Table;

#[allow(dead_code)]
pub const LAYOUT_EDGES: &[(&str, &str, &str)] = &[
    ("START", "A1", "2"),
    ("A1", "A2", "2"),
    ("A2", "A3", "2"),
    ("A3", "PACK", "3"),
    ("START", "B1", "3"),
    ("B1", "B2", "2"),
    ("B2", "B3", "2"),
    ("B3", "PACK", "3"),
    ("A1", "B1", "4"),
    ("A2", "B2", "4"),
    ("A3", "B3", "4"),
];

#[allow(dead_code)]
pub fn layout_table() -> Table {
    let mut table = Table::new("layout", &["from", "to", "distance"]);
    for (from, to, distance) in LAYOUT_EDGES {
        table.push_row(&[from, to, distance]);
    }
    table
}

/// O1 lists its aisle-A stops far-to-near so the greedy route wins.
#[allow(dead_code)]
pub fn orders_table() -> Table {
    Table::new("orders", &["order_id", "locations", "order_zone"])
        .with_row(&["O1", "A3, A1", "A"])
        .with_row(&["O2", "B2,A2", "B"])
        .with_row(&["O3", "B1", ""])
}

/// P1 is faster and more accurate than everyone else.
#[allow(dead_code)]
pub fn pickers_table() -> Table {
    Table::new(
        "pickers",
        &["picker_id", "avg_speed", "error_rate", "experience_years", "current_zone"],
    )
    .with_row(&["P1", "1.6", "0.03", "6", "A"])
    .with_row(&["P2", "0.9", "0.15", "1", "B"])
    .with_row(&["P3", "1.2", "0.08", "3", "B"])
}
