//! Order and picker records, and their loaders from input tables.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::table::Table;

/// A customer order: the locations that have to be picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    /// Pick locations, in the order they were listed.
    pub locations: Vec<String>,
    /// Zone of the order. `None` when the input did not say.
    pub order_zone: Option<String>,
}

impl Order {
    pub fn new(order_id: impl Into<String>, locations: &[&str]) -> Self {
        Self {
            order_id: order_id.into(),
            locations: locations.iter().map(|l| l.to_string()).collect(),
            order_zone: None,
        }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.order_zone = Some(zone.into());
        self
    }

    /// Zone of the order, falling back to `default` when unset.
    pub fn zone_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.order_zone.as_deref().unwrap_or(default)
    }
}

/// A human picker who can be assigned to orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picker {
    pub picker_id: String,
    /// Travel speed in distance units per time unit.
    pub avg_speed: f64,
    /// Fraction of time lost to rework, in [0, 1].
    pub error_rate: f64,
    pub experience_years: f64,
    pub current_zone: String,
}

impl Picker {
    pub fn new(
        picker_id: impl Into<String>,
        avg_speed: f64,
        error_rate: f64,
        experience_years: f64,
        current_zone: impl Into<String>,
    ) -> Self {
        Self {
            picker_id: picker_id.into(),
            avg_speed,
            error_rate,
            experience_years,
            current_zone: current_zone.into(),
        }
    }
}

/// Splits a comma-separated location list, trimming blanks away.
pub fn parse_locations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads orders from a table with `order_id`, `locations` and an optional
/// `order_zone` column. Blank zone cells are treated as absent.
pub fn orders_from_table(table: &Table) -> Result<Vec<Order>> {
    let cols = table.require(&["order_id", "locations"])?;
    let zone_col = table.column("order_zone").ok();

    let mut orders = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let order_id = table.cell(row, cols[0]);
        if order_id.is_empty() {
            return Err(PlannerError::invalid_value(&table.name, "order_id", row, order_id));
        }
        let order_zone = zone_col
            .map(|col| table.cell(row, col))
            .filter(|zone| !zone.is_empty())
            .map(str::to_string);

        orders.push(Order {
            order_id: order_id.to_string(),
            locations: parse_locations(table.cell(row, cols[1])),
            order_zone,
        });
    }

    Ok(orders)
}

/// Reads pickers from a table with `picker_id`, `avg_speed`, `error_rate`,
/// `experience_years` and `current_zone` columns.
pub fn pickers_from_table(table: &Table) -> Result<Vec<Picker>> {
    let cols = table.require(&[
        "picker_id",
        "avg_speed",
        "error_rate",
        "experience_years",
        "current_zone",
    ])?;

    let mut pickers = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let picker_id = table.cell(row, cols[0]);
        if picker_id.is_empty() {
            return Err(PlannerError::invalid_value(&table.name, "picker_id", row, picker_id));
        }

        pickers.push(Picker {
            picker_id: picker_id.to_string(),
            avg_speed: table.cell_f64(row, cols[1])?,
            error_rate: table.cell_f64(row, cols[2])?,
            experience_years: table.cell_f64(row, cols[3])?,
            current_zone: table.cell(row, cols[4]).to_string(),
        });
    }

    Ok(pickers)
}
