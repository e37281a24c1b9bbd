//! Feature encoding shared by training and inference.
//!
//! Column order is fixed; the model is fitted and queried with the same
//! layout.

use crate::models::Picker;

/// Model input columns, in matrix order.
pub const FEATURE_COLUMNS: [&str; 7] = [
    "order_distance",
    "avg_speed",
    "error_rate",
    "experience_years",
    "zone_match",
    "order_zone_A",
    "order_zone_B",
];

/// Model target column.
pub const TARGET_COLUMN: &str = "completion_time";

/// One encoded (order, picker) row in [`FEATURE_COLUMNS`] order.
pub type FeatureVector = [f64; 7];

fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

/// Encodes an order against a picker.
///
/// `zone_match` is 1 when the order's zone equals the picker's current
/// zone. Zones other than "A" and "B" encode as all-zero one-hot.
pub fn encode_features(order_distance: f64, order_zone: &str, picker: &Picker) -> FeatureVector {
    [
        order_distance,
        picker.avg_speed,
        picker.error_rate,
        picker.experience_years,
        indicator(order_zone == picker.current_zone),
        indicator(order_zone == "A"),
        indicator(order_zone == "B"),
    ]
}
