//! Table placement clamped to the canvas bounds.

use std::sync::Arc;

use crate::measure::TableMetrics;
use crate::model::{Coords, DatabaseSchema, Size, Table};

/// A drag update for one table.
#[derive(Debug, Clone)]
pub struct UpdateInfo {
    pub id: String,
    pub position: Coords,
    /// Rendered height of the table (header + visible rows), computed by the
    /// caller so the vertical bound tracks collapse state.
    pub total_height: f64,
}

/// Produce a schema where the matching table is clamped to the canvas.
/// Every other table is shared with the input schema.
pub fn calculate_table_position(
    schema: &DatabaseSchema,
    update: &UpdateInfo,
    canvas: Size,
    metrics: &TableMetrics,
) -> DatabaseSchema {
    let tables = schema
        .tables
        .iter()
        .map(|table| {
            if table.id == update.id {
                let mut moved = Table::clone(table);
                moved.x = clamp_axis(update.position.x, canvas.width - metrics.table_width);
                moved.y = clamp_axis(update.position.y, canvas.height - update.total_height);
                Arc::new(moved)
            } else {
                Arc::clone(table)
            }
        })
        .collect();

    DatabaseSchema {
        tables,
        relations: schema.relations.clone(),
    }
}

// Upper bound first, floor at zero second: a table larger than the canvas
// pins to the origin instead of escaping through a negative bound.
fn clamp_axis(value: f64, upper: f64) -> f64 {
    value.min(upper).max(0.0)
}
