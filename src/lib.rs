pub mod layout;
pub mod measure;
pub mod model;
pub mod store;

use wasm_bindgen::prelude::*;

use layout::{UpdateInfo, calculate_table_position, relation_anchor_points};
use measure::TableMetrics;
use model::{Coords, DatabaseSchema, Size};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct AnchorLine {
    relation_id: String,
    origin: Coords,
    destination: Coords,
}

/// Compute the anchor endpoints for every relation in a schema JSON document.
/// Relations whose table or field ids do not resolve are skipped.
#[wasm_bindgen(js_name = "relationAnchors")]
pub fn relation_anchors(schema_json: &str) -> Result<String, String> {
    let schema: DatabaseSchema = serde_json::from_str(schema_json).map_err(|e| e.to_string())?;
    let metrics = TableMetrics::default();

    let lines: Vec<AnchorLine> = schema
        .relations
        .iter()
        .filter_map(|relation| {
            relation_anchor_points(&schema, relation, &metrics).map(|anchors| AnchorLine {
                relation_id: relation.id.clone(),
                origin: anchors.origin,
                destination: anchors.destination,
            })
        })
        .collect();

    serde_json::to_string(&lines).map_err(|e| e.to_string())
}

/// Clamp a dragged table to the canvas and return the updated schema JSON.
/// The table's rendered height is derived from its visible rows.
#[wasm_bindgen(js_name = "moveTable")]
pub fn move_table(
    schema_json: &str,
    table_id: &str,
    x: f64,
    y: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<String, String> {
    let schema: DatabaseSchema = serde_json::from_str(schema_json).map_err(|e| e.to_string())?;
    let metrics = TableMetrics::default();

    let total_height = schema
        .table(table_id)
        .map(|t| metrics.table_height(t))
        .ok_or_else(|| format!("table not found: {table_id}"))?;

    let update = UpdateInfo {
        id: table_id.to_string(),
        position: Coords { x, y },
        total_height,
    };
    let canvas = Size {
        width: canvas_width,
        height: canvas_height,
    };
    let moved = calculate_table_position(&schema, &update, canvas, &metrics);

    serde_json::to_string(&moved).map_err(|e| e.to_string())
}
