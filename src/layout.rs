//! Geometry engine: table placement and relationship-line anchors.

mod anchors;
mod placement;

pub use anchors::{
    RelationAnchors, XRelationCoords, YRelationCoords, relation_anchor_points, relation_x_coords,
    relation_y_coords, relation_y_offset,
};
pub use placement::{UpdateInfo, calculate_table_position};
