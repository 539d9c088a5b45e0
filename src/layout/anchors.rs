//! Relationship-line anchor computation.
//!
//! A relationship line runs between two field rows, anchored on the table
//! edge that faces the other endpoint. The vertical coordinate walks the
//! table's visible field list, so collapsed subtrees shift every row that
//! renders below them.

use crate::measure::TableMetrics;
use crate::model::{Coords, DatabaseSchema, Field, FieldKind, Relation, Table};

/// Horizontal anchor pair for a relationship line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XRelationCoords {
    pub x_origin: f64,
    pub x_destination: f64,
}

/// Vertical anchor pair for a relationship line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YRelationCoords {
    pub y_origin: f64,
    pub y_destination: f64,
}

/// Canvas endpoints of one relationship line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelationAnchors {
    pub origin: Coords,
    pub destination: Coords,
}

/// Pick the horizontal edge of each table the line should attach to: the
/// right edge when the table sits left of its counterpart, the left edge
/// otherwise. Evaluated independently per table.
pub fn relation_x_coords(
    origin: &Table,
    destination: &Table,
    metrics: &TableMetrics,
) -> XRelationCoords {
    let x_origin = if origin.x < destination.x {
        origin.x + metrics.table_width
    } else {
        origin.x
    };
    let x_destination = if destination.x < origin.x {
        destination.x + metrics.table_width
    } else {
        destination.x
    };

    XRelationCoords {
        x_origin,
        x_destination,
    }
}

/// Vertical center of a field's rendered row.
///
/// Walks the field forest in document order, advancing by one row height for
/// every field not suppressed by a collapsed ancestor. A field's own collapse
/// state never suppresses its row; only being inside a collapsed ancestor
/// does. Returns `None` when the id is not in the table.
pub fn relation_y_offset(table: &Table, field_id: &str, metrics: &TableMetrics) -> Option<f64> {
    let mut y = table.y + metrics.header_height;
    let mut stack: Vec<(&Field, bool)> = table.fields.iter().rev().map(|f| (f, false)).collect();

    while let Some((field, suppressed)) = stack.pop() {
        if field.id == field_id {
            return Some(y + metrics.row_height / 2.0);
        }
        if !suppressed {
            y += metrics.row_height;
        }
        if let FieldKind::Object(children) = &field.kind {
            // Suppression latches: once an ancestor is collapsed it stays
            // collapsed for the whole subtree.
            let child_suppressed = suppressed || field.is_collapsed;
            stack.extend(children.iter().rev().map(|f| (f, child_suppressed)));
        }
    }

    None
}

/// Row centers for both endpoints of a relation.
pub fn relation_y_coords(
    origin: &Table,
    origin_field_id: &str,
    destination: &Table,
    destination_field_id: &str,
    metrics: &TableMetrics,
) -> Option<YRelationCoords> {
    Some(YRelationCoords {
        y_origin: relation_y_offset(origin, origin_field_id, metrics)?,
        y_destination: relation_y_offset(destination, destination_field_id, metrics)?,
    })
}

/// Resolve a relation into its two anchor points. `None` when either table
/// or field id is unknown to the schema.
pub fn relation_anchor_points(
    schema: &DatabaseSchema,
    relation: &Relation,
    metrics: &TableMetrics,
) -> Option<RelationAnchors> {
    let origin = schema.table(&relation.from_table_id)?;
    let destination = schema.table(&relation.to_table_id)?;

    let xs = relation_x_coords(origin, destination, metrics);
    let ys = relation_y_coords(
        origin,
        &relation.from_field_id,
        destination,
        &relation.to_field_id,
        metrics,
    )?;

    Some(RelationAnchors {
        origin: Coords {
            x: xs.x_origin,
            y: ys.y_origin,
        },
        destination: Coords {
            x: xs.x_destination,
            y: ys.y_destination,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationKind;
    use std::sync::Arc;

    fn scalar(id: &str) -> Field {
        Field {
            id: id.to_string(),
            name: id.to_string(),
            is_collapsed: false,
            kind: FieldKind::Scalar("string".to_string()),
        }
    }

    fn object(id: &str, is_collapsed: bool, children: Vec<Field>) -> Field {
        Field {
            id: id.to_string(),
            name: id.to_string(),
            is_collapsed,
            kind: FieldKind::Object(children),
        }
    }

    fn table(id: &str, x: f64, y: f64, fields: Vec<Field>) -> Table {
        Table {
            id: id.to_string(),
            table_name: id.to_string(),
            x,
            y,
            fields,
        }
    }

    fn metrics() -> TableMetrics {
        TableMetrics {
            table_width: 200.0,
            header_height: 40.0,
            row_height: 20.0,
        }
    }

    #[test]
    fn test_x_coords_face_each_other() {
        let m = metrics();
        let origin = table("a", 0.0, 0.0, Vec::new());
        let destination = table("b", 300.0, 0.0, Vec::new());

        let xs = relation_x_coords(&origin, &destination, &m);
        assert_eq!(xs.x_origin, 200.0);
        assert_eq!(xs.x_destination, 300.0);

        // Swapped roles mirror the rule.
        let xs = relation_x_coords(&destination, &origin, &m);
        assert_eq!(xs.x_origin, 300.0);
        assert_eq!(xs.x_destination, 200.0);
    }

    #[test]
    fn test_x_coords_equal_x_uses_left_edges() {
        let m = metrics();
        let origin = table("a", 100.0, 0.0, Vec::new());
        let destination = table("b", 100.0, 300.0, Vec::new());

        let xs = relation_x_coords(&origin, &destination, &m);
        assert_eq!(xs.x_origin, 100.0);
        assert_eq!(xs.x_destination, 100.0);
    }

    fn sample_table() -> Table {
        table(
            "t",
            0.0,
            100.0,
            vec![
                scalar("F1"),
                object("F2", true, vec![scalar("F3"), scalar("F4")]),
                scalar("F5"),
            ],
        )
    }

    #[test]
    fn test_y_offset_first_row() {
        let y = relation_y_offset(&sample_table(), "F1", &metrics()).unwrap();
        assert_eq!(y, 100.0 + 40.0 + 10.0);
    }

    #[test]
    fn test_y_offset_skips_collapsed_subtree() {
        // F1 and F2 each cost a row; F3/F4 are suppressed by F2's collapse.
        let y = relation_y_offset(&sample_table(), "F5", &metrics()).unwrap();
        assert_eq!(y, 100.0 + 40.0 + 20.0 + 20.0 + 10.0);
    }

    #[test]
    fn test_y_offset_expanded_subtree_counts_rows() {
        let mut t = sample_table();
        crate::model::find_field_mut(&mut t.fields, "F2").unwrap().is_collapsed = false;

        let y = relation_y_offset(&t, "F5", &metrics()).unwrap();
        assert_eq!(y, 100.0 + 40.0 + 4.0 * 20.0 + 10.0);

        // A nested target inside the expanded subtree.
        let y = relation_y_offset(&t, "F4", &metrics()).unwrap();
        assert_eq!(y, 100.0 + 40.0 + 3.0 * 20.0 + 10.0);
    }

    #[test]
    fn test_y_offset_collapsed_target_row_still_counts() {
        // The target's own collapse state does not suppress its row.
        let y = relation_y_offset(&sample_table(), "F2", &metrics()).unwrap();
        assert_eq!(y, 100.0 + 40.0 + 20.0 + 10.0);
    }

    #[test]
    fn test_y_offset_sibling_after_collapsed_branch_not_suppressed() {
        // Two object branches at the same level: the first collapsed, the
        // second expanded. Leaving the first must not latch suppression onto
        // the second.
        let t = table(
            "t",
            0.0,
            0.0,
            vec![
                object("A", true, vec![scalar("A1")]),
                object("B", false, vec![scalar("B1")]),
            ],
        );

        let y = relation_y_offset(&t, "B1", &metrics()).unwrap();
        // Rows before B1: A (1) and B (1); A1 contributes nothing.
        assert_eq!(y, 40.0 + 2.0 * 20.0 + 10.0);
    }

    #[test]
    fn test_y_offset_missing_field() {
        assert!(relation_y_offset(&sample_table(), "Z", &metrics()).is_none());
    }

    #[test]
    fn test_relation_anchor_points() {
        let m = metrics();
        let schema = DatabaseSchema {
            tables: vec![
                Arc::new(table("t1", 0.0, 100.0, vec![scalar("F1")])),
                Arc::new(table("t2", 300.0, 0.0, vec![scalar("G1")])),
            ],
            relations: Vec::new(),
        };
        let relation = Relation {
            id: "r1".to_string(),
            from_table_id: "t1".to_string(),
            from_field_id: "F1".to_string(),
            to_table_id: "t2".to_string(),
            to_field_id: "G1".to_string(),
            kind: RelationKind::OneToMany,
        };

        let anchors = relation_anchor_points(&schema, &relation, &m).unwrap();
        assert_eq!(anchors.origin, Coords { x: 200.0, y: 150.0 });
        assert_eq!(anchors.destination, Coords { x: 300.0, y: 50.0 });
    }

    #[test]
    fn test_relation_anchor_points_unresolved() {
        let m = metrics();
        let schema = DatabaseSchema {
            tables: vec![Arc::new(table("t1", 0.0, 0.0, vec![scalar("F1")]))],
            relations: Vec::new(),
        };
        let relation = Relation {
            id: "r1".to_string(),
            from_table_id: "t1".to_string(),
            from_field_id: "F1".to_string(),
            to_table_id: "missing".to_string(),
            to_field_id: "G1".to_string(),
            kind: RelationKind::OneToOne,
        };

        assert!(relation_anchor_points(&schema, &relation, &m).is_none());

        let relation = Relation {
            to_table_id: "t1".to_string(),
            to_field_id: "nope".to_string(),
            ..relation
        };
        assert!(relation_anchor_points(&schema, &relation, &m).is_none());
    }
}
