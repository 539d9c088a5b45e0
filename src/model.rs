use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
}

/// Canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A table field. Object-typed fields nest to arbitrary depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawField", into = "RawField")]
pub struct Field {
    pub id: String,
    pub name: String,
    pub is_collapsed: bool,
    pub kind: FieldKind,
}

/// Field payload: a scalar type tag, or a composite holding child fields.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Scalar(String),
    Object(Vec<Field>),
}

impl Field {
    pub fn children(&self) -> Option<&[Field]> {
        match &self.kind {
            FieldKind::Object(children) => Some(children),
            FieldKind::Scalar(_) => None,
        }
    }
}

/// Wire form of [`Field`]: the editor's JSON carries a `type` tag plus an
/// optional `children` array instead of a sum type.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    id: String,
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    is_collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<RawField>>,
}

impl From<RawField> for Field {
    fn from(raw: RawField) -> Self {
        let kind = if raw.field_type == "object" {
            let children = raw
                .children
                .unwrap_or_default()
                .into_iter()
                .map(Field::from)
                .collect();
            FieldKind::Object(children)
        } else {
            // Non-object fields never render children; any present are dropped.
            FieldKind::Scalar(raw.field_type)
        };

        Field {
            id: raw.id,
            name: raw.name,
            is_collapsed: raw.is_collapsed,
            kind,
        }
    }
}

impl From<Field> for RawField {
    fn from(field: Field) -> Self {
        let (field_type, children) = match field.kind {
            FieldKind::Object(children) => (
                "object".to_string(),
                Some(children.into_iter().map(RawField::from).collect()),
            ),
            FieldKind::Scalar(tag) => (tag, None),
        };

        RawField {
            id: field.id,
            name: field.name,
            field_type,
            is_collapsed: field.is_collapsed,
            children,
        }
    }
}

/// A table box on the canvas: id, header label, top-left position and the
/// ordered field forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub table_name: String,
    pub x: f64,
    pub y: f64,
    pub fields: Vec<Field>,
}

/// Cardinality of a relationship line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    #[serde(rename = "1:1")]
    OneToOne,
    #[serde(rename = "1:M")]
    OneToMany,
    #[serde(rename = "M:1")]
    ManyToOne,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::OneToOne => write!(f, "1:1"),
            RelationKind::OneToMany => write!(f, "1:M"),
            RelationKind::ManyToOne => write!(f, "M:1"),
        }
    }
}

/// A relationship between two fields, possibly in the same table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub id: String,
    pub from_table_id: String,
    pub from_field_id: String,
    pub to_table_id: String,
    pub to_field_id: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
}

/// The whole canvas document. Tables are held behind `Arc` so a structural
/// update shares every table it does not touch; consumers holding the
/// previous snapshot can change-detect with `Arc::ptr_eq`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSchema {
    pub tables: Vec<Arc<Table>>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl DatabaseSchema {
    pub fn table(&self, id: &str) -> Option<&Arc<Table>> {
        self.tables.iter().find(|t| t.id == id)
    }
}

/// Depth-first pre-order search over a field forest, returning the first
/// field with a matching id.
///
/// Iterative so deeply nested schemas cannot exhaust the call stack.
pub fn find_field<'a>(fields: &'a [Field], id: &str) -> Option<&'a Field> {
    let mut stack: Vec<&Field> = fields.iter().rev().collect();

    while let Some(field) = stack.pop() {
        if field.id == id {
            return Some(field);
        }
        if let FieldKind::Object(children) = &field.kind {
            stack.extend(children.iter().rev());
        }
    }

    None
}

/// Mutable counterpart of [`find_field`].
pub fn find_field_mut<'a>(fields: &'a mut [Field], id: &str) -> Option<&'a mut Field> {
    let mut stack: Vec<&mut Field> = fields.iter_mut().rev().collect();

    while let Some(field) = stack.pop() {
        if field.id == id {
            return Some(field);
        }
        if let Field {
            kind: FieldKind::Object(children),
            ..
        } = field
        {
            stack.extend(children.iter_mut().rev());
        }
    }

    None
}
