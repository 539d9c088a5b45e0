use crate::model::{Field, FieldKind, Table};

/// Fixed layout metrics supplied by the rendering collaborator.
#[derive(Debug, Clone)]
pub struct TableMetrics {
    pub table_width: f64,
    pub header_height: f64,
    pub row_height: f64,
}

impl Default for TableMetrics {
    fn default() -> Self {
        Self {
            table_width: 280.0,
            header_height: 40.0,
            row_height: 20.0,
        }
    }
}

impl TableMetrics {
    /// Rendered height of a table: header plus one row per visible field.
    pub fn table_height(&self, table: &Table) -> f64 {
        self.header_height + visible_row_count(&table.fields) as f64 * self.row_height
    }
}

/// Number of rows a table body renders: every field whose ancestors are all
/// expanded. A collapsed field still renders its own row; its children do not.
pub fn visible_row_count(fields: &[Field]) -> usize {
    let mut count = 0;
    let mut stack: Vec<&Field> = fields.iter().rev().collect();

    while let Some(field) = stack.pop() {
        count += 1;
        if !field.is_collapsed {
            if let FieldKind::Object(children) = &field.kind {
                stack.extend(children.iter().rev());
            }
        }
    }

    count
}
