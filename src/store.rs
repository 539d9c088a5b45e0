//! Snapshot-based schema state container.

use std::sync::Arc;

use crate::layout::{UpdateInfo, calculate_table_position};
use crate::measure::TableMetrics;
use crate::model::{Coords, DatabaseSchema, Size, Table, find_field_mut};

/// Contract violations reported by the strict store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate table id: {0}")]
    DuplicateTableId(String),
    #[error("table not found: {0}")]
    TableNotFound(String),
    #[error("field not found: {0}")]
    FieldNotFound(String),
}

/// Owns the authoritative schema and publishes immutable snapshots.
///
/// Every operation either publishes a new snapshot or leaves the current one
/// untouched; a snapshot is never mutated after publication, so consumers
/// holding the previous `Arc` can change-detect with `Arc::ptr_eq`.
pub struct SchemaStore {
    current: Arc<DatabaseSchema>,
    metrics: TableMetrics,
}

impl Default for SchemaStore {
    fn default() -> Self {
        Self::new(TableMetrics::default())
    }
}

impl SchemaStore {
    pub fn new(metrics: TableMetrics) -> Self {
        Self {
            current: Arc::new(DatabaseSchema::default()),
            metrics,
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<DatabaseSchema> {
        Arc::clone(&self.current)
    }

    pub fn schema(&self) -> &DatabaseSchema {
        &self.current
    }

    /// Replace the schema wholesale. No validation happens at this layer.
    pub fn load_schema(&mut self, schema: DatabaseSchema) {
        self.current = Arc::new(schema);
    }

    /// Append a table to the draw order. Duplicate ids are a caller contract
    /// violation; use [`SchemaStore::try_add_table`] to have them reported.
    pub fn add_table(&mut self, table: Table) {
        let mut next = DatabaseSchema::clone(&self.current);
        next.tables.push(Arc::new(table));
        self.current = Arc::new(next);
    }

    pub fn try_add_table(&mut self, table: Table) -> Result<(), StoreError> {
        if self.current.table(&table.id).is_some() {
            return Err(StoreError::DuplicateTableId(table.id));
        }
        self.add_table(table);
        Ok(())
    }

    /// Replace the table with a matching id, keeping its slot in the draw
    /// order. No-op when the id is unknown.
    pub fn update_full_table(&mut self, table: Table) {
        let Some(index) = self.current.tables.iter().position(|t| t.id == table.id) else {
            return;
        };
        let mut next = DatabaseSchema::clone(&self.current);
        next.tables[index] = Arc::new(table);
        self.current = Arc::new(next);
    }

    /// Clamp the table to the canvas and move it to the end of the draw
    /// order, so a dragged table renders above the rest. The relative order
    /// of the other tables is preserved. No-op when the id is unknown.
    pub fn update_table_position(
        &mut self,
        id: &str,
        position: Coords,
        total_height: f64,
        canvas: Size,
    ) {
        if self.current.table(id).is_none() {
            return;
        }

        let update = UpdateInfo {
            id: id.to_string(),
            position,
            total_height,
        };
        let mut next = calculate_table_position(&self.current, &update, canvas, &self.metrics);
        if let Some(index) = next.tables.iter().position(|t| t.id == id) {
            let moved = next.tables.remove(index);
            next.tables.push(moved);
        }
        self.current = Arc::new(next);
    }

    /// Flip a field's collapse flag wherever it sits in the table's field
    /// tree. No-op when the table or field is unknown.
    pub fn toggle_field_collapse(&mut self, table_id: &str, field_id: &str) {
        let _ = self.try_toggle_field_collapse(table_id, field_id);
    }

    pub fn try_toggle_field_collapse(
        &mut self,
        table_id: &str,
        field_id: &str,
    ) -> Result<(), StoreError> {
        let Some(index) = self.current.tables.iter().position(|t| t.id == table_id) else {
            return Err(StoreError::TableNotFound(table_id.to_string()));
        };

        let mut table = Table::clone(&self.current.tables[index]);
        let Some(field) = find_field_mut(&mut table.fields, field_id) else {
            return Err(StoreError::FieldNotFound(field_id.to_string()));
        };
        field.is_collapsed = !field.is_collapsed;

        let mut next = DatabaseSchema::clone(&self.current);
        next.tables[index] = Arc::new(table);
        self.current = Arc::new(next);
        Ok(())
    }
}
