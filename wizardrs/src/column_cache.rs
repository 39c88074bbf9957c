use std::collections::HashMap;

use crate::models::ColumnInfo;

/// Session-scoped cache of per-table column metadata. Each table is
/// fetched at most once while it stays selected; entries leave the cache
/// only through explicit removal (table deselected) or a wizard reset,
/// so a cached table never needs a second fetch mid-session.
#[derive(Debug, Default)]
pub struct ColumnCache {
    entries: HashMap<String, Vec<ColumnInfo>>,
}

impl ColumnCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: String, columns: Vec<ColumnInfo>) {
        self.entries.insert(table, columns);
    }

    pub fn get(&self, table: &str) -> Option<&[ColumnInfo]> {
        self.entries.get(table).map(Vec::as_slice)
    }

    pub fn contains(&self, table: &str) -> bool {
        self.entries.contains_key(table)
    }

    /// Look up one column's metadata within a cached table.
    pub fn column(&self, table: &str, column: &str) -> Option<&ColumnInfo> {
        self.get(table)?.iter().find(|c| c.name == column)
    }

    pub fn remove(&mut self, table: &str) {
        self.entries.remove(table);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
