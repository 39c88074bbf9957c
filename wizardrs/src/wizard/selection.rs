use std::collections::BTreeMap;

use crate::models::{AggregateFunc, QueryPattern};

/// Chosen tables, per-table column picks, and per-column aggregations.
///
/// Two invariants hold after every mutation:
/// - a table key exists in `columns` or `aggregations` only while that
///   table is selected, and never maps to an empty container;
/// - an aggregation for `(table, column)` exists only while the column
///   is selected.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    tables: Vec<String>,
    columns: BTreeMap<String, Vec<String>>,
    aggregations: BTreeMap<String, BTreeMap<String, AggregateFunc>>,
}

impl SelectionState {
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn columns(&self) -> &BTreeMap<String, Vec<String>> {
        &self.columns
    }

    pub fn aggregations(&self) -> &BTreeMap<String, BTreeMap<String, AggregateFunc>> {
        &self.aggregations
    }

    pub fn is_table_selected(&self, table: &str) -> bool {
        self.tables.iter().any(|t| t == table)
    }

    pub fn is_column_selected(&self, table: &str, column: &str) -> bool {
        self.columns
            .get(table)
            .is_some_and(|cols| cols.iter().any(|c| c == column))
    }

    pub fn aggregation(&self, table: &str, column: &str) -> Option<AggregateFunc> {
        self.aggregations.get(table)?.get(column).copied()
    }

    /// Add a table to the selection. Returns false if already selected.
    pub fn select_table(&mut self, table: &str) -> bool {
        if self.is_table_selected(table) {
            return false;
        }
        self.tables.push(table.to_string());
        true
    }

    /// Remove a table and cascade-delete its column picks and
    /// aggregations. Returns false if the table was not selected.
    pub fn deselect_table(&mut self, table: &str) -> bool {
        let Some(pos) = self.tables.iter().position(|t| t == table) else {
            return false;
        };
        self.tables.remove(pos);
        self.columns.remove(table);
        self.aggregations.remove(table);
        true
    }

    /// Add or remove a column pick. Removing a column also drops its
    /// aggregation; a table entry never survives with an empty set.
    pub fn toggle_column(&mut self, table: &str, column: &str) {
        let cols = self.columns.entry(table.to_string()).or_default();
        if let Some(pos) = cols.iter().position(|c| c == column) {
            cols.remove(pos);
            if cols.is_empty() {
                self.columns.remove(table);
            }
            self.remove_aggregation(table, column);
        } else {
            cols.push(column.to_string());
        }
    }

    /// Set or clear the aggregation for a selected column. Callers must
    /// only pass currently-selected columns; this is not re-validated.
    pub fn set_aggregation(&mut self, table: &str, column: &str, func: Option<AggregateFunc>) {
        match func {
            Some(func) => {
                self.aggregations
                    .entry(table.to_string())
                    .or_default()
                    .insert(column.to_string(), func);
            }
            None => self.remove_aggregation(table, column),
        }
    }

    fn remove_aggregation(&mut self, table: &str, column: &str) {
        if let Some(aggs) = self.aggregations.get_mut(table) {
            aggs.remove(column);
            if aggs.is_empty() {
                self.aggregations.remove(table);
            }
        }
    }

    /// True when at least one table has a non-empty column selection.
    pub fn has_column_selection(&self) -> bool {
        self.columns.values().any(|cols| !cols.is_empty())
    }

    /// Replace the whole selection from a pattern: its tables, its
    /// aggregations, and every column those aggregations reference.
    /// Aggregations for tables outside the pattern's table list are
    /// dropped to keep the invariants.
    pub fn apply_pattern(&mut self, pattern: &QueryPattern) {
        self.clear();
        for table in &pattern.default_tables {
            self.select_table(table);
        }
        for (table, aggs) in &pattern.aggregations {
            if !self.is_table_selected(table) {
                continue;
            }
            for (column, func) in aggs {
                self.toggle_column(table, column);
                self.set_aggregation(table, column, Some(*func));
            }
        }
    }

    pub fn clear(&mut self) {
        self.tables.clear();
        self.columns.clear();
        self.aggregations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_column_never_leaves_empty_set() {
        let mut state = SelectionState::default();
        state.select_table("orders");
        state.toggle_column("orders", "amount");
        state.toggle_column("orders", "amount");
        assert!(!state.columns().contains_key("orders"));
    }

    #[test]
    fn test_pattern_derives_columns_from_aggregations() {
        let pattern = QueryPattern {
            name: "revenue".to_string(),
            description: None,
            default_tables: vec!["A".to_string(), "B".to_string()],
            aggregations: [(
                "A".to_string(),
                [("x".to_string(), AggregateFunc::Sum)].into_iter().collect(),
            )]
            .into_iter()
            .collect(),
            formula: None,
        };
        let mut state = SelectionState::default();
        state.apply_pattern(&pattern);
        assert_eq!(state.tables(), ["A".to_string(), "B".to_string()]);
        assert_eq!(state.columns()["A"], vec!["x".to_string()]);
        assert_eq!(state.aggregation("A", "x"), Some(AggregateFunc::Sum));
        assert!(!state.columns().contains_key("B"));
    }
}
