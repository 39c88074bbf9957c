//! Filter builder rules: operator sets per column class, draft
//! validation, and value coercion.

use serde_json::Value;
use sqlwizard::models::FilterOperator;
use sqlwizard::wizard::{classify, operators_for, ColumnClass, FilterState};

fn draft(state: &mut FilterState, table: &str, column: &str, op: FilterOperator, value: &str) {
    let d = state.draft_mut();
    d.table = table.to_string();
    d.column = column.to_string();
    d.operator = op;
    d.value = value.to_string();
}

#[test]
fn nullity_operator_accepts_empty_value() {
    let mut state = FilterState::default();
    draft(&mut state, "orders", "status", FilterOperator::IsNull, "");
    assert!(state.add(ColumnClass::Text));
    assert_eq!(state.filters()[0].value, Value::Null);
}

#[test]
fn comparison_operator_rejects_empty_value() {
    let mut state = FilterState::default();
    draft(&mut state, "orders", "status", FilterOperator::Eq, "   ");
    assert!(!state.add(ColumnClass::Text));
    assert!(state.filters().is_empty());
}

#[test]
fn numeric_column_stores_a_number() {
    let mut state = FilterState::default();
    draft(&mut state, "orders", "qty", FilterOperator::Gte, " 42 ");
    assert!(state.add(ColumnClass::Numeric));
    assert_eq!(state.filters()[0].value, Value::from(42.0));
}

#[test]
fn text_column_stores_trimmed_string() {
    let mut state = FilterState::default();
    draft(&mut state, "orders", "status", FilterOperator::Like, " open ");
    assert!(state.add(ColumnClass::Text));
    assert_eq!(state.filters()[0].value, Value::String("open".to_string()));
}

#[test]
fn missing_column_is_rejected() {
    let mut state = FilterState::default();
    draft(&mut state, "orders", "", FilterOperator::Eq, "x");
    assert!(!state.add(ColumnClass::Text));
}

#[test]
fn table_stays_sticky_after_add() {
    let mut state = FilterState::default();
    draft(&mut state, "orders", "status", FilterOperator::Eq, "open");
    assert!(state.add(ColumnClass::Text));

    let d = state.draft();
    assert_eq!(d.table, "orders");
    assert_eq!(d.column, "");
    assert_eq!(d.operator, FilterOperator::Eq);
    assert_eq!(d.value, "");
}

#[test]
fn remove_is_positional() {
    let mut state = FilterState::default();
    for value in ["a", "b", "a"] {
        draft(&mut state, "orders", "status", FilterOperator::Eq, value);
        assert!(state.add(ColumnClass::Text));
    }
    assert!(state.remove(1));
    assert_eq!(state.filters().len(), 2);
    assert_eq!(state.filters()[0].value, Value::String("a".to_string()));
    assert_eq!(state.filters()[1].value, Value::String("a".to_string()));
    assert!(!state.remove(5));
}

#[test]
fn operator_sets_match_column_classes() {
    let text = operators_for(ColumnClass::Text);
    assert_eq!(
        text,
        [
            FilterOperator::Eq,
            FilterOperator::Neq,
            FilterOperator::Like,
            FilterOperator::NotLike,
            FilterOperator::IsNull,
            FilterOperator::IsNotNull,
        ]
    );

    let numeric = operators_for(ColumnClass::Numeric);
    assert!(numeric.contains(&FilterOperator::Lt));
    assert!(!numeric.contains(&FilterOperator::Like));
    assert_eq!(numeric, operators_for(ColumnClass::Date));

    assert_eq!(
        operators_for(ColumnClass::Other),
        [
            FilterOperator::Eq,
            FilterOperator::Neq,
            FilterOperator::IsNull,
            FilterOperator::IsNotNull,
        ]
    );
}

#[test]
fn classification_is_case_insensitive_substring() {
    assert_eq!(classify("NVARCHAR(50)"), ColumnClass::Text);
    assert_eq!(classify("tinyint unsigned"), ColumnClass::Numeric);
    assert_eq!(classify("NUMERIC(18,4)"), ColumnClass::Numeric);
    assert_eq!(classify("TIMESTAMP"), ColumnClass::Date);
    assert_eq!(classify("date"), ColumnClass::Date);
    assert_eq!(classify("bit"), ColumnClass::Other);
}
