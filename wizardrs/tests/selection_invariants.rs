//! Invariant tests for the table/column/aggregation selection state.

use sqlwizard::models::AggregateFunc;
use sqlwizard::wizard::SelectionState;

#[test]
fn no_table_key_maps_to_empty_column_set() {
    let mut state = SelectionState::default();
    state.select_table("orders");
    state.select_table("customers");

    state.toggle_column("orders", "amount");
    state.toggle_column("orders", "status");
    state.toggle_column("customers", "name");
    state.toggle_column("orders", "amount");
    state.toggle_column("orders", "status");
    state.toggle_column("customers", "name");
    state.toggle_column("customers", "name");

    for (table, cols) in state.columns() {
        assert!(!cols.is_empty(), "table {table} kept an empty column set");
    }
    assert!(!state.columns().contains_key("orders"));
    assert_eq!(state.columns()["customers"], vec!["name".to_string()]);
}

#[test]
fn aggregations_only_exist_for_selected_columns() {
    let mut state = SelectionState::default();
    state.select_table("orders");
    state.toggle_column("orders", "amount");
    state.toggle_column("orders", "qty");
    state.set_aggregation("orders", "amount", Some(AggregateFunc::Sum));
    state.set_aggregation("orders", "qty", Some(AggregateFunc::Avg));

    state.toggle_column("orders", "qty");

    for (table, aggs) in state.aggregations() {
        for column in aggs.keys() {
            assert!(
                state.is_column_selected(table, column),
                "aggregation for unselected column {table}.{column}"
            );
        }
    }
    assert_eq!(state.aggregation("orders", "qty"), None);
    assert_eq!(state.aggregation("orders", "amount"), Some(AggregateFunc::Sum));
}

#[test]
fn deselecting_table_cascades() {
    let mut state = SelectionState::default();
    state.select_table("orders");
    state.select_table("customers");
    state.toggle_column("orders", "amount");
    state.toggle_column("customers", "name");
    state.set_aggregation("orders", "amount", Some(AggregateFunc::Max));

    assert!(state.deselect_table("orders"));

    assert!(!state.is_table_selected("orders"));
    assert!(!state.columns().contains_key("orders"));
    assert!(!state.aggregations().contains_key("orders"));
    assert!(state.columns().contains_key("customers"));
}

#[test]
fn removing_last_column_drops_table_aggregation_entry() {
    let mut state = SelectionState::default();
    state.select_table("orders");
    state.toggle_column("orders", "amount");
    state.set_aggregation("orders", "amount", Some(AggregateFunc::Sum));

    state.toggle_column("orders", "amount");

    assert!(!state.aggregations().contains_key("orders"));
    assert!(!state.columns().contains_key("orders"));
}

#[test]
fn clearing_an_aggregation_prunes_empty_table_entry() {
    let mut state = SelectionState::default();
    state.select_table("orders");
    state.toggle_column("orders", "amount");
    state.set_aggregation("orders", "amount", Some(AggregateFunc::Count));
    state.set_aggregation("orders", "amount", None);

    assert!(!state.aggregations().contains_key("orders"));
    assert!(state.is_column_selected("orders", "amount"));
}

#[test]
fn column_selection_preserves_order() {
    let mut state = SelectionState::default();
    state.select_table("orders");
    state.toggle_column("orders", "zeta");
    state.toggle_column("orders", "alpha");
    state.toggle_column("orders", "mid");
    assert_eq!(
        state.columns()["orders"],
        vec!["zeta".to_string(), "alpha".to_string(), "mid".to_string()]
    );
}

#[test]
fn selecting_same_table_twice_is_a_no_op() {
    let mut state = SelectionState::default();
    assert!(state.select_table("orders"));
    assert!(!state.select_table("orders"));
    assert_eq!(state.tables().len(), 1);
    assert!(!state.deselect_table("missing"));
}
