use crate::models::QueryParams;

use super::date_range::DateRangeState;
use super::filters::FilterState;
use super::relationships::RelationshipState;
use super::selection::SelectionState;

/// Package the whole wizard state into one build-endpoint payload. Only
/// relationships with the toggle on are included.
pub(crate) fn assemble(
    selection: &SelectionState,
    relationships: &RelationshipState,
    filters: &FilterState,
    date_range: &DateRangeState,
) -> QueryParams {
    QueryParams {
        tables: selection.tables().to_vec(),
        columns: selection.columns().clone(),
        relationships: relationships.selected(),
        filters: filters.filters().to_vec(),
        date_range: date_range.range().clone(),
        aggregations: selection.aggregations().clone(),
    }
}
