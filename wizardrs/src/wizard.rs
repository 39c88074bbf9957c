use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::column_cache::ColumnCache;
use crate::error::Result;
use crate::models::{
    AggregateFunc, ColumnInfo, FilterOperator, QueryPattern, Relationship, RelationshipEndpoints,
    TableCatalogEntry,
};
use crate::service::QueryService;

mod assemble;
mod date_range;
mod filters;
mod relationships;
mod selection;
mod steps;

pub use date_range::{DatePreset, DateRangeState};
pub use filters::{classify, operators_for, ColumnClass, FilterDraft, FilterState};
pub use relationships::RelationshipState;
pub use selection::SelectionState;
pub use steps::WizardStep;

/// Invoked with the generated SQL so the hosting application can display
/// or execute it elsewhere.
pub type SqlCallback = Box<dyn Fn(&str) + Send + Sync>;

/// The multi-step query builder flow for one backend connection.
///
/// All state lives here and is mutated only through the named operations
/// below; step transitions run their backend side effects before the
/// step index moves. Backend failures never poison the wizard: the
/// failed operation records a message (global or table-scoped), leaves
/// the affected state empty, and returns the error so the host can
/// react; the user retries by re-triggering the step.
pub struct QueryWizard {
    connection_id: String,
    service: Arc<dyn QueryService>,
    step: WizardStep,
    catalog: Vec<TableCatalogEntry>,
    patterns: Vec<QueryPattern>,
    selection: SelectionState,
    relationships: RelationshipState,
    filters: FilterState,
    date_range: DateRangeState,
    column_cache: ColumnCache,
    column_errors: HashMap<String, String>,
    generated_sql: Option<String>,
    last_error: Option<String>,
    on_sql: Option<SqlCallback>,
}

impl QueryWizard {
    pub fn new(service: Arc<dyn QueryService>, connection_id: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
            service,
            step: WizardStep::SelectTables,
            catalog: Vec::new(),
            patterns: Vec::new(),
            selection: SelectionState::default(),
            relationships: RelationshipState::default(),
            filters: FilterState::default(),
            date_range: DateRangeState::default(),
            column_cache: ColumnCache::new(),
            column_errors: HashMap::new(),
            generated_sql: None,
            last_error: None,
            on_sql: None,
        }
    }

    /// Register the host callback fired on successful SQL generation.
    pub fn with_sql_callback(mut self, callback: SqlCallback) -> Self {
        self.on_sql = Some(callback);
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn step_index(&self) -> usize {
        self.step.index()
    }

    pub fn catalog(&self) -> &[TableCatalogEntry] {
        &self.catalog
    }

    pub fn patterns(&self) -> &[QueryPattern] {
        &self.patterns
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn relationships(&self) -> &RelationshipState {
        &self.relationships
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn date_range(&self) -> &DateRangeState {
        &self.date_range
    }

    pub fn generated_sql(&self) -> Option<&str> {
        self.generated_sql.as_deref()
    }

    /// The current global error banner, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The table-scoped error recorded for a failed column fetch.
    pub fn column_error(&self, table: &str) -> Option<&str> {
        self.column_errors.get(table).map(String::as_str)
    }

    /// Cached column metadata for a table, if its fetch has completed.
    pub fn columns(&self, table: &str) -> Option<&[ColumnInfo]> {
        self.column_cache.get(table)
    }

    /// Case-insensitive substring search over catalog names and
    /// descriptions. An empty query returns the full catalog.
    pub fn search_catalog(&self, query: &str) -> Vec<&TableCatalogEntry> {
        let needle = query.trim().to_lowercase();
        self.catalog
            .iter()
            .filter(|entry| {
                needle.is_empty()
                    || entry.name.to_lowercase().contains(&needle)
                    || entry
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Catalog and patterns
    // ------------------------------------------------------------------

    /// Fetch the table catalog for this connection. Fetched once per
    /// connection in normal use; safe to call again to retry.
    pub async fn load_catalog(&mut self) -> Result<()> {
        match self.service.fetch_tables(&self.connection_id).await {
            Ok(tables) => {
                tracing::debug!(count = tables.len(), "catalog loaded");
                self.catalog = tables;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(format!("failed to load tables: {e}"));
                Err(e)
            }
        }
    }

    /// Fetch the named presets available for this connection.
    pub async fn load_patterns(&mut self) -> Result<&[QueryPattern]> {
        match self.service.fetch_patterns(&self.connection_id).await {
            Ok(patterns) => {
                self.patterns = patterns;
                Ok(&self.patterns)
            }
            Err(e) => {
                self.last_error = Some(format!("failed to load patterns: {e}"));
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Step transitions
    // ------------------------------------------------------------------

    /// Move forward one step if the current step's gate holds, running
    /// its exit side effect first. Returns `Ok(false)` when the gate
    /// rejects (a silent no-op, matching a disabled Next button).
    ///
    /// Leaving `SelectColumns` runs relationship analysis; a failure
    /// keeps the wizard on that step. Leaving `SetDateRange` enters the
    /// preview and generates SQL; a generation failure still lands on
    /// `PreviewQuery` so the user can retreat and adjust, per the error
    /// banner.
    pub async fn advance(&mut self) -> Result<bool> {
        match self.step {
            WizardStep::SelectTables => {
                if self.selection.tables().is_empty() {
                    return Ok(false);
                }
            }
            WizardStep::SelectColumns => {
                if !self.selection.has_column_selection() {
                    return Ok(false);
                }
                self.run_relationship_analysis().await?;
            }
            WizardStep::DefineRelationships | WizardStep::AddFilters => {}
            WizardStep::SetDateRange => {
                self.step = WizardStep::PreviewQuery;
                self.generate().await?;
                return Ok(true);
            }
            WizardStep::PreviewQuery => return Ok(false),
        }
        if let Some(next) = self.step.next() {
            tracing::debug!(from = ?self.step, to = ?next, "wizard advance");
            self.step = next;
        }
        Ok(true)
    }

    /// Move back one step. No side effects; a no-op at the first step.
    pub fn retreat(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Discard everything and return to `SelectTables`. The fetched
    /// catalog and patterns are read-only per connection and survive.
    pub fn reset(&mut self) {
        self.step = WizardStep::SelectTables;
        self.selection.clear();
        self.relationships.clear();
        self.filters.clear();
        self.date_range.clear();
        self.column_cache.clear();
        self.column_errors.clear();
        self.generated_sql = None;
        self.last_error = None;
        tracing::debug!("wizard reset");
    }

    /// One-click setup from a preset, usable only from `SelectTables`:
    /// adopts the pattern's tables and aggregations (columns derived
    /// from the aggregations), jumps straight to `DefineRelationships`,
    /// and runs relationship analysis exactly as leaving `SelectColumns`
    /// would. An analysis failure leaves the relationship list empty
    /// with an error banner; the jump itself stands.
    pub async fn apply_pattern(&mut self, pattern: &QueryPattern) -> Result<bool> {
        if self.step != WizardStep::SelectTables {
            return Ok(false);
        }
        self.selection.apply_pattern(pattern);
        self.column_cache.clear();
        self.column_errors.clear();
        self.step = WizardStep::DefineRelationships;
        tracing::debug!(pattern = %pattern.name, "pattern applied");
        self.run_relationship_analysis().await?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Table and column operations
    // ------------------------------------------------------------------

    pub fn select_table(&mut self, table: &str) -> bool {
        self.selection.select_table(table)
    }

    /// Deselect a table, cascading its column picks and aggregations and
    /// evicting its cached metadata so re-selection fetches fresh.
    pub fn deselect_table(&mut self, table: &str) -> bool {
        let removed = self.selection.deselect_table(table);
        if removed {
            self.column_cache.remove(table);
            self.column_errors.remove(table);
        }
        removed
    }

    /// Fetch a table's column metadata the first time it becomes the
    /// active tab. At most one fetch per table while it stays selected:
    /// a cached result or a recorded failure both suppress re-fetching.
    /// A failure records a table-scoped error and leaves the column list
    /// empty without blocking other tables.
    pub async fn activate_table(&mut self, table: &str) -> Result<()> {
        if self.column_cache.contains(table) || self.column_errors.contains_key(table) {
            return Ok(());
        }
        match self.service.fetch_columns(&self.connection_id, table).await {
            Ok(columns) => {
                self.column_cache.insert(table.to_string(), columns);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(table, error = %e, "column fetch failed");
                self.column_errors
                    .insert(table.to_string(), format!("failed to load columns: {e}"));
                Err(e)
            }
        }
    }

    pub fn toggle_column(&mut self, table: &str, column: &str) {
        self.selection.toggle_column(table, column);
    }

    pub fn set_aggregation(&mut self, table: &str, column: &str, func: Option<AggregateFunc>) {
        self.selection.set_aggregation(table, column, func);
    }

    // ------------------------------------------------------------------
    // Relationship operations
    // ------------------------------------------------------------------

    pub fn toggle_relationship(&mut self, endpoints: &RelationshipEndpoints) -> bool {
        self.relationships.toggle(endpoints)
    }

    pub fn selected_relationships(&self) -> Vec<Relationship> {
        self.relationships.selected()
    }

    async fn run_relationship_analysis(&mut self) -> Result<()> {
        let tables = self.selection.tables().to_vec();
        match self
            .service
            .analyze_relationships(&self.connection_id, &tables)
            .await
        {
            Ok(analysis) => {
                self.relationships.replace(analysis);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.relationships.clear();
                self.last_error = Some(format!("failed to analyze relationships: {e}"));
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Filter operations
    // ------------------------------------------------------------------

    pub fn filter_draft(&self) -> &FilterDraft {
        self.filters.draft()
    }

    pub fn filter_draft_mut(&mut self) -> &mut FilterDraft {
        self.filters.draft_mut()
    }

    /// The operators offered for a column, based on its cached type tag.
    /// Unknown columns fall back to the minimal operator set.
    pub fn operators_for_column(&self, table: &str, column: &str) -> &'static [FilterOperator] {
        operators_for(self.column_class(table, column))
    }

    /// Try to accept the filter draft; silently refused when invalid.
    pub fn add_filter(&mut self) -> bool {
        let class = self.column_class(&self.filters.draft().table, &self.filters.draft().column);
        self.filters.add(class)
    }

    pub fn remove_filter(&mut self, index: usize) -> bool {
        self.filters.remove(index)
    }

    fn column_class(&self, table: &str, column: &str) -> ColumnClass {
        self.column_cache
            .column(table, column)
            .map(|info| classify(&info.data_type))
            .unwrap_or(ColumnClass::Other)
    }

    // ------------------------------------------------------------------
    // Date range operations
    // ------------------------------------------------------------------

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.date_range.set_start(start);
        self.date_range.set_end(end);
    }

    pub fn apply_date_preset(&mut self, preset: DatePreset) {
        self.date_range.apply_preset(preset);
    }

    pub fn clear_date_range(&mut self) {
        self.date_range.clear();
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// Assemble the payload and request SQL from the backend. Re-invoking
    /// re-sends the whole current selection. On success the SQL is stored
    /// and the host callback fires; on failure the previous SQL is
    /// discarded and an error banner is recorded.
    pub async fn generate(&mut self) -> Result<()> {
        let params = assemble::assemble(
            &self.selection,
            &self.relationships,
            &self.filters,
            &self.date_range,
        );
        match self.service.build_sql(&self.connection_id, &params).await {
            Ok(sql) => {
                tracing::debug!(
                    tables = params.tables.len(),
                    relationships = params.relationships.len(),
                    filters = params.filters.len(),
                    "sql generated"
                );
                if let Some(callback) = &self.on_sql {
                    callback(&sql);
                }
                self.generated_sql = Some(sql);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.generated_sql = None;
                self.last_error = Some(format!("failed to generate sql: {e}"));
                Err(e)
            }
        }
    }
}
