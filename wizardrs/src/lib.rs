pub mod client;
pub mod column_cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod wizard;

use std::sync::Arc;

use crate::error::Result;

/// Create a wizard for a connection and load its table catalog.
pub async fn connect(
    service: Arc<dyn QueryService>,
    connection_id: impl Into<String>,
) -> Result<QueryWizard> {
    let mut wizard = QueryWizard::new(service, connection_id);
    wizard.load_catalog().await?;
    Ok(wizard)
}

pub use client::HttpQueryService;
pub use config::WizardConfig;
pub use error::WizardError;
pub use models::{
    AggregateFunc, ColumnInfo, DateRange, Filter, FilterOperator, QueryParams, QueryPattern,
    Relationship, RelationshipEndpoints, RelationshipKind, TableCatalogEntry,
};
pub use service::{QueryService, RelationshipAnalysis, StaticToken, TokenProvider};
pub use wizard::{DatePreset, QueryWizard, WizardStep};
