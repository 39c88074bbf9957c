use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    ColumnInfo, QueryParams, QueryPattern, RelationshipEndpoints, TableCatalogEntry,
};

/// The two candidate-join lists produced by relationship analysis:
/// joins declared as foreign keys and joins guessed from column naming.
#[derive(Debug, Clone, Default)]
pub struct RelationshipAnalysis {
    pub defined: Vec<RelationshipEndpoints>,
    pub suggested: Vec<RelationshipEndpoints>,
}

/// Unified interface to the query service backend. The wizard never talks
/// HTTP directly; tests swap in an in-memory implementation.
#[async_trait]
pub trait QueryService: Send + Sync {
    async fn fetch_tables(&self, connection_id: &str) -> Result<Vec<TableCatalogEntry>>;
    async fn fetch_columns(&self, connection_id: &str, table: &str) -> Result<Vec<ColumnInfo>>;
    async fn fetch_patterns(&self, connection_id: &str) -> Result<Vec<QueryPattern>>;
    async fn analyze_relationships(
        &self,
        connection_id: &str,
        tables: &[String],
    ) -> Result<RelationshipAnalysis>;
    async fn build_sql(&self, connection_id: &str, params: &QueryParams) -> Result<String>;
}

/// Source of the bearer credential attached to every backend request.
/// Session handling lives outside this crate.
pub trait TokenProvider: Send + Sync {
    fn auth_token(&self) -> String;
}

/// Fixed token, useful for demos and tests.
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn auth_token(&self) -> String {
        self.0.clone()
    }
}
