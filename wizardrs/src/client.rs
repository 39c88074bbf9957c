use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::EndpointConfig;
use crate::error::{Result, WizardError};
use crate::models::{
    ColumnInfo, QueryParams, QueryPattern, RelationshipEndpoints, TableCatalogEntry,
};
use crate::service::{QueryService, RelationshipAnalysis, TokenProvider};

/// HTTP implementation of [`QueryService`]. Every response comes wrapped
/// in a `{status, ...}` envelope; any status other than `success` is
/// surfaced as a backend error.
pub struct HttpQueryService {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpQueryService {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            tokens,
        }
    }

    /// Build a client from endpoint configuration. A `timeout_ms` of zero
    /// leaves requests unbounded.
    pub fn from_config(config: &EndpointConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| WizardError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        if let Some('/') = self.base_url.chars().last() {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(self.tokens.auth_token())
            .query(query)
            .send()
            .await?;
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(self.tokens.auth_token())
            .json(body)
            .send()
            .await?;
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}

fn check_status(status: &str, endpoint: &str) -> Result<()> {
    if status == "success" {
        Ok(())
    } else {
        Err(WizardError::Backend(format!(
            "{endpoint} returned status {status}"
        )))
    }
}

#[async_trait]
impl QueryService for HttpQueryService {
    async fn fetch_tables(&self, connection_id: &str) -> Result<Vec<TableCatalogEntry>> {
        let envelope: TablesEnvelope = self
            .get("tables", &[("connection_id", connection_id)])
            .await?;
        check_status(&envelope.status, "tables")?;
        tracing::debug!(count = envelope.tables.len(), "fetched table catalog");
        Ok(envelope.tables)
    }

    async fn fetch_columns(&self, connection_id: &str, table: &str) -> Result<Vec<ColumnInfo>> {
        let envelope: ColumnsEnvelope = self
            .get(
                "columns",
                &[("connection_id", connection_id), ("table_name", table)],
            )
            .await?;
        check_status(&envelope.status, "columns")?;
        tracing::debug!(table, count = envelope.columns.len(), "fetched columns");
        Ok(envelope.columns)
    }

    async fn fetch_patterns(&self, connection_id: &str) -> Result<Vec<QueryPattern>> {
        let envelope: PatternsEnvelope = self
            .get("patterns", &[("connection_id", connection_id)])
            .await?;
        check_status(&envelope.status, "patterns")?;
        Ok(envelope.patterns)
    }

    async fn analyze_relationships(
        &self,
        connection_id: &str,
        tables: &[String],
    ) -> Result<RelationshipAnalysis> {
        let body = serde_json::json!({
            "connection_id": connection_id,
            "tables": tables,
        });
        let envelope: RelationshipsEnvelope = self.post("relationships", &body).await?;
        check_status(&envelope.status, "relationships")?;
        tracing::debug!(
            defined = envelope.defined_relationships.len(),
            suggested = envelope.suggested_relationships.len(),
            "analyzed relationships"
        );
        Ok(RelationshipAnalysis {
            defined: envelope.defined_relationships,
            suggested: envelope.suggested_relationships,
        })
    }

    async fn build_sql(&self, connection_id: &str, params: &QueryParams) -> Result<String> {
        let body = serde_json::json!({
            "connection_id": connection_id,
            "query_params": params,
        });
        let envelope: BuildEnvelope = self.post("build", &body).await?;
        check_status(&envelope.status, "build")?;
        Ok(envelope.sql)
    }
}

#[derive(Debug, Deserialize)]
struct TablesEnvelope {
    status: String,
    #[serde(default)]
    tables: Vec<TableCatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct ColumnsEnvelope {
    status: String,
    #[serde(default)]
    columns: Vec<ColumnInfo>,
}

#[derive(Debug, Deserialize)]
struct PatternsEnvelope {
    status: String,
    #[serde(default)]
    patterns: Vec<QueryPattern>,
}

#[derive(Debug, Deserialize)]
struct RelationshipsEnvelope {
    status: String,
    #[serde(default)]
    defined_relationships: Vec<RelationshipEndpoints>,
    #[serde(default)]
    suggested_relationships: Vec<RelationshipEndpoints>,
}

#[derive(Debug, Deserialize)]
struct BuildEnvelope {
    status: String,
    #[serde(default)]
    sql: String,
}
