use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One table as listed by the backend catalog endpoint. Read-only,
/// fetched once per connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCatalogEntry {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub preview_columns: Vec<String>,
}

/// Column metadata fetched per table. `data_type` is the raw backend
/// type tag; classification happens in `wizard::filters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub is_primary_key: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregateFunc {
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Defined,
    Suggested,
}

/// The four columns that identify a candidate join. This is the shape the
/// relationship-analysis endpoint returns; it is also the relationship's
/// identity (there is no surrogate id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipEndpoints {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
}

/// A candidate join plus its inclusion toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(flatten)]
    pub endpoints: RelationshipEndpoints,
    pub kind: RelationshipKind,
    pub selected: bool,
}

impl Relationship {
    /// Default inclusion on first population: defined joins are trusted,
    /// suggested ones are opt-in.
    pub fn default_selected(kind: RelationshipKind) -> bool {
        kind == RelationshipKind::Defined
    }
}

/// Comparison operators offered by the filter builder. Serialized as the
/// SQL tokens the backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Neq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "NOT LIKE")]
    NotLike,
    #[serde(rename = "IS NULL")]
    IsNull,
    #[serde(rename = "IS NOT NULL")]
    IsNotNull,
}

impl FilterOperator {
    /// The two operators that take no comparison value.
    pub fn is_nullity(self) -> bool {
        matches!(self, FilterOperator::IsNull | FilterOperator::IsNotNull)
    }
}

/// One predicate clause. `value` is `Value::Null` for the nullity
/// operators, a number for numeric-typed columns, a string otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    pub table: String,
    pub column: String,
    pub operator: FilterOperator,
    pub value: Value,
}

/// Optional inclusive date bounds. No ordering is enforced between the
/// two; the backend validates that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }
}

/// A named preset of tables and aggregations for one-click setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryPattern {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub default_tables: Vec<String>,
    #[serde(default)]
    pub aggregations: BTreeMap<String, BTreeMap<String, AggregateFunc>>,
    pub formula: Option<String>,
}

/// The payload sent to the build endpoint. Only relationships with
/// `selected == true` are included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryParams {
    pub tables: Vec<String>,
    pub columns: BTreeMap<String, Vec<String>>,
    pub relationships: Vec<Relationship>,
    pub filters: Vec<Filter>,
    pub date_range: DateRange,
    pub aggregations: BTreeMap<String, BTreeMap<String, AggregateFunc>>,
}
