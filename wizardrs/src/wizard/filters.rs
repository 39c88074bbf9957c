use serde_json::Value;

use crate::models::{Filter, FilterOperator};

/// Coarse classification of a backend type tag, driving which operators
/// the filter builder offers and how values are coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    Text,
    Numeric,
    Date,
    Other,
}

const TEXT_TAGS: [&str; 3] = ["varchar", "char", "text"];
const NUMERIC_TAGS: [&str; 4] = ["int", "float", "decimal", "numeric"];
const DATE_TAGS: [&str; 2] = ["date", "time"];

/// Classify a raw backend type tag by case-insensitive substring match.
pub fn classify(type_tag: &str) -> ColumnClass {
    let tag = type_tag.to_ascii_lowercase();
    if TEXT_TAGS.iter().any(|t| tag.contains(t)) {
        ColumnClass::Text
    } else if NUMERIC_TAGS.iter().any(|t| tag.contains(t)) {
        ColumnClass::Numeric
    } else if DATE_TAGS.iter().any(|t| tag.contains(t)) {
        ColumnClass::Date
    } else {
        ColumnClass::Other
    }
}

const TEXT_OPERATORS: [FilterOperator; 6] = [
    FilterOperator::Eq,
    FilterOperator::Neq,
    FilterOperator::Like,
    FilterOperator::NotLike,
    FilterOperator::IsNull,
    FilterOperator::IsNotNull,
];

const COMPARABLE_OPERATORS: [FilterOperator; 8] = [
    FilterOperator::Eq,
    FilterOperator::Neq,
    FilterOperator::Gt,
    FilterOperator::Gte,
    FilterOperator::Lt,
    FilterOperator::Lte,
    FilterOperator::IsNull,
    FilterOperator::IsNotNull,
];

const FALLBACK_OPERATORS: [FilterOperator; 4] = [
    FilterOperator::Eq,
    FilterOperator::Neq,
    FilterOperator::IsNull,
    FilterOperator::IsNotNull,
];

/// The operator set offered for a column class.
pub fn operators_for(class: ColumnClass) -> &'static [FilterOperator] {
    match class {
        ColumnClass::Text => &TEXT_OPERATORS,
        ColumnClass::Numeric | ColumnClass::Date => &COMPARABLE_OPERATORS,
        ColumnClass::Other => &FALLBACK_OPERATORS,
    }
}

/// The clause being edited. The table survives a successful add so that
/// several filters on one table can be entered quickly.
#[derive(Debug, Clone)]
pub struct FilterDraft {
    pub table: String,
    pub column: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl Default for FilterDraft {
    fn default() -> Self {
        Self {
            table: String::new(),
            column: String::new(),
            operator: FilterOperator::Eq,
            value: String::new(),
        }
    }
}

/// Ordered list of accepted predicate clauses plus the draft under edit.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    filters: Vec<Filter>,
    draft: FilterDraft,
}

impl FilterState {
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn draft(&self) -> &FilterDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FilterDraft {
        &mut self.draft
    }

    /// Try to accept the current draft. Rejections are silent no-ops:
    /// missing table/column, a non-nullity operator with an empty value,
    /// or a value that does not parse for a numeric column. On success
    /// the draft resets with the table kept sticky.
    pub fn add(&mut self, class: ColumnClass) -> bool {
        if self.draft.table.is_empty() || self.draft.column.is_empty() {
            return false;
        }
        let value = if self.draft.operator.is_nullity() {
            Value::Null
        } else {
            let trimmed = self.draft.value.trim();
            if trimmed.is_empty() {
                return false;
            }
            if class == ColumnClass::Numeric {
                match trimmed.parse::<f64>().ok().filter(|n| n.is_finite()) {
                    Some(n) => Value::from(n),
                    None => return false,
                }
            } else {
                Value::String(trimmed.to_string())
            }
        };

        self.filters.push(Filter {
            table: self.draft.table.clone(),
            column: self.draft.column.clone(),
            operator: self.draft.operator,
            value,
        });
        self.draft = FilterDraft {
            table: std::mem::take(&mut self.draft.table),
            ..FilterDraft::default()
        };
        true
    }

    /// Remove by position; clauses need not be unique so there is no
    /// identity-based lookup.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.filters.len() {
            self.filters.remove(index);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.filters.clear();
        self.draft = FilterDraft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tags() {
        assert_eq!(classify("VARCHAR(255)"), ColumnClass::Text);
        assert_eq!(classify("bigint"), ColumnClass::Numeric);
        assert_eq!(classify("DECIMAL(10,2)"), ColumnClass::Numeric);
        assert_eq!(classify("datetime2"), ColumnClass::Date);
        assert_eq!(classify("uniqueidentifier"), ColumnClass::Other);
    }

    #[test]
    fn test_operator_sets() {
        assert!(operators_for(ColumnClass::Text).contains(&FilterOperator::Like));
        assert!(!operators_for(ColumnClass::Numeric).contains(&FilterOperator::Like));
        assert!(operators_for(ColumnClass::Numeric).contains(&FilterOperator::Gte));
        assert_eq!(operators_for(ColumnClass::Other).len(), 4);
    }

    #[test]
    fn test_numeric_parse_failure_rejected() {
        let mut state = FilterState::default();
        state.draft_mut().table = "orders".to_string();
        state.draft_mut().column = "amount".to_string();
        state.draft_mut().value = "not a number".to_string();
        assert!(!state.add(ColumnClass::Numeric));
        assert!(state.filters().is_empty());
    }
}
