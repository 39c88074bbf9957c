use std::collections::HashMap;

use crate::models::{Relationship, RelationshipEndpoints, RelationshipKind};
use crate::service::RelationshipAnalysis;

/// Candidate joins between the selected tables, each with an independent
/// inclusion toggle. Identity is the endpoint 4-tuple.
#[derive(Debug, Clone, Default)]
pub struct RelationshipState {
    relationships: Vec<Relationship>,
}

impl RelationshipState {
    pub fn all(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn selected(&self) -> Vec<Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.selected)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// Replace the list with a fresh analysis result, defined joins
    /// first. A previously-empty list gets kind-based defaults
    /// (defined selected, suggested not); otherwise each surviving
    /// relationship keeps the toggle the user left it with, and only
    /// entries new to the list get defaults.
    pub fn replace(&mut self, analysis: RelationshipAnalysis) {
        let prior: HashMap<RelationshipEndpoints, bool> = self
            .relationships
            .drain(..)
            .map(|r| (r.endpoints, r.selected))
            .collect();

        let mut merge = |endpoints: Vec<RelationshipEndpoints>, kind: RelationshipKind| {
            for endpoints in endpoints {
                let selected = prior
                    .get(&endpoints)
                    .copied()
                    .unwrap_or_else(|| Relationship::default_selected(kind));
                self.relationships.push(Relationship {
                    endpoints,
                    kind,
                    selected,
                });
            }
        };
        merge(analysis.defined, RelationshipKind::Defined);
        merge(analysis.suggested, RelationshipKind::Suggested);
    }

    /// Flip the toggle of the relationship matching the 4-tuple identity.
    /// Returns false when no relationship matches.
    pub fn toggle(&mut self, endpoints: &RelationshipEndpoints) -> bool {
        match self
            .relationships
            .iter_mut()
            .find(|r| r.endpoints == *endpoints)
        {
            Some(rel) => {
                rel.selected = !rel.selected;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.relationships.clear();
    }
}
