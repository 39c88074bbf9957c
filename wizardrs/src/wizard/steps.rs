use serde::{Deserialize, Serialize};

/// The ordered steps of the wizard. Forward motion stops at
/// `PreviewQuery`; `reset` is the only way back to a fresh state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SelectTables,
    SelectColumns,
    DefineRelationships,
    AddFilters,
    SetDateRange,
    PreviewQuery,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::SelectTables,
        WizardStep::SelectColumns,
        WizardStep::DefineRelationships,
        WizardStep::AddFilters,
        WizardStep::SetDateRange,
        WizardStep::PreviewQuery,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}
