use chrono::{Duration, Local, NaiveDate};

use crate::models::DateRange;

/// Quick-pick windows ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    LastWeek,
    LastMonth,
    LastQuarter,
    LastYear,
}

impl DatePreset {
    pub fn days(self) -> i64 {
        match self {
            DatePreset::LastWeek => 7,
            DatePreset::LastMonth => 30,
            DatePreset::LastQuarter => 90,
            DatePreset::LastYear => 365,
        }
    }
}

/// Pure value holder for the optional date bounds. Start is allowed to
/// exceed end; the backend owns that validation.
#[derive(Debug, Clone, Default)]
pub struct DateRangeState {
    range: DateRange,
}

impl DateRangeState {
    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn set_start(&mut self, date: Option<NaiveDate>) {
        self.range.start_date = date;
    }

    pub fn set_end(&mut self, date: Option<NaiveDate>) {
        self.range.end_date = date;
    }

    /// Overwrite both bounds with `today - preset.days() .. today`.
    pub fn apply_preset(&mut self, preset: DatePreset) {
        self.apply_preset_from(preset, Local::now().date_naive());
    }

    pub fn apply_preset_from(&mut self, preset: DatePreset, today: NaiveDate) {
        self.range = DateRange {
            start_date: Some(today - Duration::days(preset.days())),
            end_date: Some(today),
        };
    }

    pub fn clear(&mut self) {
        self.range = DateRange::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_overwrites_both_bounds() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut state = DateRangeState::default();
        state.set_start(NaiveDate::from_ymd_opt(2020, 1, 1));
        state.apply_preset_from(DatePreset::LastWeek, today);
        assert_eq!(
            state.range().start_date,
            NaiveDate::from_ymd_opt(2025, 6, 8)
        );
        assert_eq!(state.range().end_date, Some(today));
    }

    #[test]
    fn test_clear() {
        let mut state = DateRangeState::default();
        state.apply_preset_from(
            DatePreset::LastYear,
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        );
        state.clear();
        assert!(state.range().is_empty());
    }
}
