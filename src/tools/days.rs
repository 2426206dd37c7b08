//! Day MCP Tools
//!
//! Daily totals and progress for live day records and persisted daily
//! meal records.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{
    DailyGoals, DayMealRecord, DayRecord, DisplayNameCache, MacroSource, MacroTarget, MacroTotals,
    MealSection,
};
use crate::nutrition::{aggregate_day, progress_report, section_totals, MacroProgress};

/// Which input produced a day's totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalsSource {
    Snapshot,
    Items,
}

/// Response for daily_macros and persisted_day_macros
#[derive(Debug, Serialize)]
pub struct DayMacrosResponse {
    pub date: String,
    pub totals: MacroTotals,
    pub source: TotalsSource,
    pub item_count: usize,
    /// Locally summed per-section totals; zero for placeholder items
    pub sections: BTreeMap<MealSection, MacroTotals>,
    pub target: MacroTarget,
    pub progress: Vec<MacroProgress>,
}

/// Response for macro_progress
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub totals: MacroTotals,
    pub target: MacroTarget,
    pub progress: Vec<MacroProgress>,
}

/// Totals, section breakdown and progress for a day record
pub fn daily_macros(day: &DayRecord, target: &MacroTarget, goals: Option<&DailyGoals>) -> DayMacrosResponse {
    let target = match goals {
        Some(goals) => target.with_goals(goals),
        None => *target,
    };

    let source = match day.macro_source() {
        MacroSource::Snapshot(_) => TotalsSource::Snapshot,
        MacroSource::Computed(_) => TotalsSource::Items,
    };

    let totals = aggregate_day(day);

    DayMacrosResponse {
        date: day.date.format("%Y-%m-%d").to_string(),
        totals,
        source,
        item_count: day.item_count(),
        sections: section_totals(day),
        target,
        progress: progress_report(&totals, &target),
    }
}

/// Convert a persisted daily record and report on it. The record's own
/// goals override `target` where present.
pub fn persisted_day_macros(
    record: &DayMealRecord,
    names: &DisplayNameCache,
    target: &MacroTarget,
) -> Result<DayMacrosResponse, String> {
    let day = DayRecord::from_persisted(record, names).map_err(|e| e.to_string())?;

    if day.total_macro_snapshot.is_none() && day.item_count() > 0 {
        tracing::warn!(
            "Persisted record for {} has {} items but no total_macro; totals will read zero",
            day.date,
            day.item_count()
        );
    }

    let goals = (!record.goals.is_empty()).then_some(&record.goals);
    Ok(daily_macros(&day, target, goals))
}

/// Progress of already rounded totals against a target
pub fn macro_progress(totals: &MacroTotals, target: &MacroTarget) -> ProgressResponse {
    ProgressResponse {
        totals: *totals,
        target: *target,
        progress: progress_report(totals, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConsumedItem, Macros, MealRecordEntry};
    use chrono::NaiveDate;

    fn day() -> DayRecord {
        let mut day = DayRecord::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        day.add_item(MealSection::Breakfast, ConsumedItem::new("1", "Oats", Macros::new(300.0, 10.0, 50.0, 5.0)));
        day.add_item(MealSection::Lunch, ConsumedItem::new("2", "Salad", Macros::new(200.0, 5.0, 20.0, 10.0)));
        day
    }

    #[test]
    fn test_daily_macros_from_items() {
        let response = daily_macros(&day(), &MacroTarget::default(), None);

        assert_eq!(response.date, "2024-05-01");
        assert_eq!(response.source, TotalsSource::Items);
        assert_eq!(response.totals, MacroTotals::new(500, 15, 70, 15));
        assert_eq!(response.item_count, 2);
        assert_eq!(response.sections[&MealSection::Breakfast].calories, 300);
        assert_eq!(response.progress.len(), 4);
    }

    #[test]
    fn test_snapshot_wins_over_items() {
        let day = day().with_snapshot(Macros::new(1850.0, 120.0, 210.0, 60.0));
        let response = daily_macros(&day, &MacroTarget::default(), None);

        assert_eq!(response.source, TotalsSource::Snapshot);
        assert_eq!(response.totals, MacroTotals::new(1850, 120, 210, 60));
        // sections still reflect the items themselves
        assert_eq!(response.sections[&MealSection::Lunch].calories, 200);
    }

    #[test]
    fn test_goals_override_target() {
        let goals = DailyGoals { calorie_goal: Some(1000.0), ..DailyGoals::default() };
        let response = daily_macros(&day(), &MacroTarget::default(), Some(&goals));

        assert_eq!(response.target.calories, 1000.0);
        assert_eq!(response.target.protein, 140.0);
        assert_eq!(response.progress[0].percent, 50.0);
    }

    #[test]
    fn test_persisted_day_uses_snapshot_and_names() {
        let record = DayMealRecord {
            created_at: "2024-05-01T09:30:00Z".into(),
            records: vec![
                MealRecordEntry { recipe_id: "r1".into(), time_of_day: "breakfast".into(), capacity: None },
                MealRecordEntry { recipe_id: "r2".into(), time_of_day: "supper".into(), capacity: None },
            ],
            total_macro: Some(Macros::new(640.4, 31.5, 80.0, 20.2)),
            goals: DailyGoals { protein_goal: Some(63.0), ..DailyGoals::default() },
        };
        let mut names = DisplayNameCache::new();
        names.insert("r1", "Porridge");

        let response = persisted_day_macros(&record, &names, &MacroTarget::default()).unwrap();
        assert_eq!(response.date, "2024-05-01");
        assert_eq!(response.source, TotalsSource::Snapshot);
        assert_eq!(response.totals, MacroTotals::new(640, 32, 80, 20));
        assert_eq!(response.item_count, 2);
        assert!(response.sections.contains_key(&MealSection::Snack));
        assert_eq!(response.target.protein, 63.0);
        assert!((response.progress[1].percent - 32.0 / 63.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_persisted_day_without_snapshot_reads_zero() {
        let record = DayMealRecord {
            created_at: "2024-05-02".into(),
            records: vec![MealRecordEntry { recipe_id: "r1".into(), time_of_day: "lunch".into(), capacity: None }],
            ..DayMealRecord::default()
        };

        let response = persisted_day_macros(&record, &DisplayNameCache::new(), &MacroTarget::default()).unwrap();
        assert_eq!(response.source, TotalsSource::Items);
        assert_eq!(response.totals, MacroTotals::zero());
    }

    #[test]
    fn test_persisted_day_bad_date() {
        let record = DayMealRecord { created_at: "yesterday".into(), ..DayMealRecord::default() };
        let err = persisted_day_macros(&record, &DisplayNameCache::new(), &MacroTarget::default()).unwrap_err();
        assert!(err.contains("yesterday"));
    }

    #[test]
    fn test_macro_progress_caps() {
        let response = macro_progress(&MacroTotals::new(2500, 70, 140, 35), &MacroTarget::default());
        let percents: Vec<f64> = response.progress.iter().map(|p| p.percent).collect();
        assert_eq!(percents, vec![100.0, 50.0, 50.0, 50.0]);
    }
}
