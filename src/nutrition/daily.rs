//! Daily macro aggregation
//!
//! A day's totals come from exactly one source: the server snapshot when
//! the record carries one, otherwise the sum of its consumed items. Items
//! loaded from storage are zero placeholders, so the snapshot must win.

use std::collections::BTreeMap;

use crate::models::{ConsumedItem, DayRecord, MacroSource, MacroTotals, Macros, MealSection};

/// Resolve a macro source into unrounded totals
pub fn resolve_source(source: &MacroSource<'_>) -> Macros {
    match source {
        MacroSource::Snapshot(snapshot) => *snapshot,
        MacroSource::Computed(items) => sum_items(items.iter().copied()),
    }
}

/// A day's display totals
pub fn aggregate_day(day: &DayRecord) -> MacroTotals {
    let source = day.macro_source();
    if matches!(source, MacroSource::Snapshot(_)) {
        tracing::debug!("Using snapshot totals for {}", day.date);
    }
    resolve_source(&source).rounded()
}

/// Locally summed totals per section, ignoring any snapshot
pub fn section_totals(day: &DayRecord) -> BTreeMap<MealSection, MacroTotals> {
    day.sections
        .iter()
        .map(|(section, items)| (*section, sum_items(items.iter()).rounded()))
        .collect()
}

fn sum_items<'a>(items: impl Iterator<Item = &'a ConsumedItem>) -> Macros {
    items.map(|item| item.macros().finite_or_zero()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> DayRecord {
        let mut day = DayRecord::new(NaiveDate::from_ymd_opt(2026, 2, 9).unwrap());
        day.add_item(
            MealSection::Lunch,
            ConsumedItem::new("101", "Grilled Chicken Salad", Macros::new(450.0, 45.0, 10.0, 20.0)),
        );
        day.add_item(
            MealSection::Snack,
            ConsumedItem::new("102", "Greek Yogurt", Macros::new(120.0, 15.0, 8.0, 0.0)),
        );
        day.add_item(
            MealSection::Snack,
            ConsumedItem::new("5", "Oatmeal with Berries", Macros::new(150.0, 5.0, 27.0, 2.5)),
        );
        day
    }

    #[test]
    fn test_sums_across_sections() {
        assert_eq!(aggregate_day(&day()), MacroTotals::new(720, 65, 45, 23));
    }

    #[test]
    fn test_empty_day_is_zero() {
        let empty = DayRecord::new(NaiveDate::from_ymd_opt(2026, 2, 9).unwrap());
        assert_eq!(aggregate_day(&empty), MacroTotals::zero());
    }

    #[test]
    fn test_snapshot_wins_even_when_items_disagree() {
        let day = day().with_snapshot(Macros::new(1000.0, 10.0, 10.0, 10.0));
        assert_eq!(aggregate_day(&day), MacroTotals::new(1000, 10, 10, 10));
    }

    #[test]
    fn test_snapshot_over_zero_placeholders() {
        let mut day = DayRecord::new(NaiveDate::from_ymd_opt(2026, 2, 9).unwrap())
            .with_snapshot(Macros::new(1800.0, 120.0, 200.0, 60.0));
        day.add_item(MealSection::Breakfast, ConsumedItem::placeholder("r1", "r1", None));
        day.add_item(MealSection::Dinner, ConsumedItem::placeholder("r2", "r2", Some(2.0)));

        assert_eq!(aggregate_day(&day), MacroTotals::new(1800, 120, 200, 60));
    }

    #[test]
    fn test_placeholders_without_snapshot_read_as_zero() {
        let mut day = DayRecord::new(NaiveDate::from_ymd_opt(2026, 2, 9).unwrap());
        day.add_item(MealSection::Breakfast, ConsumedItem::placeholder("r1", "r1", None));
        assert_eq!(aggregate_day(&day), MacroTotals::zero());
    }

    #[test]
    fn test_snapshot_is_rounded() {
        let day = DayRecord::new(NaiveDate::from_ymd_opt(2026, 2, 9).unwrap())
            .with_snapshot(Macros::new(1850.4, 139.5, 200.49, 54.99));
        assert_eq!(aggregate_day(&day), MacroTotals::new(1850, 140, 200, 55));
    }

    #[test]
    fn test_non_finite_item_fields_are_skipped() {
        let mut day = day();
        day.add_item(
            MealSection::Dinner,
            ConsumedItem::new("bad", "Corrupt", Macros::new(f64::NAN, 10.0, f64::INFINITY, 0.0)),
        );
        assert_eq!(aggregate_day(&day), MacroTotals::new(720, 75, 45, 23));
    }

    #[test]
    fn test_section_totals() {
        let totals = section_totals(&day());
        assert_eq!(totals[&MealSection::Lunch], MacroTotals::new(450, 45, 10, 20));
        assert_eq!(totals[&MealSection::Snack], MacroTotals::new(270, 20, 35, 3));
        assert!(!totals.contains_key(&MealSection::Breakfast));
    }

    #[test]
    fn test_resolve_source_unrounded() {
        let d = day();
        let totals = resolve_source(&d.macro_source());
        assert!((totals.fat - 22.5).abs() < 1e-9);
    }
}
