//! Target progress
//!
//! Bounded 0-100 percentages of daily totals against targets, used for
//! progress-bar widths only.

use serde::Serialize;

use crate::models::{MacroTarget, MacroTotals};

/// Percentage of `target` reached by `current`, capped at 100.
///
/// Negative or non-finite `current` reads as 0; a target that is not a
/// positive finite number yields 0.
pub fn ratio(current: f64, target: f64) -> f64 {
    if !target.is_finite() || target <= 0.0 {
        return 0.0;
    }
    let current = if current.is_finite() { current.max(0.0) } else { 0.0 };
    (current / target * 100.0).min(100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Calories,
    Protein,
    Fat,
    Carbs,
}

impl Nutrient {
    /// Dashboard display order
    pub const ALL: [Nutrient; 4] = [Nutrient::Calories, Nutrient::Protein, Nutrient::Fat, Nutrient::Carbs];

    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            _ => "g",
        }
    }

    fn current(&self, totals: &MacroTotals) -> i64 {
        match self {
            Nutrient::Calories => totals.calories,
            Nutrient::Protein => totals.protein,
            Nutrient::Fat => totals.fat,
            Nutrient::Carbs => totals.carbs,
        }
    }

    fn target(&self, target: &MacroTarget) -> f64 {
        match self {
            Nutrient::Calories => target.calories,
            Nutrient::Protein => target.protein,
            Nutrient::Fat => target.fat,
            Nutrient::Carbs => target.carbs,
        }
    }
}

/// One progress-bar row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroProgress {
    pub nutrient: Nutrient,
    pub current: i64,
    pub target: f64,
    pub unit: &'static str,
    pub percent: f64,
}

/// Progress of rounded totals against targets, one row per nutrient
pub fn progress_report(totals: &MacroTotals, target: &MacroTarget) -> Vec<MacroProgress> {
    Nutrient::ALL
        .iter()
        .map(|nutrient| {
            let current = nutrient.current(totals);
            let goal = nutrient.target(target);
            MacroProgress {
                nutrient: *nutrient,
                current,
                target: goal,
                unit: nutrient.unit(),
                percent: ratio(current as f64, goal),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_is_capped() {
        assert_eq!(ratio(250.0, 200.0), 100.0);
        assert_eq!(ratio(200.0, 200.0), 100.0);
    }

    #[test]
    fn test_ratio_partial() {
        assert_eq!(ratio(100.0, 200.0), 50.0);
        assert_eq!(ratio(0.0, 2200.0), 0.0);
        assert!((ratio(1100.0, 2200.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_bounds_over_many_inputs() {
        for current in [0.0, 0.1, 1.0, 69.9, 70.0, 140.0, 1e6, f64::MAX] {
            for target in [1.0, 70.0, 140.0, 2200.0] {
                let r = ratio(current, target);
                assert!((0.0..=100.0).contains(&r), "ratio({}, {}) = {}", current, target, r);
            }
        }
    }

    #[test]
    fn test_ratio_degenerate_inputs() {
        assert_eq!(ratio(50.0, 0.0), 0.0);
        assert_eq!(ratio(50.0, -10.0), 0.0);
        assert_eq!(ratio(-5.0, 100.0), 0.0);
        assert_eq!(ratio(f64::NAN, 100.0), 0.0);
        assert_eq!(ratio(50.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_report_rows() {
        let totals = MacroTotals::new(1100, 140, 300, 35);
        let report = progress_report(&totals, &MacroTarget::default());

        let order: Vec<_> = report.iter().map(|r| r.nutrient).collect();
        assert_eq!(order, Nutrient::ALL.to_vec());

        assert_eq!(report[0].unit, "kcal");
        assert_eq!(report[0].percent, 50.0);
        assert_eq!(report[1].percent, 100.0);
        assert_eq!(report[2].current, 35);
        assert_eq!(report[2].percent, 50.0);
        // 300 of 280 carbs is capped
        assert_eq!(report[3].percent, 100.0);
        assert_eq!(report[3].unit, "g");
    }
}
