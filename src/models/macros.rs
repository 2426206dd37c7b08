//! Macro-nutrient value types
//!
//! `Macros` carries unrounded real values through aggregation; `MacroTotals`
//! is the integer form handed to displays. `MacroProfile` is the catalog's
//! per-100g shape and `MacroTarget` the daily goal quadruple.

use serde::{Deserialize, Serialize};

/// Real-valued calories and macro grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    #[serde(default)]
    pub calories: f64,
    #[serde(default, alias = "proteins")]
    pub protein: f64, // grams
    #[serde(default)]
    pub carbs: f64, // grams
    #[serde(default, alias = "fats")]
    pub fat: f64, // grams
}

impl Macros {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self { calories, protein, carbs, fat }
    }

    /// Scale every field by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
        }
    }

    pub fn add(&self, other: &Macros) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }

    /// Replace NaN/infinite fields with zero
    pub fn finite_or_zero(&self) -> Self {
        fn clean(v: f64) -> f64 {
            if v.is_finite() { v } else { 0.0 }
        }
        Self {
            calories: clean(self.calories),
            protein: clean(self.protein),
            carbs: clean(self.carbs),
            fat: clean(self.fat),
        }
    }

    /// Clamp negative fields to zero
    pub fn non_negative(&self) -> Self {
        Self {
            calories: self.calories.max(0.0),
            protein: self.protein.max(0.0),
            carbs: self.carbs.max(0.0),
            fat: self.fat.max(0.0),
        }
    }

    /// Round every field to the nearest integer for display
    pub fn rounded(&self) -> MacroTotals {
        MacroTotals {
            calories: round_display(self.calories),
            protein: round_display(self.protein),
            carbs: round_display(self.carbs),
            fat: round_display(self.fat),
        }
    }
}

impl std::ops::Add for Macros {
    type Output = Macros;

    fn add(self, other: Macros) -> Macros {
        Macros::add(&self, &other)
    }
}

impl std::ops::AddAssign for Macros {
    fn add_assign(&mut self, other: Macros) {
        *self = Macros::add(self, &other);
    }
}

impl std::ops::Mul<f64> for Macros {
    type Output = Macros;

    fn mul(self, multiplier: f64) -> Macros {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Macros {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Macros::zero(), |acc, m| acc + m)
    }
}

/// Nearest-integer rounding, half away from zero. Non-finite input yields 0.
pub fn round_display(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

/// Display-rounded macro totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

impl MacroTotals {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn new(calories: i64, protein: i64, carbs: i64, fat: i64) -> Self {
        Self { calories, protein, carbs, fat }
    }
}

impl From<MacroTotals> for Macros {
    fn from(t: MacroTotals) -> Self {
        Macros::new(t.calories as f64, t.protein as f64, t.carbs as f64, t.fat as f64)
    }
}

/// Nutrient values per 100 g of an ingredient, in the catalog's field names
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroProfile {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub proteins: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
}

impl MacroProfile {
    pub fn new(calories: f64, proteins: f64, carbs: f64, fats: f64) -> Self {
        Self { calories, proteins, carbs, fats }
    }

    pub fn as_macros(&self) -> Macros {
        Macros::new(self.calories, self.proteins, self.carbs, self.fats)
    }
}

pub const DEFAULT_CALORIE_TARGET: f64 = 2200.0;
pub const DEFAULT_PROTEIN_TARGET: f64 = 140.0;
pub const DEFAULT_CARBS_TARGET: f64 = 280.0;
pub const DEFAULT_FAT_TARGET: f64 = 70.0;

/// Daily macro targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTarget {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Default for MacroTarget {
    fn default() -> Self {
        Self {
            calories: DEFAULT_CALORIE_TARGET,
            protein: DEFAULT_PROTEIN_TARGET,
            carbs: DEFAULT_CARBS_TARGET,
            fat: DEFAULT_FAT_TARGET,
        }
    }
}

/// Optional per-day goals as stored on a daily log
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyGoals {
    #[serde(default)]
    pub calorie_goal: Option<f64>,
    #[serde(default)]
    pub protein_goal: Option<f64>,
    #[serde(default)]
    pub carbs_goal: Option<f64>,
    #[serde(default)]
    pub fats_goal: Option<f64>,
}

impl DailyGoals {
    pub fn is_empty(&self) -> bool {
        self.calorie_goal.is_none()
            && self.protein_goal.is_none()
            && self.carbs_goal.is_none()
            && self.fats_goal.is_none()
    }
}

impl MacroTarget {
    /// Apply any present, positive, finite goal on top of this target
    pub fn with_goals(&self, goals: &DailyGoals) -> Self {
        fn pick(base: f64, goal: Option<f64>) -> f64 {
            match goal {
                Some(g) if g.is_finite() && g > 0.0 => g,
                _ => base,
            }
        }
        Self {
            calories: pick(self.calories, goals.calorie_goal),
            protein: pick(self.protein, goals.protein_goal),
            carbs: pick(self.carbs, goals.carbs_goal),
            fat: pick(self.fat, goals.fats_goal),
        }
    }
}
