//! Capacity units and the grams-per-unit table
//!
//! `Unit` is the closed set of capacity units a recipe entry can carry.
//! `Capacity` is what actually arrives on the wire: a known unit, or an
//! unrecognized string that converts as if it were already grams.

use serde::{Deserialize, Serialize};

/// A recognized capacity unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    G,
    Kg,
    Ml,
    L,
    Tsp,
    Tbsp,
    Cup,
    Oz,
    Lb,
    Pcs,
}

// ============================================================================
// Conversion Constants (to grams)
// ============================================================================

pub const G_PER_KG: f64 = 1000.0;
/// Liquids are assumed to have the density of water
pub const G_PER_ML: f64 = 1.0;
pub const G_PER_L: f64 = 1000.0;
pub const G_PER_TSP: f64 = 5.0;
pub const G_PER_TBSP: f64 = 15.0;
pub const G_PER_CUP: f64 = 240.0;
pub const G_PER_OZ: f64 = 28.35;
pub const G_PER_LB: f64 = 453.6;
/// Mass of an average piece
pub const G_PER_PCS: f64 = 100.0;

impl Unit {
    pub const ALL: [Unit; 10] = [
        Unit::G,
        Unit::Kg,
        Unit::Ml,
        Unit::L,
        Unit::Tsp,
        Unit::Tbsp,
        Unit::Cup,
        Unit::Oz,
        Unit::Lb,
        Unit::Pcs,
    ];

    /// Grams per one unit of measure
    pub const fn grams_per_unit(self) -> f64 {
        match self {
            Unit::G => 1.0,
            Unit::Kg => G_PER_KG,
            Unit::Ml => G_PER_ML,
            Unit::L => G_PER_L,
            Unit::Tsp => G_PER_TSP,
            Unit::Tbsp => G_PER_TBSP,
            Unit::Cup => G_PER_CUP,
            Unit::Oz => G_PER_OZ,
            Unit::Lb => G_PER_LB,
            Unit::Pcs => G_PER_PCS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::Tsp => "tsp",
            Unit::Tbsp => "tbsp",
            Unit::Cup => "cup",
            Unit::Oz => "oz",
            Unit::Lb => "lb",
            Unit::Pcs => "pcs",
        }
    }

    /// Parse a capacity key, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase();
        Unit::ALL.iter().copied().find(|u| u.as_str() == key)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The capacity attached to a recipe entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Capacity {
    Known(Unit),
    Unrecognized(String),
}

impl Capacity {
    /// Grams per unit; unrecognized capacities are treated as grams
    pub fn grams_per_unit(&self) -> f64 {
        match self {
            Capacity::Known(unit) => unit.grams_per_unit(),
            Capacity::Unrecognized(_) => 1.0,
        }
    }

    pub fn unit(&self) -> Option<Unit> {
        match self {
            Capacity::Known(unit) => Some(*unit),
            Capacity::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Capacity::Known(unit) => unit.as_str(),
            Capacity::Unrecognized(raw) => raw,
        }
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Capacity::Known(Unit::G)
    }
}

impl From<Unit> for Capacity {
    fn from(unit: Unit) -> Self {
        Capacity::Known(unit)
    }
}

impl From<&str> for Capacity {
    fn from(s: &str) -> Self {
        match Unit::parse(s) {
            Some(unit) => Capacity::Known(unit),
            None => Capacity::Unrecognized(s.to_string()),
        }
    }
}

impl From<String> for Capacity {
    fn from(s: String) -> Self {
        match Unit::parse(&s) {
            Some(unit) => Capacity::Known(unit),
            None => Capacity::Unrecognized(s),
        }
    }
}

impl From<Capacity> for String {
    fn from(c: Capacity) -> Self {
        match c {
            Capacity::Known(unit) => unit.as_str().to_string(),
            Capacity::Unrecognized(raw) => raw,
        }
    }
}
