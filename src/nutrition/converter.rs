//! Unit conversion
//!
//! Turns a (quantity, unit) pair into canonical grams. Unknown units are
//! never an error: they pass the quantity through unchanged.

use super::units::{Capacity, Unit};

/// Convert a quantity in a recognized unit to grams
pub fn to_grams(quantity: f64, unit: Unit) -> f64 {
    quantity * unit.grams_per_unit()
}

/// Convert a quantity carrying a wire capacity to grams
pub fn capacity_to_grams(quantity: f64, capacity: &Capacity) -> f64 {
    if let Capacity::Unrecognized(raw) = capacity {
        tracing::warn!("Unknown capacity unit '{}', treating {} as grams", raw, quantity);
    }
    quantity * capacity.grams_per_unit()
}

/// Convert a quantity with a free-form unit string to grams
pub fn str_to_grams(quantity: f64, unit: &str) -> f64 {
    capacity_to_grams(quantity, &Capacity::from(unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kilogram_to_grams() {
        assert_eq!(to_grams(1.0, Unit::Kg), 1000.0);
        assert_eq!(str_to_grams(1.0, "kg"), 1000.0);
    }

    #[test]
    fn test_unknown_unit_is_identity() {
        assert_eq!(str_to_grams(5.0, "unknown-unit"), 5.0);
        assert_eq!(str_to_grams(5.0, ""), 5.0);
    }

    #[test]
    fn test_one_cup_is_240_grams() {
        assert_eq!(to_grams(1.0, Unit::Cup), 240.0);
        assert_eq!(capacity_to_grams(1.0, &Capacity::Known(Unit::Cup)), 240.0);
    }

    #[test]
    fn test_fractional_quantities() {
        assert!((to_grams(0.5, Unit::Lb) - 226.8).abs() < 1e-9);
        assert!((to_grams(2.0, Unit::Oz) - 56.7).abs() < 1e-9);
        assert_eq!(to_grams(3.0, Unit::Pcs), 300.0);
        assert_eq!(to_grams(2.0, Unit::Tbsp), 30.0);
    }
}
