//! Ingredient resolution
//!
//! Read-only lookup from an ingredient id to its per-100g profile.

use std::collections::HashMap;

use crate::models::Ingredient;

/// Synchronous ingredient lookup over an already populated mapping
pub trait IngredientResolver {
    fn resolve(&self, ingredient_id: &str) -> Option<&Ingredient>;
}

impl IngredientResolver for HashMap<String, Ingredient> {
    fn resolve(&self, ingredient_id: &str) -> Option<&Ingredient> {
        self.get(ingredient_id)
    }
}

impl<R: IngredientResolver + ?Sized> IngredientResolver for &R {
    fn resolve(&self, ingredient_id: &str) -> Option<&Ingredient> {
        (**self).resolve(ingredient_id)
    }
}

impl<R: IngredientResolver + ?Sized> IngredientResolver for std::sync::Arc<R> {
    fn resolve(&self, ingredient_id: &str) -> Option<&Ingredient> {
        (**self).resolve(ingredient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MacroProfile;

    #[test]
    fn test_hashmap_resolver() {
        let mut map = HashMap::new();
        map.insert(
            "a".to_string(),
            Ingredient {
                id: "a".into(),
                name: "Rice".into(),
                macro_per_hundred: MacroProfile::new(130.0, 2.7, 28.0, 0.3),
            },
        );

        assert_eq!(map.resolve("a").map(|i| i.name.as_str()), Some("Rice"));
        assert!(map.resolve("b").is_none());

        let by_ref = &map;
        assert!(by_ref.resolve("a").is_some());
    }
}
