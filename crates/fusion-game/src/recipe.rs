//! Recipe registry
//!
//! A flat, ordered list of two-ingredient recipes. Ingredient order never
//! matters and the first matching recipe in registration order wins.

use fusion_core::ItemKind;
use serde::{Deserialize, Serialize};

/// Combining `a` with `b` (in either order) yields `result`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub a: ItemKind,
    pub b: ItemKind,
    pub result: ItemKind,
}

impl Recipe {
    pub fn new(
        a: impl Into<ItemKind>,
        b: impl Into<ItemKind>,
        result: impl Into<ItemKind>,
    ) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            result: result.into(),
        }
    }

    /// Whether `{first, second}` is this recipe's unordered ingredient pair
    pub fn matches(&self, first: &str, second: &str) -> bool {
        (self.a == first && self.b == second) || (self.a == second && self.b == first)
    }

    /// Whether `kind` is one of the two ingredients
    pub fn uses(&self, kind: &str) -> bool {
        self.a == kind || self.b == kind
    }
}

/// Immutable recipe table, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// First recipe whose ingredients are `{a, b}`, in registration order
    pub fn find(&self, a: &str, b: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.matches(a, b))
    }

    /// Recipes that take `kind` as an ingredient
    pub fn recipes_using<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Recipe> + 'a {
        self.recipes.iter().filter(move |recipe| recipe.uses(kind))
    }

    /// Distinct result kinds, in the order they first appear
    pub fn results(&self) -> Vec<&ItemKind> {
        let mut seen: Vec<&ItemKind> = Vec::new();
        for recipe in &self.recipes {
            if !seen.contains(&&recipe.result) {
                seen.push(&recipe.result);
            }
        }
        seen
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl FromIterator<Recipe> for RecipeBook {
    fn from_iter<I: IntoIterator<Item = Recipe>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> RecipeBook {
        RecipeBook::new(vec![
            Recipe::new("Bread", "Cheese", "Sandwich"),
            Recipe::new("Egg", "Rice", "Fried Rice"),
            Recipe::new("Cheese", "Bread", "Toastie"),
            Recipe::new("Egg", "Egg", "Omelette"),
        ])
    }

    #[test]
    fn test_find_is_unordered() {
        let book = book();
        assert_eq!(book.find("Bread", "Cheese").unwrap().result, "Sandwich");
        assert_eq!(book.find("Cheese", "Bread").unwrap().result, "Sandwich");
        assert_eq!(book.find("Rice", "Egg").unwrap().result, "Fried Rice");
    }

    #[test]
    fn test_first_registered_wins() {
        // "Toastie" shadows the same pair and can never be produced.
        let book = book();
        assert_eq!(book.find("Cheese", "Bread").unwrap().result, "Sandwich");
    }

    #[test]
    fn test_missing_recipe() {
        let book = book();
        assert!(book.find("Bread", "Rice").is_none());
        assert!(book.find("Bread", "Bread").is_none());
        assert!(RecipeBook::default().find("Bread", "Cheese").is_none());
    }

    #[test]
    fn test_same_kind_ingredients() {
        let book = book();
        assert_eq!(book.find("Egg", "Egg").unwrap().result, "Omelette");
    }

    #[test]
    fn test_recipes_using_and_results() {
        let book = book();
        let with_egg: Vec<_> = book.recipes_using("Egg").map(|r| r.result.as_str()).collect();
        assert_eq!(with_egg, vec!["Fried Rice", "Omelette"]);

        let results: Vec<_> = book.results().into_iter().map(ItemKind::as_str).collect();
        assert_eq!(results, vec!["Sandwich", "Fried Rice", "Toastie", "Omelette"]);
    }
}
