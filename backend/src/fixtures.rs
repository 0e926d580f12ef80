//! Preset reference data for the kitchen: the grocery catalog and a
//! starter set of reviewed meal templates.

use chrono::Utc;
use once_cell::sync::Lazy;

use shared::{AgeGroup, GroceryItem, MealTemplate};

/// The built-in grocery catalog. Read-only; ordering units are what the
/// center's supplier sells by.
pub static PRESET_GROCERY_ITEMS: Lazy<Vec<GroceryItem>> = Lazy::new(|| {
    [
        ("Apples", "produce", "lb"),
        ("Bananas", "produce", "lb"),
        ("Carrots", "produce", "lb"),
        ("Sweet potatoes", "produce", "lb"),
        ("Frozen peas", "produce", "bag"),
        ("Whole milk", "dairy", "gal"),
        ("Yogurt", "dairy", "oz"),
        ("Cheddar cheese", "dairy", "lb"),
        ("Whole wheat bread", "grain", "loaf"),
        ("Brown rice", "grain", "lb"),
        ("Oats", "grain", "lb"),
        ("Pasta", "grain", "lb"),
        ("Chicken breast", "protein", "lb"),
        ("Ground turkey", "protein", "lb"),
        ("Eggs", "protein", "dozen"),
        ("Black beans", "protein", "can"),
        ("Sunflower butter", "pantry", "jar"),
        ("Olive oil", "pantry", "bottle"),
        ("Applesauce", "pantry", "jar"),
    ]
    .into_iter()
    .map(|(name, category, unit)| GroceryItem {
        name: name.to_string(),
        category: category.to_string(),
        unit: unit.to_string(),
    })
    .collect()
});

/// All catalog rows in a category, matched case-insensitively
pub fn grocery_items_in_category(category: &str) -> Vec<GroceryItem> {
    PRESET_GROCERY_ITEMS
        .iter()
        .filter(|item| item.category.eq_ignore_ascii_case(category))
        .cloned()
        .collect()
}

/// Look up one catalog row by name, matched case-insensitively
pub fn find_grocery_item(name: &str) -> Option<GroceryItem> {
    PRESET_GROCERY_ITEMS
        .iter()
        .find(|item| item.name.eq_ignore_ascii_case(name))
        .cloned()
}

/// Starter meal templates, already reviewed for compliance. IDs are left
/// empty so the store assigns them on insert.
pub fn preset_meal_templates() -> Vec<MealTemplate> {
    let now = Utc::now();
    let all_groups = AgeGroup::ALL.to_vec();
    let over_one = vec![AgeGroup::Toddler, AgeGroup::Preschool, AgeGroup::SchoolAge];

    let rows: [(&str, &[&str], Vec<AgeGroup>, &[&str]); 4] = [
        (
            "Oatmeal with apples",
            &["Oats", "Apples", "Whole milk"],
            all_groups,
            &["vegetarian"],
        ),
        (
            "Turkey and rice bowl",
            &["Ground turkey", "Brown rice", "Carrots"],
            over_one.clone(),
            &[],
        ),
        (
            "Cheese pasta with peas",
            &["Pasta", "Cheddar cheese", "Frozen peas"],
            over_one.clone(),
            &["vegetarian"],
        ),
        (
            "Black bean melts",
            &["Black beans", "Cheddar cheese", "Whole wheat bread"],
            over_one,
            &["vegetarian"],
        ),
    ];

    rows.into_iter()
        .map(|(name, ingredients, target_age_groups, dietary_tags)| MealTemplate {
            id: String::new(),
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            target_age_groups,
            dietary_tags: dietary_tags.iter().map(|s| s.to_string()).collect(),
            compliant: true,
            compliance_notes: "Approved in the seasonal menu review".to_string(),
            created_at: now,
            updated_at: now,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_categories_are_populated() {
        for category in ["produce", "dairy", "grain", "protein", "pantry"] {
            assert!(
                !grocery_items_in_category(category).is_empty(),
                "no items in {}",
                category
            );
        }
        assert!(grocery_items_in_category("frozen").is_empty());
    }

    #[test]
    fn test_find_grocery_item_is_case_insensitive() {
        let item = find_grocery_item("whole MILK").expect("Should find whole milk");
        assert_eq!(item.category, "dairy");
        assert_eq!(item.unit, "gal");

        assert!(find_grocery_item("pizza").is_none());
    }

    #[test]
    fn test_preset_templates_have_empty_ids() {
        let templates = preset_meal_templates();
        assert_eq!(templates.len(), 4);
        assert!(templates.iter().all(|t| t.id.is_empty()));
        assert!(templates.iter().all(|t| t.compliant));
        assert!(templates.iter().all(|t| !t.target_age_groups.is_empty()));
    }
}
