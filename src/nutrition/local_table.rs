use async_trait::async_trait;

use super::lookup::{LookupResult, LookupSource, NutritionSource};
use crate::rounding::{round_half_up, round_tenth};

/// Reference values per 100 g of a food.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodReference {
    pub key: &'static str,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

const fn food(key: &'static str, calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodReference {
    FoodReference {
        key,
        calories,
        protein,
        carbs,
        fat,
    }
}

/// Built-in table of common foods. Partial matches take the first entry in
/// this order, so more specific keys must come before the keys they contain.
pub static FOOD_TABLE: &[FoodReference] = &[
    // grains
    food("rice", 130.0, 2.7, 28.0, 0.3),
    food("white rice", 130.0, 2.7, 28.0, 0.3),
    food("brown rice", 111.0, 2.6, 23.0, 0.9),
    food("pasta", 131.0, 5.0, 25.0, 1.1),
    food("bread", 265.0, 9.0, 49.0, 3.2),
    food("oatmeal", 68.0, 2.4, 12.0, 1.4),
    food("quinoa", 120.0, 4.4, 21.0, 1.9),
    // proteins
    food("chicken breast", 165.0, 31.0, 0.0, 3.6),
    food("chicken", 239.0, 27.0, 0.0, 14.0),
    food("beef", 250.0, 26.0, 0.0, 15.0),
    food("pork", 242.0, 27.0, 0.0, 14.0),
    food("salmon", 208.0, 20.0, 0.0, 13.0),
    food("tuna", 132.0, 28.0, 0.0, 1.3),
    food("egg", 155.0, 13.0, 1.1, 11.0),
    food("tofu", 76.0, 8.0, 1.9, 4.8),
    // dairy
    food("milk", 61.0, 3.2, 4.8, 3.3),
    food("yogurt", 59.0, 10.0, 3.6, 0.4),
    food("cheese", 402.0, 25.0, 1.3, 33.0),
    // fruit
    food("apple", 52.0, 0.3, 14.0, 0.2),
    food("banana", 89.0, 1.1, 23.0, 0.3),
    food("orange", 47.0, 0.9, 12.0, 0.1),
    food("strawberry", 32.0, 0.7, 7.7, 0.3),
    food("mango", 60.0, 0.8, 15.0, 0.4),
    // vegetables
    food("broccoli", 34.0, 2.8, 7.0, 0.4),
    food("carrot", 41.0, 0.9, 10.0, 0.2),
    food("spinach", 23.0, 2.9, 3.6, 0.4),
    food("tomato", 18.0, 0.9, 3.9, 0.2),
    food("potato", 77.0, 2.0, 17.0, 0.1),
    food("sweet potato", 86.0, 1.6, 20.0, 0.1),
    // nuts
    food("almonds", 579.0, 21.0, 22.0, 50.0),
    food("peanuts", 567.0, 26.0, 16.0, 49.0),
    food("cashews", 553.0, 18.0, 30.0, 44.0),
    // other
    food("avocado", 160.0, 2.0, 8.5, 15.0),
    food("pizza", 266.0, 11.0, 33.0, 10.0),
    food("burger", 295.0, 17.0, 24.0, 14.0),
];

/// Finds the reference for `food_name`: exact key first, then the first key
/// that contains the query or is contained in it.
pub fn find_reference<'a>(table: &'a [FoodReference], food_name: &str) -> Option<&'a FoodReference> {
    let query = food_name.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    table.iter().find(|r| r.key == query).or_else(|| {
        table
            .iter()
            .find(|r| r.key.contains(query.as_str()) || query.contains(r.key))
    })
}

/// Scales a per-100 g reference to `quantity_grams`.
pub fn scale(reference: &FoodReference, food_name: &str, quantity_grams: f64) -> LookupResult {
    let factor = quantity_grams / 100.0;
    LookupResult {
        name: food_name.to_string(),
        quantity_grams,
        calories: round_half_up(reference.calories * factor),
        protein_grams: round_tenth(reference.protein * factor),
        carbs_grams: round_tenth(reference.carbs * factor),
        fat_grams: round_tenth(reference.fat * factor),
        serving_size: format!("{quantity_grams}g"),
        source: LookupSource::LocalTable,
    }
}

pub struct LocalTableSource {
    table: &'static [FoodReference],
}

impl LocalTableSource {
    pub fn new(table: &'static [FoodReference]) -> Self {
        Self { table }
    }
}

impl Default for LocalTableSource {
    fn default() -> Self {
        Self::new(FOOD_TABLE)
    }
}

#[async_trait]
impl NutritionSource for LocalTableSource {
    fn name(&self) -> &'static str {
        "local_table"
    }

    async fn try_resolve(&self, food_name: &str, quantity_grams: f64) -> Option<LookupResult> {
        find_reference(self.table, food_name).map(|r| scale(r, food_name, quantity_grams))
    }
}
