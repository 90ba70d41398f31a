use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

/// Where a lookup result came from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    ExternalProvider,
    LocalTable,
}

/// Nutrition content of a given quantity of a named food.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LookupResult {
    pub name: String,
    pub quantity_grams: f64,
    pub calories: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fat_grams: f64,
    pub serving_size: String,
    pub source: LookupSource,
}

/// One link of the lookup chain. A source that cannot answer, for any
/// reason, returns `None` and the next source is asked.
#[async_trait]
pub trait NutritionSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn try_resolve(&self, food_name: &str, quantity_grams: f64) -> Option<LookupResult>;
}

/// Ordered chain of sources; the first one to answer wins.
#[derive(Clone)]
pub struct NutritionLookup {
    sources: Vec<Arc<dyn NutritionSource>>,
}

impl NutritionLookup {
    pub fn new(sources: Vec<Arc<dyn NutritionSource>>) -> Self {
        Self { sources }
    }

    /// `None` means nobody knows this food and the caller should ask for
    /// manual entry.
    pub async fn lookup(&self, food_name: &str, quantity_grams: f64) -> Option<LookupResult> {
        for source in &self.sources {
            if let Some(found) = source.try_resolve(food_name, quantity_grams).await {
                debug!(source = source.name(), food = %food_name, "nutrition resolved");
                return Some(found);
            }
            debug!(source = source.name(), food = %food_name, "nutrition source missed");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        calories: Option<f64>,
        source: LookupSource,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(calories: Option<f64>, source: LookupSource) -> Arc<Self> {
            Arc::new(Self {
                calories,
                source,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl NutritionSource for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn try_resolve(&self, food_name: &str, quantity_grams: f64) -> Option<LookupResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.calories.map(|calories| LookupResult {
                name: food_name.to_string(),
                quantity_grams,
                calories,
                protein_grams: 0.0,
                carbs_grams: 0.0,
                fat_grams: 0.0,
                serving_size: format!("{quantity_grams}g"),
                source: self.source,
            })
        }
    }

    #[tokio::test]
    async fn first_answering_source_wins() {
        let provider = Fixed::new(Some(200.0), LookupSource::ExternalProvider);
        let table = Fixed::new(Some(100.0), LookupSource::LocalTable);
        let chain = NutritionLookup::new(vec![provider.clone() as Arc<dyn NutritionSource>, table.clone()]);

        let found = chain.lookup("apple", 100.0).await.expect("resolved");
        assert_eq!(found.source, LookupSource::ExternalProvider);
        assert_eq!(found.calories, 200.0);
        assert_eq!(table.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn falls_through_on_miss() {
        let provider = Fixed::new(None, LookupSource::ExternalProvider);
        let table = Fixed::new(Some(52.0), LookupSource::LocalTable);
        let chain = NutritionLookup::new(vec![provider.clone() as Arc<dyn NutritionSource>, table]);

        let found = chain.lookup("apple", 100.0).await.expect("resolved");
        assert_eq!(found.source, LookupSource::LocalTable);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn all_misses_is_not_found() {
        let chain = NutritionLookup::new(vec![
            Fixed::new(None, LookupSource::ExternalProvider) as Arc<dyn NutritionSource>,
            Fixed::new(None, LookupSource::LocalTable),
        ]);
        assert!(chain.lookup("unobtainium", 100.0).await.is_none());
        assert!(NutritionLookup::new(Vec::new()).lookup("x", 1.0).await.is_none());
    }
}
