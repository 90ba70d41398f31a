pub mod burn;
mod dto;
pub mod handlers;
pub mod local_table;
pub mod lookup;
pub mod provider;

use std::sync::Arc;

use axum::Router;

use crate::{config::NutritionApiConfig, state::AppState};
use local_table::LocalTableSource;
use lookup::{NutritionLookup, NutritionSource};
use provider::EdamamSource;

pub fn router() -> Router<AppState> {
    handlers::nutrition_routes()
}

/// Provider first when it has credentials, then the built-in table.
pub fn build_lookup(cfg: &NutritionApiConfig) -> anyhow::Result<NutritionLookup> {
    let mut sources: Vec<Arc<dyn NutritionSource>> = Vec::new();
    let provider = EdamamSource::new(cfg)?;
    if provider.is_configured() {
        sources.push(Arc::new(provider));
    } else {
        tracing::warn!("EDAMAM_APP_ID/EDAMAM_APP_KEY not set; using built-in food table only");
    }
    sources.push(Arc::new(LocalTableSource::default()));
    Ok(NutritionLookup::new(sources))
}
