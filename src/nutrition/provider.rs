use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::lookup::{LookupResult, LookupSource, NutritionSource};
use crate::config::NutritionApiConfig;
use crate::rounding::{round_half_up, round_tenth};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("nutrition provider credentials are not configured")]
    NotConfigured,
    #[error("nutrition provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("nutrition provider returned no calories")]
    NoCalories,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NutrientAmount {
    #[serde(default)]
    pub quantity: f64,
}

/// The part of an Edamam `nutrition-data` response we read.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EdamamResponse {
    #[serde(default)]
    pub calories: f64,
    #[serde(rename = "totalNutrients", default)]
    pub total_nutrients: HashMap<String, NutrientAmount>,
}

impl EdamamResponse {
    fn nutrient(&self, code: &str) -> f64 {
        self.total_nutrients.get(code).map(|n| n.quantity).unwrap_or(0.0)
    }

    /// The provider already answers for the whole phrase, so values are
    /// totals for `quantity_grams` and only need rounding.
    pub(crate) fn into_result(
        self,
        food_name: &str,
        quantity_grams: f64,
    ) -> Result<LookupResult, ProviderError> {
        if self.calories.is_nan() || self.calories <= 0.0 {
            return Err(ProviderError::NoCalories);
        }
        Ok(LookupResult {
            name: food_name.to_string(),
            quantity_grams,
            calories: round_half_up(self.calories),
            protein_grams: round_tenth(self.nutrient("PROCNT")),
            carbs_grams: round_tenth(self.nutrient("CHOCDF")),
            fat_grams: round_tenth(self.nutrient("FAT")),
            serving_size: format!("{quantity_grams}g"),
            source: LookupSource::ExternalProvider,
        })
    }
}

/// Ingredient phrase understood by the provider, e.g. `150g chicken breast`.
pub fn query_phrase(food_name: &str, quantity_grams: f64) -> String {
    format!("{}g {}", quantity_grams, food_name.trim())
}

struct Credentials {
    app_id: String,
    app_key: String,
}

pub struct EdamamSource {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl EdamamSource {
    pub fn new(cfg: &NutritionApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        let credentials = match (&cfg.app_id, &cfg.app_key) {
            (Some(app_id), Some(app_key)) => Some(Credentials {
                app_id: app_id.clone(),
                app_key: app_key.clone(),
            }),
            _ => None,
        };
        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
            credentials,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    pub async fn fetch(
        &self,
        food_name: &str,
        quantity_grams: f64,
    ) -> Result<LookupResult, ProviderError> {
        let creds = self.credentials.as_ref().ok_or(ProviderError::NotConfigured)?;
        let phrase = query_phrase(food_name, quantity_grams);
        let body = self
            .client
            .get(&self.base_url)
            .query(&[
                ("app_id", creds.app_id.as_str()),
                ("app_key", creds.app_key.as_str()),
                ("ingr", phrase.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<EdamamResponse>()
            .await?;
        body.into_result(food_name, quantity_grams)
    }
}

#[async_trait]
impl NutritionSource for EdamamSource {
    fn name(&self) -> &'static str {
        "edamam"
    }

    async fn try_resolve(&self, food_name: &str, quantity_grams: f64) -> Option<LookupResult> {
        match self.fetch(food_name, quantity_grams).await {
            Ok(found) => Some(found),
            Err(ProviderError::Transport(e)) => {
                warn!(error = %e, food = %food_name, "nutrition provider unavailable");
                None
            }
            Err(e) => {
                debug!(error = %e, food = %food_name, "nutrition provider miss");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_combines_quantity_and_name() {
        assert_eq!(query_phrase("chicken breast", 150.0), "150g chicken breast");
        assert_eq!(query_phrase(" oats ", 42.5), "42.5g oats");
    }

    #[test]
    fn parses_provider_payload() {
        let raw = r#"{
            "calories": 247.6,
            "totalNutrients": {
                "PROCNT": {"label": "Protein", "quantity": 46.53, "unit": "g"},
                "FAT": {"label": "Fat", "quantity": 5.36, "unit": "g"}
            }
        }"#;
        let resp: EdamamResponse = serde_json::from_str(raw).unwrap();
        let out = resp.into_result("chicken breast", 150.0).unwrap();
        assert_eq!(out.calories, 248.0);
        assert!((out.protein_grams - 46.5).abs() < 1e-9);
        assert_eq!(out.carbs_grams, 0.0);
        assert!((out.fat_grams - 5.4).abs() < 1e-9);
        assert_eq!(out.source, LookupSource::ExternalProvider);
    }

    #[test]
    fn zero_calories_is_a_miss() {
        let resp: EdamamResponse = serde_json::from_str(r#"{"calories": 0}"#).unwrap();
        assert!(matches!(
            resp.into_result("air", 100.0),
            Err(ProviderError::NoCalories)
        ));
        let empty: EdamamResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.into_result("air", 100.0).is_err());
    }

    #[tokio::test]
    async fn unconfigured_source_misses_without_network() {
        let source = EdamamSource::new(&NutritionApiConfig::disabled()).unwrap();
        assert!(!source.is_configured());
        assert!(matches!(
            source.fetch("apple", 100.0).await,
            Err(ProviderError::NotConfigured)
        ));
        assert!(source.try_resolve("apple", 100.0).await.is_none());
    }

    mod over_http {
        use super::*;
        use crate::nutrition::build_lookup;
        use tokio::{
            io::{AsyncReadExt, AsyncWriteExt},
            net::TcpListener,
        };

        fn config_for(base_url: String) -> NutritionApiConfig {
            NutritionApiConfig {
                base_url,
                app_id: Some("id".into()),
                app_key: Some("key".into()),
                timeout_secs: 2,
            }
        }

        /// Answers a single request with `status` and `body`, then closes.
        async fn serve_once(status: &'static str, body: &'static str) -> String {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
            format!("http://{addr}/api/nutrition-data")
        }

        #[tokio::test]
        async fn refused_connection_falls_back_to_table() {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);

            let lookup = build_lookup(&config_for(format!("http://{addr}/"))).unwrap();
            let found = lookup.lookup("chicken breast", 100.0).await.unwrap();
            assert_eq!(found.source, LookupSource::LocalTable);
            assert_eq!(found.calories, 165.0);
        }

        #[tokio::test]
        async fn server_error_falls_back_to_table() {
            let url = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
            let lookup = build_lookup(&config_for(url)).unwrap();
            let found = lookup.lookup("apple", 100.0).await.unwrap();
            assert_eq!(found.source, LookupSource::LocalTable);
            assert_eq!(found.calories, 52.0);
        }

        #[tokio::test]
        async fn malformed_body_falls_back_to_table() {
            let url = serve_once("200 OK", r#"{"calories": "#).await;
            let lookup = build_lookup(&config_for(url)).unwrap();
            let found = lookup.lookup("banana", 100.0).await.unwrap();
            assert_eq!(found.source, LookupSource::LocalTable);
            assert_eq!(found.calories, 89.0);
        }

        #[tokio::test]
        async fn provider_answer_wins_over_table() {
            let url = serve_once(
                "200 OK",
                r#"{"calories": 247.6, "totalNutrients": {"PROCNT": {"quantity": 46.53}}}"#,
            )
            .await;
            let lookup = build_lookup(&config_for(url)).unwrap();
            let found = lookup.lookup("chicken breast", 150.0).await.unwrap();
            assert_eq!(found.source, LookupSource::ExternalProvider);
            assert_eq!(found.calories, 248.0);
            assert!((found.protein_grams - 46.5).abs() < 1e-9);
        }

        #[tokio::test]
        async fn provider_miss_on_unknown_food_is_a_miss_overall() {
            let url = serve_once("200 OK", r#"{"calories": 0}"#).await;
            let lookup = build_lookup(&config_for(url)).unwrap();
            assert!(lookup.lookup("unobtainium stew", 100.0).await.is_none());
        }
    }
}
