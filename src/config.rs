use anyhow::Context;
use serde::Deserialize;
use time::{macros::format_description, UtcOffset};

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Credentials and limits for the external nutrition provider.
/// The provider is skipped entirely when either credential is missing.
#[derive(Debug, Clone, Deserialize)]
pub struct NutritionApiConfig {
    pub base_url: String,
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    pub timeout_secs: u64,
}

impl NutritionApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.edamam.com/api/nutrition-data";

    pub fn disabled() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.into(),
            app_id: None,
            app_key: None,
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub nutrition_api: NutritionApiConfig,
    /// Offset used to decide where a calendar day starts and ends.
    pub utc_offset: UtcOffset,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "fittrack".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "fittrack-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let nutrition_api = NutritionApiConfig {
            base_url: std::env::var("EDAMAM_API_BASE")
                .unwrap_or_else(|_| NutritionApiConfig::DEFAULT_BASE_URL.into()),
            app_id: std::env::var("EDAMAM_APP_ID").ok().filter(|v| !v.is_empty()),
            app_key: std::env::var("EDAMAM_APP_KEY").ok().filter(|v| !v.is_empty()),
            timeout_secs: std::env::var("NUTRITION_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5),
        };
        let utc_offset = match std::env::var("APP_UTC_OFFSET") {
            Ok(raw) => parse_utc_offset(&raw)?,
            Err(_) => UtcOffset::UTC,
        };
        Ok(Self {
            database_url,
            jwt,
            nutrition_api,
            utc_offset,
        })
    }
}

/// Parses offsets written as `+02:00` or `-05:30`.
pub fn parse_utc_offset(raw: &str) -> anyhow::Result<UtcOffset> {
    let format = format_description!("[offset_hour sign:mandatory]:[offset_minute]");
    UtcOffset::parse(raw.trim(), format)
        .with_context(|| format!("invalid APP_UTC_OFFSET {raw:?}, expected +HH:MM"))
}
