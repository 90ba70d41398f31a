pub(crate) use crate::auth::dto::{Claims, JwtKeys, TokenKind};
use crate::auth::dto::{SignupRequest, UpdateProfileRequest};
use crate::auth::repo_types::ProfileChanges;
use crate::config::JwtConfig;
use crate::error::at_least;
use crate::state::AppState;
use crate::summary::advice::Goal;
use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::{async_trait, extract::{FromRef, FromRequestParts}, http::{request::Parts, StatusCode}};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use std::time::Duration;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, error, warn};
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn parse_goal(raw: &str) -> Result<Goal, String> {
    raw.parse::<Goal>()
        .map_err(|_| "Goal must be loss, gain, or maintain".to_string())
}

/// Normalizes the email in place and checks every signup field.
pub(crate) fn validate_signup(req: &mut SignupRequest) -> Result<Goal, String> {
    req.email = req.email.trim().to_lowercase();
    req.name = req.name.trim().to_string();
    if req.name.is_empty() {
        return Err("Name is required".into());
    }
    if !is_valid_email(&req.email) {
        return Err("Invalid email".into());
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err("Password too short".into());
    }
    if req.age < 1 {
        return Err("Valid age is required".into());
    }
    if !at_least(req.weight_kg, 1.0) {
        return Err("Valid weight is required".into());
    }
    if !at_least(req.height_cm, 1.0) {
        return Err("Valid height is required".into());
    }
    parse_goal(&req.goal)
}

pub(crate) fn validate_profile_update(req: UpdateProfileRequest) -> Result<ProfileChanges, String> {
    let name = match req.name {
        Some(n) if n.trim().is_empty() => return Err("Name cannot be empty".into()),
        Some(n) => Some(n.trim().to_string()),
        None => None,
    };
    if matches!(req.age, Some(a) if a < 1) {
        return Err("Valid age is required".into());
    }
    if matches!(req.weight_kg, Some(w) if !at_least(w, 1.0)) {
        return Err("Valid weight is required".into());
    }
    if matches!(req.height_cm, Some(h) if !at_least(h, 1.0)) {
        return Err("Valid height is required".into());
    }
    let goal = req.goal.as_deref().map(parse_goal).transpose()?;
    Ok(ProfileChanges {
        name,
        age: req.age,
        weight_kg: req.weight_kg,
        height_cm: req.height_cm,
        goal,
    })
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

impl From<&JwtConfig> for JwtKeys {
    fn from(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            access_ttl: Duration::from_secs((cfg.ttl_minutes as u64) * 60),
            refresh_ttl: Duration::from_secs((cfg.refresh_ttl_minutes as u64) * 60),
        }
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::from(&state.config.jwt)
    }
}

impl JwtKeys {
    fn sign_with_kind(&self, user_id: Uuid, kind: TokenKind) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let exp = now + TimeDuration::seconds(ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            kind,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, kind = ?kind, "jwt signed");
        Ok(token)
    }

    pub fn sign_access(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.sign_with_kind(user_id, TokenKind::Access)
    }
    pub fn sign_refresh(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.sign_with_kind(user_id, TokenKind::Refresh)
    }

    /// Access + refresh pair for `user_id`.
    pub fn sign_pair(&self, user_id: Uuid) -> anyhow::Result<(String, String)> {
        Ok((self.sign_access(user_id)?, self.sign_refresh(user_id)?))
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, kind = ?data.claims.kind, "jwt verified");
        Ok(data.claims)
    }

    pub fn verify_refresh(&self, token: &str) -> anyhow::Result<Claims> {
        let claims = self.verify(token)?;
        if claims.kind != TokenKind::Refresh {
            anyhow::bail!("not a refresh token");
        }
        Ok(claims)
    }
}

/// Extracts and validates the bearer access token, yielding the user ID.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing Authorization header".to_string(),
            ))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header".to_string(),
            ))?;

        let claims = match keys.verify(token) {
            Ok(c) => c,
            Err(_) => {
                warn!("invalid or expired token");
                return Err((
                    StatusCode::UNAUTHORIZED,
                    "Invalid or expired token".to_string(),
                ));
            }
        };

        if claims.kind != TokenKind::Access {
            return Err((
                StatusCode::UNAUTHORIZED,
                "Access token required".to_string(),
            ));
        }

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod password_tests {
    use super::*;

    #[test]
    fn shortest_accepted_password_round_trips() {
        let plain = "a".repeat(MIN_PASSWORD_LEN);
        let hash = hash_password(&plain).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&plain, &hash).unwrap());
        assert!(!verify_password(&plain[1..], &hash).unwrap());
    }

    #[test]
    fn same_password_gets_fresh_salt() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("secret1", &second).unwrap());
    }

    #[test]
    fn stored_garbage_is_an_error_not_a_mismatch() {
        assert!(verify_password("secret1", "plaintext-secret1").is_err());
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    fn signup() -> SignupRequest {
        SignupRequest {
            name: " Alex ".into(),
            email: "  Alex@Example.COM ".into(),
            password: "secret1".into(),
            age: 29,
            weight_kg: 72.5,
            height_cm: 178.0,
            goal: "maintain".into(),
        }
    }

    #[test]
    fn signup_normalizes_and_accepts() {
        let mut req = signup();
        assert_eq!(validate_signup(&mut req), Ok(Goal::Maintain));
        assert_eq!(req.email, "alex@example.com");
        assert_eq!(req.name, "Alex");
    }

    fn rejects(mutate: impl FnOnce(&mut SignupRequest), expected: &str) {
        let mut req = signup();
        mutate(&mut req);
        assert_eq!(validate_signup(&mut req), Err(expected.to_string()));
    }

    #[test]
    fn signup_rejects_bad_fields() {
        rejects(|r| r.name = "  ".into(), "Name is required");
        rejects(|r| r.email = "not-an-email".into(), "Invalid email");
        rejects(|r| r.password = "12345".into(), "Password too short");
        rejects(|r| r.age = 0, "Valid age is required");
        rejects(|r| r.weight_kg = 0.5, "Valid weight is required");
        rejects(|r| r.height_cm = f64::NAN, "Valid height is required");
        rejects(|r| r.goal = "bulk".into(), "Goal must be loss, gain, or maintain");
    }

    #[test]
    fn profile_update_keeps_absent_fields() {
        let changes = validate_profile_update(UpdateProfileRequest {
            weight_kg: Some(68.0),
            goal: Some("loss".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(changes.weight_kg, Some(68.0));
        assert_eq!(changes.goal, Some(Goal::Loss));
        assert!(changes.name.is_none());
        assert!(changes.age.is_none());
    }

    #[test]
    fn profile_update_rejects_invalid_values() {
        let empty_name = UpdateProfileRequest {
            name: Some(" ".into()),
            ..Default::default()
        };
        assert!(validate_profile_update(empty_name).is_err());
        let bad_goal = UpdateProfileRequest {
            goal: Some("shred".into()),
            ..Default::default()
        };
        assert!(validate_profile_update(bad_goal).is_err());
        let bad_age = UpdateProfileRequest {
            age: Some(0),
            ..Default::default()
        };
        assert!(validate_profile_update(bad_age).is_err());
    }
}
