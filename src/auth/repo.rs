use crate::auth::repo_types::{NewUser, ProfileChanges, User};
use anyhow::Context;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CreateUserError {
    #[error("email already registered")]
    EmailTaken,
    #[error("insert user: {0}")]
    Db(sqlx::Error),
}

impl From<sqlx::Error> for CreateUserError {
    fn from(e: sqlx::Error) -> Self {
        let unique = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if unique {
            CreateUserError::EmailTaken
        } else {
            CreateUserError::Db(e)
        }
    }
}

const USER_COLUMNS: &str =
    "id, name, email, password_hash, age, weight_kg, height_cm, goal, created_at";

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    /// Create a new user with hashed password.
    /// Insert a user. A concurrent signup that already took the email
    /// surfaces as `EmailTaken`.
    pub async fn create(db: &PgPool, new: NewUser<'_>) -> Result<User, CreateUserError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, age, weight_kg, height_cm, goal)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.age)
        .bind(new.weight_kg)
        .bind(new.height_cm)
        .bind(new.goal.as_str())
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Apply the provided fields; returns `None` when the user is gone.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        changes: ProfileChanges,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                name      = COALESCE($2, name),
                age       = COALESCE($3, age),
                weight_kg = COALESCE($4, weight_kg),
                height_cm = COALESCE($5, height_cm),
                goal      = COALESCE($6, goal)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.age)
        .bind(changes.weight_kg)
        .bind(changes.height_cm)
        .bind(changes.goal.map(|g| g.as_str()))
        .fetch_optional(db)
        .await
        .context("update user profile")?;
        Ok(user)
    }
}
