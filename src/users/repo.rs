use sqlx::{FromRow, PgPool};

use super::dto::PublicUser;
use crate::error::ApiError;

/// User record as stored. Passwords are kept as Argon2 PHC strings, not
/// plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
}

impl User {
    /// Insert a new user. Email uniqueness is enforced by the database
    /// constraint; a violation maps to `DuplicateEmail`.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        is_active: bool,
    ) -> Result<User, ApiError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, is_active)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, is_active
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(is_active)
        .fetch_one(db)
        .await
        .map_err(|e| match e.as_database_error().and_then(|d| d.code()) {
            Some(code) if code == "23505" => ApiError::DuplicateEmail,
            _ => ApiError::Store(e),
        })
    }

    /// Find a user by email, exact match.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, is_active
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// All users, id ascending.
    pub async fn list_all(db: &PgPool) -> Result<Vec<User>, ApiError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, is_active
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_projection_drops_the_hash() {
        let user = User {
            id: 1,
            email: "a@x.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".into(),
            is_active: true,
        };
        let public = user.public();
        assert_eq!(public.id, 1);
        assert_eq!(public.email, "a@x.com");
        assert!(public.is_active);
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("argon2"));
    }
}
