/*
 * Responsibility
 * - SQLx operations on the users table
 * - Holds the PgPool; implements UserStore for the resolver
 * - upsert is only used by the seed_user tool
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::{error::RepoResult, user_store::UserStore};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
}

pub struct NewUser<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub name: &'a str,
    pub role: &'a str,
    pub is_active: bool,
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: &str) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, role, is_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // Insert, or overwrite every column but created_at when the id already exists.
    pub async fn upsert(&self, user: &NewUser<'_>) -> RepoResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, name, role, is_active)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET
                email = EXCLUDED.email,
                name = EXCLUDED.name,
                role = EXCLUDED.role,
                is_active = EXCLUDED.is_active
            RETURNING id, email, name, role, is_active
            "#,
        )
        .bind(user.id)
        .bind(user.email)
        .bind(user.name)
        .bind(user.role)
        .bind(user.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl UserStore for PgUserRepo {
    async fn find_by_id(&self, user_id: &str) -> RepoResult<Option<UserRow>> {
        self.get(user_id).await
    }
}
