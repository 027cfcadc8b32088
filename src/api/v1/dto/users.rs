/*
 * Responsibility
 * - Response DTOs for the acting-user endpoints
 */
use serde::Serialize;

use crate::repos::user_repo::UserRow;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            role: row.role,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    // null when the caller sent no id
    pub user_id: Option<String>,
}
