#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use user_context_api::{
    api,
    repos::{
        error::{RepoError, RepoResult},
        user_repo::UserRow,
        user_store::UserStore,
    },
    state::AppState,
};

pub const BODY_LIMIT: usize = 64 * 1024;

/// In-memory users table that records every id it was asked for.
#[derive(Default)]
pub struct MemoryStore {
    users: HashMap<String, UserRow>,
    lookups: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn with_users(users: Vec<UserRow>) -> Arc<Self> {
        Arc::new(Self {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
            lookups: Mutex::new(Vec::new()),
        })
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, user_id: &str) -> RepoResult<Option<UserRow>> {
        self.lookups.lock().unwrap().push(user_id.to_string());
        Ok(self.users.get(user_id).cloned())
    }
}

/// Store whose backend is always down.
pub struct UnavailableStore;

#[async_trait]
impl UserStore for UnavailableStore {
    async fn find_by_id(&self, _user_id: &str) -> RepoResult<Option<UserRow>> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }
}

pub fn user(id: &str, role: &str, is_active: bool) -> UserRow {
    UserRow {
        id: id.to_string(),
        email: format!("user{id}@example.com"),
        name: format!("User {id}"),
        role: role.to_string(),
        is_active,
    }
}

pub fn v1_router(store: Arc<dyn UserStore>) -> Router {
    let state = AppState::new(store, BODY_LIMIT);
    Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state)
}

pub async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = router.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn get(uri: &str) -> axum::http::request::Builder {
    Request::builder().method("GET").uri(uri)
}

pub fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}
