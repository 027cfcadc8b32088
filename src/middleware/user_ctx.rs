//! Acting-user resolution: find a user id on the request, then attach it.
//!
//! The id is looked for in this order, first non-empty value wins:
//! 1. `X-User-Id` header
//! 2. `user_id` query parameter
//! 3. `user_id` field of a JSON body
//!
//! Two modes:
//! - [`require`]: the id must resolve to an existing, active user, otherwise
//!   the request is answered here (400/403/404/500) and never reaches the handler.
//! - [`optional`]: whatever id was supplied is attached as-is, no lookup.
//!
//! Both modes answer 400 when the body has to be inspected but cannot be read.

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::State,
    http::{Request, header, request::Parts},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use url::form_urlencoded;

use crate::api::v1::extractors::ActingUserId;
use crate::error::AppError;
use crate::services::user_ctx::UserCtxError;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ID_FIELD: &str = "user_id";

pub const USER_ID_REQUIRED: &str =
    "user_id is required (header X-User-Id, query param user_id, or body user_id)";
pub const BODY_UNREADABLE: &str = "request body could not be read";

/// Where an identifier candidate was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    Header,
    Query,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub source: IdSource,
}

type PartsAccessor = fn(&Parts) -> Option<String>;

// Sources that only need the request head. The body comes last and is
// handled separately since reading it consumes the stream.
const PARTS_SOURCES: [(IdSource, PartsAccessor); 2] = [
    (IdSource::Header, from_header),
    (IdSource::Query, from_query),
];

/// Wrap every route of `router` with mandatory resolution.
pub fn require(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: unmatched paths keep their 404/405 instead of a 400 from here
    router.route_layer(middleware::from_fn_with_state(state, require_user_middleware))
}

/// Wrap every route of `router` with optional resolution.
pub fn optional(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(
        state,
        optional_user_middleware,
    ))
}

async fn require_user_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let (mut req, candidate) = find_candidate(req, state.body_limit_bytes).await;

    let candidate = candidate
        .map_err(|err| {
            tracing::warn!(error = %err, "failed to buffer request body");
            AppError::bad_request(BODY_UNREADABLE)
        })?
        .ok_or_else(|| AppError::bad_request(USER_ID_REQUIRED))?;

    tracing::debug!(source = ?candidate.source, user_id = %candidate.value, "user id candidate");

    let ctx = state
        .user_ctx
        .resolve(&candidate.value)
        .await
        .map_err(|err| {
            match &err {
                UserCtxError::Repo(cause) => {
                    tracing::error!(error = ?cause, user_id = %candidate.value, "user lookup failed");
                }
                _ => tracing::debug!(error = %err, user_id = %candidate.value, "user rejected"),
            }
            AppError::from(err)
        })?;

    // middleware -> extractor handoff
    req.extensions_mut().insert(ActingUserId(ctx.user_id.clone()));
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

async fn optional_user_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (mut req, candidate) = find_candidate(req, state.body_limit_bytes).await;

    // The stream is consumed at this point, so the handler could not read it either.
    let candidate = match candidate {
        Ok(candidate) => candidate,
        Err(err) => {
            tracing::warn!(error = %err, "failed to buffer request body");
            return AppError::bad_request(BODY_UNREADABLE).into_response();
        }
    };

    if let Some(candidate) = candidate {
        tracing::debug!(source = ?candidate.source, user_id = %candidate.value, "user id attached");
        req.extensions_mut().insert(ActingUserId(candidate.value));
    }

    next.run(req).await
}

/// Looks for an identifier in precedence order and hands the request back.
///
/// If the body had to be read it is re-attached unchanged. On a read error
/// the returned request carries an empty body.
pub async fn find_candidate(
    req: Request<Body>,
    body_limit: usize,
) -> (Request<Body>, Result<Option<Candidate>, axum::Error>) {
    let (parts, body) = req.into_parts();

    for (source, accessor) in PARTS_SOURCES {
        if let Some(value) = accessor(&parts) {
            let candidate = Candidate { value, source };
            return (Request::from_parts(parts, body), Ok(Some(candidate)));
        }
    }

    if !has_json_body(&parts) {
        return (Request::from_parts(parts, body), Ok(None));
    }

    match to_bytes(body, body_limit).await {
        Ok(bytes) => {
            let candidate = from_json_body(&bytes).map(|value| Candidate {
                value,
                source: IdSource::Body,
            });
            (Request::from_parts(parts, Body::from(bytes)), Ok(candidate))
        }
        Err(err) => (Request::from_parts(parts, Body::empty()), Err(err)),
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

// Non-ASCII (obs-text) bytes are still a supplied value; decode lossily rather than skip.
fn from_header(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(USER_ID_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .and_then(non_empty)
}

// First non-empty `user_id` wins when the parameter is repeated.
fn from_query(parts: &Parts) -> Option<String> {
    let query = parts.uri.query()?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == USER_ID_FIELD && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

fn has_json_body(parts: &Parts) -> bool {
    let Some(content_type) = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json")
        || (mime.starts_with("application/") && mime.ends_with("+json"))
}

// Strings are taken as-is, numbers by their decimal rendering; anything else is no id.
fn from_json_body(bytes: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(bytes).ok()?;
    match value.get(USER_ID_FIELD)? {
        Value::String(s) => non_empty(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
