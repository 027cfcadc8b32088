/*!
 * Acting-user context extractors
 *
 * Responsibility:
 * - Hand the identity resolved by the user_ctx middleware to handlers
 * - axum glue lives in core, plain types in types
 *
 * Public API:
 * - UserCtx, ActingUserId
 * - CurrentUser, MaybeUserId
 */

mod core;
mod types;

pub use self::core::{CurrentUser, MaybeUserId};
pub use self::types::{ActingUserId, UserCtx};
