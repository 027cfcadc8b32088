pub mod user_ctx;

pub use user_ctx::{ActingUserId, CurrentUser, MaybeUserId, UserCtx};
