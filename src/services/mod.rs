pub mod user_ctx;
