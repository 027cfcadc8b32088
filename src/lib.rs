//! REST backend that threads the acting user through `X-User-Id`
//! (or `user_id` in the query string or JSON body) and resolves it against
//! the `users` table before handlers run.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
