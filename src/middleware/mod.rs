/*
 * Responsibility
 * - Router-level middleware
 *   - user_ctx: acting-user resolution (per route group)
 *   - http / cors: applied once around the whole app
 */
pub mod cors;
pub mod http;
pub mod user_ctx;
