/*
 * Responsibility
 * - Start the tokio runtime
 * - Call app::run() (no logic here)
 */
use anyhow::Result;

use user_context_api::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
