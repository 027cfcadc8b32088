use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use sqlx::PgPool;

use user_context_api::{app::init_tracing, config::Config, db};

/// Verify that DATABASE_URL is reachable and report on the users table.
///
/// Exits non-zero when the connection or the probe query fails.
#[derive(Parser, Debug)]
#[command(name = "db_check", version, about)]
struct Args {
    /// Skip the users table probe.
    #[arg(long, default_value_t = false)]
    skip_users: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = Config::from_env().context("loading configuration")?;

    let pool = db::connect(&config)
        .await
        .context("connecting to DATABASE_URL")?;

    let (now, version): (DateTime<Utc>, String) = sqlx::query_as("SELECT NOW(), version()")
        .fetch_one(&pool)
        .await
        .context("running probe query")?;

    println!("connected");
    println!("  server time: {now}");
    println!("  version:     {version}");

    if !args.skip_users {
        report_users(&pool).await?;
    }

    Ok(())
}

async fn report_users(pool: &PgPool) -> Result<()> {
    let (exists,): (bool,) = sqlx::query_as("SELECT to_regclass('public.users') IS NOT NULL")
        .fetch_one(pool)
        .await
        .context("checking for users table")?;

    if !exists {
        tracing::warn!("users table missing; run seed_user --migrate or set RUN_MIGRATIONS=true");
        println!("  users table: missing");
        return Ok(());
    }

    let (total, active): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COUNT(*) FILTER (WHERE is_active) FROM users")
            .fetch_one(pool)
            .await
            .context("counting users")?;

    println!("  users:       {total} ({active} active)");
    Ok(())
}
