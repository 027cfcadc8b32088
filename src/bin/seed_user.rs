use anyhow::{Context, Result};
use clap::Parser;
use uuid::Uuid;

use user_context_api::{
    api::v1::dto::users::UserResponse,
    app::init_tracing,
    config::Config,
    db,
    repos::user_repo::{NewUser, PgUserRepo},
};

/// Create (or refresh) a user row for manual testing.
///
/// Re-running with the same `--id` overwrites email, name, role and the
/// active flag. Prints the stored row as JSON on stdout.
#[derive(Parser, Debug)]
#[command(name = "seed_user", version, about)]
struct Args {
    /// User id. Default: random UUID v4.
    #[arg(long)]
    id: Option<String>,

    /// Email (must be unique across users). Default: test+<id>@example.com
    #[arg(long)]
    email: Option<String>,

    #[arg(long, default_value = "Test User")]
    name: String,

    #[arg(long, default_value = "student")]
    role: String,

    /// Store the user as inactive (requests acting as it get 403).
    #[arg(long, default_value_t = false)]
    inactive: bool,

    /// Apply migrations before inserting.
    #[arg(long, default_value_t = false)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = Config::from_env().context("loading configuration")?;

    let pool = db::connect(&config)
        .await
        .context("connecting to DATABASE_URL")?;
    if args.migrate {
        db::migrate(&pool).await.context("running migrations")?;
    }

    let id = args.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let email = args
        .email
        .unwrap_or_else(|| format!("test+{id}@example.com"));

    let repo = PgUserRepo::new(pool);
    let row = repo
        .upsert(&NewUser {
            id: &id,
            email: &email,
            name: &args.name,
            role: &args.role,
            is_active: !args.inactive,
        })
        .await
        .context("upserting user")?;

    tracing::info!(user_id = %row.id, is_active = row.is_active, "test user ready");
    println!(
        "{}",
        serde_json::to_string_pretty(&UserResponse::from(row))?
    );
    Ok(())
}
