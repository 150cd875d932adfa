use std::sync::Arc;
use std::time::Duration;

use auth::JwtHandler;
use auth::PasswordHasher;
use chrono::Utc;
use realty_api::config::Config;
use realty_api::domain::auth::models::TokenSettings;
use realty_api::domain::auth::ports::RevokedTokenRepository;
use realty_api::domain::auth::service::AuthService;
use realty_api::inbound::http::router::create_router;
use realty_api::outbound::repositories::PostgresRevokedTokenRepository;
use realty_api::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const REVOKED_TOKEN_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "realty_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "realty-api",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        access_token_expire_minutes = config.jwt.access_token_expire_minutes,
        refresh_token_expire_minutes = config.jwt.refresh_token_expire_minutes,
        revoke_rotated_refresh_tokens = config.jwt.revoke_rotated_refresh_tokens,
        "Configuration loaded"
    );

    // Bad signing, lifetime or hashing settings stop the service here, before any request.
    let token_settings = TokenSettings::try_from(&config.jwt)?;
    let token_handler = Arc::new(JwtHandler::new(
        config.jwt.secret_key.as_bytes(),
        &config.jwt.algorithm,
    )?);
    let password_hasher = Arc::new(PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?);

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let revoked_tokens = Arc::new(PostgresRevokedTokenRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&revoked_tokens),
        password_hasher,
        token_handler,
        token_settings,
    )?);

    if config.jwt.revoke_rotated_refresh_tokens {
        tokio::spawn(purge_revoked_tokens(revoked_tokens));
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    match axum::serve(http_listener, create_router(auth_service)).await {
        Ok(()) => tracing::info!("Server exited successfully"),
        Err(e) => tracing::error!(error = %e, "Server error"),
    };

    Ok(())
}

async fn purge_revoked_tokens<R: RevokedTokenRepository>(repository: Arc<R>) {
    let mut interval = tokio::time::interval(REVOKED_TOKEN_PURGE_INTERVAL);

    loop {
        interval.tick().await;
        match repository.purge_expired(Utc::now()).await {
            Ok(purged) => tracing::debug!(purged, "Expired revoked tokens purged"),
            Err(e) => tracing::error!(error = %e, "Failed to purge revoked tokens"),
        }
    }
}
