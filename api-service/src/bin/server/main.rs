use std::sync::Arc;

use api_service::config::Config;
use api_service::config::SeedAccount;
use api_service::domain::authentication::errors::AuthError;
use api_service::domain::authentication::models::Credentials;
use api_service::domain::authentication::ports::AuthServicePort;
use api_service::domain::authentication::service::AuthService;
use api_service::domain::authentication::service::AuthServiceConfig;
use api_service::inbound::http::router::create_router;
use api_service::outbound::repositories::InMemoryUserRepository;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "api-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        token_ttl_hours = config.jwt.expiration_hours,
        cookie_name = %config.auth.cookie_name,
        seed_accounts = config.seed.len(),
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let jwt_handler = JwtHandler::with_algorithm(config.jwt.secret.as_bytes(), &config.jwt.algorithm)?;
    let authenticator = Arc::new(Authenticator::from_parts(password_hasher, jwt_handler));

    let user_repository = Arc::new(InMemoryUserRepository::new());

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
        AuthServiceConfig {
            token_ttl_hours: config.jwt.expiration_hours,
            max_concurrent_hashes: config.password.max_concurrent,
        },
    )?);

    seed_accounts(auth_service.as_ref(), &config.seed).await?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        Arc::clone(&auth_service),
        Arc::clone(&authenticator),
        &config.auth.cookie_name,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}

/// Register configured accounts; one that already exists is skipped.
async fn seed_accounts(
    auth_service: &impl AuthServicePort,
    accounts: &[SeedAccount],
) -> Result<(), AuthError> {
    for account in accounts {
        let credentials = Credentials::new(account.email.as_str(), account.password.as_str());

        match auth_service.register(credentials).await {
            Ok(()) => tracing::info!(email = %account.email, "Seed account registered"),
            Err(AuthError::Conflict) => {
                tracing::debug!(email = %account.email, "Seed account already present")
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
