//! furlink - session smoke run against the configured backend.
//!
//! Loads configuration, resolves the persisted session and, when
//! `FURLINK_EMAIL` and `FURLINK_PASSWORD` are set, signs in, reports the
//! profile and signs out again. `FURLINK_IP_ADDRESS` enables the login
//! audit row.

use std::env;

use furlink::adapters::SupabaseBackend;
use furlink::application::{AppRoute, RouteGuard, SessionManager};
use furlink::config::{AppConfig, ConfigError};
use furlink::domain::auth::{AuthError, SignInRequest};
use furlink::telemetry::{self, TelemetryError};

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{}", .0.display_message())]
    Auth(#[from] AuthError),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    telemetry::init(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        backend = config.backend.base_url(),
        "starting furlink"
    );

    let backend = SupabaseBackend::connect(&config.backend)?;
    let manager = SessionManager::start(backend.auth(), backend.profiles(), backend.session_logs());
    let guard = RouteGuard::from_config(&config.routes);

    let state = manager.wait_until_loaded().await;
    tracing::info!(
        signed_in = state.is_authenticated(),
        dashboard = ?guard.decide_route(AppRoute::Dashboard, &state),
        "session resolved"
    );

    if let (Ok(email), Ok(password)) = (env::var("FURLINK_EMAIL"), env::var("FURLINK_PASSWORD")) {
        let mut request = SignInRequest::new(email, password)
            .with_user_agent(concat!("furlink/", env!("CARGO_PKG_VERSION")));
        if let Ok(ip_address) = env::var("FURLINK_IP_ADDRESS") {
            request = request.with_ip_address(ip_address);
        }

        manager.sign_in(&request).await?;
        manager.flush_background().await;

        let state = manager.snapshot();
        match &state.profile {
            Some(profile) => tracing::info!(
                user_id = %profile.id,
                name = %profile.full_name(),
                role = profile.role.label(),
                "signed in"
            ),
            None => tracing::warn!("signed in but no profile row was found"),
        }
        tracing::info!(
            next = %guard.post_login_target(None),
            "post-login navigation"
        );

        manager.sign_out().await?;
        tracing::info!("signed out");
    }

    manager.teardown();
    Ok(())
}
