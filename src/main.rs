use contact_relay::{config, mailer::SmtpMailer, router, service::SubmissionService};
use tracing_subscriber::EnvFilter;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config file: {e}");
    });
    tracing::info!("Successfully loaded contact relay config");

    // Setup transport and service
    let mailer = SmtpMailer::new(&cfg).unwrap_or_else(|e| {
        tracing::error!("Failed to configure SMTP transport: {e}");
        panic!("failed to configure SMTP transport: {e}");
    });
    let service = Arc::new(SubmissionService::new(Arc::new(mailer), &cfg));

    // Setup router
    let app = router(service);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .expect("Failed to bind to address");
    let addr = listener
        .local_addr()
        .expect("Failed to read listener address");

    tracing::info!("Contact relay starting, listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
