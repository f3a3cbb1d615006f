use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audit_ledger::api::{self, AppState};
use audit_ledger::audit::{seed, AuditLedger};
use audit_ledger::compliance::ComplianceScorer;
use audit_ledger::config::AppConfig;
use audit_ledger::identity::IdentityIssuer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audit_ledger=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting audit ledger");

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded");

    let rules = config.rule_set()?;
    info!("Compliance rules loaded: {} active", rules.active_rules().count());

    let ledger = AuditLedger::new(config.ledger_config());
    if config.simulated_latency_ms > 0 {
        warn!(
            "Simulating {}ms chain latency on every audit trail write",
            config.simulated_latency_ms
        );
    }

    // Seed in the background so the server is reachable immediately
    if config.seed_sample_data {
        let seed_ledger = ledger.clone();
        tokio::spawn(async move {
            if let Err(e) = seed::seed_sample_data(&seed_ledger).await {
                warn!("Failed to seed sample data: {}", e);
            }
        });
    }

    let state = AppState::new(
        ledger,
        ComplianceScorer::new(rules),
        IdentityIssuer::new(&config.did_method),
    );
    let app = api::router(state);

    // Start server
    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
