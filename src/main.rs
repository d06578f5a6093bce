//! Library Catalog - demo host
//!
//! Wires configuration, logging and the notification service, then runs a
//! short loan round trip against the catalog.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_catalog::{
    config::{AppConfig, LogFormat},
    models::Book,
    services::PatronObserver,
    AppState,
};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    init_tracing(&config);

    tracing::info!("Starting library catalog v{}", env!("CARGO_PKG_VERSION"));

    let patron_id = config.demo.patron_id.clone();
    let state = AppState::from_config(config);

    state.with_catalog(|catalog| {
        let notifier = catalog.notifier();
        catalog.add_observer(Arc::new(PatronObserver::new(patron_id.clone(), notifier)));

        catalog.add_book("El Gran Gatsby", "F. Scott Fitzgerald", "123456789");
        catalog.add(
            Book::builder()
                .title("1984")
                .author("George Orwell")
                .isbn("987654321")
                .build()?,
        );

        catalog.loan_book("123456789", &patron_id);
        catalog.return_book("123456789", &patron_id);

        tracing::info!(
            "Catalog holds {} books, {} active loans",
            catalog.books().len(),
            catalog.loans().len()
        );
        Ok::<_, anyhow::Error>(())
    })?;

    if let Some(outbox) = state.outbox() {
        for notification in outbox.drain() {
            tracing::info!(
                "Dispatching queued message to {}: {}",
                notification.recipient_id,
                notification.message
            );
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_catalog={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
