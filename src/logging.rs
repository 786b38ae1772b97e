//! # Structured Logging Module
//!
//! Console logging for the helpers registry, filtered by the configured
//! directive or `RUST_LOG`.

use crate::config::HelpersConfig;
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging. Only the first call has an effect.
pub fn init_structured_logging(config: &HelpersConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = log_filter(config);

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_test_writer()
                .with_filter(EnvFilter::new(filter.clone())),
        );

        // The host framework may already have installed a global subscriber
        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(filter = %filter, "Structured logging initialized");
    });
}

/// `RUST_LOG` when set, otherwise the configured filter
fn log_filter(config: &HelpersConfig) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.log_filter.clone())
}

/// Log structured data for registry lifecycle operations
pub fn log_registry_operation(operation: &str, path: Option<&str>, status: &str, details: Option<&str>) {
    tracing::info!(
        operation = %operation,
        path = path,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "REGISTRY_OPERATION"
    );
}
