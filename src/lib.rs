//! Deterministic retirement-finance calculations behind a conversational
//! planning assistant: compound-growth projection, asset-allocation modeling,
//! income-flow aggregation, and withdrawal-strategy simulation, plus the
//! persisted user profile and the tool-invocation boundary the assistant
//! drives. All arithmetic lives here; the chat layer never computes.

pub mod api;
pub mod core;
pub mod store;
pub mod tools;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter =
            EnvFilter::from_default_env().add_directive("nestegg=info".parse().expect("static directive"));

        fmt().with_env_filter(filter).init();
    });
}
