//! Tracing setup shared by unit and integration tests.

use std::env;
use std::sync::Once;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// Installs the test subscriber once per process.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        setup_test_logging();
        info!("Test Setup complete");
    });
}

/// Deterministic generator for randomized engine operations.
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // layout runs on every frame; keep it out of test logs
    let noisy_modules = ["treeviz::domain::layout"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn given_same_seed_when_drawing_then_sequences_match() {
        init_test_setup();
        let a: Vec<u32> = (0..5).map(|_| seeded_rng(7).random_range(0..1000)).collect();
        let b: Vec<u32> = (0..5).map(|_| seeded_rng(7).random_range(0..1000)).collect();
        assert_eq!(a, b);
    }
}
