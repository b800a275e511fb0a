use crate::config::Env;
use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber for `env`.
///
/// `local` logs human-readable lines at debug, `dev` JSON at debug, `prod`
/// JSON at info. `RUST_LOG` overrides the level.
pub fn init_tracing(env: Env) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(env)));
    let registry = tracing_subscriber::registry().with(filter);

    match env {
        Env::Local => registry.with(fmt::layer().with_target(true)).try_init(),
        Env::Dev | Env::Prod => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
    }
    .context("failed to initialise tracing")
}

fn default_level(env: Env) -> &'static str {
    match env {
        Env::Local | Env::Dev => "debug",
        Env::Prod => "info",
    }
}
