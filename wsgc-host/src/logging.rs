//! Logging setup.
//!
//! Installs a `tracing-subscriber` fmt subscriber filtered at the configured
//! level. `RUST_LOG` overrides the configured level when set.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Install the global subscriber. Returns `false` if one was already
/// installed (by the host or an earlier call); that is not an error.
pub fn init_logging(level: &str) -> bool {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level, env.as_deref()))
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Parse a settings log level. Anything that is not a level name falls back
/// to `info` so warnings are never silenced by a typo.
fn level_filter(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}

/// `env` directives win; the settings level applies when there are none.
fn build_filter(level: &str, env: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_filter(level).into())
        .parse_lossy(env.unwrap_or_default())
}
