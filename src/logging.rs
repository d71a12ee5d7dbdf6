//! Logger setup for both targets
//!
//! Browser builds log to the devtools console and route panics there too.
//! Native builds use `env_logger`, so `RUST_LOG` overrides the level.

use log::LevelFilter;

/// Install the global logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    console_error_panic_hook::set_once();
    let level = level.to_level().unwrap_or(log::Level::Error);
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(level);
}

/// Install the global logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    use env_logger::{Builder, Env};

    let env = Env::default().default_filter_or(level.to_string());
    // `try_init` only fails if a logger was already set
    let _ = Builder::from_env(env).format_timestamp_millis().try_init();
}
