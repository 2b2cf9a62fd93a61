#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub mod constants;
pub(crate) mod defaults;
pub mod models;
pub mod utils;

pub use models::*;
pub use utils::*;

use eyre::Result;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_SHA: &str = match option_env!("GIT_SHA") {
    Some(v) => v,
    None => "unknown",
};

/// Sent with every request to the task server.
pub fn user_agent() -> String {
    format!("{APP_NAME}/{VERSION}")
}

pub fn version() -> String {
    format!("{APP_NAME} version: {VERSION} ({GIT_SHA})")
}

#[cfg(not(test))]
static CONFIG: std::sync::OnceLock<Configuration> = std::sync::OnceLock::new();

// Each test thread gets its own configuration so tests can swap it freely.
#[cfg(test)]
thread_local! {
    static TEST_CONFIG: std::cell::Cell<&'static Configuration> =
        std::cell::Cell::new(Box::leak(Box::new(Configuration::default())));
}

impl Configuration {
    #[cfg(not(test))]
    pub fn instance() -> &'static Configuration {
        CONFIG.get().expect("Config not initialized")
    }

    #[cfg(not(test))]
    pub fn init(config: Configuration) -> Result<()> {
        CONFIG
            .set(config)
            .map_err(|_| eyre::eyre!("Config already initialized"))
    }

    #[cfg(test)]
    pub fn instance() -> &'static Configuration {
        TEST_CONFIG.with(|config| config.get())
    }

    #[cfg(test)]
    pub fn init(config: Configuration) -> Result<()> {
        TEST_CONFIG.with(|current| current.set(Box::leak(Box::new(config))));
        Ok(())
    }
}

/// Prints startup progress to stderr when `general.verbose` is set.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::config::Configuration::instance().general.verbose {
            eprintln!($($arg)*);
        }
    };
}

pub use verbose;
