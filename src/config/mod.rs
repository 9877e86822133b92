//! User configuration: settings file and on-disk locations.

mod paths;
mod settings;

pub use paths::{config_dir, logs_dir};
pub use settings::{Settings, normalize_base_url, parse_settings, settings};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

/// Serializes tests that modify `HOME`/`XDG_CONFIG_HOME`.
#[cfg(test)]
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
