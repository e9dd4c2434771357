//! Startup.
//!
//! The host's mod loader hands over the mod directory and the raw settings
//! text once. Settings are parsed before logging is installed so the log
//! level can come from them; a parse failure is logged right after install.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use wsgc_core::config::WsgcConfig;
use wsgc_core::error::{Result, WsgcError};

use crate::hooks::WsgcMod;
use crate::logging;

/// Settings files looked up by [`init_from_directory`], in order.
pub const SETTINGS_FILES: [&str; 2] = ["settings.json", "settings.toml"];

/// Start the mod from settings JSON supplied by the host.
///
/// Never fails: unparseable settings yield the default configuration.
#[must_use]
pub fn init(directory: &Path, settings_json: &str) -> WsgcMod {
    start(directory, WsgcConfig::from_json(settings_json))
}

/// Start the mod from a settings file in `directory`.
///
/// Never fails: a missing or unparseable file yields the default
/// configuration.
#[must_use]
pub fn init_from_directory(directory: &Path) -> WsgcMod {
    let parsed = SETTINGS_FILES
        .iter()
        .map(|name| directory.join(name))
        .find(|path| path.is_file())
        .map_or_else(
            || {
                Err(WsgcError::Config(format!(
                    "no settings file in {}",
                    directory.display()
                )))
            },
            |path| WsgcConfig::from_file(&path),
        );
    start(directory, parsed)
}

fn start(directory: &Path, parsed: Result<WsgcConfig>) -> WsgcMod {
    let (config, parse_error) = match parsed {
        Ok(config) => (config, None),
        Err(e) => (WsgcConfig::default(), Some(e)),
    };

    logging::init_logging(&config.log_level);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        directory = %directory.display(),
        "WSGC loaded"
    );
    if let Some(e) = parse_error {
        warn!(error = %e, "Failed to parse settings, using defaults");
    }
    config.log_summary();

    WsgcMod::new(Arc::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_parses_settings() {
        let wsgc = init(
            Path::new("mods/wsgc"),
            r#"{ "override-save-codec": true, "checkpoints": { "save-toast-invisible": true } }"#,
        );
        assert!(wsgc.config().override_save_codec);
        assert!(wsgc.config().checkpoints.save_toast_invisible);
    }

    #[test]
    fn init_with_bad_settings_uses_defaults() {
        let wsgc = init(Path::new("mods/wsgc"), r#"{ "override-save-codec": 1 "#);
        assert_eq!(*wsgc.config(), WsgcConfig::default());
    }

    #[test]
    fn init_from_directory_prefers_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("settings.json"), r#"{ "suppress-all-saves": true }"#)
            .expect("write json");
        std::fs::write(dir.path().join("settings.toml"), "override-save-codec = true\n")
            .expect("write toml");
        let wsgc = init_from_directory(dir.path());
        assert!(wsgc.config().suppress_all_saves);
        assert!(!wsgc.config().override_save_codec);
    }

    #[test]
    fn init_from_directory_reads_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("settings.toml"),
            "[autosaves]\ndeny-all = true\n",
        )
        .expect("write toml");
        let wsgc = init_from_directory(dir.path());
        assert!(!wsgc.on_save_requested("SIM_GAME_ARRIVED_AT_PLANET"));
    }

    #[test]
    fn init_from_empty_directory_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let wsgc = init_from_directory(dir.path());
        assert_eq!(*wsgc.config(), WsgcConfig::default());
    }
}
