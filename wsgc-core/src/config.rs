//! Configuration for WSGC.
//!
//! Loaded once at startup from the mod's settings (JSON from the host's mod
//! loader, or TOML) and never mutated afterwards. Every key is optional.
//! When the source cannot be parsed at all, the full default value is used;
//! there is no partial merge.
//!
//! ```toml
//! override-save-codec = false
//! suppress-all-saves = false
//! log-level = "info"
//!
//! [checkpoints]
//! save-serialization-complete = true
//! mission-new-round-start = false
//!
//! [autosaves]
//! allow-all = true
//! deny-all = false
//! contract-accepted = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, WsgcError};
use crate::types::{AutosaveReason, CheckpointName};

/// Top-level WSGC configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "RawConfig")]
pub struct WsgcConfig {
    /// Whether the save codec intercepts compression and decompression at all.
    pub override_save_codec: bool,
    /// Legacy all-or-nothing autosave kill switch. Treated as a deny-all.
    pub suppress_all_saves: bool,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Per-checkpoint reclamation toggles.
    pub checkpoints: CheckpointConfig,
    /// Autosave gating.
    pub autosaves: AutosaveConfig,
}

/// Wire shape of [`WsgcConfig`]. Older settings files keep the checkpoint
/// toggles at the top level; those land in `legacy` and are folded into
/// `checkpoints`.
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    #[serde(default, alias = "OverrideSaveSystem")]
    override_save_codec: bool,
    #[serde(default, alias = "NoAutosaves")]
    suppress_all_saves: bool,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default)]
    checkpoints: CheckpointConfig,
    #[serde(default, alias = "Autosaves")]
    autosaves: AutosaveConfig,
    #[serde(flatten)]
    legacy: LegacyCheckpoints,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LegacyCheckpoints {
    run_post_save_serialization: Option<bool>,
    run_post_save_refresh: Option<bool>,
    run_post_load_complete: Option<bool>,
    run_post_head_attached_state: Option<bool>,
    run_first_round: Option<bool>,
    run_on_new_round: Option<bool>,
    resolve_complete_contract: Option<bool>,
}

impl LegacyCheckpoints {
    /// Top-level keys win over the `checkpoints` table when both are set.
    fn apply(self, checkpoints: &mut CheckpointConfig) {
        let pairs = [
            (self.run_post_save_serialization, &mut checkpoints.save_serialization_complete),
            (self.run_post_save_refresh, &mut checkpoints.post_save_refresh),
            (self.run_post_load_complete, &mut checkpoints.post_load_complete),
            (self.run_post_head_attached_state, &mut checkpoints.head_attached_state_complete),
            (self.run_first_round, &mut checkpoints.mission_first_round_start),
            (self.run_on_new_round, &mut checkpoints.mission_new_round_start),
            (self.resolve_complete_contract, &mut checkpoints.post_contract_resolution),
        ];
        for (value, slot) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

impl From<RawConfig> for WsgcConfig {
    fn from(raw: RawConfig) -> Self {
        let mut checkpoints = raw.checkpoints;
        raw.legacy.apply(&mut checkpoints);
        Self {
            override_save_codec: raw.override_save_codec,
            suppress_all_saves: raw.suppress_all_saves,
            log_level: raw.log_level,
            checkpoints,
            autosaves: raw.autosaves,
        }
    }
}

impl Default for WsgcConfig {
    fn default() -> Self {
        Self {
            override_save_codec: false,
            suppress_all_saves: false,
            log_level: default_log_level(),
            checkpoints: CheckpointConfig::default(),
            autosaves: AutosaveConfig::default(),
        }
    }
}

impl WsgcConfig {
    /// Parse configuration from a JSON string.
    ///
    /// # Errors
    /// Returns `WsgcError::Config` if the JSON is invalid or mistyped.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| WsgcError::Config(e.to_string()))
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `WsgcError::Config` if the TOML is invalid or mistyped.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| WsgcError::Config(e.to_string()))
    }

    /// Load configuration from a file. A `.toml` extension selects TOML,
    /// anything else is read as JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Parse JSON, substituting the full default configuration on failure.
    #[must_use]
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| Self::substitute_defaults(&e))
    }

    /// Load a file, substituting the full default configuration on failure.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::from_file(path).unwrap_or_else(|e| Self::substitute_defaults(&e))
    }

    fn substitute_defaults(err: &WsgcError) -> Self {
        warn!(error = %err, "Failed to parse settings, using defaults");
        Self::default()
    }

    /// Log every effective toggle. Called once at startup.
    pub fn log_summary(&self) {
        for checkpoint in CheckpointName::ALL {
            info!(
                checkpoint = %checkpoint,
                enabled = self.checkpoints.reclaims_at(checkpoint),
                "Setting"
            );
        }
        for reason in AutosaveReason::SPECIFIC {
            info!(reason = %reason, allowed = self.autosaves.allows(reason), "Setting");
        }
        info!(
            allow_all_autosaves = self.autosaves.allow_all,
            deny_all_autosaves = self.autosaves.deny_all,
            suppress_all_saves = self.suppress_all_saves,
            override_save_codec = self.override_save_codec,
            log_level = %self.log_level,
            "Settings"
        );
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Whether to trim the working set at each checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CheckpointConfig {
    /// After save serialization completes.
    #[serde(default = "default_true", alias = "RunPostSaveSerialization")]
    pub save_serialization_complete: bool,
    /// After the save list refreshes.
    #[serde(default = "default_true", alias = "RunPostSaveRefresh")]
    pub post_save_refresh: bool,
    /// After a load completes.
    #[serde(default = "default_true", alias = "RunPostLoadComplete")]
    pub post_load_complete: bool,
    /// After the head-attached state completes.
    #[serde(default = "default_true", alias = "RunPostHeadAttachedState")]
    pub head_attached_state_complete: bool,
    /// When a mission's first round starts.
    #[serde(default = "default_true", alias = "RunFirstRound")]
    pub mission_first_round_start: bool,
    /// At the start of every later round. Off by default; it runs mid-mission.
    #[serde(default, alias = "RunOnNewRound")]
    pub mission_new_round_start: bool,
    /// After a contract is resolved.
    #[serde(default, alias = "ResolveCompleteContract")]
    pub post_contract_resolution: bool,
    /// When the save toast disappears.
    #[serde(default)]
    pub save_toast_invisible: bool,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            save_serialization_complete: true,
            post_save_refresh: true,
            post_load_complete: true,
            head_attached_state_complete: true,
            mission_first_round_start: true,
            mission_new_round_start: false,
            post_contract_resolution: false,
            save_toast_invisible: false,
        }
    }
}

impl CheckpointConfig {
    /// Whether reclamation should run at `checkpoint`.
    #[must_use]
    pub fn reclaims_at(&self, checkpoint: CheckpointName) -> bool {
        match checkpoint {
            CheckpointName::SaveSerializationComplete => self.save_serialization_complete,
            CheckpointName::PostSaveRefresh => self.post_save_refresh,
            CheckpointName::PostLoadComplete => self.post_load_complete,
            CheckpointName::HeadAttachedStateComplete => self.head_attached_state_complete,
            CheckpointName::MissionFirstRoundStart => self.mission_first_round_start,
            CheckpointName::MissionNewRoundStart => self.mission_new_round_start,
            CheckpointName::PostContractResolution => self.post_contract_resolution,
            CheckpointName::SaveToastInvisible => self.save_toast_invisible,
        }
    }
}

/// Autosave gating: two global overrides plus a per-reason allow table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AutosaveConfig {
    /// Allow every autosave. Loses to `deny_all`.
    #[serde(default = "default_true", alias = "EnableAll")]
    pub allow_all: bool,
    /// Deny every autosave.
    #[serde(default, alias = "DisableAll")]
    pub deny_all: bool,
    /// Autosave on arrival at a planet.
    #[serde(default, alias = "ArrivedAtPlanet")]
    pub arrived_at_planet: bool,
    /// Autosave after an event is resolved.
    #[serde(default, alias = "EventResolved")]
    pub event_resolved: bool,
    /// Autosave after accepting a contract.
    #[serde(default, alias = "ContractAccepted")]
    pub contract_accepted: bool,
    /// Autosave after completing a contract.
    #[serde(default, alias = "ContractCompleted")]
    pub contract_completed: bool,
    /// Autosave on the quarterly financial report.
    #[serde(default, alias = "FinancialReport")]
    pub quarterly_financial_report: bool,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            allow_all: true,
            deny_all: false,
            arrived_at_planet: false,
            event_resolved: false,
            contract_accepted: false,
            contract_completed: false,
            quarterly_financial_report: false,
        }
    }
}

impl AutosaveConfig {
    /// Per-reason allow table lookup. `Other` is never allowed here.
    #[must_use]
    pub fn allows(&self, reason: AutosaveReason) -> bool {
        match reason {
            AutosaveReason::ArrivedAtPlanet => self.arrived_at_planet,
            AutosaveReason::EventResolved => self.event_resolved,
            AutosaveReason::ContractAccepted => self.contract_accepted,
            AutosaveReason::ContractCompleted => self.contract_completed,
            AutosaveReason::QuarterlyFinancialReport => self.quarterly_financial_report,
            AutosaveReason::Other => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
