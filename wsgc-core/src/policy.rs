//! Autosave policy.
//!
//! Decision order, first match wins:
//!   1. deny-all (or the legacy suppress-all toggle) → deny
//!   2. allow-all → allow
//!   3. the reason is enabled in the per-reason table → allow
//!   4. otherwise → deny
//!
//! Deny wins over allow-all when both are set. Unrecognised reasons fall
//! through to step 4.

use tracing::info;

use crate::config::WsgcConfig;
use crate::types::AutosaveReason;

/// Why an autosave was allowed or denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDecision {
    /// A global deny is set.
    DenyAll,
    /// The global allow is set.
    AllowAll,
    /// The per-reason table allows this reason.
    ReasonAllowed,
    /// The reason is disabled or unrecognised.
    ReasonDenied,
}

impl SaveDecision {
    /// Whether the save may proceed.
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::AllowAll | Self::ReasonAllowed)
    }
}

/// Evaluate the decision table without logging.
#[must_use]
pub fn decide(reason: AutosaveReason, config: &WsgcConfig) -> SaveDecision {
    let autosaves = &config.autosaves;
    if autosaves.deny_all || config.suppress_all_saves {
        SaveDecision::DenyAll
    } else if autosaves.allow_all {
        SaveDecision::AllowAll
    } else if autosaves.allows(reason) {
        SaveDecision::ReasonAllowed
    } else {
        SaveDecision::ReasonDenied
    }
}

/// Whether an autosave for `reason` may proceed. Logs the verdict.
#[must_use]
pub fn should_save(reason: AutosaveReason, config: &WsgcConfig) -> bool {
    let decision = decide(reason, config);
    let allowed = decision.is_allowed();
    info!(reason = %reason, ?decision, allowed, "Autosave requested");
    allowed
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn per_reason_only() -> WsgcConfig {
        let mut config = WsgcConfig::default();
        config.autosaves.allow_all = false;
        config
    }

    #[test]
    fn default_allows_everything() {
        let config = WsgcConfig::default();
        for reason in AutosaveReason::SPECIFIC {
            assert!(should_save(reason, &config));
        }
        assert!(should_save(AutosaveReason::Other, &config));
    }

    #[test]
    fn deny_wins_over_allow() {
        let mut config = WsgcConfig::default();
        config.autosaves.allow_all = true;
        config.autosaves.deny_all = true;
        for reason in AutosaveReason::SPECIFIC {
            assert_eq!(decide(reason, &config), SaveDecision::DenyAll);
        }
        assert!(!should_save(AutosaveReason::Other, &config));
    }

    #[test]
    fn legacy_suppress_denies() {
        let mut config = WsgcConfig::default();
        config.suppress_all_saves = true;
        assert_eq!(decide(AutosaveReason::ArrivedAtPlanet, &config), SaveDecision::DenyAll);
    }

    #[test]
    fn per_reason_table() {
        let mut config = per_reason_only();
        config.autosaves.contract_accepted = true;
        assert_eq!(
            decide(AutosaveReason::ContractAccepted, &config),
            SaveDecision::ReasonAllowed
        );
        assert_eq!(
            decide(AutosaveReason::ContractCompleted, &config),
            SaveDecision::ReasonDenied
        );
    }

    #[test]
    fn other_reason_fails_closed() {
        let mut config = per_reason_only();
        config.autosaves.arrived_at_planet = true;
        config.autosaves.event_resolved = true;
        config.autosaves.contract_accepted = true;
        config.autosaves.contract_completed = true;
        config.autosaves.quarterly_financial_report = true;
        assert!(!should_save(AutosaveReason::Other, &config));
    }

    #[test]
    fn decision_is_idempotent() {
        let config = per_reason_only();
        let first = decide(AutosaveReason::EventResolved, &config);
        let second = decide(AutosaveReason::EventResolved, &config);
        assert_eq!(first, second);
    }
}
