//! Closed identifier sets shared across the crate.
//!
//! Checkpoints and autosave reasons are enums rather than strings so that
//! every lookup is an exhaustive `match`. Strings only appear at the edges,
//! where [`CheckpointName::from_str`] and [`AutosaveReason::parse`] turn host
//! input into these types.

use std::fmt;
use std::str::FromStr;

use crate::error::WsgcError;

// ---------------------------------------------------------------------------
// Checkpoints
// ---------------------------------------------------------------------------

/// A named host lifecycle checkpoint at which reclamation may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckpointName {
    /// The host finished serializing a save.
    SaveSerializationComplete,
    /// The save list refreshed after a save.
    PostSaveRefresh,
    /// A save finished loading.
    PostLoadComplete,
    /// The head-attached state machine completed (during and after load).
    HeadAttachedStateComplete,
    /// The first round of a mission started.
    MissionFirstRoundStart,
    /// Any later round of a mission started.
    MissionNewRoundStart,
    /// A contract was resolved after the salvage screen.
    PostContractResolution,
    /// The "saving" toast disappeared.
    SaveToastInvisible,
}

impl CheckpointName {
    /// Every checkpoint, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::SaveSerializationComplete,
        Self::PostSaveRefresh,
        Self::PostLoadComplete,
        Self::HeadAttachedStateComplete,
        Self::MissionFirstRoundStart,
        Self::MissionNewRoundStart,
        Self::PostContractResolution,
        Self::SaveToastInvisible,
    ];

    /// The external kebab-case identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SaveSerializationComplete => "save-serialization-complete",
            Self::PostSaveRefresh => "post-save-refresh",
            Self::PostLoadComplete => "post-load-complete",
            Self::HeadAttachedStateComplete => "head-attached-state-complete",
            Self::MissionFirstRoundStart => "mission-first-round-start",
            Self::MissionNewRoundStart => "mission-new-round-start",
            Self::PostContractResolution => "post-contract-resolution",
            Self::SaveToastInvisible => "save-toast-invisible",
        }
    }
}

impl fmt::Display for CheckpointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckpointName {
    type Err = WsgcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| WsgcError::UnknownCheckpoint(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Autosave reasons
// ---------------------------------------------------------------------------

/// Why the host wants to autosave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutosaveReason {
    /// The player's ship arrived at a planet.
    ArrivedAtPlanet,
    /// A travel or ship event was resolved.
    EventResolved,
    /// A contract was accepted.
    ContractAccepted,
    /// A contract was completed.
    ContractCompleted,
    /// The quarterly financial report was shown.
    QuarterlyFinancialReport,
    /// Any reason outside the fixed set.
    Other,
}

impl AutosaveReason {
    /// Every specific reason (excludes [`AutosaveReason::Other`]).
    pub const SPECIFIC: [Self; 5] = [
        Self::ArrivedAtPlanet,
        Self::EventResolved,
        Self::ContractAccepted,
        Self::ContractCompleted,
        Self::QuarterlyFinancialReport,
    ];

    /// The external kebab-case identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ArrivedAtPlanet => "arrived-at-planet",
            Self::EventResolved => "event-resolved",
            Self::ContractAccepted => "contract-accepted",
            Self::ContractCompleted => "contract-completed",
            Self::QuarterlyFinancialReport => "quarterly-financial-report",
            Self::Other => "other",
        }
    }

    /// Parse a kebab-case identifier. Anything unrecognised is `Other`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self::SPECIFIC
            .into_iter()
            .find(|r| r.as_str() == s)
            .unwrap_or(Self::Other)
    }
}

impl fmt::Display for AutosaveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_ids_parse_back() {
        for c in CheckpointName::ALL {
            assert_eq!(c.as_str().parse::<CheckpointName>().ok(), Some(c));
        }
    }

    #[test]
    fn unknown_checkpoint_is_an_error() {
        let err = "mission-end".parse::<CheckpointName>();
        assert!(matches!(err, Err(WsgcError::UnknownCheckpoint(name)) if name == "mission-end"));
    }

    #[test]
    fn checkpoint_display_matches_id() {
        assert_eq!(
            CheckpointName::PostContractResolution.to_string(),
            "post-contract-resolution"
        );
    }

    #[test]
    fn unknown_reason_is_other() {
        assert_eq!(AutosaveReason::parse("contract-accepted"), AutosaveReason::ContractAccepted);
        assert_eq!(AutosaveReason::parse("mech-bay-refit"), AutosaveReason::Other);
        assert_eq!(AutosaveReason::parse(""), AutosaveReason::Other);
        assert_eq!(AutosaveReason::parse("other"), AutosaveReason::Other);
    }
}
