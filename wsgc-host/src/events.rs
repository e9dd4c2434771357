//! Host names for checkpoints and autosave reasons.
//!
//! The host identifies a lifecycle hook by the name of the method it wraps
//! and an autosave by its `SaveReason` enum name. These are the only places
//! host strings are interpreted; everything past this module uses the closed
//! core enums.

use wsgc_core::types::{AutosaveReason, CheckpointName};

/// Host method wrapped at each checkpoint: `(type, method, checkpoint)`.
pub const HOST_METHODS: [(&str, &str, CheckpointName); 8] = [
    ("SimGameState", "SaveSerializationComplete", CheckpointName::SaveSerializationComplete),
    ("SaveGameStructure", "NotifyRefresh", CheckpointName::PostSaveRefresh),
    // Misspelt in the host.
    ("SaveGameStructure", "NotifyLoadCcomplete", CheckpointName::PostLoadComplete),
    (
        "SimGameState",
        "OnHeadAttachedStateCompleteListener",
        CheckpointName::HeadAttachedStateComplete,
    ),
    ("TurnDirector", "StartFirstRound", CheckpointName::MissionFirstRoundStart),
    ("TurnDirector", "BeginNewRound", CheckpointName::MissionNewRoundStart),
    ("SimGameState", "ResolveCompleteContract", CheckpointName::PostContractResolution),
    ("SGSaveToast", "Invisible", CheckpointName::SaveToastInvisible),
];

/// Map a wrapped host method name to its checkpoint.
#[must_use]
pub fn checkpoint_for_method(method: &str) -> Option<CheckpointName> {
    HOST_METHODS
        .iter()
        .find(|(_, name, _)| *name == method)
        .map(|(_, _, checkpoint)| *checkpoint)
}

/// `Type.Method` label for log lines.
#[must_use]
pub fn host_label(checkpoint: CheckpointName) -> String {
    HOST_METHODS
        .iter()
        .find(|(_, _, c)| *c == checkpoint)
        .map(|(ty, method, _)| format!("{ty}.{method}"))
        .unwrap_or_else(|| checkpoint.to_string())
}

/// Map a host `SaveReason` name to an autosave reason.
///
/// Accepts the host's enum names and the kebab-case identifiers. Anything
/// else is [`AutosaveReason::Other`].
#[must_use]
pub fn autosave_reason(name: &str) -> AutosaveReason {
    match name {
        "SIM_GAME_ARRIVED_AT_PLANET" => AutosaveReason::ArrivedAtPlanet,
        "SIM_GAME_EVENT_RESOLVED" => AutosaveReason::EventResolved,
        "SIM_GAME_CONTRACT_ACCEPTED" => AutosaveReason::ContractAccepted,
        "SIM_GAME_COMPLETED_CONTRACT" => AutosaveReason::ContractCompleted,
        "SIM_GAME_QUARTERLY_REPORT" => AutosaveReason::QuarterlyFinancialReport,
        other => AutosaveReason::parse(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_checkpoint_has_one_host_method() {
        for checkpoint in CheckpointName::ALL {
            let count = HOST_METHODS.iter().filter(|(_, _, c)| *c == checkpoint).count();
            assert_eq!(count, 1, "{checkpoint}");
        }
    }

    #[test]
    fn method_names_map_to_checkpoints() {
        assert_eq!(
            checkpoint_for_method("NotifyLoadCcomplete"),
            Some(CheckpointName::PostLoadComplete)
        );
        assert_eq!(
            checkpoint_for_method("Invisible"),
            Some(CheckpointName::SaveToastInvisible)
        );
        assert_eq!(checkpoint_for_method("NotifyLoadComplete"), None);
        assert_eq!(checkpoint_for_method("OnMissionEnd"), None);
    }

    #[test]
    fn labels_name_the_host_method() {
        assert_eq!(
            host_label(CheckpointName::PostContractResolution),
            "SimGameState.ResolveCompleteContract"
        );
    }

    #[test]
    fn save_reasons_map() {
        assert_eq!(
            autosave_reason("SIM_GAME_QUARTERLY_REPORT"),
            AutosaveReason::QuarterlyFinancialReport
        );
        assert_eq!(autosave_reason("event-resolved"), AutosaveReason::EventResolved);
        assert_eq!(autosave_reason("SIM_GAME_FIRST_CONTACT"), AutosaveReason::Other);
    }
}
