//! Checkpoint dispatch.
//!
//! A pure decision table from [`CheckpointName`] to "reclaim here or not",
//! followed by at most one synchronous call into the [`ReclaimAction`]. No
//! timeout is applied; the per-round checkpoint is the only one hit during
//! play and it stays off unless the user enables it.

use tracing::{debug, info};

use crate::config::WsgcConfig;
use crate::reclaim::{ReclaimAction, ReclaimOutcome, TrimPrimitive};
use crate::types::CheckpointName;

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The checkpoint is disabled or unrecognised.
    Skipped,
    /// Reclamation ran once with this outcome.
    Reclaimed(ReclaimOutcome),
}

/// Handle one checkpoint. Calls `action.reclaim()` exactly once when the
/// checkpoint is enabled, otherwise does nothing.
pub fn on_event<P: TrimPrimitive>(
    id: CheckpointName,
    config: &WsgcConfig,
    action: &ReclaimAction<P>,
) -> Dispatch {
    if !config.checkpoints.reclaims_at(id) {
        debug!(checkpoint = %id, "Checkpoint disabled");
        return Dispatch::Skipped;
    }
    info!(checkpoint = %id, "Running working set reclamation");
    Dispatch::Reclaimed(action.reclaim())
}

/// Handle a checkpoint by its kebab-case identifier. Unknown identifiers are
/// a no-op.
pub fn on_named_event<P: TrimPrimitive>(
    name: &str,
    config: &WsgcConfig,
    action: &ReclaimAction<P>,
) -> Dispatch {
    match name.parse::<CheckpointName>() {
        Ok(id) => on_event(id, config, action),
        Err(e) => {
            debug!(error = %e, "Ignoring checkpoint");
            Dispatch::Skipped
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
