//! The entry points the host calls.
//!
//! [`WsgcMod`] stands in for runtime method patching: the host (or its mod
//! loader) registers these methods against its own call sites and calls them
//! synchronously.
//!
//! - Lifecycle postfix hooks call [`WsgcMod::on_host_method`].
//! - The autosave prefix hook calls [`WsgcMod::on_save_requested`]; `false`
//!   skips the host's save.
//! - The compress/decompress prefix hooks call [`WsgcMod::compress_bytes`] /
//!   [`WsgcMod::decompress_bytes`]; `Declined` runs the host's routine.

use std::sync::Arc;

use tracing::{debug, info_span};
use wsgc_core::codec::{FormatTag, Interception, SaveCodec};
use wsgc_core::config::WsgcConfig;
use wsgc_core::dispatcher::{self, Dispatch};
use wsgc_core::metrics::{CounterSnapshot, WsgcCounters, spans};
use wsgc_core::policy;
use wsgc_core::reclaim::{ReclaimAction, TrimPrimitive, WorkingSetTrim};
use wsgc_core::types::CheckpointName;

use crate::events;

/// The mod: one immutable configuration snapshot plus the components built
/// from it.
#[derive(Debug)]
pub struct WsgcMod<P = WorkingSetTrim> {
    config: Arc<WsgcConfig>,
    codec: SaveCodec,
    reclaim: ReclaimAction<P>,
    counters: WsgcCounters,
}

impl WsgcMod<WorkingSetTrim> {
    /// Build with the platform trim primitive.
    #[must_use]
    pub fn new(config: Arc<WsgcConfig>) -> Self {
        Self::with_primitive(config, WorkingSetTrim)
    }
}

impl<P: TrimPrimitive> WsgcMod<P> {
    /// Build with a caller-supplied trim primitive.
    #[must_use]
    pub fn with_primitive(config: Arc<WsgcConfig>, primitive: P) -> Self {
        Self {
            codec: SaveCodec::new(&config),
            config,
            reclaim: ReclaimAction::new(primitive),
            counters: WsgcCounters::new(),
        }
    }

    /// The configuration snapshot.
    #[must_use]
    pub fn config(&self) -> &WsgcConfig {
        &self.config
    }

    /// Counters since startup.
    #[must_use]
    pub fn counters(&self) -> CounterSnapshot {
        self.counters.snapshot()
    }

    /// A lifecycle checkpoint was reached.
    pub fn on_checkpoint(&self, checkpoint: CheckpointName) -> Dispatch {
        let label = events::host_label(checkpoint);
        let _span = info_span!(spans::CHECKPOINT, host = %label).entered();
        let dispatch = dispatcher::on_event(checkpoint, &self.config, &self.reclaim);
        self.counters.record_dispatch(&dispatch);
        dispatch
    }

    /// Postfix hook for any wrapped host method. Unknown methods are a no-op.
    pub fn on_host_method(&self, method: &str) -> Dispatch {
        match events::checkpoint_for_method(method) {
            Some(checkpoint) => self.on_checkpoint(checkpoint),
            None => {
                debug!(method, "No checkpoint for host method");
                self.counters.record_dispatch(&Dispatch::Skipped);
                Dispatch::Skipped
            }
        }
    }

    /// Prefix hook for the host's `Save(reason)`. `true` lets the save run.
    pub fn on_save_requested(&self, reason_name: &str) -> bool {
        let _span = info_span!(spans::AUTOSAVE, host_reason = reason_name).entered();
        let allowed = policy::should_save(events::autosave_reason(reason_name), &self.config);
        self.counters.record_save(allowed);
        allowed
    }

    /// Prefix hook for the host's `CompressBytes`.
    pub fn compress_bytes<'a>(&self, bytes: &'a [u8]) -> Interception<'a> {
        let _span = info_span!(spans::ENCODE).entered();
        let result = self.codec.encode(bytes);
        self.counters.record_encode(&result);
        result
    }

    /// Prefix hook for the host's `DecompressBytes`.
    pub fn decompress_bytes<'a>(&self, bytes: &'a [u8]) -> Interception<'a> {
        let _span = info_span!(spans::DECODE).entered();
        let result = self.codec.decode(bytes);
        if self.codec.is_enabled() {
            self.counters.record_decode(FormatTag::sniff(bytes), &result);
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
