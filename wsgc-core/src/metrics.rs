//! Runtime counters.
//!
//! Lightweight `AtomicU64` counters for what the mod did since startup. The
//! decision functions in this crate stay pure; the host integration owns a
//! [`WsgcCounters`] and records outcomes into it.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::codec::{FormatTag, Interception};
use crate::dispatcher::Dispatch;
use crate::reclaim::ReclaimOutcome;

// ---------------------------------------------------------------------------
// Counters (lock-free)
// ---------------------------------------------------------------------------

/// Atomic counters for every boundary outcome.
#[derive(Debug)]
pub struct WsgcCounters {
    /// Reclamations that succeeded.
    pub reclaims_succeeded: AtomicU64,
    /// Reclamations that failed or were unavailable.
    pub reclaims_failed: AtomicU64,
    /// Checkpoints that were disabled or unrecognised.
    pub checkpoints_skipped: AtomicU64,
    /// Autosaves allowed.
    pub saves_allowed: AtomicU64,
    /// Autosaves denied.
    pub saves_denied: AtomicU64,
    /// Writes that bypassed compression.
    pub encodes_bypassed: AtomicU64,
    /// Reads decoded from gzip.
    pub decodes_compressed: AtomicU64,
    /// Reads passed through as raw.
    pub decodes_raw: AtomicU64,
    /// Reads handed back to the host.
    pub decodes_declined: AtomicU64,
}

impl WsgcCounters {
    /// Create a new set of zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reclaims_succeeded: AtomicU64::new(0),
            reclaims_failed: AtomicU64::new(0),
            checkpoints_skipped: AtomicU64::new(0),
            saves_allowed: AtomicU64::new(0),
            saves_denied: AtomicU64::new(0),
            encodes_bypassed: AtomicU64::new(0),
            decodes_compressed: AtomicU64::new(0),
            decodes_raw: AtomicU64::new(0),
            decodes_declined: AtomicU64::new(0),
        }
    }

    /// Record a checkpoint dispatch.
    pub fn record_dispatch(&self, dispatch: &Dispatch) {
        let counter = match dispatch {
            Dispatch::Skipped => &self.checkpoints_skipped,
            Dispatch::Reclaimed(ReclaimOutcome::Success) => &self.reclaims_succeeded,
            Dispatch::Reclaimed(ReclaimOutcome::Failure(_)) => &self.reclaims_failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an autosave verdict.
    pub fn record_save(&self, allowed: bool) {
        let counter = if allowed { &self.saves_allowed } else { &self.saves_denied };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a write-path interception.
    pub fn record_encode(&self, result: &Interception<'_>) {
        if result.is_handled() {
            self.encodes_bypassed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a read-path interception. `tag` is the sniffed input format.
    pub fn record_decode(&self, tag: FormatTag, result: &Interception<'_>) {
        let counter = match (tag, result.is_handled()) {
            (FormatTag::Compressed, true) => &self.decodes_compressed,
            (FormatTag::Raw, true) => &self.decodes_raw,
            _ => &self.decodes_declined,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot all counters for export.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            reclaims_succeeded: self.reclaims_succeeded.load(Ordering::Relaxed),
            reclaims_failed: self.reclaims_failed.load(Ordering::Relaxed),
            checkpoints_skipped: self.checkpoints_skipped.load(Ordering::Relaxed),
            saves_allowed: self.saves_allowed.load(Ordering::Relaxed),
            saves_denied: self.saves_denied.load(Ordering::Relaxed),
            encodes_bypassed: self.encodes_bypassed.load(Ordering::Relaxed),
            decodes_compressed: self.decodes_compressed.load(Ordering::Relaxed),
            decodes_raw: self.decodes_raw.load(Ordering::Relaxed),
            decodes_declined: self.decodes_declined.load(Ordering::Relaxed),
        }
    }
}

impl Default for WsgcCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`WsgcCounters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// Reclamations whose primitive ran.
    pub reclaims_succeeded: u64,
    /// Reclamations that failed or panicked.
    pub reclaims_failed: u64,
    /// Checkpoints that fired with reclamation off.
    pub checkpoints_skipped: u64,
    /// Autosave requests let through.
    pub saves_allowed: u64,
    /// Autosave requests suppressed.
    pub saves_denied: u64,
    /// Saves written uncompressed.
    pub encodes_bypassed: u64,
    /// gzip saves decoded in place of the host.
    pub decodes_compressed: u64,
    /// Raw saves passed through.
    pub decodes_raw: u64,
    /// Decodes handed back to the host routine.
    pub decodes_declined: u64,
}

impl CounterSnapshot {
    /// Export in Prometheus text exposition format.
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        let rows = [
            ("wsgc_reclaims_total", "outcome=\"success\"", self.reclaims_succeeded),
            ("wsgc_reclaims_total", "outcome=\"failure\"", self.reclaims_failed),
            ("wsgc_checkpoints_skipped_total", "", self.checkpoints_skipped),
            ("wsgc_autosaves_total", "verdict=\"allowed\"", self.saves_allowed),
            ("wsgc_autosaves_total", "verdict=\"denied\"", self.saves_denied),
            ("wsgc_encodes_bypassed_total", "", self.encodes_bypassed),
            ("wsgc_decodes_total", "format=\"compressed\"", self.decodes_compressed),
            ("wsgc_decodes_total", "format=\"raw\"", self.decodes_raw),
            ("wsgc_decodes_total", "format=\"declined\"", self.decodes_declined),
        ];
        let mut out = String::new();
        for (name, labels, value) in rows {
            if labels.is_empty() {
                let _ = writeln!(out, "{name} {value}");
            } else {
                let _ = writeln!(out, "{name}{{{labels}}} {value}");
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tracing Span Names
// ---------------------------------------------------------------------------

/// Span names used with `tracing::span!`.
pub mod spans {
    /// Checkpoint dispatch.
    pub const CHECKPOINT: &str = "wsgc::checkpoint";
    /// Autosave policy check.
    pub const AUTOSAVE: &str = "wsgc::autosave";
    /// Save write path.
    pub const ENCODE: &str = "wsgc::codec::encode";
    /// Save read path.
    pub const DECODE: &str = "wsgc::codec::decode";
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
