//! # WSGC Core Library
//!
//! Host-agnostic decision logic for a game mod that sits beside the host's
//! save pipeline and lifecycle events:
//!
//! - **Save codec** — bypasses compression on write, sniffs the 4-byte header
//!   on read and decodes gzip or passes raw payloads through, declining to the
//!   host's own routine whenever it cannot
//! - **Save policy** — decides whether an autosave may proceed
//! - **Checkpoint dispatch** — decides, per lifecycle checkpoint, whether to
//!   trim the process working set
//! - **Reclaim action** — wraps the OS trim primitive behind a boundary that
//!   never fails
//!
//! ## Execution Contract
//!
//! Everything here runs synchronously on the calling (host) thread. The only
//! shared state is the immutable [`WsgcConfig`] snapshot built at startup.
//! No operation returns an error to the host: every entry point yields a
//! definite outcome (`Handled`/`Declined`, `bool`, or [`ReclaimOutcome`]).

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod policy;
pub mod reclaim;
pub mod types;

pub use codec::{FormatTag, Interception, SaveCodec};
pub use config::WsgcConfig;
pub use dispatcher::Dispatch;
pub use error::WsgcError;
pub use reclaim::{ReclaimAction, ReclaimOutcome, TrimPrimitive, WorkingSetTrim};
pub use types::{AutosaveReason, CheckpointName};
