//! # wsgc-host — Host Integration for WSGC
//!
//! This crate binds the host-agnostic `wsgc-core` library to the host game's
//! lifecycle and save pipeline.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │               Host game                   │
//! │  postfix hooks     prefix hooks           │
//! │  (lifecycle)       (Save, Compress/       │
//! │       │             DecompressBytes)      │
//! │       ▼                   ▼               │
//! │  ┌────────────────────────────────────┐   │
//! │  │            wsgc-host               │   │
//! │  │   events ──► hooks::WsgcMod        │   │
//! │  │                 │                  │   │
//! │  │                 ▼                  │   │
//! │  │   ┌────────────────────────────┐   │   │
//! │  │   │         wsgc-core          │   │   │
//! │  │   └────────────────────────────┘   │   │
//! │  └────────────────────────────────────┘   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `events` — Host method names and save-reason names mapped to core types
//! - `hooks` — The mod object the host calls into
//! - `bootstrap` — Startup: settings, logging, version banner
//! - `logging` — `tracing-subscriber` installation

pub mod bootstrap;
pub mod events;
pub mod hooks;
pub mod logging;

pub use bootstrap::{init, init_from_directory};
pub use hooks::WsgcMod;
