//! # Snapvault Architecture
//!
//! Snapvault is a **host-agnostic version history engine** for a single
//! mutable document: a library that happens to ship a CLI client, not the
//! other way round. The host (an editor plugin, the bundled CLI, anything
//! that can write a copy of its document) drives the engine through a small
//! facade and renders the structured results however it likes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, colors output, owns stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - VaultApi<H: DocumentHost>: thin facade over ops          │
//! │  - Guards caller-responsibility edges (purge days == 0)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Operations (ops/*.rs)                                      │
//! │  - snapshot / backup / list / delete / restore /            │
//! │    compress / purge — pure logic, returns OpResult          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (paths.rs, index.rs, vault.rs)                     │
//! │  - ProjectLayout: history/, deleted/, index.json            │
//! │  - Vault: the per-project index mutex                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency model
//!
//! One foreground actor snapshots on an interval or on demand; background
//! workers compress aging versions and purge expired deleted ones. The index
//! is a whole-document JSON file, so every load-mutate-save sequence runs
//! inside the [`vault::Vault`] mutex — without it, a maintenance pass that
//! read the index before a new snapshot registered would silently drop that
//! entry on write-back. Snapshot copies land in `history/` inside the same
//! critical section as their registration, so a compress pass never sees a
//! copied-but-unregistered file as a candidate it could orphan.
//!
//! The document copy itself must not race mutations of the live document:
//! [`host::DocumentHost::save_copy`] runs on the thread driving the snapshot
//! and context-bound hosts dispatch from there. Only post-copy file work
//! (gzip, purge) runs on worker threads. Disabling the autosave loop stops
//! future runs but lets in-flight maintenance finish
//! ([`scheduler::Scheduler`]).
//!
//! ## No I/O assumptions in core
//!
//! From `api.rs` inward, code returns `Result<OpResult>` and never touches
//! stdout, stderr, or `std::process::exit`. Diagnostics go through
//! `tracing`; user-facing status lines ride along as [`ops::OpMessage`]s.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod index;
pub mod model;
pub mod ops;
pub mod paths;
pub mod scheduler;
pub mod vault;
