//! # Linkboard Architecture
//!
//! Linkboard keeps a personal start page of links: ordered sections, each holding an
//! ordered list of links, reorderable by drag and drop and synced through a GitHub
//! Gist. It is a library first; the `linkboard` CLI is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (the linkboard CLI, or any other UI)                │
//! │  - Parses input, renders output, prompts, exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the live Collection and the drag session            │
//! │  - Saves and notifies after every change                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────┐
//! │  Command Layer (commands/)   │  │  Reorder Engine          │
//! │  - Pure collection edits     │  │  (reorder.rs)            │
//! │  - Structured CmdResult      │  │  - pointer → index move  │
//! └──────────────────────────────┘  └──────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - remote gist → local cache → seed → empty                 │
//! │  - local write now, remote push in the background           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never prompts and never
//! exits the process. Diagnostics go through `tracing`; installing a subscriber is
//! the client's business.
//!
//! ## Indexes
//!
//! All indexes here are 0-based positions in the live collection. Clients that show
//! 1-based numbers convert at their edge.
//!
//! ## Testing Strategy
//!
//! - **Commands and reorder engine**: unit tests on plain [`model::Collection`]s
//! - **Store**: [`store::mem`] fakes for the cache and the remote
//! - **API**: the fakes plus a temp dir for `sync.json`
//! - **Filesystem cache**: integration tests under `tests/`

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod reorder;
pub mod store;
