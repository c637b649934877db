//! # Linkboard CLI
//!
//! The binary is thin: the CLI lives in `src/cli/`, while this file only invokes
//! `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/linkboardapp/`: the UI-agnostic library (model, reorder engine, store)
//! - `crates/linkboard/`: this CLI, one client of the library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/linkboard/src/cli/)                      │
//! │  - clap argument parsing, 1-based positions (setup.rs)      │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering (render.rs, styles.rs)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/linkboardapp/src/api.rs)                 │
//! │  - Owns the collection, saves and notifies on change        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Moves go through the same drag-and-drop engine a pointer UI would use: the CLI
//! begins a drag on the source, drops it on the target and chooses the side of the
//! target with `--below`.
//!
//! ## Testing Approach
//!
//! - Parsing and rendering: unit tests next to the code.
//! - End to end: `tests/` runs the binary against temp config and data dirs.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
