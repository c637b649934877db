//! # CLI Behavior
//!
//! This is **one possible UI client** for linkboard. It is the only place that knows
//! about terminal I/O, prompts, exit codes and output formatting.
//!
//! ### Naked Execution (`linkboard`)
//!
//! Running `linkboard` with no arguments defaults to `linkboard list`.
//!
//! ### Positions
//!
//! Every section and link position on the command line is 1-based, as printed by
//! `list`. They are converted to the library's 0-based indexes while parsing.
//!
//! ### Moves
//!
//! `section move 1 3` drops section 1 onto section 3. Dropping on a target inserts
//! above it; `--below` only has an effect on the last item, which is how something
//! gets moved to the very end.
//!
//! ### Sync
//!
//! Saves write the local cache immediately and push to the gist in the background.
//! The process waits for pending pushes before it exits, and reports failed ones on
//! stderr without failing the command.
//!
//! ## Module Structure
//!
//! - `commands`: context setup, dispatch and per-command handlers
//! - `render`: output formatting
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
