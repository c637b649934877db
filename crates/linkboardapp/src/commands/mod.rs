//! # Command Layer
//!
//! The business logic of linkboard. Every command is a plain function over a
//! [`Collection`] (or, for `sync`, over the settings directory) that returns a
//! structured [`CmdResult`].
//!
//! ## What Commands Do NOT Do
//!
//! - **Persistence**: the API facade saves after a command reports a change.
//! - **I/O**: no stdout, stderr, prompts or confirmations.
//! - **Errors for bad indexes**: an index outside the live collection is a no-op.
//!   The result has `changed == false` and carries a warning message.
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `changed`: whether the collection was mutated (drives save + notification)
//! - `affected_sections`: sections touched by the command, with their post-command index
//! - `listed_sections`: sections to display
//! - `messages`: leveled messages for the UI to render
//!
//! ## Command Modules
//!
//! - [`sections`]: add, rename, delete sections
//! - [`links`]: add, edit, delete links
//! - [`moves`]: apply planned section and link moves
//! - [`list`]: list sections, find one by id
//! - [`sync`]: show, set and clear the remote sync settings

use crate::config::SyncSettings;
use crate::model::{Collection, Section};
use serde::Serialize;
use std::path::PathBuf;

pub mod links;
pub mod list;
pub mod moves;
pub mod sections;
pub mod sync;

#[derive(Debug, Clone)]
pub struct LinkboardPaths {
    /// Holds the local cache.
    pub data_dir: PathBuf,
    /// Holds `linkboard.toml` and `sync.json`.
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A section paired with its position in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedSection {
    pub index: usize,
    pub section: Section,
}

impl IndexedSection {
    pub fn at(collection: &Collection, index: usize) -> Option<Self> {
        collection.section(index).map(|section| Self {
            index,
            section: section.clone(),
        })
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub changed: bool,
    pub affected_sections: Vec<IndexedSection>,
    pub listed_sections: Vec<IndexedSection>,
    pub messages: Vec<CmdMessage>,
    pub sync_settings: Option<SyncSettings>,
}

impl CmdResult {
    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Default::default()
        }
    }

    /// An unchanged result carrying a single warning.
    pub fn noop(reason: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.add_message(CmdMessage::warning(reason));
        result
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, sections: Vec<IndexedSection>) -> Self {
        self.affected_sections = sections;
        self
    }

    pub fn with_listed(mut self, sections: Vec<IndexedSection>) -> Self {
        self.listed_sections = sections;
        self
    }

    pub fn with_sync_settings(mut self, settings: SyncSettings) -> Self {
        self.sync_settings = Some(settings);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}

pub(crate) fn no_section(index: usize) -> CmdResult {
    CmdResult::noop(format!("No section at position {}", index + 1))
}

pub(crate) fn no_link(section: usize, link: usize) -> CmdResult {
    CmdResult::noop(format!(
        "No link at position {} in section {}",
        link + 1,
        section + 1
    ))
}
