//! # Configuration
//!
//! Two independent records live in the config directory:
//!
//! - `linkboard.toml`: application settings, loaded with [`confique`] from the file
//!   and `LINKBOARD_*` environment variables (env wins over the file).
//! - `sync.json`: the remote sync target ([`SyncSettings`]). Never stored next to
//!   the link data: wiping the cached links must not lose the sync configuration,
//!   and the credential must never end up inside the synced payload.
//!
//! ## Available Settings
//!
//! | Key | Env | Default |
//! |-----|-----|---------|
//! | `data_dir` | `LINKBOARD_DATA_DIR` | platform data dir |
//! | `seed_path` | `LINKBOARD_SEED_PATH` | embedded seed |
//! | `api_base` | `LINKBOARD_API_BASE` | `https://api.github.com` |
//! | `default_color` | `LINKBOARD_DEFAULT_COLOR` | `cyan` |

use crate::commands::LinkboardPaths;
use crate::error::{LinkboardError, Result};
use crate::store::SyncTarget;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "linkboard.toml";
pub const SYNC_FILENAME: &str = "sync.json";

#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LinkboardConfig {
    /// Directory holding the local cache (`links.json`).
    #[config(env = "LINKBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Seed snapshot used when neither remote nor cache has data.
    /// When absent, the seed bundled with linkboard is used.
    #[config(env = "LINKBOARD_SEED_PATH")]
    pub seed_path: Option<PathBuf>,

    /// Base URL of the Gist API.
    #[config(env = "LINKBOARD_API_BASE", default = "https://api.github.com")]
    pub api_base: String,

    /// Color given to new sections.
    #[config(env = "LINKBOARD_DEFAULT_COLOR", default = "cyan")]
    pub default_color: String,
}

impl Default for LinkboardConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed_path: None,
            api_base: "https://api.github.com".to_string(),
            default_color: crate::model::DEFAULT_COLOR.to_string(),
        }
    }
}

impl LinkboardConfig {
    /// Layers env over `linkboard.toml` over the compiled defaults.
    /// A missing file is fine.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let file = config_dir.as_ref().join(CONFIG_FILENAME);
        Ok(Self::builder().env().file(file).load()?)
    }

    /// Pairs the config dir with the data dir: the configured one, else the
    /// platform data dir.
    pub fn resolve_paths(&self, config_dir: PathBuf) -> Result<LinkboardPaths> {
        let data_dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => project_dirs()?.data_dir().to_path_buf(),
        };
        Ok(LinkboardPaths {
            data_dir,
            config_dir,
        })
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "linkboard", "linkboard")
        .ok_or_else(|| LinkboardError::Api("Could not determine home directory".to_string()))
}

/// Platform config directory, used when none is given explicitly.
pub fn default_config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Remote sync target, persisted as `sync.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncSettings {
    #[serde(default)]
    pub gist_id: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl SyncSettings {
    pub fn new(gist_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            gist_id: Some(gist_id.into()),
            token: Some(token.into()),
        }
    }

    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let path = config_dir.as_ref().join(SYNC_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(LinkboardError::Io)?;
        let settings = serde_json::from_str(&content).map_err(LinkboardError::Serialization)?;
        Ok(settings)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(LinkboardError::Io)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(LinkboardError::Serialization)?;
        fs::write(config_dir.join(SYNC_FILENAME), content).map_err(LinkboardError::Io)?;
        Ok(())
    }

    pub fn clear<P: AsRef<Path>>(config_dir: P) -> Result<()> {
        let path = config_dir.as_ref().join(SYNC_FILENAME);
        if path.exists() {
            fs::remove_file(path).map_err(LinkboardError::Io)?;
        }
        Ok(())
    }

    /// Sync is on only when both values are present and non-blank.
    pub fn target(&self) -> Option<SyncTarget> {
        let gist_id = self.gist_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let token = self.token.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some(SyncTarget::new(gist_id, token))
    }

    /// Token with everything but the last four characters hidden. At most half of a
    /// short token is shown.
    pub fn masked_token(&self) -> Option<String> {
        self.token.as_deref().map(|t| {
            let chars: Vec<char> = t.chars().collect();
            let visible = (chars.len() / 2).min(4);
            let tail: String = chars[chars.len() - visible..].iter().collect();
            format!("{}{}", "*".repeat(chars.len() - visible), tail)
        })
    }
}
