use crate::error::{LinkboardError, Result};
use crate::model::Collection;
use std::fs;
use std::path::PathBuf;

/// Default content shipped with linkboard.
pub const EMBEDDED_SEED: &str = include_str!("../../seed/links.json");

/// Read-only content used when neither the remote nor the cache has data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    Embedded,
    File(PathBuf),
    Inline(String),
}

impl SeedSource {
    /// A configured seed file, or the embedded seed when none is configured.
    pub fn from_config(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => SeedSource::File(path),
            None => SeedSource::Embedded,
        }
    }

    pub fn read(&self) -> Result<Collection> {
        match self {
            SeedSource::Embedded => Collection::from_snapshot(EMBEDDED_SEED),
            SeedSource::File(path) => {
                let content = fs::read_to_string(path).map_err(LinkboardError::Io)?;
                Collection::from_snapshot(&content)
            }
            SeedSource::Inline(content) => Collection::from_snapshot(content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_seed_parses() {
        let seed = SeedSource::Embedded.read().unwrap();
        assert!(!seed.is_empty());
        let ids: std::collections::HashSet<_> =
            seed.sections().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), seed.len());
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        let seed = SeedSource::from_config(Some(PathBuf::from("/nonexistent/links.json")));
        assert!(seed.read().is_err());
    }
}
