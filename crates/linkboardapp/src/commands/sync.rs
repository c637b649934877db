use crate::commands::{CmdMessage, CmdResult, LinkboardPaths};
use crate::config::SyncSettings;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum SyncAction {
    Show,
    Set { gist_id: String, token: String },
    Clear,
}

/// Reads or updates `sync.json`. The returned result always carries the settings
/// as they stand afterwards.
pub fn run(paths: &LinkboardPaths, action: SyncAction) -> Result<CmdResult> {
    let dir = &paths.config_dir;
    match action {
        SyncAction::Show => {
            let settings = SyncSettings::load(dir)?;
            let mut result = CmdResult::default();
            match (&settings.gist_id, settings.masked_token()) {
                (Some(id), Some(token)) if settings.target().is_some() => {
                    result.add_message(CmdMessage::info(format!("gist = {}", id)));
                    result.add_message(CmdMessage::info(format!("token = {}", token)));
                }
                _ => result.add_message(CmdMessage::info("Sync is not configured")),
            }
            Ok(result.with_sync_settings(settings))
        }
        SyncAction::Set { gist_id, token } => {
            let settings = SyncSettings::new(gist_id.trim(), token.trim());
            if settings.target().is_none() {
                return Ok(CmdResult::default()
                    .with_message(CmdMessage::error(
                        "Both a gist id and a token are required",
                    ))
                    .with_sync_settings(SyncSettings::load(dir)?));
            }
            settings.save(dir)?;
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(
                    "Sync settings saved, data will now sync",
                ))
                .with_sync_settings(settings))
        }
        SyncAction::Clear => {
            SyncSettings::clear(dir)?;
            Ok(CmdResult::default()
                .with_message(CmdMessage::success("Sync settings cleared"))
                .with_sync_settings(SyncSettings::default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_paths(dir: &std::path::Path) -> LinkboardPaths {
        LinkboardPaths {
            data_dir: dir.join("data"),
            config_dir: dir.join("config"),
        }
    }

    #[test]
    fn show_unconfigured() {
        let temp = tempdir().unwrap();
        let result = run(&make_paths(temp.path()), SyncAction::Show).unwrap();
        assert!(result.messages[0].content.contains("not configured"));
        assert!(result.sync_settings.unwrap().target().is_none());
    }

    #[test]
    fn set_persists_and_show_masks() {
        let temp = tempdir().unwrap();
        let paths = make_paths(temp.path());
        run(
            &paths,
            SyncAction::Set {
                gist_id: " abc ".into(),
                token: "ghp_0123456789".into(),
            },
        )
        .unwrap();

        let result = run(&paths, SyncAction::Show).unwrap();
        assert!(result.messages[0].content.contains("gist = abc"));
        assert!(result.messages[1].content.ends_with("6789"));
        assert!(!result.messages[1].content.contains("ghp_"));
    }

    #[test]
    fn set_with_blank_token_is_rejected() {
        let temp = tempdir().unwrap();
        let paths = make_paths(temp.path());
        let result = run(
            &paths,
            SyncAction::Set {
                gist_id: "abc".into(),
                token: "".into(),
            },
        )
        .unwrap();
        assert!(matches!(
            result.messages[0].level,
            crate::commands::MessageLevel::Error
        ));
        assert!(!paths.config_dir.join(crate::config::SYNC_FILENAME).exists());
    }

    #[test]
    fn clear_removes_settings() {
        let temp = tempdir().unwrap();
        let paths = make_paths(temp.path());
        SyncSettings::new("abc", "tok").save(&paths.config_dir).unwrap();
        let result = run(&paths, SyncAction::Clear).unwrap();
        assert!(result.sync_settings.unwrap().target().is_none());
        assert!(SyncSettings::load(&paths.config_dir)
            .unwrap()
            .target()
            .is_none());
    }
}
