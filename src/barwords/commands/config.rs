use crate::commands::{BarwordsPaths, CmdMessage, CmdResult};
use crate::config::BarwordsConfig;
use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &BarwordsPaths, action: ConfigAction) -> Result<CmdResult> {
    let home = &paths.home;
    let mut config = BarwordsConfig::load(home)?;

    let message = match action {
        ConfigAction::ShowAll => return Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Some(value) => CmdMessage::info(value),
            None => CmdMessage::error(format!("Unknown config key: {}", key)),
        },
        ConfigAction::Set(key, value) => match config.set(&key, &value) {
            Err(e) => CmdMessage::error(e),
            Ok(()) => {
                config.save(home)?;
                info!(key = %key, "config updated");
                let shown = config.get(&key).unwrap_or(value);
                let message = match resolved_path(&config, &key, paths) {
                    Some(path) => format!("{} set to {} ({})", key, shown, path.display()),
                    None => format!("{} set to {}", key, shown),
                };
                let mut result = CmdResult::default().with_config(config);
                result.add_message(CmdMessage::success(message));
                return Ok(result);
            }
        },
    };

    let mut result = CmdResult::default();
    result.add_message(message);
    Ok(result)
}

// File keys are stored relative to home; report where they land.
fn resolved_path(config: &BarwordsConfig, key: &str, paths: &BarwordsPaths) -> Option<PathBuf> {
    match key {
        "dictionary-file" => Some(config.dictionary_path(&paths.home)),
        "layouts-file" => Some(config.layouts_path(&paths.home)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;

    #[test]
    fn set_then_show_key() {
        let dir = tempfile::tempdir().unwrap();
        let paths = BarwordsPaths::new(dir.path());

        let result = run(
            &paths,
            ConfigAction::Set("max-words".into(), "500".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.messages[0].content, "max-words set to 500");

        let result = run(&paths, ConfigAction::ShowKey("max-words".into())).unwrap();
        assert_eq!(result.messages[0].content, "500");
    }

    #[test]
    fn setting_a_file_key_reports_resolved_path() {
        let dir = tempfile::tempdir().unwrap();
        let paths = BarwordsPaths::new(dir.path());

        let result = run(
            &paths,
            ConfigAction::Set("dictionary-file".into(), "lists/short.txt".into()),
        )
        .unwrap();
        let expected = dir.path().join("lists/short.txt");
        assert!(result.messages[0]
            .content
            .contains(&expected.display().to_string()));
        assert_eq!(
            result.config.unwrap().dictionary_path(dir.path()),
            expected
        );
    }

    #[test]
    fn unknown_key_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            &BarwordsPaths::new(dir.path()),
            ConfigAction::ShowKey("colour".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
    }

    #[test]
    fn bad_value_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let paths = BarwordsPaths::new(dir.path());

        let result = run(&paths, ConfigAction::Set("max-words".into(), "none".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!BarwordsConfig::exists(dir.path()));
    }

    #[test]
    fn show_all_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&BarwordsPaths::new(dir.path()), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(BarwordsConfig::default()));
    }
}
