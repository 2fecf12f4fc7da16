use crate::commands::{BarwordsPaths, CmdMessage, CmdResult};
use crate::config::BarwordsConfig;
use crate::error::Result;
use crate::store::{self, LayoutStore};
use std::fs;

/// Creates the home dir, writes a default config and seeds an empty store.
///
/// Running it again leaves existing config and layouts alone.
pub fn run<S: LayoutStore>(paths: &BarwordsPaths, store: &mut S) -> Result<CmdResult> {
    fs::create_dir_all(&paths.home)?;
    let mut result = CmdResult::default();

    if BarwordsConfig::exists(&paths.home) {
        result.add_message(CmdMessage::info("Config already present"));
    } else {
        BarwordsConfig::default().save(&paths.home)?;
        result.add_message(CmdMessage::success("Wrote default config"));
    }
    let config = BarwordsConfig::load(&paths.home)?;

    if store.list()?.is_empty() {
        for layout in store::default_layouts()? {
            let saved = store.save(layout)?;
            result.add_message(CmdMessage::success(format!(
                "Added layout {}",
                saved.name()
            )));
        }
        result.written_paths.push(config.layouts_path(&paths.home));
    }

    let dictionary = config.dictionary_path(&paths.home);
    if !dictionary.exists() {
        result.add_message(CmdMessage::warning(format!(
            "No word list at {}; create one with `barwords words build`",
            dictionary.display()
        )));
    }

    result.add_message(CmdMessage::success(format!(
        "Initialized barwords at {}",
        paths.home.display()
    )));
    Ok(result.with_config(config))
}
