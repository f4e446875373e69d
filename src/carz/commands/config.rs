use crate::commands::{CmdMessage, CmdResult, CollectionState};
use crate::config::CarzConfig;
use crate::error::Result;
use crate::store::{save_preferences, DataStore, Preferences};
use std::path::Path;

/// Dark mode lives with the persisted state, not in `config.json`.
pub const DARK_MODE_KEY: &str = "dark-mode";

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run<S: DataStore>(
    store: &mut S,
    state: &mut CollectionState,
    config_dir: &Path,
    action: ConfigAction,
) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = CarzConfig::load(config_dir)?;
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::info(format!(
                "{} = {}",
                DARK_MODE_KEY,
                on_off(state.preferences.dark_mode)
            )));
            Ok(result)
        }
        ConfigAction::ShowKey(key) => {
            let mut result = CmdResult::default();
            if key == DARK_MODE_KEY {
                result.add_message(CmdMessage::info(on_off(state.preferences.dark_mode)));
                return Ok(result);
            }
            let config = CarzConfig::load(config_dir)?;
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) if key == DARK_MODE_KEY => {
            let mut result = CmdResult::default();
            let Some(dark_mode) = parse_switch(&value) else {
                result.add_message(CmdMessage::error(format!(
                    "{} must be on or off, got {}",
                    DARK_MODE_KEY, value
                )));
                return Ok(result);
            };
            let prefs = Preferences { dark_mode };
            save_preferences(store, &prefs)?;
            state.preferences = prefs;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                DARK_MODE_KEY,
                on_off(dark_mode)
            )));
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = CarzConfig::load(config_dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(config_dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display_val)));
            Ok(result)
        }
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim() {
        "on" | "true" | "enabled" | "yes" => Some(true),
        "off" | "false" | "disabled" | "no" => Some(false),
        _ => None,
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::load;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn dark_mode_is_persisted_as_preference() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InMemoryStore::new();
        let mut state = CollectionState::default();

        let action = ConfigAction::Set(DARK_MODE_KEY.into(), "on".into());
        run(&mut store, &mut state, dir.path(), action).unwrap();

        assert!(state.preferences.dark_mode);
        assert!(load(&store).preferences.dark_mode);
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn bad_switch_value_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InMemoryStore::new();
        let mut state = CollectionState::default();
        let action = ConfigAction::Set(DARK_MODE_KEY.into(), "dim".into());
        let result = run(&mut store, &mut state, dir.path(), action).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!state.preferences.dark_mode);
    }

    #[test]
    fn file_config_keys_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InMemoryStore::new();
        let mut state = CollectionState::default();
        let action = ConfigAction::Set("showcase-limit".into(), "8".into());
        let result = run(&mut store, &mut state, dir.path(), action).unwrap();

        assert_eq!(result.config.unwrap().showcase_limit, 8);
        assert_eq!(CarzConfig::load(dir.path()).unwrap().showcase_limit, 8);
    }

    #[test]
    fn unknown_key_is_an_error_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InMemoryStore::new();
        let mut state = CollectionState::default();
        let action = ConfigAction::ShowKey("colour".into());
        let result = run(&mut store, &mut state, dir.path(), action).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
    }
}
