use std::collections::HashMap;
use std::io::{self, Read};
use std::path::Path;

use crate::engine::Move;

/// Host configuration, read from TOML.
///
/// ```toml
/// seed = 42
///
/// [keys]
/// up = ["w", "k", "ArrowUp"]
/// quit = ["q", "exit"]
/// ```
#[derive(Clone, Debug, PartialEq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Fixed RNG seed; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub keys: Keys,
}

/// Key names bound to each action. Matching is case-insensitive.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Keys {
    #[serde(default = "defaults::up")]
    pub up: Vec<String>,
    #[serde(default = "defaults::down")]
    pub down: Vec<String>,
    #[serde(default = "defaults::left")]
    pub left: Vec<String>,
    #[serde(default = "defaults::right")]
    pub right: Vec<String>,
    #[serde(default = "defaults::new_game")]
    pub new_game: Vec<String>,
    #[serde(default = "defaults::quit")]
    pub quit: Vec<String>,
}

impl Default for Keys {
    fn default() -> Self {
        Self {
            up: defaults::up(),
            down: defaults::down(),
            left: defaults::left(),
            right: defaults::right(),
            new_game: defaults::new_game(),
            quit: defaults::quit(),
        }
    }
}

/// What a bound key asks the host to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Move),
    NewGame,
    Quit,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("key {key:?} is bound to both {first:?} and {second:?}")]
    DuplicateBinding {
        key: String,
        first: Action,
        second: Action,
    },
}

/// Resolved key -> action lookup built from `Keys`.
#[derive(Clone, Debug, PartialEq)]
pub struct Keymap(HashMap<String, Action>);

impl Keymap {
    /// Look up a key name. Unbound keys return `None`.
    pub fn action(&self, key: &str) -> Option<Action> {
        self.0.get(&key.trim().to_ascii_lowercase()).copied()
    }
}

impl Keys {
    /// Build the lookup table, rejecting keys bound to two different actions.
    pub fn keymap(&self) -> Result<Keymap, ConfigError> {
        let bindings = [
            (&self.up, Action::Move(Move::Up)),
            (&self.down, Action::Move(Move::Down)),
            (&self.left, Action::Move(Move::Left)),
            (&self.right, Action::Move(Move::Right)),
            (&self.new_game, Action::NewGame),
            (&self.quit, Action::Quit),
        ];
        let mut map = HashMap::new();
        for (keys, action) in bindings {
            for key in keys {
                let key = key.trim().to_ascii_lowercase();
                match map.insert(key.clone(), action) {
                    Some(first) if first != action => {
                        return Err(ConfigError::DuplicateBinding { key, first, second: action });
                    }
                    _ => {}
                }
            }
        }
        Ok(Keymap(map))
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        // surface binding conflicts at load time rather than on first keypress
        cfg.keys.keymap()?;
        Ok(cfg)
    }

    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }
}

mod defaults {
    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    pub fn up() -> Vec<String> {
        keys(&["w", "k", "up", "ArrowUp"])
    }

    pub fn down() -> Vec<String> {
        keys(&["s", "j", "down", "ArrowDown"])
    }

    pub fn left() -> Vec<String> {
        keys(&["a", "h", "left", "ArrowLeft"])
    }

    pub fn right() -> Vec<String> {
        keys(&["d", "l", "right", "ArrowRight"])
    }

    pub fn new_game() -> Vec<String> {
        keys(&["n", "new"])
    }

    pub fn quit() -> Vec<String> {
        keys(&["q", "quit"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg, Config::default());
        let keymap = cfg.keys.keymap().unwrap();
        assert_eq!(keymap.action("w"), Some(Action::Move(Move::Up)));
        assert_eq!(keymap.action("ArrowLeft"), Some(Action::Move(Move::Left)));
        assert_eq!(keymap.action("J"), Some(Action::Move(Move::Down)));
        assert_eq!(keymap.action("q"), Some(Action::Quit));
        assert_eq!(keymap.action("n"), Some(Action::NewGame));
        assert_eq!(keymap.action("x"), None);
    }

    #[test]
    fn partial_keys_keep_other_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            seed = 9
            [keys]
            up = ["i"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(9));
        let keymap = cfg.keys.keymap().unwrap();
        assert_eq!(keymap.action("i"), Some(Action::Move(Move::Up)));
        assert_eq!(keymap.action("w"), None);
        assert_eq!(keymap.action("d"), Some(Action::Move(Move::Right)));
    }

    #[test]
    fn duplicate_binding_is_rejected() {
        let err = Config::from_toml_str(
            r#"
            [keys]
            quit = ["w"]
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::DuplicateBinding { key, first, second } => {
                assert_eq!(key, "w");
                assert_eq!(first, Action::Move(Move::Up));
                assert_eq!(second, Action::Quit);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("board_size = 5"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "seed = 2048").unwrap();
        let cfg = Config::from_toml(tmp.path()).unwrap();
        assert_eq!(cfg.seed, Some(2048));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Config::from_toml("/definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
