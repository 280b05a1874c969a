//! Terminal key bindings.
//!
//! A key map turns the name of a terminal key into a calculator [`Key`].
//! The built-in bindings cover a standard keyboard; a TOML file can add or
//! override entries:
//!
//! ```toml
//! [bindings]
//! enter     = "="        # named keys are case-insensitive
//! backspace = "del"
//! escape    = "clear"
//! s         = "sin"      # single characters are matched exactly
//! x         = "×"
//! ```
//!
//! Values use the same token syntax as key scripts (`7`, `+`, `÷`, `cos`,
//! `.`, `C`, `DEL`, `=`).

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use digicalc_core::domain::{DomainError, Key, Operator};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors raised while loading a key-map file.
#[derive(Debug, Error)]
pub enum KeyMapError {
    #[error("failed to read key map '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse key map '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("binding '{name}' maps to an unknown key")]
    InvalidBinding {
        name: String,
        #[source]
        source: DomainError,
    },
}

#[derive(Debug, Deserialize)]
struct KeyMapFile {
    #[serde(default)]
    bindings: BTreeMap<String, String>,
}

/// Terminal key name → calculator key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: BTreeMap<String, Key>,
}

impl KeyMap {
    /// A map with no bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Overlay the `[bindings]` table of a TOML document on the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, KeyMapError> {
        Self::parse(source, Path::new("<inline>"))
    }

    /// Load a key-map file, overlaying it on the defaults.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KeyMapError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| KeyMapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    fn parse(source: &str, path: &Path) -> Result<Self, KeyMapError> {
        let file: KeyMapFile = toml::from_str(source).map_err(|e| KeyMapError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut map = Self::default();
        for (name, token) in file.bindings {
            let key = token
                .parse::<Key>()
                .map_err(|source| KeyMapError::InvalidBinding {
                    name: name.clone(),
                    source,
                })?;
            map.bind(&name, key);
        }

        debug!(bindings = map.len(), "key map loaded");
        Ok(map)
    }

    /// Add or replace one binding.
    pub fn bind(&mut self, name: &str, key: Key) {
        self.bindings.insert(normalize(name), key);
    }

    pub fn lookup(&self, name: &str) -> Option<Key> {
        self.bindings.get(&normalize(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings sorted by key name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Key)> {
        self.bindings.iter().map(|(name, key)| (name.as_str(), *key))
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut map = Self::empty();

        for value in 0..=9u8 {
            if let Ok(key) = Key::digit(value) {
                map.bind(&value.to_string(), key);
            }
        }
        for op in Operator::ALL {
            if op.as_str().len() == 1 {
                map.bind(op.as_str(), Key::Operator(op));
            }
        }

        map.bind("x", Key::Operator(Operator::Multiply));
        map.bind("s", Key::Operator(Operator::Sin));
        map.bind("c", Key::Operator(Operator::Cos));
        map.bind("t", Key::Operator(Operator::Tan));
        map.bind(".", Key::Dot);
        map.bind(",", Key::Dot);
        map.bind("=", Key::Evaluate);
        map.bind("enter", Key::Evaluate);
        map.bind("backspace", Key::Erase);
        map.bind("escape", Key::Clear);
        map.bind("delete", Key::Clear);
        map
    }
}

/// Named keys compare case-insensitively; single characters do not.
fn normalize(name: &str) -> String {
    let name = name.trim();
    if name.chars().count() > 1 {
        name.to_lowercase()
    } else {
        name.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_cover_the_keypad() {
        let map = KeyMap::default();
        assert_eq!(map.lookup("7"), Some(Key::digit(7).unwrap()));
        assert_eq!(map.lookup("*"), Some(Key::Operator(Operator::Multiply)));
        assert_eq!(map.lookup("%"), Some(Key::Operator(Operator::Modulo)));
        assert_eq!(map.lookup("s"), Some(Key::Operator(Operator::Sin)));
        assert_eq!(map.lookup("Enter"), Some(Key::Evaluate));
        assert_eq!(map.lookup("BACKSPACE"), Some(Key::Erase));
        assert_eq!(map.lookup("Escape"), Some(Key::Clear));
        assert_eq!(map.lookup("q"), None);
    }

    #[test]
    fn single_characters_are_case_sensitive() {
        let map = KeyMap::default();
        assert_eq!(map.lookup("S"), None);
    }

    #[test]
    fn file_overrides_and_extends_defaults() {
        let map = KeyMap::from_toml_str(
            r#"
            [bindings]
            c = "clear"
            k = "cos"
            Tab = "="
            "#,
        )
        .unwrap();

        assert_eq!(map.lookup("c"), Some(Key::Clear));
        assert_eq!(map.lookup("k"), Some(Key::Operator(Operator::Cos)));
        assert_eq!(map.lookup("tab"), Some(Key::Evaluate));
        assert_eq!(map.lookup("1"), Some(Key::digit(1).unwrap()));
    }

    #[test]
    fn missing_bindings_table_keeps_defaults() {
        let map = KeyMap::from_toml_str("").unwrap();
        assert_eq!(map, KeyMap::default());
    }

    #[test]
    fn unknown_key_token_is_rejected() {
        let err = KeyMap::from_toml_str("[bindings]\nz = \"sqrt\"").unwrap_err();
        assert!(matches!(err, KeyMapError::InvalidBinding { ref name, .. } if name == "z"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = KeyMap::from_toml_str("[bindings\n").unwrap_err();
        assert!(matches!(err, KeyMapError::Parse { .. }));
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[bindings]\nq = \"del\"").unwrap();

        let map = KeyMap::load(file.path()).unwrap();
        assert_eq!(map.lookup("q"), Some(Key::Erase));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = KeyMap::load("/nonexistent/digicalc/keys.toml").unwrap_err();
        assert!(matches!(err, KeyMapError::Io { .. }));
    }

    #[test]
    fn iterates_sorted() {
        let map = KeyMap::default();
        let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
