//! # Theme Preference
//!
//! The UI theme preference (`light`/`dark`), persisted as a bare string
//! under its own key next to the business collections. Unrelated to the
//! business data; kept here because it shares the same store.

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::kv::{Storage, THEME};

/// The two supported UI themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The persisted string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a stored value; anything unrecognized falls back to light.
    pub fn parse(value: &str) -> Theme {
        match value.trim() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Loads the stored preference, defaulting to light.
    pub fn load(storage: &Storage) -> Theme {
        storage
            .get_raw(THEME)
            .map(|raw| Theme::parse(&raw))
            .unwrap_or_default()
    }

    /// Persists this preference.
    pub fn save(self, storage: &Storage) -> StoreResult<()> {
        storage.set_raw(THEME, self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_falls_back_to_light() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("solarized"), Theme::Light);
        assert_eq!(Theme::parse(""), Theme::Light);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Storage::open(dir.path()).unwrap();

        assert_eq!(Theme::load(&store), Theme::Light);

        Theme::Dark.save(&store).unwrap();
        assert_eq!(Theme::load(&store), Theme::Dark);

        let toggled = Theme::load(&store).toggled();
        toggled.save(&store).unwrap();
        assert_eq!(Theme::load(&store), Theme::Light);
    }
}
