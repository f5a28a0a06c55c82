//! Entry ordering by date or importance
//!
//! Each list is re-sorted independently and in place. The chosen key and
//! direction form a [`SortPreference`] that survives reloads through the
//! durable store (see [`preference`]).

pub mod engine;
pub mod preference;

pub use engine::{compare_titles, parse_date, parse_importance, sort_lists};
pub use preference::{SORT_DIR_KEY, SORT_KEY_KEY, load_preference, persist_preference};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Importance,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Importance => "importance",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "importance" => Ok(Self::Importance),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction applied to the primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key and direction chosen by the visitor; defaults to newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortPreference {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortPreference {
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

impl fmt::Display for SortPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preference_is_date_desc() {
        let pref = SortPreference::default();
        assert_eq!(pref.key, SortKey::Date);
        assert_eq!(pref.direction, SortDirection::Desc);
        assert_eq!(pref.to_string(), "date desc");
    }

    #[test]
    fn test_parse_key_and_direction() {
        assert_eq!("importance".parse::<SortKey>(), Ok(SortKey::Importance));
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert!("Date".parse::<SortKey>().is_err());
        assert!("up".parse::<SortDirection>().is_err());
    }
}
