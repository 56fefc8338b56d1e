use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;

use crate::song::Song;

/// A single `field:pattern` rule.
///
/// The pattern is stored lowercased; matching is case-insensitive
/// substring containment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriterion {
    field: String,
    pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterParseError {
    #[error("expected FIELD:PATTERN, found {0:?}")]
    MissingSeparator(String),
    #[error("empty field name in {0:?}")]
    EmptyField(String),
    #[error("empty pattern in {0:?}")]
    EmptyPattern(String),
}

impl FilterCriterion {
    pub fn new(field: &str, pattern: &str) -> Self {
        Self {
            field: field.trim().to_ascii_lowercase(),
            pattern: pattern.to_lowercase(),
        }
    }

    pub fn field(&self) -> &str { &self.field }

    pub fn pattern(&self) -> &str { &self.pattern }

    /// Unknown fields never match; known but absent fields read as `""`.
    pub fn matches(&self, song: &Song) -> bool {
        song.field(&self.field)
            .is_some_and(|value| value.to_lowercase().contains(&self.pattern))
    }
}

impl FromStr for FilterCriterion {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // only the first colon separates, patterns may contain more
        let (field, pattern) = s
            .split_once(':')
            .ok_or_else(|| FilterParseError::MissingSeparator(s.to_owned()))?;

        if field.trim().is_empty() {
            return Err(FilterParseError::EmptyField(s.to_owned()));
        }
        if pattern.is_empty() {
            return Err(FilterParseError::EmptyPattern(s.to_owned()));
        }

        Ok(Self::new(field, pattern))
    }
}

impl Display for FilterCriterion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.field, self.pattern)
    }
}

/// Ordered criteria plus the AND/OR switch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub criteria: Vec<FilterCriterion>,
    pub match_all: bool,
}

impl FilterSet {
    pub fn new(criteria: Vec<FilterCriterion>, match_all: bool) -> Self {
        Self {
            criteria,
            match_all,
        }
    }

    pub fn is_empty(&self) -> bool { self.criteria.is_empty() }

    pub fn matches(&self, song: &Song) -> bool {
        if self.criteria.is_empty() {
            return true;
        }

        if self.match_all {
            self.criteria.iter().all(|c| c.matches(song))
        } else {
            self.criteria.iter().any(|c| c.matches(song))
        }
    }

    /// Keeps the matching songs in their original order.
    pub fn select(&self, songs: impl IntoIterator<Item = Song>) -> Vec<Song> {
        songs.into_iter().filter(|s| self.matches(s)).collect_vec()
    }
}
