//! Sort keys and the stateful sort engine for dirscope.
//!
//! A [SortKey] is an (attribute, direction) pair with a stable ordinal that matches the
//! position of the key in a sort selector.
//!
//! The [SortEngine] remembers which key the held list is currently ordered by. Switching
//! to the opposite direction of the same attribute reverses the list in place instead of
//! sorting it again. Every other transition runs a full stable sort.

use crate::core::entry::{CompareRules, FileItem};
use crate::core::error::SortError;

use std::fmt;
use std::str::FromStr;

/// Attribute a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortAttr {
    Name,
    Size,
    Date,
    Extension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The eight sort states. The discriminant is the selector position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    NameAsc = 0,
    NameDesc = 1,
    SizeAsc = 2,
    SizeDesc = 3,
    DateAsc = 4,
    DateDesc = 5,
    ExtAsc = 6,
    ExtDesc = 7,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::SizeAsc,
        SortKey::SizeDesc,
        SortKey::DateAsc,
        SortKey::DateDesc,
        SortKey::ExtAsc,
        SortKey::ExtDesc,
    ];

    /// Maps a selector position to a key. Out-of-range positions are rejected.
    pub fn from_index(index: usize) -> Result<Self, SortError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(SortError::InvalidIndex(index))
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn attr(self) -> SortAttr {
        match self {
            SortKey::NameAsc | SortKey::NameDesc => SortAttr::Name,
            SortKey::SizeAsc | SortKey::SizeDesc => SortAttr::Size,
            SortKey::DateAsc | SortKey::DateDesc => SortAttr::Date,
            SortKey::ExtAsc | SortKey::ExtDesc => SortAttr::Extension,
        }
    }

    pub fn direction(self) -> SortDirection {
        // Ascending keys sit on even positions
        if self.index() % 2 == 0 {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }

    /// Same attribute, other direction.
    pub fn opposite(self) -> SortKey {
        match self {
            SortKey::NameAsc => SortKey::NameDesc,
            SortKey::NameDesc => SortKey::NameAsc,
            SortKey::SizeAsc => SortKey::SizeDesc,
            SortKey::SizeDesc => SortKey::SizeAsc,
            SortKey::DateAsc => SortKey::DateDesc,
            SortKey::DateDesc => SortKey::DateAsc,
            SortKey::ExtAsc => SortKey::ExtDesc,
            SortKey::ExtDesc => SortKey::ExtAsc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::SizeAsc => "size-asc",
            SortKey::SizeDesc => "size-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::ExtAsc => "ext-asc",
            SortKey::ExtDesc => "ext-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses either the textual form (`size-desc`) or a selector position (`3`).
impl FromStr for SortKey {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return SortKey::from_index(index);
        }
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SortError::UnknownKey(s.to_string()))
    }
}

/// How the engine produced the requested order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPass {
    Reversed,
    FullSort,
}

/// Tracks the current sort key and the order of the held list.
#[derive(Debug, Clone)]
pub struct SortEngine {
    current: SortKey,
    applied: Option<SortKey>,
    rules: CompareRules,
}

impl SortEngine {
    pub fn new(initial: SortKey, rules: CompareRules) -> Self {
        Self {
            current: initial,
            applied: None,
            rules,
        }
    }

    // Getters / accessors

    #[inline]
    pub fn current(&self) -> SortKey {
        self.current
    }

    /// Key the held list is ordered by, or `None` for a freshly listed, unsorted list.
    #[inline]
    pub fn applied(&self) -> Option<SortKey> {
        self.applied
    }

    #[inline]
    pub fn rules(&self) -> CompareRules {
        self.rules
    }

    /// Marks the held list as unsorted. Called whenever the list is replaced.
    pub fn invalidate(&mut self) {
        self.applied = None;
    }

    /// Orders `list` by `requested` and records it as the current key.
    ///
    /// Reverses in place when `requested` is the opposite direction of the applied key.
    /// Grouping directories first disables the shortcut since a reversal would move them last.
    pub fn apply(&mut self, list: &mut [FileItem], requested: SortKey) -> SortPass {
        let pass = if self.should_reverse(requested) {
            list.reverse();
            SortPass::Reversed
        } else {
            let rules = self.rules;
            list.sort_by(|a, b| rules.compare(a, b, requested));
            SortPass::FullSort
        };
        self.current = requested;
        self.applied = Some(requested);
        pass
    }

    /// Like [SortEngine::apply] but for a selector position.
    pub fn apply_index(
        &mut self,
        list: &mut [FileItem],
        index: usize,
    ) -> Result<SortPass, SortError> {
        let key = SortKey::from_index(index)?;
        Ok(self.apply(list, key))
    }

    fn should_reverse(&self, requested: SortKey) -> bool {
        !self.rules.dirs_first && self.applied == Some(requested.opposite())
    }
}

impl Default for SortEngine {
    fn default() -> Self {
        Self::new(SortKey::NameAsc, CompareRules::default())
    }
}
