//! Which dynos count towards convergence.
//!
//! Pure functions only — no I/O, no async.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::WaitError;
use crate::domain::release::{Dyno, RELEASE_DYNO_TYPE, RUN_DYNO_TYPE};

/// Process names the platform gives release-phase dynos, e.g. `release.4821`.
pub static RELEASE_DYNO_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^release\.\d+$").expect("valid regex")
});

/// How release-phase dynos are recognised. They are always excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseDynoMatch {
    /// `type == "release"`.
    #[default]
    Type,
    /// `name` matches `release.<digits>`.
    Name,
}

/// Accepted spellings of [`ReleaseDynoMatch`] in configuration.
pub const VALID_RELEASE_DYNO_MATCHES: &[&str] = &["type", "name"];

impl ReleaseDynoMatch {
    #[must_use]
    pub fn is_release_dyno(self, dyno: &Dyno) -> bool {
        match self {
            Self::Type => dyno.kind == RELEASE_DYNO_TYPE,
            Self::Name => RELEASE_DYNO_NAME_RE.is_match(&dyno.name),
        }
    }
}

impl fmt::Display for ReleaseDynoMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Type => "type",
            Self::Name => "name",
        })
    }
}

impl FromStr for ReleaseDynoMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "type" => Ok(Self::Type),
            "name" => Ok(Self::Name),
            other => Err(other.to_string()),
        }
    }
}

/// Filter applied to every dyno list before counting.
///
/// `include_run` and `only_type` are mutually exclusive; [`DynoFilter::new`]
/// is the only constructor and rejects the combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynoFilter {
    include_run: bool,
    only_type: Option<String>,
    release_match: ReleaseDynoMatch,
}

impl DynoFilter {
    /// Build a filter from the invocation options.
    ///
    /// # Errors
    ///
    /// Returns [`WaitError::ConflictingFilters`] if both `include_run` and
    /// `only_type` are set.
    pub fn new(
        include_run: bool,
        only_type: Option<String>,
        release_match: ReleaseDynoMatch,
    ) -> Result<Self, WaitError> {
        Self::check_exclusive(include_run, only_type.as_deref())?;
        Ok(Self {
            include_run,
            only_type,
            release_match,
        })
    }

    /// Reject `include_run` together with `only_type`, without building a filter.
    ///
    /// # Errors
    ///
    /// Returns [`WaitError::ConflictingFilters`] if both are set.
    pub fn check_exclusive(include_run: bool, only_type: Option<&str>) -> Result<(), WaitError> {
        if include_run && only_type.is_some() {
            return Err(WaitError::ConflictingFilters);
        }
        Ok(())
    }

    #[must_use]
    pub fn include_run(&self) -> bool {
        self.include_run
    }

    #[must_use]
    pub fn only_type(&self) -> Option<&str> {
        self.only_type.as_deref()
    }

    #[must_use]
    pub fn release_match(&self) -> ReleaseDynoMatch {
        self.release_match
    }

    /// Whether `dyno` participates in the convergence count.
    #[must_use]
    pub fn counts(&self, dyno: &Dyno) -> bool {
        if self.release_match.is_release_dyno(dyno) {
            return false;
        }
        if !self.include_run && dyno.kind == RUN_DYNO_TYPE {
            return false;
        }
        match &self.only_type {
            Some(kind) => dyno.kind == *kind,
            None => true,
        }
    }

    /// Keep only the dynos that count.
    pub fn apply<'a>(&'a self, dynos: &'a [Dyno]) -> impl Iterator<Item = &'a Dyno> + 'a {
        dynos.iter().filter(|d| self.counts(d))
    }
}

impl Default for DynoFilter {
    fn default() -> Self {
        Self {
            include_run: false,
            only_type: None,
            release_match: ReleaseDynoMatch::Type,
        }
    }
}
