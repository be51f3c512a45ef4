//! Platform resources as returned by the API: apps, releases, dynos.
//!
//! Only the fields the wait loop reads are modelled; unknown fields are
//! ignored on deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dyno type reserved for the release-phase process.
pub const RELEASE_DYNO_TYPE: &str = "release";

/// Dyno type used by one-off `run` dynos.
pub const RUN_DYNO_TYPE: &str = "run";

// ── App ──────────────────────────────────────────────────────────────────────

/// Application metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Present only for apps running inside a Private Space.
    #[serde(default)]
    pub space: Option<SpaceRef>,
}

impl App {
    #[must_use]
    pub fn in_private_space(&self) -> bool {
        self.space.is_some()
    }
}

/// Reference to the Private Space an app lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

// ── Release ──────────────────────────────────────────────────────────────────

/// A release's version ordinal.
///
/// The API sends an integer; older fixtures and proxies send a string. Both
/// are kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReleaseVersion {
    Number(u64),
    Text(String),
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// An immutable, versioned deployment of an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: String,
    pub version: ReleaseVersion,
}

/// Reference from a dyno to the release it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRef {
    pub id: String,
}

// ── Dyno ─────────────────────────────────────────────────────────────────────

/// Lifecycle state of a dyno. Only `Up` counts towards convergence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DynoState {
    Up,
    Starting,
    Down,
    Crashed,
    Idle,
    Other(String),
}

impl From<String> for DynoState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "up" => Self::Up,
            "starting" => Self::Starting,
            "down" => Self::Down,
            "crashed" => Self::Crashed,
            "idle" => Self::Idle,
            _ => Self::Other(s),
        }
    }
}

impl From<DynoState> for String {
    fn from(state: DynoState) -> Self {
        state.as_str().to_string()
    }
}

impl DynoState {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Up => "up",
            Self::Starting => "starting",
            Self::Down => "down",
            Self::Crashed => "crashed",
            Self::Idle => "idle",
            Self::Other(s) => s,
        }
    }
}

/// A running instance of one process type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dyno {
    #[serde(rename = "type")]
    pub kind: String,
    pub state: DynoState,
    #[serde(default)]
    pub release: Option<ReleaseRef>,
    #[serde(default)]
    pub name: String,
}

impl Dyno {
    /// Whether this dyno is up and running `release`.
    #[must_use]
    pub fn is_on(&self, release: &Release) -> bool {
        self.state == DynoState::Up && self.release.as_ref().is_some_and(|r| r.id == release.id)
    }
}
