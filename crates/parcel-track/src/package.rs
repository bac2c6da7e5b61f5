use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity of a tracked package, assigned by the backend.
///
/// Used as the correlation key between modal submissions, list rows and
/// accordion sections. Never generated client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(i64);

impl PackageId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PackageId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// One row of the package list as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedPackage {
    pub id: PackageId,
    pub title: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

impl TrackedPackage {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: PackageId::new(id),
            title: title.into(),
            tracking_number: None,
        }
    }
}

/// A single tracking history entry returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub date: String,
    pub time: String,
    pub data: String,
}

/// The dialogs a package row can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    TitleInput,
    Delete,
}

impl ModalKind {
    pub const ALL: [ModalKind; 2] = [ModalKind::TitleInput, ModalKind::Delete];

    /// Element id prefix the page template uses for this dialog.
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::TitleInput => "titleInputModal",
            Self::Delete => "deleteModal",
        }
    }

    /// Human-readable dialog title.
    pub fn title(self) -> &'static str {
        match self {
            Self::TitleInput => "Rename package",
            Self::Delete => "Delete package",
        }
    }
}

impl fmt::Display for ModalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_name())
    }
}
