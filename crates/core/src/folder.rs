//! Folder/title codec.
//!
//! The backend has no folder column, so the category is packed into the
//! `title` field as a bracket prefix: `"[Work] Buy milk"`. `General` is the
//! implicit folder and is never written as a prefix. Decoding is tolerant:
//! a bracketed word that is not one of the four folder names is ordinary
//! title text.
//!
//! Known limitation, preserved on purpose: a clean title that itself begins
//! with `"[Work] "` (or another closed-set tag) will be re-interpreted as a
//! tagged title on the next decode. Changing that would change the wire
//! contract with the existing backend.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Closed set of task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Folder {
    #[default]
    General,
    Work,
    Personal,
    Urgent,
}

pub const ALL_FOLDERS: &[Folder] = &[
    Folder::General,
    Folder::Work,
    Folder::Personal,
    Folder::Urgent,
];

impl Folder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Urgent => "Urgent",
        }
    }

    /// Exact-name lookup, as used by the decoder. Tag matching is
    /// case-sensitive: `"[work]"` is not a folder tag.
    pub fn from_tag(s: &str) -> Option<Self> {
        match s {
            "General" => Some(Self::General),
            "Work" => Some(Self::Work),
            "Personal" => Some(Self::Personal),
            "Urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

impl std::fmt::Display for Folder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown folder '{0}' (expected General, Work, Personal or Urgent)")]
pub struct ParseFolderError(pub String);

/// Case-insensitive parse for user input (CLI flags). The codec itself uses
/// [`Folder::from_tag`].
impl std::str::FromStr for Folder {
    type Err = ParseFolderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_FOLDERS
            .iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ParseFolderError(s.to_string()))
    }
}

/// Derived view of a title: the visible text plus its folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleParts {
    pub clean_title: String,
    pub folder: Folder,
}

// A tag only counts at the very start of the title; brackets anywhere else
// stay inside the clean title. `.` stays line-scoped, so a title whose
// remainder spans a newline is not treated as tagged.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]*)\]\s*(.*)$").expect("valid tag regex"));

/// Split a stored title into clean text and folder. Total over any string;
/// unknown tags and untagged titles decode to `General` with the input
/// returned unchanged as the clean title.
pub fn decode_title(title: &str) -> TitleParts {
    if let Some(caps) = TAG_RE.captures(title) {
        if let Some(folder) = Folder::from_tag(&caps[1]) {
            return TitleParts {
                clean_title: caps[2].to_string(),
                folder,
            };
        }
    }
    TitleParts {
        clean_title: title.to_string(),
        folder: Folder::General,
    }
}

/// Pack a folder back into a title for saving. `General` emits no prefix.
pub fn encode_title(clean_title: &str, folder: Folder) -> String {
    match folder {
        Folder::General => clean_title.to_string(),
        other => format!("[{}] {}", other.as_str(), clean_title),
    }
}
