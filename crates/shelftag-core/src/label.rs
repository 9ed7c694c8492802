//! The merchandising status label stored on a variant metafield.
//!
//! The label is derived state: it must always be recomputable from the
//! variant's commercial attributes plus a reference time. Stored values may
//! arrive with arbitrary casing or stray whitespace (manual edits, older
//! writers), so every comparison goes through [`Label::normalize`] —
//! trim + ASCII lowercase — at both the read and the write boundary.

use serde::{Deserialize, Serialize};

/// The closed set of merchandising labels.
///
/// `None` is the absence of a highlight, written to the platform as an
/// empty string rather than the literal word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    New,
    Offer,
    Hot,
    None,
}

impl Label {
    /// The canonical display value written to the label metafield.
    ///
    /// `None` maps to the empty string: clearing the highlight rather than
    /// storing a sentinel word.
    #[must_use]
    pub fn metafield_value(self) -> &'static str {
        match self {
            Label::New => "New",
            Label::Offer => "Offer",
            Label::Hot => "Hot",
            Label::None => "",
        }
    }

    /// The normalized comparison form of this label.
    #[must_use]
    pub fn normalized(self) -> &'static str {
        match self {
            Label::New => "new",
            Label::Offer => "offer",
            Label::Hot => "hot",
            Label::None => "none",
        }
    }

    /// Normalizes a raw stored label value: trim + ASCII lowercase.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_ascii_lowercase()
    }

    /// Parses a raw stored value into a label, if it is one of the known
    /// values under normalization. The empty string and `"none"` both parse
    /// as [`Label::None`]; anything else (e.g. a hand-entered
    /// `"clearance"`) is `Option::None` and treated as unequal to every
    /// target by the write guard.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match Self::normalize(raw).as_str() {
            "new" => Some(Label::New),
            "offer" => Some(Label::Offer),
            "hot" => Some(Label::Hot),
            "" | "none" => Some(Label::None),
            _ => None,
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.normalized())
    }
}
