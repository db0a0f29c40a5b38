use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A spending category as it appears on a transaction.
///
/// Categories are an open set. The string is kept verbatim so that unrecognized categories still
/// aggregate under their own name, while `kind` maps the well-known ones for icon and label lookup.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the well-known kind of this category, or `CategoryKind::Other`.
    pub fn kind(&self) -> CategoryKind {
        CategoryKind::from_str(&self.0).unwrap_or_default()
    }

    /// The icon shown next to this category in reports.
    pub fn icon(&self) -> &'static str {
        self.kind().icon()
    }

    /// A capitalized display label, e.g. `food` -> `Food`. Unknown categories are capitalized
    /// verbatim.
    pub fn label(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::new(value)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category(value)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The categories that have their own icon.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Food,
    Shopping,
    Gaming,
    Transport,
    Entertainment,
    #[default]
    Other,
}

serde_plain::derive_display_from_serialize!(CategoryKind);
serde_plain::derive_fromstr_from_deserialize!(CategoryKind);

impl CategoryKind {
    pub fn icon(&self) -> &'static str {
        match self {
            CategoryKind::Food => "🍕",
            CategoryKind::Shopping => "🛒",
            CategoryKind::Gaming => "🎮",
            CategoryKind::Transport => "🚗",
            CategoryKind::Entertainment | CategoryKind::Other => "💵",
        }
    }
}
