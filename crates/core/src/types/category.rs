//! Product categories.
//!
//! The catalog uses a fixed set of categories, but the store may introduce
//! new ones at any time, so unknown values are preserved as
//! [`Category::Other`] rather than rejected.

use serde::{Deserialize, Serialize};

/// A product category.
///
/// Serialized as its display string (e.g., `"Fashion"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Electronics,
    Fashion,
    Sports,
    Home,
    Travel,
    Beauty,
    Kitchen,
    Office,
    Games,
    /// A category not in the known set.
    Other(String),
}

impl Category {
    /// All known categories, in the order the filter dropdown shows them.
    pub const KNOWN: [Self; 9] = [
        Self::Electronics,
        Self::Fashion,
        Self::Sports,
        Self::Home,
        Self::Travel,
        Self::Beauty,
        Self::Kitchen,
        Self::Office,
        Self::Games,
    ];

    /// The display name for this category.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Electronics => "Electronics",
            Self::Fashion => "Fashion",
            Self::Sports => "Sports",
            Self::Home => "Home",
            Self::Travel => "Travel",
            Self::Beauty => "Beauty",
            Self::Kitchen => "Kitchen",
            Self::Office => "Office",
            Self::Games => "Games",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::KNOWN
            .iter()
            .find(|known| known.as_str() == value)
            .cloned()
            .unwrap_or(Self::Other(value))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_owned()
    }
}
