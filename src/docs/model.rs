use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Relative path to raw file content, ordered by path.
pub type SourceFiles = BTreeMap<String, String>;

/// Sidebar category of a documentation entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Form,
    DataDisplay,
    Feedback,
    Layout,
    Navigation,
    /// Fallback for slugs the sidebar does not place
    #[default]
    Utility,
    Overview,
    Lib,
    Guide,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Form,
        Category::DataDisplay,
        Category::Feedback,
        Category::Layout,
        Category::Navigation,
        Category::Utility,
        Category::Overview,
        Category::Lib,
        Category::Guide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Form => "form",
            Category::DataDisplay => "data-display",
            Category::Feedback => "feedback",
            Category::Layout => "layout",
            Category::Navigation => "navigation",
            Category::Utility => "utility",
            Category::Overview => "overview",
            Category::Lib => "lib",
            Category::Guide => "guide",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A parsed component or guide page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocEntry {
    pub name: String,
    pub category: Category,
    pub description: String,
    /// Full markdown body, trimmed
    pub content: String,
}

/// A [`DocEntry`] without its content, used for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocEntrySummary {
    pub name: String,
    pub category: Category,
    pub description: String,
}

impl From<&DocEntry> for DocEntrySummary {
    fn from(entry: &DocEntry) -> Self {
        Self {
            name: entry.name.clone(),
            category: entry.category,
            description: entry.description.clone(),
        }
    }
}

/// One row of the icon catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconEntry {
    pub name: String,
    pub description: String,
    /// Heading the row was listed under, e.g. "Arrows and Chevrons"
    pub category: String,
}
