use serde::{Deserialize, Serialize};

/// A movie as observed in an actor's filmography.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieRef {
    pub id: String,
    pub title: String,
    /// Source-specific locator for the cast listing (a page URL for web
    /// catalogs). `None` lets the source derive it from the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl MovieRef {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            href: None,
        }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Whether the title is too short to be a real movie record.
    pub fn has_degenerate_title(&self) -> bool {
        self.title.trim().chars().count() < crate::constants::MIN_TITLE_CHARS
    }
}
