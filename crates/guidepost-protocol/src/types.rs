//! The navigation document: the one piece of state Guidepost persists.
//!
//! The whole tree is stored and exchanged as a single JSON object:
//!
//! ```text
//! NavigationDocument { title, tabs: [
//!     Tab { title, guides: [
//!         Guide { title, summary, color, link, time },
//!         ...
//!     ]},
//!     ...
//! ]}
//! ```
//!
//! Nothing in the tree has an identity beyond its position. Reordering
//! two tabs is indistinguishable from replacing them, and every save
//! replaces the whole document.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Guide
// ---------------------------------------------------------------------------

/// A single link entry with display metadata.
///
/// All fields are opaque display strings. The server never interprets
/// them: `color` isn't checked to be a color, `link` isn't checked to be
/// a URL, `time` is whatever the page chose to write.
///
/// Missing fields decode as empty strings (`#[serde(default)]`), but an
/// explicit `null` is rejected because a `String` can't be null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Guide {
    pub title: String,
    pub summary: String,
    pub color: String,
    pub link: String,
    pub time: String,
}

// ---------------------------------------------------------------------------
// Tab
// ---------------------------------------------------------------------------

/// A named, ordered group of guides.
///
/// Order is display order. Tabs are not keyed, so two tabs may share a
/// title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tab {
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub guides: Vec<Guide>,
}

// ---------------------------------------------------------------------------
// NavigationDocument
// ---------------------------------------------------------------------------

/// The entire persisted state: a page title and its tabs.
///
/// Exactly one of these exists per process. The store owns it; everyone
/// else gets clones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationDocument {
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub tabs: Vec<Tab>,
}

impl NavigationDocument {
    /// Creates an empty document with the given title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tabs: Vec::new(),
        }
    }

    /// Returns `true` if the document has no title and no tabs, i.e. it
    /// is what a fail-open load substitutes for a missing or bad file.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.tabs.is_empty()
    }
}

/// Accepts a JSON `null` where a sequence is expected and treats it as
/// empty.
///
/// Older data files were written with `"tabs":null` for an empty
/// document, and those files must keep loading.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =========================================================================
// Tests
// =========================================================================
