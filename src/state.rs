// Shared state structs for the tab manager and the toolbar page.
// Kept free of any UI toolkit types so they can be tested independently.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::paths::{ICON_LOCK_NOSSL, ICON_LOCK_SSL};

/// Stable tab identity. Never reused within one run, unlike positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Loaded,
}

pub struct Tab<H> {
    pub id: TabId,
    pub host: H,
    pub label: String,
    pub load_state: LoadState,
}

impl<H> fmt::Debug for Tab<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("load_state", &self.load_state)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlBar {
    pub text: String,
    pub cursor: usize,
}

impl UrlBar {
    /// Replaces the text and moves the cursor to the start, so long URLs show
    /// their scheme and host.
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = 0;
    }

    /// User typing. The cursor follows the end of the text.
    pub fn type_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityIndicator {
    Secure,
    #[default]
    Insecure,
}

impl SecurityIndicator {
    pub fn for_url(url: &Url) -> Self {
        if url.scheme() == "https" {
            Self::Secure
        } else {
            Self::Insecure
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Secure => ICON_LOCK_SSL,
            Self::Insecure => ICON_LOCK_NOSSL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSummary {
    pub id: TabId,
    pub label: String,
    pub load_state: LoadState,
}

/// Everything the toolbar page needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeState {
    pub tabs: Vec<TabSummary>,
    pub active_index: usize,
    pub urlbar: UrlBar,
    pub security: SecurityIndicator,
    pub security_icon: String,
    pub window_title: String,
}
