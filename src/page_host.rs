// The seam between the tab logic and whatever web engine renders the pages.
// The desktop shell implements it over a system webview; tests use fakes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;
use crate::state::TabId;

/// Receives the serialized markup of a page once the engine has produced it.
pub type ExportCallback = Box<dyn FnOnce(String) + Send + 'static>;

/// Names one export request, so a reply only ever reaches the callback that
/// asked for it.
pub type ExportId = u64;

/// One renderer instance backing a tab.
pub trait PageHost {
    fn navigate(&mut self, url: &Url);
    fn back(&mut self);
    fn forward(&mut self);
    fn reload(&mut self);
    fn stop(&mut self);

    /// Replaces the page content with `markup` without a navigation.
    fn set_html(&mut self, markup: &str);

    /// Asynchronously serializes the current DOM. `done` runs later, on the
    /// event loop, with the markup. An error means the request could not be
    /// sent at all and `done` will never run.
    fn export_html(&mut self, done: ExportCallback) -> Result<()>;

    /// `None` while the page is blank.
    fn current_url(&self) -> Option<Url>;
    fn current_title(&self) -> String;

    fn print(&mut self, printer: &Printer);
}

/// Events reported by a page host. They name the tab, never its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    UrlChanged { tab: TabId, url: Url },
    LoadStarted { tab: TabId },
    LoadFinished { tab: TabId },
}

impl PageEvent {
    pub fn tab(&self) -> TabId {
        match self {
            Self::UrlChanged { tab, .. } | Self::LoadStarted { tab } | Self::LoadFinished { tab } => {
                *tab
            }
        }
    }
}

/// Export requests waiting for the engine to answer.
#[derive(Default)]
pub struct PendingExports {
    next: ExportId,
    waiting: BTreeMap<ExportId, ExportCallback>,
}

impl PendingExports {
    /// Parks `done` and returns the id the reply must carry.
    pub fn begin(&mut self, done: ExportCallback) -> ExportId {
        self.next += 1;
        self.waiting.insert(self.next, done);
        self.next
    }

    /// Runs the callback registered under `request`. Returns `false` for an
    /// id that is unknown or already answered.
    pub fn finish(&mut self, request: ExportId, markup: String) -> bool {
        match self.waiting.remove(&request) {
            Some(done) => {
                done(markup);
                true
            }
            None => false,
        }
    }

    /// Forgets `request` without running its callback.
    pub fn abandon(&mut self, request: ExportId) -> bool {
        self.waiting.remove(&request).is_some()
    }

    pub fn ids(&self) -> Vec<ExportId> {
        self.waiting.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}

/// URL and title of the document a host is showing, as last reported by the
/// engine. A title only ever belongs to the URL it was reported for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    url: Option<Url>,
    title: String,
}

impl PageSnapshot {
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Moving to another document drops the previous document's title.
    pub fn record_url(&mut self, url: Url) {
        if self.url.as_ref() != Some(&url) {
            self.title.clear();
        }
        self.url = Some(url);
    }

    /// A navigation was requested; whatever loads next has no title yet.
    pub fn navigating_to(&mut self, url: Url) {
        self.title.clear();
        self.url = Some(url);
    }

    pub fn record_title(&mut self, title: String) {
        self.title = title;
    }
}

/// The print target, configured through the system prompt and kept for the
/// lifetime of the application. `None` until a prompt picks one; engines
/// that run their own print dialog never fill it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Printer {
    pub target: Option<String>,
}

/// The system print configuration prompt.
pub trait PrintPrompt {
    /// Returns `true` when the user confirmed; may update `printer`.
    fn confirm(&mut self, printer: &mut Printer) -> bool;
}
