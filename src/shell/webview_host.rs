// PageHost over a Tauri child webview.
//
// Engine callbacks run on the main thread and only push PageEvents into the
// channel; they never touch the tab manager. Nothing here calls a webview
// getter that waits on the main thread: URL and title are cached from events.

use tauri::webview::{PageLoadEvent, PageLoadPayload};
use tauri::{LogicalPosition, LogicalSize, Runtime, Webview, WebviewBuilder, WebviewUrl, Window};
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

use crate::error::{BrowserError, Result};
use crate::page_host::{
    ExportCallback, ExportId, PageEvent, PageHost, PageSnapshot, PendingExports, Printer,
};
use crate::state::TabId;

const LABEL_PREFIX: &str = "tab-";
const BLANK: &str = "about:blank";

const PAGE_SCRIPT: &str = r#"
(function () {
  if (window.__mozzarella) return;
  const invoke = (cmd, args) =>
    window.__TAURI_INTERNALS__ ? window.__TAURI_INTERNALS__.invoke(cmd, args) : Promise.resolve();
  const report = () => invoke('page_reported', { title: document.title || '' });
  window.__mozzarella = {
    report,
    exportHtml: (request) =>
      invoke('page_exported', { request, html: document.documentElement.outerHTML }),
  };
  window.addEventListener('load', () => {
    report();
    const title = document.querySelector('title');
    if (title) {
      new MutationObserver(report).observe(title, { childList: true, characterData: true, subtree: true });
    }
  });
})();
"#;

pub fn webview_label(id: TabId) -> String {
    format!("{}{}", LABEL_PREFIX, id)
}

pub fn tab_id_from_label(label: &str) -> Option<TabId> {
    label.strip_prefix(LABEL_PREFIX)?.parse().ok().map(TabId)
}

pub fn is_tab_label(label: &str) -> bool {
    tab_id_from_label(label).is_some()
}

/// Where tab webviews sit inside the main window.
#[derive(Debug, Clone, Copy)]
pub struct ContentBounds {
    pub toolbar_height: f64,
    pub width: f64,
    pub height: f64,
}

impl ContentBounds {
    pub fn position(&self) -> LogicalPosition<f64> {
        LogicalPosition::new(0.0, self.toolbar_height)
    }

    pub fn size(&self) -> LogicalSize<f64> {
        LogicalSize::new(self.width, (self.height - self.toolbar_height).max(100.0))
    }
}

pub struct WebviewHost<R: Runtime> {
    id: TabId,
    webview: Option<Webview<R>>,
    page: PageSnapshot,
    exports: PendingExports,
}

impl<R: Runtime> WebviewHost<R> {
    /// Creates the child webview on `about:blank`. A webview that fails to
    /// build leaves an inert host behind.
    pub fn create(
        window: &Window<R>,
        id: TabId,
        bounds: ContentBounds,
        events: UnboundedSender<PageEvent>,
    ) -> Self {
        let builder = WebviewBuilder::new(webview_label(id), WebviewUrl::External(blank_url()))
            .initialization_script(PAGE_SCRIPT)
            .on_page_load(move |_webview, payload: PageLoadPayload<'_>| {
                let url = payload.url().clone();
                if url.as_str() != BLANK {
                    // Finished repeats the URL so redirects reach the URL bar.
                    let _ = events.send(PageEvent::UrlChanged { tab: id, url });
                }
                let event = match payload.event() {
                    PageLoadEvent::Started => PageEvent::LoadStarted { tab: id },
                    // The page script reports the real title shortly after.
                    PageLoadEvent::Finished => PageEvent::LoadFinished { tab: id },
                };
                let _ = events.send(event);
            });

        let webview = match window.add_child(builder, bounds.position(), bounds.size()) {
            Ok(webview) => Some(webview),
            Err(e) => {
                log::error!("[Shell] Failed to create webview for tab {}: {}", id, e);
                None
            }
        };

        Self {
            id,
            webview,
            page: PageSnapshot::default(),
            exports: PendingExports::default(),
        }
    }

    pub fn record_url(&mut self, url: Url) {
        if url.as_str() != BLANK {
            self.page.record_url(url);
        }
    }

    pub fn record_title(&mut self, title: String) {
        self.page.record_title(title);
    }

    /// Hands markup reported by the page to the export that asked for it.
    pub fn finish_export(&mut self, request: ExportId, markup: String) {
        if !self.exports.finish(request, markup) {
            log::debug!("[Shell] Unrequested export {} from tab {}", request, self.id);
        }
    }

    pub fn set_visible(&self, visible: bool) {
        if let Some(webview) = &self.webview {
            let result = if visible { webview.show() } else { webview.hide() };
            if let Err(e) = result {
                log::debug!("[Shell] Could not change visibility of tab {}: {}", self.id, e);
            }
        }
    }

    /// Returns `false` when the script could not be handed to the engine.
    fn eval(&self, script: &str) -> bool {
        let Some(webview) = &self.webview else {
            return false;
        };
        match webview.eval(script) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[Shell] Script failed in tab {}: {}", self.id, e);
                false
            }
        }
    }
}

fn blank_url() -> Url {
    Url::parse(BLANK).expect("about:blank is a valid URL")
}

impl<R: Runtime> PageHost for WebviewHost<R> {
    fn navigate(&mut self, url: &Url) {
        self.page.navigating_to(url.clone());
        if let Some(webview) = &self.webview {
            if let Err(e) = webview.navigate(url.clone()) {
                log::warn!("[Shell] Navigation of tab {} failed: {}", self.id, e);
            }
        }
    }

    fn back(&mut self) {
        self.eval("window.history.back()");
    }

    fn forward(&mut self) {
        self.eval("window.history.forward()");
    }

    fn reload(&mut self) {
        self.eval("window.location.reload()");
    }

    fn stop(&mut self) {
        self.eval("window.stop()");
    }

    fn set_html(&mut self, markup: &str) {
        let literal = match serde_json::to_string(markup) {
            Ok(literal) => literal,
            Err(e) => {
                log::warn!("[Shell] Could not encode markup for tab {}: {}", self.id, e);
                return;
            }
        };
        let script = format!(
            "document.open();document.write({});document.close();\
             window.__mozzarella && window.__mozzarella.report();",
            literal
        );
        self.eval(&script);
    }

    fn export_html(&mut self, done: ExportCallback) -> Result<()> {
        let unavailable = BrowserError::ExportUnavailable { tab: self.id };
        if self.webview.is_none() {
            return Err(unavailable);
        }
        let request = self.exports.begin(done);
        let script = format!(
            "window.__mozzarella && window.__mozzarella.exportHtml({})",
            request
        );
        if !self.eval(&script) {
            self.exports.abandon(request);
            return Err(unavailable);
        }
        Ok(())
    }

    fn current_url(&self) -> Option<Url> {
        self.page.url().cloned()
    }

    fn current_title(&self) -> String {
        self.page.title().to_string()
    }

    fn print(&mut self, _printer: &Printer) {
        // The engine shows the system print dialog itself.
        self.eval("window.print()");
    }
}

impl<R: Runtime> Drop for WebviewHost<R> {
    fn drop(&mut self) {
        if let Some(webview) = self.webview.take() {
            let _ = webview.close();
        }
    }
}
