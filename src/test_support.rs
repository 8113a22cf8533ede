// Fakes shared by the unit tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use url::Url;

use crate::error::{BrowserError, Result};
use crate::modules::file_ops::{FileDialog, FileFilter, Notifier};
use crate::modules::tabs::TabManager;
use crate::page_host::{ExportCallback, ExportId, PageHost, PendingExports, PrintPrompt, Printer};
use crate::settings::Settings;
use crate::state::TabId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Navigate(Url),
    Back,
    Forward,
    Reload,
    Stop,
    SetHtml(String),
    ExportHtml,
    Print,
}

/// Records every call; navigation takes effect immediately.
/// An `inert` host refuses export requests.
#[derive(Default)]
pub struct FakeHost {
    pub calls: Vec<HostCall>,
    pub url: Option<Url>,
    pub title: String,
    pub markup: String,
    pub inert: bool,
    exports: PendingExports,
}

impl FakeHost {
    pub fn pending_exports(&self) -> usize {
        self.exports.len()
    }

    pub fn pending_export_ids(&self) -> Vec<ExportId> {
        self.exports.ids()
    }

    /// Delivers `markup` to one outstanding export request.
    pub fn answer_export(&mut self, request: ExportId) -> bool {
        self.exports.finish(request, self.markup.clone())
    }

    /// Delivers `markup` to every outstanding export request.
    pub fn complete_exports(&mut self) {
        for request in self.exports.ids() {
            self.answer_export(request);
        }
    }
}

impl PageHost for FakeHost {
    fn navigate(&mut self, url: &Url) {
        self.url = Some(url.clone());
        self.calls.push(HostCall::Navigate(url.clone()));
    }

    fn back(&mut self) {
        self.calls.push(HostCall::Back);
    }

    fn forward(&mut self) {
        self.calls.push(HostCall::Forward);
    }

    fn reload(&mut self) {
        self.calls.push(HostCall::Reload);
    }

    fn stop(&mut self) {
        self.calls.push(HostCall::Stop);
    }

    fn set_html(&mut self, markup: &str) {
        self.calls.push(HostCall::SetHtml(markup.to_string()));
    }

    fn export_html(&mut self, done: ExportCallback) -> Result<()> {
        self.calls.push(HostCall::ExportHtml);
        if self.inert {
            return Err(BrowserError::ExportUnavailable { tab: TabId(0) });
        }
        self.exports.begin(done);
        Ok(())
    }

    fn current_url(&self) -> Option<Url> {
        self.url.clone()
    }

    fn current_title(&self) -> String {
        self.title.clone()
    }

    fn print(&mut self, _printer: &Printer) {
        self.calls.push(HostCall::Print);
    }
}

pub fn fake_manager() -> TabManager<FakeHost> {
    TabManager::new(Settings::default(), |_| FakeHost::default())
}

/// Returns the same answer to every prompt and remembers what was asked.
pub struct ScriptedDialog {
    answer: Option<PathBuf>,
    prompts: Mutex<Vec<(String, usize)>>,
}

impl ScriptedDialog {
    pub fn choosing(path: &Path) -> Self {
        Self {
            answer: Some(path.to_path_buf()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            answer: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Title and number of filters of every prompt shown.
    pub fn prompts(&self) -> Vec<(String, usize)> {
        self.prompts.lock().unwrap().clone()
    }

    fn ask(&self, title: &str, filters: &[FileFilter]) -> Option<PathBuf> {
        self.prompts
            .lock()
            .unwrap()
            .push((title.to_string(), filters.len()));
        self.answer.clone()
    }
}

impl FileDialog for ScriptedDialog {
    fn pick_open(&self, title: &str, filters: &[FileFilter]) -> Option<PathBuf> {
        self.ask(title, filters)
    }

    fn pick_save(&self, title: &str, filters: &[FileFilter]) -> Option<PathBuf> {
        self.ask(title, filters)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn warn(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct ScriptedPrintPrompt {
    accept: bool,
    target: Option<String>,
}

impl ScriptedPrintPrompt {
    pub fn new(accept: bool, target: Option<&str>) -> Self {
        Self {
            accept,
            target: target.map(str::to_string),
        }
    }
}

impl PrintPrompt for ScriptedPrintPrompt {
    fn confirm(&mut self, printer: &mut Printer) -> bool {
        if self.accept {
            printer.target = self.target.clone();
        }
        self.accept
    }
}
