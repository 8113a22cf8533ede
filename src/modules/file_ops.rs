// Open a local HTML file into the active tab, and save the active tab's markup.
// Dialogs and user-facing warnings come in through traits so the shell can
// plug in native ones.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{BrowserError, Result};
use crate::modules::tabs::TabManager;
use crate::page_host::PageHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

/// HTML first, "All files" as the fallback.
pub const HTML_FILTERS: [FileFilter; 2] = [
    FileFilter {
        name: "Hypertext Markup Language",
        extensions: &["htm", "html"],
    },
    FileFilter {
        name: "All files",
        extensions: &["*"],
    },
];

pub const OPEN_TITLE: &str = "Open file";
pub const SAVE_TITLE: &str = "Save Page As";

/// Native file pickers. `None` means the user cancelled.
pub trait FileDialog {
    fn pick_open(&self, title: &str, filters: &[FileFilter]) -> Option<PathBuf>;
    fn pick_save(&self, title: &str, filters: &[FileFilter]) -> Option<PathBuf>;
}

/// Shows non-fatal warnings to the user.
pub trait Notifier: Send + Sync {
    fn warn(&self, message: &str);
}

/// Prompts for a file and loads it into the active tab.
/// Returns the chosen path, or `None` if the prompt was cancelled.
pub fn open_file<H: PageHost>(
    manager: &mut TabManager<H>,
    dialog: &impl FileDialog,
) -> Result<Option<PathBuf>> {
    let Some(path) = dialog.pick_open(OPEN_TITLE, &HTML_FILTERS) else {
        log::debug!("[Files] Open cancelled");
        return Ok(None);
    };
    load_file(manager, &path)?;
    Ok(Some(path))
}

/// Loads `path` as markup into the active tab and shows the path in the URL bar.
/// The page host's own URL is left alone; this is not a navigation.
pub fn load_file<H: PageHost>(manager: &mut TabManager<H>, path: &Path) -> Result<()> {
    let bytes = fs::read(path).map_err(|e| BrowserError::io(path, e))?;
    let html = String::from_utf8_lossy(&bytes);

    log::info!("[Files] Loaded {} ({} bytes)", path.display(), bytes.len());
    manager.active_host_mut().set_html(&html);
    manager.show_in_urlbar(path.display().to_string());
    Ok(())
}

/// Prompts for a destination and saves the active tab's markup there once the
/// page host has produced it. Returns the chosen path.
pub fn save_file<H: PageHost>(
    manager: &mut TabManager<H>,
    dialog: &impl FileDialog,
    notifier: Arc<dyn Notifier>,
) -> Option<PathBuf> {
    let Some(path) = dialog.pick_save(SAVE_TITLE, &HTML_FILTERS) else {
        log::debug!("[Files] Save cancelled");
        return None;
    };
    save_active_page(manager, path.clone(), notifier);
    Some(path)
}

/// Requests the active tab's markup and writes it to `path` when it arrives.
/// Export and write failures go to `notifier`.
pub fn save_active_page<H: PageHost>(
    manager: &mut TabManager<H>,
    path: PathBuf,
    notifier: Arc<dyn Notifier>,
) {
    log::debug!("[Files] Exporting tab {} to {}", manager.active_id(), path.display());
    let target = path.display().to_string();
    let on_written = notifier.clone();
    let requested = manager.active_host_mut().export_html(Box::new(move |markup| {
        if let Err(e) = write_markup(&path, &markup) {
            log::warn!("[Files] {}", e);
            on_written.warn(&e.to_string());
        }
    }));
    if let Err(e) = requested {
        log::warn!("[Files] Could not save {}: {}", target, e);
        notifier.warn(&format!("could not save {}: {}", target, e));
    }
}

/// Writes `markup` verbatim as UTF-8.
pub fn write_markup(path: &Path, markup: &str) -> Result<()> {
    fs::write(path, markup.as_bytes()).map_err(|e| BrowserError::io(path, e))?;
    log::info!("[Files] Saved {} ({} bytes)", path.display(), markup.len());
    Ok(())
}
