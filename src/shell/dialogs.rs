// Native dialogs via tauri-plugin-dialog.
// The blocking pickers must not run on the main thread; they are only called
// from async commands.

use std::path::PathBuf;

use tauri::{AppHandle, Runtime};
use tauri_plugin_dialog::{DialogExt, FileDialogBuilder, MessageDialogKind};

use crate::modules::file_ops::{FileDialog, FileFilter, Notifier};
use crate::page_host::{PrintPrompt, Printer};

pub struct NativeFileDialog<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> NativeFileDialog<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }

    fn builder(&self, title: &str, filters: &[FileFilter]) -> FileDialogBuilder<R> {
        let mut builder = self.app.dialog().file().set_title(title);
        for filter in filters {
            builder = builder.add_filter(filter.name, filter.extensions);
        }
        builder
    }
}

impl<R: Runtime> FileDialog for NativeFileDialog<R> {
    fn pick_open(&self, title: &str, filters: &[FileFilter]) -> Option<PathBuf> {
        self.builder(title, filters)
            .blocking_pick_file()
            .and_then(|picked| picked.into_path().ok())
    }

    fn pick_save(&self, title: &str, filters: &[FileFilter]) -> Option<PathBuf> {
        self.builder(title, filters)
            .blocking_save_file()
            .and_then(|picked| picked.into_path().ok())
    }
}

/// Shows warnings as non-blocking message dialogs.
pub struct DialogNotifier<R: Runtime> {
    app: AppHandle<R>,
    title: String,
}

impl<R: Runtime> DialogNotifier<R> {
    pub fn new(app: AppHandle<R>, title: impl Into<String>) -> Self {
        Self {
            app,
            title: title.into(),
        }
    }
}

impl<R: Runtime> Notifier for DialogNotifier<R> {
    fn warn(&self, message: &str) {
        self.app
            .dialog()
            .message(message)
            .title(&self.title)
            .kind(MessageDialogKind::Warning)
            .show(|_| {});
    }
}

/// The engine's `window.print()` shows the system print dialog, so the shell
/// always lets the request through.
pub struct EnginePrintPrompt;

impl PrintPrompt for EnginePrintPrompt {
    fn confirm(&mut self, _printer: &mut Printer) -> bool {
        true
    }
}
