// Commands invoked by the toolbar page and by the page script in each tab.
// All of them are async so they run off the main thread (see shell/mod.rs).

use std::sync::Arc;

use serde::Serialize;
use tauri::{AppHandle, Manager, Webview};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::modules::about::AboutInfo;
use crate::modules::actions::{ActionInfo, BrowserAction};
use crate::modules::file_ops::{self, FileDialog, Notifier, HTML_FILTERS, OPEN_TITLE, SAVE_TITLE};
use crate::page_host::{ExportId, PageEvent};
use crate::settings::{Settings, APP_NAME};
use crate::state::ChromeState;

use super::dialogs::{DialogNotifier, EnginePrintPrompt, NativeFileDialog};
use super::webview_host::tab_id_from_label;
use super::{with_browser, AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarInit {
    pub settings: Settings,
    pub actions: Vec<ActionInfo>,
    pub chrome: ChromeState,
}

fn notifier(app: &AppHandle) -> Arc<dyn Notifier> {
    Arc::new(DialogNotifier::new(app.clone(), APP_NAME))
}

/// Runs a toolbar or menu action. Dialog prompts happen before the tab
/// manager is locked.
pub fn dispatch(app: &AppHandle, action: BrowserAction) -> Result<(), String> {
    match action {
        BrowserAction::OpenFile => {
            let dialog = NativeFileDialog::new(app.clone());
            let Some(path) = dialog.pick_open(OPEN_TITLE, &HTML_FILTERS) else {
                return Ok(());
            };
            if let Err(e) = with_browser(app, |b| file_ops::load_file(b, &path))? {
                log::warn!("[Shell] {}", e);
                notifier(app).warn(&e.to_string());
            }
        }
        BrowserAction::SaveFile => {
            let dialog = NativeFileDialog::new(app.clone());
            let Some(path) = dialog.pick_save(SAVE_TITLE, &HTML_FILTERS) else {
                return Ok(());
            };
            let notifier = notifier(app);
            with_browser(app, |b| file_ops::save_active_page(b, path, notifier))?;
        }
        BrowserAction::Print => {
            with_browser(app, |b| b.print_current_page(&mut EnginePrintPrompt))?;
        }
        BrowserAction::About => show_about(app),
        other => {
            with_browser(app, |b| b.perform(other))?;
        }
    }
    Ok(())
}

/// Text-only About box, for callers that cannot reach the native About item.
fn show_about(app: &AppHandle) {
    let about = AboutInfo::new(&app.state::<AppState>().assets);
    app.dialog()
        .message(format!("{}\n{}", about.version, about.copyright))
        .title(&about.title)
        .kind(MessageDialogKind::Info)
        .show(|_| {});
}

#[tauri::command]
pub async fn toolbar_ready(app: AppHandle) -> Result<ToolbarInit, String> {
    with_browser(&app, |b| {
        let settings = b.settings().clone();
        let actions = BrowserAction::TOOLBAR
            .into_iter()
            .map(|a| ActionInfo::describe(a, &settings.app_name))
            .collect();
        ToolbarInit {
            settings,
            actions,
            chrome: b.chrome(),
        }
    })
}

#[tauri::command]
pub async fn run_action(app: AppHandle, id: String) -> Result<(), String> {
    let action = BrowserAction::from_id(&id).ok_or_else(|| format!("unknown action '{}'", id))?;
    dispatch(&app, action)
}

#[tauri::command]
pub async fn urlbar_submitted(app: AppHandle, text: String) -> Result<(), String> {
    let outcome = with_browser(&app, |b| {
        b.set_urlbar_text(&text);
        b.navigate_to_url()
    })?;
    if let Err(e) = outcome {
        notifier(&app).warn(&e.to_string());
    }
    Ok(())
}

#[tauri::command]
pub async fn select_tab(app: AppHandle, index: usize) -> Result<(), String> {
    with_browser(&app, |b| {
        b.switch_active_tab(index);
    })
}

#[tauri::command]
pub async fn close_tab(app: AppHandle, index: usize) -> Result<(), String> {
    // Dropping the removed tab closes its webview.
    with_browser(&app, |b| drop(b.close_tab(index)))
}

#[tauri::command]
pub async fn tab_bar_double_clicked(app: AppHandle, index: Option<usize>) -> Result<(), String> {
    with_browser(&app, |b| {
        b.tab_bar_double_clicked(index);
    })
}

/// Sent by the page script once a document has loaded or its title changed.
#[tauri::command]
pub async fn page_reported(app: AppHandle, webview: Webview, title: String) -> Result<(), String> {
    let Some(tab) = tab_id_from_label(webview.label()) else {
        return Err(format!("'{}' is not a tab", webview.label()));
    };
    {
        let state = app.state::<AppState>();
        let mut browser = state.browser.lock().map_err(|e| e.to_string())?;
        if let Some(host) = browser.host_mut(tab) {
            host.record_title(title);
        }
    }
    app.state::<AppState>()
        .events
        .send(PageEvent::LoadFinished { tab })
        .map_err(|e| e.to_string())
}

/// Sent by the page script with the serialized document, tagged with the
/// request it answers.
#[tauri::command]
pub async fn page_exported(
    app: AppHandle,
    webview: Webview,
    request: ExportId,
    html: String,
) -> Result<(), String> {
    let Some(tab) = tab_id_from_label(webview.label()) else {
        return Err(format!("'{}' is not a tab", webview.label()));
    };
    let state = app.state::<AppState>();
    let mut browser = state.browser.lock().map_err(|e| e.to_string())?;
    if let Some(host) = browser.host_mut(tab) {
        host.finish_export(request, html);
    }
    Ok(())
}
