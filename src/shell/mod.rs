// Desktop shell: the main window, its toolbar page and one child webview per tab.
//
// Threading: once the event loop runs, the tab manager is only locked from
// async-runtime tasks (commands, the event pump, menu actions). The main
// thread never takes the lock, so webview calls made while holding it cannot
// deadlock against the event loop.

pub mod commands;
pub mod dialogs;
pub mod menu;
pub mod webview_host;

use std::sync::Mutex;

use tauri::image::Image;
use tauri::{
    AppHandle, Emitter, LogicalSize, Manager, Position, Rect, Size, Window,
    WindowEvent, Wry,
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::modules::tabs::TabManager;
use crate::page_host::PageEvent;
use crate::paths::{Assets, ICON_WINDOW};
use crate::settings::Settings;

use self::webview_host::{is_tab_label, ContentBounds, WebviewHost};

pub type Browser = TabManager<WebviewHost<Wry>>;

pub const MAIN_WINDOW: &str = "main";
pub const CHROME_EVENT: &str = "chrome-state";

pub struct AppState {
    pub browser: Mutex<Browser>,
    pub events: UnboundedSender<PageEvent>,
    pub assets: Assets,
}

/// Locks the tab manager, runs `f`, then pushes the resulting chrome state to
/// the window and the toolbar page.
pub fn with_browser<T>(app: &AppHandle, f: impl FnOnce(&mut Browser) -> T) -> Result<T, String> {
    let state = app.state::<AppState>();
    let mut browser = state.browser.lock().map_err(|e| e.to_string())?;
    let result = f(&mut browser);
    publish(app, &browser);
    Ok(result)
}

/// Shows the active tab's webview, hides the rest, and syncs title and toolbar.
pub fn publish(app: &AppHandle, browser: &Browser) {
    for (index, tab) in browser.tabs().iter().enumerate() {
        tab.host.set_visible(index == browser.active_index());
    }
    if let Some(window) = app.get_window(MAIN_WINDOW) {
        let _ = window.set_title(browser.window_title());
    }
    if let Err(e) = app.emit(CHROME_EVENT, browser.chrome()) {
        log::warn!("[Shell] Failed to emit chrome state: {}", e);
    }
}

fn content_bounds(window: &Window, toolbar_height: f64) -> ContentBounds {
    let scale = window.scale_factor().unwrap_or(1.0);
    let size = window
        .inner_size()
        .map(|s| s.to_logical::<f64>(scale))
        .unwrap_or(LogicalSize::new(1024.0, 768.0));
    ContentBounds {
        toolbar_height,
        width: size.width,
        height: size.height,
    }
}

/// Applies page events one at a time, in the order the engine reported them.
fn spawn_event_pump(app: AppHandle, mut events: UnboundedReceiver<PageEvent>) {
    tauri::async_runtime::spawn(async move {
        while let Some(event) = events.recv().await {
            let state = app.state::<AppState>();
            let Ok(mut browser) = state.browser.lock() else {
                log::error!("[Shell] Tab state poisoned, dropping {:?}", event);
                continue;
            };
            if let PageEvent::UrlChanged { tab, url } = &event {
                if let Some(host) = browser.host_mut(*tab) {
                    host.record_url(url.clone());
                }
            }
            browser.handle_event(event);
            publish(&app, &browser);
        }
    });
}

fn resize_tabs(app: &AppHandle, window: &Window, toolbar_height: f64) {
    let bounds = content_bounds(window, toolbar_height);
    for (label, webview) in app.webviews() {
        if !is_tab_label(&label) {
            continue;
        }
        let _ = webview.set_bounds(Rect {
            position: Position::Logical(bounds.position()),
            size: Size::Logical(bounds.size()),
        });
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let settings = Settings::default();
            let assets = Assets::locate();
            log::info!("[Shell] Assets at {}", assets.base().display());

            let window = app
                .get_window(MAIN_WINDOW)
                .ok_or("main window is missing from tauri.conf.json")?;
            match Image::from_path(assets.icon(ICON_WINDOW)) {
                Ok(icon) => {
                    let _ = window.set_icon(icon);
                }
                Err(e) => log::warn!("[Shell] Window icon unavailable: {}", e),
            }

            let app_menu = menu::build(app.handle(), &settings, &assets)?;
            app.set_menu(app_menu)?;
            app.on_menu_event(|app, event| menu::on_event(app, event.id().0.as_str()));

            let (events, pump) = unbounded_channel();
            let toolbar_height = settings.toolbar_height;
            let factory_window = window.clone();
            let factory_events = events.clone();
            let browser = TabManager::new(settings, move |id| {
                let bounds = content_bounds(&factory_window, toolbar_height);
                WebviewHost::create(&factory_window, id, bounds, factory_events.clone())
            });

            app.manage(AppState {
                browser: Mutex::new(browser),
                events,
                assets,
            });
            spawn_event_pump(app.handle().clone(), pump);

            let handle = app.handle().clone();
            let resized_window = window.clone();
            window.on_window_event(move |event| {
                if let WindowEvent::Resized(_) = event {
                    resize_tabs(&handle, &resized_window, toolbar_height);
                }
            });

            let state = app.state::<AppState>();
            let browser = state.browser.lock().map_err(|e| e.to_string())?;
            publish(app.handle(), &browser);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::toolbar_ready,
            commands::run_action,
            commands::urlbar_submitted,
            commands::select_tab,
            commands::close_tab,
            commands::tab_bar_double_clicked,
            commands::page_reported,
            commands::page_exported,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
