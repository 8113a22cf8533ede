// Native File and Help menus, built from the action table.

use tauri::image::Image;
use tauri::menu::{
    AboutMetadataBuilder, IconMenuItemBuilder, Menu, MenuBuilder, MenuItemBuilder,
    PredefinedMenuItem, SubmenuBuilder,
};
use tauri::{AppHandle, Wry};

use crate::modules::about::AboutInfo;
use crate::modules::actions::BrowserAction;
use crate::paths::Assets;
use crate::settings::Settings;

use super::commands::dispatch;

pub fn build(app: &AppHandle, settings: &Settings, assets: &Assets) -> tauri::Result<Menu<Wry>> {
    let mut file_menu = SubmenuBuilder::new(app, "&File");
    for action in BrowserAction::FILE_MENU {
        file_menu = add_action(app, file_menu, action, settings, assets)?;
    }
    let file_menu = file_menu.build()?;

    // About uses the native item so the dialog gets the logo.
    let about = AboutInfo::new(assets);
    let metadata = AboutMetadataBuilder::new()
        .name(Some(about.title.clone()))
        .version(Some(about.version_number().to_string()))
        .copyright(Some(about.copyright.clone()))
        .icon(Image::from_path(&about.logo).ok())
        .build();
    let help_menu = SubmenuBuilder::new(app, "&Help")
        .item(&PredefinedMenuItem::about(
            app,
            Some(BrowserAction::About.label(&settings.app_name).as_str()),
            Some(metadata),
        )?);
    let help_menu = add_action(app, help_menu, BrowserAction::ProjectHomepage, settings, assets)?
        .build()?;

    MenuBuilder::new(app).items(&[&file_menu, &help_menu]).build()
}

fn add_action<'a>(
    app: &'a AppHandle,
    menu: SubmenuBuilder<'a, Wry, AppHandle>,
    action: BrowserAction,
    settings: &Settings,
    assets: &Assets,
) -> tauri::Result<SubmenuBuilder<'a, Wry, AppHandle>> {
    let label = action.label(&settings.app_name);

    // Missing icon files only cost the icon.
    if let Ok(icon) = Image::from_path(assets.icon(action.icon())) {
        let mut item = IconMenuItemBuilder::with_id(action.id(), label).icon(icon);
        if let Some(accelerator) = action.accelerator() {
            item = item.accelerator(accelerator);
        }
        return Ok(menu.item(&item.build(app)?));
    }

    let mut item = MenuItemBuilder::with_id(action.id(), label);
    if let Some(accelerator) = action.accelerator() {
        item = item.accelerator(accelerator);
    }
    Ok(menu.item(&item.build(app)?))
}

pub fn on_event(app: &AppHandle, id: &str) {
    let Some(action) = BrowserAction::from_id(id) else {
        return;
    };
    let app = app.clone();
    // File prompts block, so keep them off the main thread and the async workers.
    tauri::async_runtime::spawn_blocking(move || {
        if let Err(e) = dispatch(&app, action) {
            log::warn!("[Shell] Menu action {} failed: {}", action.id(), e);
        }
    });
}
