// Toolbar and menu actions: one place for their ids, labels, icons and
// status-bar tips. The desktop shell builds its menus from this table.

use serde::{Deserialize, Serialize};

use crate::paths::{
    ICON_ABOUT, ICON_BACK, ICON_FORWARD, ICON_HOME, ICON_NEW_TAB, ICON_OPEN_FILE, ICON_PRINT,
    ICON_PROJECT_HOMEPAGE, ICON_RELOAD, ICON_SAVE_FILE, ICON_STOP,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserAction {
    Back,
    Forward,
    Reload,
    Home,
    Stop,
    NewTab,
    OpenFile,
    SaveFile,
    Print,
    About,
    ProjectHomepage,
}

impl BrowserAction {
    pub const ALL: [BrowserAction; 11] = [
        Self::Back,
        Self::Forward,
        Self::Reload,
        Self::Home,
        Self::Stop,
        Self::NewTab,
        Self::OpenFile,
        Self::SaveFile,
        Self::Print,
        Self::About,
        Self::ProjectHomepage,
    ];

    /// Actions on the navigation toolbar, in display order.
    pub const TOOLBAR: [BrowserAction; 5] =
        [Self::Back, Self::Forward, Self::Reload, Self::Home, Self::Stop];

    pub const FILE_MENU: [BrowserAction; 4] =
        [Self::NewTab, Self::OpenFile, Self::SaveFile, Self::Print];

    pub const HELP_MENU: [BrowserAction; 2] = [Self::About, Self::ProjectHomepage];

    /// Stable id used for menu items and toolbar commands.
    pub fn id(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Reload => "reload",
            Self::Home => "home",
            Self::Stop => "stop",
            Self::NewTab => "new_tab",
            Self::OpenFile => "open_file",
            Self::SaveFile => "save_file",
            Self::Print => "print",
            Self::About => "about",
            Self::ProjectHomepage => "project_homepage",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    pub fn label(self, app_name: &str) -> String {
        match self {
            Self::Back => "Back".to_string(),
            Self::Forward => "Forward".to_string(),
            Self::Reload => "Reload".to_string(),
            Self::Home => "Home".to_string(),
            Self::Stop => "Stop".to_string(),
            Self::NewTab => "New Tab".to_string(),
            Self::OpenFile => "Open file...".to_string(),
            Self::SaveFile => "Save Page As...".to_string(),
            Self::Print => "Print...".to_string(),
            Self::About => format!("About {}", app_name),
            Self::ProjectHomepage => format!("{} Homepage", app_name),
        }
    }

    pub fn status_tip(self, app_name: &str) -> String {
        match self {
            Self::Back => "Back to previous page".to_string(),
            Self::Forward => "Forward to next page".to_string(),
            Self::Reload => "Reload page".to_string(),
            Self::Home => "Go home".to_string(),
            Self::Stop => "Stop loading current page".to_string(),
            Self::NewTab => "Open a new tab".to_string(),
            Self::OpenFile => "Open from file".to_string(),
            Self::SaveFile => "Save current page to file".to_string(),
            Self::Print => "Print current page".to_string(),
            Self::About => format!("Find out more about {}", app_name),
            Self::ProjectHomepage => format!("Go to {} Homepage", app_name),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Back => ICON_BACK,
            Self::Forward => ICON_FORWARD,
            Self::Reload => ICON_RELOAD,
            Self::Home => ICON_HOME,
            Self::Stop => ICON_STOP,
            Self::NewTab => ICON_NEW_TAB,
            Self::OpenFile => ICON_OPEN_FILE,
            Self::SaveFile => ICON_SAVE_FILE,
            Self::Print => ICON_PRINT,
            Self::About => ICON_ABOUT,
            Self::ProjectHomepage => ICON_PROJECT_HOMEPAGE,
        }
    }

    /// Menu accelerator, where one exists.
    pub fn accelerator(self) -> Option<&'static str> {
        match self {
            Self::NewTab => Some("CmdOrCtrl+T"),
            Self::OpenFile => Some("CmdOrCtrl+O"),
            Self::SaveFile => Some("CmdOrCtrl+S"),
            Self::Print => Some("CmdOrCtrl+P"),
            Self::Reload => Some("CmdOrCtrl+R"),
            _ => None,
        }
    }
}

/// Serializable description of an action for the toolbar page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionInfo {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub status_tip: String,
}

impl ActionInfo {
    pub fn describe(action: BrowserAction, app_name: &str) -> Self {
        Self {
            id: action.id().to_string(),
            label: action.label(app_name),
            icon: action.icon().to_string(),
            status_tip: action.status_tip(app_name),
        }
    }
}
