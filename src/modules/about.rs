use std::path::PathBuf;

use serde::Serialize;

use crate::paths::{Assets, ICON_LOGO};

pub const ABOUT_TITLE: &str = "Web Browser Gui";
pub const VERSION_LINE: &str = "Version 23.35.211.233232";
pub const COPYRIGHT_LINE: &str = "Copyright 2015 Mozzarella Inc.";

/// Content of the About dialog. Every line is centre-aligned above a single
/// OK button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutInfo {
    pub title: String,
    pub logo: PathBuf,
    pub version: String,
    pub copyright: String,
}

impl AboutInfo {
    pub fn new(assets: &Assets) -> Self {
        Self {
            title: ABOUT_TITLE.to_string(),
            logo: assets.icon(ICON_LOGO),
            version: VERSION_LINE.to_string(),
            copyright: COPYRIGHT_LINE.to_string(),
        }
    }

    /// The text lines in display order, for dialogs that cannot show images.
    pub fn text_lines(&self) -> [&str; 3] {
        [&self.title, &self.version, &self.copyright]
    }

    /// Version number without the "Version " prefix.
    pub fn version_number(&self) -> &str {
        self.version.trim_start_matches("Version ").trim()
    }
}
