// Icon and asset lookup. Pure path joining: a missing file shows up as a blank
// icon wherever it is used, never as an error here.

use std::path::{Path, PathBuf};

pub const ICON_BACK: &str = "arrow-180.png";
pub const ICON_FORWARD: &str = "arrow-000.png";
pub const ICON_RELOAD: &str = "arrow-circle-315.png";
pub const ICON_HOME: &str = "home.png";
pub const ICON_STOP: &str = "cross-circle.png";
pub const ICON_LOCK_SSL: &str = "lock-ssl.png";
pub const ICON_LOCK_NOSSL: &str = "lock-nossl.png";
pub const ICON_NEW_TAB: &str = "ui-tab--plus.png";
pub const ICON_OPEN_FILE: &str = "disk--arrow.png";
pub const ICON_SAVE_FILE: &str = "disk--pencil.png";
pub const ICON_PRINT: &str = "printer.png";
pub const ICON_ABOUT: &str = "question.png";
pub const ICON_PROJECT_HOMEPAGE: &str = "lifebuoy.png";
pub const ICON_WINDOW: &str = "ma-icon-64.png";
pub const ICON_LOGO: &str = "ma-icon-128.png";

const ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    base: PathBuf,
}

impl Assets {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// `assets/` next to the executable when installed, otherwise the source tree's copy.
    pub fn locate() -> Self {
        let installed = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(ASSETS_DIR)))
            .filter(|dir| dir.is_dir());

        match installed {
            Some(dir) => Self::new(dir),
            None => Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join(ASSETS_DIR)),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn icon(&self, filename: &str) -> PathBuf {
        self.base.join(filename)
    }
}
