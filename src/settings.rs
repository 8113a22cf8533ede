use serde::{Deserialize, Serialize};
use url::Url;

pub const APP_NAME: &str = "Mozzarella Ashbadger";

/// Application-wide settings. Compiled-in defaults only; nothing is read from
/// or written to disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub app_name: String,
    pub homepage: String,
    pub project_homepage: String,
    /// Label shown on a tab until its first page finishes loading.
    pub new_tab_label: String,
    pub startup_tab_label: String,
    pub window_width: f64,
    pub window_height: f64,
    pub toolbar_height: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            homepage: "http://www.google.com".to_string(),
            project_homepage: "https://academy.pythonguis.com/".to_string(),
            new_tab_label: "https://www.google.com".to_string(),
            startup_tab_label: "Homepage".to_string(),
            window_width: 1024.0,
            window_height: 768.0,
            toolbar_height: 84.0,
        }
    }
}

impl Settings {
    pub fn homepage_url(&self) -> Option<Url> {
        parse_configured(&self.homepage)
    }

    pub fn project_homepage_url(&self) -> Option<Url> {
        parse_configured(&self.project_homepage)
    }
}

fn parse_configured(raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("[Settings] Ignoring invalid configured URL '{}': {}", raw, e);
            None
        }
    }
}
