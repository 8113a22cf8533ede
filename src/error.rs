use std::path::PathBuf;

use crate::state::TabId;

/// Errors surfaced to the user as non-fatal warnings.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{input}' is not a valid address")]
    InvalidUrl { input: String },

    #[error("the page in tab {tab} cannot be exported")]
    ExportUnavailable { tab: TabId },
}

impl BrowserError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BrowserError>;
