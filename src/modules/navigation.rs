// Pure navigation logic - no Tauri imports allowed.
// Turns URL-bar text into something a page host can navigate to.

use std::path::Path;

use url::Url;

use crate::error::{BrowserError, Result};

const DEFAULT_SCHEME: &str = "http";

/// Parses URL-bar input. Input without a scheme gets `http`.
///
/// Absolute local paths (what the URL bar shows after opening a file) become
/// `file://` URLs instead, so submitting them again loads the file for real.
pub fn parse_urlbar_input(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid(input));
    }

    if trimmed.contains("://") {
        return Url::parse(trimmed).map_err(|_| invalid(input));
    }

    let path = Path::new(trimmed);
    if path.is_absolute() {
        return Url::from_file_path(path).map_err(|_| invalid(input));
    }

    // "localhost:3000" parses with scheme "localhost"; that is a host and port.
    if !looks_like_host_port(trimmed) {
        if let Ok(url) = Url::parse(trimmed) {
            return Ok(url);
        }
    }

    let candidate = format!("{}://{}", DEFAULT_SCHEME, trimmed);
    match Url::parse(&candidate) {
        Ok(url) if url.host().is_some() => Ok(url),
        _ => Err(invalid(input)),
    }
}

/// `host:port` or `host:port/path`, with a numeric port.
fn looks_like_host_port(input: &str) -> bool {
    let Some((_, rest)) = input.split_once(':') else {
        return false;
    };
    let port = rest.split('/').next().unwrap_or_default();
    !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())
}

fn invalid(input: &str) -> BrowserError {
    BrowserError::InvalidUrl {
        input: input.to_string(),
    }
}
