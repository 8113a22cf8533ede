// Mozzarella Ashbadger library entry point.
// Exposes the tab/file/navigation logic so it can be tested without a window;
// the desktop shell lives behind the `desktop` feature.

pub mod error;
pub mod page_host;
pub mod paths;
pub mod settings;

// Shared state
pub mod state;

// Pure logic modules (no Tauri imports)
pub mod modules;

#[cfg(feature = "desktop")]
pub mod shell;

#[cfg(feature = "desktop")]
pub use shell::run;

#[cfg(test)]
pub(crate) mod test_support;
