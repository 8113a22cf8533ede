// Every app command must be granted by a capability: the toolbar gets its own
// commands, tab webviews only the two the page script calls.
#[cfg(feature = "desktop")]
const COMMANDS: &[&str] = &[
    "toolbar_ready",
    "run_action",
    "urlbar_submitted",
    "select_tab",
    "close_tab",
    "tab_bar_double_clicked",
    "page_reported",
    "page_exported",
];

fn main() {
    #[cfg(feature = "desktop")]
    tauri_build::try_build(
        tauri_build::Attributes::new()
            .app_manifest(tauri_build::AppManifest::new().commands(COMMANDS)),
    )
    .expect("failed to run tauri-build");
}
