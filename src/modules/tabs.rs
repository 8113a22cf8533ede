// Tab manager - pure logic, generic over the page host.
// Owns the tabs, the active selection and the chrome state (URL bar, security
// indicator, window title), and turns user actions and page events into
// page host calls and chrome updates.

use url::Url;

use crate::error::Result;
use crate::modules::actions::BrowserAction;
use crate::modules::navigation::parse_urlbar_input;
use crate::page_host::{PageEvent, PageHost, PrintPrompt, Printer};
use crate::settings::Settings;
use crate::state::{ChromeState, LoadState, SecurityIndicator, Tab, TabId, TabSummary, UrlBar};

/// Builds the page host for a newly opened tab.
pub type HostFactory<H> = Box<dyn FnMut(TabId) -> H + Send>;

pub struct TabManager<H: PageHost> {
    settings: Settings,
    factory: HostFactory<H>,
    tabs: Vec<Tab<H>>,
    active: usize,
    next_id: u64,
    urlbar: UrlBar,
    security: SecurityIndicator,
    window_title: String,
    printer: Printer,
}

impl<H: PageHost> TabManager<H> {
    /// Creates the manager with its startup tab already open on the homepage.
    pub fn new(settings: Settings, factory: impl FnMut(TabId) -> H + Send + 'static) -> Self {
        let window_title = settings.app_name.clone();
        let mut manager = Self {
            settings,
            factory: Box::new(factory),
            tabs: Vec::new(),
            active: 0,
            next_id: 1,
            urlbar: UrlBar::default(),
            security: SecurityIndicator::default(),
            window_title,
            printer: Printer::default(),
        };

        let home = manager.settings.homepage_url();
        let label = manager.settings.startup_tab_label.clone();
        manager.add_new_tab(home, Some(&label));
        manager
    }

    // --- Accessors ---

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tabs(&self) -> &[Tab<H>] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Never true outside `new`.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> &Tab<H> {
        &self.tabs[self.active]
    }

    pub fn active_id(&self) -> TabId {
        self.tabs[self.active].id
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab<H>> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn host_mut(&mut self, id: TabId) -> Option<&mut H> {
        self.tabs.iter_mut().find(|t| t.id == id).map(|t| &mut t.host)
    }

    pub fn active_host_mut(&mut self) -> &mut H {
        &mut self.tabs[self.active].host
    }

    pub fn urlbar(&self) -> &UrlBar {
        &self.urlbar
    }

    pub fn security(&self) -> SecurityIndicator {
        self.security
    }

    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    pub fn printer(&self) -> &Printer {
        &self.printer
    }

    pub fn chrome(&self) -> ChromeState {
        ChromeState {
            tabs: self
                .tabs
                .iter()
                .map(|t| TabSummary {
                    id: t.id,
                    label: t.label.clone(),
                    load_state: t.load_state,
                })
                .collect(),
            active_index: self.active,
            urlbar: self.urlbar.clone(),
            security: self.security,
            security_icon: self.security.icon().to_string(),
            window_title: self.window_title.clone(),
        }
    }

    // --- Tab lifecycle ---

    /// Opens a tab and makes it active. Without `url` the page stays blank.
    pub fn add_new_tab(&mut self, url: Option<Url>, label: Option<&str>) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;

        let mut host = (self.factory)(id);
        let load_state = match &url {
            Some(url) => {
                host.navigate(url);
                LoadState::Loading
            }
            None => LoadState::Loaded,
        };

        let label = label.unwrap_or(&self.settings.new_tab_label).to_string();
        log::info!("[Tabs] Opened tab {} '{}' at {:?}", id, label, url.as_ref().map(Url::as_str));

        self.tabs.push(Tab {
            id,
            host,
            label,
            load_state,
        });
        self.switch_active_tab(self.tabs.len() - 1);
        id
    }

    /// Double-click on the tab bar. `index` is the tab under the pointer, if any;
    /// only a click on empty space opens a tab.
    pub fn tab_bar_double_clicked(&mut self, index: Option<usize>) -> Option<TabId> {
        match index {
            None => Some(self.add_new_tab(None, None)),
            Some(_) => None,
        }
    }

    /// Returns `false` for an index that does not name a tab.
    pub fn switch_active_tab(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            log::debug!("[Tabs] Ignoring switch to missing index {}", index);
            return false;
        }
        self.active = index;
        self.sync_chrome_from_active();
        true
    }

    /// Removes the tab at `index`. The last remaining tab is never closed.
    pub fn close_tab(&mut self, index: usize) -> Option<Tab<H>> {
        if self.tabs.len() < 2 {
            log::debug!("[Tabs] Refusing to close the last tab");
            return None;
        }
        if index >= self.tabs.len() {
            return None;
        }

        let removed = self.tabs.remove(index);
        log::info!("[Tabs] Closed tab {} '{}'", removed.id, removed.label);

        if index < self.active {
            // Same tab stays active, one position to the left.
            self.active -= 1;
        } else if index == self.active {
            self.active = index.min(self.tabs.len() - 1);
            self.sync_chrome_from_active();
        }
        Some(removed)
    }

    // --- Navigation on the active tab ---

    pub fn back(&mut self) {
        self.active_host_mut().back();
    }

    pub fn forward(&mut self) {
        self.active_host_mut().forward();
    }

    pub fn reload(&mut self) {
        self.active_host_mut().reload();
    }

    pub fn stop(&mut self) {
        self.active_host_mut().stop();
    }

    pub fn navigate_home(&mut self) {
        if let Some(url) = self.settings.homepage_url() {
            self.navigate_active(&url);
        }
    }

    pub fn navigate_project_homepage(&mut self) {
        if let Some(url) = self.settings.project_homepage_url() {
            self.navigate_active(&url);
        }
    }

    /// Records what the user typed into the URL bar.
    pub fn set_urlbar_text(&mut self, text: &str) {
        self.urlbar.type_text(text);
    }

    /// Shows `text` in the URL bar without navigating, e.g. the path of a file
    /// loaded with `set_html`.
    pub fn show_in_urlbar(&mut self, text: impl Into<String>) {
        self.urlbar.show(text);
    }

    /// Navigates the active tab to the URL-bar text, assuming `http` when no
    /// scheme was typed.
    pub fn navigate_to_url(&mut self) -> Result<Url> {
        let url = parse_urlbar_input(&self.urlbar.text).map_err(|e| {
            log::warn!("[Tabs] {}", e);
            e
        })?;
        self.navigate_active(&url);
        Ok(url)
    }

    fn navigate_active(&mut self, url: &Url) {
        let tab = &mut self.tabs[self.active];
        log::debug!("[Tabs] Tab {} navigating to {}", tab.id, url);
        tab.host.navigate(url);
        tab.load_state = LoadState::Loading;
    }

    /// Shows `url` in the URL bar if `tab` is the active tab.
    pub fn update_urlbar(&mut self, url: &Url, tab: TabId) {
        if tab != self.active_id() {
            return;
        }
        self.security = SecurityIndicator::for_url(url);
        self.urlbar.show(url.as_str());
    }

    /// Sets the window title from `tab`'s page title if it is the active tab.
    pub fn update_title(&mut self, tab: TabId) {
        if tab != self.active_id() {
            return;
        }
        let title = self.active_tab().host.current_title();
        self.window_title = if title.is_empty() {
            self.settings.app_name.clone()
        } else {
            format!("{} - {}", title, self.settings.app_name)
        };
    }

    fn sync_chrome_from_active(&mut self) {
        let id = self.active_id();
        let current = self.active_tab().host.current_url();
        match current {
            Some(url) => self.update_urlbar(&url, id),
            None => {
                self.security = SecurityIndicator::Insecure;
                self.urlbar.show("");
            }
        }
        self.update_title(id);
    }

    // --- Page events ---

    pub fn handle_event(&mut self, event: PageEvent) {
        let id = event.tab();
        let Some(index) = self.index_of(id) else {
            log::debug!("[Tabs] Dropping event for closed tab {}: {:?}", id, event);
            return;
        };

        match event {
            PageEvent::UrlChanged { url, .. } => self.update_urlbar(&url, id),
            PageEvent::LoadStarted { .. } => {
                self.tabs[index].load_state = LoadState::Loading;
            }
            PageEvent::LoadFinished { .. } => {
                let tab = &mut self.tabs[index];
                tab.load_state = LoadState::Loaded;
                let title = tab.host.current_title();
                if !title.is_empty() {
                    tab.label = title;
                } else if let Some(url) = tab.host.current_url() {
                    tab.label = url.to_string();
                }
                self.update_title(id);
            }
        }
    }

    // --- Printing ---

    /// Returns `true` when the page was sent to the printer.
    pub fn print_current_page(&mut self, prompt: &mut impl PrintPrompt) -> bool {
        if !prompt.confirm(&mut self.printer) {
            log::debug!("[Tabs] Print cancelled");
            return false;
        }
        let printer = self.printer.clone();
        self.active_host_mut().print(&printer);
        log::info!("[Tabs] Printing tab {}", self.active_id());
        true
    }

    /// Runs an action that needs nothing beyond the tabs themselves.
    /// Returns `false` for actions that need a dialog or file access; the
    /// shell handles those.
    pub fn perform(&mut self, action: BrowserAction) -> bool {
        match action {
            BrowserAction::Back => self.back(),
            BrowserAction::Forward => self.forward(),
            BrowserAction::Reload => self.reload(),
            BrowserAction::Home => self.navigate_home(),
            BrowserAction::Stop => self.stop(),
            BrowserAction::NewTab => {
                self.add_new_tab(None, None);
            }
            BrowserAction::ProjectHomepage => self.navigate_project_homepage(),
            BrowserAction::OpenFile
            | BrowserAction::SaveFile
            | BrowserAction::Print
            | BrowserAction::About => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fake_manager, HostCall, ScriptedPrintPrompt};

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_starts_with_homepage_tab() {
        let manager = fake_manager();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.active_index(), 0);
        let tab = manager.active_tab();
        assert_eq!(tab.label, "Homepage");
        assert_eq!(tab.load_state, LoadState::Loading);
        assert_eq!(tab.host.calls, vec![HostCall::Navigate(url("http://www.google.com/"))]);
        assert_eq!(manager.urlbar().text, "http://www.google.com/");
        assert_eq!(manager.urlbar().cursor, 0);
        assert_eq!(manager.security(), SecurityIndicator::Insecure);
    }

    #[test]
    fn test_new_tab_is_blank_and_active() {
        let mut manager = fake_manager();
        manager.set_urlbar_text("typed");
        let id = manager.add_new_tab(None, None);

        assert_eq!(manager.len(), 2);
        assert_eq!(manager.active_id(), id);
        let tab = manager.active_tab();
        assert_eq!(tab.label, "https://www.google.com");
        assert!(tab.host.calls.is_empty());
        assert_eq!(manager.urlbar().text, "");
        assert_eq!(manager.window_title(), "Mozzarella Ashbadger");
    }

    #[test]
    fn test_tab_ids_are_never_reused() {
        let mut manager = fake_manager();
        let second = manager.add_new_tab(None, None);
        manager.close_tab(1);
        let third = manager.add_new_tab(None, None);
        assert_ne!(second, third);
    }

    #[test]
    fn test_add_and_close_scenario() {
        let mut manager = fake_manager();
        manager.add_new_tab(None, None);
        manager.add_new_tab(None, None);
        assert_eq!(manager.len(), 3);
        assert_eq!(manager.active_index(), 2);

        assert!(manager.close_tab(2).is_some());
        assert_eq!(manager.len(), 2);
        assert!(manager.active_index() < manager.len());

        assert!(manager.close_tab(0).is_some());
        assert!(manager.close_tab(0).is_none());
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.active_index(), 0);
    }

    #[test]
    fn test_closing_only_tab_changes_nothing() {
        let mut manager = fake_manager();
        let before = manager.chrome();
        assert!(manager.close_tab(0).is_none());
        assert_eq!(manager.chrome(), before);
    }

    #[test]
    fn test_tab_count_never_drops_below_one() {
        let mut manager = fake_manager();
        // Deterministic mixed sequence of opens and closes at varying positions.
        for step in 0..60usize {
            if step % 3 == 0 {
                manager.add_new_tab(None, None);
            } else {
                let index = (step * 7) % (manager.len() + 1);
                manager.close_tab(index);
            }
            assert!(manager.len() >= 1);
            assert!(manager.active_index() < manager.len());
        }
    }

    #[test]
    fn test_close_before_active_keeps_same_tab_active() {
        let mut manager = fake_manager();
        manager.add_new_tab(None, None);
        let third = manager.add_new_tab(None, None);

        manager.close_tab(0);
        assert_eq!(manager.active_id(), third);
        assert_eq!(manager.active_index(), 1);
    }

    #[test]
    fn test_close_active_selects_right_neighbour() {
        let mut manager = fake_manager();
        let second = manager.add_new_tab(Some(url("https://second.example")), None);
        let third = manager.add_new_tab(None, None);
        manager.switch_active_tab(0);

        let first = manager.active_id();
        manager.close_tab(0);
        assert_eq!(manager.active_id(), second);
        assert_eq!(manager.urlbar().text, "https://second.example/");
        assert_eq!(manager.security(), SecurityIndicator::Secure);
        assert!(manager.tab(first).is_none());
        assert!(manager.tab(third).is_some());
    }

    #[test]
    fn test_close_out_of_range_is_noop() {
        let mut manager = fake_manager();
        manager.add_new_tab(None, None);
        assert!(manager.close_tab(5).is_none());
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_double_click_only_on_empty_space() {
        let mut manager = fake_manager();
        assert!(manager.tab_bar_double_clicked(Some(0)).is_none());
        assert_eq!(manager.len(), 1);
        assert!(manager.tab_bar_double_clicked(None).is_some());
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.active_index(), 1);
    }

    #[test]
    fn test_switch_updates_chrome_from_host() {
        let mut manager = fake_manager();
        let first = manager.active_id();
        manager.host_mut(first).unwrap().title = "Google".to_string();
        manager.add_new_tab(Some(url("https://rust-lang.org")), None);

        assert!(manager.switch_active_tab(0));
        assert_eq!(manager.urlbar().text, "http://www.google.com/");
        assert_eq!(manager.security(), SecurityIndicator::Insecure);
        assert_eq!(manager.window_title(), "Google - Mozzarella Ashbadger");

        assert!(!manager.switch_active_tab(9));
        assert_eq!(manager.active_index(), 0);
    }

    #[test]
    fn test_navigate_to_url_defaults_to_http() {
        let mut manager = fake_manager();
        manager.set_urlbar_text("example.com");
        let navigated = manager.navigate_to_url().unwrap();

        assert_eq!(navigated.scheme(), "http");
        assert_eq!(navigated.host_str(), Some("example.com"));
        assert_eq!(
            manager.active_tab().host.calls.last(),
            Some(&HostCall::Navigate(url("http://example.com/")))
        );
    }

    #[test]
    fn test_navigate_to_url_keeps_https() {
        let mut manager = fake_manager();
        manager.set_urlbar_text("https://example.com");
        manager.navigate_to_url().unwrap();
        let last = manager.active_tab().host.calls.last().cloned();
        match last {
            Some(HostCall::Navigate(u)) => {
                assert_eq!(u.scheme(), "https");
                assert_eq!(u.host_str(), Some("example.com"));
            }
            other => panic!("expected navigate, got {:?}", other),
        }
    }

    #[test]
    fn test_navigate_to_invalid_input_does_not_navigate() {
        let mut manager = fake_manager();
        manager.set_urlbar_text("hello world");
        let calls_before = manager.active_tab().host.calls.len();
        assert!(manager.navigate_to_url().is_err());
        assert_eq!(manager.active_tab().host.calls.len(), calls_before);
    }

    #[test]
    fn test_update_urlbar_ignores_inactive_tab() {
        let mut manager = fake_manager();
        let background = manager.active_id();
        manager.add_new_tab(None, None);
        manager.set_urlbar_text("typing in progress");
        let before = manager.urlbar().clone();

        manager.update_urlbar(&url("https://elsewhere.example"), background);
        manager.update_urlbar(&url("https://elsewhere.example"), background);
        assert_eq!(manager.urlbar(), &before);
        assert_eq!(manager.security(), SecurityIndicator::Insecure);
    }

    #[rstest::rstest]
    #[case("https://example.com", SecurityIndicator::Secure)]
    #[case("http://example.com", SecurityIndicator::Insecure)]
    #[case("ftp://example.com", SecurityIndicator::Insecure)]
    #[case("file:///tmp/a.html", SecurityIndicator::Insecure)]
    fn test_update_urlbar_sets_indicator(#[case] raw: &str, #[case] expected: SecurityIndicator) {
        let mut manager = fake_manager();
        let id = manager.active_id();
        manager.set_urlbar_text("something");
        manager.update_urlbar(&url(raw), id);
        assert_eq!(manager.security(), expected);
        assert_eq!(manager.urlbar().text, url(raw).as_str());
        assert_eq!(manager.urlbar().cursor, 0);
    }

    #[test]
    fn test_update_title_ignores_inactive_tab() {
        let mut manager = fake_manager();
        let background = manager.active_id();
        manager.host_mut(background).unwrap().title = "Background".to_string();
        manager.add_new_tab(None, None);

        manager.update_title(background);
        assert_eq!(manager.window_title(), "Mozzarella Ashbadger");
    }

    #[test]
    fn test_load_finished_updates_label_of_any_tab() {
        let mut manager = fake_manager();
        let background = manager.active_id();
        manager.add_new_tab(None, None);
        manager.host_mut(background).unwrap().title = "Google".to_string();

        manager.handle_event(PageEvent::LoadFinished { tab: background });
        let tab = manager.tab(background).unwrap();
        assert_eq!(tab.label, "Google");
        assert_eq!(tab.load_state, LoadState::Loaded);
        // Background tab does not touch the window title.
        assert_eq!(manager.window_title(), "Mozzarella Ashbadger");
    }

    #[test]
    fn test_load_finished_on_active_tab_updates_window_title() {
        let mut manager = fake_manager();
        let id = manager.active_id();
        manager.host_mut(id).unwrap().title = "Search".to_string();
        manager.handle_event(PageEvent::LoadFinished { tab: id });
        assert_eq!(manager.window_title(), "Search - Mozzarella Ashbadger");
        assert_eq!(manager.chrome().tabs[0].label, "Search");
    }

    #[test]
    fn test_url_changed_event_only_for_active_tab() {
        let mut manager = fake_manager();
        let background = manager.active_id();
        let active = manager.add_new_tab(None, None);

        manager.handle_event(PageEvent::UrlChanged {
            tab: background,
            url: url("https://background.example"),
        });
        assert_eq!(manager.urlbar().text, "");

        manager.handle_event(PageEvent::UrlChanged {
            tab: active,
            url: url("https://active.example/page"),
        });
        assert_eq!(manager.urlbar().text, "https://active.example/page");
        assert_eq!(manager.security(), SecurityIndicator::Secure);
    }

    #[test]
    fn test_events_for_closed_tabs_are_dropped() {
        let mut manager = fake_manager();
        let closed = manager.add_new_tab(None, None);
        manager.close_tab(1);
        let before = manager.chrome();

        manager.handle_event(PageEvent::UrlChanged {
            tab: closed,
            url: url("https://stale.example"),
        });
        manager.handle_event(PageEvent::LoadFinished { tab: closed });
        assert_eq!(manager.chrome(), before);
    }

    #[test]
    fn test_load_started_marks_loading() {
        let mut manager = fake_manager();
        let id = manager.add_new_tab(None, None);
        assert_eq!(manager.active_tab().load_state, LoadState::Loaded);
        manager.handle_event(PageEvent::LoadStarted { tab: id });
        assert_eq!(manager.active_tab().load_state, LoadState::Loading);
    }

    #[test]
    fn test_toolbar_actions_reach_active_host() {
        let mut manager = fake_manager();
        manager.add_new_tab(None, None);

        for action in [
            BrowserAction::Back,
            BrowserAction::Forward,
            BrowserAction::Reload,
            BrowserAction::Stop,
            BrowserAction::Home,
            BrowserAction::ProjectHomepage,
        ] {
            assert!(manager.perform(action));
        }
        assert_eq!(
            manager.active_tab().host.calls,
            vec![
                HostCall::Back,
                HostCall::Forward,
                HostCall::Reload,
                HostCall::Stop,
                HostCall::Navigate(url("http://www.google.com/")),
                HostCall::Navigate(url("https://academy.pythonguis.com/")),
            ]
        );
        // The background tab saw none of it.
        assert_eq!(manager.tabs()[0].host.calls.len(), 1);
    }

    #[test]
    fn test_dialog_actions_are_left_to_the_shell() {
        let mut manager = fake_manager();
        assert!(!manager.perform(BrowserAction::OpenFile));
        assert!(!manager.perform(BrowserAction::About));
        assert!(manager.perform(BrowserAction::NewTab));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_print_only_when_confirmed() {
        let mut manager = fake_manager();

        let mut cancel = ScriptedPrintPrompt::new(false, None);
        assert!(!manager.print_current_page(&mut cancel));
        assert!(!manager.active_tab().host.calls.contains(&HostCall::Print));

        let mut accept = ScriptedPrintPrompt::new(true, Some("Office"));
        assert!(manager.print_current_page(&mut accept));
        assert_eq!(manager.active_tab().host.calls.last(), Some(&HostCall::Print));
        assert_eq!(manager.printer().target.as_deref(), Some("Office"));
    }
}
