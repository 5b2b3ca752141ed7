use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::flows::{resolve_slot, Deferred};
use crate::navigation::{Navigator, SidebarItem, View};
use crate::orders::OrderBook;
use crate::session::{Credentials, Session};
use crate::types::Node;
use crate::ui::dialogs::HelpDialog;
use crate::ui::keybindings::status_hint;
use crate::ui::panels::{HeaderBar, Sidebar, StatusBar};
use crate::ui::screens::{
    AssetDetailsScreen, AssetDiscoveryScreen, CheckoutScreen, ClaimWizardScreen,
    DashboardScreen, LoginScreen, NodeExplorerScreen, NodeProfileScreen, OrderStatusScreen,
    OrdersScreen, PortfolioScreen, Screen, ScreenAction, SettingsScreen,
};
use crate::ui::terminal_guard::TerminalGuard;

const SIDEBAR_WIDTH: u16 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

pub struct App {
    config: Config,
    session: Session,
    catalog: Catalog,
    order_book: OrderBook,
    navigator: Navigator,
    screen: Box<dyn Screen>,
    login: LoginScreen,
    focus: Focus,
    sidebar: Sidebar,
    help_dialog: HelpDialog,
    /// Simulated login in flight
    pending_login: Option<Deferred<Credentials>>,
    /// Confirmed node claim waiting out its delay
    pending_claim: Option<Deferred<Node>>,
    status_message: Option<String>,
    log_file: Option<PathBuf>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, session: Session, start: View, log_file: Option<PathBuf>) -> Self {
        let catalog = Catalog::builtin();
        let order_book = OrderBook::seeded();
        let navigator = Navigator::new(start);
        let screen: Box<dyn Screen> = Box::new(DashboardScreen::new(&catalog));

        let mut app = Self {
            config,
            session,
            catalog,
            order_book,
            navigator,
            screen,
            login: LoginScreen::new(),
            focus: Focus::Content,
            sidebar: Sidebar::new(),
            help_dialog: HelpDialog::new(),
            pending_login: None,
            pending_claim: None,
            status_message: None,
            log_file,
            should_quit: false,
        };
        if *app.navigator.current() != View::Dashboard {
            app.screen = app.screen_for(app.navigator.current());
        }
        app
    }

    pub async fn run(&mut self) -> Result<()> {
        let guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.clear()?;

        let tick_rate = self.config.tick_rate();
        tracing::info!(
            view = %self.navigator.current().id(),
            authenticated = self.session.is_authenticated(),
            tick_ms = tick_rate.as_millis() as u64,
            "starting TUI"
        );

        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            self.tick(Instant::now());
        }

        guard.restore();
        tracing::info!("TUI closed");
        Ok(())
    }

    /// Build the screen that shows `view`, from the current data
    fn screen_for(&self, view: &View) -> Box<dyn Screen> {
        match view {
            View::Dashboard => Box::new(DashboardScreen::new(&self.catalog)),
            View::AssetDiscovery => Box::new(AssetDiscoveryScreen::new(&self.catalog)),
            View::NodeExplorer => Box::new(NodeExplorerScreen::new(&self.catalog)),
            View::AssetDetails(asset) => {
                Box::new(AssetDetailsScreen::new((**asset).clone(), &self.catalog))
            }
            View::NodeProfile(node) => {
                Box::new(NodeProfileScreen::new((**node).clone(), &self.catalog))
            }
            View::ManageAssets => Box::new(PortfolioScreen::new(&self.catalog)),
            View::Orders => Box::new(OrdersScreen::new(&self.order_book)),
            View::Settings => Box::new(SettingsScreen::new(
                &self.config,
                self.session.store().path().to_path_buf(),
                self.log_file.clone(),
            )),
            View::Checkout(seed) => Box::new(CheckoutScreen::new(seed.clone(), &self.config.flows)),
            View::OrderStatus(order) => Box::new(OrderStatusScreen::new((**order).clone())),
            View::NodeClaimWizard => Box::new(ClaimWizardScreen::new(self.config.flows.claim_delay())),
        }
    }

    fn navigate(&mut self, view: View) {
        self.screen = self.screen_for(&view);
        self.navigator.navigate(view);
        self.focus = Focus::Content;
    }

    /// Esc outside of a form: parent view, or the sidebar on top-level views
    fn go_back(&mut self) {
        if self.navigator.back() {
            self.screen = self.screen_for(self.navigator.current());
        } else {
            self.focus = Focus::Sidebar;
        }
    }

    fn logout(&mut self) {
        if let Err(err) = self.session.logout() {
            tracing::error!(error = %err, "failed to clear session");
            self.status_message = Some(format!("Logout failed: {err}"));
            return;
        }
        self.pending_login = None;
        self.login = LoginScreen::new();
        self.navigator = Navigator::default();
        self.navigate(View::Dashboard);
        self.status_message = Some("Signed out".to_string());
    }

    /// Resolve simulated requests whose delay has elapsed
    pub fn tick(&mut self, now: Instant) {
        if let Some(credentials) = resolve_slot(&mut self.pending_login, now) {
            self.login.set_pending(false);
            match self.session.complete_login(&credentials) {
                Ok(()) => {
                    self.login = LoginScreen::new();
                    self.status_message = Some(format!("Signed in with {}", credentials.kind()));
                }
                Err(err) => {
                    tracing::error!(error = %err, "failed to store session");
                    self.status_message = Some(format!("Sign in failed: {err}"));
                }
            }
        }

        if let Some(node) = resolve_slot(&mut self.pending_claim, now) {
            self.status_message = Some(format!("Node {} claimed", node.alias));
            let view = View::node_profile(node.clone());
            self.catalog.add_node(node);
            self.navigate(view);
        }
    }

    fn apply(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::Back => self.go_back(),
            ScreenAction::Navigate(view) => self.navigate(view),
            ScreenAction::Login(credentials) => {
                let pending = self
                    .session
                    .begin_login(credentials, self.config.flows.login_delay());
                self.pending_login = Some(pending);
                self.login.set_pending(true);
            }
            ScreenAction::ClaimConfirmed(pending) => {
                self.pending_claim = Some(pending);
            }
            ScreenAction::OrderPlaced(order) => {
                self.status_message = Some(format!("Order {} placed", order.id));
                self.order_book.push(order);
            }
            ScreenAction::SaveConfig(config) => {
                let config = *config;
                match config.save() {
                    Ok(path) => {
                        tracing::info!(path = %path.display(), "config saved");
                        self.status_message = Some(format!("Saved {}", path.display()));
                        self.config = config;
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to save config");
                        self.status_message = Some(format!("Save failed: {err:#}"));
                    }
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        // Any key closes help
        if self.help_dialog.visible {
            self.help_dialog.visible = false;
            return;
        }

        if !self.session.is_authenticated() {
            let action = self.login.handle_key(key);
            self.apply(action);
            return;
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::Content => self.handle_content_key(key),
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.help_dialog.toggle(),
            KeyCode::Char('c') => self.navigate(View::NodeClaimWizard),
            KeyCode::Down | KeyCode::Char('j') => self.navigator.sidebar_next(),
            KeyCode::Up | KeyCode::Char('k') => self.navigator.sidebar_prev(),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') | KeyCode::Esc => {
                self.focus = Focus::Content
            }
            KeyCode::Enter => match self.navigator.sidebar_selected() {
                SidebarItem::Go(id) => match View::from_id(id) {
                    Ok(view) => self.navigate(view),
                    Err(err) => tracing::warn!(error = %err, "sidebar entry needs a payload"),
                },
                SidebarItem::ClaimNode => self.navigate(View::NodeClaimWizard),
                SidebarItem::Logout => self.logout(),
            },
            _ => {}
        }
    }

    fn handle_content_key(&mut self, key: KeyCode) {
        if self.screen.captures_input() {
            let action = self.screen.handle_key(key);
            self.apply(action);
            return;
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.help_dialog.toggle(),
            KeyCode::Char('c') => self.navigate(View::NodeClaimWizard),
            KeyCode::Tab => self.focus = Focus::Sidebar,
            KeyCode::Esc => self.go_back(),
            other => {
                let action = self.screen.handle_key(other);
                self.apply(action);
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(frame.area());

        let authenticated = self.session.is_authenticated();
        let view_label = if authenticated {
            self.navigator.current().id().label()
        } else {
            "Sign in"
        };
        let now = Instant::now();
        let pending = if let Some(login) = &self.pending_login {
            Some(pending_label("Signing in", login.remaining(now)))
        } else {
            self.pending_claim
                .as_ref()
                .map(|claim| pending_label("Claiming node", claim.remaining(now)))
        };
        HeaderBar {
            version: env!("CARGO_PKG_VERSION"),
            view_label,
            pending: pending.as_deref(),
        }
        .render(frame, chunks[0]);

        let context = if authenticated {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(chunks[1]);
            self.sidebar.render(
                frame,
                body[0],
                self.navigator.sidebar_index(),
                self.focus == Focus::Sidebar,
            );
            self.screen
                .render(frame, body[1], self.focus == Focus::Content);
            self.screen.context()
        } else {
            self.login.render(frame, chunks[1], true);
            self.login.context()
        };

        let hint = status_hint(context);
        StatusBar {
            message: self.status_message.as_deref(),
            hint: &hint,
        }
        .render(frame, chunks[2]);

        self.help_dialog.render(frame);
    }
}

/// Header text for an in-flight request, `Claiming node… 1.5s`
fn pending_label(action: &str, remaining: Duration) -> String {
    format!("{action}… {:.1}s", remaining.as_secs_f32())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    use super::*;
    use crate::flows::CheckoutSeed;
    use crate::navigation::ViewId;

    fn app(dir: &TempDir, signed_in: bool) -> App {
        let mut session = Session::open(dir.path()).unwrap();
        if signed_in {
            session
                .complete_login(&Credentials::Node {
                    node_id: "02abc".to_string(),
                })
                .unwrap();
        }
        App::new(Config::default(), session, View::Dashboard, None)
    }

    fn later() -> Instant {
        Instant::now() + Duration::from_secs(3600)
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_login_completes_after_delay() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, false);
        assert!(screen_text(&mut app).contains("Sign in"));

        app.apply(ScreenAction::Login(Credentials::Node {
            node_id: "02abc".to_string(),
        }));
        assert!(app.login.is_pending());
        app.tick(Instant::now());
        assert!(!app.session.is_authenticated());

        app.tick(later());
        assert!(app.session.is_authenticated());
        assert!(app.pending_login.is_none());

        let reopened = Session::open(dir.path()).unwrap();
        assert!(reopened.is_authenticated());
    }

    #[test]
    fn test_keys_go_to_login_when_signed_out() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, false);
        app.handle_key(KeyCode::Char('q'));
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_sidebar_navigation() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, true);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.focus, Focus::Sidebar);
        app.handle_key(KeyCode::Char('j'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.navigator.current(), &View::AssetDiscovery);
        assert_eq!(app.focus, Focus::Content);
        assert!(screen_text(&mut app).contains(ViewId::AssetDiscovery.label()));
    }

    #[test]
    fn test_sidebar_logout() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, true);
        app.handle_key(KeyCode::Tab);
        for _ in 0..7 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.navigator.sidebar_selected(), SidebarItem::Logout);
        app.handle_key(KeyCode::Enter);
        assert!(!app.session.is_authenticated());
        assert!(!Session::open(dir.path()).unwrap().is_authenticated());
    }

    #[test]
    fn test_esc_returns_to_parent_view() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, true);
        let asset = app.catalog.assets()[0].clone();
        app.navigate(View::asset_details(asset));
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.navigator.current(), &View::AssetDiscovery);
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.focus, Focus::Sidebar);
    }

    #[test]
    fn test_claim_resolves_into_node_profile() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, true);
        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.navigator.current(), &View::NodeClaimWizard);
        // The wizard captures letters while editing
        app.handle_key(KeyCode::Char('q'));
        assert!(!app.should_quit);

        let before = app.catalog.nodes().len();
        let node = crate::flows::ClaimWizard::new(chrono::Utc::now())
            .claimed_node(chrono::Utc::now());
        app.apply(ScreenAction::ClaimConfirmed(Deferred::new(
            node.clone(),
            Duration::from_millis(500),
        )));
        assert!(screen_text(&mut app).contains("Claiming node"));

        app.tick(later());
        assert_eq!(app.catalog.nodes().len(), before + 1);
        assert_eq!(app.navigator.current(), &View::node_profile(node));
        assert!(app.pending_claim.is_none());
    }

    #[test]
    fn test_pending_label_counts_down() {
        assert_eq!(
            pending_label("Claiming node", Duration::from_millis(1500)),
            "Claiming node… 1.5s"
        );
        assert_eq!(pending_label("Signing in", Duration::ZERO), "Signing in… 0.0s");
    }

    #[test]
    fn test_placed_order_is_listed() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, true);
        let asset = app.catalog.assets()[0].clone();
        app.navigate(View::Checkout(Some(CheckoutSeed::buy(&asset))));
        let before = app.order_book.orders().len();

        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.order_book.orders().len(), before + 1);
        assert_eq!(app.order_book.orders()[0].symbol, asset.symbol);

        let id = app.order_book.orders()[0].id.clone();
        app.navigate(View::Orders);
        assert!(screen_text(&mut app).contains(&id));
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, true);
        app.handle_key(KeyCode::Char('?'));
        assert!(app.help_dialog.visible);
        assert!(screen_text(&mut app).contains("Keyboard Shortcuts"));
        app.handle_key(KeyCode::Char('q'));
        assert!(!app.help_dialog.visible);
        assert!(!app.should_quit);
    }
}
