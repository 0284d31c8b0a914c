//! `CordialApp` definition, startup and shutdown.

use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;
use tracing::{info, warn};

use crate::backend;
use crate::config::{self, ConnectionConfig, Settings};
use crate::error::Result;
use crate::gateway::ChannelId;
use crate::protocol::{BackendAction, GuiEvent};
use crate::state::ClientState;
use crate::typing::{TypingAggregator, TypingNotifier};
use crate::ui::dialogs::{AboutDialog, ConnectDialog};
use crate::ui::quick_switcher::QuickSwitcher;
use crate::ui::theme::{apply_app_style, Palette};

pub struct CordialApp {
    /// Cache, buffers and the active channel.
    pub state: ClientState,

    /// Persisted preferences; written back on exit.
    pub settings: Settings,
    pub palette: Palette,

    // Backend channels
    pub action_tx: Sender<BackendAction>,
    pub event_rx: Receiver<GuiEvent>,

    pub typing: TypingAggregator,
    pub notifier: TypingNotifier,

    pub quick_switcher: QuickSwitcher,
    pub about: AboutDialog,
    pub connect_dialog: ConnectDialog,
}

impl CordialApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let settings = config::load_settings().unwrap_or_default();
        let palette = Palette::named(&settings.theme);
        apply_app_style(&cc.egui_ctx, &palette);

        let (event_tx, event_rx) = unbounded::<GuiEvent>();
        let render_tx = event_tx.clone();
        let repaint_ctx = cc.egui_ctx.clone();
        let handle = backend::start(event_tx, move |channel: ChannelId| {
            let _ = render_tx.send(GuiEvent::TypingRender(channel));
            repaint_ctx.request_repaint();
        })?;

        let timeout = settings.typing_timeout();
        let mut state = ClientState::new(timeout);
        state.active_channel = settings.last_channel;

        let connection = ConnectionConfig::from_settings(&settings);
        let auto_connect = !connection.token.is_empty();

        let mut app = Self {
            state,
            settings,
            palette,
            action_tx: handle.action_tx,
            event_rx,
            typing: handle.typing,
            notifier: TypingNotifier::new(timeout),
            quick_switcher: QuickSwitcher::default(),
            about: AboutDialog::new(),
            connect_dialog: ConnectDialog::new(connection.clone()),
        };

        if auto_connect {
            app.connect(connection);
        } else {
            app.connect_dialog.show();
        }
        Ok(app)
    }

    /// Remember the connection details and ask the backend to connect.
    pub(super) fn connect(&mut self, connection: ConnectionConfig) {
        let (host, port) = match connection.parse_gateway() {
            Ok(addr) => addr,
            Err(e) => {
                self.state.push_status(format!("Error: {}", e));
                return;
            }
        };

        if let Err(e) = config::save_token(&connection.account, &connection.token) {
            warn!(account = %connection.account, "token not stored: {}", e);
        }
        self.settings.gateway = connection.gateway.clone();
        self.settings.use_tls = connection.use_tls;
        self.settings.account = connection.account.clone();
        self.save_settings();

        info!(%host, port, tls = connection.use_tls, "requesting connection");
        let _ = self.action_tx.send(BackendAction::Connect {
            host,
            port,
            use_tls: connection.use_tls,
            token: connection.token,
        });
    }

    pub(super) fn set_theme(&mut self, ctx: &egui::Context, name: &str) {
        self.settings.theme = name.to_string();
        self.palette = Palette::named(name);
        apply_app_style(ctx, &self.palette);
        self.save_settings();
    }

    pub(super) fn set_typing_timeout(&mut self, secs: u64) {
        self.settings.typing_timeout_secs = secs;
        let timeout = self.settings.typing_timeout();
        self.notifier.set_window(timeout);
        if let Some(snapshot) = self.state.set_typing_timeout(timeout) {
            self.typing.submit(snapshot);
        }
        info!(secs = timeout.as_secs(), "typing timeout changed");
        self.save_settings();
    }

    pub(super) fn save_settings(&mut self) {
        self.settings.last_channel = self.state.active_channel;
        if let Err(e) = config::save_settings(&self.settings) {
            warn!("failed to save settings: {}", e);
        }
    }
}

impl Drop for CordialApp {
    fn drop(&mut self) {
        self.save_settings();
    }
}
