//! Main egui application: composes the panels and drives the chat session.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use chat_core::event_bus::EventBus;
use chat_core::ports::StoragePort;
use chat_core::session::{ChatSession, SendOutcome};
use chat_platform::backend::HttpChatBackend;
use chat_platform::storage::open_storage;
use chat_types::config::{ChatConfig, StorageBackendType, CONFIG_STORAGE_KEY};
use chat_ui::panels::chat::{self, ChatAction};
use chat_ui::panels::history::{self, HistoryAction};
use chat_ui::panels::settings::{self, SaveFeedback, SettingsAction};
use chat_ui::state::{ChatTab, HistoryView, UiState};
use chat_ui::theme;

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    /// Config the live session was built from
    config: ChatConfig,
    /// Config being edited in the settings panel
    draft: ChatConfig,
    save_feedback: Option<SaveFeedback>,
    event_bus: EventBus,
    /// None until the saved config has been read
    session: Option<ChatSession>,
    /// Holds widget settings; always durable when the browser allows it
    config_storage: Rc<dyn StoragePort>,
    restored_config: Rc<RefCell<Option<ChatConfig>>>,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config_storage = open_storage(&StorageBackendType::Auto);
        let restored_config = Rc::new(RefCell::new(None));

        Self::restore_config(config_storage.clone(), restored_config.clone());

        Self {
            ui_state: UiState::new(),
            config: ChatConfig::default(),
            draft: ChatConfig::default(),
            save_feedback: None,
            event_bus: EventBus::new(),
            session: None,
            config_storage,
            restored_config,
            first_frame: true,
        }
    }

    /// Read the saved config (async). Falls back to defaults.
    fn restore_config(storage: Rc<dyn StoragePort>, slot: Rc<RefCell<Option<ChatConfig>>>) {
        wasm_bindgen_futures::spawn_local(async move {
            let config = match storage.get(CONFIG_STORAGE_KEY).await {
                Ok(Some(data)) => match serde_json::from_slice::<ChatConfig>(&data) {
                    Ok(config) => {
                        log::info!("Config restored from storage");
                        config
                    }
                    Err(e) => {
                        log::warn!("Ignoring unreadable saved config: {}", e);
                        ChatConfig::default()
                    }
                },
                Ok(None) => ChatConfig::default(),
                Err(e) => {
                    log::warn!("Could not read saved config: {}", e);
                    ChatConfig::default()
                }
            };
            *slot.borrow_mut() = Some(config);
        });
    }

    /// Save config to storage (async, fire-and-forget)
    fn save_config(storage: Rc<dyn StoragePort>, config: &ChatConfig) {
        match serde_json::to_vec(config) {
            Ok(json) => wasm_bindgen_futures::spawn_local(async move {
                match storage.set(CONFIG_STORAGE_KEY, &json).await {
                    Ok(()) => log::info!("Config saved to storage"),
                    Err(e) => log::warn!("Failed to save config: {}", e),
                }
            }),
            Err(e) => log::error!("Failed to serialize config: {}", e),
        }
    }

    /// Build a fresh session from `config` and restore its stored conversation.
    ///
    /// The old session is closed first, so its late replies neither reach the
    /// UI nor rewrite the record the new session may share with it.
    fn install_session(&mut self, config: ChatConfig, ctx: &egui::Context) {
        if let Some(old) = self.session.take() {
            old.close();
        }
        let storage = open_storage(&config.storage.backend);
        let backend = Rc::new(HttpChatBackend::new(config.backend.clone()));
        self.event_bus = EventBus::new();
        let session = ChatSession::new(
            backend,
            storage,
            self.event_bus.clone(),
            &config.storage.key,
        );

        self.ui_state.messages.clear();
        self.ui_state.typing.clear();
        self.ui_state.conversation_id = None;
        self.ui_state.history = HistoryView::NotLoaded;
        self.ui_state.status_text = "Ready".to_string();

        let restoring = session.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let count = restoring.restore_session().await;
            log::info!("Restored {} messages", count);
            ctx.request_repaint();
        });

        self.draft = config.clone();
        self.config = config;
        self.session = Some(session);
    }

    fn handle_settings_save(&mut self, ctx: &egui::Context) {
        if let Err(message) = settings::validate_config(&self.draft) {
            self.save_feedback = Some(SaveFeedback {
                message,
                success: false,
            });
            return;
        }
        Self::save_config(self.config_storage.clone(), &self.draft);
        if self.draft != self.config {
            let config = self.draft.clone();
            self.install_session(config, ctx);
        }
        self.save_feedback = Some(SaveFeedback {
            message: "Saved".to_string(),
            success: true,
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        let restored = self.restored_config.borrow_mut().take();
        if let Some(config) = restored {
            self.install_session(config, ctx);
        }

        // Drain events from the session
        if self.event_bus.has_pending() {
            self.ui_state.process_events(self.event_bus.drain());
            ctx.request_repaint();
        }

        if self.ui_state.is_busy() || self.session.is_none() {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("MyCebu Assistant")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                let chat_tab = ui.selectable_value(&mut self.ui_state.active_tab, ChatTab::Chat, "Chat");
                let history_tab =
                    ui.selectable_value(&mut self.ui_state.active_tab, ChatTab::History, "History");
                if chat_tab.clicked() || history_tab.clicked() {
                    log::debug!("Switched to {:?} tab", self.ui_state.active_tab);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                        self.save_feedback = None;
                    }
                });
            });
        });

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            let mut action = SettingsAction::None;
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    action = settings::settings_panel(ui, &mut self.draft, self.save_feedback.as_ref());
                });
            match action {
                SettingsAction::SaveClicked => self.handle_settings_save(ctx),
                SettingsAction::Changed => self.save_feedback = None,
                SettingsAction::None => {}
            }
        }

        // History opens lazily the first time its tab is shown
        if self.ui_state.active_tab == ChatTab::History
            && self.ui_state.history == HistoryView::NotLoaded
            && self.session.is_some()
        {
            self.ui_state.history = HistoryView::Loading;
            self.dispatch_history(ctx);
        }

        // ── Main content ─────────────────────────────────────
        let mut chat_action = None;
        let mut history_action = None;
        CentralPanel::default().show(ctx, |ui| match self.ui_state.active_tab {
            ChatTab::Chat => chat_action = chat::chat_panel(ui, &mut self.ui_state),
            ChatTab::History => history_action = history::history_panel(ui, &mut self.ui_state),
        });

        match chat_action {
            Some(ChatAction::Send(text)) => self.dispatch_message(text, ctx),
            Some(ChatAction::NewConversation) => self.dispatch_new_conversation(ctx),
            None => {}
        }
        match history_action {
            Some(HistoryAction::Refresh) => self.dispatch_history(ctx),
            Some(HistoryAction::Open(id)) => {
                self.ui_state.active_tab = ChatTab::Chat;
                self.dispatch_load(id, ctx);
            }
            None => {}
        }
    }
}

impl ChatApp {
    fn live_session(&self) -> Option<ChatSession> {
        if self.session.is_none() {
            log::warn!("Session not ready yet; ignoring input");
        }
        self.session.clone()
    }

    /// Send a user message through the session (async)
    fn dispatch_message(&self, text: String, ctx: &egui::Context) {
        let Some(session) = self.live_session() else { return };
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match session.send_message(&text).await {
                SendOutcome::Failed(e) => log::error!("Send failed: {}", e),
                SendOutcome::Rejected => log::debug!("Ignored empty message"),
                SendOutcome::Delivered | SendOutcome::Discarded => {}
            }
            ctx.request_repaint();
        });
    }

    fn dispatch_new_conversation(&self, ctx: &egui::Context) {
        let Some(session) = self.live_session() else { return };
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            session.start_new_conversation().await;
            ctx.request_repaint();
        });
    }

    fn dispatch_history(&self, ctx: &egui::Context) {
        let Some(session) = self.live_session() else { return };
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = session.list_history_summaries().await {
                log::warn!("History unavailable: {}", e);
            }
            ctx.request_repaint();
        });
    }

    fn dispatch_load(&self, conversation_id: String, ctx: &egui::Context) {
        let Some(session) = self.live_session() else { return };
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match session.load_conversation(&conversation_id).await {
                Ok(count) => log::info!("Opened conversation {} ({} messages)", conversation_id, count),
                Err(e) => log::warn!("Could not open conversation {}: {}", conversation_id, e),
            }
            ctx.request_repaint();
        });
    }
}
