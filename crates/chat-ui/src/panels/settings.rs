//! Settings panel: backend endpoint, CSRF names, timeout and storage mode.
//! Edits apply to the live session only after an explicit Save.

use egui::{self, RichText, Vec2};
use chat_types::config::{ChatConfig, StorageBackendType};
use crate::theme::*;

/// What the caller should do after rendering the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    /// A field was edited but not saved yet
    Changed,
    SaveClicked,
}

/// Save feedback passed in from the app layer
#[derive(Clone)]
pub struct SaveFeedback {
    pub message: String,
    pub success: bool,
}

/// Render the settings panel. Returns an action for the caller to handle.
pub fn settings_panel(
    ui: &mut egui::Ui,
    config: &mut ChatConfig,
    save_feedback: Option<&SaveFeedback>,
) -> SettingsAction {
    let mut changed = false;
    let mut save_clicked = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(TEXT_PRIMARY));
            ui.separator();

            // ── Backend Section ──────────────────────────────
            ui.label(RichText::new("Backend").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("API Base URL").color(TEXT_SECONDARY).small());
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut config.backend.api_base)
                        .hint_text("same origin"),
                )
                .changed();

            ui.add_space(4.0);

            ui.label(RichText::new("CSRF cookie").color(TEXT_SECONDARY).small());
            changed |= ui
                .text_edit_singleline(&mut config.backend.csrf_cookie)
                .changed();

            ui.label(RichText::new("CSRF header").color(TEXT_SECONDARY).small());
            changed |= ui
                .text_edit_singleline(&mut config.backend.csrf_header)
                .changed();

            ui.add_space(4.0);

            // 0 disables the timeout
            ui.label(RichText::new("Request timeout (ms)").color(TEXT_SECONDARY).small());
            changed |= ui
                .add(
                    egui::Slider::new(&mut config.backend.request_timeout_ms, 0..=120_000)
                        .step_by(1_000.0),
                )
                .changed();

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(4.0);

            // ── Storage Section ──────────────────────────────
            ui.label(RichText::new("Storage").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Backend").color(TEXT_SECONDARY).small());
            egui::ComboBox::from_id_salt("storage_backend")
                .selected_text(config.storage.backend.label())
                .show_ui(ui, |ui| {
                    for backend in StorageBackendType::all() {
                        if ui
                            .selectable_value(
                                &mut config.storage.backend,
                                backend.clone(),
                                backend.label(),
                            )
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });

            ui.add_space(4.0);
            ui.label(
                RichText::new(storage_description(&config.storage.backend))
                    .color(TEXT_SECONDARY)
                    .small()
                    .italics(),
            );

            ui.add_space(4.0);
            ui.label(RichText::new("Conversation key").color(TEXT_SECONDARY).small());
            changed |= ui
                .text_edit_singleline(&mut config.storage.key)
                .changed();

            // ── Save Button ──────────────────────────────────
            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn = ui.add(
                    egui::Button::new(
                        RichText::new("Save Settings")
                            .color(TEXT_ON_ACCENT)
                            .strong(),
                    )
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(120.0, 28.0)),
                );
                if btn.clicked() {
                    save_clicked = true;
                }

                if let Some(fb) = save_feedback {
                    let color = if fb.success { SUCCESS } else { ERROR };
                    ui.label(RichText::new(&fb.message).color(color).small());
                }
            });
        });

    if save_clicked {
        SettingsAction::SaveClicked
    } else if changed {
        SettingsAction::Changed
    } else {
        SettingsAction::None
    }
}

/// Validate a config before it replaces the live one
pub fn validate_config(config: &ChatConfig) -> Result<(), String> {
    if config.storage.key.trim().is_empty() {
        return Err("Conversation key must not be empty".to_string());
    }
    if config.backend.csrf_header.trim().is_empty() {
        return Err("CSRF header must not be empty".to_string());
    }
    let base = config.backend.api_base.trim();
    if !base.is_empty() && !(base.starts_with("http://") || base.starts_with("https://") || base.starts_with('/')) {
        return Err("API base must be an http(s) URL or a path".to_string());
    }
    Ok(())
}

pub fn storage_description(backend: &StorageBackendType) -> &'static str {
    match backend {
        StorageBackendType::Auto => "Uses local storage when the browser allows it, memory otherwise.",
        StorageBackendType::Memory => "Nothing is kept. The conversation is lost on page reload.",
        StorageBackendType::Local => "The conversation survives reloads and browser restarts.",
        StorageBackendType::Session => "The conversation survives reloads but not closing the tab.",
    }
}
