//! Chat panel: conversation bubbles, typing indicator and input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use chat_core::markup::{Block, Span};
use chat_types::message::{MessageStatus, Role};
use crate::state::{ChatEntry, UiState};
use crate::theme::*;

/// What the user asked for this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Send(String),
    NewConversation,
}

/// Render the chat panel. Returns an action when the user submits input
/// or starts a new conversation.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<ChatAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    let new_btn = ui.add_enabled(
                        !state.is_empty() || state.conversation_id.is_some(),
                        egui::Button::new(RichText::new("New chat").color(ACCENT))
                            .corner_radius(PANEL_ROUNDING),
                    );
                    if new_btn.clicked() {
                        action = Some(ChatAction::NewConversation);
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if state.is_busy() { WARNING } else { SUCCESS };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                    });
                });

                ui.separator();

                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if state.is_empty() && !state.is_busy() {
                            ui.add_space(24.0);
                            ui.vertical_centered(|ui| {
                                ui.label(
                                    RichText::new("Ask a question about city services.")
                                        .color(TEXT_SECONDARY),
                                );
                            });
                        }

                        for entry in &state.messages {
                            render_message(ui, entry);
                            ui.add_space(4.0);
                        }

                        for _ in &state.typing {
                            render_typing(ui);
                            ui.add_space(4.0);
                        }
                    });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Type a message...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add(input);

                    let send_enabled = !state.input_text.trim().is_empty() && !state.is_busy();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_ON_ACCENT))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let enter = response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (enter && send_enabled) || send_btn.clicked() {
                        // The session echoes the message back through the event bus
                        action = Some(ChatAction::Send(state.input_text.trim().to_string()));
                        state.input_text.clear();
                        response.request_focus();
                    }
                });
            });
        });

    action
}

fn render_message(ui: &mut egui::Ui, entry: &ChatEntry) {
    let is_user = entry.role == Role::User;
    let (bg, fg) = if entry.is_notice {
        (NOTICE_BUBBLE, ERROR)
    } else if is_user {
        (USER_BUBBLE, TEXT_ON_ACCENT)
    } else {
        (ASSISTANT_BUBBLE, TEXT_PRIMARY)
    };
    let bg = match entry.status {
        MessageStatus::Pending => bg.gamma_multiply(0.6),
        _ => bg,
    };
    let layout = if is_user {
        Layout::top_down(Align::Max)
    } else {
        Layout::top_down(Align::Min)
    };
    let max_width = ui.available_width() * BUBBLE_MAX_WIDTH_FRACTION;

    ui.with_layout(layout, |ui| {
        ui.set_max_width(max_width);
        egui::Frame::default()
            .fill(bg)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                if entry.blocks.is_empty() {
                    ui.label(RichText::new(&entry.text).color(fg));
                } else {
                    render_blocks(ui, &entry.blocks, fg);
                }
            });
        if entry.status == MessageStatus::Failed && is_user {
            ui.label(RichText::new("Not delivered").color(ERROR).small());
        }
    });
}

fn render_blocks(ui: &mut egui::Ui, blocks: &[Block], color: egui::Color32) {
    for block in blocks {
        match block {
            Block::Line(spans) => render_spans(ui, spans, color, None),
            Block::Bullet(spans) => render_spans(ui, spans, color, Some("•")),
            Block::Blank => ui.add_space(6.0),
        }
    }
}

fn render_spans(ui: &mut egui::Ui, spans: &[Span], color: egui::Color32, marker: Option<&str>) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        if let Some(marker) = marker {
            ui.label(RichText::new(format!("{} ", marker)).color(color));
        }
        for span in spans {
            let text = RichText::new(&span.text).color(color);
            ui.label(if span.bold { text.strong() } else { text });
        }
    });
}

fn render_typing(ui: &mut egui::Ui) {
    ui.with_layout(Layout::top_down(Align::Min), |ui| {
        egui::Frame::default()
            .fill(ASSISTANT_BUBBLE)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Typing...").color(TEXT_SECONDARY).italics());
                });
            });
    });
}
