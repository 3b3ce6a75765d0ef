//! History panel: past conversations for the signed-in user.

use egui::{self, Align, Layout, RichText, ScrollArea};
use crate::state::{HistoryView, UiState};
use crate::theme::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    Refresh,
    Open(String),
}

pub fn history_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<HistoryAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Recent conversations").color(TEXT_PRIMARY).strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let loading = state.history == HistoryView::Loading;
                    if ui.add_enabled(!loading, egui::Button::new("Refresh")).clicked() {
                        action = Some(HistoryAction::Refresh);
                    }
                });
            });
            ui.separator();

            match &state.history {
                HistoryView::NotLoaded | HistoryView::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(RichText::new("Loading...").color(TEXT_SECONDARY));
                    });
                }
                HistoryView::Empty => {
                    ui.label(RichText::new("No conversations yet.").color(TEXT_SECONDARY));
                }
                HistoryView::Failed(message) => {
                    ui.label(RichText::new("Could not load history.").color(ERROR));
                    ui.label(RichText::new(message).color(TEXT_SECONDARY).small());
                }
                HistoryView::Loaded(summaries) => {
                    ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            for summary in summaries {
                                let current = state.conversation_id.as_deref()
                                    == Some(summary.conversation_id.as_str());
                                let row = egui::Frame::default()
                                    .fill(if current { BG_SURFACE } else { BG_SECONDARY })
                                    .corner_radius(PANEL_ROUNDING)
                                    .inner_margin(8.0)
                                    .show(ui, |ui| {
                                        ui.set_width(ui.available_width());
                                        ui.label(RichText::new(&summary.title).color(TEXT_PRIMARY));
                                        ui.label(
                                            RichText::new(&summary.updated_at)
                                                .color(TEXT_SECONDARY)
                                                .small(),
                                        );
                                    })
                                    .response
                                    .interact(egui::Sense::click());
                                if row.clicked() {
                                    action = Some(HistoryAction::Open(summary.conversation_id.clone()));
                                }
                                ui.add_space(4.0);
                            }
                        });
                }
            }
        });

    // Loading starts now; the result arrives through the event bus
    if matches!(action, Some(HistoryAction::Refresh)) {
        state.history = HistoryView::Loading;
    }
    action
}
