//! # Modals Module
//!
//! Confirmation and notice windows. Both are centered, cannot be collapsed,
//! and keep the rest of the UI disabled until answered or dismissed.

use eframe::egui;

use crate::ui::app_state::ContainerTrackerApp;
use crate::ui::components::styling::notice_style;

impl ContainerTrackerApp {
    pub fn render_modals(&mut self, ctx: &egui::Context) {
        if !self.modal_open() {
            return;
        }

        dim_background(ctx);

        if self.pending_confirmation.is_some() {
            self.render_confirmation_modal(ctx);
        } else {
            self.render_notice_modal(ctx);
        }
    }

    fn render_confirmation_modal(&mut self, ctx: &egui::Context) {
        let Some(pending) = &self.pending_confirmation else {
            return;
        };
        let title = pending.prompt.title();
        let message = pending.prompt.message();

        let mut answer = None;
        egui::Window::new(title)
            .id(egui::Id::new("confirmation_modal"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("No").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            answer = Some(false);
        }

        if let Some(confirmed) = answer {
            self.answer_confirmation(confirmed);
        }
    }

    fn render_notice_modal(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };
        let (title, color) = notice_style(notice.kind);
        let message = notice.message.clone();

        let mut dismissed = false;
        egui::Window::new(egui::RichText::new(title).color(color).strong())
            .id(egui::Id::new("notice_modal"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(12.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            dismissed = true;
        }

        if dismissed {
            self.notice = None;
        }
    }
}

fn dim_background(ctx: &egui::Context) {
    let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::PanelResizeLine, egui::Id::new("modal_backdrop")));
    painter.rect_filled(
        ctx.screen_rect(),
        egui::Rounding::ZERO,
        egui::Color32::from_rgba_unmultiplied(0, 0, 0, 96),
    );
}
