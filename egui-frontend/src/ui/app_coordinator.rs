//! Top level update loop: login view until an account is authenticated, the
//! tabbed view afterwards, modal windows on top of either.

use eframe::egui;

use crate::ui::app_state::{ContainerTrackerApp, MainTab};

impl eframe::App for ContainerTrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let enabled = !self.modal_open();

        if self.account.is_some() {
            egui::TopBottomPanel::top("header").show(ctx, |ui| {
                ui.add_enabled_ui(enabled, |ui| self.render_header(ui));
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                if self.account.is_none() {
                    self.render_login_view(ui);
                    return;
                }

                match self.current_tab {
                    MainTab::Containers => self.render_containers_tab(ui),
                    MainTab::Schedules => self.render_schedules_tab(ui),
                }
            });
        });

        self.render_modals(ctx);
    }
}

impl ContainerTrackerApp {
    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.current_tab, MainTab::Containers, "Containers");
            ui.selectable_value(&mut self.current_tab, MainTab::Schedules, "Schedules");

            if let Some(account) = &self.account {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&account.company_name).strong());
                });
            }
        });
    }
}
