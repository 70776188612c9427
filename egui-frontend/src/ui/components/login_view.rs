use eframe::egui;

use container_tracker_backend::domain::InputMask;

use crate::ui::app_state::ContainerTrackerApp;
use crate::ui::components::masked_text_edit;

impl ContainerTrackerApp {
    /// Company login and registration form
    pub fn render_login_view(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.heading("Container Tracker");
            ui.add_space(20.0);

            egui::Grid::new("login_form")
                .num_columns(2)
                .spacing([12.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Company name:");
                    ui.add(egui::TextEdit::singleline(&mut self.login_form.company_name).desired_width(180.0));
                    ui.end_row();

                    ui.label("Tax ID:");
                    masked_text_edit(ui, &mut self.login_form.tax_id, InputMask::TaxId, "00.000.000/0000-00");
                    ui.end_row();

                    ui.label("Password:");
                    let password = ui.add(
                        egui::TextEdit::singleline(&mut self.login_form.password)
                            .password(true)
                            .desired_width(180.0),
                    );
                    ui.end_row();

                    if password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        self.submit_login();
                    }
                });

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                // Keep the two buttons centered under the grid
                let width = 2.0 * 90.0 + ui.spacing().item_spacing.x;
                ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));

                if ui.add_sized([90.0, 28.0], egui::Button::new("Login")).clicked() {
                    self.submit_login();
                }
                if ui.add_sized([90.0, 28.0], egui::Button::new("Register")).clicked() {
                    self.submit_register();
                }
            });
        });
    }
}
