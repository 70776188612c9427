use eframe::egui;
use egui_extras::{Column, TableBuilder};

use shared::{format_date, ContainerStatus, ContainerType};

use crate::ui::app_state::ContainerTrackerApp;

impl ContainerTrackerApp {
    pub fn render_containers_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("Containers");
        ui.add_space(8.0);

        self.render_container_form(ui);

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Add container").clicked() {
                self.submit_add_container();
            }
            if ui.button("Remove selected").clicked() {
                self.request_remove_container();
            }
        });

        ui.separator();
        self.render_container_table(ui);
    }

    fn render_container_form(&mut self, ui: &mut egui::Ui) {
        let form = &mut self.container_form;

        egui::Grid::new("container_form")
            .num_columns(4)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Container ID:");
                ui.text_edit_singleline(&mut form.id);
                ui.label("Type:");
                egui::ComboBox::from_id_source("container_type")
                    .selected_text(form.container_type.map(|t| t.as_str()).unwrap_or("Select..."))
                    .show_ui(ui, |ui| {
                        for container_type in ContainerType::ALL {
                            ui.selectable_value(&mut form.container_type, Some(container_type), container_type.as_str());
                        }
                    });
                ui.end_row();

                ui.label("Height (m):");
                ui.text_edit_singleline(&mut form.height);
                ui.label("Status:");
                egui::ComboBox::from_id_source("container_status")
                    .selected_text(form.status.map(|s| s.as_str()).unwrap_or("Select..."))
                    .show_ui(ui, |ui| {
                        for status in ContainerStatus::ALL {
                            ui.selectable_value(&mut form.status, Some(status), status.as_str());
                        }
                    });
                ui.end_row();

                ui.label("Width (m):");
                ui.text_edit_singleline(&mut form.width);
                ui.label("Origin:");
                ui.text_edit_singleline(&mut form.origin);
                ui.end_row();

                ui.label("Length (m):");
                ui.text_edit_singleline(&mut form.length);
                ui.label("Destination:");
                ui.text_edit_singleline(&mut form.destination);
                ui.end_row();
            });
    }

    fn render_container_table(&mut self, ui: &mut egui::Ui) {
        if self.containers.is_empty() {
            ui.label("No containers yet.");
            return;
        }

        let mut clicked = None;

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(90.0))
            .columns(Column::auto().at_least(70.0), 7)
            .column(Column::remainder())
            .header(24.0, |mut header| {
                for title in [
                    "ID", "Type", "Height", "Width", "Length", "Status", "Origin", "Destination", "Entry date",
                ] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for container in &self.containers {
                    let selected = self.selected_container.as_deref() == Some(container.id.as_str());
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            if ui.selectable_label(selected, container.id.as_str()).clicked() {
                                clicked = Some(container.id.clone());
                            }
                        });
                        row.col(|ui| {
                            ui.label(container.container_type.as_str());
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", container.height));
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", container.width));
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", container.length));
                        });
                        row.col(|ui| {
                            ui.label(container.status.as_str());
                        });
                        row.col(|ui| {
                            ui.label(container.origin.as_str());
                        });
                        row.col(|ui| {
                            ui.label(container.destination.as_str());
                        });
                        row.col(|ui| {
                            ui.label(format_date(container.entry_date));
                        });
                    });
                }
            });

        if clicked.is_some() {
            self.selected_container = clicked;
        }
    }
}
