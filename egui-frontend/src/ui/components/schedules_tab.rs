use eframe::egui;
use egui_extras::{Column, TableBuilder};

use container_tracker_backend::domain::InputMask;
use shared::{format_date, OperationType};

use crate::ui::app_state::ContainerTrackerApp;
use crate::ui::components::masked_text_edit;

impl ContainerTrackerApp {
    pub fn render_schedules_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("Schedules");
        ui.add_space(8.0);

        let mut refresh_picker = false;

        egui::Grid::new("schedule_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Container:");
                ui.horizontal(|ui| {
                    let form = &mut self.schedule_form;
                    egui::ComboBox::from_id_source("schedule_container")
                        .selected_text(form.container_id.as_deref().unwrap_or("Select..."))
                        .show_ui(ui, |ui| {
                            for id in &self.container_ids {
                                ui.selectable_value(&mut form.container_id, Some(id.clone()), id.as_str());
                            }
                        });
                    if ui.button("Refresh").on_hover_text("Reload container list").clicked() {
                        refresh_picker = true;
                    }
                });
                ui.end_row();

                ui.label("Date:");
                masked_text_edit(ui, &mut self.schedule_form.date, InputMask::Date, "DD/MM/YYYY");
                ui.end_row();

                ui.label("Operation:");
                let form = &mut self.schedule_form;
                egui::ComboBox::from_id_source("schedule_operation")
                    .selected_text(form.operation_type.map(|op| op.as_str()).unwrap_or("Select..."))
                    .show_ui(ui, |ui| {
                        for operation_type in OperationType::ALL {
                            ui.selectable_value(&mut form.operation_type, Some(operation_type), operation_type.as_str());
                        }
                    });
                ui.end_row();
            });

        if refresh_picker {
            self.refresh_container_picker();
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Create schedule").clicked() {
                self.submit_create_schedule();
            }
            if ui.button("Remove selected").clicked() {
                self.request_remove_schedule();
            }
        });

        ui.separator();
        self.render_schedule_table(ui);
    }

    fn render_schedule_table(&mut self, ui: &mut egui::Ui) {
        if self.schedules.is_empty() {
            ui.label("No schedules yet.");
            return;
        }

        let mut clicked = None;

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::remainder())
            .header(24.0, |mut header| {
                for title in ["ID", "Container", "Date", "Operation"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for schedule in &self.schedules {
                    let selected = self.selected_schedule == Some(schedule.id);
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            if ui.selectable_label(selected, schedule.id.to_string()).clicked() {
                                clicked = Some(schedule.id);
                            }
                        });
                        row.col(|ui| {
                            ui.label(schedule.container_id.as_str());
                        });
                        row.col(|ui| {
                            ui.label(format_date(schedule.scheduled_date));
                        });
                        row.col(|ui| {
                            ui.label(schedule.operation_type.as_str());
                        });
                    });
                }
            });

        if clicked.is_some() {
            self.selected_schedule = clicked;
        }
    }
}
