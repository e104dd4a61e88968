use eframe::egui::{self, Align2, Color32, Context};
use egui_extras::DatePickerButton;

use crate::models::EventType;

use super::super::state::{CreateEventState, CreateProjectState};
use super::super::RevlineApp;

impl RevlineApp {
    pub(crate) fn render_create_project_dialog(&mut self, ctx: &Context) {
        if !self.show_create_project {
            return;
        }

        let mut should_close = false;
        let mut should_submit = false;

        egui::Window::new("New Project")
            .open(&mut self.show_create_project)
            .default_width(440.0)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                if let Some(err) = &self.create_project.error {
                    ui.colored_label(Color32::LIGHT_RED, err);
                }
                ui.label("Title");
                ui.text_edit_singleline(&mut self.create_project.title);
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label("Car make");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.create_project.car_make)
                                .desired_width(120.0),
                        );
                    });
                    ui.vertical(|ui| {
                        ui.label("Car model");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.create_project.car_model)
                                .desired_width(120.0),
                        );
                    });
                    ui.vertical(|ui| {
                        ui.label("Year");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.create_project.car_year)
                                .desired_width(60.0)
                                .hint_text("1999"),
                        );
                    });
                });
                ui.add_space(6.0);
                ui.label("Description");
                ui.add(
                    egui::TextEdit::multiline(&mut self.create_project.description)
                        .desired_rows(4)
                        .hint_text("What are you building?"),
                );
                ui.add_space(6.0);
                ui.label("Modifications (comma separated)");
                ui.add(
                    egui::TextEdit::singleline(&mut self.create_project.modifications)
                        .hint_text("Coilovers, Turbo kit"),
                );
                ui.add_space(6.0);
                ui.label("Image URLs (comma separated)");
                ui.text_edit_singleline(&mut self.create_project.images);
                ui.add_space(6.0);
                ui.label("Build cost (optional)");
                ui.add(
                    egui::TextEdit::singleline(&mut self.create_project.build_cost)
                        .desired_width(100.0)
                        .hint_text("12500"),
                );
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if self.create_project.submitting {
                        ui.add(egui::Spinner::new());
                    } else if ui.button("Create").clicked() {
                        should_submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        should_close = true;
                    }
                });
            });

        if should_submit {
            self.spawn_create_project();
        }
        if should_close {
            self.show_create_project = false;
            self.create_project = CreateProjectState::default();
        }
    }

    pub(crate) fn render_create_event_dialog(&mut self, ctx: &Context) {
        if !self.show_create_event {
            return;
        }

        let mut should_close = false;
        let mut should_submit = false;

        egui::Window::new("New Event")
            .open(&mut self.show_create_event)
            .default_width(420.0)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                if let Some(err) = &self.create_event.error {
                    ui.colored_label(Color32::LIGHT_RED, err);
                }
                ui.label("Title");
                ui.text_edit_singleline(&mut self.create_event.title);
                ui.add_space(6.0);
                ui.label("Description");
                ui.add(
                    egui::TextEdit::multiline(&mut self.create_event.description)
                        .desired_rows(3)
                        .hint_text("What is happening?"),
                );
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label("Date");
                        ui.add(DatePickerButton::new(&mut self.create_event.event_date));
                    });
                    ui.vertical(|ui| {
                        ui.label("Time");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.create_event.event_time)
                                .desired_width(60.0)
                                .hint_text("18:00"),
                        );
                    });
                    ui.vertical(|ui| {
                        ui.label("Type");
                        egui::ComboBox::from_id_salt("event_type")
                            .selected_text(self.create_event.event_type.label())
                            .show_ui(ui, |ui| {
                                for kind in EventType::ALL {
                                    ui.selectable_value(
                                        &mut self.create_event.event_type,
                                        kind,
                                        kind.label(),
                                    );
                                }
                            });
                    });
                });
                ui.add_space(6.0);
                ui.label("Location");
                ui.text_edit_singleline(&mut self.create_event.location);
                ui.add_space(6.0);
                ui.label("Max participants (optional)");
                ui.add(
                    egui::TextEdit::singleline(&mut self.create_event.max_participants)
                        .desired_width(60.0)
                        .hint_text("No limit"),
                );
                ui.add_space(6.0);
                ui.label("Image URLs (comma separated)");
                ui.text_edit_singleline(&mut self.create_event.images);
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if self.create_event.submitting {
                        ui.add(egui::Spinner::new());
                    } else if ui.button("Create").clicked() {
                        should_submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        should_close = true;
                    }
                });
            });

        if should_submit {
            self.spawn_create_event();
        }
        if should_close {
            self.show_create_event = false;
            self.create_event = CreateEventState::default();
        }
    }
}
