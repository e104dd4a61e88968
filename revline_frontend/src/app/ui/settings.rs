use eframe::egui::{self, Color32, RichText};

use crate::api::ApiClient;

use super::super::state::ViewState;
use super::super::RevlineApp;

impl RevlineApp {
    pub(crate) fn render_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("⚙ Settings");
        ui.add_space(20.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.group(|ui| {
                ui.heading("API Configuration");
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.label("Server URL:");
                    ui.text_edit_singleline(&mut self.base_url_input);
                });

                ui.add_space(5.0);

                ui.horizontal(|ui| {
                    if ui.button("Apply Changes").clicked() {
                        match ApiClient::new(self.base_url_input.clone()) {
                            Ok(client) => {
                                self.api = self.session.attach_credentials(&client);
                                self.info_banner = Some("Server URL updated".into());
                                self.load_initial_data();
                                self.view = ViewState::Feed;
                            }
                            Err(err) => {
                                self.info_banner = Some(format!("Failed to update URL: {err}"));
                            }
                        }
                    }

                    if ui.button("Reset to Default").clicked() {
                        self.base_url_input = "http://127.0.0.1:8000".to_string();
                    }
                });

                ui.add_space(5.0);
                ui.label(
                    RichText::new("⚠ Changing the server reconnects with your current login token")
                        .small()
                        .color(Color32::GRAY),
                );
            });

            ui.add_space(20.0);

            ui.group(|ui| {
                ui.heading("About");
                ui.add_space(10.0);
                ui.label("Revline");
                ui.label("A desktop client for the Revline car community");
            });
        });

        ui.add_space(20.0);

        ui.horizontal(|ui| {
            if ui.button("← Back to Feed").clicked() {
                self.view = ViewState::Feed;
            }
        });
    }
}
