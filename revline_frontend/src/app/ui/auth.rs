use eframe::egui::{self, Color32, Context};

use super::super::state::AuthMode;
use super::super::RevlineApp;

pub fn render_auth_screen(app: &mut RevlineApp, ctx: &Context) {
    let mut submit = false;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.heading("Revline");
            ui.label("Car builds, meets and the people behind them");
            ui.add_space(24.0);

            ui.set_max_width(360.0);

            if let Some(message) = app.info_banner.clone() {
                let mut dismiss = false;
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(message.as_str());
                            if ui.button("Dismiss").clicked() {
                                dismiss = true;
                            }
                        });
                    });
                if dismiss {
                    app.info_banner = None;
                }
                ui.add_space(8.0);
            }

            egui::Frame::group(ui.style())
                .fill(ui.visuals().extreme_bg_color)
                .inner_margin(egui::vec2(16.0, 12.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if ui
                            .selectable_label(app.auth.mode == AuthMode::Login, "Log in")
                            .clicked()
                        {
                            app.auth.mode = AuthMode::Login;
                            app.auth.error = None;
                        }
                        if ui
                            .selectable_label(app.auth.mode == AuthMode::Register, "Register")
                            .clicked()
                        {
                            app.auth.mode = AuthMode::Register;
                            app.auth.error = None;
                        }
                    });
                    ui.add_space(8.0);

                    if let Some(err) = &app.auth.error {
                        ui.colored_label(Color32::LIGHT_RED, err);
                        ui.add_space(4.0);
                    }

                    ui.label("Username");
                    ui.text_edit_singleline(&mut app.auth.username);

                    if app.auth.mode == AuthMode::Register {
                        ui.add_space(6.0);
                        ui.label("Email");
                        ui.text_edit_singleline(&mut app.auth.email);
                        ui.add_space(6.0);
                        ui.label("Bio (optional)");
                        ui.add(
                            egui::TextEdit::multiline(&mut app.auth.bio)
                                .desired_rows(3)
                                .hint_text("What do you drive?"),
                        );
                        ui.add_space(6.0);
                        ui.label("Profile image URL (optional)");
                        ui.text_edit_singleline(&mut app.auth.profile_image);
                    }

                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        if app.auth.submitting {
                            ui.add(egui::Spinner::new());
                        } else {
                            let label = match app.auth.mode {
                                AuthMode::Login => "Log in",
                                AuthMode::Register => "Create account",
                            };
                            if ui.button(label).clicked() {
                                submit = true;
                            }
                        }
                    });
                });
        });
    });

    if submit {
        match app.auth.mode {
            AuthMode::Login => app.spawn_login(),
            AuthMode::Register => app.spawn_register(),
        }
    }
}
