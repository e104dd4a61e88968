use eframe::egui::{self, Context};

use super::super::state::ViewState;
use super::super::{format_timestamp, resolve_image_url, RevlineApp};

enum Action {
    OpenSettings,
    Logout,
}

pub fn render_profile_drawer(app: &mut RevlineApp, ctx: &Context) {
    if !app.show_profile {
        return;
    }

    let mut action = None;

    egui::SidePanel::right("profile_drawer")
        .resizable(true)
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.heading("Profile");
            ui.add_space(10.0);

            let Some(user) = app.session.user().cloned() else {
                ui.label("Not signed in.");
                return;
            };

            ui.group(|ui| {
                if !user.profile_image.is_empty() {
                    let url = resolve_image_url(app.api.base_url(), &user.profile_image);
                    app.render_remote_image(ui, &url, 96.0);
                    ui.add_space(6.0);
                }
                ui.strong(&user.username);
                ui.label(&user.email);
                if !user.bio.is_empty() {
                    ui.add_space(4.0);
                    ui.label(&user.bio);
                }
                ui.add_space(8.0);
                ui.label(format!("Following: {}", user.followed_users.len()));
                ui.label(format!("Followers: {}", user.followers.len()));
                ui.label(format!("Joined {}", format_timestamp(&user.created_at)));
            });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(6.0);

            if ui.button("⚙ Settings").clicked() {
                action = Some(Action::OpenSettings);
            }
            ui.add_space(4.0);
            if ui.button("Log out").clicked() {
                action = Some(Action::Logout);
            }
        });

    match action {
        Some(Action::OpenSettings) => {
            app.view = ViewState::Settings;
            app.show_profile = false;
        }
        Some(Action::Logout) => app.logout(),
        None => {}
    }
}
