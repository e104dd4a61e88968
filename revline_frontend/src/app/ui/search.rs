use eframe::egui::{self, Color32, RichText};

use crate::models::{Event, Project, SearchUser};

use super::super::state::SearchState;
use super::super::{resolve_image_url, RevlineApp};

/// What the caller should do once the detached search state is back in place.
pub enum SearchAction {
    None,
    Retry,
}

pub fn render_search(
    app: &mut RevlineApp,
    ui: &mut egui::Ui,
    state: &mut SearchState,
) -> SearchAction {
    let mut action = SearchAction::None;

    ui.heading(format!("Results for \"{}\"", state.query));
    if state.loading {
        ui.add(egui::Spinner::new());
    }
    if let Some(err) = &state.error {
        ui.colored_label(Color32::LIGHT_RED, err);
        if ui.button("Retry").clicked() {
            action = SearchAction::Retry;
        }
        ui.separator();
    }

    let me = app
        .session
        .user()
        .map(|u| u.id.clone())
        .unwrap_or_default();
    let mut follow: Option<(String, bool)> = None;

    egui::ScrollArea::vertical()
        .id_salt("search_scroll")
        .show(ui, |ui| {
            if !state.results.users.is_empty() {
                ui.heading("Builders");
                for user in &state.results.users {
                    render_user_card(app, ui, user, &me, &mut follow);
                }
                ui.add_space(8.0);
            }
            if !state.results.events.is_empty() {
                ui.heading("Events");
                for event in &state.results.events {
                    render_event_row(ui, event);
                }
                ui.add_space(8.0);
            }
            if !state.results.projects.is_empty() {
                ui.heading("Projects");
                for project in &state.results.projects {
                    render_project_row(ui, project);
                }
            }
            if state.results.is_empty() && !state.loading && state.error.is_none() {
                ui.label("No matches.");
            }
        });

    if let Some((user_id, following)) = follow {
        app.spawn_toggle_follow(&user_id, following);
    }

    action
}

fn render_user_card(
    app: &mut RevlineApp,
    ui: &mut egui::Ui,
    user: &SearchUser,
    me: &str,
    follow: &mut Option<(String, bool)>,
) {
    let follows = app
        .session
        .user()
        .is_some_and(|u| u.follows(&user.user.id));
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::vec2(12.0, 8.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if !user.user.profile_image.is_empty() {
                    let url = resolve_image_url(app.api.base_url(), &user.user.profile_image);
                    app.render_remote_image(ui, &url, 48.0);
                }
                ui.vertical(|ui| {
                    ui.label(RichText::new(&user.user.username).strong());
                    if !user.user.bio.is_empty() {
                        ui.label(&user.user.bio);
                    }
                    ui.label(RichText::new(format!("{} projects", user.project_count)).small());
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if user.user.id == me {
                        ui.label("You");
                    } else if app.discover.pending_follows.contains(&user.user.id) {
                        ui.add(egui::Spinner::new());
                    } else if follows {
                        if ui.button("Unfollow").clicked() {
                            *follow = Some((user.user.id.clone(), false));
                        }
                    } else if ui.button("Follow").clicked() {
                        *follow = Some((user.user.id.clone(), true));
                    }
                });
            });
        });
}

fn render_event_row(ui: &mut egui::Ui, event: &Event) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::vec2(12.0, 8.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&event.title).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(event.event_type.label()).small());
                });
            });
            ui.label(format!(
                "{} at {} · {}",
                event.event_date, event.event_time, event.location
            ));
        });
}

fn render_project_row(ui: &mut egui::Ui, project: &Project) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::vec2(12.0, 8.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&project.title).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("❤ {}", project.likes_count));
                });
            });
            ui.label(format!(
                "{} {} {}",
                project.car_year, project.car_make, project.car_model
            ));
            if let Some(author) = &project.user {
                ui.label(RichText::new(format!("by {}", author.username)).small());
            }
        });
}
