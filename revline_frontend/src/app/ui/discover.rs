use eframe::egui::{self, Color32, RichText};

use crate::models::DiscoverUser;

use super::super::{resolve_image_url, RevlineApp};

impl RevlineApp {
    pub(crate) fn render_discover(&mut self, ui: &mut egui::Ui) {
        if self.discover.loading && self.discover.users.is_empty() {
            ui.add(egui::Spinner::new());
        }
        if let Some(err) = &self.discover.error {
            ui.colored_label(Color32::LIGHT_RED, err);
            if ui.button("Retry").clicked() {
                self.spawn_load_discover();
            }
            ui.separator();
        }

        let users = std::mem::take(&mut self.discover.users);
        let mut follow: Option<String> = None;

        egui::ScrollArea::vertical()
            .id_salt("discover_scroll")
            .show(ui, |ui| {
                if users.is_empty() && !self.discover.loading {
                    ui.label("No new builders to discover right now.");
                }
                for entry in &users {
                    self.render_discover_card(ui, entry, &mut follow);
                }
            });

        self.discover.users = users;

        if let Some(user_id) = follow {
            self.spawn_toggle_follow(&user_id, true);
        }
    }

    fn render_discover_card(
        &mut self,
        ui: &mut egui::Ui,
        entry: &DiscoverUser,
        follow: &mut Option<String>,
    ) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .inner_margin(egui::vec2(12.0, 8.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if !entry.user.profile_image.is_empty() {
                        let url = resolve_image_url(self.api.base_url(), &entry.user.profile_image);
                        self.render_remote_image(ui, &url, 48.0);
                    }
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&entry.user.username).strong());
                        if !entry.user.bio.is_empty() {
                            ui.label(&entry.user.bio);
                        }
                        ui.label(
                            RichText::new(format!(
                                "{} projects · {} events · {} followers",
                                entry.stats.project_count,
                                entry.stats.event_count,
                                entry.stats.follower_count
                            ))
                            .small(),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.discover.pending_follows.contains(&entry.user.id) {
                            ui.add(egui::Spinner::new());
                        } else if ui.button("Follow").clicked() {
                            *follow = Some(entry.user.id.clone());
                        }
                    });
                });
            });
    }
}
