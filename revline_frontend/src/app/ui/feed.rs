use eframe::egui::{self, Color32, RichText};

use crate::models::Project;

use super::super::{format_timestamp, resolve_image_url, RevlineApp};

enum FeedAction {
    ToggleLike(String),
    ExpandThread(String),
    CollapseThread(String),
    ReloadComments(String),
    PostComment(String),
}

impl RevlineApp {
    pub(crate) fn render_feed(&mut self, ui: &mut egui::Ui) {
        if self.feed.loading && self.feed.projects.is_empty() {
            ui.add(egui::Spinner::new());
        }
        if let Some(err) = &self.feed.error {
            ui.colored_label(Color32::LIGHT_RED, err);
            if ui.button("Retry").clicked() {
                self.spawn_load_projects();
            }
            ui.separator();
        }

        // The cards need &mut self for images and composers, so the list is
        // detached while it renders.
        let projects = std::mem::take(&mut self.feed.projects);
        let mut action: Option<FeedAction> = None;

        egui::ScrollArea::vertical().id_salt("feed_scroll").show(ui, |ui| {
            if projects.is_empty() && !self.feed.loading {
                ui.label("Nothing here yet. Follow builders in Discover or post your own project.");
            }
            for project in &projects {
                self.render_project_card(ui, project, &mut action);
            }
        });

        self.feed.projects = projects;

        if let Some(action) = action {
            match action {
                FeedAction::ToggleLike(id) => self.spawn_toggle_like(&id),
                FeedAction::ExpandThread(id) => self.spawn_load_comments(&id),
                FeedAction::CollapseThread(id) => {
                    self.feed.expanded.remove(&id);
                }
                FeedAction::ReloadComments(id) => self.spawn_load_comments(&id),
                FeedAction::PostComment(id) => self.spawn_post_comment(&id),
            }
        }
    }

    fn render_project_card(
        &mut self,
        ui: &mut egui::Ui,
        project: &Project,
        action: &mut Option<FeedAction>,
    ) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .inner_margin(egui::vec2(12.0, 8.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&project.title).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format_timestamp(&project.created_at));
                        if let Some(author) = &project.user {
                            ui.label(&author.username);
                        }
                    });
                });
                ui.label(format!(
                    "{} {} {}",
                    project.car_year, project.car_make, project.car_model
                ));
                if !project.description.is_empty() {
                    ui.label(&project.description);
                }
                if !project.modifications.is_empty() {
                    ui.label(format!("Mods: {}", project.modifications.join(", ")));
                }
                if let Some(cost) = project.build_cost {
                    ui.label(format!("Build cost: ${cost:.0}"));
                }
                if !project.images.is_empty() {
                    ui.horizontal_wrapped(|ui| {
                        for image in &project.images {
                            let url = resolve_image_url(self.api.base_url(), image);
                            self.render_remote_image(ui, &url, 200.0);
                        }
                    });
                }
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    let liked = self.feed.liked.get(&project.id).copied().unwrap_or(false);
                    if ui
                        .selectable_label(liked, format!("❤ {}", project.likes_count))
                        .clicked()
                    {
                        *action = Some(FeedAction::ToggleLike(project.id.clone()));
                    }
                    let expanded = self.feed.expanded.contains_key(&project.id);
                    if ui
                        .selectable_label(expanded, format!("💬 {}", project.comments_count))
                        .clicked()
                    {
                        *action = Some(if expanded {
                            FeedAction::CollapseThread(project.id.clone())
                        } else {
                            FeedAction::ExpandThread(project.id.clone())
                        });
                    }
                });
                if self.feed.expanded.contains_key(&project.id) {
                    self.render_comment_thread(ui, &project.id, action);
                }
            });
    }

    fn render_comment_thread(
        &mut self,
        ui: &mut egui::Ui,
        project_id: &str,
        action: &mut Option<FeedAction>,
    ) {
        let Some(thread) = self.feed.expanded.get_mut(project_id) else {
            return;
        };
        ui.separator();
        if thread.loading && thread.comments.is_empty() {
            ui.add(egui::Spinner::new());
        }
        if let Some(err) = &thread.error {
            ui.colored_label(Color32::LIGHT_RED, err);
            if ui.button("Retry").clicked() {
                *action = Some(FeedAction::ReloadComments(project_id.to_string()));
            }
        }
        for comment in &thread.comments {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&comment.username).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format_timestamp(&comment.created_at));
                });
            });
            ui.label(&comment.content);
            ui.add_space(4.0);
        }
        if thread.comments.is_empty() && !thread.loading && thread.error.is_none() {
            ui.label("No comments yet.");
        }
        if let Some(err) = &thread.post_error {
            ui.colored_label(Color32::LIGHT_RED, err);
        }
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut thread.new_comment)
                    .hint_text("Add a comment")
                    .desired_width(280.0),
            );
            if thread.posting {
                ui.add(egui::Spinner::new());
            } else if ui.button("Post").clicked() {
                *action = Some(FeedAction::PostComment(project_id.to_string()));
            }
        });
    }
}
