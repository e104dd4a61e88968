use eframe::egui::{self, Color32, RichText};

use crate::models::Event;

use super::super::{format_timestamp, resolve_image_url, RevlineApp};

enum EventAction {
    Join(String),
    Leave(String),
}

impl RevlineApp {
    pub(crate) fn render_events(&mut self, ui: &mut egui::Ui) {
        if self.events.loading && self.events.events.is_empty() {
            ui.add(egui::Spinner::new());
        }
        if let Some(err) = &self.events.error {
            ui.colored_label(Color32::LIGHT_RED, err);
            if ui.button("Retry").clicked() {
                self.spawn_load_events();
            }
            ui.separator();
        }

        let me = self
            .session
            .user()
            .map(|u| u.id.clone())
            .unwrap_or_default();
        let events = std::mem::take(&mut self.events.events);
        let mut action: Option<EventAction> = None;

        egui::ScrollArea::vertical()
            .id_salt("events_scroll")
            .show(ui, |ui| {
                if events.is_empty() && !self.events.loading {
                    ui.label("No upcoming events. Organize one!");
                }
                for event in &events {
                    self.render_event_card(ui, event, &me, &mut action);
                }
            });

        self.events.events = events;

        match action {
            Some(EventAction::Join(id)) => self.spawn_join_event(&id),
            Some(EventAction::Leave(id)) => self.spawn_leave_event(&id),
            None => {}
        }
    }

    fn render_event_card(
        &mut self,
        ui: &mut egui::Ui,
        event: &Event,
        me: &str,
        action: &mut Option<EventAction>,
    ) {
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
                ui.label(format!("{} at {}", event.event_date, event.event_time));
                ui.label(format!("📍 {}", event.location));
                if !event.description.is_empty() {
                    ui.label(&event.description);
                }
                let going = match event.max_participants {
                    Some(max) => format!("👥 {}/{} going", event.participants_count, max),
                    None => format!("👥 {} going", event.participants_count),
                };
                ui.label(going);
                if let Some(organizer) = &event.user {
                    ui.label(format!("Organized by {}", organizer.username));
                }
                if !event.images.is_empty() {
                    ui.horizontal_wrapped(|ui| {
                        for image in &event.images {
                            let url = resolve_image_url(self.api.base_url(), image);
                            self.render_remote_image(ui, &url, 200.0);
                        }
                    });
                }
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if self.events.pending.contains(&event.id) {
                        ui.add(egui::Spinner::new());
                    } else if event.organized_by(me) {
                        ui.label("Your event");
                    } else if event.user_joined {
                        if ui.button("Leave").clicked() {
                            *action = Some(EventAction::Leave(event.id.clone()));
                        }
                    } else {
                        let join = ui.add_enabled(!event.is_full(), egui::Button::new("Join"));
                        if join.clicked() {
                            *action = Some(EventAction::Join(event.id.clone()));
                        }
                        if event.is_full() {
                            ui.label("Full");
                        }
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format_timestamp(&event.created_at));
                    });
                });
            });
    }
}
