use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{DateTime, Utc};
use eframe::egui::{self, Context, TextureHandle};
use log::error;

use crate::api::ApiClient;
use crate::session::{Session, SessionPhase, TokenStore};

mod handlers_events;
mod handlers_misc;
mod handlers_projects;
mod handlers_session;
mod messages;
mod spawners;
mod state;
mod tasks;
mod ui;

use messages::AppMessage;
use state::{
    AuthState, CreateEventState, CreateProjectState, DiscoverState, EventsState, FeedState,
    LoadedImage, SearchState, ViewState,
};

// Cap on concurrent image downloads so a long feed does not hammer the server
const MAX_CONCURRENT_DOWNLOADS: usize = 4;

pub struct RevlineApp {
    api: ApiClient,
    session: Session,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    view: ViewState,
    auth: AuthState,
    feed: FeedState,
    events: EventsState,
    discover: DiscoverState,
    search_input: String,
    show_create_project: bool,
    create_project: CreateProjectState,
    show_create_event: bool,
    create_event: CreateEventState,
    show_profile: bool,
    base_url_input: String,
    info_banner: Option<String>,
    image_textures: HashMap<String, TextureHandle>,
    image_loading: HashSet<String>,
    image_pending: HashMap<String, LoadedImage>,
    image_errors: HashMap<String, String>,
    image_viewers: HashMap<String, bool>,
    download_queue: VecDeque<String>,
    active_downloads: usize,
}

/// Joins a possibly relative image reference against the API host.
pub(crate) fn resolve_image_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if url.starts_with('/') {
        format!("{base_url}{url}")
    } else {
        format!("{base_url}/{url}")
    }
}

impl RevlineApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let default_url = std::env::var("REVLINE_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        let api = ApiClient::new(default_url.clone()).unwrap_or_else(|err| {
            error!("failed to initialise API client: {err}");
            ApiClient::new("http://127.0.0.1:8000").expect("fallback API client")
        });
        let (tx, rx) = mpsc::channel();

        let mut app = Self {
            api,
            session: Session::new(TokenStore::new()),
            tx,
            rx,
            view: ViewState::Feed,
            auth: AuthState::default(),
            feed: FeedState::default(),
            events: EventsState::default(),
            discover: DiscoverState::default(),
            search_input: String::new(),
            show_create_project: false,
            create_project: CreateProjectState::default(),
            show_create_event: false,
            create_event: CreateEventState::default(),
            show_profile: false,
            base_url_input: default_url,
            info_banner: None,
            image_textures: HashMap::new(),
            image_loading: HashSet::new(),
            image_pending: HashMap::new(),
            image_errors: HashMap::new(),
            image_viewers: HashMap::new(),
            download_queue: VecDeque::new(),
            active_downloads: 0,
        };
        app.start_bootstrap();
        app
    }

    /// Kicks off session restore. With a persisted token the profile fetch
    /// decides between `Authenticated` and `Unauthenticated`; without one the
    /// login screen shows immediately.
    fn start_bootstrap(&mut self) {
        if self.session.begin_bootstrap().is_some() {
            self.api = self.session.attach_credentials(&self.api);
            tasks::load_current_user(self.api.clone(), self.tx.clone());
        }
    }

    fn load_initial_data(&mut self) {
        self.spawn_load_projects();
        self.spawn_load_events();
        self.spawn_load_discover();
    }

    fn process_messages(&mut self) {
        messages::process_messages(self);
    }

    fn refresh_current_view(&mut self) {
        match &self.view {
            ViewState::Feed => self.spawn_load_projects(),
            ViewState::Events => self.spawn_load_events(),
            ViewState::Discover => self.spawn_load_discover(),
            ViewState::Search(search) => {
                self.search_input = search.query.clone();
                self.spawn_search();
            }
            ViewState::Settings => {}
        }
    }

    fn spawn_download_image(&mut self, url: &str) {
        self.image_loading.insert(url.to_string());
        self.download_queue.push_back(url.to_string());
        self.process_download_queue();
    }

    fn process_download_queue(&mut self) {
        while self.active_downloads < MAX_CONCURRENT_DOWNLOADS {
            if let Some(url) = self.download_queue.pop_front() {
                self.active_downloads += 1;
                tasks::download_image(self.tx.clone(), url);
            } else {
                break;
            }
        }
    }

    fn on_download_complete(&mut self) {
        if self.active_downloads > 0 {
            self.active_downloads -= 1;
        }
        self.process_download_queue();
    }

    /// Draws a downloaded image scaled to `max_width`, kicking off the
    /// download on first sight. Clicking the thumbnail opens a viewer window.
    pub(crate) fn render_remote_image(&mut self, ui: &mut egui::Ui, url: &str, max_width: f32) {
        if let Some(texture) = self.image_textures.get(url) {
            let size = texture.size_vec2();
            let scale = if size.x > max_width {
                max_width / size.x
            } else {
                1.0
            };
            let response = ui.add(
                egui::Image::from_texture(texture)
                    .fit_to_exact_size(size * scale)
                    .sense(egui::Sense::click()),
            );
            if response.clicked() {
                self.image_viewers.insert(url.to_string(), true);
            }
        } else if let Some(pending) = self.image_pending.remove(url) {
            let color = egui::ColorImage::from_rgba_unmultiplied(pending.size, &pending.pixels);
            let tex = ui
                .ctx()
                .load_texture(url, color, egui::TextureOptions::default());
            self.image_textures.insert(url.to_string(), tex.clone());
            let size = tex.size_vec2();
            let scale = if size.x > max_width {
                max_width / size.x
            } else {
                1.0
            };
            ui.add(egui::Image::from_texture(&tex).fit_to_exact_size(size * scale));
        } else if let Some(err) = self.image_errors.get(url) {
            ui.colored_label(egui::Color32::RED, format!("Error: {err}"));
        } else {
            ui.spinner();
            if !self.image_loading.contains(url) {
                self.spawn_download_image(url);
            }
        }
    }

    fn render_image_viewers(&mut self, ctx: &egui::Context) {
        let urls: Vec<String> = self.image_viewers.keys().cloned().collect();
        for url in urls {
            let mut is_open = self.image_viewers.get(&url).copied().unwrap_or(false);
            egui::Window::new("Image")
                .id(egui::Id::new(format!("image_viewer_{url}")))
                .open(&mut is_open)
                .default_size([800.0, 600.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("Open in browser").clicked() {
                            let _ = open::that(&url);
                        }
                    });
                    egui::ScrollArea::both().show(ui, |ui| {
                        if let Some(texture) = self.image_textures.get(&url) {
                            ui.add(egui::Image::from_texture(texture).fit_to_original_size(1.0));
                        } else {
                            ui.spinner();
                        }
                    });
                });
            if !is_open {
                self.image_viewers.remove(&url);
            }
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Revline");
                ui.separator();
                if ui
                    .selectable_label(matches!(self.view, ViewState::Feed), "Feed")
                    .clicked()
                {
                    self.view = ViewState::Feed;
                    self.spawn_load_projects();
                }
                if ui
                    .selectable_label(matches!(self.view, ViewState::Events), "Events")
                    .clicked()
                {
                    self.view = ViewState::Events;
                    self.spawn_load_events();
                }
                if ui
                    .selectable_label(matches!(self.view, ViewState::Discover), "Discover")
                    .clicked()
                {
                    self.view = ViewState::Discover;
                    self.spawn_load_discover();
                }
                ui.separator();
                let search_box = ui.add(
                    egui::TextEdit::singleline(&mut self.search_input)
                        .hint_text("Search users, events, projects")
                        .desired_width(220.0),
                );
                if search_box.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    self.spawn_search();
                }
                if ui.button("Search").clicked() {
                    self.spawn_search();
                }
                ui.separator();
                if ui.button("New Project").clicked() {
                    self.show_create_project = true;
                }
                if ui.button("New Event").clicked() {
                    self.show_create_event = true;
                }
                if ui.button("Refresh").clicked() {
                    self.refresh_current_view();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let username = self
                        .session
                        .user()
                        .map(|u| u.username.clone())
                        .unwrap_or_default();
                    if ui.selectable_label(self.show_profile, username).clicked() {
                        self.show_profile = !self.show_profile;
                    }
                });
            });

            if let Some(message) = self.info_banner.clone() {
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
                    self.info_banner = None;
                }
            }
        });
    }
}

impl eframe::App for RevlineApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        match self.session.phase() {
            SessionPhase::Uninitialized | SessionPhase::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.spinner();
                        ui.label("Restoring session…");
                    });
                });
                return;
            }
            SessionPhase::Unauthenticated => {
                ui::auth::render_auth_screen(self, ctx);
                return;
            }
            SessionPhase::Authenticated => {}
        }

        self.render_top_bar(ctx);

        // String discriminant so the CentralPanel closure does not fight the
        // borrow of self.view
        let view_kind = match &self.view {
            ViewState::Feed => "feed",
            ViewState::Events => "events",
            ViewState::Discover => "discover",
            ViewState::Search(_) => "search",
            ViewState::Settings => "settings",
        };

        if view_kind == "search" {
            let mut search = if let ViewState::Search(state) = &mut self.view {
                std::mem::replace(state, SearchState::default())
            } else {
                unreachable!()
            };
            let mut search_action = ui::search::SearchAction::None;
            egui::CentralPanel::default().show(ctx, |ui| {
                search_action = ui::search::render_search(self, ui, &mut search);
            });
            let query = search.query.clone();
            if let ViewState::Search(state) = &mut self.view {
                *state = search;
            }
            if matches!(search_action, ui::search::SearchAction::Retry) {
                self.search_input = query;
                self.spawn_search();
            }
        } else {
            egui::CentralPanel::default().show(ctx, |ui| match view_kind {
                "feed" => self.render_feed(ui),
                "events" => self.render_events(ui),
                "discover" => self.render_discover(ui),
                _ => self.render_settings(ui),
            });
        }

        self.render_create_project_dialog(ctx);
        self.render_create_event_dialog(ctx);
        ui::drawer::render_profile_drawer(self, ctx);
        self.render_image_viewers(ctx);
    }
}

fn format_timestamp(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| {
            dt.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M UTC")
                .to_string()
        })
        .unwrap_or_else(|_| ts.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn resolve_image_url_keeps_absolute_urls() {
        assert_eq!(
            resolve_image_url("http://host:8000", "https://cdn.example/x.png"),
            "https://cdn.example/x.png"
        );
    }

    #[test]
    fn resolve_image_url_joins_relative_paths() {
        assert_eq!(
            resolve_image_url("http://host:8000", "/static/x.png"),
            "http://host:8000/static/x.png"
        );
        assert_eq!(
            resolve_image_url("http://host:8000", "static/x.png"),
            "http://host:8000/static/x.png"
        );
    }

    #[test]
    fn format_timestamp_normalises_to_utc() {
        assert_eq!(
            format_timestamp("2024-03-05T10:15:00+02:00"),
            "2024-03-05 08:15 UTC"
        );
    }

    #[test]
    fn format_timestamp_falls_back_to_raw_input() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
