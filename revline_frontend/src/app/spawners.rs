use chrono::NaiveTime;

use crate::models::{
    parse_comma_list, CreateCommentInput, CreateEventInput, CreateProjectInput, LoginInput,
    RegisterInput,
};

use super::handlers_events::{apply_join, apply_leave};
use super::state::{SearchState, ViewState};
use super::tasks;
use super::RevlineApp;

impl RevlineApp {
    pub(super) fn spawn_login(&mut self) {
        if self.auth.submitting {
            return;
        }
        let username = self.auth.username.trim();
        if username.is_empty() {
            self.auth.error = Some("Username cannot be empty".into());
            return;
        }
        self.auth.submitting = true;
        self.auth.error = None;
        let payload = LoginInput {
            username: username.to_string(),
        };
        tasks::login(self.api.clone(), self.tx.clone(), payload);
    }

    pub(super) fn spawn_register(&mut self) {
        if self.auth.submitting {
            return;
        }
        let username = self.auth.username.trim();
        if username.is_empty() {
            self.auth.error = Some("Username cannot be empty".into());
            return;
        }
        let email = self.auth.email.trim();
        if email.is_empty() {
            self.auth.error = Some("Email cannot be empty".into());
            return;
        }
        self.auth.submitting = true;
        self.auth.error = None;
        let payload = RegisterInput {
            username: username.to_string(),
            email: email.to_string(),
            bio: self.auth.bio.trim().to_string(),
            profile_image: self.auth.profile_image.trim().to_string(),
        };
        tasks::register(self.api.clone(), self.tx.clone(), payload);
    }

    pub(super) fn spawn_load_projects(&mut self) {
        if self.feed.loading {
            return;
        }
        self.feed.loading = true;
        self.feed.error = None;
        tasks::load_projects(self.api.clone(), self.tx.clone());
    }

    pub(super) fn spawn_create_project(&mut self) {
        if self.create_project.submitting {
            return;
        }
        let title = self.create_project.title.trim();
        if title.is_empty() {
            self.create_project.error = Some("Title cannot be empty".into());
            return;
        }
        let car_make = self.create_project.car_make.trim();
        if car_make.is_empty() {
            self.create_project.error = Some("Car make cannot be empty".into());
            return;
        }
        let car_model = self.create_project.car_model.trim();
        if car_model.is_empty() {
            self.create_project.error = Some("Car model cannot be empty".into());
            return;
        }
        let car_year: i32 = match self.create_project.car_year.trim().parse() {
            Ok(year) => year,
            Err(_) => {
                self.create_project.error = Some("Enter a valid year".into());
                return;
            }
        };
        let description = self.create_project.description.trim();
        if description.is_empty() {
            self.create_project.error = Some("Description cannot be empty".into());
            return;
        }
        let build_cost = match self.create_project.build_cost.trim() {
            "" => None,
            raw => match raw.parse::<f64>() {
                Ok(cost) => Some(cost),
                Err(_) => {
                    self.create_project.error = Some("Build cost must be a number".into());
                    return;
                }
            },
        };
        self.create_project.submitting = true;
        self.create_project.error = None;
        let payload = CreateProjectInput {
            title: title.to_string(),
            car_make: car_make.to_string(),
            car_model: car_model.to_string(),
            car_year,
            description: description.to_string(),
            modifications: parse_comma_list(&self.create_project.modifications),
            images: parse_comma_list(&self.create_project.images),
            build_cost,
        };
        tasks::create_project(self.api.clone(), self.tx.clone(), payload);
    }

    pub(super) fn spawn_load_comments(&mut self, project_id: &str) {
        let thread = self
            .feed
            .expanded
            .entry(project_id.to_string())
            .or_default();
        if thread.loading {
            return;
        }
        thread.loading = true;
        thread.error = None;
        tasks::load_comments(self.api.clone(), self.tx.clone(), project_id.to_string());
    }

    /// Bumps the visible comment count before the server confirms; the
    /// handler rolls it back if the post fails.
    pub(super) fn spawn_post_comment(&mut self, project_id: &str) {
        let Some(thread) = self.feed.expanded.get_mut(project_id) else {
            return;
        };
        if thread.posting {
            return;
        }
        let content = thread.new_comment.trim().to_string();
        if content.is_empty() {
            thread.post_error = Some("Comment cannot be empty".into());
            return;
        }
        thread.posting = true;
        thread.post_error = None;
        if let Some(project) = self.feed.projects.iter_mut().find(|p| p.id == project_id) {
            project.comments_count += 1;
        }
        let payload = CreateCommentInput {
            project_id: project_id.to_string(),
            content,
        };
        tasks::create_comment(self.api.clone(), self.tx.clone(), payload);
    }

    pub(super) fn spawn_toggle_like(&mut self, project_id: &str) {
        tasks::toggle_like(self.api.clone(), self.tx.clone(), project_id.to_string());
    }

    pub(super) fn spawn_load_events(&mut self) {
        if self.events.loading {
            return;
        }
        self.events.loading = true;
        self.events.error = None;
        tasks::load_events(self.api.clone(), self.tx.clone());
    }

    pub(super) fn spawn_create_event(&mut self) {
        if self.create_event.submitting {
            return;
        }
        let title = self.create_event.title.trim();
        if title.is_empty() {
            self.create_event.error = Some("Title cannot be empty".into());
            return;
        }
        let description = self.create_event.description.trim();
        if description.is_empty() {
            self.create_event.error = Some("Description cannot be empty".into());
            return;
        }
        let location = self.create_event.location.trim();
        if location.is_empty() {
            self.create_event.error = Some("Location cannot be empty".into());
            return;
        }
        let event_time = self.create_event.event_time.trim();
        if NaiveTime::parse_from_str(event_time, "%H:%M").is_err() {
            self.create_event.error = Some("Time must be HH:MM".into());
            return;
        }
        let max_participants = match self.create_event.max_participants.trim() {
            "" => None,
            raw => match raw.parse::<u32>() {
                Ok(max) => Some(max),
                Err(_) => {
                    self.create_event.error = Some("Max participants must be a number".into());
                    return;
                }
            },
        };
        self.create_event.submitting = true;
        self.create_event.error = None;
        let payload = CreateEventInput {
            title: title.to_string(),
            description: description.to_string(),
            event_date: self.create_event.event_date.format("%Y-%m-%d").to_string(),
            event_time: event_time.to_string(),
            location: location.to_string(),
            event_type: self.create_event.event_type,
            max_participants,
            images: parse_comma_list(&self.create_event.images),
        };
        tasks::create_event(self.api.clone(), self.tx.clone(), payload);
    }

    /// Applies the join locally right away; the handler reverts it if the
    /// server says no.
    pub(super) fn spawn_join_event(&mut self, event_id: &str) {
        if self.events.pending.contains(event_id) {
            return;
        }
        let Some(event) = self.events.events.iter_mut().find(|e| e.id == event_id) else {
            return;
        };
        apply_join(event);
        self.events.pending.insert(event_id.to_string());
        tasks::join_event(self.api.clone(), self.tx.clone(), event_id.to_string());
    }

    pub(super) fn spawn_leave_event(&mut self, event_id: &str) {
        if self.events.pending.contains(event_id) {
            return;
        }
        let Some(event) = self.events.events.iter_mut().find(|e| e.id == event_id) else {
            return;
        };
        apply_leave(event);
        self.events.pending.insert(event_id.to_string());
        tasks::leave_event(self.api.clone(), self.tx.clone(), event_id.to_string());
    }

    pub(super) fn spawn_load_discover(&mut self) {
        if self.discover.loading {
            return;
        }
        self.discover.loading = true;
        self.discover.error = None;
        tasks::load_discover(self.api.clone(), self.tx.clone());
    }

    /// `following` is the state the user asked for.
    pub(super) fn spawn_toggle_follow(&mut self, user_id: &str, following: bool) {
        if self.discover.pending_follows.contains(user_id) {
            return;
        }
        self.discover.pending_follows.insert(user_id.to_string());
        tasks::toggle_follow(
            self.api.clone(),
            self.tx.clone(),
            user_id.to_string(),
            following,
        );
    }

    pub(super) fn spawn_search(&mut self) {
        let query = self.search_input.trim().to_string();
        if query.is_empty() {
            return;
        }
        self.view = ViewState::Search(SearchState {
            query: query.clone(),
            loading: true,
            ..Default::default()
        });
        tasks::search(self.api.clone(), self.tx.clone(), query);
    }
}
