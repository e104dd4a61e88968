use log::{info, warn};

use crate::api::ApiError;
use crate::models::{AuthResponse, User};

use super::state::{
    AuthState, CreateEventState, CreateProjectState, DiscoverState, EventsState, FeedState,
    ViewState,
};
use super::RevlineApp;

impl RevlineApp {
    pub(super) fn handle_session_loaded(&mut self, result: Result<User, anyhow::Error>) {
        match result {
            Ok(user) => {
                info!("restored session for {}", user.username);
                self.session.complete_bootstrap(user);
                self.load_initial_data();
            }
            Err(err) => {
                let rejected = err
                    .downcast_ref::<ApiError>()
                    .is_some_and(ApiError::is_auth_failure);
                if rejected {
                    warn!("stored token rejected, signing out: {err:#}");
                } else {
                    warn!("could not restore session: {err:#}");
                }
                self.session.fail_bootstrap(rejected);
                self.api = self.session.attach_credentials(&self.api);
            }
        }
    }

    pub(super) fn handle_logged_in(&mut self, result: Result<AuthResponse, anyhow::Error>) {
        self.finish_auth(result, "logged in");
    }

    pub(super) fn handle_registered(&mut self, result: Result<AuthResponse, anyhow::Error>) {
        self.finish_auth(result, "registered");
    }

    fn finish_auth(&mut self, result: Result<AuthResponse, anyhow::Error>, verb: &str) {
        self.auth.submitting = false;
        match result {
            Ok(response) => {
                info!("{verb} as {}", response.user.username);
                self.session.establish(response.user, response.token);
                self.api = self.session.attach_credentials(&self.api);
                self.auth = AuthState::default();
                self.view = ViewState::Feed;
                self.load_initial_data();
            }
            Err(err) => {
                self.auth.error = Some(err.to_string());
            }
        }
    }

    /// Drops the token and every piece of per-account state.
    pub(super) fn logout(&mut self) {
        info!("logging out");
        self.session.clear();
        self.api = self.session.attach_credentials(&self.api);
        self.auth = AuthState::default();
        self.feed = FeedState::default();
        self.events = EventsState::default();
        self.discover = DiscoverState::default();
        self.create_project = CreateProjectState::default();
        self.create_event = CreateEventState::default();
        self.show_create_project = false;
        self.show_create_event = false;
        self.show_profile = false;
        self.search_input.clear();
        self.view = ViewState::Feed;
        self.info_banner = Some("Logged out".into());
    }
}
