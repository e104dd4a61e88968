use log::{info, warn};

use crate::models::{DiscoverUser, SearchResults};

use super::state::{LoadedImage, ViewState};
use super::RevlineApp;

impl RevlineApp {
    pub(super) fn handle_discover_loaded(
        &mut self,
        result: Result<Vec<DiscoverUser>, anyhow::Error>,
    ) {
        self.discover.loading = false;
        match result {
            Ok(users) => {
                self.discover.users = users;
            }
            Err(err) => {
                self.discover.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_follow_toggled(
        &mut self,
        user_id: String,
        following: bool,
        result: Result<(), anyhow::Error>,
    ) {
        self.discover.pending_follows.remove(&user_id);
        match result {
            Ok(()) => {
                if let Some(user) = self.session.user_mut() {
                    if following {
                        if !user.followed_users.contains(&user_id) {
                            user.followed_users.push(user_id.clone());
                        }
                    } else {
                        user.followed_users.retain(|id| id != &user_id);
                    }
                }
                info!(
                    "{} user {user_id}",
                    if following { "followed" } else { "unfollowed" }
                );
                // The feed only shows followed authors and discover hides
                // already-followed users, so both lists are stale now.
                self.spawn_load_projects();
                self.spawn_load_discover();
            }
            Err(err) => {
                warn!("follow toggle failed for user {user_id}: {err:#}");
                self.discover.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_search_completed(
        &mut self,
        query: String,
        result: Result<SearchResults, anyhow::Error>,
    ) {
        let ViewState::Search(state) = &mut self.view else {
            return;
        };
        if state.query != query {
            info!("dropping stale search results for {query:?}");
            return;
        }
        state.loading = false;
        match result {
            Ok(results) => {
                state.results = results;
            }
            Err(err) => {
                state.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_image_loaded(&mut self, url: String, result: Result<LoadedImage, String>) {
        self.image_loading.remove(&url);
        match result {
            Ok(image) => {
                self.image_pending.insert(url, image);
            }
            Err(err) => {
                warn!("image download failed for {url}: {err}");
                self.image_errors.insert(url, err);
            }
        }
        self.on_download_complete();
    }
}
