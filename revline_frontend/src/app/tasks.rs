use std::sync::mpsc::Sender;
use std::thread;

use log::error;

use crate::api::ApiClient;
use crate::models::{
    CreateCommentInput, CreateEventInput, CreateProjectInput, LoginInput, RegisterInput,
};

use super::messages::AppMessage;
use super::state::LoadedImage;

pub fn load_current_user(client: ApiClient, tx: Sender<AppMessage>) {
    thread::spawn(move || {
        let result = client.current_user();
        if tx.send(AppMessage::SessionLoaded(result)).is_err() {
            error!("failed to send SessionLoaded message");
        }
    });
}

pub fn login(client: ApiClient, tx: Sender<AppMessage>, payload: LoginInput) {
    thread::spawn(move || {
        let result = client.login(&payload);
        if tx.send(AppMessage::LoggedIn(result)).is_err() {
            error!("failed to send LoggedIn message");
        }
    });
}

pub fn register(client: ApiClient, tx: Sender<AppMessage>, payload: RegisterInput) {
    thread::spawn(move || {
        let result = client.register(&payload);
        if tx.send(AppMessage::Registered(result)).is_err() {
            error!("failed to send Registered message");
        }
    });
}

pub fn load_projects(client: ApiClient, tx: Sender<AppMessage>) {
    thread::spawn(move || {
        let result = client.list_projects();
        if tx.send(AppMessage::ProjectsLoaded(result)).is_err() {
            error!("failed to send ProjectsLoaded message");
        }
    });
}

pub fn create_project(client: ApiClient, tx: Sender<AppMessage>, payload: CreateProjectInput) {
    thread::spawn(move || {
        let result = client.create_project(&payload);
        if tx.send(AppMessage::ProjectCreated(result)).is_err() {
            error!("failed to send ProjectCreated message");
        }
    });
}

pub fn load_comments(client: ApiClient, tx: Sender<AppMessage>, project_id: String) {
    thread::spawn(move || {
        let result = client.list_comments(&project_id);
        let message = AppMessage::CommentsLoaded { project_id, result };
        if tx.send(message).is_err() {
            error!("failed to send CommentsLoaded message");
        }
    });
}

pub fn create_comment(client: ApiClient, tx: Sender<AppMessage>, payload: CreateCommentInput) {
    thread::spawn(move || {
        let project_id = payload.project_id.clone();
        let result = client.create_comment(&payload);
        let message = AppMessage::CommentPosted { project_id, result };
        if tx.send(message).is_err() {
            error!("failed to send CommentPosted message");
        }
    });
}

pub fn toggle_like(client: ApiClient, tx: Sender<AppMessage>, project_id: String) {
    thread::spawn(move || {
        let result = client.toggle_like(&project_id);
        let message = AppMessage::LikeToggled { project_id, result };
        if tx.send(message).is_err() {
            error!("failed to send LikeToggled message");
        }
    });
}

pub fn load_events(client: ApiClient, tx: Sender<AppMessage>) {
    thread::spawn(move || {
        let result = client.list_events();
        if tx.send(AppMessage::EventsLoaded(result)).is_err() {
            error!("failed to send EventsLoaded message");
        }
    });
}

pub fn create_event(client: ApiClient, tx: Sender<AppMessage>, payload: CreateEventInput) {
    thread::spawn(move || {
        let result = client.create_event(&payload);
        if tx.send(AppMessage::EventCreated(result)).is_err() {
            error!("failed to send EventCreated message");
        }
    });
}

pub fn join_event(client: ApiClient, tx: Sender<AppMessage>, event_id: String) {
    thread::spawn(move || {
        let result = client.join_event(&event_id);
        let message = AppMessage::EventJoined { event_id, result };
        if tx.send(message).is_err() {
            error!("failed to send EventJoined message");
        }
    });
}

pub fn leave_event(client: ApiClient, tx: Sender<AppMessage>, event_id: String) {
    thread::spawn(move || {
        let result = client.leave_event(&event_id);
        let message = AppMessage::EventLeft { event_id, result };
        if tx.send(message).is_err() {
            error!("failed to send EventLeft message");
        }
    });
}

pub fn load_discover(client: ApiClient, tx: Sender<AppMessage>) {
    thread::spawn(move || {
        let result = client.discover_users();
        if tx.send(AppMessage::DiscoverLoaded(result)).is_err() {
            error!("failed to send DiscoverLoaded message");
        }
    });
}

/// `following` is the desired state, not the current one.
pub fn toggle_follow(client: ApiClient, tx: Sender<AppMessage>, user_id: String, following: bool) {
    thread::spawn(move || {
        let result = if following {
            client.follow_user(&user_id)
        } else {
            client.unfollow_user(&user_id)
        };
        let message = AppMessage::FollowToggled {
            user_id,
            following,
            result,
        };
        if tx.send(message).is_err() {
            error!("failed to send FollowToggled message");
        }
    });
}

pub fn search(client: ApiClient, tx: Sender<AppMessage>, query: String) {
    thread::spawn(move || {
        let result = client.search(&query);
        let message = AppMessage::SearchCompleted { query, result };
        if tx.send(message).is_err() {
            error!("failed to send SearchCompleted message");
        }
    });
}

pub fn download_image(tx: Sender<AppMessage>, url: String) {
    thread::spawn(move || {
        let result = (|| {
            let resp = reqwest::blocking::get(&url).map_err(|e| e.to_string())?;
            if !resp.status().is_success() {
                return Err(format!("HTTP {}", resp.status()));
            }
            let bytes = resp.bytes().map_err(|e| e.to_string())?;
            let dyn_img = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
            let rgba = dyn_img.to_rgba8();
            let size = [dyn_img.width() as usize, dyn_img.height() as usize];
            Ok(LoadedImage {
                size,
                pixels: rgba.as_flat_samples().as_slice().to_vec(),
            })
        })();

        let message = AppMessage::ImageLoaded { url, result };
        if tx.send(message).is_err() {
            error!("failed to send ImageLoaded message");
        }
    });
}
