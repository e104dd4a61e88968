use crate::models::{
    AuthResponse, Comment, DiscoverUser, Event, LikeResponse, Project, SearchResults, User,
};

use super::state::LoadedImage;
use super::RevlineApp;

pub enum AppMessage {
    SessionLoaded(Result<User, anyhow::Error>),
    LoggedIn(Result<AuthResponse, anyhow::Error>),
    Registered(Result<AuthResponse, anyhow::Error>),
    ProjectsLoaded(Result<Vec<Project>, anyhow::Error>),
    ProjectCreated(Result<Project, anyhow::Error>),
    CommentsLoaded {
        project_id: String,
        result: Result<Vec<Comment>, anyhow::Error>,
    },
    CommentPosted {
        project_id: String,
        result: Result<Comment, anyhow::Error>,
    },
    LikeToggled {
        project_id: String,
        result: Result<LikeResponse, anyhow::Error>,
    },
    EventsLoaded(Result<Vec<Event>, anyhow::Error>),
    EventCreated(Result<Event, anyhow::Error>),
    EventJoined {
        event_id: String,
        result: Result<(), anyhow::Error>,
    },
    EventLeft {
        event_id: String,
        result: Result<(), anyhow::Error>,
    },
    DiscoverLoaded(Result<Vec<DiscoverUser>, anyhow::Error>),
    FollowToggled {
        user_id: String,
        following: bool,
        result: Result<(), anyhow::Error>,
    },
    SearchCompleted {
        query: String,
        result: Result<SearchResults, anyhow::Error>,
    },
    ImageLoaded {
        url: String,
        result: Result<LoadedImage, String>,
    },
}

pub(super) fn process_messages(app: &mut RevlineApp) {
    while let Ok(message) = app.rx.try_recv() {
        match message {
            AppMessage::SessionLoaded(result) => app.handle_session_loaded(result),
            AppMessage::LoggedIn(result) => app.handle_logged_in(result),
            AppMessage::Registered(result) => app.handle_registered(result),
            AppMessage::ProjectsLoaded(result) => app.handle_projects_loaded(result),
            AppMessage::ProjectCreated(result) => app.handle_project_created(result),
            AppMessage::CommentsLoaded { project_id, result } => {
                app.handle_comments_loaded(project_id, result)
            }
            AppMessage::CommentPosted { project_id, result } => {
                app.handle_comment_posted(project_id, result)
            }
            AppMessage::LikeToggled { project_id, result } => {
                app.handle_like_toggled(project_id, result)
            }
            AppMessage::EventsLoaded(result) => app.handle_events_loaded(result),
            AppMessage::EventCreated(result) => app.handle_event_created(result),
            AppMessage::EventJoined { event_id, result } => {
                app.handle_event_joined(event_id, result)
            }
            AppMessage::EventLeft { event_id, result } => app.handle_event_left(event_id, result),
            AppMessage::DiscoverLoaded(result) => app.handle_discover_loaded(result),
            AppMessage::FollowToggled {
                user_id,
                following,
                result,
            } => app.handle_follow_toggled(user_id, following, result),
            AppMessage::SearchCompleted { query, result } => {
                app.handle_search_completed(query, result)
            }
            AppMessage::ImageLoaded { url, result } => app.handle_image_loaded(url, result),
        }
    }
}
