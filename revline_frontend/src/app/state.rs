use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};

use crate::models::{Comment, DiscoverUser, Event, EventType, Project, SearchResults};

pub enum ViewState {
    Feed,
    Events,
    Discover,
    Search(SearchState),
    Settings,
}

#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Default)]
pub struct AuthState {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub profile_image: String,
    pub submitting: bool,
    pub error: Option<String>,
}

#[derive(Default)]
pub struct FeedState {
    pub projects: Vec<Project>,
    pub loading: bool,
    pub error: Option<String>,
    /// What the client believes about its own like state per project id.
    /// Absent means unknown; the server's toggle response is the authority.
    pub liked: HashMap<String, bool>,
    /// Comment threads currently expanded by the viewer, keyed by project id.
    pub expanded: HashMap<String, CommentThreadState>,
}

#[derive(Default)]
pub struct CommentThreadState {
    pub comments: Vec<Comment>,
    pub loading: bool,
    pub error: Option<String>,
    pub new_comment: String,
    pub posting: bool,
    pub post_error: Option<String>,
}

#[derive(Default)]
pub struct EventsState {
    pub events: Vec<Event>,
    pub loading: bool,
    pub error: Option<String>,
    /// Join/leave requests in flight, keyed by event id.
    pub pending: HashSet<String>,
}

#[derive(Default)]
pub struct DiscoverState {
    pub users: Vec<DiscoverUser>,
    pub loading: bool,
    pub error: Option<String>,
    pub pending_follows: HashSet<String>,
}

#[derive(Default)]
pub struct SearchState {
    pub query: String,
    pub results: SearchResults,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
pub struct CreateProjectState {
    pub title: String,
    pub car_make: String,
    pub car_model: String,
    pub car_year: String,
    pub description: String,
    pub modifications: String,
    pub images: String,
    pub build_cost: String,
    pub submitting: bool,
    pub error: Option<String>,
}

pub struct CreateEventState {
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub location: String,
    pub event_type: EventType,
    pub max_participants: String,
    pub images: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl Default for CreateEventState {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            event_date: Utc::now().date_naive(),
            event_time: "18:00".to_owned(),
            location: String::new(),
            event_type: EventType::default(),
            max_participants: String::new(),
            images: String::new(),
            submitting: false,
            error: None,
        }
    }
}

#[derive(Clone)]
pub struct LoadedImage {
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}
