use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_image: String,
    #[serde(default)]
    pub followed_users: Vec<String>,
    #[serde(default)]
    pub followers: Vec<String>,
    pub created_at: String,
}

impl User {
    pub fn follows(&self, user_id: &str) -> bool {
        self.followed_users.iter().any(|id| id == user_id)
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            username: self.username.clone(),
            profile_image: self.profile_image.clone(),
        }
    }
}

/// The trimmed user object the server embeds in projects and events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub profile_image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoginInput {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user: Option<UserSummary>,
    pub title: String,
    pub car_make: String,
    pub car_model: String,
    pub car_year: i32,
    pub description: String,
    #[serde(default)]
    pub modifications: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub parts_list: Vec<serde_json::Value>,
    #[serde(default)]
    pub build_cost: Option<f64>,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub comments_count: i64,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateProjectInput {
    pub title: String,
    pub car_make: String,
    pub car_model: String,
    pub car_year: i32,
    pub description: String,
    #[serde(default)]
    pub modifications: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub build_cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub username: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateCommentInput {
    pub project_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LikeToggleInput {
    pub project_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikeResponse {
    pub liked: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    CarMeet,
    CarShow,
    Race,
    Workshop,
    Cruise,
    TrackDay,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::CarMeet,
        EventType::CarShow,
        EventType::Race,
        EventType::Workshop,
        EventType::Cruise,
        EventType::TrackDay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EventType::CarMeet => "Car Meet",
            EventType::CarShow => "Car Show",
            EventType::Race => "Race",
            EventType::Workshop => "Workshop",
            EventType::Cruise => "Cruise",
            EventType::TrackDay => "Track Day",
        }
    }
}

impl Default for EventType {
    fn default() -> Self {
        EventType::CarMeet
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user: Option<UserSummary>,
    pub title: String,
    pub description: String,
    pub event_date: String,
    pub event_time: String,
    pub location: String,
    pub event_type: EventType,
    #[serde(default)]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub participants_count: u32,
    #[serde(default)]
    pub user_joined: bool,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Event {
    pub fn is_full(&self) -> bool {
        match self.max_participants {
            Some(max) => self.participants_count >= max,
            None => false,
        }
    }

    pub fn organized_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// `max_participants` must serialize as an explicit `null` when unset, so the
/// field carries no `skip_serializing_if`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateEventInput {
    pub title: String,
    pub description: String,
    pub event_date: String,
    pub event_time: String,
    pub location: String,
    pub event_type: EventType,
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub project_count: u32,
    #[serde(default)]
    pub event_count: u32,
    #[serde(default)]
    pub follower_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverUser {
    #[serde(flatten)]
    pub user: User,
    pub stats: UserStats,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub project_count: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchResults {
    #[serde(default)]
    pub users: Vec<SearchUser>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub query: String,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.events.is_empty() && self.projects.is_empty()
    }
}

/// Splits a comma-separated form field into trimmed entries, dropping empties.
pub fn parse_comma_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn comma_list_splits_and_trims() {
        assert_eq!(
            parse_comma_list("Turbo kit, Coilovers"),
            vec!["Turbo kit".to_owned(), "Coilovers".to_owned()]
        );
    }

    #[test]
    fn comma_list_drops_empty_entries() {
        assert_eq!(
            parse_comma_list(" , Turbo kit,, Coilovers , "),
            vec!["Turbo kit".to_owned(), "Coilovers".to_owned()]
        );
        assert_eq!(parse_comma_list(""), Vec::<String>::new());
        assert_eq!(parse_comma_list("  ,  ,"), Vec::<String>::new());
    }

    #[test]
    fn event_type_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&EventType::TrackDay).unwrap();
        assert_eq!(json, "\"track_day\"");
        let parsed: EventType = serde_json::from_str("\"car_meet\"").unwrap();
        assert_eq!(parsed, EventType::CarMeet);
    }

    #[test]
    fn empty_max_participants_serializes_as_null() {
        let input = CreateEventInput {
            title: "Sunday cruise".into(),
            description: "Coastal run".into(),
            event_date: "2025-06-01".into(),
            event_time: "09:00".into(),
            location: "Pier 7".into(),
            event_type: EventType::Cruise,
            max_participants: None,
            images: Vec::new(),
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["max_participants"], serde_json::Value::Null);
    }

    #[test]
    fn event_is_full_only_with_a_limit() {
        let mut event = sample_event();
        assert!(!event.is_full());
        event.max_participants = Some(10);
        event.participants_count = 9;
        assert!(!event.is_full());
        event.participants_count = 10;
        assert!(event.is_full());
    }

    #[test]
    fn project_deserializes_without_embedded_user() {
        let json = serde_json::json!({
            "id": "p1",
            "user_id": "u1",
            "title": "240Z restomod",
            "car_make": "Datsun",
            "car_model": "240Z",
            "car_year": 1972,
            "description": "Full rebuild",
            "created_at": "2025-01-01T00:00:00Z"
        });
        let project: Project = serde_json::from_value(json).unwrap();
        assert!(project.user.is_none());
        assert_eq!(project.likes_count, 0);
        assert!(project.modifications.is_empty());
    }

    fn sample_event() -> Event {
        Event {
            id: "e1".into(),
            user_id: "u1".into(),
            user: None,
            title: "Cars and coffee".into(),
            description: "Morning meet".into(),
            event_date: "2025-06-01".into(),
            event_time: "08:00".into(),
            location: "Lot B".into(),
            event_type: EventType::CarMeet,
            max_participants: None,
            participants: Vec::new(),
            participants_count: 0,
            user_joined: false,
            images: Vec::new(),
            created_at: "2025-01-01T00:00:00Z".into(),
            updated_at: None,
        }
    }
}
