use mockito::Matcher;
use pretty_assertions::assert_eq;
use serde_json::json;

use revline_frontend::api::{ApiClient, ApiError};
use revline_frontend::models::{CreateEventInput, EventType, LoginInput, RegisterInput};

fn user_body() -> serde_json::Value {
    json!({
        "id": "u1",
        "username": "ada",
        "email": "ada@example.com",
        "created_at": "2024-01-01T00:00:00Z"
    })
}

#[test]
fn login_posts_the_username() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(json!({"username": "ada"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"user": user_body(), "token": "tok-abc"}).to_string())
        .create();

    let client = ApiClient::new(server.url()).unwrap();
    let auth = client
        .login(&LoginInput {
            username: "ada".into(),
        })
        .unwrap();

    assert_eq!(auth.token, "tok-abc");
    assert_eq!(auth.user.username, "ada");
    mock.assert();
}

#[test]
fn bearer_token_is_attached_when_present() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/auth/me")
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_body().to_string())
        .create();

    let client = ApiClient::new(server.url()).unwrap().with_token("tok-123");
    let user = client.current_user().unwrap();

    assert_eq!(user.id, "u1");
    mock.assert();
}

#[test]
fn missing_token_sends_no_auth_header() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/projects")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let client = ApiClient::new(server.url()).unwrap();
    let projects = client.list_projects().unwrap();

    assert!(projects.is_empty());
    mock.assert();
}

#[test]
fn error_detail_becomes_the_error_message() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/auth/register")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(json!({"detail": "Username already registered"}).to_string())
        .create();

    let client = ApiClient::new(server.url()).unwrap();
    let err = client
        .register(&RegisterInput {
            username: "ada".into(),
            email: "ada@example.com".into(),
            ..Default::default()
        })
        .unwrap_err();

    assert_eq!(err.to_string(), "Username already registered");
    let api_err = err.downcast_ref::<ApiError>().unwrap();
    assert!(!api_err.is_auth_failure());
}

#[test]
fn auth_failures_are_recognised() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/auth/me")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({"detail": "Invalid authentication"}).to_string())
        .create();

    let client = ApiClient::new(server.url()).unwrap().with_token("stale");
    let err = client.current_user().unwrap_err();

    let api_err = err.downcast_ref::<ApiError>().unwrap();
    assert!(api_err.is_auth_failure());
    assert_eq!(err.to_string(), "Invalid authentication");
}

#[test]
fn unlimited_events_serialise_max_participants_as_null() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/events")
        .match_body(Matcher::Json(json!({
            "title": "Sunday meet",
            "description": "Coffee and cars",
            "event_date": "2024-06-02",
            "event_time": "09:00",
            "location": "Old mill lot",
            "event_type": "car_meet",
            "max_participants": null,
            "images": []
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "e1",
                "user_id": "u1",
                "title": "Sunday meet",
                "description": "Coffee and cars",
                "event_date": "2024-06-02",
                "event_time": "09:00",
                "location": "Old mill lot",
                "event_type": "car_meet",
                "created_at": "2024-05-01T00:00:00Z"
            })
            .to_string(),
        )
        .create();

    let client = ApiClient::new(server.url()).unwrap().with_token("tok");
    let event = client
        .create_event(&CreateEventInput {
            title: "Sunday meet".into(),
            description: "Coffee and cars".into(),
            event_date: "2024-06-02".into(),
            event_time: "09:00".into(),
            location: "Old mill lot".into(),
            event_type: EventType::CarMeet,
            max_participants: None,
            images: Vec::new(),
        })
        .unwrap();

    assert_eq!(event.id, "e1");
    mock.assert();
}

#[test]
fn search_sends_the_query_parameter() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/search")
        .match_query(Matcher::UrlEncoded("q".into(), "civic".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"users": [], "events": [], "projects": [], "query": "civic"}).to_string(),
        )
        .create();

    let client = ApiClient::new(server.url()).unwrap().with_token("tok");
    let results = client.search("civic").unwrap();

    assert_eq!(results.query, "civic");
    assert!(results.is_empty());
    mock.assert();
}

#[test]
fn toggle_like_posts_the_project_id() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/likes")
        .match_body(Matcher::Json(json!({"project_id": "p1"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"liked": true, "message": "Project liked"}).to_string())
        .create();

    let client = ApiClient::new(server.url()).unwrap().with_token("tok");
    let response = client.toggle_like("p1").unwrap();

    assert!(response.liked);
    mock.assert();
}

#[test]
fn join_and_leave_share_the_join_route() {
    let mut server = mockito::Server::new();
    let join = server
        .mock("POST", "/api/events/e1/join")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": "Joined event"}).to_string())
        .create();
    let leave = server
        .mock("DELETE", "/api/events/e1/join")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": "Left event"}).to_string())
        .create();

    let client = ApiClient::new(server.url()).unwrap().with_token("tok");
    client.join_event("e1").unwrap();
    client.leave_event("e1").unwrap();

    join.assert();
    leave.assert();
}
