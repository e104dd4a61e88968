use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    AuthResponse, Comment, CreateCommentInput, CreateEventInput, CreateProjectInput, DiscoverUser,
    Event, LikeResponse, LikeToggleInput, LoginInput, Project, RegisterInput, SearchResults, User,
};

/// Failure at the API boundary, either reported by the server or raised by
/// the transport underneath it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success status from the server; `detail` holds the message
    /// extracted from its JSON error body.
    #[error("{detail}")]
    Server { status: StatusCode, detail: String },
    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ApiError::Server { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base = sanitize_base_url(base_url.into())?;
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base,
            token: None,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Returns a handle that attaches `token` as a bearer credential to every
    /// request it issues.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        let mut client = self.clone();
        client.token = Some(token.into());
        client
    }

    pub fn without_token(&self) -> Self {
        let mut client = self.clone();
        client.token = None;
        client
    }

    pub fn login(&self, input: &LoginInput) -> Result<AuthResponse> {
        Ok(self.post_json("/auth/login", input)?)
    }

    pub fn register(&self, input: &RegisterInput) -> Result<AuthResponse> {
        Ok(self.post_json("/auth/register", input)?)
    }

    pub fn current_user(&self) -> Result<User> {
        Ok(self.get_json("/auth/me")?)
    }

    pub fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.get_json("/projects")?)
    }

    pub fn create_project(&self, input: &CreateProjectInput) -> Result<Project> {
        Ok(self.post_json("/projects", input)?)
    }

    pub fn list_comments(&self, project_id: &str) -> Result<Vec<Comment>> {
        Ok(self.get_json(&format!("/projects/{project_id}/comments"))?)
    }

    pub fn create_comment(&self, input: &CreateCommentInput) -> Result<Comment> {
        Ok(self.post_json("/comments", input)?)
    }

    pub fn toggle_like(&self, project_id: &str) -> Result<LikeResponse> {
        let input = LikeToggleInput {
            project_id: project_id.to_owned(),
        };
        Ok(self.post_json("/likes", &input)?)
    }

    pub fn list_events(&self) -> Result<Vec<Event>> {
        Ok(self.get_json("/events")?)
    }

    pub fn create_event(&self, input: &CreateEventInput) -> Result<Event> {
        Ok(self.post_json("/events", input)?)
    }

    pub fn join_event(&self, event_id: &str) -> Result<()> {
        let request = self.client.post(self.url(&format!("/events/{event_id}/join")));
        self.check(request)?;
        Ok(())
    }

    pub fn leave_event(&self, event_id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.url(&format!("/events/{event_id}/join")));
        self.check(request)?;
        Ok(())
    }

    pub fn follow_user(&self, user_id: &str) -> Result<()> {
        let request = self.client.post(self.url(&format!("/users/{user_id}/follow")));
        self.check(request)?;
        Ok(())
    }

    pub fn unfollow_user(&self, user_id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.url(&format!("/users/{user_id}/follow")));
        self.check(request)?;
        Ok(())
    }

    pub fn discover_users(&self) -> Result<Vec<DiscoverUser>> {
        Ok(self.get_json("/discover/users")?)
    }

    pub fn search(&self, query: &str) -> Result<SearchResults> {
        let request = self.client.get(self.url("/search")).query(&[("q", query)]);
        let response = self.check(request)?;
        Ok(response.json().map_err(ApiError::from)?)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.check(self.client.get(self.url(path)))?;
        Ok(response.json()?)
    }

    fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.check(self.client.post(self.url(path)).json(body))?;
        Ok(response.json()?)
    }

    fn check(&self, mut request: RequestBuilder) -> Result<Response, ApiError> {
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ApiError::Server {
            status,
            detail: extract_detail(status, &body),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

fn extract_detail(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.detail;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.to_string()
    } else {
        trimmed.to_owned()
    }
}

fn sanitize_base_url(mut base: String) -> Result<String> {
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{base}");
    }
    // A trailing slash would produce `//api` in request URLs.
    while base.ends_with('/') {
        base.pop();
    }
    let _ = Url::parse(&base).context("invalid base URL")?;
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitize_adds_scheme_and_strips_trailing_slash() {
        assert_eq!(
            sanitize_base_url("localhost:8000/".into()).unwrap(),
            "http://localhost:8000"
        );
        assert_eq!(
            sanitize_base_url("https://revline.example//".into()).unwrap(),
            "https://revline.example"
        );
    }

    #[test]
    fn sanitize_rejects_garbage() {
        assert!(sanitize_base_url("http://".into()).is_err());
    }

    #[test]
    fn urls_carry_the_api_prefix() {
        let client = ApiClient::new("127.0.0.1:8000").unwrap();
        assert_eq!(client.url("/projects"), "http://127.0.0.1:8000/api/projects");
        assert_eq!(
            client.url("/events/e1/join"),
            "http://127.0.0.1:8000/api/events/e1/join"
        );
    }

    #[test]
    fn detail_extraction_prefers_json_body() {
        assert_eq!(
            extract_detail(
                StatusCode::BAD_REQUEST,
                "{\"detail\": \"Username already exists\"}"
            ),
            "Username already exists"
        );
    }

    #[test]
    fn detail_extraction_falls_back_to_raw_body_then_status() {
        assert_eq!(
            extract_detail(StatusCode::BAD_GATEWAY, "upstream timed out"),
            "upstream timed out"
        );
        assert_eq!(
            extract_detail(StatusCode::INTERNAL_SERVER_ERROR, "  "),
            "500 Internal Server Error"
        );
    }

    #[test]
    fn auth_failures_are_recognized() {
        let unauthorized = ApiError::Server {
            status: StatusCode::UNAUTHORIZED,
            detail: "Invalid token".into(),
        };
        let not_found = ApiError::Server {
            status: StatusCode::NOT_FOUND,
            detail: "User not found".into(),
        };
        assert!(unauthorized.is_auth_failure());
        assert!(!not_found.is_auth_failure());
    }

    #[test]
    fn token_attachment_is_per_handle() {
        let client = ApiClient::new("127.0.0.1:8000").unwrap();
        assert!(!client.has_token());
        let authed = client.with_token("abc");
        assert!(authed.has_token());
        assert!(!client.has_token());
        assert!(!authed.without_token().has_token());
    }
}
