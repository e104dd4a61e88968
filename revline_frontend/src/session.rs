use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;

use crate::api::ApiClient;
use crate::models::User;

/// Persists the one piece of client-side state that survives restarts: the
/// session token, stored as a single file under the user's home directory.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new() -> Self {
        let dir = if let Some(home) = dirs::home_dir() {
            home.join(".revline")
        } else {
            PathBuf::from(".revline")
        };
        Self {
            path: dir.join("token"),
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_owned())
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, token)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    pub fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                warn!("failed to remove token file: {err}");
            }
        }
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Constructed but bootstrap has not started yet.
    Uninitialized,
    /// A persisted token exists and the profile fetch is in flight.
    Loading,
    Authenticated,
    Unauthenticated,
}

/// The session owns the token and the cached profile of the signed-in user.
/// Outside of the bootstrap window, a token is held if and only if a user is
/// held; request-issuing code obtains its credentials through
/// [`Session::attach_credentials`] rather than any shared mutable state.
pub struct Session {
    phase: SessionPhase,
    token: Option<String>,
    user: Option<User>,
    store: TokenStore,
}

impl Session {
    pub fn new(store: TokenStore) -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            token: None,
            user: None,
            store,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_mut(&mut self) -> Option<&mut User> {
        self.user.as_mut()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns a client handle carrying exactly this session's credentials.
    pub fn attach_credentials(&self, client: &ApiClient) -> ApiClient {
        match &self.token {
            Some(token) => client.with_token(token.clone()),
            None => client.without_token(),
        }
    }

    /// Starts the bootstrap: reads the persisted token and, when one exists,
    /// moves to `Loading` and returns it so the profile fetch can be issued.
    /// With no persisted token the session settles straight into
    /// `Unauthenticated`.
    pub fn begin_bootstrap(&mut self) -> Option<String> {
        match self.store.load() {
            Some(token) => {
                self.phase = SessionPhase::Loading;
                self.token = Some(token.clone());
                Some(token)
            }
            None => {
                self.phase = SessionPhase::Unauthenticated;
                None
            }
        }
    }

    pub fn complete_bootstrap(&mut self, user: User) {
        self.user = Some(user);
        self.phase = SessionPhase::Authenticated;
    }

    /// Ends a failed bootstrap. The persisted token is discarded only when
    /// the server rejected it; a transport failure keeps the file so the next
    /// start can retry.
    pub fn fail_bootstrap(&mut self, token_rejected: bool) {
        if token_rejected {
            self.store.clear();
        }
        self.token = None;
        self.user = None;
        self.phase = SessionPhase::Unauthenticated;
    }

    /// Installs a fresh login/registration result and persists its token.
    pub fn establish(&mut self, user: User, token: String) {
        if let Err(err) = self.store.save(&token) {
            warn!("failed to persist session token: {err:#}");
        }
        self.token = Some(token);
        self.user = Some(user);
        self.phase = SessionPhase::Authenticated;
    }

    /// Logout: clears persisted and in-memory state without a server round
    /// trip. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.store.clear();
        self.token = None;
        self.user = None;
        self.phase = SessionPhase::Unauthenticated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_user(id: &str) -> User {
        User {
            id: id.to_owned(),
            username: format!("driver_{id}"),
            email: format!("{id}@revline.test"),
            bio: String::new(),
            profile_image: String::new(),
            followed_users: Vec::new(),
            followers: Vec::new(),
            created_at: "2025-01-01T00:00:00Z".to_owned(),
        }
    }

    fn store_in(dir: &TempDir) -> TokenStore {
        TokenStore::at(dir.path().join("token"))
    }

    #[test]
    fn bootstrap_without_persisted_token_settles_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(store_in(&dir));
        assert_eq!(session.phase(), SessionPhase::Uninitialized);
        assert_eq!(session.begin_bootstrap(), None);
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn bootstrap_round_trips_the_persisted_token() {
        let dir = TempDir::new().unwrap();
        let user = sample_user("u1");

        let mut first = Session::new(store_in(&dir));
        first.begin_bootstrap();
        first.establish(user.clone(), "tok-1".to_owned());
        assert!(first.is_authenticated());

        // Simulated restart: a fresh session over the same store.
        let mut second = Session::new(store_in(&dir));
        assert_eq!(second.begin_bootstrap().as_deref(), Some("tok-1"));
        assert_eq!(second.phase(), SessionPhase::Loading);
        second.complete_bootstrap(user.clone());
        assert_eq!(second.phase(), SessionPhase::Authenticated);
        assert_eq!(second.user().unwrap().id, user.id);
    }

    #[test]
    fn rejected_token_is_discarded_on_failed_bootstrap() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).save("stale").unwrap();

        let mut session = Session::new(store_in(&dir));
        session.begin_bootstrap();
        session.fail_bootstrap(true);

        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert!(session.token().is_none());
        assert_eq!(store_in(&dir).load(), None);
    }

    #[test]
    fn transport_failure_keeps_the_persisted_token() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).save("tok-2").unwrap();

        let mut session = Session::new(store_in(&dir));
        session.begin_bootstrap();
        session.fail_bootstrap(false);

        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert!(session.token().is_none());
        assert_eq!(store_in(&dir).load().as_deref(), Some("tok-2"));
    }

    #[test]
    fn logout_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(store_in(&dir));
        session.begin_bootstrap();
        session.establish(sample_user("u2"), "tok-3".to_owned());

        session.clear();
        let phase_after_first = session.phase();
        assert!(session.token().is_none() && session.user().is_none());

        session.clear();
        assert_eq!(session.phase(), phase_after_first);
        assert!(session.token().is_none() && session.user().is_none());
        assert_eq!(store_in(&dir).load(), None);
    }

    #[test]
    fn token_and_user_stay_paired_in_steady_states() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(store_in(&dir));
        session.begin_bootstrap();
        assert_eq!(session.token().is_some(), session.user().is_some());

        session.establish(sample_user("u3"), "tok-4".to_owned());
        assert!(session.token().is_some() && session.user().is_some());

        session.clear();
        assert!(session.token().is_none() && session.user().is_none());
    }

    #[test]
    fn empty_token_file_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("").unwrap();
        assert_eq!(store.load(), None);
    }
}
