use std::collections::HashMap;

use log::{info, warn};

use crate::models::{Comment, LikeResponse, Project};

use super::state::{CreateProjectState, ViewState};
use super::RevlineApp;

impl RevlineApp {
    pub(super) fn handle_projects_loaded(&mut self, result: Result<Vec<Project>, anyhow::Error>) {
        self.feed.loading = false;
        match result {
            Ok(mut projects) => {
                projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                self.feed.projects = projects;
            }
            Err(err) => {
                self.feed.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_project_created(&mut self, result: Result<Project, anyhow::Error>) {
        self.create_project.submitting = false;
        match result {
            Ok(mut project) => {
                info!("created project {}", project.id);
                // The create response has no embedded author, the list
                // endpoint fills it server-side. Patch it in locally.
                if project.user.is_none() {
                    project.user = self.session.user().map(|u| u.summary());
                }
                self.feed.projects.insert(0, project);
                self.create_project = CreateProjectState::default();
                self.show_create_project = false;
                self.view = ViewState::Feed;
                self.info_banner = Some("Project created".into());
            }
            Err(err) => {
                self.create_project.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_comments_loaded(
        &mut self,
        project_id: String,
        result: Result<Vec<Comment>, anyhow::Error>,
    ) {
        let Some(thread) = self.feed.expanded.get_mut(&project_id) else {
            return;
        };
        thread.loading = false;
        match result {
            Ok(comments) => {
                thread.comments = comments;
            }
            Err(err) => {
                thread.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_comment_posted(
        &mut self,
        project_id: String,
        result: Result<Comment, anyhow::Error>,
    ) {
        match result {
            Ok(comment) => {
                if let Some(thread) = self.feed.expanded.get_mut(&project_id) {
                    thread.posting = false;
                    thread.new_comment.clear();
                    thread.comments.push(comment);
                }
            }
            Err(err) => {
                // Undo the optimistic count bump from the spawn.
                if let Some(project) = self.feed.projects.iter_mut().find(|p| p.id == project_id) {
                    project.comments_count = (project.comments_count - 1).max(0);
                }
                if let Some(thread) = self.feed.expanded.get_mut(&project_id) {
                    thread.posting = false;
                    thread.post_error = Some(err.to_string());
                }
            }
        }
    }

    pub(super) fn handle_like_toggled(
        &mut self,
        project_id: String,
        result: Result<LikeResponse, anyhow::Error>,
    ) {
        match result {
            Ok(response) => {
                if let Some(project) = self.feed.projects.iter_mut().find(|p| p.id == project_id) {
                    apply_like_response(project, &mut self.feed.liked, response.liked);
                }
            }
            Err(err) => {
                warn!("like toggle failed for project {project_id}: {err:#}");
            }
        }
    }
}

/// Folds a like toggle response into the project counts. `liked` is the
/// record of what the server last told us about the current user's like,
/// keyed by project id; projects it has never answered for are absent.
/// The count only moves when that record changes, so replaying the same
/// response is a no-op.
pub(super) fn apply_like_response(
    project: &mut Project,
    liked: &mut HashMap<String, bool>,
    now_liked: bool,
) {
    let prev = liked.insert(project.id.clone(), now_liked);
    if prev == Some(now_liked) {
        return;
    }
    if now_liked {
        project.likes_count += 1;
    } else {
        project.likes_count = (project.likes_count - 1).max(0);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn project(likes: i64) -> Project {
        Project {
            id: "p1".into(),
            user_id: "u1".into(),
            user: None,
            title: "Widebody MX-5".into(),
            car_make: "Mazda".into(),
            car_model: "MX-5".into(),
            car_year: 1994,
            description: "slow build".into(),
            modifications: vec![],
            images: vec![],
            parts_list: vec![],
            build_cost: None,
            likes_count: likes,
            comments_count: 0,
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: None,
        }
    }

    #[test]
    fn first_liked_response_increments() {
        let mut p = project(4);
        let mut liked = HashMap::new();
        apply_like_response(&mut p, &mut liked, true);
        assert_eq!(p.likes_count, 5);
        assert_eq!(liked.get("p1"), Some(&true));
    }

    #[test]
    fn first_unliked_response_decrements() {
        let mut p = project(4);
        let mut liked = HashMap::new();
        apply_like_response(&mut p, &mut liked, false);
        assert_eq!(p.likes_count, 3);
    }

    #[test]
    fn repeated_response_does_not_move_the_count() {
        let mut p = project(4);
        let mut liked = HashMap::new();
        apply_like_response(&mut p, &mut liked, true);
        apply_like_response(&mut p, &mut liked, true);
        assert_eq!(p.likes_count, 5);
    }

    #[test]
    fn toggling_back_restores_the_count() {
        let mut p = project(4);
        let mut liked = HashMap::new();
        apply_like_response(&mut p, &mut liked, true);
        apply_like_response(&mut p, &mut liked, false);
        assert_eq!(p.likes_count, 4);
    }

    #[test]
    fn count_never_goes_negative() {
        let mut p = project(0);
        let mut liked = HashMap::new();
        apply_like_response(&mut p, &mut liked, false);
        assert_eq!(p.likes_count, 0);
    }
}
