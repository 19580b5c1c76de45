use std::time::Duration;

use tracing::{error, info};

use crate::error::AppError;
use crate::models::{Draft, Post};
use crate::posts_api::PostsApi;
use crate::services::notifications::{NoticeKind, NotificationTray};

/// Which operation the submit button performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    CreatingNew,
    Editing(String),
}

impl FormMode {
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::CreatingNew => "Create Post",
            FormMode::Editing(_) => "Edit Post",
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            FormMode::CreatingNew => None,
            FormMode::Editing(id) => Some(id),
        }
    }
}

/// A submit taken from the form, independent of later form changes.
#[derive(Debug, Clone)]
pub struct PendingSubmit {
    mode: FormMode,
    draft: Draft,
}

impl PendingSubmit {
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub async fn send(&self, api: &dyn PostsApi) -> Result<Post, AppError> {
        let payload = self.draft.to_payload();
        match &self.mode {
            FormMode::CreatingNew => api.create_post(&payload).await,
            FormMode::Editing(id) => api.update_post(id, &payload).await,
        }
    }
}

/// Local mirror of the server's post list plus the form state.
///
/// Mutations are split into `begin_*` and `finish_*` so the API call can run
/// without the store borrowed. Local state only changes in `finish_*`, so a
/// failed call leaves the list, the draft and the mode as they were.
#[derive(Debug)]
pub struct PostStore {
    posts: Vec<Post>,
    draft: Draft,
    mode: FormMode,
    notifications: NotificationTray,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new(crate::services::notifications::DEFAULT_TOAST_DURATION)
    }
}

impl PostStore {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            posts: Vec::new(),
            draft: Draft::default(),
            mode: FormMode::CreatingNew,
            notifications: NotificationTray::new(toast_duration),
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn notifications(&self) -> &NotificationTray {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationTray {
        &mut self.notifications
    }

    pub fn set_course(&mut self, course: impl Into<String>) {
        self.draft.course = course.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_draft(&mut self, draft: Draft) {
        self.draft = draft;
    }

    /// Replaces the whole local list with the server's.
    pub async fn load(&mut self, api: &dyn PostsApi) -> Result<(), AppError> {
        match api.list_posts().await {
            Ok(posts) => {
                info!("Loaded {} posts", posts.len());
                self.posts = posts;
                Ok(())
            }
            Err(e) => {
                error!("Error fetching posts: {}", e);
                Err(e)
            }
        }
    }

    /// Captures the current form so it can be sent without holding the store.
    pub fn begin_submit(&self) -> PendingSubmit {
        PendingSubmit {
            mode: self.mode.clone(),
            draft: self.draft.clone(),
        }
    }

    /// Applies the outcome of a submit sent with `PendingSubmit::send`.
    pub fn finish_submit(
        &mut self,
        pending: PendingSubmit,
        result: Result<Post, AppError>,
    ) -> Result<Post, AppError> {
        let post = match (&pending.mode, result) {
            (FormMode::CreatingNew, Err(e)) => {
                error!("Error creating post: {}", e);
                return Err(e);
            }
            (FormMode::Editing(id), Err(e)) => {
                error!("Error editing post {}: {}", id, e);
                return Err(e);
            }
            (FormMode::CreatingNew, Ok(post)) => {
                self.posts.push(post.clone());
                self.notifications.raise(NoticeKind::PostCreated);
                info!("Created post {}", post.id);
                post
            }
            (FormMode::Editing(id), Ok(post)) => {
                for existing in self.posts.iter_mut().filter(|p| &p.id == id) {
                    *existing = post.clone();
                }
                self.notifications.raise(NoticeKind::PostUpdated);
                info!("Updated post {}", id);
                post
            }
        };

        // Inputs changed while the request was in flight are kept.
        if self.draft == pending.draft {
            self.draft.clear();
        }
        if self.mode == pending.mode {
            self.mode = FormMode::CreatingNew;
        }
        Ok(post)
    }

    pub async fn submit(&mut self, api: &dyn PostsApi) -> Result<Post, AppError> {
        let pending = self.begin_submit();
        let result = pending.send(api).await;
        self.finish_submit(pending, result)
    }

    /// Switches the form to edit mode for `id`. Makes no API call.
    pub fn request_edit(&mut self, id: &str) -> Result<(), AppError> {
        let post = self
            .posts
            .iter()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;
        self.draft = Draft::from(post);
        self.mode = FormMode::Editing(post.id.clone());
        Ok(())
    }

    /// Only rows in the local list can be deleted.
    pub fn begin_delete(&self, id: &str) -> Result<(), AppError> {
        if self.posts.iter().any(|p| p.id == id) {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    pub fn finish_delete(&mut self, id: &str, result: Result<(), AppError>) -> Result<(), AppError> {
        result.inspect_err(|e| error!("Error deleting post {}: {}", id, e))?;

        self.posts.retain(|p| p.id != id);
        self.notifications.raise(NoticeKind::PostDeleted);
        info!("Deleted post {}", id);
        Ok(())
    }

    pub async fn delete(&mut self, api: &dyn PostsApi, id: &str) -> Result<(), AppError> {
        self.begin_delete(id)?;
        let result = api.delete_post(id).await;
        self.finish_delete(id, result)
    }
}
