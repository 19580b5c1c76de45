use askama::Template;
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::services::{PostStore, Severity};

pub struct PostRow {
    pub id: String,
    pub course: String,
    pub description: String,
    pub editing: bool,
}

pub struct NoticeView {
    pub id: u64,
    pub title: &'static str,
    pub description: &'static str,
    pub severity: Severity,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub course: String,
    pub description: String,
    pub submit_label: &'static str,
    pub editing: bool,
    pub posts: Vec<PostRow>,
    pub notices: Vec<NoticeView>,
}

impl IndexTemplate {
    /// Derives the page from store state. Expired toasts are left out.
    pub fn from_store(store: &PostStore, now: DateTime<Utc>) -> Self {
        let editing_id = store.mode().editing_id();

        let posts = store
            .posts()
            .iter()
            .map(|post| PostRow {
                id: post.id.clone(),
                course: post.course.clone(),
                description: post.description.clone(),
                editing: editing_id == Some(post.id.as_str()),
            })
            .collect();

        let notices = store
            .notifications()
            .live(now)
            .map(|n| NoticeView {
                id: n.id,
                title: n.title,
                description: n.description,
                severity: n.severity,
            })
            .collect();

        Self {
            course: store.draft().course.clone(),
            description: store.draft().description.clone(),
            submit_label: store.mode().submit_label(),
            editing: editing_id.is_some(),
            posts,
            notices,
        }
    }
}

pub fn render_page(store: &PostStore, now: DateTime<Utc>) -> Result<String, AppError> {
    Ok(IndexTemplate::from_store(store, now).render()?)
}
