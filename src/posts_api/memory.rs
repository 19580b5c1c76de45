use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Post, PostPayload};

use super::PostsApi;

/// In-process stand-in for the remote posts API.
#[derive(Default)]
pub struct MemoryPostsApi {
    posts: Mutex<Vec<Post>>,
}

impl MemoryPostsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
        }
    }

    pub async fn snapshot(&self) -> Vec<Post> {
        self.posts.lock().await.clone()
    }
}

#[async_trait]
impl PostsApi for MemoryPostsApi {
    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        Ok(self.posts.lock().await.clone())
    }

    async fn create_post(&self, payload: &PostPayload) -> Result<Post, AppError> {
        let post = Post {
            id: Uuid::new_v4().simple().to_string(),
            course: payload.course.clone(),
            description: payload.description.clone(),
        };
        self.posts.lock().await.push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: &str, payload: &PostPayload) -> Result<Post, AppError> {
        let mut posts = self.posts.lock().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;
        post.course = payload.course.clone();
        post.description = payload.description.clone();
        Ok(post.clone())
    }

    async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        let mut posts = self.posts.lock().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
