pub mod memory;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::{Post, PostPayload};

pub use memory::MemoryPostsApi;

#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, AppError>;
    async fn create_post(&self, payload: &PostPayload) -> Result<Post, AppError>;
    async fn update_post(&self, id: &str, payload: &PostPayload) -> Result<Post, AppError>;
    async fn delete_post(&self, id: &str) -> Result<(), AppError>;
}

/// Client for the remote `/api/posts` resource.
pub struct PostsHttpClient {
    client: Client,
    base_url: Url,
}

impl PostsHttpClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        let mut base_url = Url::parse(base_url.as_ref())
            .map_err(|e| AppError::Config(format!("POSTS_API_URL is invalid: {}", e)))?;
        base_url
            .path_segments_mut()
            .map_err(|_| AppError::Config("POSTS_API_URL cannot be a base URL".to_string()))?
            .pop_if_empty();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `{base}/{id}` with the id percent-encoded as a single path segment.
    pub fn item_url(&self, id: &str) -> Result<Url, AppError> {
        // The url crate drops dot segments instead of encoding them.
        if id.is_empty() || id == "." || id == ".." {
            return Err(AppError::InvalidId(id.to_string()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config("POSTS_API_URL cannot be a base URL".to_string()))?
            .push(id);
        Ok(url)
    }

    async fn check_status(response: Response) -> Result<Response, AppError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api { status, body });
        }
        Ok(response)
    }

    async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let response = Self::check_status(response).await?;
        let body_text = response.text().await?;
        serde_json::from_str::<T>(&body_text).map_err(|e| {
            tracing::error!("Failed to parse posts API response: {}", e);
            AppError::Decode(e)
        })
    }
}

#[async_trait]
impl PostsApi for PostsHttpClient {
    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        tracing::debug!("GET {}", self.base_url);
        let response = self.client.get(self.base_url.clone()).send().await?;
        let posts: Vec<Post> = Self::parse_body(response).await?;
        tracing::debug!("Fetched {} posts", posts.len());
        Ok(posts)
    }

    async fn create_post(&self, payload: &PostPayload) -> Result<Post, AppError> {
        tracing::debug!("POST {}", self.base_url);
        let response = self
            .client
            .post(self.base_url.clone())
            .json(payload)
            .send()
            .await?;
        Self::parse_body(response).await
    }

    async fn update_post(&self, id: &str, payload: &PostPayload) -> Result<Post, AppError> {
        let url = self.item_url(id)?;
        tracing::debug!("PUT {}", url);
        let response = self.client.put(url).json(payload).send().await?;
        Self::parse_body(response).await
    }

    async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        let url = self.item_url(id)?;
        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        // Body is ignored.
        Self::check_status(response).await?;
        Ok(())
    }
}
