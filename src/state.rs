use std::sync::Arc;

use tokio::sync::Mutex;

use crate::posts_api::PostsApi;
use crate::services::PostStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<PostStore>>,
    /// Held for the whole remote call of a create, update or delete.
    pub mutations: Arc<Mutex<()>>,
    pub api: Arc<dyn PostsApi>,
}

impl AppState {
    pub fn new(store: PostStore, api: Arc<dyn PostsApi>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            mutations: Arc::new(Mutex::new(())),
            api,
        }
    }
}
