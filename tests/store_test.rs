use async_trait::async_trait;
use course_posts::{
    error::AppError,
    models::{Draft, Post, PostPayload},
    posts_api::{MemoryPostsApi, PostsApi},
    services::{FormMode, PostStore, Severity},
};

/// Remote API that is never reachable.
struct OfflineApi;

#[async_trait]
impl PostsApi for OfflineApi {
    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        Err(offline())
    }

    async fn create_post(&self, _payload: &PostPayload) -> Result<Post, AppError> {
        Err(offline())
    }

    async fn update_post(&self, _id: &str, _payload: &PostPayload) -> Result<Post, AppError> {
        Err(offline())
    }

    async fn delete_post(&self, _id: &str) -> Result<(), AppError> {
        Err(offline())
    }
}

fn offline() -> AppError {
    AppError::Api {
        status: 503,
        body: "offline".to_string(),
    }
}

fn post(id: &str, course: &str, description: &str) -> Post {
    Post {
        id: id.to_string(),
        course: course.to_string(),
        description: description.to_string(),
    }
}

fn seeded_api() -> MemoryPostsApi {
    MemoryPostsApi::with_posts(vec![
        post("41", "CS100", "Basics"),
        post("42", "CS101", "Intro"),
        post("43", "MA201", "Linear algebra"),
    ])
}

async fn loaded_store(api: &dyn PostsApi) -> PostStore {
    let mut store = PostStore::default();
    store.load(api).await.expect("Failed to load posts");
    store
}

#[tokio::test]
async fn test_load_keeps_server_order() {
    let api = seeded_api();
    let store = loaded_store(&api).await;

    let ids: Vec<&str> = store.posts().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["41", "42", "43"]);
    assert_eq!(store.mode(), &FormMode::CreatingNew);
    assert!(store.notifications().is_empty());
}

#[tokio::test]
async fn test_load_twice_without_mutation_is_idempotent() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;
    let first = store.posts().to_vec();

    store.load(&api).await.expect("Failed to reload posts");

    assert_eq!(store.posts(), first.as_slice());
}

#[tokio::test]
async fn test_failed_load_leaves_list_untouched() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;

    let result = store.load(&OfflineApi).await;

    assert!(result.is_err());
    assert_eq!(store.posts().len(), 3);
}

#[tokio::test]
async fn test_create_appends_post_and_clears_draft() {
    let api = MemoryPostsApi::new();
    let mut store = loaded_store(&api).await;

    store.set_course("CS101");
    store.set_description("Intro");
    let created = store.submit(&api).await.expect("Failed to create post");

    assert!(!created.id.is_empty());
    assert_eq!(store.posts().len(), 1);
    assert_eq!(store.posts()[0].id, created.id);
    assert_eq!(store.posts()[0].course, "CS101");
    assert_eq!(store.posts()[0].description, "Intro");
    assert!(store.draft().is_empty());
    assert_eq!(store.mode(), &FormMode::CreatingNew);

    let notices: Vec<_> = store.notifications().live(chrono::Utc::now()).collect();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Success);
    assert_eq!(notices[0].title, "Post Created.");
}

#[tokio::test]
async fn test_request_edit_copies_fields_without_api_call() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;

    store.request_edit("42").expect("Row 42 should exist");

    assert_eq!(store.mode(), &FormMode::Editing("42".to_string()));
    assert_eq!(store.mode().submit_label(), "Edit Post");
    assert_eq!(store.draft(), &Draft::new("CS101", "Intro"));
    assert_eq!(api.snapshot().await, store.posts().to_vec());
}

#[tokio::test]
async fn test_submit_in_edit_mode_updates_only_that_post() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;
    let before = store.posts().to_vec();

    store.request_edit("42").expect("Row 42 should exist");
    store.set_course("CS102");
    let updated = store.submit(&api).await.expect("Failed to update post");

    assert_eq!(updated.id, "42");
    assert_eq!(store.posts().len(), 3);
    assert_eq!(store.posts()[0], before[0]);
    assert_eq!(store.posts()[1], post("42", "CS102", "Intro"));
    assert_eq!(store.posts()[2], before[2]);
    assert!(store.draft().is_empty());
    assert_eq!(store.mode(), &FormMode::CreatingNew);

    // An update, not a create.
    assert_eq!(api.snapshot().await.len(), 3);

    let severities: Vec<_> = store
        .notifications()
        .live(chrono::Utc::now())
        .map(|n| n.severity)
        .collect();
    assert_eq!(severities, vec![Severity::Info]);
}

#[tokio::test]
async fn test_edit_on_another_row_replaces_editing_id() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;

    store.request_edit("41").expect("Row 41 should exist");
    store.request_edit("43").expect("Row 43 should exist");

    assert_eq!(store.mode().editing_id(), Some("43"));
    assert_eq!(store.draft(), &Draft::new("MA201", "Linear algebra"));
}

#[tokio::test]
async fn test_request_edit_unknown_id_changes_nothing() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;
    store.set_course("draft");

    let result = store.request_edit("missing");

    assert!(matches!(result, Err(AppError::NotFound)));
    assert_eq!(store.mode(), &FormMode::CreatingNew);
    assert_eq!(store.draft().course, "draft");
}

#[tokio::test]
async fn test_delete_removes_exactly_one_post() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;

    store.delete(&api, "42").await.expect("Failed to delete post");

    let ids: Vec<&str> = store.posts().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["41", "43"]);

    let severities: Vec<_> = store
        .notifications()
        .live(chrono::Utc::now())
        .map(|n| n.severity)
        .collect();
    assert_eq!(severities, vec![Severity::Error]);
}

#[tokio::test]
async fn test_failed_create_keeps_list_and_draft() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;

    store.set_course("CS101");
    store.set_description("Intro");
    let result = store.submit(&OfflineApi).await;

    assert!(result.is_err());
    assert_eq!(store.posts().len(), 3);
    assert_eq!(store.draft(), &Draft::new("CS101", "Intro"));
    assert!(store.notifications().is_empty());
}

#[tokio::test]
async fn test_failed_update_keeps_edit_mode() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;
    let before = store.posts().to_vec();

    store.request_edit("42").expect("Row 42 should exist");
    store.set_description("Changed");
    let result = store.submit(&OfflineApi).await;

    assert!(result.is_err());
    assert_eq!(store.posts(), before.as_slice());
    assert_eq!(store.mode(), &FormMode::Editing("42".to_string()));
    assert_eq!(store.draft().description, "Changed");
    assert!(store.notifications().is_empty());
}

#[tokio::test]
async fn test_failed_delete_keeps_list() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;

    let result = store.delete(&OfflineApi, "42").await;

    assert!(result.is_err());
    assert_eq!(store.posts().len(), 3);
    assert!(store.notifications().is_empty());
}

#[tokio::test]
async fn test_successful_sequence_matches_server_list() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;

    store.set_draft(Draft::new("PH110", "Mechanics"));
    let created = store.submit(&api).await.expect("Failed to create post");

    store.request_edit("41").expect("Row 41 should exist");
    store.set_description("Basics, revised");
    store.submit(&api).await.expect("Failed to update post");

    store.delete(&api, "43").await.expect("Failed to delete post");

    store.request_edit(&created.id).expect("Created row should exist");
    store.set_course("PH111");
    store.submit(&api).await.expect("Failed to update created post");

    assert_eq!(store.posts(), api.snapshot().await.as_slice());
    assert_eq!(store.notifications().len(), 4);
}

#[tokio::test]
async fn test_delete_unknown_id_makes_no_api_call() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;

    let result = store.delete(&api, "43/../42").await;

    assert!(matches!(result, Err(AppError::NotFound)));
    assert_eq!(api.snapshot().await.len(), 3);
    assert_eq!(store.posts().len(), 3);
    assert!(store.notifications().is_empty());
}

#[tokio::test]
async fn test_finish_submit_keeps_inputs_changed_in_flight() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;

    store.set_draft(Draft::new("PH110", "Mechanics"));
    let pending = store.begin_submit();
    assert_eq!(pending.mode(), &FormMode::CreatingNew);

    // The user picks another row while the create is still pending.
    store.request_edit("43").expect("Row 43 should exist");

    let result = pending.send(&api).await;
    let created = store.finish_submit(pending, result).expect("Failed to create post");

    assert_eq!(store.posts().last(), Some(&created));
    assert_eq!(store.posts(), api.snapshot().await.as_slice());
    assert_eq!(store.mode(), &FormMode::Editing("43".to_string()));
    assert_eq!(store.draft(), &Draft::new("MA201", "Linear algebra"));
}

#[tokio::test]
async fn test_finish_delete_after_failure_keeps_list() {
    let api = seeded_api();
    let mut store = loaded_store(&api).await;

    store.begin_delete("41").expect("Row 41 should exist");
    let result = OfflineApi.delete_post("41").await;

    assert!(store.finish_delete("41", result).is_err());
    assert_eq!(store.posts().len(), 3);
}
