pub mod notifications;
pub mod post_store;

pub use notifications::{Notification, NotificationTray, NoticeKind, Severity};
pub use post_store::{FormMode, PendingSubmit, PostStore};
