use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

/// The mutation a notification reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    PostCreated,
    PostUpdated,
    PostDeleted,
}

impl NoticeKind {
    pub fn title(self) -> &'static str {
        match self {
            NoticeKind::PostCreated => "Post Created.",
            NoticeKind::PostUpdated => "Post Updated.",
            NoticeKind::PostDeleted => "Post Deleted.",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            NoticeKind::PostCreated => "Your new post has been added.",
            NoticeKind::PostUpdated => "Your post has been successfully updated.",
            NoticeKind::PostDeleted => "The post has been removed.",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            NoticeKind::PostCreated => Severity::Success,
            NoticeKind::PostUpdated => Severity::Info,
            NoticeKind::PostDeleted => Severity::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub title: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub raised_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub closable: bool,
}

impl Notification {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// One-shot toasts with a fixed display duration.
#[derive(Debug)]
pub struct NotificationTray {
    next_id: u64,
    duration: TimeDelta,
    items: Vec<Notification>,
}

impl Default for NotificationTray {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl NotificationTray {
    pub fn new(duration: Duration) -> Self {
        Self {
            next_id: 1,
            duration: TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX),
            items: Vec::new(),
        }
    }

    pub fn raise(&mut self, kind: NoticeKind) -> u64 {
        self.raise_at(kind, Utc::now())
    }

    pub fn raise_at(&mut self, kind: NoticeKind, now: DateTime<Utc>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let expires_at = now.checked_add_signed(self.duration).unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.items.push(Notification {
            id,
            title: kind.title(),
            description: kind.description(),
            severity: kind.severity(),
            raised_at: now,
            expires_at,
            closable: true,
        });
        id
    }

    pub fn live(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(move |n| n.is_live(now))
    }

    pub fn prune(&mut self, now: DateTime<Utc>) {
        self.items.retain(|n| n.is_live(now));
    }

    /// Returns false when the notification is already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
