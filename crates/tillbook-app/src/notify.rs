//! # Notification Center
//!
//! The transient user-visible messages ("Category added successfully",
//! "Not enough stock available") that every screen shows.
//!
//! ## Lifecycle
//! ```text
//! publish(message, severity)
//!      │
//!      ▼
//! active list gains a Notification ──► subscribers see the new list
//!      │
//!      ├── dismiss(id) / dismiss_all()         (explicit)
//!      └── sweep(now) past expires_at          (auto-dismiss)
//!                 │
//!                 ▼
//! active list shrinks ──► subscribers see the new list
//! ```
//!
//! This is an explicit, injectable service rather than module-level state:
//! every controller holds an `Arc<NotificationCenter>`, and any number of
//! UI surfaces (or tests) can observe it without hidden globals. Timed
//! dismissal is expressed as data (`expires_at`) plus a `sweep` the host
//! loop calls on its own tick, which keeps the service free of timers.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

// =============================================================================
// Notification
// =============================================================================

/// Severity of a notification; decides styling and default lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Default auto-dismiss lifetime: errors linger longest.
    pub fn default_duration(self) -> Duration {
        match self {
            Severity::Success | Severity::Info => Duration::milliseconds(3000),
            Severity::Warning => Duration::milliseconds(4000),
            Severity::Error => Duration::milliseconds(5000),
        }
    }
}

/// Identifier handed back by [`NotificationCenter::publish`].
pub type NotificationId = u64;

/// Identifier handed back by [`NotificationCenter::subscribe`].
pub type SubscriberId = u64;

/// A single active notification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub posted_at: DateTime<Utc>,
    /// Absent for persistent notifications (explicit dismiss only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Notification Center
// =============================================================================

type Subscriber = Arc<dyn Fn(&[Notification]) + Send + Sync>;

#[derive(Default)]
struct Inner {
    next_notification_id: u64,
    next_subscriber_id: u64,
    active: Vec<Notification>,
    subscribers: Vec<(SubscriberId, Subscriber)>,
}

/// The injectable notification service.
#[derive(Default)]
pub struct NotificationCenter {
    inner: Mutex<Inner>,
}

impl NotificationCenter {
    /// Creates an empty notification center.
    pub fn new() -> Self {
        NotificationCenter::default()
    }

    /// Publishes a notification with the severity's default lifetime.
    pub fn publish(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.publish_with_duration(message, severity, Some(severity.default_duration()))
    }

    /// Publishes with an explicit lifetime; `None` means persistent.
    pub fn publish_with_duration(
        &self,
        message: impl Into<String>,
        severity: Severity,
        duration: Option<Duration>,
    ) -> NotificationId {
        let now = Utc::now();
        let (id, snapshot, subscribers) = {
            let mut inner = self.inner.lock().expect("notification mutex poisoned");
            inner.next_notification_id += 1;
            let id = inner.next_notification_id;
            inner.active.push(Notification {
                id,
                message: message.into(),
                severity,
                posted_at: now,
                expires_at: duration.map(|d| now + d),
            });
            (id, inner.active.clone(), snapshot_subscribers(&inner))
        };
        notify(&subscribers, &snapshot);
        id
    }

    /// Shorthand for a success notification.
    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.publish(message, Severity::Success)
    }

    /// Shorthand for an info notification.
    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.publish(message, Severity::Info)
    }

    /// Shorthand for a warning notification.
    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.publish(message, Severity::Warning)
    }

    /// Shorthand for an error notification.
    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.publish(message, Severity::Error)
    }

    /// Dismisses one notification by id. Unknown ids are a no-op.
    pub fn dismiss(&self, id: NotificationId) {
        let (changed, snapshot, subscribers) = {
            let mut inner = self.inner.lock().expect("notification mutex poisoned");
            let before = inner.active.len();
            inner.active.retain(|n| n.id != id);
            (
                inner.active.len() != before,
                inner.active.clone(),
                snapshot_subscribers(&inner),
            )
        };
        if changed {
            notify(&subscribers, &snapshot);
        }
    }

    /// Dismisses everything.
    pub fn dismiss_all(&self) {
        let (changed, snapshot, subscribers) = {
            let mut inner = self.inner.lock().expect("notification mutex poisoned");
            let changed = !inner.active.is_empty();
            inner.active.clear();
            (changed, inner.active.clone(), snapshot_subscribers(&inner))
        };
        if changed {
            notify(&subscribers, &snapshot);
        }
    }

    /// Drops notifications whose lifetime has elapsed as of `now`.
    ///
    /// Returns how many were dismissed.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let (dropped, snapshot, subscribers) = {
            let mut inner = self.inner.lock().expect("notification mutex poisoned");
            let before = inner.active.len();
            inner
                .active
                .retain(|n| n.expires_at.map_or(true, |at| at > now));
            (
                before - inner.active.len(),
                inner.active.clone(),
                snapshot_subscribers(&inner),
            )
        };
        if dropped > 0 {
            notify(&subscribers, &snapshot);
        }
        dropped
    }

    /// The currently active notifications, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.inner
            .lock()
            .expect("notification mutex poisoned")
            .active
            .clone()
    }

    /// Registers an observer that receives the active list after every
    /// change.
    pub fn subscribe<F>(&self, observer: F) -> SubscriberId
    where
        F: Fn(&[Notification]) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().expect("notification mutex poisoned");
        inner.next_subscriber_id += 1;
        let id = inner.next_subscriber_id;
        inner.subscribers.push((id, Arc::new(observer)));
        id
    }

    /// Removes an observer. Unknown ids are a no-op.
    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut inner = self.inner.lock().expect("notification mutex poisoned");
        inner.subscribers.retain(|(s, _)| *s != id);
    }
}

fn snapshot_subscribers(inner: &Inner) -> Vec<Subscriber> {
    inner.subscribers.iter().map(|(_, s)| s.clone()).collect()
}

// Observers run outside the lock so they may call back into the center.
fn notify(subscribers: &[Subscriber], active: &[Notification]) {
    for subscriber in subscribers {
        subscriber(active);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
