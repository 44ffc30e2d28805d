//! Transient user notifications ("toasts").
//!
//! Every remote failure ends here: it is caught where it happens, logged, and
//! queued for the user. Nothing is rethrown to a page-level handler.

use std::collections::VecDeque;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Notifications a view keeps before the oldest are dropped.
pub const TOAST_CAPACITY: usize = 8;

/// Pending notifications of one view, oldest first. At most
/// [`TOAST_CAPACITY`] are kept.
#[derive(Debug, Default)]
pub struct Toasts {
    queue: VecDeque<Notification>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, notification: Notification) {
        if self.queue.len() == TOAST_CAPACITY {
            self.queue.pop_front();
        }
        self.queue.push_back(notification);
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        let (title, message) = (title.into(), message.into());
        info!(%title, %message, "Notify");
        self.push(Notification {
            level: Level::Success,
            title,
            message,
        });
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        let (title, message) = (title.into(), message.into());
        warn!(%title, %message, "Notify");
        self.push(Notification {
            level: Level::Error,
            title,
            message,
        });
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.queue.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.queue.iter().any(Notification::is_error)
    }

    /// Hands every pending notification to the caller and clears the queue.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_and_drain() {
        let mut toasts = Toasts::new();
        toasts.success("Saved", "Promotion created");
        toasts.error("Error", "Data store unavailable");

        assert_eq!(toasts.len(), 2);
        assert!(toasts.has_errors());
        assert_eq!(toasts.latest().map(|n| n.level), Some(Level::Error));

        let drained = toasts.drain();
        assert_eq!(drained[0].title, "Saved");
        assert!(toasts.is_empty());
        assert!(!toasts.has_errors());
    }

    #[test]
    fn test_oldest_are_dropped_past_capacity() {
        let mut toasts = Toasts::new();
        toasts.error("Erreur", "first");
        for i in 0..TOAST_CAPACITY {
            toasts.success("Succès", format!("saved {i}"));
        }

        assert_eq!(toasts.len(), TOAST_CAPACITY);
        assert!(!toasts.has_errors());
        assert_eq!(toasts.iter().next().map(|n| n.message.as_str()), Some("saved 0"));
        assert_eq!(toasts.latest().map(|n| n.message.as_str()), Some("saved 7"));
    }
}
