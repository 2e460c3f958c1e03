//! Notification state container: app-owned, SDK-provided update logic.

use super::Notification;

/// The user's notifications, newest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationInbox {
    notifications: Vec<Notification>,
}

impl NotificationInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a fresh poll result.
    ///
    /// Returns how many notifications were not present before.
    pub fn replace(&mut self, mut notifications: Vec<Notification>) -> usize {
        notifications.sort_by(|a, b| b.created_on.cmp(&a.created_on).then(b.id.cmp(&a.id)));
        let fresh = notifications
            .iter()
            .filter(|n| !self.notifications.iter().any(|old| old.id == n.id))
            .count();
        self.notifications = notifications;
        fresh
    }

    /// Mark one notification read locally. Returns whether it changed.
    pub fn mark_read(&mut self, id: i64) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.read => {
                n.read = true;
                true
            }
            _ => false,
        }
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn unread(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().filter(|n| !n.read)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}
