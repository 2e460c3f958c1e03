//! Notification domain: messages the backend raises for a user (a card
//! sold, an item on the wishlist changed).

#[cfg(feature = "http")]
pub mod client;
pub mod state;
pub mod wire;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use state::NotificationInbox;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub message: String,
    pub read: bool,
    pub created_on: Option<NaiveDateTime>,
}

impl From<wire::NotificationResponse> for Notification {
    fn from(source: wire::NotificationResponse) -> Self {
        Notification {
            id: source.id,
            message: source.message,
            read: source.read,
            created_on: source.create_on,
        }
    }
}
