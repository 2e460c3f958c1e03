//! Wire types for notification endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "isRead")]
    pub read: bool,
    #[serde(default, alias = "createdOn")]
    pub create_on: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_deserialize_both_read_spellings() {
        let a: NotificationResponse = serde_json::from_str(
            r#"{"id": 7, "message": "Your card sold", "read": true, "createOn": "2025-04-02T09:00:00"}"#,
        )
        .unwrap();
        assert!(a.read);
        assert!(a.create_on.is_some());

        let b: NotificationResponse =
            serde_json::from_str(r#"{"id": 8, "message": "x", "isRead": false}"#).unwrap();
        assert!(!b.read);
        assert!(b.create_on.is_none());
    }
}
