//! User domain: the signed-in user's profile.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use crate::domain::listing::Region;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub region: Option<Region>,
}

impl From<wire::UserDetailsResponse> for UserProfile {
    fn from(source: wire::UserDetailsResponse) -> Self {
        UserProfile {
            id: source.id.unwrap_or_default(),
            username: source.username,
            name: source.name.unwrap_or_default(),
            email: source.email.unwrap_or_default(),
            mobile_number: source.mobile_number.unwrap_or_default(),
            region: source.region,
        }
    }
}
