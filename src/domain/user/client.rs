//! Users sub-client: profile of the signed-in user.

use crate::client::MarketClient;
use crate::domain::user::wire::UserDetailsResponse;
use crate::domain::user::UserProfile;
use crate::error::SdkError;
use crate::http::AuthMode;

pub struct Users<'a> {
    pub(crate) client: &'a MarketClient,
}

impl<'a> Users<'a> {
    pub async fn me(&self) -> Result<UserProfile, SdkError> {
        let url = self.client.http.url("/user/get-details");
        let resp: UserDetailsResponse = self.client.http.get(&url, AuthMode::Bearer).await?;
        Ok(UserProfile::from(resp))
    }
}
