use tracing::error;

use crate::api_client::ResumeApi;
use crate::models::user::User;
use crate::pages::{require_session, PageLoad};
use crate::session::TokenStore;

/// Profile page state after mount. `user` is `None` when the fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePage {
    pub user: Option<User>,
}

impl ProfilePage {
    pub async fn mount(api: &dyn ResumeApi, tokens: &dyn TokenStore) -> PageLoad<Self> {
        if let Some(route) = require_session(tokens) {
            return PageLoad::Redirect(route);
        }

        let user = match api.profile().await {
            Ok(user) => Some(user),
            Err(e) => {
                error!("Profile fetch failed: {e}");
                None
            }
        };
        PageLoad::Ready(Self { user })
    }
}
