use crate::session::TokenStore;

pub const TITLE: &str = "Resume Platform";

/// Landing page. Needs no session and makes no calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePage {
    pub signed_in: bool,
}

impl HomePage {
    pub fn mount(tokens: &dyn TokenStore) -> Self {
        Self {
            signed_in: tokens.has_token(),
        }
    }
}
