use tracing::error;

use crate::api_client::ResumeApi;
use crate::errors::ClientError;
use crate::models::auth::RegisterRequest;
use crate::pages::{complete_sign_in, password, required, skip_if_signed_in, PageLoad, Route};
use crate::session::TokenStore;

const FALLBACK_MESSAGE: &str = "Registration failed";

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    fn to_request(&self) -> Result<RegisterRequest, ClientError> {
        Ok(RegisterRequest {
            name: required(&self.name, "Name")?,
            email: required(&self.email, "Email")?,
            password: password(&self.password)?,
        })
    }
}

pub struct RegisterPage<'a> {
    api: &'a dyn ResumeApi,
    tokens: &'a dyn TokenStore,
    pub form: RegisterForm,
    /// Inline message from the last failed submit.
    pub error: Option<String>,
}

impl<'a> RegisterPage<'a> {
    pub fn mount(api: &'a dyn ResumeApi, tokens: &'a dyn TokenStore) -> PageLoad<Self> {
        if let Some(route) = skip_if_signed_in(tokens) {
            return PageLoad::Redirect(route);
        }
        PageLoad::Ready(Self {
            api,
            tokens,
            form: RegisterForm::default(),
            error: None,
        })
    }

    /// Creates the account, stores the returned token and navigates to the profile.
    pub async fn submit(&mut self) -> Result<Route, ClientError> {
        self.error = None;
        let result = self.try_submit().await;
        if let Err(e) = &result {
            error!("Registration failed: {e}");
            self.error = Some(e.user_message(FALLBACK_MESSAGE));
        }
        result
    }

    async fn try_submit(&self) -> Result<Route, ClientError> {
        let request = self.form.to_request()?;
        let response = self.api.register(&request).await?;
        complete_sign_in(self.tokens, &response.token)
    }
}
