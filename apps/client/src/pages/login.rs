use tracing::error;

use crate::api_client::ResumeApi;
use crate::errors::ClientError;
use crate::models::auth::LoginRequest;
use crate::pages::{complete_sign_in, password, required, skip_if_signed_in, PageLoad, Route};
use crate::session::TokenStore;

const FALLBACK_MESSAGE: &str = "Login failed";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    fn to_request(&self) -> Result<LoginRequest, ClientError> {
        Ok(LoginRequest {
            email: required(&self.email, "Email")?,
            password: password(&self.password)?,
        })
    }
}

pub struct LoginPage<'a> {
    api: &'a dyn ResumeApi,
    tokens: &'a dyn TokenStore,
    pub form: LoginForm,
    pub error: Option<String>,
}

impl<'a> LoginPage<'a> {
    pub fn mount(api: &'a dyn ResumeApi, tokens: &'a dyn TokenStore) -> PageLoad<Self> {
        if let Some(route) = skip_if_signed_in(tokens) {
            return PageLoad::Redirect(route);
        }
        PageLoad::Ready(Self {
            api,
            tokens,
            form: LoginForm::default(),
            error: None,
        })
    }

    pub async fn submit(&mut self) -> Result<Route, ClientError> {
        self.error = None;
        let result = self.try_submit().await;
        if let Err(e) = &result {
            error!("Login failed: {e}");
            self.error = Some(e.user_message(FALLBACK_MESSAGE));
        }
        result
    }

    async fn try_submit(&self) -> Result<Route, ClientError> {
        let request = self.form.to_request()?;
        let response = self.api.login(&request).await?;
        complete_sign_in(self.tokens, &response.token)
    }
}
