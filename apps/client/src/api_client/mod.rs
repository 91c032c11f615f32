/// API client — the single point of entry for all calls to the resume backend.
///
/// No other module may build HTTP requests. Page controllers talk to the
/// backend through the `ResumeApi` trait so they can be driven by a fake in tests.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::auth::{LoginRequest, RegisterRequest, TokenResponse};
use crate::models::resume::{NewResume, Resume, ResumePatch};
use crate::models::user::User;
use crate::session::TokenStore;

pub mod paths;

/// Raw error bodies longer than this are cut before they reach logs.
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api {
        status: u16,
        body: String,
        /// The `message` field of a JSON error body, when the server sent one.
        message: Option<String>,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// The human-readable message the backend attached to a failed response.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Api {
                message: Some(m), ..
            } if !m.is_empty() => Some(m),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Every backend operation the client uses.
#[async_trait]
pub trait ResumeApi: Send + Sync {
    async fn register(&self, req: &RegisterRequest) -> Result<TokenResponse, ApiError>;
    async fn login(&self, req: &LoginRequest) -> Result<TokenResponse, ApiError>;
    async fn profile(&self) -> Result<User, ApiError>;
    async fn list_resumes(&self) -> Result<Vec<Resume>, ApiError>;
    async fn create_resume(&self) -> Result<Resume, ApiError>;
    async fn update_resume(&self, id: &str, patch: &ResumePatch) -> Result<Resume, ApiError>;
    async fn delete_resume(&self, id: &str) -> Result<(), ApiError>;
}

/// HTTP implementation of `ResumeApi`.
/// Attaches the stored bearer token, if any, to every request it sends.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}{}", method, self.base_url, path);
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));

        match self.tokens.get() {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                warn!("Could not read session token, sending request without it: {e}");
                builder
            }
        }
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn send(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|e| e.message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
                message,
            });
        }

        Ok(response.text().await?)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send(builder).await?;
        serde_json::from_str(&body).map_err(ApiError::Parse)
    }
}

#[async_trait]
impl ResumeApi for ApiClient {
    async fn register(&self, req: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        self.send_json(self.request(Method::POST, paths::REGISTER).json(req)).await
    }

    async fn login(&self, req: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.send_json(self.request(Method::POST, paths::LOGIN).json(req)).await
    }

    async fn profile(&self) -> Result<User, ApiError> {
        self.send_json(self.request(Method::GET, paths::PROFILE)).await
    }

    async fn list_resumes(&self) -> Result<Vec<Resume>, ApiError> {
        self.send_json(self.request(Method::GET, paths::RESUMES)).await
    }

    async fn create_resume(&self) -> Result<Resume, ApiError> {
        self.send_json(
            self.request(Method::POST, paths::CREATE_RESUME)
                .json(&NewResume::default()),
        )
        .await
    }

    async fn update_resume(&self, id: &str, patch: &ResumePatch) -> Result<Resume, ApiError> {
        self.send_json(self.request(Method::PUT, &paths::resume(id)).json(patch)).await
    }

    async fn delete_resume(&self, id: &str) -> Result<(), ApiError> {
        // 204 or any 2xx body; nothing in it is used
        self.send(self.request(Method::DELETE, &paths::resume(id)))
            .await
            .map(|_| ())
    }
}

fn truncate(body: &str, max: usize) -> String {
    let body = body.trim();
    match body.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}
