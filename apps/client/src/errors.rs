use thiserror::Error;

use crate::api_client::ApiError;
use crate::export::ExportError;
use crate::session::SessionError;

/// Failure of a page action.
///
/// The full error is logged where it happens; users only ever see
/// `user_message()`, which does not tell network, validation and
/// authorization failures apart.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No resume loaded")]
    NoResume,

    #[error("A resume already exists")]
    ResumeExists,

    #[error("PDF export error: {0}")]
    Export(#[from] ExportError),
}

impl ClientError {
    /// Generic text shown to the user, with `fallback` used for anything that
    /// carries no message of its own.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api(e) => e.server_message().unwrap_or(fallback).to_string(),
            ClientError::Validation(msg) => msg.clone(),
            ClientError::NoResume => "No resume found.".to_string(),
            ClientError::ResumeExists => "A resume already exists.".to_string(),
            ClientError::Session(_) | ClientError::Export(_) => fallback.to_string(),
        }
    }
}
