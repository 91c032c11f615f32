//! In-memory `ResumeApi` that records every call, for page controller tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api_client::{ApiError, ResumeApi};
use crate::models::auth::{LoginRequest, RegisterRequest, TokenResponse};
use crate::models::resume::{Resume, ResumePatch};
use crate::models::user::User;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Register(RegisterRequest),
    Login(LoginRequest),
    Profile,
    ListResumes,
    CreateResume,
    UpdateResume(String, ResumePatch),
    DeleteResume(String),
}

pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    resumes: Mutex<Vec<Resume>>,
    user: Option<User>,
    token: String,
    /// When set, every call fails with this status and optional message.
    failure: Mutex<Option<(u16, Option<String>)>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: Mutex::default(),
            resumes: Mutex::default(),
            user: Some(sample_user()),
            token: "abc".to_string(),
            failure: Mutex::default(),
        }
    }
}

pub fn sample_user() -> User {
    User {
        id: "u1".to_string(),
        name: "Ana".to_string(),
        email: "ana@x.com".to_string(),
    }
}

pub fn empty_resume(id: &str) -> Resume {
    Resume {
        id: id.to_string(),
        education: vec![],
        skills: vec![],
        projects: vec![],
    }
}

impl FakeApi {
    pub fn with_resumes(resumes: Vec<Resume>) -> Self {
        Self {
            resumes: Mutex::new(resumes),
            ..Self::default()
        }
    }

    pub fn without_user() -> Self {
        Self {
            user: None,
            ..Self::default()
        }
    }

    pub fn fail_next_calls(&self, status: u16, message: Option<&str>) {
        *self.failure.lock().unwrap() = Some((status, message.map(str::to_owned)));
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored(&self) -> Vec<Resume> {
        self.resumes.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some((status, message)) => Err(ApiError::Api {
                status,
                body: message.clone().unwrap_or_default(),
                message,
            }),
            None => Ok(()),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Api {
            status: 404,
            body: "Not found".to_string(),
            message: Some("Resume not found".to_string()),
        }
    }
}

#[async_trait]
impl ResumeApi for FakeApi {
    async fn register(&self, req: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        self.record(Call::Register(req.clone()))?;
        Ok(TokenResponse {
            token: self.token.clone(),
        })
    }

    async fn login(&self, req: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.record(Call::Login(req.clone()))?;
        Ok(TokenResponse {
            token: self.token.clone(),
        })
    }

    async fn profile(&self) -> Result<User, ApiError> {
        self.record(Call::Profile)?;
        self.user.clone().ok_or_else(Self::not_found)
    }

    async fn list_resumes(&self) -> Result<Vec<Resume>, ApiError> {
        self.record(Call::ListResumes)?;
        Ok(self.stored())
    }

    async fn create_resume(&self) -> Result<Resume, ApiError> {
        self.record(Call::CreateResume)?;
        let mut resumes = self.resumes.lock().unwrap();
        let created = empty_resume(&format!("new-{}", resumes.len() + 1));
        resumes.push(created.clone());
        Ok(created)
    }

    async fn update_resume(&self, id: &str, patch: &ResumePatch) -> Result<Resume, ApiError> {
        self.record(Call::UpdateResume(id.to_string(), patch.clone()))?;
        let mut resumes = self.resumes.lock().unwrap();
        let resume = resumes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(Self::not_found)?;
        if let Some(education) = &patch.education {
            resume.education = education.clone();
        }
        if let Some(skills) = &patch.skills {
            resume.skills = skills.clone();
        }
        if let Some(projects) = &patch.projects {
            resume.projects = projects.clone();
        }
        Ok(resume.clone())
    }

    async fn delete_resume(&self, id: &str) -> Result<(), ApiError> {
        self.record(Call::DeleteResume(id.to_string()))?;
        let mut resumes = self.resumes.lock().unwrap();
        let before = resumes.len();
        resumes.retain(|r| r.id != id);
        if resumes.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}
