//! Resume editor page.
//!
//! Holds the loaded resume plus one draft per section. Every add is a
//! read-modify-write: the full list is rebuilt locally with the draft
//! appended, sent back in a partial update, and the server's copy replaces
//! local state. A failed call is logged and leaves both resume and draft as
//! they were.

use std::path::Path;

use tracing::{error, info};

use crate::api_client::ResumeApi;
use crate::errors::ClientError;
use crate::export::{self, ExportSummary};
use crate::models::resume::{Education, Project, Resume, ResumePatch};
use crate::pages::{require_session, required, PageLoad};
use crate::prompt::Confirm;
use crate::session::TokenStore;

pub const DELETE_QUESTION: &str = "Are you sure you want to delete your resume?";

pub struct ResumePage<'a> {
    api: &'a dyn ResumeApi,
    resume: Option<Resume>,
    pub education: Education,
    pub skill: String,
    pub project: Project,
}

impl<'a> ResumePage<'a> {
    /// Loads the first resume the backend returns, if any.
    pub async fn mount(api: &'a dyn ResumeApi, tokens: &dyn TokenStore) -> PageLoad<Self> {
        if let Some(route) = require_session(tokens) {
            return PageLoad::Redirect(route);
        }

        let resume = match api.list_resumes().await {
            Ok(resumes) => resumes.into_iter().next(),
            Err(e) => {
                error!("Fetch resume failed: {e}");
                None
            }
        };
        PageLoad::Ready(Self {
            api,
            resume,
            education: Education::default(),
            skill: String::new(),
            project: Project::default(),
        })
    }

    pub fn resume(&self) -> Option<&Resume> {
        self.resume.as_ref()
    }

    pub async fn create(&mut self) -> Result<(), ClientError> {
        let result = match self.resume {
            Some(_) => Err(ClientError::ResumeExists),
            None => self.api.create_resume().await.map_err(ClientError::from),
        };
        let created = logged("Create resume", result)?;
        info!("Created resume {}", created.id);
        self.resume = Some(created);
        Ok(())
    }

    pub async fn add_education(&mut self) -> Result<(), ClientError> {
        let result = self.try_add_education().await;
        self.apply("Add education", result)?;
        self.education = Education::default();
        Ok(())
    }

    pub async fn add_skill(&mut self) -> Result<(), ClientError> {
        let result = self.try_add_skill().await;
        self.apply("Add skill", result)?;
        self.skill.clear();
        Ok(())
    }

    pub async fn add_project(&mut self) -> Result<(), ClientError> {
        let result = self.try_add_project().await;
        self.apply("Add project", result)?;
        self.project = Project::default();
        Ok(())
    }

    /// Deletes the resume once the user confirms.
    /// Returns `false` when the user declined; nothing is sent in that case.
    pub async fn delete(&mut self, confirm: &dyn Confirm) -> Result<bool, ClientError> {
        let Some(id) = self.resume.as_ref().map(|r| r.id.clone()) else {
            return logged("Delete resume", Err(ClientError::NoResume));
        };
        if !confirm.confirm(DELETE_QUESTION) {
            return Ok(false);
        }

        let result = self.api.delete_resume(&id).await.map_err(ClientError::from);
        logged("Delete resume", result)?;
        info!("Deleted resume {id}");
        self.resume = None;
        Ok(true)
    }

    /// Writes the resume content to a single-page PDF at `path`.
    pub fn export_pdf(&self, path: &Path) -> Result<ExportSummary, ClientError> {
        let result = match &self.resume {
            Some(resume) => export::export_resume(resume, path).map_err(ClientError::from),
            None => Err(ClientError::NoResume),
        };
        logged("Download PDF", result)
    }

    fn loaded(&self) -> Result<&Resume, ClientError> {
        self.resume.as_ref().ok_or(ClientError::NoResume)
    }

    async fn try_add_education(&self) -> Result<Resume, ClientError> {
        let resume = self.loaded()?;
        let entry = Education {
            degree: required(&self.education.degree, "Degree")?,
            institution: required(&self.education.institution, "Institution")?,
            year: self.education.year.trim().to_string(),
        };
        let patch = ResumePatch::append_education(resume, entry);
        Ok(self.api.update_resume(&resume.id, &patch).await?)
    }

    async fn try_add_skill(&self) -> Result<Resume, ClientError> {
        let resume = self.loaded()?;
        let skill = required(&self.skill, "Skill")?;
        let patch = ResumePatch::append_skill(resume, skill);
        Ok(self.api.update_resume(&resume.id, &patch).await?)
    }

    async fn try_add_project(&self) -> Result<Resume, ClientError> {
        let resume = self.loaded()?;
        let project = Project {
            title: required(&self.project.title, "Title")?,
            description: self.project.description.trim().to_string(),
            link: self.project.link.trim().to_string(),
        };
        let patch = ResumePatch::append_project(resume, project);
        Ok(self.api.update_resume(&resume.id, &patch).await?)
    }

    fn apply(
        &mut self,
        action: &str,
        result: Result<Resume, ClientError>,
    ) -> Result<(), ClientError> {
        let updated = logged(action, result)?;
        self.resume = Some(updated);
        Ok(())
    }
}

fn logged<T>(action: &str, result: Result<T, ClientError>) -> Result<T, ClientError> {
    if let Err(e) = &result {
        error!("{action} failed: {e}");
    }
    result
}
