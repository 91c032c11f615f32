use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub link: String,
}

/// The single per-user resume document as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Body of `POST /api/resumes/create`. Always sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewResume {
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
}

/// Partial body of `PUT /api/resumes/:id`.
///
/// The backend replaces each list that is present wholesale, so an append is
/// sent as the full existing list plus the new item. Absent lists are left
/// untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResumePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Education>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
}

impl ResumePatch {
    pub fn append_education(resume: &Resume, entry: Education) -> Self {
        Self {
            education: Some(appended(&resume.education, entry)),
            ..Self::default()
        }
    }

    pub fn append_skill(resume: &Resume, skill: String) -> Self {
        Self {
            skills: Some(appended(&resume.skills, skill)),
            ..Self::default()
        }
    }

    pub fn append_project(resume: &Resume, project: Project) -> Self {
        Self {
            projects: Some(appended(&resume.projects, project)),
            ..Self::default()
        }
    }
}

fn appended<T: Clone>(existing: &[T], item: T) -> Vec<T> {
    let mut list = Vec::with_capacity(existing.len() + 1);
    list.extend_from_slice(existing);
    list.push(item);
    list
}
