//! Backend routes, relative to the configured base URL.

pub const REGISTER: &str = "/api/auth/register";
pub const LOGIN: &str = "/api/auth/login";
pub const PROFILE: &str = "/api/users/profile";
pub const RESUMES: &str = "/api/resumes";
pub const CREATE_RESUME: &str = "/api/resumes/create";

/// `/api/resumes/:id`, used for both update and delete.
pub fn resume(id: &str) -> String {
    format!("{RESUMES}/{id}")
}
