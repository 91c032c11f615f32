//! Plain-text views of the pages, written to stdout by the CLI.

use crate::models::resume::Resume;
use crate::pages::home::{HomePage, TITLE};
use crate::pages::profile::ProfilePage;

pub fn home(page: &HomePage) -> String {
    let status = if page.signed_in {
        "Signed in. Try `resumectl profile` or `resumectl resume show`."
    } else {
        "Not signed in. Use `resumectl register` or `resumectl login`."
    };
    format!("{TITLE}\n\n{status}\n")
}

pub fn profile(page: &ProfilePage) -> String {
    match &page.user {
        Some(user) => format!(
            "Welcome, {}\nEmail: {}\nUser ID: {}\n",
            user.name, user.email, user.id
        ),
        None => "No user data found\n".to_string(),
    }
}

pub fn resume(resume: Option<&Resume>) -> String {
    let mut out = String::from("Resume Builder\n\n");
    let Some(resume) = resume else {
        out.push_str("No resume found. Create one with `resumectl resume create`.\n");
        return out;
    };

    out.push_str("Education\n");
    for edu in &resume.education {
        out.push_str(&format!("  {} | {} | {}\n", edu.degree, edu.institution, edu.year));
    }

    out.push_str("\nSkills\n");
    if !resume.skills.is_empty() {
        let chips: Vec<String> = resume.skills.iter().map(|s| format!("[{s}]")).collect();
        out.push_str(&format!("  {}\n", chips.join(" ")));
    }

    out.push_str("\nProjects\n");
    for project in &resume.projects {
        out.push_str(&format!("  {}\n", project.title));
        if !project.description.is_empty() {
            out.push_str(&format!("    {}\n", project.description));
        }
        if !project.link.is_empty() {
            out.push_str(&format!("    {}\n", project.link));
        }
    }
    out
}
