mod api_client;
mod config;
mod errors;
mod export;
mod models;
mod pages;
mod prompt;
mod render;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::{ApiClient, ResumeApi};
use crate::config::Config;
use crate::errors::ClientError;
use crate::models::resume::{Education, Project};
use crate::pages::home::HomePage;
use crate::pages::login::{LoginForm, LoginPage};
use crate::pages::profile::ProfilePage;
use crate::pages::register::{RegisterForm, RegisterPage};
use crate::pages::resume::ResumePage;
use crate::pages::{PageLoad, Route};
use crate::prompt::{Answer, Confirm, StdinConfirm};
use crate::session::{FileTokenStore, TokenStore};

const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// How a command ended. Anything but `Done` exits non-zero.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Done,
    Redirected(Route),
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::Redirected(_) | Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

#[derive(Parser)]
#[command(name = "resumectl", version, about = "Command-line client for the resume platform")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL (overrides RESUME_API_URL)
    #[arg(short = 'u', long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the landing page and session state
    Home,
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    Profile,
    #[command(subcommand)]
    Resume(ResumeCommand),
}

#[derive(Subcommand)]
enum ResumeCommand {
    Show,
    Create,
    AddEducation {
        #[arg(short, long)]
        degree: String,
        #[arg(short, long)]
        institution: String,
        #[arg(short, long, default_value = "")]
        year: String,
    },
    AddSkill {
        skill: String,
    },
    AddProject {
        #[arg(short, long)]
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value = "")]
        link: String,
    },
    Delete {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Save the resume as a single-page PDF
    Export {
        #[arg(short, long, default_value = export::DEFAULT_FILE_NAME)]
        output: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?.with_api_url(cli.api_url);

    // Logs go to stderr so page output on stdout stays clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.session_file));
    let api = ApiClient::new(&config.api_url, config.request_timeout, tokens.clone())?;
    debug!("Using backend {}", api.base_url());

    let outcome = match cli.command {
        Commands::Home => {
            print!("{}", render::home(&HomePage::mount(tokens.as_ref())));
            Outcome::Done
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
            };
            register(&api, tokens.as_ref(), form).await
        }
        Commands::Login { email, password } => {
            login(&api, tokens.as_ref(), LoginForm { email, password }).await
        }
        Commands::Logout => {
            tokens.clear()?;
            info!("Session cleared");
            println!("Logged out.");
            Outcome::Done
        }
        Commands::Profile => show_profile(&api, tokens.as_ref()).await,
        Commands::Resume(cmd) => run_resume(cmd, &api, tokens.as_ref()).await,
    };

    Ok(outcome.into())
}

async fn register(api: &dyn ResumeApi, tokens: &dyn TokenStore, form: RegisterForm) -> Outcome {
    let mut page = match RegisterPage::mount(api, tokens) {
        PageLoad::Redirect(route) => return navigate(route, api, tokens).await,
        PageLoad::Ready(page) => page,
    };
    page.form = form;
    match page.submit().await {
        Ok(route) => navigate(route, api, tokens).await,
        Err(_) => fail(page.error.as_deref()),
    }
}

async fn login(api: &dyn ResumeApi, tokens: &dyn TokenStore, form: LoginForm) -> Outcome {
    let mut page = match LoginPage::mount(api, tokens) {
        PageLoad::Redirect(route) => return navigate(route, api, tokens).await,
        PageLoad::Ready(page) => page,
    };
    page.form = form;
    match page.submit().await {
        Ok(route) => navigate(route, api, tokens).await,
        Err(_) => fail(page.error.as_deref()),
    }
}

/// Follows a navigation produced by the sign-in pages.
async fn navigate(route: Route, api: &dyn ResumeApi, tokens: &dyn TokenStore) -> Outcome {
    match route {
        Route::Profile => show_profile(api, tokens).await,
        Route::Home => {
            print!("{}", render::home(&HomePage::mount(tokens)));
            Outcome::Done
        }
        other => redirected(other),
    }
}

async fn show_profile(api: &dyn ResumeApi, tokens: &dyn TokenStore) -> Outcome {
    match ProfilePage::mount(api, tokens).await {
        PageLoad::Redirect(route) => redirected(route),
        PageLoad::Ready(page) => {
            print!("{}", render::profile(&page));
            if page.user.is_some() {
                Outcome::Done
            } else {
                Outcome::Failed
            }
        }
    }
}

async fn run_resume(cmd: ResumeCommand, api: &dyn ResumeApi, tokens: &dyn TokenStore) -> Outcome {
    let mut page = match ResumePage::mount(api, tokens).await {
        PageLoad::Redirect(route) => return redirected(route),
        PageLoad::Ready(page) => page,
    };

    let outcome: Result<(), ClientError> = match cmd {
        ResumeCommand::Show => Ok(()),
        ResumeCommand::Create => page.create().await,
        ResumeCommand::AddEducation {
            degree,
            institution,
            year,
        } => {
            page.education = Education {
                degree,
                institution,
                year,
            };
            page.add_education().await
        }
        ResumeCommand::AddSkill { skill } => {
            page.skill = skill;
            page.add_skill().await
        }
        ResumeCommand::AddProject {
            title,
            description,
            link,
        } => {
            page.project = Project {
                title,
                description,
                link,
            };
            page.add_project().await
        }
        ResumeCommand::Delete { yes } => {
            let confirm: Box<dyn Confirm> = if yes {
                Box::new(Answer(true))
            } else {
                Box::new(StdinConfirm)
            };
            page.delete(confirm.as_ref()).await.map(|deleted| {
                if !deleted {
                    println!("Delete cancelled.");
                }
            })
        }
        ResumeCommand::Export { output } => page.export_pdf(&output).map(|summary| {
            println!(
                "Saved {} ({} lines)",
                summary.path.display(),
                summary.lines_written
            );
            if summary.lines_cut > 0 {
                println!(
                    "Note: {} line(s) did not fit on one page and were left out.",
                    summary.lines_cut
                );
            }
            if summary.chars_replaced > 0 {
                println!(
                    "Note: {} character(s) the PDF font cannot draw were replaced by '?'.",
                    summary.chars_replaced
                );
            }
        }),
    };

    print!("{}", render::resume(page.resume()));
    match outcome {
        Ok(()) => Outcome::Done,
        Err(e) => fail(Some(&e.user_message(FALLBACK_MESSAGE))),
    }
}

fn redirected(route: Route) -> Outcome {
    match route {
        Route::Login | Route::Register => eprintln!(
            "Not signed in ({route}). Run `resumectl login` or `resumectl register` first."
        ),
        other => eprintln!("Go to {other}"),
    }
    Outcome::Redirected(route)
}

fn fail(message: Option<&str>) -> Outcome {
    eprintln!("{}", message.unwrap_or(FALLBACK_MESSAGE));
    Outcome::Failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::RegisterRequest;
    use crate::pages::testing::{Call, FakeApi};
    use crate::session::MemoryTokenStore;
    use clap::CommandFactory;

    fn ana() -> RegisterForm {
        RegisterForm {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_resume_without_session_redirects_to_login() {
        let api = FakeApi::default();
        let tokens = MemoryTokenStore::default();

        let outcome = run_resume(ResumeCommand::Show, &api, &tokens).await;

        assert_eq!(outcome, Outcome::Redirected(Route::Login));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_profile_without_session_redirects_to_login() {
        let api = FakeApi::default();
        let tokens = MemoryTokenStore::default();

        assert_eq!(
            show_profile(&api, &tokens).await,
            Outcome::Redirected(Route::Login)
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_register_continues_to_profile() {
        let api = FakeApi::default();
        let tokens = MemoryTokenStore::default();

        assert_eq!(register(&api, &tokens, ana()).await, Outcome::Done);
        assert_eq!(
            api.calls(),
            vec![
                Call::Register(RegisterRequest {
                    name: "Ana".to_string(),
                    email: "ana@x.com".to_string(),
                    password: "secret".to_string(),
                }),
                Call::Profile,
            ]
        );
    }

    #[tokio::test]
    async fn test_register_when_signed_in_shows_profile_only() {
        let api = FakeApi::default();
        let tokens = MemoryTokenStore::with_token("old");

        assert_eq!(register(&api, &tokens, ana()).await, Outcome::Done);
        assert_eq!(api.calls(), vec![Call::Profile]);
    }

    #[tokio::test]
    async fn test_rejected_login_fails_without_profile_fetch() {
        let api = FakeApi::default();
        api.fail_next_calls(401, Some("Invalid credentials"));
        let tokens = MemoryTokenStore::default();
        let form = LoginForm {
            email: "ana@x.com".to_string(),
            password: "wrong".to_string(),
        };

        assert_eq!(login(&api, &tokens, form).await, Outcome::Failed);
        assert!(!api.calls().contains(&Call::Profile));
        assert!(!tokens.has_token());
    }

    #[test]
    fn test_only_done_exits_successfully() {
        let code = |o: Outcome| format!("{:?}", ExitCode::from(o));
        assert_eq!(code(Outcome::Done), format!("{:?}", ExitCode::SUCCESS));
        assert_eq!(
            code(Outcome::Redirected(Route::Login)),
            format!("{:?}", ExitCode::FAILURE)
        );
        assert_eq!(code(Outcome::Failed), format!("{:?}", ExitCode::FAILURE));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_skill_parses_positional() {
        let cli = Cli::parse_from(["resumectl", "resume", "add-skill", "Rust"]);
        assert!(matches!(
            cli.command,
            Commands::Resume(ResumeCommand::AddSkill { ref skill }) if skill == "Rust"
        ));
    }

    #[test]
    fn test_export_defaults_to_resume_pdf() {
        let cli = Cli::parse_from(["resumectl", "resume", "export"]);
        match cli.command {
            Commands::Resume(ResumeCommand::Export { output }) => {
                assert_eq!(output, PathBuf::from("resume.pdf"))
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_global_api_url_after_subcommand() {
        let cli = Cli::parse_from(["resumectl", "profile", "--api-url", "http://x:1"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://x:1"));
    }
}
