#![forbid(unsafe_code)]

//! Hive CLI
//!
//! Command-line front end for the Hive stores: log in, browse projects,
//! and work the task board from a terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hive_client::{ApiClient, ClientConfig, RegisterRequest};
use hive_core::{EntityId, TaskStatus};
use hive_store::{FileSessionStorage, ProjectStore, SessionStore, TaskStore};
use std::path::PathBuf;

/// Hive project-management client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the Hive API
    #[arg(long, env = "HIVE_API_URL", default_value = "http://localhost:9999")]
    api_url: String,

    /// Session file location (defaults to the platform data directory)
    #[arg(long, env = "HIVE_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Authenticate with email and password
    Login {
        /// Login email address
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long)]
        password: String,
    },
    /// Create a new account and log in as it
    Register {
        /// Given name
        #[arg(long)]
        first_name: String,
        /// Family name
        #[arg(long)]
        last_name: String,
        /// Login email address
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long)]
        password: String,
        /// Organization name
        #[arg(long)]
        organization: String,
    },
    /// Clear the current session
    Logout,
    /// Show the current user
    Whoami,
    /// Renew the bearer token
    Refresh,
    /// Project operations
    Projects {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    /// Task operations
    Tasks {
        #[command(subcommand)]
        command: TaskCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectCommand {
    /// List all projects
    List,
    /// Show one project
    Show {
        /// Project id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    /// List tasks, optionally filtered
    List {
        /// Only tasks belonging to this project
        #[arg(long)]
        project: Option<String>,
        /// Only tasks assigned to this user
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Show the kanban board
    Board,
    /// Move a task to a new status
    SetStatus {
        /// Task id
        id: String,
        /// New status (todo, in-progress, in-review, completed)
        status: String,
    },
}

fn default_session_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("hive")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    tracing::debug!(api_url = %args.api_url, "using API endpoint");
    let api = ApiClient::new(ClientConfig::new(args.api_url.as_str()))?;
    let storage = match &args.session_file {
        Some(path) => FileSessionStorage::new(path.clone()),
        None => FileSessionStorage::in_dir(default_session_dir()),
    };
    tracing::debug!(path = %storage.path().display(), "session file");
    let sessions = SessionStore::open(api.clone(), Box::new(storage))
        .await
        .context("failed to open session store")?;

    match args.command {
        Command::Login { email, password } => {
            sessions.login(&email, &password).await?;
            let session = sessions.session();
            let user = session.user().context("login left no user in session")?;
            println!("Logged in as {} <{}>", user.full_name(), user.email);
        }
        Command::Register {
            first_name,
            last_name,
            email,
            password,
            organization,
        } => {
            let request = RegisterRequest {
                first_name,
                last_name,
                email,
                password,
                organization,
            };
            sessions.register(&request).await?;
            let session = sessions.session();
            let user = session.user().context("registration left no user in session")?;
            println!("Registered {} <{}> ({})", user.full_name(), user.email, user.role);
        }
        Command::Logout => {
            sessions.logout().await;
            println!("Logged out");
        }
        Command::Whoami => match sessions.session().user() {
            Some(user) => println!(
                "{} <{}> — {} at {}",
                user.full_name(),
                user.email,
                user.role,
                user.organization
            ),
            None => println!("Not logged in"),
        },
        Command::Refresh => {
            sessions.refresh_token().await?;
            if sessions.is_authenticated() {
                println!("Token refreshed");
            } else {
                tracing::warn!("refresh rejected, session cleared");
                println!("Session expired; please log in again");
            }
        }
        Command::Projects { command } => {
            let store = ProjectStore::new(api, sessions.subscribe());
            run_project_command(&store, command).await?;
        }
        Command::Tasks { command } => {
            let store = TaskStore::new(api, sessions.subscribe());
            run_task_command(&store, command).await?;
        }
    }

    Ok(())
}

async fn run_project_command(store: &ProjectStore, command: ProjectCommand) -> Result<()> {
    match command {
        ProjectCommand::List => {
            store.fetch_projects().await?;
            let mut projects = store.projects();
            projects.sort_by(|a, b| a.name.cmp(&b.name));
            if projects.is_empty() {
                println!("No projects");
                return Ok(());
            }
            for project in projects {
                println!(
                    "{:<12} {:<10} {:>3}%  {} [{}]",
                    project.id,
                    project.status,
                    project.progress,
                    project.name,
                    project.tags.join(", ")
                );
            }
        }
        ProjectCommand::Show { id } => {
            store.fetch_project(&EntityId::new(id)).await?;
            match store.current_project() {
                Some(project) => {
                    println!("{} ({})", project.name, project.status);
                    println!("  {}", project.description);
                    println!(
                        "  {} members, {}% complete, led by {}",
                        project.member_count, project.progress, project.leader_id
                    );
                }
                None => println!("No such project"),
            }
        }
    }
    Ok(())
}

async fn run_task_command(store: &TaskStore, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::List { project, assignee } => {
            store.fetch_tasks().await?;
            let project = project.map(EntityId::new);
            let assignee = assignee.map(EntityId::new);
            let tasks: Vec<_> = store
                .tasks()
                .into_iter()
                .filter(|t| project.as_ref().is_none_or(|p| &t.project_id == p))
                .filter(|t| assignee.as_ref().is_none_or(|a| &t.assignee_id == a))
                .collect();
            if tasks.is_empty() {
                println!("No tasks");
                return Ok(());
            }
            for task in tasks {
                println!(
                    "{:<12} {:<12} {:<7} {}  (due {})",
                    task.id,
                    task.status,
                    task.priority,
                    task.title,
                    task.due_date.format("%Y-%m-%d")
                );
            }
        }
        TaskCommand::Board => {
            store.fetch_tasks().await?;
            let tasks = store.tasks();
            for status in TaskStatus::ALL {
                let column: Vec<_> = tasks.iter().filter(|t| t.status == status).collect();
                println!("== {status} ({}) ==", column.len());
                for task in column {
                    println!("  [{}] {} ({})", task.priority, task.title, task.id);
                }
            }
        }
        TaskCommand::SetStatus { id, status } => {
            let status: TaskStatus = status.parse()?;
            let id = EntityId::new(id);
            store.fetch_tasks().await?;
            store.update_task_status(&id, status).await?;
            println!("Task {id} → {status}");
        }
    }
    Ok(())
}
