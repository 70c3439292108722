//! Terminal front-end for the taskboard service.
//!
//! One-shot commands cover account and task management; `dashboard` opens
//! an interactive view of the task list with filters and statistics.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use taskboard_client::{FileSessionStore, TaskApiClient};
use taskboard_core::{
    FilterCriteria, TaskId, TaskPriority, TaskStatus, parse_choice, parse_date_bound,
};
use tracing::debug;

mod commands;
mod ui;

use commands::TaskFields;
use taskboard::config::Config;
use taskboard::controllers::AppContext;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Server URL (overrides the config file)
    #[arg(short, long, global = true, env = "TASKBOARD_SERVER")]
    server: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user
    Register {
        /// Username
        #[arg(short, long)]
        username: Option<String>,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Login with existing credentials
    Login {
        /// Username
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the profile of the logged-in user
    Whoami,
    /// Change username, email or password
    Profile {
        /// New username
        #[arg(short, long)]
        username: Option<String>,
        /// New email address
        #[arg(short, long)]
        email: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        password: bool,
    },
    /// Exchange the refresh token for a new access token
    Refresh,
    /// List tasks
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the filtered tasks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single task
    Show {
        id: TaskId,
    },
    /// Create a task
    Create {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Update a task; omitted fields keep their current value
    Update {
        id: TaskId,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a task
    Delete {
        id: TaskId,
    },
    /// Open the interactive dashboard
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// yet-to-start, in-progress, completed, hold or all
    #[arg(long, default_value = "all")]
    status: String,
    /// low, medium, high or all
    #[arg(long, default_value = "all")]
    priority: String,
    /// Earliest deadline (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Latest deadline (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
}

impl FilterArgs {
    fn criteria(&self) -> Result<FilterCriteria> {
        Ok(FilterCriteria::new()
            .with_status(parse_choice(&self.status)?)
            .with_priority(parse_choice(&self.priority)?)
            .with_start_date(parse_date_bound(self.from.as_deref().unwrap_or_default())?)
            .with_end_date(parse_date_bound(self.to.as_deref().unwrap_or_default())?))
    }
}

#[derive(Args)]
struct FieldArgs {
    #[arg(short, long)]
    title: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    /// low, medium or high
    #[arg(short, long)]
    priority: Option<TaskPriority>,
    /// yet-to-start, in-progress, completed or hold
    #[arg(long)]
    status: Option<TaskStatus>,
    /// YYYY-MM-DD
    #[arg(long)]
    deadline: Option<String>,
}

impl From<FieldArgs> for TaskFields {
    fn from(args: FieldArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            priority: args.priority,
            status: args.status,
            deadline: args.deadline,
        }
    }
}

fn build_context(server: Option<String>) -> Result<AppContext> {
    let mut config = Config::load()?;
    if let Some(server) = server {
        config.server_url = server;
    }
    debug!(server = %config.server_url, base_path = %config.api_base_path, "Using server");

    let api = TaskApiClient::builder(config.server_url)
        .with_base_path(config.api_base_path)
        .build()?;
    let sessions = FileSessionStore::new(Config::session_path()?);

    Ok(AppContext::new(Arc::new(api), Arc::new(sessions)))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON output and the dashboard stay clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("taskboard=warn".parse()?)
                .add_directive("taskboard_client=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let ctx = build_context(cli.server)?;

    match cli.command {
        Commands::Register { username, email } => {
            commands::register(ctx, username, email).await?
        }
        Commands::Login { username } => commands::login(ctx, username).await?,
        Commands::Logout => commands::logout(ctx)?,
        Commands::Whoami => commands::whoami(ctx).await?,
        Commands::Profile {
            username,
            email,
            password,
        } => commands::update_profile(ctx, username, email, password).await?,
        Commands::Refresh => commands::refresh(ctx).await?,
        Commands::List { filter, json } => commands::list(ctx, filter.criteria()?, json).await?,
        Commands::Show { id } => commands::show(ctx, id).await?,
        Commands::Create { fields } => commands::create(ctx, fields.into()).await?,
        Commands::Update { id, fields } => commands::update(ctx, id, fields.into()).await?,
        Commands::Delete { id } => commands::delete(ctx, id).await?,
        Commands::Dashboard { filter } => ui::run_dashboard(ctx, filter.criteria()?).await?,
    }

    Ok(())
}
