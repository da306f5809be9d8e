mod add;
mod attention_cmd;
mod auth;
mod complete;
mod config;
mod delete;
mod edit;
mod list;
mod output;
mod remote;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use output::OutputFormat;
use taskdeck_core::{Folder, Priority};

#[derive(Parser)]
#[command(
    name = "taskdeck",
    about = "taskdeck CLI - manage personal tasks over a REST backend"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the token pair
    Login {
        /// Username (prompted when omitted)
        username: Option<String>,
    },

    /// Forget the stored tokens
    Logout,

    /// List tasks: sorted for urgency, with the attention banner
    List {
        /// Only show tasks in this folder
        #[arg(long)]
        folder: Option<Folder>,

        /// Only show completed tasks
        #[arg(long)]
        completed: bool,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Create a task
    Add {
        title: String,

        #[arg(long, default_value_t = Folder::General)]
        folder: Folder,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,

        #[arg(long, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// Edit a task's title, folder, due date or priority
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        folder: Option<Folder>,

        /// New due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,

        #[arg(long)]
        priority: Option<Priority>,
    },

    /// Mark a task complete
    Done { id: String },

    /// Mark a completed task as open again
    Reopen { id: String },

    /// Delete a task
    Rm {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show overdue high-priority tasks that need attention now
    Attention {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show or set configuration
    Config {
        /// Set the server URL
        #[arg(long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login { username } => auth::run_login(username).await,
        Commands::Logout => auth::run_logout(),
        Commands::List {
            folder,
            completed,
            format,
        } => list::run_list(folder, completed, format).await,
        Commands::Add {
            title,
            folder,
            due,
            priority,
        } => add::run_add(title, folder, due, priority).await,
        Commands::Edit {
            id,
            title,
            folder,
            due,
            clear_due,
            priority,
        } => edit::run_edit(&id, title, folder, due, clear_due, priority).await,
        Commands::Done { id } => complete::run_set_completed(&id, true).await,
        Commands::Reopen { id } => complete::run_set_completed(&id, false).await,
        Commands::Rm { id, yes } => delete::run_delete(&id, yes).await,
        Commands::Attention { format } => attention_cmd::run_attention(format).await,
        Commands::Config { server } => {
            if server.is_none() {
                config::show_config()
            } else {
                config::set_config(server)
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
