//! User management CLI commands.

use anyhow::Context;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use linkhub_core::config::AppConfig;
use linkhub_core::types::{ListQuery, PageRequest};
use linkhub_database::repositories::UserRepository;
use linkhub_entity::user::User;
use linkhub_service::{CreateUserRequest, UserAdminService};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an account
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,
        /// Password (falls back to LINKHUB_USER_PASSWORD)
        #[arg(short, long, env = "LINKHUB_USER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        display_name: Option<String>,
        /// Grant system administrator rights
        #[arg(long)]
        admin: bool,
    },
    /// List accounts
    List {
        /// Match on username or email
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    admin: bool,
    status: String,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.0,
            username: u.username.clone(),
            email: u.email.clone().unwrap_or_default(),
            admin: u.is_system,
            status: u.status.as_str().to_string(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let db = super::connect(config).await?;

    match &args.command {
        UserCommand::Create {
            username,
            password,
            email,
            display_name,
            admin,
        } => {
            let users = UserAdminService::new(db, &config.auth);
            let user = users
                .bootstrap_user(CreateUserRequest {
                    username: username.clone(),
                    email: email.clone(),
                    password: password.clone(),
                    display_name: display_name.clone(),
                    is_system: *admin,
                })
                .await
                .with_context(|| format!("Failed to create user '{username}'"))?;

            output::print_item(&UserRow::from(&user), format);
            output::print_success(&format!("User '{}' created", user.username));
        }
        UserCommand::List { search, page } => {
            let mut conn = db.acquire().await?;
            let query = ListQuery::new(PageRequest::new(*page, 50), search.clone());
            let users = UserRepository::new()
                .list(&mut *conn, &query)
                .await
                .context("Failed to list users")?;

            let rows: Vec<UserRow> = users.items.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "Page {} of {} ({} users)",
                    users.page, users.total_pages, users.total_items
                );
            }
        }
    }

    Ok(())
}
