//! Link inspection commands.

use anyhow::Context;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use linkhub_core::config::AppConfig;
use linkhub_database::repositories::LinkRepository;
use linkhub_entity::link::Link;
use linkhub_service::LinkService;

use crate::output::{self, OutputFormat};

/// Arguments for link commands
#[derive(Debug, Args)]
pub struct LinkArgs {
    #[command(subcommand)]
    pub command: LinkCommand,
}

/// Link subcommands
#[derive(Debug, Subcommand)]
pub enum LinkCommand {
    /// Show the link stored under a key
    Show {
        /// The link key (case-sensitive)
        key: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct LinkRow {
    id: i64,
    key: String,
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    kind: String,
    target_id: i64,
    creator: i64,
    created_at: String,
}

impl From<&Link> for LinkRow {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id.0,
            key: link.key.clone(),
            kind: link.type_name.clone(),
            target_id: link.target_id,
            creator: link.creator_user_id.0,
            created_at: link.audit.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute link commands
pub async fn execute(
    args: &LinkArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let db = super::connect(config).await?;

    match &args.command {
        LinkCommand::Show { key } => {
            let mut conn = db.acquire().await?;
            let link = LinkService::new(LinkRepository::new())
                .get_by_key(&mut *conn, key)
                .await
                .with_context(|| format!("No live link with key '{key}'"))?;

            output::print_item(&LinkRow::from(&link), format);
            if !link.has_target() {
                output::print_error("Link target has not been backfilled");
            }
        }
    }

    Ok(())
}
