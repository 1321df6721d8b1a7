//! Read-only report commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use socnet_core::{report, UserId};

use crate::store;

#[derive(Parser, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Posts created, for one user or the whole network
    Created {
        /// Restrict the report to one user
        #[arg(long)]
        user: Option<UserId>,
        /// Write the report to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Posts shared into a user's view, for one user or the whole network
    Shared {
        /// Restrict the report to one user
        #[arg(long)]
        user: Option<UserId>,
        /// Write the report to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Created/shared counts for one user
    Engagement {
        user: UserId,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Most active users by created-post count
    Active {
        /// How many users to rank
        #[arg(default_value_t = 5)]
        n: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Whole-network totals
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run_report(args: ReportArgs, data_dir: &Path) -> Result<()> {
    let network = store::open(data_dir)?;

    match args.command {
        ReportCommand::Created { user, out } => {
            let text = match user {
                Some(user_id) => report::posts_created_by(&network, user_id)?,
                None => report::posts_created_report(&network),
            };
            emit(&text, out.as_deref())?;
        }

        ReportCommand::Shared { user, out } => {
            let text = match user {
                Some(user_id) => report::posts_shared_with(&network, user_id)?,
                None => report::posts_shared_report(&network),
            };
            emit(&text, out.as_deref())?;
        }

        ReportCommand::Engagement { user, json } => {
            let engagement = report::engagement(&network, user)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&engagement)?);
            } else {
                println!("--- Engagement Metrics for {} ---", engagement.name);
                println!("Posts Created: {}", engagement.posts_created);
                println!("Posts Shared With User: {}", engagement.posts_shared_with);
            }
        }

        ReportCommand::Active { n, json } => {
            let ranking = report::most_active(&network, n);
            if json {
                println!("{}", serde_json::to_string_pretty(&ranking)?);
            } else if ranking.is_empty() {
                println!("No users in the network.");
            } else {
                println!("--- Top {} Most Active Users ---", n);
                for entry in ranking {
                    println!(
                        " - {} (ID: {}): {} posts created",
                        entry.name, entry.user_id, entry.posts_created
                    );
                }
            }
        }

        ReportCommand::Summary { json } => {
            let summary = report::network_summary(&network);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Users: {}", summary.users);
                println!("Posts: {}", summary.posts);
                println!("Friendships: {}", summary.friendships);
                println!("Shares: {}", summary.shares);
            }
        }
    }
    Ok(())
}

fn emit(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write report {}", path.display()))?;
            println!("Report saved to {}.", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
