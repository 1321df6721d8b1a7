//! Post management commands

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use socnet_core::{PostDeletion, PostId, UserId};

use crate::store;

#[derive(Parser, Debug)]
pub struct PostArgs {
    #[command(subcommand)]
    pub command: PostCommand,
}

#[derive(Subcommand, Debug)]
pub enum PostCommand {
    /// Create a post, optionally sharing it with other users
    Create {
        creator: UserId,
        content: String,
        /// Creation date in d.M.yyyy form (e.g. 25.3.2025)
        date: String,
        /// User ids to share the post with (comma-separated)
        #[arg(long = "share", value_delimiter = ',', value_name = "IDS")]
        share_with: Vec<UserId>,
    },
    /// Delete a post: the creator deletes it for everyone, a viewer only
    /// drops it from their own shared view
    Delete { post: PostId, requester: UserId },
    /// Share an existing post with a user
    Share { post: PostId, user: UserId },
    /// Retract a share from a user
    Unshare { post: PostId, user: UserId },
    /// List posts, optionally only those created by one user
    List {
        /// Only posts created by this user
        #[arg(long)]
        creator: Option<UserId>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run_post(args: PostArgs, data_dir: &Path) -> Result<()> {
    match args.command {
        PostCommand::Create {
            creator,
            content,
            date,
            share_with,
        } => {
            if content.contains(',') {
                anyhow::bail!("post content must not contain commas (the data format has no quoting)");
            }
            let mut network = store::open(data_dir)?;
            let creation = network.create_post(creator, content, date, &share_with)?;
            store::save(&network, data_dir)?;

            print!("Post {} created.", creation.post_id);
            if !creation.shared_with.is_empty() {
                print!(" Shared with: {}.", join_ids(&creation.shared_with));
            }
            if !creation.skipped.is_empty() {
                print!(" Skipped unknown ids: {}.", join_ids(&creation.skipped));
            }
            println!();
        }

        PostCommand::Delete { post, requester } => {
            let mut network = store::open(data_dir)?;
            let outcome = network.delete_post(post, requester)?;
            store::save(&network, data_dir)?;
            match outcome {
                PostDeletion::Deleted => println!("Post {} deleted.", post),
                PostDeletion::RemovedFromView => {
                    println!("Post {} removed from user {}'s view.", post, requester)
                }
            }
        }

        PostCommand::Share { post, user } => {
            let mut network = store::open(data_dir)?;
            if network.share_post(post, user)? {
                store::save(&network, data_dir)?;
                println!("Post {} shared with user {}.", post, user);
            } else {
                println!("Post {} was already shared with user {}.", post, user);
            }
        }

        PostCommand::Unshare { post, user } => {
            let mut network = store::open(data_dir)?;
            if network.unshare_post(post, user)? {
                store::save(&network, data_dir)?;
                println!("Post {} unshared from user {}.", post, user);
            } else {
                println!("Post {} was not shared with user {}.", post, user);
            }
        }

        PostCommand::List { creator, json } => {
            let network = store::open(data_dir)?;
            let posts: Vec<_> = network
                .posts()
                .filter(|p| creator.map_or(true, |id| p.creator_id == id))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else if posts.is_empty() {
                println!("No posts.");
            } else {
                for post in posts {
                    if post.shared_with.is_empty() {
                        println!("{}", post);
                    } else {
                        let shared: Vec<UserId> = post.shared_with.iter().copied().collect();
                        println!("{}, Shared With: {}", post, join_ids(&shared));
                    }
                }
            }
        }
    }
    Ok(())
}

fn join_ids(ids: &[UserId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
