//! Friendship management commands

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use socnet_core::UserId;

use crate::store;

#[derive(Parser, Debug)]
pub struct FriendArgs {
    #[command(subcommand)]
    pub command: FriendCommand,
}

#[derive(Subcommand, Debug)]
pub enum FriendCommand {
    /// Add a symmetric friendship between two users
    Add { user1: UserId, user2: UserId },
    /// Remove a friendship from both sides
    Remove { user1: UserId, user2: UserId },
}

pub fn run_friend(args: FriendArgs, data_dir: &Path) -> Result<()> {
    match args.command {
        FriendCommand::Add { user1, user2 } => {
            let mut network = store::open(data_dir)?;
            network.add_friendship(user1, user2)?;
            store::save(&network, data_dir)?;
            let name1 = user_name(&network, user1);
            let name2 = user_name(&network, user2);
            println!("Friendship added between {} and {}.", name1, name2);
        }

        FriendCommand::Remove { user1, user2 } => {
            let mut network = store::open(data_dir)?;
            if network.remove_friendship(user1, user2)? {
                store::save(&network, data_dir)?;
                println!("Friendship removed between users {} and {}.", user1, user2);
            } else {
                println!("Users {} and {} were not friends.", user1, user2);
            }
        }
    }
    Ok(())
}

fn user_name(network: &socnet_core::SocialNetwork, user_id: UserId) -> String {
    network
        .find_user(user_id)
        .map(|u| u.name.clone())
        .unwrap_or_else(|| format!("user {}", user_id))
}
