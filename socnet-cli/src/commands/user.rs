//! User management commands

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use socnet_core::{report, UserId};

use crate::store;

#[derive(Parser, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Add a user with a caller-chosen unique id
    Add {
        id: UserId,
        name: String,
        age: u32,
    },
    /// Update the name and age of an existing user
    Update {
        id: UserId,
        name: String,
        age: u32,
    },
    /// Delete a user, cascading through friendships, their posts, and
    /// every share pointing at them
    Delete { id: UserId },
    /// Show one user with their friends and activity counts
    Show { id: UserId },
    /// Find a user by id or (case-insensitive) name
    Find { query: String },
    /// List all users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run_user(args: UserArgs, data_dir: &Path) -> Result<()> {
    match args.command {
        UserCommand::Add { id, name, age } => {
            let mut network = store::open(data_dir)?;
            network.add_user(id, name.clone(), age)?;
            store::save(&network, data_dir)?;
            println!("User '{}' (ID: {}) added.", name, id);
        }

        UserCommand::Update { id, name, age } => {
            let mut network = store::open(data_dir)?;
            network.update_user(id, name, age)?;
            store::save(&network, data_dir)?;
            println!("User {} updated.", id);
        }

        UserCommand::Delete { id } => {
            let mut network = store::open(data_dir)?;
            network.delete_user(id)?;
            store::save(&network, data_dir)?;
            println!("User {} and associated data deleted.", id);
        }

        UserCommand::Show { id } => {
            let network = store::open(data_dir)?;
            let user = network
                .find_user(id)
                .ok_or_else(|| socnet_core::NetworkError::user_not_found(id))?;
            println!("{}", user);
            print_friends(&network, user);
            let engagement = report::engagement(&network, id)?;
            println!("Posts created: {}", engagement.posts_created);
            println!("Posts shared with user: {}", engagement.posts_shared_with);
        }

        UserCommand::Find { query } => {
            let network = store::open(data_dir)?;
            let found = match query.parse::<UserId>() {
                Ok(id) => network.find_user(id),
                Err(_) => network.find_user_by_name(&query),
            };
            match found {
                Some(user) => println!("Found: {}", user),
                None => println!("No user matching '{}'.", query),
            }
        }

        UserCommand::List { json } => {
            let network = store::open(data_dir)?;
            if json {
                let users: Vec<_> = network.users().collect();
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else if network.user_count() == 0 {
                println!("No users in the network.");
            } else {
                for user in network.users() {
                    println!("{}", user);
                }
            }
        }
    }
    Ok(())
}

fn print_friends(network: &socnet_core::SocialNetwork, user: &socnet_core::User) {
    if user.friends.is_empty() {
        println!("Friends: None");
        return;
    }
    let names: Vec<String> = user
        .friends
        .iter()
        .map(|&id| match network.find_user(id) {
            Some(friend) => format!("{} (ID:{})", friend.name, id),
            None => format!("Unknown (ID:{})", id),
        })
        .collect();
    println!("Friends: {}", names.join(", "));
}
