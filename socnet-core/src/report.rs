//! Read-only reporting over the directory.
//!
//! Nothing in here mutates the graph; every function walks the arenas and
//! resolves ids back to names. Text reports mirror the shape of the
//! original report files; the row types serialize for machine output.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::error::{NetworkError, Result};
use crate::network::SocialNetwork;
use crate::post::Post;
use crate::UserId;

/// Created/shared counts for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserEngagement {
    pub user_id: UserId,
    pub name: String,
    pub posts_created: usize,
    pub posts_shared_with: usize,
}

/// One row of the most-active ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub user_id: UserId,
    pub name: String,
    pub posts_created: usize,
}

/// Whole-network totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    pub users: usize,
    pub posts: usize,
    pub friendships: usize,
    pub shares: usize,
}

pub fn engagement(network: &SocialNetwork, user_id: UserId) -> Result<UserEngagement> {
    let user = network
        .find_user(user_id)
        .ok_or_else(|| NetworkError::user_not_found(user_id))?;
    Ok(UserEngagement {
        user_id,
        name: user.name.clone(),
        posts_created: user.count_created_posts(),
        posts_shared_with: user.count_shared_posts(),
    })
}

/// Top `n` users by created-post count, descending, ties broken by user id.
pub fn most_active(network: &SocialNetwork, n: usize) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = network
        .users()
        .map(|user| ActivityEntry {
            user_id: user.user_id,
            name: user.name.clone(),
            posts_created: user.count_created_posts(),
        })
        .collect();
    entries.sort_by(|a, b| {
        b.posts_created
            .cmp(&a.posts_created)
            .then(a.user_id.cmp(&b.user_id))
    });
    entries.truncate(n);
    entries
}

pub fn network_summary(network: &SocialNetwork) -> NetworkSummary {
    let friend_ends: usize = network.users().map(|u| u.friends.len()).sum();
    NetworkSummary {
        users: network.user_count(),
        posts: network.post_count(),
        // Each friendship appears once per side.
        friendships: friend_ends / 2,
        shares: network.posts().map(|p| p.shared_with.len()).sum(),
    }
}

/// Text report of one user's created posts, shared-with names resolved.
pub fn posts_created_by(network: &SocialNetwork, user_id: UserId) -> Result<String> {
    let user = network
        .find_user(user_id)
        .ok_or_else(|| NetworkError::user_not_found(user_id))?;

    let mut report = String::new();
    let _ = writeln!(report, "--- Posts Created by {} (ID: {}) ---", user.name, user_id);
    if user.posts_created.is_empty() {
        report.push_str("No posts created by this user.\n");
    }
    for &post_id in &user.posts_created {
        if let Some(post) = network.find_post(post_id) {
            let _ = writeln!(
                report,
                "Post ID: {}, Content: \"{}\", Date: {}, Shared With: {}",
                post.post_id,
                post.content,
                post.creation_date,
                shared_names(network, post)
            );
        }
    }
    report.push_str("------------------------------------------\n");
    Ok(report)
}

/// Text report of the posts shared into one user's view, creators resolved.
pub fn posts_shared_with(network: &SocialNetwork, user_id: UserId) -> Result<String> {
    let user = network
        .find_user(user_id)
        .ok_or_else(|| NetworkError::user_not_found(user_id))?;

    let mut report = String::new();
    let _ = writeln!(report, "--- Posts Shared with {} (ID: {}) ---", user.name, user_id);
    if user.posts_shared_with_me.is_empty() {
        report.push_str("No posts shared with this user.\n");
    }
    for &post_id in &user.posts_shared_with_me {
        if let Some(post) = network.find_post(post_id) {
            let creator = network
                .find_user(post.creator_id)
                .map(|u| u.name.as_str())
                .unwrap_or("Unknown");
            let _ = writeln!(
                report,
                "Post ID: {}, Content: \"{}\", Date: {} (Creator: {} ID:{})",
                post.post_id, post.content, post.creation_date, creator, post.creator_id
            );
        }
    }
    report.push_str("------------------------------------------\n");
    Ok(report)
}

/// Whole-network created-posts report, one section per user.
pub fn posts_created_report(network: &SocialNetwork) -> String {
    let mut report = String::from("Posts Created Report\n====================\n");
    for user in network.users() {
        let _ = write!(report, "\nUser: {} (ID: {})\n", user.name, user.user_id);
        if user.posts_created.is_empty() {
            report.push_str("  No posts created.\n");
        }
        for &post_id in &user.posts_created {
            if let Some(post) = network.find_post(post_id) {
                let _ = writeln!(
                    report,
                    "  - Post ID: {}, Content: {}, Date: {}, Shared With: {}",
                    post.post_id,
                    post.content,
                    post.creation_date,
                    shared_names(network, post)
                );
            }
        }
    }
    report
}

/// Whole-network shared-posts report, one section per user.
pub fn posts_shared_report(network: &SocialNetwork) -> String {
    let mut report = String::from("Posts Shared With User Report\n=============================\n");
    for user in network.users() {
        let _ = write!(report, "\nUser: {} (ID: {})\n", user.name, user.user_id);
        if user.posts_shared_with_me.is_empty() {
            report.push_str("  No posts shared with this user.\n");
        }
        for &post_id in &user.posts_shared_with_me {
            if let Some(post) = network.find_post(post_id) {
                let creator = network
                    .find_user(post.creator_id)
                    .map(|u| u.name.as_str())
                    .unwrap_or("Unknown");
                let _ = writeln!(
                    report,
                    "  - Post ID: {}, Content: {}, Date: {}, Creator: {} (ID: {})",
                    post.post_id, post.content, post.creation_date, creator, post.creator_id
                );
            }
        }
    }
    report
}

pub fn save_posts_created_report(network: &SocialNetwork, path: &Path) -> anyhow::Result<()> {
    fs::write(path, posts_created_report(network))
        .with_context(|| format!("failed to write report {}", path.display()))
}

pub fn save_posts_shared_report(network: &SocialNetwork, path: &Path) -> anyhow::Result<()> {
    fs::write(path, posts_shared_report(network))
        .with_context(|| format!("failed to write report {}", path.display()))
}

fn shared_names(network: &SocialNetwork, post: &Post) -> String {
    if post.shared_with.is_empty() {
        return "None".to_string();
    }
    let names: Vec<String> = post
        .shared_with
        .iter()
        .map(|&id| match network.find_user(id) {
            Some(user) => format!("{} (ID:{})", user.name, id),
            None => format!("Unknown (ID:{})", id),
        })
        .collect();
    names.join(", ")
}
