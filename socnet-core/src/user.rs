use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PostId, UserId};

/// A member of the network.
///
/// Relationships are stored as id sets, never as references: `friends`
/// mirrors the friend's own set (symmetric), `posts_created` holds the
/// posts this user owns, and `posts_shared_with_me` mirrors the
/// `shared_with` set of each post another user shared here. The directory
/// operations in [`crate::network`] are responsible for keeping both ends
/// of every relation in step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub age: u32,
    pub friends: BTreeSet<UserId>,
    pub posts_created: BTreeSet<PostId>,
    pub posts_shared_with_me: BTreeSet<PostId>,
}

impl User {
    pub fn new(user_id: UserId, name: impl Into<String>, age: u32) -> Self {
        Self {
            user_id,
            name: name.into(),
            age,
            friends: BTreeSet::new(),
            posts_created: BTreeSet::new(),
            posts_shared_with_me: BTreeSet::new(),
        }
    }

    /// Add a friend edge on this side only. Rejects self-reference,
    /// ignores duplicates. Returns whether the set changed.
    pub fn add_friend(&mut self, friend_id: UserId) -> bool {
        if friend_id == self.user_id {
            return false;
        }
        self.friends.insert(friend_id)
    }

    /// Remove a friend edge on this side only. Returns whether the friend
    /// was present.
    pub fn remove_friend(&mut self, friend_id: UserId) -> bool {
        self.friends.remove(&friend_id)
    }

    pub fn is_friend(&self, friend_id: UserId) -> bool {
        self.friends.contains(&friend_id)
    }

    pub fn add_created_post(&mut self, post_id: PostId) {
        self.posts_created.insert(post_id);
    }

    pub fn remove_created_post(&mut self, post_id: PostId) -> bool {
        self.posts_created.remove(&post_id)
    }

    /// Record a post shared into this user's view. Idempotent; returns
    /// whether the set changed.
    pub fn add_shared_post(&mut self, post_id: PostId) -> bool {
        self.posts_shared_with_me.insert(post_id)
    }

    pub fn remove_shared_post(&mut self, post_id: PostId) -> bool {
        self.posts_shared_with_me.remove(&post_id)
    }

    pub fn count_created_posts(&self) -> usize {
        self.posts_created.len()
    }

    pub fn count_shared_posts(&self) -> usize {
        self.posts_shared_with_me.len()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User ID: {}, Name: {}, Age: {}",
            self.user_id, self.name, self.age
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_friend_rejects_self() {
        let mut user = User::new(1, "Ahmed", 20);
        assert!(!user.add_friend(1));
        assert!(user.friends.is_empty());
    }

    #[test]
    fn test_add_friend_is_idempotent() {
        let mut user = User::new(1, "Ahmed", 20);
        assert!(user.add_friend(2));
        assert!(!user.add_friend(2));
        assert_eq!(user.friends.len(), 1);
    }

    #[test]
    fn test_remove_friend_reports_presence() {
        let mut user = User::new(1, "Ahmed", 20);
        user.add_friend(2);
        assert!(user.remove_friend(2));
        assert!(!user.remove_friend(2));
    }

    #[test]
    fn test_shared_posts_idempotent() {
        let mut user = User::new(1, "Ahmed", 20);
        assert!(user.add_shared_post(10));
        assert!(!user.add_shared_post(10));
        assert_eq!(user.count_shared_posts(), 1);
        assert!(user.remove_shared_post(10));
        assert_eq!(user.count_shared_posts(), 0);
    }
}
