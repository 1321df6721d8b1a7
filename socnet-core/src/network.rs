//! The user directory: single source of truth for user and post existence,
//! and the only place relationships are mutated.
//!
//! Users and posts live in id-keyed arenas; relations are id sets on both
//! ends. Every operation here either leaves the graph untouched on error or
//! updates both ends of the affected relation before returning, so the
//! invariants (friend symmetry, bidirectional shares, no dangling ids) hold
//! between any two calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{NetworkError, Result};
use crate::post::Post;
use crate::user::User;
use crate::{PostId, UserId};

/// Outcome of a post creation: the assigned id, the users actually shared
/// with, and the requested share targets that did not exist (skipped with a
/// warning, never a hard failure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCreation {
    pub post_id: PostId,
    pub shared_with: Vec<UserId>,
    pub skipped: Vec<UserId>,
}

/// What a `delete_post` call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PostDeletion {
    /// Requester was the creator: the post is gone for everyone.
    Deleted,
    /// Requester was a viewer: the post left their shared view only.
    RemovedFromView,
}

/// The in-memory directory of users and posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialNetwork {
    users: BTreeMap<UserId, User>,
    posts: BTreeMap<PostId, Post>,
    next_post_id: PostId,
}

impl Default for SocialNetwork {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            posts: BTreeMap::new(),
            next_post_id: 1,
        }
    }
}

impl SocialNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Lookup ---

    pub fn find_user(&self, user_id: UserId) -> Option<&User> {
        self.users.get(&user_id)
    }

    /// Case-insensitive name lookup. Names are not unique; the match with
    /// the lowest user id wins.
    pub fn find_user_by_name(&self, name: &str) -> Option<&User> {
        let needle = name.to_lowercase();
        self.users.values().find(|u| u.name.to_lowercase() == needle)
    }

    pub fn find_post(&self, post_id: PostId) -> Option<&Post> {
        self.posts.get(&post_id)
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.users.contains_key(&user_id)
    }

    /// All users in ascending id order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// All posts in ascending id order.
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    fn require_user(&self, user_id: UserId) -> Result<()> {
        if self.users.contains_key(&user_id) {
            Ok(())
        } else {
            Err(NetworkError::user_not_found(user_id))
        }
    }

    // --- User management ---

    pub fn add_user(&mut self, user_id: UserId, name: impl Into<String>, age: u32) -> Result<()> {
        if self.users.contains_key(&user_id) {
            return Err(NetworkError::DuplicateUser { user_id });
        }
        self.users.insert(user_id, User::new(user_id, name, age));
        debug!("user {} added", user_id);
        Ok(())
    }

    /// In-place update of the mutable profile fields.
    pub fn update_user(&mut self, user_id: UserId, name: impl Into<String>, age: u32) -> Result<()> {
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| NetworkError::user_not_found(user_id))?;
        user.name = name.into();
        user.age = age;
        Ok(())
    }

    /// Delete a user and cascade: every post they created is fully deleted
    /// (viewers' backlinks included), the user leaves every surviving
    /// friend set, and every surviving post forgets the user was shared
    /// with them. No surviving entity references the id afterwards.
    pub fn delete_user(&mut self, user_id: UserId) -> Result<()> {
        let user = self
            .users
            .get(&user_id)
            .ok_or_else(|| NetworkError::user_not_found(user_id))?;

        let created: Vec<PostId> = user.posts_created.iter().copied().collect();
        let shared: Vec<PostId> = user.posts_shared_with_me.iter().copied().collect();
        let friends: Vec<UserId> = user.friends.iter().copied().collect();

        for post_id in created {
            self.delete_post_everywhere(post_id);
        }
        for post_id in shared {
            if let Some(post) = self.posts.get_mut(&post_id) {
                post.remove_shared_user(user_id);
            }
        }
        for friend_id in friends {
            if let Some(friend) = self.users.get_mut(&friend_id) {
                friend.remove_friend(user_id);
            }
        }

        self.users.remove(&user_id);
        debug!("user {} deleted with cascades", user_id);
        Ok(())
    }

    // --- Friendship management ---

    /// Add a symmetric friendship. If either lookup fails, neither side is
    /// mutated. Idempotent for an existing friendship.
    pub fn add_friendship(&mut self, user_id1: UserId, user_id2: UserId) -> Result<()> {
        if user_id1 == user_id2 {
            return Err(NetworkError::SelfFriend { user_id: user_id1 });
        }
        self.require_user(user_id1)?;
        self.require_user(user_id2)?;

        if let Some(user) = self.users.get_mut(&user_id1) {
            user.add_friend(user_id2);
        }
        if let Some(user) = self.users.get_mut(&user_id2) {
            user.add_friend(user_id1);
        }
        debug!("friendship added between {} and {}", user_id1, user_id2);
        Ok(())
    }

    /// Remove a friendship from both sides. `Ok(false)` means both users
    /// exist but were not friends.
    pub fn remove_friendship(&mut self, user_id1: UserId, user_id2: UserId) -> Result<bool> {
        self.require_user(user_id1)?;
        self.require_user(user_id2)?;

        let mut removed = false;
        if let Some(user) = self.users.get_mut(&user_id1) {
            removed |= user.remove_friend(user_id2);
        }
        if let Some(user) = self.users.get_mut(&user_id2) {
            removed |= user.remove_friend(user_id1);
        }
        Ok(removed)
    }

    // --- Post management ---

    /// Create a post under the next sequential id. Share targets equal to
    /// the creator are silently ignored; unknown targets are skipped and
    /// reported back in [`PostCreation::skipped`].
    pub fn create_post(
        &mut self,
        creator_id: UserId,
        content: impl Into<String>,
        creation_date: impl Into<String>,
        share_with: &[UserId],
    ) -> Result<PostCreation> {
        let post_id = self.next_post_id;
        self.insert_post(post_id, creator_id, content, creation_date, share_with)
    }

    /// Low-level insert under an explicit id (the loader path). Bumps the
    /// monotonic counter past the inserted id so later `create_post` calls
    /// never collide.
    pub fn insert_post(
        &mut self,
        post_id: PostId,
        creator_id: UserId,
        content: impl Into<String>,
        creation_date: impl Into<String>,
        share_with: &[UserId],
    ) -> Result<PostCreation> {
        if self.posts.contains_key(&post_id) {
            return Err(NetworkError::DuplicatePost { post_id });
        }
        self.require_user(creator_id)?;

        self.next_post_id = self.next_post_id.max(post_id.saturating_add(1));

        let mut post = Post::new(post_id, creator_id, content, creation_date);
        let mut shared_with = Vec::new();
        let mut skipped = Vec::new();
        for &target in share_with {
            if target == creator_id || post.is_shared_with(target) {
                continue;
            }
            match self.users.get_mut(&target) {
                Some(user) => {
                    post.add_shared_user(target);
                    user.add_shared_post(post_id);
                    shared_with.push(target);
                }
                None => {
                    warn!("user {} not found for sharing post {}, skipping", target, post_id);
                    skipped.push(target);
                }
            }
        }

        if let Some(creator) = self.users.get_mut(&creator_id) {
            creator.add_created_post(post_id);
        }
        self.posts.insert(post_id, post);
        debug!("post {} created by user {}", post_id, creator_id);
        Ok(PostCreation {
            post_id,
            shared_with,
            skipped,
        })
    }

    /// Share an existing post with a user, both directions in one call.
    /// `Ok(false)` means the post was already shared with them.
    pub fn share_post(&mut self, post_id: PostId, user_id: UserId) -> Result<bool> {
        self.require_user(user_id)?;
        let post = self
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| NetworkError::post_not_found(post_id))?;
        if post.creator_id == user_id {
            return Err(NetworkError::SelfShare { post_id, user_id });
        }
        let added = post.add_shared_user(user_id);
        if let Some(user) = self.users.get_mut(&user_id) {
            user.add_shared_post(post_id);
        }
        Ok(added)
    }

    /// Retract a share, both directions. `Ok(false)` means the post was not
    /// shared with them in the first place.
    pub fn unshare_post(&mut self, post_id: PostId, user_id: UserId) -> Result<bool> {
        self.require_user(user_id)?;
        let post = self
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| NetworkError::post_not_found(post_id))?;
        let removed = post.remove_shared_user(user_id);
        if let Some(user) = self.users.get_mut(&user_id) {
            user.remove_shared_post(post_id);
        }
        Ok(removed)
    }

    /// Delete a post on behalf of `requester_id`. The creator deletes it
    /// for everyone; a viewer merely drops it from their own shared view,
    /// leaving the post and its other viewers untouched.
    pub fn delete_post(&mut self, post_id: PostId, requester_id: UserId) -> Result<PostDeletion> {
        self.require_user(requester_id)?;
        let creator_id = self
            .posts
            .get(&post_id)
            .map(|p| p.creator_id)
            .ok_or_else(|| NetworkError::post_not_found(post_id))?;

        if creator_id == requester_id {
            self.delete_post_everywhere(post_id);
            debug!("post {} deleted by creator {}", post_id, requester_id);
            return Ok(PostDeletion::Deleted);
        }

        let removed = self
            .posts
            .get_mut(&post_id)
            .map(|post| post.remove_shared_user(requester_id))
            .unwrap_or(false);
        if !removed {
            return Err(NetworkError::not_visible(post_id, requester_id));
        }
        if let Some(user) = self.users.get_mut(&requester_id) {
            user.remove_shared_post(post_id);
        }
        debug!("post {} removed from user {}'s view", post_id, requester_id);
        Ok(PostDeletion::RemovedFromView)
    }

    /// Remove a post from the arena and strip every backlink to it: the
    /// creator's created set and each viewer's shared set.
    fn delete_post_everywhere(&mut self, post_id: PostId) {
        let Some(post) = self.posts.remove(&post_id) else {
            return;
        };
        for viewer_id in &post.shared_with {
            if let Some(viewer) = self.users.get_mut(viewer_id) {
                viewer.remove_shared_post(post_id);
            }
        }
        if let Some(creator) = self.users.get_mut(&post.creator_id) {
            creator.remove_created_post(post_id);
        }
    }

    // --- Diagnostics ---

    /// Re-verify every relational invariant and describe each violation.
    /// An empty result means the graph is consistent.
    pub fn check_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for user in self.users.values() {
            for &friend_id in &user.friends {
                if friend_id == user.user_id {
                    issues.push(format!("user {} is their own friend", user.user_id));
                    continue;
                }
                match self.users.get(&friend_id) {
                    Some(friend) if friend.is_friend(user.user_id) => {}
                    Some(_) => issues.push(format!(
                        "friendship {} -> {} is not symmetric",
                        user.user_id, friend_id
                    )),
                    None => issues.push(format!(
                        "user {} lists unknown friend {}",
                        user.user_id, friend_id
                    )),
                }
            }

            for &post_id in &user.posts_created {
                match self.posts.get(&post_id) {
                    Some(post) if post.creator_id == user.user_id => {}
                    Some(post) => issues.push(format!(
                        "post {} is in user {}'s created set but belongs to user {}",
                        post_id, user.user_id, post.creator_id
                    )),
                    None => issues.push(format!(
                        "user {} lists unknown created post {}",
                        user.user_id, post_id
                    )),
                }
            }

            for &post_id in &user.posts_shared_with_me {
                match self.posts.get(&post_id) {
                    Some(post) if post.is_shared_with(user.user_id) => {}
                    Some(_) => issues.push(format!(
                        "post {} is in user {}'s shared view but not shared back",
                        post_id, user.user_id
                    )),
                    None => issues.push(format!(
                        "user {} lists unknown shared post {}",
                        user.user_id, post_id
                    )),
                }
            }
        }

        for post in self.posts.values() {
            match self.users.get(&post.creator_id) {
                Some(creator) if creator.posts_created.contains(&post.post_id) => {}
                Some(_) => issues.push(format!(
                    "post {} is missing from creator {}'s created set",
                    post.post_id, post.creator_id
                )),
                None => issues.push(format!(
                    "post {} has unknown creator {}",
                    post.post_id, post.creator_id
                )),
            }

            for &viewer_id in &post.shared_with {
                if viewer_id == post.creator_id {
                    issues.push(format!(
                        "post {} is shared with its own creator {}",
                        post.post_id, viewer_id
                    ));
                    continue;
                }
                match self.users.get(&viewer_id) {
                    Some(viewer) if viewer.posts_shared_with_me.contains(&post.post_id) => {}
                    Some(_) => issues.push(format!(
                        "post {} is shared with user {} but missing from their view",
                        post.post_id, viewer_id
                    )),
                    None => issues.push(format!(
                        "post {} is shared with unknown user {}",
                        post.post_id, viewer_id
                    )),
                }
            }

            if post.post_id >= self.next_post_id {
                issues.push(format!(
                    "post counter {} is not above live post id {}",
                    self.next_post_id, post.post_id
                ));
            }
        }

        issues
    }
}
