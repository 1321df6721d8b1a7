/// Structured error types for socnet-core.
///
/// Uses `thiserror` for better API surface and error composition.
/// The CLI binary can still use `anyhow` for convenience, but library
/// consumers get structured, composable errors. Every failure is local
/// and recoverable by the caller; nothing here aborts the process.
use thiserror::Error;

use crate::{PostId, UserId};

/// Main error type for directory operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// No user with this id in the directory
    #[error("user {user_id} not found")]
    UserNotFound { user_id: UserId },

    /// No post with this id in the directory
    #[error("post {post_id} not found")]
    PostNotFound { post_id: PostId },

    /// A user with this id already exists
    #[error("user {user_id} already exists")]
    DuplicateUser { user_id: UserId },

    /// A post with this id already exists (explicit-id insert path)
    #[error("post {post_id} already exists")]
    DuplicatePost { post_id: PostId },

    /// A user cannot friend themselves
    #[error("user {user_id} cannot friend themselves")]
    SelfFriend { user_id: UserId },

    /// A post cannot be shared with its own creator
    #[error("post {post_id} cannot be shared with its creator (user {user_id})")]
    SelfShare { post_id: PostId, user_id: UserId },

    /// A non-creator asked to delete a post that is not in their shared view
    #[error("post {post_id} was not created by user {user_id} and is not in their shared posts")]
    NotVisible { post_id: PostId, user_id: UserId },
}

/// Result type alias for directory operations
pub type Result<T> = std::result::Result<T, NetworkError>;

impl NetworkError {
    /// Create a user-not-found error
    pub fn user_not_found(user_id: UserId) -> Self {
        Self::UserNotFound { user_id }
    }

    /// Create a post-not-found error
    pub fn post_not_found(post_id: PostId) -> Self {
        Self::PostNotFound { post_id }
    }

    /// Create a not-visible error for a scoped post deletion
    pub fn not_visible(post_id: PostId, user_id: UserId) -> Self {
        Self::NotVisible { post_id, user_id }
    }
}
