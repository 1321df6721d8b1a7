//! socnet core library.
//!
//! An in-memory social-network directory: users, symmetric friendships,
//! posts, and post sharing, with every relationship stored as id sets on
//! both ends and kept consistent by the directory operations (including
//! cascade deletes). Also hosts the text-file loader/dumper and the
//! read-only reporting helpers the CLI renders.

pub mod error;
pub mod loader;
pub mod network;
pub mod post;
pub mod report;
pub mod user;

pub use error::{NetworkError, Result};
pub use loader::{load_network, save_network, LoadStats};
pub use network::{PostCreation, PostDeletion, SocialNetwork};
pub use post::Post;
pub use report::{ActivityEntry, NetworkSummary, UserEngagement};
pub use user::User;

/// User identifiers as they appear in the data files.
pub type UserId = u32;

/// Post identifiers; assigned from a monotonic counter, never reused.
pub type PostId = u32;
