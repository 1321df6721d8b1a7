use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{PostId, UserId};

/// Date pattern used by the data files, e.g. `25.3.2025`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// A post owned by exactly one creator and visible to the users in
/// `shared_with`.
///
/// The raw `creation_date` string is always retained; `parsed_date` is the
/// best-effort parse of it. Unparseable dates are tolerated (logged at
/// warn) rather than rejected, so a sloppy data file still loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub post_id: PostId,
    pub creator_id: UserId,
    pub content: String,
    pub creation_date: String,
    pub parsed_date: Option<NaiveDate>,
    pub shared_with: BTreeSet<UserId>,
}

impl Post {
    pub fn new(
        post_id: PostId,
        creator_id: UserId,
        content: impl Into<String>,
        creation_date: impl Into<String>,
    ) -> Self {
        let creation_date = creation_date.into();
        let parsed_date = parse_creation_date(&creation_date, post_id);
        Self {
            post_id,
            creator_id,
            content: content.into(),
            creation_date,
            parsed_date,
            shared_with: BTreeSet::new(),
        }
    }

    /// Record a share on the post side only. Idempotent by user id;
    /// returns whether the set changed.
    pub fn add_shared_user(&mut self, user_id: UserId) -> bool {
        self.shared_with.insert(user_id)
    }

    /// Remove a share on the post side only. Returns whether the user was
    /// present.
    pub fn remove_shared_user(&mut self, user_id: UserId) -> bool {
        self.shared_with.remove(&user_id)
    }

    pub fn is_shared_with(&self, user_id: UserId) -> bool {
        self.shared_with.contains(&user_id)
    }
}

fn parse_creation_date(raw: &str, post_id: PostId) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("could not parse date '{}' for post {}, keeping raw string only", raw, post_id);
            None
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Post ID: {}, Content: \"{}\", Date: {}, Creator ID: {}",
            self.post_id, self.content, self.creation_date, self.creator_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_parsing_accepts_short_fields() {
        let post = Post::new(1, 1, "hi", "1.1.2025");
        assert_eq!(post.parsed_date, NaiveDate::from_ymd_opt(2025, 1, 1));

        let post = Post::new(2, 1, "hi", "25.3.2025");
        assert_eq!(post.parsed_date, NaiveDate::from_ymd_opt(2025, 3, 25));
    }

    #[test]
    fn test_invalid_date_is_tolerated() {
        let post = Post::new(1, 1, "hi", "not-a-date");
        assert_eq!(post.parsed_date, None);
        assert_eq!(post.creation_date, "not-a-date");
    }

    #[test]
    fn test_shared_users_idempotent() {
        let mut post = Post::new(1, 1, "hi", "1.1.2025");
        assert!(post.add_shared_user(2));
        assert!(!post.add_shared_user(2));
        assert!(post.is_shared_with(2));
        assert!(post.remove_shared_user(2));
        assert!(!post.remove_shared_user(2));
    }
}
