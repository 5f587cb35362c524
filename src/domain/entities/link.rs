//! Short link entity.

use chrono::{DateTime, Utc};

use super::owner::OwnerId;

/// A short code mapped to a destination URL.
///
/// `click_count` only ever grows and is only changed by the redirect path;
/// `target_url` only changes through an owner's explicit edit.
#[derive(Debug, Clone)]
pub struct ShortLink {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub owner_id: OwnerId,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        code: String,
        target_url: String,
        owner_id: OwnerId,
        click_count: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            target_url,
            owner_id,
            click_count,
            created_at,
            updated_at,
        }
    }

    /// Returns true if `owner` may edit or delete this link.
    pub fn is_owned_by(&self, owner: OwnerId) -> bool {
        self.owner_id == owner
    }
}

/// Input for inserting a link under a candidate code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
    pub owner_id: OwnerId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = ShortLink::new(
            1,
            "aB3xY9".to_string(),
            "https://example.com".to_string(),
            OwnerId(7),
            0,
            now,
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "aB3xY9");
        assert_eq!(link.target_url, "https://example.com");
        assert_eq!(link.click_count, 0);
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_is_owned_by() {
        let now = Utc::now();
        let link = ShortLink::new(
            1,
            "aB3xY9".to_string(),
            "https://example.com".to_string(),
            OwnerId(7),
            3,
            now,
            now,
        );

        assert!(link.is_owned_by(OwnerId(7)));
        assert!(!link.is_owned_by(OwnerId(8)));
    }
}
