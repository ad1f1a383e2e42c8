use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Post entity - a single blog post document.
///
/// Field names follow the document schema (`camelCase`, `_id`), so the same
/// serde view is used for persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub contents: String,
    pub author: ObjectId,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Set once at creation, immutable thereafter.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a new post for `author` from the provided fields.
    ///
    /// Fails when `title` is missing or empty; `contents` and `tags`
    /// default to empty.
    pub fn new(author: ObjectId, fields: NewPost) -> Result<Self, DomainError> {
        let title = fields.title.unwrap_or_default();
        if title.trim().is_empty() {
            return Err(DomainError::Validation("`title` is required".to_string()));
        }

        let now = Utc::now();
        Ok(Self {
            id: ObjectId::new(),
            title,
            contents: fields.contents.unwrap_or_default(),
            author,
            tags: fields.tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Fields accepted when creating a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: Option<String>,
    pub contents: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// The whitelisted mutable fields of a post.
///
/// `title`, `author`, and `createdAt` are not expressible here, so an
/// update cannot touch them.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub contents: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    /// Apply the patch to `post`, stamping `updatedAt` with `now`.
    pub fn apply_to(&self, post: &mut Post, now: DateTime<Utc>) {
        if let Some(contents) = &self.contents {
            post.contents = contents.clone();
        }
        if let Some(tags) = &self.tags {
            post.tags = tags.clone();
        }
        post.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_requires_title() {
        let err = Post::new(ObjectId::new(), NewPost::default()).unwrap_err();
        assert!(matches!(&err, DomainError::Validation(msg) if msg.contains("title")));

        let err = Post::new(
            ObjectId::new(),
            NewPost {
                title: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn new_post_defaults_contents_and_tags() {
        let post = Post::new(
            ObjectId::new(),
            NewPost {
                title: Some("Only a title".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(post.contents, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn patch_leaves_immutable_fields_alone() {
        let author = ObjectId::new();
        let mut post = Post::new(
            author,
            NewPost {
                title: Some("Learning Redux".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let created_at = post.created_at;

        let patch = PostPatch {
            contents: Some("Updated body".to_string()),
            tags: None,
        };
        patch.apply_to(&mut post, Utc::now());

        assert_eq!(post.title, "Learning Redux");
        assert_eq!(post.author, author);
        assert_eq!(post.created_at, created_at);
        assert_eq!(post.contents, "Updated body");
        assert!(post.updated_at >= post.created_at);
    }
}
