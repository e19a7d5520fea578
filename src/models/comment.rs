use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{errors::AppError, validation::Validator};

pub const COMMENT_MAX_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Comment {
    pub id: i64,
    pub user_id: Uuid,
    pub content: String,
    pub rating_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Comment joined with its like tally for the viewing user.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    #[sqlx(flatten)]
    pub comment: Comment,
    pub total_likes: i64,
    pub is_liked: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub user_id: Uuid,
    pub content: String,
    pub rating_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_reply: bool,
    pub total_likes: u64,
    pub is_liked: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<CommentView>,
}

impl From<CommentRow> for CommentView {
    fn from(row: CommentRow) -> Self {
        let c = row.comment;
        Self {
            is_reply: c.is_reply(),
            id: c.id,
            user_id: c.user_id,
            content: c.content,
            rating_id: c.rating_id,
            parent_id: c.parent_id,
            created_at: c.created_at,
            updated_at: c.updated_at,
            total_likes: row.total_likes.max(0) as u64,
            is_liked: row.is_liked,
            replies: Vec::new(),
        }
    }
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        CommentRow {
            comment,
            total_likes: 0,
            is_liked: false,
        }
        .into()
    }
}

/// Nests replies under their top-level comment. Rows must be ordered
/// oldest first; replies whose parent is missing from the set are dropped.
pub fn build_thread(rows: Vec<CommentRow>) -> Vec<CommentView> {
    let mut top_level: Vec<CommentView> = Vec::new();
    let mut replies: Vec<CommentView> = Vec::new();

    for row in rows {
        let view = CommentView::from(row);
        if view.is_reply {
            replies.push(view);
        } else {
            top_level.push(view);
        }
    }

    for reply in replies {
        if let Some(parent) = top_level
            .iter_mut()
            .find(|c| Some(c.id) == reply.parent_id)
        {
            parent.replies.push(reply);
        }
    }

    top_level
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommentPayload {
    pub content: String,
    pub rating_id: Option<i64>,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub content: String,
    pub rating_id: Option<i64>,
    pub parent_id: Option<i64>,
}

impl NewCommentPayload {
    pub fn validate(self) -> Result<NewComment, AppError> {
        let mut v = Validator::new();
        let content = v.check("content", comment_content(&self.content));

        v.finish(|| NewComment {
            content: content.unwrap_or_default(),
            rating_id: self.rating_id,
            parent_id: self.parent_id,
        })
    }
}

impl NewComment {
    /// Replies may only target a top-level comment and always belong to the
    /// parent's rating.
    pub fn attach_to(&mut self, parent: &Comment) -> Result<(), AppError> {
        let mut v = Validator::new();

        if parent.is_reply() {
            v.fail("parentId", "Replies can only be made to top-level comments");
        }
        match (self.rating_id, parent.rating_id) {
            (Some(own), Some(parents)) if own != parents => {
                v.fail("ratingId", "Reply must belong to the same rating as its parent")
            }
            _ => {}
        }

        v.finish(|| ())?;
        self.rating_id = parent.rating_id.or(self.rating_id);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentUpdatePayload {
    pub content: String,
}

impl CommentUpdatePayload {
    pub fn validate(self) -> Result<String, AppError> {
        let mut v = Validator::new();
        let content = v.check("content", comment_content(&self.content));
        v.finish(|| content.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub status: &'static str,
    pub liked: bool,
    pub total_likes: u64,
}

fn comment_content(content: &str) -> Result<String, String> {
    crate::validation::non_blank(content, COMMENT_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: i64, parent_id: Option<i64>) -> Comment {
        Comment {
            id,
            user_id: Uuid::nil(),
            content: format!("comment {id}"),
            rating_id: Some(7),
            parent_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_reply_to_reply_rejected() {
        let mut reply = NewCommentPayload {
            content: "me too".into(),
            rating_id: None,
            parent_id: Some(2),
        }
        .validate()
        .unwrap();

        let result = reply.attach_to(&comment(2, Some(1)));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_reply_inherits_parent_rating() {
        let mut reply = NewCommentPayload {
            content: "agreed".into(),
            rating_id: None,
            parent_id: Some(1),
        }
        .validate()
        .unwrap();

        reply.attach_to(&comment(1, None)).unwrap();
        assert_eq!(reply.rating_id, Some(7));
    }

    #[test]
    fn test_build_thread_nests_single_level() {
        let rows = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, None),
            comment(4, Some(1)),
        ]
        .into_iter()
        .map(|comment| CommentRow {
            comment,
            total_likes: 1,
            is_liked: false,
        })
        .collect();

        let thread = build_thread(rows);
        assert_eq!(thread.len(), 2);
        assert_eq!(
            thread[0].replies.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![2, 4]
        );
        assert!(thread[1].replies.is_empty());
    }
}
