use chrono::{DateTime, Utc};
use common::stats::{AuthorBlogCount, AuthorLikeTotal, BlogRecord};
use serde::{Deserialize, Serialize};

use crate::entity::{blog, comment, user};
use crate::error::AppError;

/// Request body for creating a blog.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateBlogRequest {
    /// Blog title.
    #[schema(example = "Go To Statement Considered Harmful")]
    pub title: String,
    /// Author display name. Defaults to empty when omitted.
    #[schema(example = "Edsger W. Dijkstra")]
    pub author: Option<String>,
    /// Link to the blog.
    #[schema(example = "https://homepages.cwi.nl/~storm/teaching/reader/Dijkstra68.pdf")]
    pub url: String,
    /// Initial like count. Defaults to 0 when omitted.
    #[schema(example = 5)]
    pub likes: Option<i32>,
}

pub fn validate_create_blog(payload: &CreateBlogRequest) -> Result<(), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".into()));
    }
    if payload.url.trim().is_empty() {
        return Err(AppError::Validation("Url must not be empty".into()));
    }
    if payload.likes.is_some_and(|likes| likes < 0) {
        return Err(AppError::Validation("Likes must not be negative".into()));
    }
    Ok(())
}

/// Request body for updating a blog. Only the like count is mutable.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateBlogRequest {
    /// New like count.
    #[schema(example = 6)]
    pub likes: i32,
}

pub fn validate_update_blog(payload: &UpdateBlogRequest) -> Result<(), AppError> {
    if payload.likes < 0 {
        return Err(AppError::Validation("Likes must not be negative".into()));
    }
    Ok(())
}

/// Minimal owner info embedded in blog responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogUser {
    /// Owner's username.
    #[schema(example = "alice")]
    pub username: String,
    /// Owner's display name.
    #[schema(example = "Alice Liddell")]
    pub name: String,
}

impl From<user::Model> for BlogUser {
    fn from(user: user::Model) -> Self {
        Self {
            username: user.username,
            name: user.name,
        }
    }
}

/// A blog as returned to clients.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogResponse {
    /// Blog ID.
    #[schema(example = 17)]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub url: String,
    #[schema(example = 5)]
    pub likes: i32,
    /// Minimal info about the owning user.
    pub user: Option<BlogUser>,
    pub created_at: DateTime<Utc>,
}

impl BlogResponse {
    pub fn from_model(blog: blog::Model, owner: Option<user::Model>) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: owner.map(BlogUser::from),
            created_at: blog.created_at,
        }
    }
}

/// Request body for commenting on a blog.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    /// Comment text.
    #[schema(example = "Great read, thanks!")]
    pub comment: String,
}

pub fn validate_create_comment(payload: &CreateCommentRequest) -> Result<(), AppError> {
    if payload.comment.trim().is_empty() {
        return Err(AppError::Validation("Comment must not be empty".into()));
    }
    Ok(())
}

/// A comment as returned to clients.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CommentResponse {
    /// Comment ID.
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Great read, thanks!")]
    pub comment: String,
    /// ID of the blog the comment belongs to.
    #[schema(example = 17)]
    pub blog_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<comment::Model> for CommentResponse {
    fn from(comment: comment::Model) -> Self {
        Self {
            id: comment.id,
            comment: comment.comment,
            blog_id: comment.blog_id,
            created_at: comment.created_at,
        }
    }
}

/// Aggregate statistics over all stored blogs.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogStatsResponse {
    /// Sum of likes across all blogs.
    #[schema(example = 36)]
    pub total_likes: i64,
    /// The most-liked blog. Absent when no blogs exist.
    pub favorite: Option<BlogRecord>,
    /// The author with the most blogs. Absent when no blogs exist.
    pub most_blogs: Option<AuthorBlogCount>,
    /// The author with the most cumulative likes. Absent when no blogs exist.
    pub most_likes: Option<AuthorLikeTotal>,
}
