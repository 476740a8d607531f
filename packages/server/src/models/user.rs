use serde::{Deserialize, Serialize};

use crate::entity::{blog, user};
use crate::error::AppError;

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    /// Unique username, at least 3 characters.
    #[schema(example = "alice")]
    pub username: String,
    /// Display name. Defaults to empty when omitted.
    #[schema(example = "Alice Liddell")]
    pub name: Option<String>,
    /// Password, at least 3 characters.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_create_user(payload: &CreateUserRequest) -> Result<(), AppError> {
    let username = payload.username.trim();
    if username.chars().count() < 3 {
        return Err(AppError::Validation(
            "Username must be at least 3 characters".into(),
        ));
    }
    if username.chars().count() > 32 {
        return Err(AppError::Validation(
            "Username must be at most 32 characters".into(),
        ));
    }
    if payload.password.chars().count() < 3 {
        return Err(AppError::Validation(
            "Password must be at least 3 characters".into(),
        ));
    }
    Ok(())
}

/// Minimal blog info embedded in user responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserBlog {
    /// Blog ID.
    #[schema(example = 17)]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub url: String,
}

impl From<blog::Model> for UserBlog {
    fn from(blog: blog::Model) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
        }
    }
}

/// A user as returned to clients. Never carries the password hash.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    /// User ID.
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Alice Liddell")]
    pub name: String,
    /// Blogs owned by this user.
    pub blogs: Vec<UserBlog>,
}

impl UserResponse {
    pub fn from_model(user: user::Model, blogs: Vec<blog::Model>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: blogs.into_iter().map(UserBlog::from).collect(),
        }
    }
}
