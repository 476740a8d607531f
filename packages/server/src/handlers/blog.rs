use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::ownership::{self, DeleteDecision};
use common::stats::{self, BlogRecord};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{blog, comment, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::blog::{
    BlogResponse, BlogStatsResponse, CommentResponse, CreateBlogRequest, CreateCommentRequest,
    UpdateBlogRequest, validate_create_blog, validate_create_comment, validate_update_blog,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List all blogs",
    description = "Returns every blog with minimal info about its owning user embedded.",
    responses(
        (status = 200, description = "List of blogs", body = Vec<BlogResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let rows = blog::Entity::find()
        .find_also_related(user::Entity)
        .order_by_asc(blog::Column::Id)
        .all(&state.db)
        .await?;

    let blogs = rows
        .into_iter()
        .map(|(blog, owner)| BlogResponse::from_model(blog, owner))
        .collect();

    Ok(Json(blogs))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blogs",
    operation_id = "createBlog",
    summary = "Create a new blog",
    description = "Creates a blog owned by the authenticated caller. Omitted likes default to 0.",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_blog(&payload)?;

    // The token may outlive its user; re-check the owner exists.
    let owner = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::TokenInvalid)?;

    let new_blog = blog::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        author: Set(payload.author.unwrap_or_default()),
        url: Set(payload.url.trim().to_string()),
        likes: Set(payload.likes.unwrap_or(0)),
        user_id: Set(owner.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_blog.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(BlogResponse::from_model(model, Some(owner))),
    ))
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "Blogs",
    operation_id = "blogStats",
    summary = "Aggregate statistics over all blogs",
    description = "Returns the total like count, the most-liked blog, the author with the most blogs, and the author with the most cumulative likes.",
    responses(
        (status = 200, description = "Aggregate statistics", body = BlogStatsResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn blog_stats(State(state): State<AppState>) -> Result<Json<BlogStatsResponse>, AppError> {
    let records: Vec<BlogRecord> = blog::Entity::find()
        .order_by_asc(blog::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|blog| BlogRecord {
            title: blog.title,
            author: blog.author,
            likes: i64::from(blog.likes),
        })
        .collect();

    Ok(Json(BlogStatsResponse {
        total_likes: stats::total_likes(&records),
        favorite: stats::favorite_blog(&records).cloned(),
        most_blogs: stats::most_blogs(&records),
        most_likes: stats::most_likes(&records),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "getBlog",
    summary = "Get a blog by ID",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog details", body = BlogResponse),
        (status = 400, description = "Malformed ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_blog(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<BlogResponse>, AppError> {
    let (blog, owner) = blog::Entity::find_by_id(id)
        .find_also_related(user::Entity)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))?;

    Ok(Json(BlogResponse::from_model(blog, owner)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "updateBlog",
    summary = "Update a blog's like count",
    description = "Only the like count is mutable. Concurrent updates are last-write-wins.",
    params(("id" = i32, Path, description = "Blog ID")),
    request_body = UpdateBlogRequest,
    responses(
        (status = 204, description = "Blog updated"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_blog(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateBlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_update_blog(&payload)?;

    let existing = find_blog(&state.db, id).await?;
    let mut active: blog::ActiveModel = existing.into();
    active.likes = Set(payload.likes);
    active.update(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog",
    description = "Deletes a blog and its comments. Only the owning user may delete a blog; other callers get a 400 and the blog is left untouched.",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 400, description = "Caller does not own the blog (NOT_BLOG_OWNER)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, caller = auth_user.user_id))]
pub async fn delete_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let stored_owner = blog::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .map(|blog| blog.user_id);

    match ownership::decide_blog_delete(stored_owner, auth_user.user_id) {
        DeleteDecision::Permitted => {
            comment::Entity::delete_many()
                .filter(comment::Column::BlogId.eq(id))
                .exec(&txn)
                .await?;
            blog::Entity::delete_by_id(id).exec(&txn).await?;
            txn.commit().await?;
            Ok(StatusCode::NO_CONTENT)
        }
        DeleteDecision::NotOwner => Err(AppError::NotBlogOwner),
        DeleteDecision::NotFound => Err(AppError::NotFound("Blog not found".into())),
    }
}

#[utoipa::path(
    get,
    path = "/{id}/comments",
    tag = "Comments",
    operation_id = "listComments",
    summary = "List a blog's comments",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "List of comments", body = Vec<CommentResponse>),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn list_comments(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    find_blog(&state.db, id).await?;

    let comments = comment::Entity::find()
        .filter(comment::Column::BlogId.eq(id))
        .order_by_asc(comment::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(CommentResponse::from)
        .collect();

    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/{id}/comments",
    tag = "Comments",
    operation_id = "createComment",
    summary = "Comment on a blog",
    params(("id" = i32, Path, description = "Blog ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn create_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_comment(&payload)?;

    find_blog(&state.db, id).await?;

    let new_comment = comment::ActiveModel {
        comment: Set(payload.comment.trim().to_string()),
        blog_id: Set(id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_comment.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(model))))
}

async fn find_blog<C: ConnectionTrait>(db: &C, id: i32) -> Result<blog::Model, AppError> {
    blog::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))
}
