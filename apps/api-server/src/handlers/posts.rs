//! Post and comment handlers.

use actix_web::{HttpResponse, web};

use suitter_core::PostFilter;
use suitter_core::domain::{Address, ObjectId};
use suitter_shared::ApiResponse;
use suitter_shared::dto::PostsQuery;

use super::convert;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts?author=0x..
///
/// Newest first. Entries that could not be read are listed under `failures`.
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostsQuery>,
) -> AppResult<HttpResponse> {
    let filter = match query.into_inner().author.as_deref().map(str::trim) {
        Some(author) if !author.is_empty() => PostFilter::by_author(author.parse::<Address>()?),
        _ => PostFilter::all(),
    };

    let posts = state.reader.list_posts(&filter).await?;
    Ok(HttpResponse::Ok().json(convert::listed(convert::list(posts, convert::post))))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id: ObjectId = path.parse()?;

    let detail = state
        .reader
        .get_post_detail(&post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(convert::post_detail(detail))))
}

/// GET /api/posts/{id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id: ObjectId = path.parse()?;

    let comments = state.reader.list_comments(&post_id).await?;
    Ok(HttpResponse::Ok().json(convert::listed(convert::list(comments, convert::comment))))
}
