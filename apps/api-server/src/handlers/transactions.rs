//! Write-path handlers.
//!
//! The server never signs. It validates input and returns the move call for
//! the user's wallet to sign and submit, together with the delay to wait
//! before re-reading.

use actix_web::{HttpResponse, web};
use serde::de::DeserializeOwned;

use suitter_core::domain::ObjectId;
use suitter_core::{EntryPoint, MoveCall, TransactionBuilder};
use suitter_shared::ApiResponse;
use suitter_shared::dto::{
    AddCommentRequest, CreatePostRequest, CreateProfileRequest, DeleteCommentRequest,
    EditCommentRequest, LikePostRequest,
};

use super::convert;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn body<T: DeserializeOwned>(value: serde_json::Value) -> AppResult<T> {
    serde_json::from_value(value).map_err(|e| AppError::BadRequest(format!("Invalid body: {e}")))
}

/// POST /api/tx/{entry_point}
pub async fn build_transaction(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<serde_json::Value>,
) -> AppResult<HttpResponse> {
    let entry_point: EntryPoint = path
        .parse()
        .map_err(|_| AppError::NotFound(format!("Unknown entry point {}", path.as_str())))?;
    let builder = TransactionBuilder::from_config(state.reader.config())?;
    let payload = payload.into_inner();

    let call: MoveCall = match entry_point {
        EntryPoint::CreateProfile => {
            let req: CreateProfileRequest = body(payload)?;
            builder.create_profile(&req.username, &req.bio, req.image_url.as_deref())?
        }
        EntryPoint::CreatePost => {
            let req: CreatePostRequest = body(payload)?;
            builder.create_post(&req.content, req.image_url.as_deref())?
        }
        EntryPoint::LikePost => {
            let req: LikePostRequest = body(payload)?;
            builder.like_post(req.post_id.parse::<ObjectId>()?)
        }
        EntryPoint::AddComment => {
            let req: AddCommentRequest = body(payload)?;
            builder.add_comment(req.post_id.parse::<ObjectId>()?, &req.content)?
        }
        EntryPoint::EditComment => {
            let req: EditCommentRequest = body(payload)?;
            builder.edit_comment(req.post_id.parse::<ObjectId>()?, req.comment_id, &req.content)?
        }
        EntryPoint::DeleteComment => {
            let req: DeleteCommentRequest = body(payload)?;
            builder.delete_comment(req.post_id.parse::<ObjectId>()?, req.comment_id)
        }
    };

    tracing::info!(target_fn = %call.target(), "Move call built");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(convert::move_call(call))))
}
