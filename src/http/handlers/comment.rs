use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    auth::{AuthClaims, MaybeAuthClaims},
    db::{
        comment::{
            get::{get_comment_by_id, get_comments_for_rating},
            patch::toggle_like,
            post::create_comment,
            put::update_comment_content,
        },
        rating::get::get_rating_by_id,
    },
    errors::AppError,
    models::comment::{
        CommentUpdatePayload, CommentView, LikeStatus, NewCommentPayload, build_thread,
    },
    state::AppState,
};

pub async fn create_comment_handler(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<NewCommentPayload>,
) -> Result<(StatusCode, Json<CommentView>), (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;
    let mut comment = payload.validate().map_err(|e| e.to_response())?;

    if let Some(parent_id) = comment.parent_id {
        let parent = get_comment_by_id(parent_id, state.postgres.clone())
            .await
            .map_err(|e| e.to_response())?
            .ok_or_else(|| {
                AppError::BadRequest(format!("Parent comment {} does not exist", parent_id))
                    .to_response()
            })?;

        comment.attach_to(&parent).map_err(|e| e.to_response())?;
    }

    if let Some(rating_id) = comment.rating_id {
        get_rating_by_id(rating_id, state.postgres.clone())
            .await
            .map_err(|e| e.to_response())?
            .ok_or_else(|| {
                AppError::BadRequest(format!("Rating {} does not exist", rating_id)).to_response()
            })?;
    }

    let created = create_comment(user_id, comment, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error creating comment: {}", e);
            e.to_response()
        })?;

    Ok((StatusCode::CREATED, Json(CommentView::from(created))))
}

pub async fn update_comment_handler(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(comment_id): Path<i64>,
    Json(payload): Json<CommentUpdatePayload>,
) -> Result<Json<CommentView>, (StatusCode, String)> {
    let comment = get_comment_by_id(comment_id, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?
        .ok_or_else(|| AppError::NotFound("Comment not found".into()).to_response())?;

    if !claims.can_modify(comment.user_id) {
        return Err(
            AppError::Forbidden("You don't have permission to edit this comment".into())
                .to_response(),
        );
    }

    let content = payload.validate().map_err(|e| e.to_response())?;
    let updated = update_comment_content(comment_id, content, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error updating comment {}: {}", comment_id, e);
            e.to_response()
        })?;

    Ok(Json(CommentView::from(updated)))
}

pub async fn toggle_like_handler(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(comment_id): Path<i64>,
) -> Result<Json<LikeStatus>, (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;

    get_comment_by_id(comment_id, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?
        .ok_or_else(|| AppError::NotFound("Comment not found".into()).to_response())?;

    let (liked, total_likes) = toggle_like(comment_id, user_id, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error toggling like on comment {}: {}", comment_id, e);
            e.to_response()
        })?;

    Ok(Json(LikeStatus {
        status: "like status changed",
        liked,
        total_likes,
    }))
}

pub async fn list_rating_comments_handler(
    State(state): State<AppState>,
    MaybeAuthClaims(claims): MaybeAuthClaims,
    Path(rating_id): Path<i64>,
) -> Result<Json<Vec<CommentView>>, (StatusCode, String)> {
    let viewer = claims
        .map(|c| c.user_id())
        .transpose()
        .map_err(|e| e.to_response())?;

    get_rating_by_id(rating_id, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?
        .ok_or_else(|| AppError::NotFound("Rating not found".into()).to_response())?;

    let rows = get_comments_for_rating(rating_id, viewer, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error fetching comments for rating {}: {}", rating_id, e);
            e.to_response()
        })?;

    Ok(Json(build_thread(rows)))
}
