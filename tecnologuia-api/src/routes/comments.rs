use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use tecnologuia_shared::errors::{AppError, AppResult, ErrorCode};
use tecnologuia_shared::middleware::AppJson;
use tecnologuia_shared::types::auth::AuthUser;
use tecnologuia_shared::types::MessageResponse;

use crate::models::{Comment, CommentView, NewComment};
use crate::routes::{is_foreign_key_violation, required};
use crate::schema::{areas, comments, users};
use crate::AppState;

pub const MAX_COMMENT_CHARS: usize = 2000;

#[derive(Debug, Deserialize)]
pub struct ListCommentsQuery {
    #[serde(rename = "areaId")]
    pub area_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
    /// The forum page sends this as a number, older clients as a string.
    #[serde(rename = "areaId")]
    pub area_id: Option<Value>,
}

pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCommentsQuery>,
) -> AppResult<Json<Vec<CommentView>>> {
    let area_id = query
        .area_id
        .as_deref()
        .and_then(parse_id)
        .ok_or_else(invalid_area_id)?;

    let mut conn = state.db.get()?;
    ensure_area_exists(&mut conn, area_id)?;

    let rows: Vec<(Comment, String)> = comments::table
        .inner_join(users::table)
        .filter(comments::area_id.eq(area_id))
        .order((comments::created_at.desc(), comments::id.desc()))
        .select((Comment::as_select(), users::name))
        .load(&mut conn)?;

    Ok(Json(
        rows.into_iter()
            .map(|(comment, user_name)| CommentView::new(comment, user_name))
            .collect(),
    ))
}

pub async fn create_comment(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentView>)> {
    let content = required("content", req.content.as_deref())?.to_string();
    if content.chars().count() > MAX_COMMENT_CHARS {
        return Err(AppError::new(
            ErrorCode::ValidationError,
            format!("comment must be at most {MAX_COMMENT_CHARS} characters"),
        ));
    }
    let area_id = req
        .area_id
        .as_ref()
        .and_then(area_id_from_json)
        .ok_or_else(invalid_area_id)?;

    let mut conn = state.db.get()?;
    ensure_area_exists(&mut conn, area_id)?;

    let comment: Comment = diesel::insert_into(comments::table)
        .values(&NewComment { content, user_id: user.id, area_id })
        .returning(Comment::as_returning())
        .get_result(&mut conn)
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::bad_request("invalid area or user")
            } else {
                AppError::from(e)
            }
        })?;

    let user_name: String = users::table
        .find(user.id)
        .select(users::name)
        .first(&mut conn)?;

    tracing::info!(comment_id = %comment.id, user_id = %user.id, area_id = %area_id, "comment created");

    Ok((StatusCode::CREATED, Json(CommentView::new(comment, user_name))))
}

pub async fn delete_comment(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let comment_id = parse_id(&id).ok_or_else(|| AppError::bad_request("invalid comment id"))?;

    let mut conn = state.db.get()?;
    let author_id: i32 = comments::table
        .find(comment_id)
        .select(comments::user_id)
        .first(&mut conn)
        .optional()?
        .ok_or_else(|| AppError::new(ErrorCode::CommentNotFound, "comment not found"))?;

    if author_id != user.id && !user.is_admin() {
        return Err(AppError::new(
            ErrorCode::NotCommentOwner,
            "only the author or an admin can delete this comment",
        ));
    }

    diesel::delete(comments::table.find(comment_id)).execute(&mut conn)?;

    tracing::info!(comment_id = %comment_id, user_id = %user.id, "comment deleted");

    Ok(Json(MessageResponse::new("comment deleted successfully")))
}

fn ensure_area_exists(conn: &mut PgConnection, area_id: i32) -> AppResult<()> {
    let exists: bool = diesel::select(diesel::dsl::exists(areas::table.find(area_id)))
        .get_result(conn)?;
    if !exists {
        return Err(AppError::new(ErrorCode::AreaNotFound, "area not found"));
    }
    Ok(())
}

fn invalid_area_id() -> AppError {
    AppError::bad_request("missing or invalid areaId")
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|id| *id > 0)
}

fn area_id_from_json(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|id| i32::try_from(id).ok())
            .filter(|id| *id > 0),
        Value::String(s) => parse_id(s),
        _ => None,
    }
}
