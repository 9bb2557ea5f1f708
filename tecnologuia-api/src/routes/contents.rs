use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use tecnologuia_shared::errors::AppResult;
use tecnologuia_shared::middleware::{AdminUser, AppJson};
use tecnologuia_shared::types::WithMessage;

use crate::models::{Content, NewContent};
use crate::routes::required;
use crate::schema::contents;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    pub title: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContentPayload {
    pub content: Content,
}

pub async fn list_contents(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Content>>> {
    let mut conn = state.db.get()?;

    let all = contents::table
        .select(Content::as_select())
        .order((contents::created_at.desc(), contents::id.desc()))
        .load(&mut conn)?;

    Ok(Json(all))
}

pub async fn create_content(
    AdminUser(admin): AdminUser,
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateContentRequest>,
) -> AppResult<(StatusCode, Json<WithMessage<ContentPayload>>)> {
    let new_content = NewContent {
        title: required("title", req.title.as_deref())?.to_string(),
        category: required("category", req.category.as_deref())?.to_string(),
    };
    new_content.validate()?;

    let mut conn = state.db.get()?;
    let content: Content = diesel::insert_into(contents::table)
        .values(&new_content)
        .returning(Content::as_returning())
        .get_result(&mut conn)?;

    tracing::info!(content_id = %content.id, admin_id = %admin.id, admin_email = %admin.email, "content created");

    Ok((
        StatusCode::CREATED,
        Json(WithMessage::new("content created successfully", ContentPayload { content })),
    ))
}
