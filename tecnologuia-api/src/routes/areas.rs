use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use std::sync::Arc;

use tecnologuia_shared::errors::AppResult;

use crate::models::{Area, AreaResponse};
use crate::schema::areas;
use crate::AppState;

pub async fn list_areas(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<AreaResponse>>> {
    let mut conn = state.db.get()?;

    let all: Vec<Area> = areas::table
        .select(Area::as_select())
        .order(areas::id.asc())
        .load(&mut conn)?;

    Ok(Json(all.into_iter().map(AreaResponse::from).collect()))
}
