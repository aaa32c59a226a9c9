// ============================
// crates/backend-lib/src/handlers/boxes.rs
// ============================
//! Box inventory CRUD.
use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use metrics::counter;
use boxdepot_common::{
    BoxCreated, BoxPatch, BoxResponse, BoxesResponse, CountResponse, DocumentId, NewBox,
};
use crate::{
    error::AppError,
    extract::JsonOrForm,
    metrics::{BOX_CREATED, BOX_DELETED},
    AppState,
};

fn parse_box_id(raw: &str) -> Result<DocumentId, AppError> {
    raw.parse()
        .map_err(|_| AppError::InvalidId(format!("'{raw}' is not a valid box id")))
}

fn box_not_found(id: DocumentId) -> AppError {
    AppError::NotFound(format!("box {id}"))
}

/// `POST /createbox`
pub async fn create_box(
    State(state): State<Arc<AppState>>,
    JsonOrForm(new): JsonOrForm<NewBox>,
) -> Result<(StatusCode, Json<BoxCreated>), AppError> {
    let item = state.boxes.create(new).await?;
    counter!(BOX_CREATED).increment(1);
    tracing::debug!(box_id = %item.id, "box created");

    Ok((
        StatusCode::CREATED,
        Json(BoxCreated {
            message: "Box created successfully".to_string(),
            item,
        }),
    ))
}

/// `GET /boxes`
pub async fn list_boxes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BoxesResponse>, AppError> {
    let boxes = state.boxes.list().await?;
    Ok(Json(BoxesResponse { boxes }))
}

/// `GET /boxes/count`
pub async fn count_boxes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.boxes.count().await?;
    Ok(Json(CountResponse { count }))
}

/// `GET /box/{id}`
pub async fn get_box(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BoxResponse>, AppError> {
    let id = parse_box_id(&id)?;
    let item = state.boxes.get(id).await?.ok_or_else(|| box_not_found(id))?;
    Ok(Json(BoxResponse { item }))
}

/// `DELETE /box/{id}`; responds with the removed box
pub async fn delete_box(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BoxResponse>, AppError> {
    let id = parse_box_id(&id)?;
    let item = state.boxes.delete(id).await?.ok_or_else(|| box_not_found(id))?;
    counter!(BOX_DELETED).increment(1);
    tracing::debug!(box_id = %id, "box deleted");
    Ok(Json(BoxResponse { item }))
}

/// `PUT /box/{id}`; the box is selected by the path id and the response
/// carries the updated document
pub async fn update_box(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonOrForm(patch): JsonOrForm<BoxPatch>,
) -> Result<Json<BoxResponse>, AppError> {
    let id = parse_box_id(&id)?;
    let item = state
        .boxes
        .update(id, patch)
        .await?
        .ok_or_else(|| box_not_found(id))?;
    Ok(Json(BoxResponse { item }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_box_id() {
        let id = DocumentId::now_v7();
        assert_eq!(parse_box_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_box_id("64f1c0ffee"), Err(AppError::InvalidId(_))));
    }
}
