//! HTTP handlers

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use inventory_errors::{AppError, AppResult};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use super::dto::{
    DeleteResponse, FIELD_DESCRIPTION, FIELD_NAME, ItemResponse, MSG_DELETED, MSG_PHOTO_UPDATED,
    MSG_REGISTERED, MSG_UPDATED, SearchRequest,
};
use super::extract::{ItemIdPath, JsonOrForm, UploadForm};
use crate::application::{InventoryService, ItemView, RegisterItem, SearchResult};
use crate::domain::ItemPatch;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InventoryService>,
}

impl AppState {
    pub fn new(service: Arc<InventoryService>) -> Self {
        Self { service }
    }
}

/// POST /register
pub async fn register_item(
    State(state): State<AppState>,
    mut form: UploadForm,
) -> AppResult<(StatusCode, Json<ItemResponse>)> {
    let cmd = RegisterItem {
        name: form.text(FIELD_NAME),
        description: form.text(FIELD_DESCRIPTION),
        photo: form.take_photo(),
    };

    let item = state.service.register(cmd).await?;
    Ok((StatusCode::CREATED, Json(ItemResponse::new(MSG_REGISTERED, item))))
}

/// GET /inventory
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<ItemView>>> {
    Ok(Json(state.service.list().await?))
}

/// GET /inventory/{id}
pub async fn get_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
) -> AppResult<Json<ItemView>> {
    Ok(Json(state.service.get(id).await?))
}

/// PUT /inventory/{id}
///
/// 条目不存在时即使请求体非法也返回 404
pub async fn update_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
    payload: Result<JsonOrForm<ItemPatch>, AppError>,
) -> AppResult<Json<ItemResponse>> {
    let patch = match payload {
        Ok(JsonOrForm(patch)) => patch,
        Err(err) => {
            state.service.get(id).await?;
            return Err(err);
        }
    };

    let item = state.service.update_fields(id, patch).await?;
    Ok(Json(ItemResponse::new(MSG_UPDATED, item)))
}

/// PUT /inventory/{id}/photo
pub async fn update_photo(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
    form: Result<UploadForm, AppError>,
) -> AppResult<Json<ItemResponse>> {
    let mut form = match form {
        Ok(form) => form,
        Err(err) => {
            state.service.get(id).await?;
            return Err(err);
        }
    };

    let item = state.service.update_photo(id, form.take_photo()).await?;
    Ok(Json(ItemResponse::new(MSG_PHOTO_UPDATED, item)))
}

/// GET /inventory/{id}/photo
pub async fn get_photo(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
    request: Request,
) -> AppResult<Response> {
    let path = state.service.photo_path(id).await?;
    serve_file(path, request).await
}

/// 发送磁盘文件；文件不存在时返回 `{"error":"Not Found"}`
pub async fn serve_file(path: PathBuf, request: Request) -> AppResult<Response> {
    let response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    if response.status() == StatusCode::NOT_FOUND {
        return Err(AppError::not_found("Not Found"));
    }
    Ok(response.into_response())
}

/// DELETE /inventory/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = state.service.delete(id).await?;
    Ok(Json(DeleteResponse {
        message: MSG_DELETED.to_string(),
        deleted,
    }))
}

/// POST /search
pub async fn search_item(
    State(state): State<AppState>,
    JsonOrForm(req): JsonOrForm<SearchRequest>,
) -> AppResult<Json<SearchResult>> {
    Ok(Json(state.service.search(req.into()).await?))
}
