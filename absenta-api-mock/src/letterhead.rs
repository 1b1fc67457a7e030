//! Letterhead (kop laporan) handlers
//!
//! Uploads are probed with the `image` crate so an invalid file is
//! rejected up front; fetches carry the content type guessed from the
//! stored filename.

use crate::api::authenticate;
use crate::state::{MockState, StoredImage};
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{LetterheadConfig, LetterheadImage, LetterheadScope, Role};
use shared::response::ApiResponse;
use shared::util::snowflake_id;
use std::sync::Arc;

/// Maximum logo file size (2MB)
const MAX_FILE_SIZE: usize = 2 * 1024 * 1024;

fn require_admin(state: &MockState, headers: &HeaderMap) -> AppResult<()> {
    let user = authenticate(state, headers)?;
    if user.role != Role::Admin {
        return Err(AppError::forbidden("Only admins may manage letterheads"));
    }
    Ok(())
}

pub async fn upload_image(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<LetterheadImage>>> {
    require_admin(&state, &headers)?;

    let mut filename = String::from("logo.png");
    let mut bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_request(format!("bad multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            if let Some(name) = field.file_name() {
                filename = name.to_string();
            }
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::invalid_request(format!("bad multipart body: {}", e)))?;
            bytes = Some(data.to_vec());
        }
    }

    let bytes = bytes.ok_or_else(|| AppError::invalid_request("missing file field"))?;
    if bytes.len() > MAX_FILE_SIZE {
        return Err(AppError::new(ErrorCode::LetterheadImageTooLarge)
            .with_detail("size", bytes.len() as i64));
    }

    let decoded = image::load_from_memory(&bytes).map_err(|e| {
        AppError::with_message(
            ErrorCode::LetterheadImageInvalid,
            format!("Uploaded file is not a valid image: {}", e),
        )
    })?;

    let format = std::path::Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_ascii_lowercase();

    let meta = LetterheadImage {
        id: snowflake_id(),
        filename: filename.clone(),
        size: bytes.len(),
        format,
        width: decoded.width(),
        height: decoded.height(),
    };

    let mut store = state.letterhead.write().await;
    store.images.insert(meta.id, StoredImage {
        meta: meta.clone(),
        bytes,
    });

    tracing::info!(id = meta.id, filename = %meta.filename, "letterhead image stored");

    Ok(Json(ApiResponse::ok(meta)))
}

pub async fn fetch_image(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    authenticate(&state, &headers)?;

    let store = state.letterhead.read().await;
    let image = store
        .images
        .get(&id)
        .ok_or_else(|| AppError::new(ErrorCode::LetterheadImageNotFound).with_detail("id", id))?;

    let mime = mime_guess::from_path(&image.meta.filename).first_or_octet_stream();
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.essence_str().to_string())],
        image.bytes.clone(),
    )
        .into_response())
}

pub async fn delete_image(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    require_admin(&state, &headers)?;

    let mut store = state.letterhead.write().await;
    if store.images.remove(&id).is_none() {
        return Err(AppError::new(ErrorCode::LetterheadImageNotFound).with_detail("id", id));
    }
    // Drop dangling references from configs.
    for config in store.configs.values_mut() {
        if config.logo_left == Some(id) {
            config.logo_left = None;
        }
        if config.logo_right == Some(id) {
            config.logo_right = None;
        }
    }

    Ok(Json(ApiResponse::ok(serde_json::json!({ "deleted": true }))))
}

#[derive(Debug, Deserialize)]
pub struct ScopeQuery {
    pub scope: Option<String>,
}

pub async fn get_config(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<ScopeQuery>,
) -> AppResult<Json<ApiResponse<LetterheadConfig>>> {
    authenticate(&state, &headers)?;

    let scope = LetterheadScope::from_wire(query.scope.as_deref().unwrap_or("global"));
    let store = state.letterhead.read().await;
    // Per-report scopes fall back to the global config.
    let config = store
        .configs
        .get(scope.as_str())
        .or_else(|| store.configs.get("global"))
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::LetterheadScopeNotFound))?;

    Ok(Json(ApiResponse::ok(config)))
}

pub async fn update_config(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(config): Json<LetterheadConfig>,
) -> AppResult<Json<ApiResponse<LetterheadConfig>>> {
    require_admin(&state, &headers)?;

    let mut store = state.letterhead.write().await;
    for logo in [config.logo_left, config.logo_right].into_iter().flatten() {
        if !store.images.contains_key(&logo) {
            return Err(
                AppError::new(ErrorCode::LetterheadImageNotFound).with_detail("id", logo)
            );
        }
    }
    store
        .configs
        .insert(config.scope.as_str().to_string(), config.clone());

    Ok(Json(ApiResponse::ok(config)))
}
