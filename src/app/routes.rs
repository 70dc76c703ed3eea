// ==========================================
// Tire registry - HTTP routes
// ==========================================
// POST /api/po-padron/cargar-padron      registry upload (multipart)
// /api/po-neumaticos                     registry CRUD + counters
// ==========================================

use crate::api::{ApiError, ApiResult, CountResponse, ImportApiResponse, MessageResponse};
use crate::app::state::AppState;
use crate::domain::import::SourceFile;
use crate::domain::tire::{TireRecord, TireUpdate};
use crate::i18n;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Form fields accepted as the uploaded file
const FILE_FIELDS: [&str; 2] = ["archivo", "file"];

/// Build the application router
pub fn app_router(state: Arc<AppState>) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    let padron = Router::new()
        .route("/cargar-padron", post(upload_registry))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    let neumaticos = Router::new()
        .route("/", get(list_tires))
        .route("/{codigo}", put(update_tire).delete(delete_tire))
        .route("/cantidad", get(count_tires))
        .route("/proyectos/cantidad", get(count_projects))
        .route("/asignados/cantidad", get(count_assigned))
        .route("/disponibles/cantidad", get(count_available));

    Router::new()
        .nest("/api/po-padron", padron)
        .nest("/api/po-neumaticos", neumaticos)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

// ==========================================
// Registry upload
// ==========================================

async fn upload_registry(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<ImportApiResponse>> {
    let locale = state.import_api.locale().to_string();
    let invalid = |e: axum::extract::multipart::MultipartError| {
        ApiError::BadRequest(i18n::t_with_args(
            "request.invalid_multipart",
            &locale,
            &[("detail", &e.body_text())],
        ))
    };

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let name = field.name().unwrap_or("").to_string();
        if upload.is_some() || !FILE_FIELDS.contains(&name.as_str()) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(invalid)?;
        tracing::debug!(field = %name, file_name = ?file_name, bytes = bytes.len(), "upload received");
        upload = Some(SourceFile::new(file_name, bytes.to_vec()));
    }

    let response = state.import_api.import_padron(upload).await?;
    Ok(Json(response))
}

// ==========================================
// Registry CRUD
// ==========================================

async fn list_tires(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TireRecord>>> {
    Ok(Json(state.tire_api.list_tires()?))
}

async fn update_tire(
    Path(codigo): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TireUpdate>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(state.tire_api.update_tire(&codigo, payload)?))
}

async fn delete_tire(
    Path(codigo): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(state.tire_api.delete_tire(&codigo)?))
}

async fn count_tires(State(state): State<Arc<AppState>>) -> ApiResult<Json<CountResponse>> {
    Ok(Json(state.tire_api.count_tires()?))
}

async fn count_projects(State(state): State<Arc<AppState>>) -> ApiResult<Json<CountResponse>> {
    Ok(Json(state.tire_api.count_projects()?))
}

async fn count_assigned(State(state): State<Arc<AppState>>) -> ApiResult<Json<CountResponse>> {
    Ok(Json(state.tire_api.count_assigned()?))
}

async fn count_available(State(state): State<Arc<AppState>>) -> ApiResult<Json<CountResponse>> {
    Ok(Json(state.tire_api.count_available()?))
}
