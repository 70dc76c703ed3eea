// ==========================================
// Registry endpoints - HTTP tests
// ==========================================


use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::NamedTempFile;
use rusqlite::Connection;
use test_helpers::{create_test_db, insert_existing_tire, query_string};
use tire_registry::app::{app_router, AppState};
use tire_registry::config::AppConfig;
use tower::ServiceExt;

fn test_app() -> (NamedTempFile, Router) {
    let (temp_file, db_path) = create_test_db().unwrap();
    insert_existing_tire(&db_path, "N-1", "DISPONIBLE").unwrap();
    insert_existing_tire(&db_path, "N-2", "ASIGNADO").unwrap();
    insert_existing_tire(&db_path, "N-3", "DISPONIBLE").unwrap();

    let config = AppConfig {
        db_path,
        ..Default::default()
    };
    let state = Arc::new(AppState::new(&config).unwrap());
    (temp_file, app_router(state))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_list_exposes_registry_columns() {
    let (_temp_file, app) = test_app();

    let (status, json) = call(&app, Method::GET, "/api/po-neumaticos", None).await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["CODIGO"], "N-1");
    assert_eq!(rows[0]["MARCA"], "GOODYEAR");
    // NULL text columns come back as empty strings
    assert_eq!(rows[0]["DISEÑO"], "");
    assert_eq!(rows[0]["OC"], "");
}

#[tokio::test]
async fn test_counters() {
    let (_temp_file, app) = test_app();

    for (uri, expected) in [
        ("/api/po-neumaticos/cantidad", 3),
        ("/api/po-neumaticos/proyectos/cantidad", 1),
        ("/api/po-neumaticos/asignados/cantidad", 1),
        ("/api/po-neumaticos/disponibles/cantidad", 2),
    ] {
        let (status, json) = call(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json, json!({"cantidad": expected}), "{uri}");
    }
}

#[tokio::test]
async fn test_partial_update() {
    let (_temp_file, app) = test_app();

    let (status, json) = call(
        &app,
        Method::PUT,
        "/api/po-neumaticos/N-1",
        Some(json!({"TIPO_MOVIMIENTO": "ASIGNADO", "PROYECTO": "PLANTA SUR"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mensaje"], "Neumático actualizado correctamente");

    let (_, json) = call(&app, Method::GET, "/api/po-neumaticos/asignados/cantidad", None).await;
    assert_eq!(json["cantidad"], 2);

    let (_, json) = call(&app, Method::GET, "/api/po-neumaticos", None).await;
    let updated = &json.as_array().unwrap()[0];
    assert_eq!(updated["PROYECTO"], "PLANTA SUR");
    assert_eq!(updated["MARCA"], "GOODYEAR");
}

#[tokio::test]
async fn test_update_keeps_null_project_out_of_project_count() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    insert_existing_tire(&db_path, "N-1", "DISPONIBLE").unwrap();
    Connection::open(&db_path)
        .unwrap()
        .execute("INSERT INTO po_neumatico (codigo) VALUES ('N-9')", [])
        .unwrap();
    let config = AppConfig {
        db_path: db_path.clone(),
        ..Default::default()
    };
    let app = app_router(Arc::new(AppState::new(&config).unwrap()));

    let (status, _) = call(
        &app,
        Method::PUT,
        "/api/po-neumaticos/N-9",
        Some(json!({"KILOMETRAJE": 1200})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = call(&app, Method::GET, "/api/po-neumaticos/proyectos/cantidad", None).await;
    assert_eq!(json["cantidad"], 1);
    let project = query_string(
        &db_path,
        "SELECT proyecto FROM po_neumatico WHERE codigo = ?1",
        "N-9",
    )
    .unwrap();
    assert_eq!(project, None);
}

#[tokio::test]
async fn test_update_unknown_code_is_not_found() {
    let (_temp_file, app) = test_app();

    let (status, json) = call(
        &app,
        Method::PUT,
        "/api/po-neumaticos/N-404",
        Some(json!({"ESTADO": "BAJA"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"error": "Neumático no encontrado"}));
}

#[tokio::test]
async fn test_delete_twice() {
    let (_temp_file, app) = test_app();

    let (status, json) = call(&app, Method::DELETE, "/api/po-neumaticos/N-3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mensaje"], "Neumático eliminado correctamente");

    let (status, _) = call(&app, Method::DELETE, "/api/po-neumaticos/N-3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = call(&app, Method::GET, "/api/po-neumaticos/cantidad", None).await;
    assert_eq!(json["cantidad"], 2);
}
