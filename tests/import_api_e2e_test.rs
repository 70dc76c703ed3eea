// ==========================================
// Registry upload endpoint - end-to-end tests
// ==========================================
// Router driven with tower::ServiceExt::oneshot and hand-built
// multipart bodies
// ==========================================


use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use rusqlite::Connection;
use serde_json::Value;
use std::sync::Arc;
use tempfile::NamedTempFile;
use test_helpers::{create_test_db, insert_existing_tire, valid_line, REGISTRY_HEADER};
use tire_registry::app::{app_router, AppState};
use tire_registry::config::AppConfig;
use tower::ServiceExt;

const UPLOAD_URI: &str = "/api/po-padron/cargar-padron";
const BOUNDARY: &str = "tire-registry-test-boundary";

fn test_app() -> (NamedTempFile, String, Router) {
    let (temp_file, db_path) = create_test_db().unwrap();
    let config = AppConfig {
        db_path: db_path.clone(),
        ..Default::default()
    };
    let state = Arc::new(AppState::new(&config).unwrap());
    (temp_file, db_path, app_router(state))
}

/// One multipart part: (field name, optional file name, content)
fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(UPLOAD_URI)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn csv_payload(lines: &[&str]) -> Vec<u8> {
    let mut text = format!("{REGISTRY_HEADER}\n");
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text.into_bytes()
}

#[tokio::test]
async fn test_upload_returns_summary_and_row_errors() {
    let (_temp_file, db_path, app) = test_app();
    insert_existing_tire(&db_path, "N-100", "ASIGNADO").unwrap();

    let payload = csv_payload(&[
        &valid_line("N-001"),
        &valid_line("N-100"),
        "N-003,GOODYAER,215/75R16,AT,12.5,16,P001,850.00,15/03/2023",
    ]);
    let (status, json) = send(
        app,
        multipart_request(&[("archivo", Some("padron.csv"), payload.as_slice())]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mensaje"], "Carga parcial: 1 insertados de 3 registros.");
    assert_eq!(json["total"], 3);
    assert_eq!(json["insertados"], 1);
    assert_eq!(
        json["errores"],
        serde_json::json!([
            {"fila": "N-100", "mensaje": "Código duplicado: ya existe en la base de datos."},
            {"fila": "N-003", "mensaje": "Marca inválida o mal escrita: 'GOODYAER'."}
        ])
    );
}

#[tokio::test]
async fn test_upload_accepts_file_field_alias() {
    let (_temp_file, _db_path, app) = test_app();

    let payload = csv_payload(&[&valid_line("N-1"), &valid_line("N-2")]);
    let (status, json) = send(
        app,
        multipart_request(&[
            ("comentario", None, &b"carga mensual"[..]),
            ("file", Some("padron.csv"), payload.as_slice()),
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["mensaje"],
        "Padrón actualizado correctamente. Todos los registros fueron insertados."
    );
    assert_eq!(json["errores"], serde_json::json!([]));
}

#[tokio::test]
async fn test_upload_without_file_is_rejected() {
    let (_temp_file, _db_path, app) = test_app();

    let (status, json) = send(
        app,
        multipart_request(&[("comentario", None, &b"sin archivo"[..])]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, serde_json::json!({"error": "No se recibió ningún archivo."}));
}

#[tokio::test]
async fn test_upload_batch_aborts_are_bad_requests() {
    let (_temp_file, _db_path, app) = test_app();

    let (status, json) = send(
        app.clone(),
        multipart_request(&[("archivo", Some("padron.csv"), &b"NOMBRE,APELLIDO\nAna,Perez\n"[..])]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "El archivo Excel no contiene ninguna columna reconocida."
    );

    let (status, json) = send(
        app.clone(),
        multipart_request(&[("archivo", Some("padron.csv"), &b""[..])]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "El archivo Excel está vacío.");

    let (status, json) = send(
        app,
        multipart_request(&[("archivo", Some("padron.xlsx"), &b"definitely not a workbook"[..])]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("No se pudo leer el archivo"));
}

#[tokio::test]
async fn test_store_failure_is_server_error_with_detail() {
    let (_temp_file, db_path, app) = test_app();
    Connection::open(&db_path)
        .unwrap()
        .execute_batch("DROP TABLE proveedor;")
        .unwrap();

    let payload = csv_payload(&[&valid_line("N-1")]);
    let (status, json) = send(
        app,
        multipart_request(&[("archivo", Some("padron.csv"), payload.as_slice())]),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Error al procesar el padrón");
    assert!(json["detalle"].as_str().unwrap().contains("proveedor"));
}
