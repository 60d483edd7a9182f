use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/catalogos/testdata",
            post(handlers::a001_area::insert_test_data),
        )
        // ========================================
        // ELEMENTOS
        // ========================================
        .route(
            "/api/elementos",
            get(handlers::a002_elemento::list).post(handlers::a002_elemento::create),
        )
        .route(
            "/api/elementos/catalogos",
            get(handlers::a002_elemento::catalogos),
        )
        .route(
            "/api/elementos/next-id",
            get(handlers::a002_elemento::next_id),
        )
        .route(
            "/api/elementos/:id",
            put(handlers::a002_elemento::update).delete(handlers::a002_elemento::delete),
        )
        // ========================================
        // HERRAMIENTAS
        // ========================================
        .route(
            "/api/herramientas",
            get(handlers::a003_herramienta::list).post(handlers::a003_herramienta::create),
        )
        .route(
            "/api/herramientas/catalogos",
            get(handlers::a003_herramienta::catalogos),
        )
        .route(
            "/api/herramientas/next-id",
            get(handlers::a003_herramienta::next_id),
        )
        .route(
            "/api/herramientas/:id",
            put(handlers::a003_herramienta::update).delete(handlers::a003_herramienta::delete),
        )
        // ========================================
        // FRACCIONES + METODOLOGIAS BASE
        // ========================================
        .route(
            "/api/fracciones",
            get(handlers::a004_fraccion::list).post(handlers::a004_fraccion::create),
        )
        .route(
            "/api/fracciones/catalogos",
            get(handlers::a004_fraccion::catalogos),
        )
        .route(
            "/api/fracciones/next-id",
            get(handlers::a004_fraccion::next_id),
        )
        .route(
            "/api/fracciones/:id",
            put(handlers::a004_fraccion::update).delete(handlers::a004_fraccion::delete),
        )
        .route(
            "/api/fracciones/:id/metodologias",
            get(handlers::a005_metodologia::get_metodologias),
        )
        .route(
            "/api/fracciones/:id/metodologias/:nivel",
            post(handlers::a005_metodologia::guardar_nivel),
        )
        // ========================================
        // KITS
        // ========================================
        .route(
            "/api/kits",
            get(handlers::a006_kit::list).post(handlers::a006_kit::create),
        )
        .route(
            "/api/kits/fracciones-disponibles",
            get(handlers::a006_kit::fracciones_disponibles),
        )
        .route(
            "/api/kits/herramientas-disponibles",
            get(handlers::a006_kit::herramientas_disponibles),
        )
        .route("/api/kits/next-id", get(handlers::a006_kit::next_id))
        .route(
            "/api/kits/:id",
            put(handlers::a006_kit::update).delete(handlers::a006_kit::delete),
        )
        // ========================================
        // KITS DE EVENTO
        // ========================================
        .route(
            "/api/kits-eventos",
            get(handlers::a008_kit_evento::list).post(handlers::a008_kit_evento::create),
        )
        .route(
            "/api/kits-eventos/eventos-disponibles",
            get(handlers::a008_kit_evento::eventos_disponibles),
        )
        .route(
            "/api/kits-eventos/casos-disponibles",
            get(handlers::a008_kit_evento::casos_disponibles),
        )
        .route(
            "/api/kits-eventos/next-id",
            get(handlers::a008_kit_evento::next_id),
        )
        .route(
            "/api/kits-eventos/:id",
            put(handlers::a008_kit_evento::update).delete(handlers::a008_kit_evento::delete),
        )
        // ========================================
        // FRACCIONES DE EVENTO + METODOLOGIAS
        // ========================================
        .route(
            "/api/fracciones-eventos",
            get(handlers::a009_fraccion_evento::list).post(handlers::a009_fraccion_evento::create),
        )
        .route(
            "/api/fracciones-eventos/eventos-disponibles",
            get(handlers::a009_fraccion_evento::eventos_disponibles),
        )
        .route(
            "/api/fracciones-eventos/codigos-disponibles",
            get(handlers::a009_fraccion_evento::codigos_disponibles),
        )
        .route(
            "/api/fracciones-eventos/next-id",
            get(handlers::a009_fraccion_evento::next_id),
        )
        .route(
            "/api/fracciones-eventos/:id",
            put(handlers::a009_fraccion_evento::update)
                .delete(handlers::a009_fraccion_evento::delete),
        )
        .route(
            "/api/metodologias-eventos/:id",
            get(handlers::a010_metodologia_evento::get),
        )
        .route(
            "/api/metodologias-eventos/:id/pasos",
            post(handlers::a010_metodologia_evento::guardar_pasos),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    // Глобальное соединение инициализируется один раз, поэтому весь сценарий в одном тесте
    #[tokio::test]
    async fn catalog_api_flow() {
        let dir = tempfile::tempdir().unwrap();
        crate::shared::data::db::initialize_database(&dir.path().join("app.db"))
            .await
            .unwrap();
        let app = configure_routes();

        let (status, body) = call(&app, Method::POST, "/api/catalogos/testdata", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/elementos",
            Some(json!({"subarea_id": "AD-DI-OF-01", "nombre": "silla", "descripcion": "Giratoria", "cantidad": 4})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["elemento"]["elemento_id"], "EL-SI-001");
        assert_eq!(body["message"], "Elemento creado exitosamente");

        let (status, body) = call(&app, Method::GET, "/api/elementos?page=abc&per_page=x", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["per_page"], 20);

        let (status, body) = call(
            &app,
            Method::PUT,
            "/api/elementos/EL-SI-001",
            Some(json!({"nombre": "MESA"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Campo no editable: nombre");

        let (status, body) = call(&app, Method::GET, "/api/herramientas/next-id?grupo=g", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Grupo debe tener 2 caracteres");

        let (status, body) = call(&app, Method::DELETE, "/api/herramientas/HE-GU-404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Herramienta no encontrada");

        let (status, body) = call(&app, Method::POST, "/api/fracciones", Some(json!({"codigo": "TL"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["fraccion"]["fraccion_id"], "FR-TL-001");

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/fracciones/FR-TL-001/metodologias/9",
            Some(json!({"pasos": [{"orden": 1, "instruccion": "Tallar"}]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Nivel invalido (1-4)");

        let (status, body) = call(&app, Method::DELETE, "/api/fracciones/FR-TL-001", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Fraccion FR-TL-001 eliminada correctamente");

        let raw = Request::builder()
            .method(Method::POST)
            .uri("/api/kits")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(raw).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("JSON invalido"));

        let (status, body) = call(&app, Method::GET, "/api/metodologias-eventos/ME-IN-DE-001", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Metodologia no encontrada");
    }
}
