//! API utilities for frontend-backend communication
//!
//! Все запросы возвращают `Result<T, String>`: при ответе не 2xx берётся поле
//! `error` тела, при сбое транспорта - `"Error de conexión"`.

use contracts::shared::api::ErrorResponse;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const ERROR_CONEXION: &str = "Error de conexión";

/// Порт backend по умолчанию (`[server] port` в config.toml)
const BACKEND_PORT: u16 = 3000;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using the backend port.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

/// Build a full API URL from a path
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Путь с query string; пустой query не добавляет `?`
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> String {
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", path, qs),
        _ => path.to_string(),
    }
}

/// Сегмент пути с идентификатором
pub fn id_path(prefix: &str, id: &str) -> String {
    format!("{}/{}", prefix, urlencoding::encode(id))
}

async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.ok() {
        return response
            .json::<T>()
            .await
            .map_err(|e| format!("Respuesta inválida: {}", e));
    }
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) if !body.error.is_empty() => Err(body.error),
        _ => Err(format!("HTTP {}", status)),
    }
}

async fn send<T: DeserializeOwned>(request: Request) -> Result<T, String> {
    let response = request.send().await.map_err(|e| {
        log::error!("request failed: {}", e);
        ERROR_CONEXION.to_string()
    })?;
    read_response(response).await
}

async fn send_with_body<B, T>(builder: RequestBuilder, body: &B) -> Result<T, String>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = builder.json(body).map_err(|e| e.to_string())?;
    send(request).await
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let request = Request::get(&api_url(path))
        .build()
        .map_err(|e| e.to_string())?;
    send(request).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    send_with_body(Request::post(&api_url(path)), body).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    send_with_body(Request::put(&api_url(path)), body).await
}

pub async fn delete_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let request = Request::delete(&api_url(path))
        .build()
        .map_err(|e| e.to_string())?;
    send(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Query {
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        grupo: Option<String>,
    }

    #[test]
    fn with_query_skips_empty_params() {
        let q = Query {
            page: Some(2),
            grupo: None,
        };
        assert_eq!(with_query("/api/herramientas", &q), "/api/herramientas?page=2");
        let q = Query {
            page: None,
            grupo: None,
        };
        assert_eq!(with_query("/api/herramientas", &q), "/api/herramientas");
    }

    #[test]
    fn id_path_encodes_segment() {
        assert_eq!(id_path("/api/kits", "KT-TL-001"), "/api/kits/KT-TL-001");
        assert_eq!(id_path("/api/kits", "a b"), "/api/kits/a%20b");
    }
}
