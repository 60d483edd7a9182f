use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::Json;
use contracts::domain::a005_metodologia::aggregate::{
    FraccionMetodologias, GuardarPasosDto, GuardarPasosResponse,
};

use crate::domain::a005_metodologia::service;
use crate::shared::api_error::ApiResult;
use crate::shared::data::db::get_connection;

/// GET /api/fracciones/:id/metodologias
pub async fn get_metodologias(Path(id): Path<String>) -> ApiResult<Json<FraccionMetodologias>> {
    Ok(Json(service::get_metodologias(get_connection(), &id).await?))
}

/// POST /api/fracciones/:id/metodologias/:nivel
///
/// Нечисловой уровень отклоняется той же ошибкой, что и уровень вне 1..4.
pub async fn guardar_nivel(
    Path((id, nivel)): Path<(String, String)>,
    body: Result<Json<GuardarPasosDto>, JsonRejection>,
) -> ApiResult<Json<GuardarPasosResponse>> {
    let Json(dto) = body?;
    let nivel: i32 = nivel.trim().parse().unwrap_or(0);
    Ok(Json(
        service::guardar_nivel(get_connection(), &id, nivel, &dto).await?,
    ))
}
