use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::Json;
use contracts::domain::a010_metodologia_evento::aggregate::{
    GuardarPasosEventoDto, GuardarPasosEventoResponse, MetodologiaEventoResponse,
};

use crate::domain::a010_metodologia_evento::service;
use crate::shared::api_error::ApiResult;
use crate::shared::data::db::get_connection;

/// GET /api/metodologias-eventos/:id
pub async fn get(Path(id): Path<String>) -> ApiResult<Json<MetodologiaEventoResponse>> {
    Ok(Json(service::get(get_connection(), &id).await?))
}

/// POST /api/metodologias-eventos/:id/pasos
pub async fn guardar_pasos(
    Path(id): Path<String>,
    body: Result<Json<GuardarPasosEventoDto>, JsonRejection>,
) -> ApiResult<Json<GuardarPasosEventoResponse>> {
    let Json(dto) = body?;
    Ok(Json(
        service::guardar_pasos(get_connection(), &id, &dto).await?,
    ))
}
