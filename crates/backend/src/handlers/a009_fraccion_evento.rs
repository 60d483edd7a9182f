use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a009_fraccion_evento::aggregate::{
    CodigosResponse, FraccionEventoCreateDto, FraccionEventoEventosResponse,
    FraccionEventoListResponse, FraccionEventoNextIdResponse, FraccionEventoResponse,
    FraccionEventoUpdateDto,
};
use contracts::shared::api::MessageResponse;
use serde::Deserialize;

use super::number_param;
use crate::domain::a007_evento::service as evento_service;
use crate::domain::a009_fraccion_evento::service::{self, FraccionEventoListParams};
use crate::shared::api_error::ApiResult;
use crate::shared::data::db::get_connection;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub evento_tipo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CodigosQuery {
    pub evento_tipo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextIdQuery {
    pub evento_tipo: Option<String>,
    pub codigo: Option<String>,
}

/// GET /api/fracciones-eventos/eventos-disponibles
pub async fn eventos_disponibles() -> ApiResult<Json<FraccionEventoEventosResponse>> {
    let eventos = evento_service::eventos(get_connection()).await?;
    Ok(Json(FraccionEventoEventosResponse {
        success: true,
        eventos,
    }))
}

/// GET /api/fracciones-eventos/codigos-disponibles
pub async fn codigos_disponibles(Query(query): Query<CodigosQuery>) -> ApiResult<Json<CodigosResponse>> {
    let codigos =
        service::codigos_disponibles(get_connection(), query.evento_tipo.as_deref()).await?;
    Ok(Json(CodigosResponse {
        success: true,
        codigos,
    }))
}

/// GET /api/fracciones-eventos/next-id
pub async fn next_id(
    Query(query): Query<NextIdQuery>,
) -> ApiResult<Json<FraccionEventoNextIdResponse>> {
    Ok(Json(
        service::next_id(
            get_connection(),
            query.evento_tipo.as_deref(),
            query.codigo.as_deref(),
        )
        .await?,
    ))
}

/// GET /api/fracciones-eventos
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<Json<FraccionEventoListResponse>> {
    let params = FraccionEventoListParams {
        page: number_param(query.page.as_deref()),
        per_page: number_param(query.per_page.as_deref()),
        evento_tipo: query.evento_tipo,
    };
    Ok(Json(service::list(get_connection(), params).await?))
}

/// POST /api/fracciones-eventos
pub async fn create(
    body: Result<Json<FraccionEventoCreateDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FraccionEventoResponse>)> {
    let Json(dto) = body?;
    let fraccion = service::create(get_connection(), &dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(FraccionEventoResponse {
            success: true,
            fraccion,
        }),
    ))
}

/// PUT /api/fracciones-eventos/:id
pub async fn update(
    Path(id): Path<String>,
    body: Result<Json<FraccionEventoUpdateDto>, JsonRejection>,
) -> ApiResult<Json<FraccionEventoResponse>> {
    let Json(dto) = body?;
    let fraccion = service::update(get_connection(), &id, &dto).await?;
    Ok(Json(FraccionEventoResponse {
        success: true,
        fraccion,
    }))
}

/// DELETE /api/fracciones-eventos/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<Json<MessageResponse>> {
    service::delete(get_connection(), &id).await?;
    Ok(Json(MessageResponse::ok(format!(
        "Fraccion {} eliminada correctamente",
        id
    ))))
}
