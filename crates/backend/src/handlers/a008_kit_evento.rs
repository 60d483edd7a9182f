use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a006_kit::aggregate::KitNextIdResponse;
use contracts::domain::a007_evento::aggregate::{CasosResponse, EventosResponse};
use contracts::domain::a008_kit_evento::aggregate::{
    KitEventoCreateDto, KitEventoListResponse, KitEventoResponse, KitEventoUpdateDto,
};
use contracts::shared::api::MessageResponse;
use serde::Deserialize;

use super::number_param;
use crate::domain::a007_evento::service as evento_service;
use crate::domain::a008_kit_evento::service::{self, KitEventoListParams};
use crate::shared::api_error::ApiResult;
use crate::shared::data::db::get_connection;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub evento_tipo: Option<String>,
    pub caso: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EventoQuery {
    pub evento_tipo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextIdQuery {
    pub caso_id: Option<String>,
}

/// GET /api/kits-eventos/eventos-disponibles
pub async fn eventos_disponibles() -> ApiResult<Json<EventosResponse>> {
    let eventos = evento_service::eventos(get_connection()).await?;
    Ok(Json(EventosResponse {
        success: true,
        eventos,
    }))
}

/// GET /api/kits-eventos/casos-disponibles
pub async fn casos_disponibles(Query(query): Query<EventoQuery>) -> ApiResult<Json<CasosResponse>> {
    let casos = evento_service::casos(get_connection(), query.evento_tipo.as_deref()).await?;
    Ok(Json(CasosResponse {
        success: true,
        casos,
    }))
}

/// GET /api/kits-eventos/next-id
pub async fn next_id(Query(query): Query<NextIdQuery>) -> ApiResult<Json<KitNextIdResponse>> {
    Ok(Json(
        service::next_id(get_connection(), query.caso_id.as_deref()).await?,
    ))
}

/// GET /api/kits-eventos
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<Json<KitEventoListResponse>> {
    let params = KitEventoListParams {
        page: number_param(query.page.as_deref()),
        per_page: number_param(query.per_page.as_deref()),
        evento_tipo: query.evento_tipo,
        caso: query.caso,
    };
    Ok(Json(service::list(get_connection(), params).await?))
}

/// POST /api/kits-eventos
pub async fn create(
    body: Result<Json<KitEventoCreateDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<KitEventoResponse>)> {
    let Json(dto) = body?;
    let kit = service::create(get_connection(), &dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(KitEventoResponse { success: true, kit }),
    ))
}

/// PUT /api/kits-eventos/:id
pub async fn update(
    Path(id): Path<String>,
    body: Result<Json<KitEventoUpdateDto>, JsonRejection>,
) -> ApiResult<Json<KitEventoResponse>> {
    let Json(dto) = body?;
    let kit = service::update(get_connection(), &id, &dto).await?;
    Ok(Json(KitEventoResponse { success: true, kit }))
}

/// DELETE /api/kits-eventos/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<Json<MessageResponse>> {
    service::delete(get_connection(), &id).await?;
    Ok(Json(MessageResponse::ok(format!(
        "Kit {} eliminado correctamente",
        id
    ))))
}
