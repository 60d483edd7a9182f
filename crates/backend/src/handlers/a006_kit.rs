use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a006_kit::aggregate::{
    KitCreateDto, KitFraccionesResponse, KitHerramientasResponse, KitListResponse,
    KitNextIdResponse, KitResponse, KitUpdateDto,
};
use contracts::shared::api::MessageResponse;
use serde::Deserialize;

use super::number_param;
use crate::domain::a006_kit::service::{self, KitListParams};
use crate::shared::api_error::ApiResult;
use crate::shared::data::db::get_connection;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub fraccion: Option<String>,
    pub nivel: Option<String>,
    pub tipo_kit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextIdQuery {
    pub codigo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GrupoQuery {
    pub grupo: Option<String>,
}

/// GET /api/kits/fracciones-disponibles
pub async fn fracciones_disponibles() -> ApiResult<Json<KitFraccionesResponse>> {
    let fracciones = service::fracciones_disponibles(get_connection()).await?;
    Ok(Json(KitFraccionesResponse {
        success: true,
        fracciones,
    }))
}

/// GET /api/kits/herramientas-disponibles
pub async fn herramientas_disponibles(
    Query(query): Query<GrupoQuery>,
) -> ApiResult<Json<KitHerramientasResponse>> {
    let herramientas =
        service::herramientas_disponibles(get_connection(), query.grupo.as_deref()).await?;
    Ok(Json(KitHerramientasResponse {
        success: true,
        herramientas,
    }))
}

/// GET /api/kits/next-id
pub async fn next_id(Query(query): Query<NextIdQuery>) -> ApiResult<Json<KitNextIdResponse>> {
    Ok(Json(
        service::next_id(get_connection(), query.codigo.as_deref()).await?,
    ))
}

/// GET /api/kits
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<Json<KitListResponse>> {
    let params = KitListParams {
        page: number_param(query.page.as_deref()),
        per_page: number_param(query.per_page.as_deref()),
        fraccion: query.fraccion,
        nivel: query.nivel,
        tipo_kit: query.tipo_kit,
    };
    Ok(Json(service::list(get_connection(), params).await?))
}

/// POST /api/kits
pub async fn create(
    body: Result<Json<KitCreateDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<KitResponse>)> {
    let Json(dto) = body?;
    let kit = service::create(get_connection(), &dto).await?;
    Ok((StatusCode::CREATED, Json(KitResponse { success: true, kit })))
}

/// PUT /api/kits/:id
pub async fn update(
    Path(id): Path<String>,
    body: Result<Json<KitUpdateDto>, JsonRejection>,
) -> ApiResult<Json<KitResponse>> {
    let Json(dto) = body?;
    let kit = service::update(get_connection(), &id, &dto).await?;
    Ok(Json(KitResponse { success: true, kit }))
}

/// DELETE /api/kits/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<Json<MessageResponse>> {
    service::delete(get_connection(), &id).await?;
    Ok(Json(MessageResponse::ok(format!(
        "Kit {} eliminado correctamente",
        id
    ))))
}
