use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a003_herramienta::aggregate::{
    HerramientaCatalogos, HerramientaCreateDto, HerramientaListResponse,
    HerramientaNextIdResponse, HerramientaResponse, HerramientaUpdateDto,
};
use contracts::shared::api::MessageResponse;
use serde::Deserialize;

use super::number_param;
use crate::domain::a003_herramienta::service::{self, HerramientaListParams};
use crate::shared::api_error::ApiResult;
use crate::shared::data::db::get_connection;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub grupo: Option<String>,
    pub estatus: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextIdQuery {
    pub grupo: Option<String>,
}

/// GET /api/herramientas/catalogos
pub async fn catalogos() -> Json<HerramientaCatalogos> {
    Json(service::catalogos())
}

/// GET /api/herramientas/next-id
pub async fn next_id(Query(query): Query<NextIdQuery>) -> ApiResult<Json<HerramientaNextIdResponse>> {
    Ok(Json(
        service::next_id(get_connection(), query.grupo.as_deref()).await?,
    ))
}

/// GET /api/herramientas
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<Json<HerramientaListResponse>> {
    let params = HerramientaListParams {
        page: number_param(query.page.as_deref()),
        per_page: number_param(query.per_page.as_deref()),
        grupo: query.grupo,
        estatus: query.estatus,
    };
    Ok(Json(service::list(get_connection(), params).await?))
}

/// POST /api/herramientas
pub async fn create(
    body: Result<Json<HerramientaCreateDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<HerramientaResponse>)> {
    let Json(dto) = body?;
    let herramienta = service::create(get_connection(), &dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(HerramientaResponse {
            success: true,
            herramienta,
        }),
    ))
}

/// PUT /api/herramientas/:id
pub async fn update(
    Path(id): Path<String>,
    body: Result<Json<HerramientaUpdateDto>, JsonRejection>,
) -> ApiResult<Json<HerramientaResponse>> {
    let Json(dto) = body?;
    let herramienta = service::update(get_connection(), &id, &dto).await?;
    Ok(Json(HerramientaResponse {
        success: true,
        herramienta,
    }))
}

/// DELETE /api/herramientas/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<Json<MessageResponse>> {
    service::delete(get_connection(), &id).await?;
    Ok(Json(MessageResponse::ok(format!(
        "Herramienta {} eliminada correctamente",
        id
    ))))
}
