use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a002_elemento::aggregate::{
    ElementoCatalogos, ElementoCreateDto, ElementoListResponse, ElementoNextIdResponse,
    ElementoResponse,
};
use contracts::shared::api::MessageResponse;
use serde::Deserialize;

use super::number_param;
use crate::domain::a002_elemento::service::{self, ElementoListParams};
use crate::shared::api_error::ApiResult;
use crate::shared::data::db::get_connection;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub area_id: Option<String>,
    pub subarea_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextIdQuery {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}

/// GET /api/elementos/catalogos
pub async fn catalogos() -> ApiResult<Json<ElementoCatalogos>> {
    Ok(Json(service::catalogos(get_connection()).await?))
}

/// GET /api/elementos
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<Json<ElementoListResponse>> {
    let params = ElementoListParams {
        page: number_param(query.page.as_deref()),
        per_page: number_param(query.per_page.as_deref()),
        area_id: query.area_id,
        subarea_id: query.subarea_id,
    };
    Ok(Json(service::list(get_connection(), params).await?))
}

/// GET /api/elementos/next-id
pub async fn next_id(Query(query): Query<NextIdQuery>) -> ApiResult<Json<ElementoNextIdResponse>> {
    let next_id = service::next_id(
        get_connection(),
        query.nombre.as_deref(),
        query.descripcion.as_deref(),
    )
    .await?;
    Ok(Json(ElementoNextIdResponse {
        success: true,
        next_id,
    }))
}

/// POST /api/elementos
pub async fn create(
    body: Result<Json<ElementoCreateDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ElementoResponse>)> {
    let Json(dto) = body?;
    let elemento = service::create(get_connection(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ElementoResponse {
            success: true,
            message: "Elemento creado exitosamente".into(),
            elemento,
        }),
    ))
}

/// PUT /api/elementos/:id
pub async fn update(
    Path(id): Path<String>,
    body: Result<Json<serde_json::Map<String, serde_json::Value>>, JsonRejection>,
) -> ApiResult<Json<ElementoResponse>> {
    let Json(body) = body?;
    let elemento = service::update(get_connection(), &id, &body).await?;
    Ok(Json(ElementoResponse {
        success: true,
        message: "Elemento actualizado exitosamente".into(),
        elemento,
    }))
}

/// DELETE /api/elementos/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<Json<MessageResponse>> {
    service::delete(get_connection(), &id).await?;
    Ok(Json(MessageResponse::ok("Elemento eliminado exitosamente")))
}
