use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a004_fraccion::aggregate::{
    FraccionCatalogos, FraccionCreateDto, FraccionDeleteResponse, FraccionListResponse,
    FraccionNextIdResponse, FraccionResponse, FraccionUpdateDto,
};
use serde::Deserialize;

use super::number_param;
use crate::domain::a004_fraccion::service::{self, FraccionListParams};
use crate::shared::api_error::ApiResult;
use crate::shared::data::db::get_connection;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub grupo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextIdQuery {
    pub codigo: Option<String>,
}

/// GET /api/fracciones/catalogos
pub async fn catalogos() -> ApiResult<Json<FraccionCatalogos>> {
    Ok(Json(service::catalogos(get_connection()).await?))
}

/// GET /api/fracciones/next-id
pub async fn next_id(Query(query): Query<NextIdQuery>) -> ApiResult<Json<FraccionNextIdResponse>> {
    Ok(Json(
        service::next_id(get_connection(), query.codigo.as_deref()).await?,
    ))
}

/// GET /api/fracciones
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<Json<FraccionListResponse>> {
    let params = FraccionListParams {
        page: number_param(query.page.as_deref()),
        per_page: number_param(query.per_page.as_deref()),
        grupo: query.grupo,
    };
    Ok(Json(service::list(get_connection(), params).await?))
}

/// POST /api/fracciones
pub async fn create(
    body: Result<Json<FraccionCreateDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FraccionResponse>)> {
    let Json(dto) = body?;
    let fraccion = service::create(get_connection(), &dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(FraccionResponse {
            success: true,
            fraccion,
        }),
    ))
}

/// PUT /api/fracciones/:id
pub async fn update(
    Path(id): Path<String>,
    body: Result<Json<FraccionUpdateDto>, JsonRejection>,
) -> ApiResult<Json<FraccionResponse>> {
    let Json(dto) = body?;
    let fraccion = service::update(get_connection(), &id, &dto).await?;
    Ok(Json(FraccionResponse {
        success: true,
        fraccion,
    }))
}

/// DELETE /api/fracciones/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<Json<FraccionDeleteResponse>> {
    let metodologias_borradas = service::delete(get_connection(), &id).await?;
    Ok(Json(FraccionDeleteResponse {
        success: true,
        message: format!("Fraccion {} eliminada correctamente", id),
        metodologias_borradas,
    }))
}
