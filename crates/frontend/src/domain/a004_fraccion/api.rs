use contracts::domain::a004_fraccion::aggregate::{
    FraccionCatalogos, FraccionCreateDto, FraccionDeleteResponse, FraccionListResponse,
    FraccionNextIdResponse, FraccionResponse, FraccionUpdateDto,
};
use serde::Serialize;

use crate::shared::api_utils::{delete_json, get_json, id_path, post_json, put_json, with_query};

const BASE: &str = "/api/fracciones";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FraccionFiltro {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grupo: Option<String>,
}

pub async fn fetch_catalogos() -> Result<FraccionCatalogos, String> {
    get_json(&format!("{}/catalogos", BASE)).await
}

pub async fn fetch_list(filtro: &FraccionFiltro) -> Result<FraccionListResponse, String> {
    get_json(&with_query(BASE, filtro)).await
}

/// Следующий id и правила custom для кода
pub async fn fetch_next_id(codigo: &str) -> Result<FraccionNextIdResponse, String> {
    get_json(&format!("{}/next-id?codigo={}", BASE, urlencoding::encode(codigo))).await
}

pub async fn create(dto: &FraccionCreateDto) -> Result<FraccionResponse, String> {
    post_json(BASE, dto).await
}

pub async fn update(id: &str, dto: &FraccionUpdateDto) -> Result<FraccionResponse, String> {
    put_json(&id_path(BASE, id), dto).await
}

/// Удаляет фракцию вместе с её базовыми методологиями
pub async fn delete(id: &str) -> Result<FraccionDeleteResponse, String> {
    delete_json(&id_path(BASE, id)).await
}
