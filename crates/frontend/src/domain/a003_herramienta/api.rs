use contracts::domain::a003_herramienta::aggregate::{
    HerramientaCatalogos, HerramientaCreateDto, HerramientaListResponse,
    HerramientaNextIdResponse, HerramientaResponse, HerramientaUpdateDto,
};
use contracts::shared::api::MessageResponse;
use serde::Serialize;

use crate::shared::api_utils::{delete_json, get_json, id_path, post_json, put_json, with_query};

const BASE: &str = "/api/herramientas";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HerramientaFiltro {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grupo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estatus: Option<String>,
}

pub async fn fetch_catalogos() -> Result<HerramientaCatalogos, String> {
    get_json(&format!("{}/catalogos", BASE)).await
}

pub async fn fetch_list(filtro: &HerramientaFiltro) -> Result<HerramientaListResponse, String> {
    get_json(&with_query(BASE, filtro)).await
}

pub async fn fetch_next_id(grupo: &str) -> Result<HerramientaNextIdResponse, String> {
    get_json(&format!("{}/next-id?grupo={}", BASE, urlencoding::encode(grupo))).await
}

pub async fn create(dto: &HerramientaCreateDto) -> Result<HerramientaResponse, String> {
    post_json(BASE, dto).await
}

pub async fn update(id: &str, dto: &HerramientaUpdateDto) -> Result<HerramientaResponse, String> {
    put_json(&id_path(BASE, id), dto).await
}

pub async fn delete(id: &str) -> Result<MessageResponse, String> {
    delete_json(&id_path(BASE, id)).await
}
