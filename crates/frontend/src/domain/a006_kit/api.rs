use contracts::domain::a006_kit::aggregate::{
    KitCreateDto, KitFraccionesResponse, KitHerramientasResponse, KitListResponse,
    KitNextIdResponse, KitResponse, KitUpdateDto,
};
use contracts::shared::api::MessageResponse;
use serde::Serialize;

use crate::shared::api_utils::{delete_json, get_json, id_path, post_json, put_json, with_query};

const BASE: &str = "/api/kits";

/// Фильтры списка китов; `nivel` принимает `general` или 1..4
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KitFiltro {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nivel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_kit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct GrupoQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    grupo: Option<&'a str>,
}

pub async fn fetch_fracciones() -> Result<KitFraccionesResponse, String> {
    get_json(&format!("{}/fracciones-disponibles", BASE)).await
}

/// Активные инструменты; пустой grupo означает все группы
pub async fn fetch_herramientas(grupo: &str) -> Result<KitHerramientasResponse, String> {
    let query = GrupoQuery {
        grupo: Some(grupo).filter(|g| !g.is_empty()),
    };
    get_json(&with_query(
        &format!("{}/herramientas-disponibles", BASE),
        &query,
    ))
    .await
}

pub async fn fetch_next_id(codigo: &str) -> Result<KitNextIdResponse, String> {
    get_json(&format!("{}/next-id?codigo={}", BASE, urlencoding::encode(codigo))).await
}

pub async fn fetch_list(filtro: &KitFiltro) -> Result<KitListResponse, String> {
    get_json(&with_query(BASE, filtro)).await
}

pub async fn create(dto: &KitCreateDto) -> Result<KitResponse, String> {
    post_json(BASE, dto).await
}

pub async fn update(id: &str, dto: &KitUpdateDto) -> Result<KitResponse, String> {
    put_json(&id_path(BASE, id), dto).await
}

pub async fn delete(id: &str) -> Result<MessageResponse, String> {
    delete_json(&id_path(BASE, id)).await
}
