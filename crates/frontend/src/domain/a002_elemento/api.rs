use contracts::domain::a002_elemento::aggregate::{
    ElementoCatalogos, ElementoCreateDto, ElementoListResponse, ElementoNextIdResponse,
    ElementoResponse, ElementoUpdateDto,
};
use contracts::shared::api::MessageResponse;
use serde::Serialize;

use crate::shared::api_utils::{delete_json, get_json, id_path, post_json, put_json, with_query};

const BASE: &str = "/api/elementos";

/// Фильтры списка; subarea_id имеет приоритет над area_id на сервере
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementoFiltro {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subarea_id: Option<String>,
}

#[derive(Serialize)]
struct NextIdQuery<'a> {
    nombre: &'a str,
    descripcion: &'a str,
}

pub async fn fetch_catalogos() -> Result<ElementoCatalogos, String> {
    get_json(&format!("{}/catalogos", BASE)).await
}

pub async fn fetch_list(filtro: &ElementoFiltro) -> Result<ElementoListResponse, String> {
    get_json(&with_query(BASE, filtro)).await
}

pub async fn fetch_next_id(nombre: &str, descripcion: &str) -> Result<String, String> {
    let query = NextIdQuery { nombre, descripcion };
    let response: ElementoNextIdResponse =
        get_json(&with_query(&format!("{}/next-id", BASE), &query)).await?;
    Ok(response.next_id)
}

pub async fn create(dto: &ElementoCreateDto) -> Result<ElementoResponse, String> {
    post_json(BASE, dto).await
}

pub async fn update(id: &str, dto: &ElementoUpdateDto) -> Result<ElementoResponse, String> {
    put_json(&id_path(BASE, id), dto).await
}

pub async fn delete(id: &str) -> Result<MessageResponse, String> {
    delete_json(&id_path(BASE, id)).await
}
