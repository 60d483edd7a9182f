use contracts::domain::a006_kit::aggregate::KitNextIdResponse;
use contracts::domain::a007_evento::aggregate::{CasosResponse, EventosResponse};
use contracts::domain::a008_kit_evento::aggregate::{
    KitEventoCreateDto, KitEventoListResponse, KitEventoResponse, KitEventoUpdateDto,
};
use contracts::shared::api::MessageResponse;
use serde::Serialize;

use crate::shared::api_utils::{delete_json, get_json, id_path, post_json, put_json, with_query};

const BASE: &str = "/api/kits-eventos";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KitEventoFiltro {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evento_tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caso: Option<String>,
}

pub async fn fetch_eventos() -> Result<EventosResponse, String> {
    get_json(&format!("{}/eventos-disponibles", BASE)).await
}

/// Случаи события; пустой evento_tipo возвращает все
pub async fn fetch_casos(evento_tipo: &str) -> Result<CasosResponse, String> {
    let url = match evento_tipo {
        "" => format!("{}/casos-disponibles", BASE),
        e => format!("{}/casos-disponibles?evento_tipo={}", BASE, urlencoding::encode(e)),
    };
    get_json(&url).await
}

pub async fn fetch_next_id(caso_id: &str) -> Result<KitNextIdResponse, String> {
    get_json(&format!("{}/next-id?caso_id={}", BASE, urlencoding::encode(caso_id))).await
}

pub async fn fetch_list(filtro: &KitEventoFiltro) -> Result<KitEventoListResponse, String> {
    get_json(&with_query(BASE, filtro)).await
}

pub async fn create(dto: &KitEventoCreateDto) -> Result<KitEventoResponse, String> {
    post_json(BASE, dto).await
}

pub async fn update(id: &str, dto: &KitEventoUpdateDto) -> Result<KitEventoResponse, String> {
    put_json(&id_path(BASE, id), dto).await
}

pub async fn delete(id: &str) -> Result<MessageResponse, String> {
    delete_json(&id_path(BASE, id)).await
}
