use contracts::domain::a007_evento::aggregate::EventosResponse;
use contracts::domain::a009_fraccion_evento::aggregate::{
    CodigosResponse, FraccionEventoCreateDto, FraccionEventoListResponse,
    FraccionEventoNextIdResponse, FraccionEventoResponse, FraccionEventoUpdateDto,
};
use contracts::shared::api::MessageResponse;
use serde::Serialize;

use crate::shared::api_utils::{delete_json, get_json, id_path, post_json, put_json, with_query};

const BASE: &str = "/api/fracciones-eventos";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FraccionEventoFiltro {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evento_tipo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct NextIdQuery<'a> {
    evento_tipo: &'a str,
    codigo: &'a str,
}

pub async fn fetch_eventos() -> Result<EventosResponse, String> {
    get_json(&format!("{}/eventos-disponibles", BASE)).await
}

/// Коды, уже занятые фракциями события
pub async fn fetch_codigos(evento_tipo: &str) -> Result<CodigosResponse, String> {
    get_json(&format!(
        "{}/codigos-disponibles?evento_tipo={}",
        BASE,
        urlencoding::encode(evento_tipo)
    ))
    .await
}

pub async fn fetch_next_id(
    evento_tipo: &str,
    codigo: &str,
) -> Result<FraccionEventoNextIdResponse, String> {
    let query = NextIdQuery {
        evento_tipo,
        codigo,
    };
    get_json(&with_query(&format!("{}/next-id", BASE), &query)).await
}

pub async fn fetch_list(
    filtro: &FraccionEventoFiltro,
) -> Result<FraccionEventoListResponse, String> {
    get_json(&with_query(BASE, filtro)).await
}

/// Создаёт фракцию и пустую методологию к ней
pub async fn create(dto: &FraccionEventoCreateDto) -> Result<FraccionEventoResponse, String> {
    post_json(BASE, dto).await
}

pub async fn update(
    id: &str,
    dto: &FraccionEventoUpdateDto,
) -> Result<FraccionEventoResponse, String> {
    put_json(&id_path(BASE, id), dto).await
}

pub async fn delete(id: &str) -> Result<MessageResponse, String> {
    delete_json(&id_path(BASE, id)).await
}
