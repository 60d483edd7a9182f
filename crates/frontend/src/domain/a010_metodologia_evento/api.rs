use contracts::domain::a010_metodologia_evento::aggregate::{
    GuardarPasosEventoDto, GuardarPasosEventoResponse, MetodologiaEventoResponse,
};

use crate::shared::api_utils::{get_json, id_path, post_json};

const BASE: &str = "/api/metodologias-eventos";

pub async fn fetch(metodologia_id: &str) -> Result<MetodologiaEventoResponse, String> {
    get_json(&id_path(BASE, metodologia_id)).await
}

/// Заменяет все шаги методологии
pub async fn guardar_pasos(
    metodologia_id: &str,
    dto: &GuardarPasosEventoDto,
) -> Result<GuardarPasosEventoResponse, String> {
    post_json(&format!("{}/pasos", id_path(BASE, metodologia_id)), dto).await
}
