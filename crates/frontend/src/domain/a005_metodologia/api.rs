use contracts::domain::a005_metodologia::aggregate::{
    FraccionMetodologias, GuardarPasosDto, GuardarPasosResponse,
};
use contracts::domain::common::NivelLimpieza;

use crate::shared::api_utils::{get_json, id_path, post_json};

const BASE: &str = "/api/fracciones";

/// Все четыре уровня фракции; отсутствующие приходят как `null`
pub async fn fetch_metodologias(fraccion_id: &str) -> Result<FraccionMetodologias, String> {
    get_json(&format!("{}/metodologias", id_path(BASE, fraccion_id))).await
}

/// Заменяет шаги уровня целиком
pub async fn guardar_nivel(
    fraccion_id: &str,
    nivel: NivelLimpieza,
    dto: &GuardarPasosDto,
) -> Result<GuardarPasosResponse, String> {
    let url = format!("{}/metodologias/{}", id_path(BASE, fraccion_id), nivel.id());
    post_json(&url, dto).await
}
