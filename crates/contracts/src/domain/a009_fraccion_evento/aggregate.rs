use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::a007_evento::aggregate::{codigo_evento, EventoCatalogo};
use crate::domain::common::catalog_id;
use crate::domain::common::CatalogEntity;
use crate::shared::paging::PageInfo;

pub const PREFIJO: &str = "FR";
pub const PREFIJO_METODOLOGIA: &str = "ME";
pub const PER_PAGE_DEFAULT: u64 = 50;

/// Fracción de evento (`FR-IN-DE-001`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraccionEvento {
    pub fraccion_evento_id: String,
    pub evento_tipo_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
}

impl FraccionEvento {
    pub fn codigo(&self) -> String {
        codigo_de(&self.fraccion_evento_id)
    }
}

impl CatalogEntity for FraccionEvento {
    fn aggregate_index() -> &'static str {
        "a009"
    }
    fn collection_name() -> &'static str {
        "fraccion_evento"
    }
    fn element_name() -> &'static str {
        "Fracción de evento"
    }
    fn list_name() -> &'static str {
        "Fracciones de evento"
    }
}

/// Код фракции: третий сегмент (`FR-IN-DE-001` → `DE`)
pub fn codigo_de(fraccion_evento_id: &str) -> String {
    if catalog_id::segment_count(fraccion_evento_id) >= 3 {
        catalog_id::segment(fraccion_evento_id, 2)
            .unwrap_or_default()
            .to_string()
    } else {
        String::new()
    }
}

/// Код события из evento_tipo_id либо ошибка формата
pub fn codigo_evento_de(evento_tipo_id: &str) -> Result<String, String> {
    codigo_evento(evento_tipo_id)
        .map(str::to_string)
        .ok_or_else(|| "Formato de evento_tipo invalido".to_string())
}

/// Префикс фракции: `["FR", ev, cc]`
pub fn prefijo_fraccion(codigo_evento: &str, codigo: &str) -> [String; 3] {
    [
        PREFIJO.to_string(),
        codigo_evento.to_string(),
        codigo.to_string(),
    ]
}

/// Методология события получает тот же хвост, что и фракция:
/// `FR-IN-DE-004` → `ME-IN-DE-004`
pub fn metodologia_id_para(fraccion_evento_id: &str) -> String {
    match fraccion_evento_id.split_once(catalog_id::SEPARATOR) {
        Some((_, resto)) => format!("{}-{}", PREFIJO_METODOLOGIA, resto),
        None => format!("{}-{}", PREFIJO_METODOLOGIA, fraccion_evento_id),
    }
}

pub fn metodologia_nombre(nombre: &str) -> String {
    format!("Metodologia de {}", nombre)
}

/// Имя уникально среди фракций того же префикса (точное сравнение)
pub fn nombre_disponible<'a, I>(nombre: &str, existentes: I, excluir: Option<&str>) -> bool
where
    I: IntoIterator<Item = &'a FraccionEvento>,
{
    !existentes
        .into_iter()
        .filter(|f| Some(f.fraccion_evento_id.as_str()) != excluir)
        .any(|f| f.nombre == nombre)
}

/// Код, уже использованный фракциями события
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodigoDisponible {
    pub codigo: String,
    pub nombre_base: String,
    pub count: u32,
    pub ultima_fraccion: String,
}

/// Группировка фракций события по коду; вход упорядочен по id
pub fn agrupar_codigos(fracciones: &[FraccionEvento]) -> Vec<CodigoDisponible> {
    let mut codigos: BTreeMap<String, CodigoDisponible> = BTreeMap::new();
    for f in fracciones {
        if catalog_id::segment_count(&f.fraccion_evento_id) < 3 {
            continue;
        }
        let codigo = f.codigo();
        let entry = codigos
            .entry(codigo.clone())
            .or_insert_with(|| CodigoDisponible {
                codigo,
                nombre_base: f.nombre.clone(),
                count: 0,
                ultima_fraccion: String::new(),
            });
        entry.count += 1;
        entry.ultima_fraccion = f.fraccion_evento_id.clone();
    }
    codigos.into_values().collect()
}

// ============================================================================
// DTO
// ============================================================================

/// Тело POST /api/fracciones-eventos
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FraccionEventoCreateDto {
    #[serde(default)]
    pub evento_tipo_id: String,
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
}

impl FraccionEventoCreateDto {
    pub fn normalized(&self) -> Self {
        Self {
            evento_tipo_id: self.evento_tipo_id.trim().to_string(),
            codigo: self.codigo.trim().to_uppercase(),
            nombre: self.nombre.trim().to_string(),
            descripcion: self.descripcion.trim().to_string(),
        }
    }

    /// Проверки после того, как событие найдено
    pub fn validate_contenido(&self) -> Result<(), String> {
        catalog_id::validate_codigo(&self.codigo, "Codigo")?;
        if self.nombre.is_empty() {
            return Err("Nombre requerido".into());
        }
        Ok(())
    }
}

/// Тело PUT /api/fracciones-eventos/{id}
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FraccionEventoUpdateDto {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
}

impl FraccionEventoUpdateDto {
    pub fn normalized(&self) -> Self {
        Self {
            nombre: self.nombre.trim().to_string(),
            descripcion: self.descripcion.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.nombre.is_empty() {
            return Err("Nombre requerido".into());
        }
        Ok(())
    }
}

// ============================================================================
// Ответы API
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodigosResponse {
    pub success: bool,
    pub codigos: Vec<CodigoDisponible>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraccionEventoNextIdResponse {
    pub success: bool,
    pub fraccion_evento_id: String,
    pub codigo_evento: String,
    pub codigo: String,
    pub numero: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraccionEventoListItem {
    pub fraccion_evento_id: String,
    pub evento_tipo_id: String,
    pub evento_nombre: String,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub tiene_metodologia: bool,
    pub cantidad_pasos: u64,
    pub metodologia_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraccionEventoListResponse {
    pub success: bool,
    pub fracciones: Vec<FraccionEventoListItem>,
    #[serde(flatten)]
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraccionEventoView {
    pub fraccion_evento_id: String,
    pub evento_tipo_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    pub nombre: String,
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metodologia_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraccionEventoResponse {
    pub success: bool,
    pub fraccion: FraccionEventoView,
}

pub type FraccionEventoEventosResponse = crate::domain::a007_evento::aggregate::EventosResponse;

/// Короткая ссылка на событие для экранов методологий
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventoRef {
    pub evento_tipo_id: String,
    pub nombre: String,
}

impl From<EventoCatalogo> for EventoRef {
    fn from(e: EventoCatalogo) -> Self {
        Self {
            evento_tipo_id: e.evento_tipo_id,
            nombre: e.nombre,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(id: &str, nombre: &str) -> FraccionEvento {
        FraccionEvento {
            fraccion_evento_id: id.into(),
            evento_tipo_id: "EV-IN".into(),
            nombre: nombre.into(),
            descripcion: None,
        }
    }

    #[test]
    fn groups_by_third_segment() {
        let fracciones = vec![
            fe("FR-IN-DE-001", "Derrame"),
            fe("FR-IN-DE-002", "Derrame — Aceite"),
            fe("FR-IN-AG-001", "Agua"),
        ];
        let codigos = agrupar_codigos(&fracciones);
        assert_eq!(codigos.len(), 2);
        assert_eq!(codigos[0].codigo, "AG");
        assert_eq!(codigos[1].nombre_base, "Derrame");
        assert_eq!(codigos[1].count, 2);
        assert_eq!(codigos[1].ultima_fraccion, "FR-IN-DE-002");
    }

    #[test]
    fn metodologia_id_mirrors_fraccion() {
        assert_eq!(metodologia_id_para("FR-IN-DE-004"), "ME-IN-DE-004");
        assert_eq!(metodologia_nombre("Derrame"), "Metodologia de Derrame");
    }

    #[test]
    fn nombre_uniqueness_is_exact_and_can_exclude_self() {
        let fracciones = vec![fe("FR-IN-DE-001", "Derrame")];
        assert!(!nombre_disponible("Derrame", &fracciones, None));
        assert!(nombre_disponible("derrame", &fracciones, None));
        assert!(nombre_disponible("Derrame", &fracciones, Some("FR-IN-DE-001")));
    }

    #[test]
    fn evento_code_requires_two_segments() {
        assert_eq!(codigo_evento_de("EV-IN").unwrap(), "IN");
        assert_eq!(
            codigo_evento_de("EVIN").unwrap_err(),
            "Formato de evento_tipo invalido"
        );
    }
}
