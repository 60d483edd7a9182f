use serde::{Deserialize, Serialize};

use crate::domain::common::catalog_id;
use crate::domain::common::{CatalogEntity, NivelLimpieza};
use crate::shared::paging::PageInfo;

pub const PREFIJO: &str = "KT";
pub const PER_PAGE_DEFAULT: u64 = 50;

/// Значение фильтра `nivel`, означающее «без уровня»
pub const NIVEL_GENERAL: &str = "general";

/// Тип набора инструментов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoKit {
    Sop,
    Evento,
}

impl TipoKit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoKit::Sop => "sop",
            TipoKit::Evento => "evento",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "sop" => Some(TipoKit::Sop),
            "evento" => Some(TipoKit::Evento),
            _ => None,
        }
    }
}

/// Код кита: второй сегмент id (`KT-TL-001` → `TL`)
pub fn codigo_de(kit_id: &str) -> String {
    if kit_id.contains('-') {
        catalog_id::segment(kit_id, 1)
            .unwrap_or_default()
            .to_string()
    } else {
        String::new()
    }
}

/// Проверка уровня: `None` допустим (kit general)
pub fn validate_nivel(nivel: Option<i32>) -> Result<(), String> {
    match nivel {
        Some(n) if NivelLimpieza::from_id(n).is_none() => {
            Err("Nivel debe ser 1, 2, 3, 4 o null".into())
        }
        _ => Ok(()),
    }
}

/// Kit de herramientas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kit {
    pub kit_id: String,
    pub fraccion_id: Option<String>,
    pub nivel_limpieza_id: Option<i32>,
    pub nombre: String,
    pub tipo_kit: String,
    pub caso_id: Option<String>,
}

impl Kit {
    pub fn tipo(&self) -> Option<TipoKit> {
        TipoKit::from_str(&self.tipo_kit)
    }
}

impl CatalogEntity for Kit {
    fn aggregate_index() -> &'static str {
        "a006"
    }
    fn collection_name() -> &'static str {
        "kit"
    }
    fn element_name() -> &'static str {
        "Kit"
    }
    fn list_name() -> &'static str {
        "Kits"
    }
}

/// Herramienta dentro de un kit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitHerramienta {
    pub herramienta_id: String,
    pub nombre: String,
    pub nota: Option<String>,
}

/// Herramienta activa para el checklist del formulario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HerramientaDisponible {
    pub herramienta_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub grupo: String,
}

/// Тело POST /api/kits
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KitCreateDto {
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub fraccion_id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub nivel_limpieza_id: Option<i32>,
    #[serde(default)]
    pub herramientas: Vec<String>,
}

impl KitCreateDto {
    pub fn normalized(&self) -> Self {
        Self {
            codigo: self.codigo.trim().to_uppercase(),
            fraccion_id: self.fraccion_id.trim().to_string(),
            nombre: self.nombre.trim().to_string(),
            nivel_limpieza_id: self.nivel_limpieza_id,
            herramientas: self.herramientas.clone(),
        }
    }

    /// Проверка полей формы; существование фракции и инструментов проверяет сервис
    pub fn validate(&self) -> Result<(), String> {
        if self.codigo.is_empty() || self.fraccion_id.is_empty() {
            return Err("Codigo y fraccion requeridos".into());
        }
        catalog_id::validate_codigo(&self.codigo, "Codigo")
    }

    pub fn validate_contenido(&self) -> Result<(), String> {
        if self.nombre.is_empty() {
            return Err("Nombre requerido".into());
        }
        validate_nivel(self.nivel_limpieza_id)?;
        if self.herramientas.is_empty() {
            return Err("Debe seleccionar al menos 1 herramienta".into());
        }
        Ok(())
    }
}

/// Тело PUT /api/kits/{id}
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KitUpdateDto {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub nivel_limpieza_id: Option<i32>,
    #[serde(default)]
    pub herramientas: Vec<String>,
}

impl KitUpdateDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.nombre.trim().is_empty() {
            return Err("Nombre requerido".into());
        }
        validate_nivel(self.nivel_limpieza_id)?;
        if self.herramientas.is_empty() {
            return Err("Debe tener al menos 1 herramienta".into());
        }
        Ok(())
    }
}

// ============================================================================
// Ответы API
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitListItem {
    pub kit_id: String,
    pub fraccion_id: Option<String>,
    pub nivel_limpieza_id: Option<i32>,
    pub nombre: String,
    pub tipo_kit: String,
    pub codigo: String,
    pub herramientas: Vec<KitHerramienta>,
    pub cantidad_herramientas: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitListResponse {
    pub success: bool,
    pub kits: Vec<KitListItem>,
    #[serde(flatten)]
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitNextIdResponse {
    pub success: bool,
    pub kit_id: String,
    pub codigo: String,
    pub numero: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitView {
    pub kit_id: String,
    pub fraccion_id: Option<String>,
    pub nivel_limpieza_id: Option<i32>,
    pub nombre: String,
    pub herramientas: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitResponse {
    pub success: bool,
    pub kit: KitView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitFraccionesResponse {
    pub success: bool,
    pub fracciones: Vec<crate::domain::a004_fraccion::aggregate::FraccionOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitHerramientasResponse {
    pub success: bool,
    pub herramientas: Vec<HerramientaDisponible>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nivel_accepts_null_and_known_levels() {
        assert!(validate_nivel(None).is_ok());
        assert!(validate_nivel(Some(4)).is_ok());
        assert_eq!(
            validate_nivel(Some(0)).unwrap_err(),
            "Nivel debe ser 1, 2, 3, 4 o null"
        );
    }

    #[test]
    fn create_requires_codigo_and_fraccion() {
        let dto = KitCreateDto {
            codigo: " tl ".into(),
            ..Default::default()
        }
        .normalized();
        assert_eq!(dto.codigo, "TL");
        assert_eq!(dto.validate().unwrap_err(), "Codigo y fraccion requeridos");
    }

    #[test]
    fn create_requires_herramientas() {
        let dto = KitCreateDto {
            codigo: "TL".into(),
            fraccion_id: "FR-TL-001".into(),
            nombre: "Kit bano".into(),
            nivel_limpieza_id: Some(2),
            herramientas: vec![],
        };
        assert!(dto.validate().is_ok());
        assert_eq!(
            dto.validate_contenido().unwrap_err(),
            "Debe seleccionar al menos 1 herramienta"
        );
    }

    #[test]
    fn update_message_differs_from_create() {
        let dto = KitUpdateDto {
            nombre: "Kit".into(),
            ..Default::default()
        };
        assert_eq!(dto.validate().unwrap_err(), "Debe tener al menos 1 herramienta");
    }

    #[test]
    fn tipo_kit_round_trips_as_lowercase() {
        assert_eq!(serde_json::to_string(&TipoKit::Evento).unwrap(), "\"evento\"");
        assert_eq!(TipoKit::from_str("sop"), Some(TipoKit::Sop));
        assert_eq!(codigo_de("KT-EV-DE-001"), "EV");
    }
}
