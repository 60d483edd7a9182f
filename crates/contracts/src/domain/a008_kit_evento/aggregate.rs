use serde::{Deserialize, Serialize};

use crate::domain::a006_kit::aggregate::{KitHerramienta, PREFIJO};
use crate::domain::a007_evento::aggregate::codigo_caso;
use crate::domain::common::catalog_id;
use crate::shared::paging::PageInfo;

/// Сегмент, отличающий киты событий: `KT-EV-DE-001`
pub const SEGMENTO_EVENTO: &str = "EV";

/// Префикс идентификатора кита события для кода случая
pub fn prefijo_kit_evento(codigo_caso: &str) -> [String; 3] {
    [
        PREFIJO.to_string(),
        SEGMENTO_EVENTO.to_string(),
        codigo_caso.to_string(),
    ]
}

/// Код случая из caso_id с проверкой формата
pub fn codigo_desde_caso(caso_id: &str) -> Result<String, String> {
    let caso_id = caso_id.trim();
    if caso_id.is_empty() {
        return Err("caso_id requerido".into());
    }
    let codigo = codigo_caso(caso_id).ok_or_else(|| "Formato de caso_id invalido".to_string())?;
    catalog_id::validate_codigo(codigo, "Codigo")?;
    Ok(codigo.to_string())
}

/// Тело POST /api/kits-eventos
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KitEventoCreateDto {
    #[serde(default)]
    pub caso_id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub herramientas: Vec<String>,
}

impl KitEventoCreateDto {
    pub fn normalized(&self) -> Self {
        Self {
            caso_id: self.caso_id.trim().to_string(),
            nombre: self.nombre.trim().to_string(),
            herramientas: self.herramientas.clone(),
        }
    }

    pub fn validate_contenido(&self) -> Result<(), String> {
        if self.nombre.is_empty() {
            return Err("Nombre requerido".into());
        }
        if self.herramientas.is_empty() {
            return Err("Debe seleccionar al menos 1 herramienta".into());
        }
        Ok(())
    }
}

/// Тело PUT /api/kits-eventos/{id}
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KitEventoUpdateDto {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub herramientas: Vec<String>,
}

impl KitEventoUpdateDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.nombre.trim().is_empty() {
            return Err("Nombre requerido".into());
        }
        if self.herramientas.is_empty() {
            return Err("Debe tener al menos 1 herramienta".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitEventoListItem {
    pub kit_id: String,
    pub caso_id: Option<String>,
    pub caso_nombre: String,
    pub evento_tipo_id: String,
    pub evento_nombre: String,
    pub nombre: String,
    pub tipo_kit: String,
    pub herramientas: Vec<KitHerramienta>,
    pub cantidad_herramientas: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitEventoListResponse {
    pub success: bool,
    pub kits: Vec<KitEventoListItem>,
    #[serde(flatten)]
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitEventoView {
    pub kit_id: String,
    pub caso_id: Option<String>,
    pub nombre: String,
    pub herramientas: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitEventoResponse {
    pub success: bool,
    pub kit: KitEventoView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codigo_desde_caso_checks_shape() {
        assert_eq!(codigo_desde_caso("CA-IN-DE").unwrap(), "DE");
        assert_eq!(codigo_desde_caso(" ").unwrap_err(), "caso_id requerido");
        assert_eq!(
            codigo_desde_caso("CA-IN").unwrap_err(),
            "Formato de caso_id invalido"
        );
        assert_eq!(
            codigo_desde_caso("CA-IN-DEX").unwrap_err(),
            "Codigo debe tener 2 caracteres"
        );
    }

    #[test]
    fn prefijo_has_three_segments() {
        assert_eq!(prefijo_kit_evento("DE").join("-"), "KT-EV-DE");
    }

    #[test]
    fn create_requires_nombre_then_herramientas() {
        let dto = KitEventoCreateDto {
            caso_id: "CA-IN-DE".into(),
            ..Default::default()
        };
        assert_eq!(dto.validate_contenido().unwrap_err(), "Nombre requerido");
        let dto = KitEventoCreateDto {
            nombre: "Kit derrame".into(),
            ..dto
        };
        assert_eq!(
            dto.validate_contenido().unwrap_err(),
            "Debe seleccionar al menos 1 herramienta"
        );
    }
}
