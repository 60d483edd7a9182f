use serde::{Deserialize, Serialize};

use crate::domain::common::catalog_id;
use crate::domain::common::CatalogEntity;
use crate::shared::api::{glosario_nombre, GlosarioItem};
use crate::shared::paging::PageInfo;

/// Glosario fijo de grupos de herramientas
pub const GLOSARIO_HERRAMIENTAS: &[(&str, &str)] = &[
    ("AT", "ATOMIZADOR"),
    ("BA", "BASTON"),
    ("BL", "BOLSA"),
    ("BS", "BASE"),
    ("CA", "CARRITO"),
    ("CE", "CEPILLO"),
    ("CU", "CUBETA"),
    ("EO", "ESPONJA"),
    ("EP", "ESPATULA"),
    ("ES", "ESCOBA"),
    ("EX", "EXPRIMIDOR"),
    ("FI", "FIBRA"),
    ("GU", "GUANTES"),
    ("JA", "JALADOR"),
    ("MA", "MANGUERA"),
    ("MO", "MOP"),
    ("OR", "ORGANIZADOR"),
    ("PA", "PANO"),
    ("PL", "PLUMERO"),
    ("RE", "RECOGEDOR"),
    ("SE", "SENALETICA"),
    ("TO", "TOALLAS"),
    ("TP", "TOPE"),
    ("TR", "TRAPEADOR"),
];

pub const PREFIJO: &str = "HE";
pub const ESTATUS_ACTIVO: &str = "Activo";
pub const ESTATUS_INACTIVO: &str = "Inactivo";
pub const PER_PAGE_DEFAULT: u64 = 50;

/// Группа инструмента: второй сегмент id (`HE-MO-003` → `MO`)
pub fn grupo_de(herramienta_id: &str) -> String {
    if herramienta_id.contains('-') {
        catalog_id::segment(herramienta_id, 1)
            .unwrap_or_default()
            .to_string()
    } else {
        String::new()
    }
}

/// Herramienta de limpieza
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Herramienta {
    pub herramienta_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub estatus: Option<String>,
    #[serde(default)]
    pub grupo: String,
}

impl Herramienta {
    pub fn is_activa(&self) -> bool {
        self.estatus.as_deref() == Some(ESTATUS_ACTIVO)
    }
}

impl CatalogEntity for Herramienta {
    fn aggregate_index() -> &'static str {
        "a003"
    }
    fn collection_name() -> &'static str {
        "herramienta"
    }
    fn element_name() -> &'static str {
        "Herramienta"
    }
    fn list_name() -> &'static str {
        "Herramientas"
    }
}

/// Тело POST /api/herramientas
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HerramientaCreateDto {
    #[serde(default)]
    pub grupo: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
}

impl HerramientaCreateDto {
    /// Нормализация: grupo в верхнем регистре, пустое описание = nombre
    pub fn normalized(&self) -> Self {
        let nombre = self.nombre.trim().to_string();
        let descripcion = match self.descripcion.trim() {
            "" => nombre.clone(),
            d => d.to_string(),
        };
        Self {
            grupo: self.grupo.trim().to_uppercase(),
            nombre,
            descripcion,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.grupo.chars().count() != 2 {
            return Err("Grupo invalido (2 caracteres)".into());
        }
        if glosario_nombre(GLOSARIO_HERRAMIENTAS, &self.grupo).is_none() {
            return Err(format!("Grupo '{}' no valido", self.grupo));
        }
        if self.nombre.is_empty() {
            return Err("Nombre requerido".into());
        }
        Ok(())
    }
}

/// Тело PUT /api/herramientas/{id}
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HerramientaUpdateDto {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub estatus: String,
}

impl HerramientaUpdateDto {
    pub fn normalized(&self) -> Self {
        Self {
            nombre: self.nombre.trim().to_string(),
            descripcion: self.descripcion.trim().to_string(),
            estatus: self.estatus.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.nombre.is_empty() {
            return Err("Nombre requerido".into());
        }
        if self.descripcion.is_empty() {
            return Err("Descripcion requerida".into());
        }
        if self.estatus != ESTATUS_ACTIVO && self.estatus != ESTATUS_INACTIVO {
            return Err("Estatus debe ser 'Activo' o 'Inactivo'".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HerramientaCatalogos {
    pub success: bool,
    pub grupos: Vec<GlosarioItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HerramientaNextIdResponse {
    pub success: bool,
    pub herramienta_id: String,
    pub grupo: String,
    pub numero: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HerramientaListResponse {
    pub success: bool,
    pub herramientas: Vec<Herramienta>,
    #[serde(flatten)]
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HerramientaResponse {
    pub success: bool,
    pub herramienta: Herramienta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grupo_is_second_segment() {
        assert_eq!(grupo_de("HE-MO-003"), "MO");
        assert_eq!(grupo_de("LEGACY"), "");
    }

    #[test]
    fn create_defaults_descripcion_to_nombre() {
        let dto = HerramientaCreateDto {
            grupo: " mo ".into(),
            nombre: " Mop azul ".into(),
            descripcion: "".into(),
        }
        .normalized();
        assert_eq!(dto.grupo, "MO");
        assert_eq!(dto.descripcion, "Mop azul");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn create_rejects_unknown_grupo() {
        let dto = HerramientaCreateDto {
            grupo: "ZZ".into(),
            nombre: "x".into(),
            descripcion: "".into(),
        };
        assert_eq!(dto.validate().unwrap_err(), "Grupo 'ZZ' no valido");

        let dto = HerramientaCreateDto {
            grupo: "M".into(),
            ..Default::default()
        };
        assert_eq!(dto.validate().unwrap_err(), "Grupo invalido (2 caracteres)");
    }

    #[test]
    fn update_checks_estatus_case_sensitive() {
        let dto = HerramientaUpdateDto {
            nombre: "Mop".into(),
            descripcion: "Mop".into(),
            estatus: "ACTIVO".into(),
        };
        assert!(dto.validate().is_err());
        let dto = HerramientaUpdateDto {
            estatus: "Inactivo".into(),
            ..dto
        };
        assert!(dto.validate().is_ok());
    }
}
