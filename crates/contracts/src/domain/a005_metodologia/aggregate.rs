use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::common::catalog_id;
use crate::domain::common::CatalogEntity;
use crate::domain::common::NivelLimpieza;

pub const PREFIJO: &str = "MB";

/// Идентификатор базовой методологии: `FR-TL-002` + Media → `MB-TL-002-M`
pub fn metodologia_base_id(fraccion_id: &str, nivel: NivelLimpieza) -> Result<String, String> {
    if catalog_id::segment_count(fraccion_id) != 3 {
        return Err("Formato de fraccion_id invalido".into());
    }
    let codigo = catalog_id::segment(fraccion_id, 1).unwrap_or_default();
    let numero = catalog_id::segment(fraccion_id, 2).unwrap_or_default();
    Ok(format!("{}-{}-{}-{}", PREFIJO, codigo, numero, nivel.letra()))
}

/// Имя методологии: `"{base}-{letra}"`
pub fn metodologia_nombre(fraccion_nombre: &str, nivel: NivelLimpieza) -> String {
    format!("{}-{}", fraccion_nombre, nivel.letra())
}

/// Paso de una metodología base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Paso {
    #[serde(default)]
    pub orden: i32,
    #[serde(default)]
    pub instruccion: String,
}

/// Metodología base de una fracción para un nivel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetodologiaBase {
    pub metodologia_base_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    #[serde(default)]
    pub pasos: Vec<Paso>,
}

impl CatalogEntity for MetodologiaBase {
    fn aggregate_index() -> &'static str {
        "a005"
    }
    fn collection_name() -> &'static str {
        "metodologia_base"
    }
    fn element_name() -> &'static str {
        "Metodología"
    }
    fn list_name() -> &'static str {
        "Metodologías"
    }
}

/// Тело POST /api/fracciones/{id}/metodologias/{nivel}
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GuardarPasosDto {
    #[serde(default)]
    pub pasos: Vec<Paso>,
}

impl GuardarPasosDto {
    /// Шаги с обрезанными инструкциями, перенумерованные по порядку
    pub fn normalized(&self) -> Vec<Paso> {
        let mut pasos: Vec<Paso> = self
            .pasos
            .iter()
            .map(|p| Paso {
                orden: p.orden,
                instruccion: p.instruccion.trim().to_string(),
            })
            .collect();
        pasos.sort_by_key(|p| p.orden);
        for (i, paso) in pasos.iter_mut().enumerate() {
            paso.orden = i as i32 + 1;
        }
        pasos
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.pasos.is_empty() {
            return Err("Debe haber al menos 1 paso".into());
        }
        if self.pasos.iter().any(|p| p.instruccion.trim().is_empty()) {
            return Err("Todos los pasos deben tener instruccion".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraccionResumen {
    pub fraccion_id: String,
    pub fraccion_nombre: String,
    pub nombre_custom: Option<String>,
    pub nombre_full: String,
    pub codigo: String,
}

/// Ответ GET /api/fracciones/{id}/metodologias; ключи `"1".."4"`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraccionMetodologias {
    pub success: bool,
    pub fraccion: FraccionResumen,
    pub metodologias: BTreeMap<String, Option<MetodologiaBase>>,
}

impl FraccionMetodologias {
    pub fn nivel(&self, nivel: NivelLimpieza) -> Option<&MetodologiaBase> {
        self.metodologias
            .get(&nivel.id().to_string())
            .and_then(|m| m.as_ref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardarPasosResponse {
    pub success: bool,
    pub metodologia_base_id: String,
    pub total_pasos: usize,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_id_uses_codigo_numero_and_letter() {
        assert_eq!(
            metodologia_base_id("FR-TL-002", NivelLimpieza::Media).unwrap(),
            "MB-TL-002-M"
        );
        assert_eq!(
            metodologia_base_id("FR-TL", NivelLimpieza::Basica).unwrap_err(),
            "Formato de fraccion_id invalido"
        );
    }

    #[test]
    fn pasos_require_text() {
        let dto = GuardarPasosDto::default();
        assert_eq!(dto.validate().unwrap_err(), "Debe haber al menos 1 paso");

        let dto = GuardarPasosDto {
            pasos: vec![
                Paso { orden: 1, instruccion: "Barrer".into() },
                Paso { orden: 2, instruccion: "   ".into() },
            ],
        };
        assert_eq!(
            dto.validate().unwrap_err(),
            "Todos los pasos deben tener instruccion"
        );
    }

    #[test]
    fn normalized_renumbers_in_order() {
        let dto = GuardarPasosDto {
            pasos: vec![
                Paso { orden: 5, instruccion: " segundo ".into() },
                Paso { orden: 2, instruccion: "primero".into() },
            ],
        };
        let pasos = dto.normalized();
        assert_eq!(pasos[0], Paso { orden: 1, instruccion: "primero".into() });
        assert_eq!(pasos[1], Paso { orden: 2, instruccion: "segundo".into() });
    }
}
