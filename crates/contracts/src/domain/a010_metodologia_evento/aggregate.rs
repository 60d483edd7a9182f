use serde::{Deserialize, Serialize};

use crate::domain::a009_fraccion_evento::aggregate::EventoRef;
use crate::domain::common::CatalogEntity;

/// Paso de una metodología de evento
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PasoEvento {
    #[serde(default)]
    pub numero_paso: i32,
    #[serde(default)]
    pub descripcion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetodologiaEvento {
    pub metodologia_fraccion_id: String,
    pub fraccion_evento_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    #[serde(default)]
    pub pasos: Vec<PasoEvento>,
}

impl CatalogEntity for MetodologiaEvento {
    fn aggregate_index() -> &'static str {
        "a010"
    }
    fn collection_name() -> &'static str {
        "metodologia_evento"
    }
    fn element_name() -> &'static str {
        "Metodología de evento"
    }
    fn list_name() -> &'static str {
        "Metodologías de evento"
    }
}

/// Тело POST /api/metodologias-eventos/{id}/pasos
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GuardarPasosEventoDto {
    #[serde(default)]
    pub pasos: Vec<PasoEvento>,
}

impl GuardarPasosEventoDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.pasos.is_empty() {
            return Err("Debe haber al menos 1 paso".into());
        }
        if self.pasos.iter().any(|p| p.descripcion.trim().is_empty()) {
            return Err("Todos los pasos deben tener descripcion".into());
        }
        Ok(())
    }

    /// Шаги с обрезанным текстом, упорядоченные и пронумерованные с 1
    pub fn normalized(&self) -> Vec<PasoEvento> {
        let mut pasos: Vec<PasoEvento> = self
            .pasos
            .iter()
            .map(|p| PasoEvento {
                numero_paso: p.numero_paso,
                descripcion: p.descripcion.trim().to_string(),
            })
            .collect();
        pasos.sort_by_key(|p| p.numero_paso);
        for (i, paso) in pasos.iter_mut().enumerate() {
            paso.numero_paso = i as i32 + 1;
        }
        pasos
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraccionEventoRef {
    pub fraccion_evento_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub evento_tipo_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetodologiaEventoResponse {
    pub success: bool,
    pub metodologia: MetodologiaEvento,
    pub fraccion: Option<FraccionEventoRef>,
    pub evento: Option<EventoRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardarPasosEventoResponse {
    pub success: bool,
    pub metodologia_fraccion_id: String,
    pub total_pasos: usize,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pasos_need_descripcion() {
        assert_eq!(
            GuardarPasosEventoDto::default().validate().unwrap_err(),
            "Debe haber al menos 1 paso"
        );
        let dto = GuardarPasosEventoDto {
            pasos: vec![PasoEvento { numero_paso: 1, descripcion: " ".into() }],
        };
        assert_eq!(
            dto.validate().unwrap_err(),
            "Todos los pasos deben tener descripcion"
        );
    }

    #[test]
    fn normalized_sorts_and_renumbers() {
        let dto = GuardarPasosEventoDto {
            pasos: vec![
                PasoEvento { numero_paso: 7, descripcion: " Secar ".into() },
                PasoEvento { numero_paso: 3, descripcion: "Aislar".into() },
            ],
        };
        assert_eq!(
            dto.normalized(),
            vec![
                PasoEvento { numero_paso: 1, descripcion: "Aislar".into() },
                PasoEvento { numero_paso: 2, descripcion: "Secar".into() },
            ]
        );
    }
}
