use serde::{Deserialize, Serialize};

use crate::domain::common::CatalogEntity;

/// Área del inmueble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub area_id: String,
    pub area_nombre: String,
    pub orden_area: i32,
}

/// Subárea dentro de un área
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubArea {
    pub subarea_id: String,
    pub area_id: String,
    pub subarea_nombre: String,
    pub orden_subarea: i32,
}

/// Área para listas desplegables `{area_id, nombre}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaOption {
    pub area_id: String,
    pub nombre: String,
}

/// Subárea para listas desplegables con nombre de su área
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAreaOption {
    pub subarea_id: String,
    pub nombre: String,
    pub area_id: String,
    pub area_nombre: String,
}

impl CatalogEntity for Area {
    fn aggregate_index() -> &'static str {
        "a001"
    }
    fn collection_name() -> &'static str {
        "area"
    }
    fn element_name() -> &'static str {
        "Área"
    }
    fn list_name() -> &'static str {
        "Áreas"
    }
}
