use serde::{Deserialize, Serialize};

use crate::domain::common::catalog_id;
use crate::domain::common::CatalogEntity;

/// Tipo de evento no programado (`EV-IN`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventoCatalogo {
    pub evento_tipo_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
}

impl EventoCatalogo {
    pub fn codigo(&self) -> Option<&str> {
        codigo_evento(&self.evento_tipo_id)
    }
}

impl CatalogEntity for EventoCatalogo {
    fn aggregate_index() -> &'static str {
        "a007"
    }
    fn collection_name() -> &'static str {
        "evento_catalogo"
    }
    fn element_name() -> &'static str {
        "Evento"
    }
    fn list_name() -> &'static str {
        "Eventos"
    }
}

/// Caso concreto de un evento (`CA-IN-DE`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasoCatalogo {
    pub caso_id: String,
    pub evento_tipo_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
}

impl CasoCatalogo {
    pub fn codigo(&self) -> Option<&str> {
        codigo_caso(&self.caso_id)
    }
}

/// Код события: `EV-IN` → `IN`
pub fn codigo_evento(evento_tipo_id: &str) -> Option<&str> {
    if catalog_id::segment_count(evento_tipo_id) < 2 {
        return None;
    }
    catalog_id::segment(evento_tipo_id, 1)
}

/// Код случая: `CA-IN-DE` → `DE`
pub fn codigo_caso(caso_id: &str) -> Option<&str> {
    if catalog_id::segment_count(caso_id) < 3 {
        return None;
    }
    catalog_id::segment(caso_id, 2)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventosResponse {
    pub success: bool,
    pub eventos: Vec<EventoCatalogo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasosResponse {
    pub success: bool,
    pub casos: Vec<CasoCatalogo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_come_from_segments() {
        assert_eq!(codigo_evento("EV-IN"), Some("IN"));
        assert_eq!(codigo_evento("EVIN"), None);
        assert_eq!(codigo_caso("CA-IN-DE"), Some("DE"));
        assert_eq!(codigo_caso("CA-IN"), None);
    }
}
