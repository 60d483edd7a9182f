use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::a001_area::aggregate::{AreaOption, SubAreaOption};
use crate::domain::common::catalog_id;
use crate::domain::common::CatalogEntity;
use crate::shared::paging::PageInfo;

// ============================================================================
// Справочные данные
// ============================================================================

/// Nombres de elemento disponibles en el sistema
pub const NOMBRES_DISPONIBLES: &[&str] = &[
    "A/C", "ACCESO", "ACCESORIO", "ARCHIVERO", "BANCO", "BANQUILLO", "BASCULA", "BASE",
    "BORDE", "CAMILLA", "CESTO", "CHAPA", "CUADRO", "DETECTOR", "ESCRITORIO", "ESPEJO",
    "EXTINTOR", "GABINETE", "LAMPARA", "LAVABO", "LIBRERO", "LUZ", "MESA", "MICROONDAS",
    "MUEBLE", "PARED", "PERCHERO", "PROYECCION", "PROYECTOR", "PUERTA", "REFRIGERADOR",
    "SANITARIO", "SENALETICA", "SILLA", "SOFA", "TELEVISION", "TUBERIA", "VIGA", "REPISA",
    "LOCKER", "BARANDAL",
];

/// Código de dos letras por nombre (BORDE se resuelve aparte)
pub const CODIGOS_ELEMENTO: &[(&str, &str)] = &[
    ("A/C", "AR"), ("ACCESO", "AE"), ("ACCESORIO", "AC"), ("ARCHIVERO", "AH"),
    ("BANCO", "BA"), ("BANQUILLO", "BN"), ("BASCULA", "BC"), ("BASE", "BS"),
    ("CAMILLA", "CA"), ("CESTO", "CE"), ("CHAPA", "CH"), ("CUADRO", "CU"),
    ("DETECTOR", "DE"), ("ESCRITORIO", "EC"), ("ESPEJO", "ES"), ("EXTINTOR", "EX"),
    ("GABINETE", "GE"), ("LAMPARA", "LM"), ("LAVABO", "LA"), ("LIBRERO", "LI"),
    ("LUZ", "LZ"), ("MESA", "ME"), ("MICROONDAS", "MI"), ("MUEBLE", "MU"),
    ("PARED", "PR"), ("PERCHERO", "PE"), ("PROYECCION", "PO"), ("PROYECTOR", "PY"),
    ("PUERTA", "PU"), ("REFRIGERADOR", "RE"), ("SANITARIO", "SA"), ("SENALETICA", "SE"),
    ("SILLA", "SI"), ("SOFA", "SO"), ("TELEVISION", "TV"), ("TUBERIA", "TU"),
    ("VIGA", "VG"), ("REPISA", "RP"), ("LOCKER", "LO"), ("BARANDAL", "BR"),
];

pub const PREFIJO: &str = "EL";
pub const ESTATUS_ACTIVO: &str = "ACTIVO";
pub const ESTATUS_INACTIVO: &str = "INACTIVO";
pub const PER_PAGE_DEFAULT: u64 = 20;

/// Nombres ordenados alfabéticamente para el catálogo
pub fn grupos_ordenados() -> Vec<String> {
    let mut grupos: Vec<String> = NOMBRES_DISPONIBLES.iter().map(|s| s.to_string()).collect();
    grupos.sort();
    grupos
}

/// Código de dos letras para el id del elemento.
///
/// BORDE depende de la descripción: `BP` para bordes de puerta, `BO` en otro caso.
/// Nombres desconocidos usan sus dos primeras letras.
pub fn codigo_elemento(nombre: &str, descripcion: &str) -> String {
    if nombre == "BORDE" {
        return if descripcion.to_lowercase().contains("puerta") {
            "BP".to_string()
        } else {
            "BO".to_string()
        };
    }
    if let Some((_, codigo)) = CODIGOS_ELEMENTO.iter().find(|(n, _)| *n == nombre) {
        return codigo.to_string();
    }
    nombre.chars().take(2).collect::<String>().to_uppercase()
}

/// Prefijo del id, p. ej. `["EL", "ME"]`
pub fn prefijo_id(codigo: &str) -> [&str; 2] {
    [PREFIJO, codigo]
}

/// Siguiente id `EL-{codigo}-NNN` según los ids existentes
pub fn next_elemento_id<'a, I>(codigo: &str, existentes: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    catalog_id::next_id(&prefijo_id(codigo), existentes).0
}

// ============================================================================
// Aggregate
// ============================================================================

/// Elemento físico de una subárea
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elemento {
    pub elemento_id: String,
    pub subarea_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub cantidad: Option<f64>,
    pub estatus: Option<String>,
}

impl CatalogEntity for Elemento {
    fn aggregate_index() -> &'static str {
        "a002"
    }
    fn collection_name() -> &'static str {
        "elemento"
    }
    fn element_name() -> &'static str {
        "Elemento"
    }
    fn list_name() -> &'static str {
        "Elementos"
    }
}

/// Строка списка с названиями подзоны и зоны
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementoListItem {
    pub elemento_id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub cantidad: Option<f64>,
    pub estatus: Option<String>,
    pub subarea_id: String,
    pub subarea_nombre: String,
    pub area_id: String,
    pub area_nombre: String,
}

// ============================================================================
// DTO
// ============================================================================

/// Тело POST /api/elementos
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ElementoCreateDto {
    #[serde(default)]
    pub subarea_id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub cantidad: Option<f64>,
}

impl ElementoCreateDto {
    /// Валидация обязательных полей и количества
    pub fn validate(&self) -> Result<f64, String> {
        for (campo, valor) in [
            ("subarea_id", &self.subarea_id),
            ("nombre", &self.nombre),
            ("descripcion", &self.descripcion),
        ] {
            if valor.trim().is_empty() {
                return Err(format!("Campo requerido: {}", campo));
            }
        }
        let cantidad = match self.cantidad {
            None => return Err("Campo requerido: cantidad".into()),
            Some(c) if c == 0.0 => return Err("Campo requerido: cantidad".into()),
            Some(c) => c,
        };
        validate_cantidad(cantidad)?;
        Ok(cantidad)
    }
}

pub fn validate_cantidad(cantidad: f64) -> Result<(), String> {
    if !cantidad.is_finite() || cantidad < 1.0 {
        return Err("La cantidad debe ser un numero mayor o igual a 1".into());
    }
    Ok(())
}

/// Изменение элемента: редактируются только cantidad и estatus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ElementoUpdateDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cantidad: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estatus: Option<String>,
}

impl ElementoUpdateDto {
    /// Разбор тела PUT: неизвестные ключи отклоняются, estatus приводится к верхнему регистру
    pub fn from_json(body: &serde_json::Map<String, serde_json::Value>) -> Result<Self, String> {
        const ALLOWED: [&str; 2] = ["cantidad", "estatus"];
        if let Some(campo) = body.keys().find(|k| !ALLOWED.contains(&k.as_str())) {
            return Err(format!("Campo no editable: {}", campo));
        }

        let mut dto = Self::default();
        if let Some(value) = body.get("cantidad") {
            let cantidad = value
                .as_f64()
                .ok_or_else(|| "La cantidad debe ser un numero mayor o igual a 1".to_string())?;
            validate_cantidad(cantidad)?;
            dto.cantidad = Some(cantidad);
        }
        if let Some(value) = body.get("estatus") {
            let estatus = value.as_str().unwrap_or_default().trim().to_uppercase();
            if estatus != ESTATUS_ACTIVO && estatus != ESTATUS_INACTIVO {
                return Err("Estatus debe ser ACTIVO o INACTIVO".into());
            }
            dto.estatus = Some(estatus);
        }
        Ok(dto)
    }
}

// ============================================================================
// Ответы API
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementoCatalogos {
    pub success: bool,
    pub areas: Vec<AreaOption>,
    pub subareas: Vec<SubAreaOption>,
    pub grupos: Vec<String>,
    pub descripciones_por_grupo: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementoListResponse {
    pub success: bool,
    pub elementos: Vec<ElementoListItem>,
    #[serde(flatten)]
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementoNextIdResponse {
    pub success: bool,
    pub next_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementoResponse {
    pub success: bool,
    pub message: String,
    pub elemento: Elemento,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn codigo_from_table() {
        assert_eq!(codigo_elemento("A/C", "split"), "AR");
        assert_eq!(codigo_elemento("ESCRITORIO", "madera"), "EC");
        assert_eq!(codigo_elemento("LUZ", ""), "LZ");
    }

    #[test]
    fn borde_depends_on_descripcion() {
        assert_eq!(codigo_elemento("BORDE", "Borde de PUERTA principal"), "BP");
        assert_eq!(codigo_elemento("BORDE", "Borde de ventana"), "BO");
    }

    #[test]
    fn unknown_nombre_uses_first_two_chars() {
        assert_eq!(codigo_elemento("tapete", "entrada"), "TA");
    }

    #[test]
    fn next_id_after_max_suffix() {
        let existentes = ["EL-ME-001", "EL-ME-004", "EL-ME-002"];
        assert_eq!(next_elemento_id("ME", existentes.iter().copied()), "EL-ME-005");
        assert_eq!(next_elemento_id("SI", std::iter::empty()), "EL-SI-001");
    }

    #[test]
    fn grupos_are_sorted_and_complete() {
        let grupos = grupos_ordenados();
        assert_eq!(grupos.len(), NOMBRES_DISPONIBLES.len());
        assert_eq!(grupos.first().map(String::as_str), Some("A/C"));
        assert!(grupos.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn create_requires_fields_and_cantidad() {
        let mut dto = ElementoCreateDto {
            subarea_id: "SA-01".into(),
            nombre: "mesa".into(),
            descripcion: "Mesa de juntas".into(),
            cantidad: Some(2.0),
        };
        assert_eq!(dto.validate(), Ok(2.0));

        dto.cantidad = Some(0.5);
        assert_eq!(
            dto.validate().unwrap_err(),
            "La cantidad debe ser un numero mayor o igual a 1"
        );

        dto.cantidad = None;
        assert_eq!(dto.validate().unwrap_err(), "Campo requerido: cantidad");

        dto.descripcion = "  ".into();
        assert_eq!(dto.validate().unwrap_err(), "Campo requerido: descripcion");
    }

    #[test]
    fn update_rejects_foreign_fields() {
        let body = json!({"nombre": "SILLA"});
        let err = ElementoUpdateDto::from_json(body.as_object().unwrap()).unwrap_err();
        assert_eq!(err, "Campo no editable: nombre");
    }

    #[test]
    fn update_normalizes_estatus() {
        let body = json!({"estatus": "inactivo", "cantidad": 3});
        let dto = ElementoUpdateDto::from_json(body.as_object().unwrap()).unwrap();
        assert_eq!(dto.estatus.as_deref(), Some("INACTIVO"));
        assert_eq!(dto.cantidad, Some(3.0));

        let body = json!({"estatus": "roto"});
        assert!(ElementoUpdateDto::from_json(body.as_object().unwrap()).is_err());

        let body = json!({"cantidad": "tres"});
        assert!(ElementoUpdateDto::from_json(body.as_object().unwrap()).is_err());
    }
}
