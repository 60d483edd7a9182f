use serde::{Deserialize, Serialize};

use crate::domain::common::catalog_id;
use crate::domain::common::CatalogEntity;
use crate::shared::api::{glosario_nombre, GlosarioItem};
use crate::shared::paging::PageInfo;

// ============================================================================
// Глоссарий
// ============================================================================

/// Glosario de fracciones: código → nombre base
pub const GLOSARIO_FRACCIONES: &[(&str, &str)] = &[
    ("SE", "Colocar Senaletica"),
    ("BS", "Sacar Basura"),
    ("SP", "Sacudir Superficies"),
    ("VI", "Limpiar Vidrios"),
    ("BA", "Barrer"),
    ("TL", "Tallar Bano"),
    ("CN", "Reabastecer Consumibles"),
    ("SA", "Sacudir Elementos"),
    ("TA", "Lavar Trastes"),
    ("AC", "Acomodar Trastes"),
    ("MS", "Mop Seco"),
    ("MH", "Mop Humedo"),
    ("TR", "Trapear"),
];

/// Grupos de fracciones permitidos
pub const GRUPOS_FRACCIONES: [&str; 2] = ["administracion", "produccion"];

pub const PREFIJO: &str = "FR";
pub const PER_PAGE_DEFAULT: u64 = 50;

pub fn nombre_base(codigo: &str) -> Option<&'static str> {
    glosario_nombre(GLOSARIO_FRACCIONES, codigo)
}

/// Код фракции: второй сегмент id (`FR-TL-002` → `TL`)
pub fn codigo_de(fraccion_id: &str) -> String {
    if fraccion_id.contains('-') {
        catalog_id::segment(fraccion_id, 1)
            .unwrap_or_default()
            .to_string()
    } else {
        String::new()
    }
}

/// Полное имя, которое хранит и возвращает сервер: `"Barrer - Pasillos"`
pub fn nombre_full(base: &str, custom: Option<&str>) -> String {
    match custom.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => format!("{} - {}", base, c),
        None => base.to_string(),
    }
}

/// Предпросмотр имени в форме: `"Barrer — Pasillos"`
pub fn nombre_preview(base: &str, custom: &str) -> String {
    match custom.trim() {
        "" => base.to_string(),
        c => format!("{} — {}", base, c),
    }
}

/// Правило для nombre_custom.
///
/// Первая фракция кода не имеет custom; последующие обязаны иметь custom,
/// отличный от базового имени и уникальный среди соседей (без учёта регистра).
pub fn validate_custom(
    es_primera: bool,
    custom: Option<&str>,
    base: &str,
    customs_existentes: &[String],
) -> Result<(), String> {
    let custom = custom.map(str::trim).filter(|c| !c.is_empty());
    if es_primera {
        if custom.is_some() {
            return Err("La primera fraccion no debe tener nombre custom".into());
        }
        return Ok(());
    }
    let Some(custom) = custom else {
        return Err("Este codigo ya existe. Debes agregar un nombre custom".into());
    };
    if custom.to_uppercase() == base.to_uppercase() {
        return Err("El nombre custom no puede ser igual al nombre base".into());
    }
    if customs_existentes
        .iter()
        .any(|c| c.trim().to_uppercase() == custom.to_uppercase())
    {
        return Err(format!("Ya existe otra fraccion con el custom '{}'", custom));
    }
    Ok(())
}

/// Первая фракция кода (`FR-xx-001`) идёт без nombre_custom
pub fn es_primera_id(fraccion_id: &str) -> bool {
    catalog_id::numero(fraccion_id, 3) == Some(1)
}

/// Custom соседей при редактировании: список без собственного значения фракции
pub fn customs_sin_propio(customs: &[String], propio: Option<&str>) -> Vec<String> {
    let mut restantes = customs.to_vec();
    if let Some(propio) = propio.map(str::trim).filter(|p| !p.is_empty()) {
        let propio = propio.to_uppercase();
        if let Some(pos) = restantes
            .iter()
            .position(|c| c.trim().to_uppercase() == propio)
        {
            restantes.remove(pos);
        }
    }
    restantes
}

pub fn validate_grupo(grupo: Option<&str>) -> Result<(), String> {
    match grupo {
        Some(g) if !GRUPOS_FRACCIONES.contains(&g) => {
            Err("Grupo debe ser 'administracion' o 'produccion'".into())
        }
        _ => Ok(()),
    }
}

fn non_empty(value: &str) -> Option<String> {
    match value.trim() {
        "" => None,
        v => Some(v.to_string()),
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Fracción: tarea de limpieza tipificada por el glosario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fraccion {
    pub fraccion_id: String,
    pub fraccion_nombre: String,
    pub nombre_custom: Option<String>,
    pub nota_tecnica: Option<String>,
    pub grupo_fracciones: Option<String>,
}

impl Fraccion {
    pub fn codigo(&self) -> String {
        codigo_de(&self.fraccion_id)
    }

    pub fn nombre_full(&self) -> String {
        nombre_full(&self.fraccion_nombre, self.nombre_custom.as_deref())
    }
}

impl CatalogEntity for Fraccion {
    fn aggregate_index() -> &'static str {
        "a004"
    }
    fn collection_name() -> &'static str {
        "fraccion"
    }
    fn element_name() -> &'static str {
        "Fracción"
    }
    fn list_name() -> &'static str {
        "Fracciones"
    }
}

// ============================================================================
// DTO
// ============================================================================

/// Тело POST /api/fracciones
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FraccionCreateDto {
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub nombre_custom: String,
    #[serde(default)]
    pub nota_tecnica: String,
    #[serde(default)]
    pub grupo_fracciones: String,
}

impl FraccionCreateDto {
    pub fn codigo(&self) -> String {
        self.codigo.trim().to_uppercase()
    }
    pub fn nombre_custom(&self) -> Option<String> {
        non_empty(&self.nombre_custom)
    }
    pub fn nota_tecnica(&self) -> Option<String> {
        non_empty(&self.nota_tecnica)
    }
    pub fn grupo_fracciones(&self) -> Option<String> {
        non_empty(&self.grupo_fracciones)
    }

    /// Проверки, не требующие БД; возвращает базовое имя кода
    pub fn validate(&self) -> Result<&'static str, String> {
        let codigo = self.codigo();
        if codigo.chars().count() != 2 {
            return Err("Codigo invalido (2 caracteres)".into());
        }
        let base = nombre_base(&codigo).ok_or_else(|| format!("Codigo '{}' no valido", codigo))?;
        validate_grupo(self.grupo_fracciones().as_deref())?;
        Ok(base)
    }
}

/// Тело PUT /api/fracciones/{id}
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FraccionUpdateDto {
    #[serde(default)]
    pub nombre_custom: String,
    #[serde(default)]
    pub nota_tecnica: String,
    #[serde(default)]
    pub grupo_fracciones: String,
}

impl FraccionUpdateDto {
    pub fn nombre_custom(&self) -> Option<String> {
        non_empty(&self.nombre_custom)
    }
    pub fn nota_tecnica(&self) -> Option<String> {
        non_empty(&self.nota_tecnica)
    }
    pub fn grupo_fracciones(&self) -> Option<String> {
        non_empty(&self.grupo_fracciones)
    }
}

// ============================================================================
// Ответы API
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraccionCatalogos {
    pub success: bool,
    pub grupos: Vec<GlosarioItem>,
    pub grupos_fracciones: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraccionNextIdResponse {
    pub success: bool,
    pub fraccion_id: String,
    pub codigo: String,
    pub numero: u32,
    pub es_primera: bool,
    pub customs_existentes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraccionListItem {
    pub fraccion_id: String,
    pub fraccion_nombre: String,
    pub nombre_custom: Option<String>,
    pub nombre_full: String,
    pub nota_tecnica: Option<String>,
    pub grupo_fracciones: Option<String>,
    pub codigo: String,
    pub niveles: Vec<i32>,
    pub niveles_display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraccionListResponse {
    pub success: bool,
    pub fracciones: Vec<FraccionListItem>,
    #[serde(flatten)]
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraccionView {
    pub fraccion_id: String,
    pub fraccion_nombre: String,
    pub nombre_custom: Option<String>,
    pub nombre_full: String,
    pub nota_tecnica: Option<String>,
    pub grupo_fracciones: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es_primera: Option<bool>,
}

impl From<Fraccion> for FraccionView {
    fn from(f: Fraccion) -> Self {
        Self {
            nombre_full: f.nombre_full(),
            fraccion_id: f.fraccion_id,
            fraccion_nombre: f.fraccion_nombre,
            nombre_custom: f.nombre_custom,
            nota_tecnica: f.nota_tecnica,
            grupo_fracciones: f.grupo_fracciones,
            es_primera: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraccionResponse {
    pub success: bool,
    pub fraccion: FraccionView,
}

/// Счётчики ссылок, блокирующих удаление
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FraccionEnUso {
    pub sops: u64,
    pub elemento_sets: u64,
    pub kits: u64,
}

impl FraccionEnUso {
    pub fn en_uso(&self) -> bool {
        self.sops > 0 || self.elemento_sets > 0 || self.kits > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraccionDeleteResponse {
    pub success: bool,
    pub message: String,
    pub metodologias_borradas: Vec<String>,
}

/// Фракция для выпадающих списков (kits)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraccionOption {
    pub fraccion_id: String,
    pub codigo: String,
    pub nombre: String,
    pub nombre_custom: Option<String>,
    pub nombre_full: String,
}

impl From<Fraccion> for FraccionOption {
    fn from(f: Fraccion) -> Self {
        Self {
            codigo: f.codigo(),
            nombre_full: f.nombre_full(),
            fraccion_id: f.fraccion_id,
            nombre: f.fraccion_nombre,
            nombre_custom: f.nombre_custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_fraccion_rejects_custom() {
        assert!(validate_custom(true, None, "Barrer", &[]).is_ok());
        assert!(validate_custom(true, Some("  "), "Barrer", &[]).is_ok());
        assert_eq!(
            validate_custom(true, Some("Pasillo"), "Barrer", &[]).unwrap_err(),
            "La primera fraccion no debe tener nombre custom"
        );
    }

    #[test]
    fn later_fraccion_requires_distinct_custom() {
        let existentes = vec!["Pasillo".to_string()];
        assert!(validate_custom(false, None, "Barrer", &existentes).is_err());
        assert_eq!(
            validate_custom(false, Some("barrer"), "Barrer", &existentes).unwrap_err(),
            "El nombre custom no puede ser igual al nombre base"
        );
        assert_eq!(
            validate_custom(false, Some("PASILLO"), "Barrer", &existentes).unwrap_err(),
            "Ya existe otra fraccion con el custom 'PASILLO'"
        );
        assert!(validate_custom(false, Some("Oficinas"), "Barrer", &existentes).is_ok());
    }

    #[test]
    fn edit_rules_come_from_id_and_siblings() {
        assert!(es_primera_id("FR-TL-001"));
        assert!(!es_primera_id("FR-TL-002"));
        assert!(!es_primera_id("FR-TL"));

        let customs = vec!["Pasillos".to_string(), "Oficinas".to_string()];
        assert_eq!(
            customs_sin_propio(&customs, Some(" oficinas ")),
            vec!["Pasillos".to_string()]
        );
        assert_eq!(customs_sin_propio(&customs, None), customs);
    }

    #[test]
    fn names_join_base_and_custom() {
        assert_eq!(nombre_full("Barrer", Some("Pasillo")), "Barrer - Pasillo");
        assert_eq!(nombre_full("Barrer", None), "Barrer");
        assert_eq!(nombre_preview("Barrer", "Pasillo"), "Barrer — Pasillo");
        assert_eq!(nombre_preview("Barrer", " "), "Barrer");
    }

    #[test]
    fn create_validation_uses_glosario() {
        let dto = FraccionCreateDto {
            codigo: "tl".into(),
            ..Default::default()
        };
        assert_eq!(dto.validate(), Ok("Tallar Bano"));

        let dto = FraccionCreateDto {
            codigo: "ZZ".into(),
            ..Default::default()
        };
        assert_eq!(dto.validate().unwrap_err(), "Codigo 'ZZ' no valido");

        let dto = FraccionCreateDto {
            codigo: "BA".into(),
            grupo_fracciones: "oficinas".into(),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn en_uso_when_any_reference() {
        assert!(!FraccionEnUso::default().en_uso());
        assert!(FraccionEnUso { kits: 1, ..Default::default() }.en_uso());
    }
}
