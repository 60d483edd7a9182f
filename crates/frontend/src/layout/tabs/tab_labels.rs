//! Ключи и заголовки табов.
//!
//! Ключ списка совпадает с `CatalogEntity::full_name()` агрегата; редакторы
//! методологий открываются как `{full_name}_{id}`.

use contracts::domain::a002_elemento::aggregate::Elemento;
use contracts::domain::a003_herramienta::aggregate::Herramienta;
use contracts::domain::a004_fraccion::aggregate::Fraccion;
use contracts::domain::a005_metodologia::aggregate::MetodologiaBase;
use contracts::domain::a006_kit::aggregate::Kit;
use contracts::domain::a009_fraccion_evento::aggregate::FraccionEvento;
use contracts::domain::a010_metodologia_evento::aggregate::MetodologiaEvento;
use contracts::domain::common::CatalogEntity;

/// Киты событий хранятся в той же таблице, что и киты, отдельного агрегата нет
pub const KEY_KITS_EVENTOS: &str = "a008_kit_evento";

pub fn key_elementos() -> String {
    Elemento::full_name()
}

pub fn key_herramientas() -> String {
    Herramienta::full_name()
}

pub fn key_fracciones() -> String {
    Fraccion::full_name()
}

pub fn key_kits() -> String {
    Kit::full_name()
}

pub fn key_fracciones_eventos() -> String {
    FraccionEvento::full_name()
}

/// Таб редактора методологий фракции
pub fn key_metodologia(fraccion_id: &str) -> String {
    format!("{}_{}", MetodologiaBase::full_name(), fraccion_id)
}

/// Таб редактора методологии события
pub fn key_metodologia_evento(metodologia_id: &str) -> String {
    format!("{}_{}", MetodologiaEvento::full_name(), metodologia_id)
}

/// Id фракции из ключа редактора методологий
pub fn fraccion_de_key(key: &str) -> Option<&str> {
    strip_detail(key, &MetodologiaBase::full_name())
}

/// Id методологии события из ключа редактора
pub fn metodologia_evento_de_key(key: &str) -> Option<&str> {
    strip_detail(key, &MetodologiaEvento::full_name())
}

fn strip_detail<'a>(key: &'a str, full_name: &str) -> Option<&'a str> {
    key.strip_prefix(full_name)
        .and_then(|rest| rest.strip_prefix('_'))
        .filter(|id| !id.is_empty())
}

/// Заголовок таба по ключу. Fallback: сам ключ.
pub fn tab_label_for_key(key: &str) -> String {
    if let Some(id) = fraccion_de_key(key) {
        return format!("{} {}", MetodologiaBase::list_name(), id);
    }
    if let Some(id) = metodologia_evento_de_key(key) {
        return format!("{} {}", MetodologiaEvento::element_name(), id);
    }
    if key == KEY_KITS_EVENTOS {
        return "Kits de evento".to_string();
    }

    let label = if key == key_elementos() {
        Elemento::list_name()
    } else if key == key_herramientas() {
        Herramienta::list_name()
    } else if key == key_fracciones() {
        Fraccion::list_name()
    } else if key == key_kits() {
        Kit::list_name()
    } else if key == key_fracciones_eventos() {
        FraccionEvento::list_name()
    } else {
        key
    };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_keys_use_aggregate_names() {
        assert_eq!(key_elementos(), "a002_elemento");
        assert_eq!(key_fracciones(), "a004_fraccion");
        assert_eq!(tab_label_for_key("a003_herramienta"), "Herramientas");
        assert_eq!(tab_label_for_key(KEY_KITS_EVENTOS), "Kits de evento");
        assert_eq!(tab_label_for_key("desconocido"), "desconocido");
    }

    #[test]
    fn editor_keys_round_trip_ids() {
        let key = key_metodologia("FR-TL-001");
        assert_eq!(key, "a005_metodologia_base_FR-TL-001");
        assert_eq!(fraccion_de_key(&key), Some("FR-TL-001"));
        assert_eq!(fraccion_de_key("a005_metodologia_base_"), None);
        assert_eq!(tab_label_for_key(&key), "Metodologías FR-TL-001");

        let key = key_metodologia_evento("ME-IN-DE-001");
        assert_eq!(metodologia_evento_de_key(&key), Some("ME-IN-DE-001"));
        assert_eq!(fraccion_de_key(&key), None);
    }
}
