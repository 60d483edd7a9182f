//! Общие формы ответов API
use serde::{Deserialize, Serialize};

/// Тело ответа при ошибке: `{"success": false, "error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detalles: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            detalles: None,
        }
    }
}

/// Ответ без данных, только сообщение
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Элемент выпадающего списка глоссария `{codigo, nombre}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlosarioItem {
    pub codigo: String,
    pub nombre: String,
}

/// Глоссарий в виде отсортированного по коду списка
pub fn glosario_items(glosario: &[(&str, &str)]) -> Vec<GlosarioItem> {
    let mut items: Vec<GlosarioItem> = glosario
        .iter()
        .map(|(codigo, nombre)| GlosarioItem {
            codigo: codigo.to_string(),
            nombre: nombre.to_string(),
        })
        .collect();
    items.sort_by(|a, b| a.codigo.cmp(&b.codigo));
    items
}

/// Поиск имени в глоссарии по коду
pub fn glosario_nombre(glosario: &[(&'static str, &'static str)], codigo: &str) -> Option<&'static str> {
    glosario
        .iter()
        .find(|(c, _)| *c == codigo)
        .map(|(_, nombre)| *nombre)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_skips_empty_detalles() {
        let json = serde_json::to_value(ErrorResponse::new("Kit no encontrado")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "Kit no encontrado"}));
    }

    #[test]
    fn glosario_is_sorted_by_codigo() {
        let items = glosario_items(&[("TR", "Trapear"), ("BA", "Barrer")]);
        assert_eq!(items[0].codigo, "BA");
        assert_eq!(glosario_nombre(&[("TR", "Trapear")], "TR"), Some("Trapear"));
        assert_eq!(glosario_nombre(&[("TR", "Trapear")], "XX"), None);
    }
}
