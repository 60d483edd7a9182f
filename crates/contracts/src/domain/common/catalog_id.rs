//! Составные идентификаторы каталогов: `EL-AR-001`, `FR-IN-DE-003`, `MB-TL-002-B`.
//!
//! Все сегменты разделены `-`, последний числовой сегмент дополняется нулями до трёх цифр.

/// Разделитель сегментов идентификатора
pub const SEPARATOR: char = '-';

/// Сегмент идентификатора по индексу (с нуля)
pub fn segment(id: &str, index: usize) -> Option<&str> {
    id.split(SEPARATOR).nth(index)
}

/// Количество сегментов идентификатора
pub fn segment_count(id: &str) -> usize {
    id.split(SEPARATOR).count()
}

/// Собрать идентификатор из префиксных сегментов и порядкового номера.
///
/// ```
/// use contracts::domain::common::catalog_id::format_id;
/// assert_eq!(format_id(&["EL", "AR"], 7), "EL-AR-007");
/// ```
pub fn format_id(prefix: &[&str], numero: u32) -> String {
    let mut id = prefix.join("-");
    if !id.is_empty() {
        id.push(SEPARATOR);
    }
    id.push_str(&format!("{:03}", numero));
    id
}

/// Шаблон LIKE для поиска всех идентификаторов с данным префиксом.
///
/// `_` и `%` в сегментах не экранируются, поэтому результат запроса
/// нужно дополнительно сверять через [`has_prefix`].
pub fn like_pattern(prefix: &[&str]) -> String {
    format!("{}-%", prefix.join("-"))
}

/// Начинается ли идентификатор ровно с этих сегментов
pub fn has_prefix(id: &str, prefix: &[&str]) -> bool {
    let mut parts = id.split(SEPARATOR);
    prefix.iter().all(|p| parts.next() == Some(*p)) && parts.next().is_some()
}

/// Код из латинских букв и цифр
pub fn es_codigo(codigo: &str) -> bool {
    !codigo.is_empty() && codigo.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Числовой суффикс идентификатора, если сегментов ровно `segments`
pub fn numero(id: &str, segments: usize) -> Option<u32> {
    let parts: Vec<&str> = id.split(SEPARATOR).collect();
    if parts.len() != segments {
        return None;
    }
    parts.last().and_then(|last| last.parse::<u32>().ok())
}

/// Следующий порядковый номер: максимум существующих суффиксов + 1.
///
/// Идентификаторы с другим числом сегментов или нечисловым хвостом игнорируются.
pub fn next_numero<'a, I>(existing: I, segments: usize) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    existing
        .into_iter()
        .filter_map(|id| numero(id, segments))
        .max()
        .map(|max| max + 1)
        .unwrap_or(1)
}

/// Следующий идентификатор для префикса с учётом уже занятых
pub fn next_id<'a, I>(prefix: &[&str], existing: I) -> (String, u32)
where
    I: IntoIterator<Item = &'a str>,
{
    let n = next_numero(existing, prefix.len() + 1);
    (format_id(prefix, n), n)
}

/// Проверка двухсимвольного кода группы (`TL`, `HE`, ...)
pub fn validate_codigo(codigo: &str, campo: &str) -> Result<(), String> {
    if codigo.is_empty() {
        return Err(format!("{} requerido", campo));
    }
    if codigo.chars().count() != 2 {
        return Err(format!("{} debe tener 2 caracteres", campo));
    }
    if !es_codigo(codigo) {
        return Err(format!("{} solo admite letras y numeros", campo));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_id(&["EL", "AR"], 1), "EL-AR-001");
        assert_eq!(format_id(&["FR", "IN", "DE"], 42), "FR-IN-DE-042");
        assert_eq!(format_id(&["HE", "MO"], 1234), "HE-MO-1234");
    }

    #[test]
    fn next_numero_uses_max_not_count() {
        let ids = ["EL-ME-001", "EL-ME-007", "EL-ME-003"];
        assert_eq!(next_numero(ids.iter().copied(), 3), 8);
    }

    #[test]
    fn next_numero_ignores_foreign_shapes() {
        let ids = ["KT-EV-DE-004", "KT-TL-002", "KT-TL-abc"];
        assert_eq!(next_numero(ids.iter().copied(), 3), 3);
        assert_eq!(next_numero(ids.iter().copied(), 4), 5);
        assert_eq!(next_numero(std::iter::empty(), 3), 1);
    }

    #[test]
    fn next_id_appends_suffix_segment() {
        let (id, n) = next_id(&["KT", "EV", "DE"], ["KT-EV-DE-001"].iter().copied());
        assert_eq!(id, "KT-EV-DE-002");
        assert_eq!(n, 2);
    }

    #[test]
    fn segments() {
        assert_eq!(segment("CA-IN-DE", 2), Some("DE"));
        assert_eq!(segment("EV-IN", 2), None);
        assert_eq!(segment_count("MB-TL-002-B"), 4);
        assert_eq!(like_pattern(&["FR", "TL"]), "FR-TL-%");
    }

    #[test]
    fn has_prefix_matches_whole_segments() {
        assert!(has_prefix("FR-IN-AB-001", &["FR", "IN", "AB"]));
        assert!(!has_prefix("FR-IN-AB-001", &["FR", "IN", "A_"]));
        assert!(!has_prefix("FR-IN-ABC-001", &["FR", "IN", "AB"]));
        assert!(!has_prefix("FR-IN-AB", &["FR", "IN", "AB"]));
    }

    #[test]
    fn codigo_must_be_two_alphanumerics() {
        assert!(validate_codigo("TL", "Codigo").is_ok());
        assert!(validate_codigo("A1", "Codigo").is_ok());
        assert_eq!(validate_codigo("", "Codigo").unwrap_err(), "Codigo requerido");
        assert_eq!(
            validate_codigo("A_", "Codigo").unwrap_err(),
            "Codigo solo admite letras y numeros"
        );
        assert!(validate_codigo("%%", "Grupo").is_err());
        assert!(validate_codigo("ABC", "Grupo").is_err());
    }

    #[test]
    fn codigo_must_have_two_chars() {
        assert!(validate_codigo("TL", "Codigo").is_ok());
        assert_eq!(
            validate_codigo("", "Grupo").unwrap_err(),
            "Grupo requerido"
        );
        assert_eq!(
            validate_codigo("TLX", "Codigo").unwrap_err(),
            "Codigo debe tener 2 caracteres"
        );
    }
}
