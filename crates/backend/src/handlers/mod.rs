pub mod a001_area;
pub mod a002_elemento;
pub mod a003_herramienta;
pub mod a004_fraccion;
pub mod a005_metodologia;
pub mod a006_kit;
pub mod a008_kit_evento;
pub mod a009_fraccion_evento;
pub mod a010_metodologia_evento;

/// Числовой query-параметр; мусор считается отсутствующим
pub(crate) fn number_param(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_param_is_lenient() {
        assert_eq!(number_param(Some("3")), Some(3));
        assert_eq!(number_param(Some(" 20 ")), Some(20));
        assert_eq!(number_param(Some("abc")), None);
        assert_eq!(number_param(Some("-1")), None);
        assert_eq!(number_param(None), None);
    }
}
