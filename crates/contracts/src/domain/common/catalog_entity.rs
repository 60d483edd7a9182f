/// Метаданные класса каталога (статические данные)
///
/// Реализуется каждым агрегатом; используется для имён таблиц, вкладок и логов.
pub trait CatalogEntity {
    /// Индекс агрегата в системе (например, "a002")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции (например, "elemento")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    /// Полное имя агрегата (например, "a002_elemento")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;

    impl CatalogEntity for Dummy {
        fn aggregate_index() -> &'static str {
            "a099"
        }
        fn collection_name() -> &'static str {
            "dummy"
        }
        fn element_name() -> &'static str {
            "Dummy"
        }
        fn list_name() -> &'static str {
            "Dummies"
        }
    }

    #[test]
    fn full_name_joins_index_and_collection() {
        assert_eq!(Dummy::full_name(), "a099_dummy");
    }
}
