/// Утилиты для клиентского поиска по загруженному списку

/// Trait для строк таблицы, поддерживающих поиск
pub trait Searchable {
    /// Поля, по которым ищет текстовый фильтр
    fn search_fields(&self) -> Vec<&str>;

    fn matches_filter(&self, filter: &str) -> bool {
        matches_any(&self.search_fields(), filter)
    }
}

/// Подстрока без учёта регистра хотя бы в одном поле; пустой фильтр пропускает всё
pub fn matches_any(fields: &[&str], filter: &str) -> bool {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&filter))
}

/// Фильтрует список по поисковому запросу
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.matches_filter(filter))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: String,
        nombre: String,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.id.as_str(), self.nombre.as_str()]
        }
    }

    fn row(id: &str, nombre: &str) -> Row {
        Row {
            id: id.into(),
            nombre: nombre.into(),
        }
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let rows = vec![row("HE-ES-001", "Escoba"), row("HE-MO-001", "Mop algodón")];
        assert_eq!(filter_list(&rows, "").len(), 2);
        assert_eq!(filter_list(&rows, "  mop "), vec![rows[1].clone()]);
        assert_eq!(filter_list(&rows, "he-es"), vec![rows[0].clone()]);
        assert!(filter_list(&rows, "cubeta").is_empty());
    }
}
