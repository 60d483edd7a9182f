use serde::{Deserialize, Serialize};

/// Верхняя граница размера страницы
pub const MAX_PER_PAGE: u64 = 500;

/// Верхняя граница номера страницы: смещение должно помещаться в `i64` SQLite
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PER_PAGE;

/// Параметры страницы после нормализации
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Нормализует номер страницы (1..=MAX_PAGE) и размер (1..=MAX_PER_PAGE)
    pub fn new(page: Option<u64>, per_page: Option<u64>, default_per_page: u64) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1).min(MAX_PAGE);
        let per_page = per_page
            .filter(|p| *p >= 1)
            .unwrap_or(default_per_page)
            .min(MAX_PER_PAGE);
        Self { page, per_page }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// Сведения о пагинации, которые сервер добавляет к каждому списку
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageInfo {
    pub total: u64,
    pub pages: u64,
    pub current_page: u64,
    pub per_page: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    pub fn new(request: PageRequest, total: u64) -> Self {
        let pages = if total == 0 {
            0
        } else {
            (total + request.per_page - 1) / request.per_page
        };
        Self {
            total,
            pages,
            current_page: request.page,
            per_page: request.per_page,
            has_next: request.page < pages,
            has_prev: request.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_and_clamps() {
        let r = PageRequest::new(None, None, 20);
        assert_eq!(r, PageRequest { page: 1, per_page: 20 });
        let r = PageRequest::new(Some(0), Some(0), 50);
        assert_eq!(r, PageRequest { page: 1, per_page: 50 });
        let r = PageRequest::new(Some(3), Some(10_000), 50);
        assert_eq!(r.per_page, MAX_PER_PAGE);
        assert_eq!(PageRequest::new(Some(3), Some(20), 20).offset(), 40);
    }

    #[test]
    fn huge_page_is_capped() {
        let r = PageRequest::new(Some(u64::MAX), Some(MAX_PER_PAGE), 20);
        assert_eq!(r.page, MAX_PAGE);
        assert!(r.offset() <= i64::MAX as u64);

        let info = PageInfo::new(r, 3);
        assert!(!info.has_next);
        assert!(info.has_prev);
    }

    #[test]
    fn info_counts_pages() {
        let info = PageInfo::new(PageRequest::new(Some(2), Some(20), 20), 41);
        assert_eq!(info.pages, 3);
        assert!(info.has_next);
        assert!(info.has_prev);

        let last = PageInfo::new(PageRequest::new(Some(3), Some(20), 20), 41);
        assert!(!last.has_next);

        let empty = PageInfo::new(PageRequest::new(None, None, 20), 0);
        assert_eq!(empty.pages, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
    }
}
