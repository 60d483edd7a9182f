//! Управление табами
//!
//! - `page` - обёртка контента таба
//! - `registry` - маппинг tab.key → View
//! - `tab_labels` - ключи и заголовки табов

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::tab_label_for_key;
