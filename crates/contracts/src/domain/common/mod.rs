//! Common types and rules for all catalogs

pub mod catalog_entity;
pub mod catalog_id;
pub mod nivel_limpieza;

// Re-exports
pub use catalog_entity::CatalogEntity;
pub use nivel_limpieza::NivelLimpieza;
