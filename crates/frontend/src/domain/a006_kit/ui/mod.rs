pub mod details;
pub mod herramientas_checklist;
pub mod list;
