pub mod pagination_controls;
pub mod pasos_editor;
