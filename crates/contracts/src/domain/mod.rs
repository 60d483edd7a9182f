pub mod a001_area;
pub mod a002_elemento;
pub mod a003_herramienta;
pub mod a004_fraccion;
pub mod a005_metodologia;
pub mod a006_kit;
pub mod a007_evento;
pub mod a008_kit_evento;
pub mod a009_fraccion_evento;
pub mod a010_metodologia_evento;
pub mod common;
