//! Utilidades del sistema
//!
//! Manejo de errores compartido por repositorios, controladores y rutas.

pub mod errors;
