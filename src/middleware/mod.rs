//! Middleware del sistema
//!
//! CORS para el router HTTP.

pub mod cors;

pub use cors::*;
