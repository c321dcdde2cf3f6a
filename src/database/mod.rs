//! Módulo de base de datos
//!
//! Maneja la conexión y el esquema de SQLite

pub mod connection;

pub use connection::{create_pool, run_migrations};
