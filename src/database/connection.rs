//! Conexión a SQLite
//!
//! Este módulo abre el pool de conexiones y crea el esquema si no existe.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DatabaseConfig;

const CREATE_VEHICLES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        vin VARCHAR(17) PRIMARY KEY NOT NULL,
        manufacturer_name VARCHAR(255) NOT NULL,
        description TEXT NOT NULL,
        horse_power INTEGER NOT NULL,
        model_name VARCHAR(255) NOT NULL,
        model_year INTEGER NOT NULL,
        purchase_price REAL NOT NULL,
        fuel_type VARCHAR(50) NOT NULL
    )
"#;

/// Crear un pool de conexiones y asegurar el esquema
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let config = DatabaseConfig::new(database_url);
    let pool = config
        .create_pool()
        .await
        .with_context(|| format!("could not open database at {}", database_url))?;

    run_migrations(&pool).await?;
    info!("✅ Base de datos lista: {}", database_url);

    Ok(pool)
}

/// Crear la tabla de vehículos si no existe
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_VEHICLES_TABLE).execute(pool).await?;
    Ok(())
}
