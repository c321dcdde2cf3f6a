//! Modelo de Vehicle
//!
//! Mapea exactamente a la tabla `vehicles` con primary key `vin`.

use sqlx::FromRow;

/// Vehicle principal - una fila de la tabla vehicles
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Vehicle {
    pub vin: String,
    pub manufacturer_name: String,
    pub description: String,
    pub horse_power: i64,
    pub model_name: String,
    pub model_year: i64,
    pub purchase_price: f64,
    pub fuel_type: String,
}

/// Cambios parciales sobre un vehículo; `None` deja la columna intacta
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehiclePatch {
    pub manufacturer_name: Option<String>,
    pub description: Option<String>,
    pub horse_power: Option<i64>,
    pub model_name: Option<String>,
    pub model_year: Option<i64>,
    pub purchase_price: Option<f64>,
    pub fuel_type: Option<String>,
}
