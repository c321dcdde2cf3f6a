//! DTOs de Vehicle
//!
//! Traducción entre el JSON de la API (camelCase, orden de campos fijo)
//! y el modelo de la tabla `vehicles`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::models::vehicle::{Vehicle, VehiclePatch};
use crate::utils::errors::{AppError, AppResult};

/// Campos del documento externo, en el orden en que se serializan.
/// Los campos requeridos se comprueban en este mismo orden.
pub const VEHICLE_FIELDS: [&str; 8] = [
    "vin",
    "manufacturerName",
    "description",
    "horsePower",
    "modelName",
    "modelYear",
    "purchasePrice",
    "fuelType",
];

/// Todos menos `vin`
pub const MUTABLE_FIELDS: [&str; 7] = [
    "manufacturerName",
    "description",
    "horsePower",
    "modelName",
    "modelYear",
    "purchasePrice",
    "fuelType",
];

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub vin: String,

    #[validate(length(min = 1, message = "manufacturerName must not be empty"))]
    pub manufacturer_name: String,

    pub description: String,
    pub horse_power: i64,

    #[validate(length(min = 1, message = "modelName must not be empty"))]
    pub model_name: String,

    pub model_year: i64,
    pub purchase_price: f64,
    pub fuel_type: String,
}

// Request para actualizar un vehículo
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, message = "manufacturerName must not be empty"))]
    pub manufacturer_name: Option<String>,

    pub description: Option<String>,
    pub horse_power: Option<i64>,

    #[validate(length(min = 1, message = "modelName must not be empty"))]
    pub model_name: Option<String>,

    pub model_year: Option<i64>,
    pub purchase_price: Option<f64>,
    pub fuel_type: Option<String>,
}

// Response de vehículo. El orden de los campos es parte del contrato.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub vin: String,
    pub manufacturer_name: String,
    pub description: String,
    pub horse_power: i64,
    pub model_name: String,
    pub model_year: i64,
    pub purchase_price: f64,
    pub fuel_type: String,
}

/// Parsear el cuerpo crudo de la petición como JSON
pub fn parse_document(body: &[u8]) -> AppResult<Value> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid JSON body: {}", e)))
}

fn as_object(document: &Value) -> AppResult<&Map<String, Value>> {
    document
        .as_object()
        .ok_or_else(|| AppError::Validation("Request body must be a JSON object".to_string()))
}

impl CreateVehicleRequest {
    pub fn from_document(document: Value) -> AppResult<Self> {
        let object = as_object(&document)?;
        if let Some(missing) = VEHICLE_FIELDS
            .iter()
            .copied()
            .find(|field| !object.contains_key(*field))
        {
            return Err(AppError::MissingField(missing));
        }

        let request: Self =
            serde_json::from_value(document).map_err(|e| AppError::Validation(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    pub fn into_vehicle(self) -> Vehicle {
        Vehicle {
            vin: self.vin,
            manufacturer_name: self.manufacturer_name,
            description: self.description,
            horse_power: self.horse_power,
            model_name: self.model_name,
            model_year: self.model_year,
            purchase_price: self.purchase_price,
            fuel_type: self.fuel_type,
        }
    }
}

impl UpdateVehicleRequest {
    /// Claves desconocidas (incluida `vin`) se ignoran; `null` no se acepta
    /// porque todas las columnas son NOT NULL.
    pub fn from_document(document: Value) -> AppResult<Self> {
        let object = as_object(&document)?;
        if let Some(field) = MUTABLE_FIELDS
            .iter()
            .copied()
            .find(|field| matches!(object.get(*field), Some(Value::Null)))
        {
            return Err(AppError::Validation(format!("{} must not be null", field)));
        }

        let request: Self =
            serde_json::from_value(document).map_err(|e| AppError::Validation(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    pub fn into_patch(self) -> VehiclePatch {
        VehiclePatch {
            manufacturer_name: self.manufacturer_name,
            description: self.description,
            horse_power: self.horse_power,
            model_name: self.model_name,
            model_year: self.model_year,
            purchase_price: self.purchase_price,
            fuel_type: self.fuel_type,
        }
    }
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            vin: vehicle.vin,
            manufacturer_name: vehicle.manufacturer_name,
            description: vehicle.description,
            horse_power: vehicle.horse_power,
            model_name: vehicle.model_name,
            model_year: vehicle.model_year,
            purchase_price: vehicle.purchase_price,
            fuel_type: vehicle.fuel_type,
        }
    }
}
