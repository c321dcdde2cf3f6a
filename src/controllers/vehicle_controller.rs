use serde_json::Value;
use sqlx::SqlitePool;
use tracing::info;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{duplicate_vin, vehicle_not_found, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    /// Un VIN ya registrado es 409 aunque el resto del cuerpo sea incompleto
    /// o inválido. La primary key sigue cubriendo las carreras entre creates.
    pub async fn create(&self, document: Value) -> Result<VehicleResponse, AppError> {
        if let Some(vin) = document.get("vin").and_then(Value::as_str) {
            if self.repository.find_by_vin(vin).await?.is_some() {
                return Err(duplicate_vin());
            }
        }

        let vehicle = CreateVehicleRequest::from_document(document)?.into_vehicle();
        let created = self.repository.insert(&vehicle).await?;

        info!("🚗 Vehículo creado: {}", created.vin);
        Ok(VehicleResponse::from(created))
    }

    pub async fn get_by_vin(&self, vin: &str) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_vin(vin)
            .await?
            .ok_or_else(vehicle_not_found)?;

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    /// La existencia se comprueba antes de mirar el cuerpo: un VIN
    /// desconocido es 404 aunque el cuerpo sea inválido.
    pub async fn update(&self, vin: &str, document: Value) -> Result<VehicleResponse, AppError> {
        if self.repository.find_by_vin(vin).await?.is_none() {
            return Err(vehicle_not_found());
        }

        let patch = UpdateVehicleRequest::from_document(document)?.into_patch();
        let updated = self.repository.update(vin, &patch).await?;

        info!("✏️ Vehículo actualizado: {}", updated.vin);
        Ok(VehicleResponse::from(updated))
    }

    pub async fn delete(&self, vin: &str) -> Result<(), AppError> {
        self.repository.delete(vin).await?;
        info!("🗑️ Vehículo eliminado: {}", vin);
        Ok(())
    }
}
