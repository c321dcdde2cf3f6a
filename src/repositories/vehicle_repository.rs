use sqlx::SqlitePool;

use crate::models::vehicle::{Vehicle, VehiclePatch};
use crate::utils::errors::{duplicate_vin, vehicle_not_found, AppError};

pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    pub async fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE vin = ?1")
            .bind(vin)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Un VIN repetido lo detecta la primary key, no una consulta previa
    pub async fn insert(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let created = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (vin, manufacturer_name, description, horse_power, model_name, model_year, purchase_price, fuel_type)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING *
            "#,
        )
        .bind(&vehicle.vin)
        .bind(&vehicle.manufacturer_name)
        .bind(&vehicle.description)
        .bind(vehicle.horse_power)
        .bind(&vehicle.model_name)
        .bind(vehicle.model_year)
        .bind(vehicle.purchase_price)
        .bind(&vehicle.fuel_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => duplicate_vin(),
            other => AppError::Database(other),
        })?;

        Ok(created)
    }

    pub async fn update(&self, vin: &str, patch: &VehiclePatch) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET manufacturer_name = COALESCE(?2, manufacturer_name),
                description = COALESCE(?3, description),
                horse_power = COALESCE(?4, horse_power),
                model_name = COALESCE(?5, model_name),
                model_year = COALESCE(?6, model_year),
                purchase_price = COALESCE(?7, purchase_price),
                fuel_type = COALESCE(?8, fuel_type)
            WHERE vin = ?1
            RETURNING *
            "#,
        )
        .bind(vin)
        .bind(patch.manufacturer_name.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.horse_power)
        .bind(patch.model_name.as_deref())
        .bind(patch.model_year)
        .bind(patch.purchase_price)
        .bind(patch.fuel_type.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(vehicle_not_found)?;

        Ok(vehicle)
    }

    pub async fn delete(&self, vin: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE vin = ?1")
            .bind(vin)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(vehicle_not_found());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_pool;

    async fn repository() -> VehicleRepository {
        VehicleRepository::new(create_pool("sqlite::memory:").await.unwrap())
    }

    fn civic() -> Vehicle {
        Vehicle {
            vin: "1HGCM82633A123456".to_string(),
            manufacturer_name: "Honda".to_string(),
            description: "Reliable sedan with great fuel efficiency.".to_string(),
            horse_power: 158,
            model_name: "Civic".to_string(),
            model_year: 2023,
            purchase_price: 25000.99,
            fuel_type: "Gasoline".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_find_and_list() {
        let repo = repository().await;
        assert!(repo.list().await.unwrap().is_empty());

        let created = repo.insert(&civic()).await.unwrap();
        assert_eq!(created, civic());

        assert_eq!(repo.find_by_vin(&civic().vin).await.unwrap(), Some(civic()));
        assert_eq!(repo.list().await.unwrap(), vec![civic()]);
        assert_eq!(repo.find_by_vin("UNKNOWN").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_vin_keeps_original() {
        let repo = repository().await;
        repo.insert(&civic()).await.unwrap();

        let mut other = civic();
        other.manufacturer_name = "Acura".to_string();
        let err = repo.insert(&other).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));

        assert_eq!(repo.find_by_vin(&civic().vin).await.unwrap(), Some(civic()));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_partial_update_changes_only_named_fields() {
        let repo = repository().await;
        repo.insert(&civic()).await.unwrap();

        let patch = VehiclePatch {
            horse_power: Some(200),
            fuel_type: Some("Hybrid".to_string()),
            ..Default::default()
        };
        let updated = repo.update(&civic().vin, &patch).await.unwrap();

        let mut expected = civic();
        expected.horse_power = 200;
        expected.fuel_type = "Hybrid".to_string();
        assert_eq!(updated, expected);
        assert_eq!(repo.find_by_vin(&civic().vin).await.unwrap(), Some(expected));
    }

    #[tokio::test]
    async fn test_empty_patch_leaves_record_unchanged() {
        let repo = repository().await;
        repo.insert(&civic()).await.unwrap();

        let updated = repo
            .update(&civic().vin, &VehiclePatch::default())
            .await
            .unwrap();
        assert_eq!(updated, civic());
    }

    #[tokio::test]
    async fn test_update_missing_vin_creates_nothing() {
        let repo = repository().await;
        let patch = VehiclePatch {
            horse_power: Some(200),
            ..Default::default()
        };
        let err = repo.update("NOPE", &patch).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let repo = repository().await;
        repo.insert(&civic()).await.unwrap();

        repo.delete(&civic().vin).await.unwrap();
        assert_eq!(repo.find_by_vin(&civic().vin).await.unwrap(), None);

        let err = repo.delete(&civic().vin).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
