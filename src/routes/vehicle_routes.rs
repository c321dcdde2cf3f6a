use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::vehicle_dto::{parse_document, VehicleResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/vehicle", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicle/:vin",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

// El cuerpo se lee crudo: JSON inválido es 422, no el rechazo por defecto de `Json`
async fn create_vehicle(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<VehicleResponse>), AppError> {
    let document = parse_document(&body)?;
    let response = state.vehicle_controller().create(document).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> Result<Json<VehicleResponse>, AppError> {
    let response = state.vehicle_controller().get_by_vin(&vin).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let response = state.vehicle_controller().list().await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
    body: Bytes,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = state.vehicle_controller();
    // Un cuerpo ilegible sobre un VIN inexistente sigue siendo 404
    let document = match parse_document(&body) {
        Ok(document) => document,
        Err(e) => {
            controller.get_by_vin(&vin).await?;
            return Err(e);
        }
    };
    let response = controller.update(&vin, document).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> Result<StatusCode, AppError> {
    state.vehicle_controller().delete(&vin).await?;
    Ok(StatusCode::NO_CONTENT)
}
