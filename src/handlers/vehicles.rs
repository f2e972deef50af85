use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::Staff;
use crate::db::vehicles as vehicle_db;
use crate::error::ApiError;
use crate::models::vehicles::{CreateVehicle, UpdateVehicle};

/// GET /api/vehicles — list the whole fleet.
pub async fn get_vehicles(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let vehicles = vehicle_db::get_all_vehicles(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(vehicles))
}

/// GET /api/vehicles/available — the catalogue of vehicles open for booking.
pub async fn get_available_vehicles(
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let vehicles = vehicle_db::get_available_vehicles(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(vehicles))
}

/// GET /api/vehicles/{id} — one vehicle.
pub async fn get_vehicle(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let vehicle = vehicle_db::get_vehicle_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle", id))?;
    Ok(HttpResponse::Ok().json(vehicle))
}

/// POST /api/vehicles — add a vehicle to the fleet.
pub async fn create_vehicle(
    staff: Staff,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateVehicle>,
) -> Result<HttpResponse, ApiError> {
    let vehicle = vehicle_db::insert_vehicle(db.get_ref(), &staff.actor, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(vehicle))
}

/// PUT /api/vehicles/{id} — update a vehicle.
pub async fn update_vehicle(
    staff: Staff,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateVehicle>,
) -> Result<HttpResponse, ApiError> {
    let updated = vehicle_db::update_vehicle(
        db.get_ref(),
        &staff.actor,
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/vehicles/{id} — remove a vehicle from the fleet.
pub async fn delete_vehicle(
    staff: Staff,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    vehicle_db::delete_vehicle(db.get_ref(), &staff.actor, id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Vehicle {id} deleted"),
    })))
}
