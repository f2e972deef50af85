use actix_web::{HttpResponse, web};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use uuid::Uuid;

use crate::auth::Staff;
use crate::db::clients as client_db;
use crate::db::contracts as contract_db;
use crate::db::vehicles as vehicle_db;
use crate::error::ApiError;
use crate::export::csv::{self as csv_export, ContractRow, OverdueRow, RentedRow};
use crate::models::clients;
use crate::models::contracts::Status;
use crate::models::vehicles;

fn csv_response(filename: &str, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(body)
}

async fn load_parties(
    db: &DatabaseConnection,
) -> Result<(HashMap<Uuid, clients::Model>, HashMap<Uuid, vehicles::Model>), ApiError> {
    let clients = client_db::get_all_clients(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let vehicles = vehicle_db::get_all_vehicles(db)
        .await?
        .into_iter()
        .map(|v| (v.id, v))
        .collect();
    Ok((clients, vehicles))
}

/// GET /api/exports/clients.csv
pub async fn export_clients(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let clients = client_db::get_all_clients(db.get_ref()).await?;
    Ok(csv_response("clients.csv", csv_export::clients_csv(&clients)?))
}

/// GET /api/exports/vehicles.csv
pub async fn export_vehicles(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let vehicles = vehicle_db::get_all_vehicles(db.get_ref()).await?;
    Ok(csv_response(
        "vehicles.csv",
        csv_export::vehicles_csv(&vehicles)?,
    ))
}

/// GET /api/exports/contracts.csv — every contract with client and vehicle
/// names resolved.
pub async fn export_contracts(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let contracts = contract_db::get_all_contracts(db.get_ref(), None).await?;
    let (clients, vehicles) = load_parties(db.get_ref()).await?;

    let rows: Vec<ContractRow> = contracts
        .into_iter()
        .map(|c| ContractRow {
            client: clients
                .get(&c.client_id)
                .map(|cl| cl.full_name())
                .unwrap_or_default(),
            vehicle: vehicles
                .get(&c.vehicle_id)
                .map(|v| v.label())
                .unwrap_or_default(),
            start_date: c.start_date,
            end_date: c.end_date,
            status: format!("{:?}", c.status),
            total_amount: c.total_amount,
        })
        .collect();

    Ok(csv_response(
        "contracts.csv",
        csv_export::contracts_csv(&rows)?,
    ))
}

/// GET /api/exports/overdue-clients.csv — clients holding overdue contracts,
/// with how many days late each one is.
pub async fn export_overdue_clients(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let today = Utc::now().date_naive();
    let contracts = contract_db::get_all_contracts(db.get_ref(), Some(Status::Overdue)).await?;
    let (clients, vehicles) = load_parties(db.get_ref()).await?;

    let rows: Vec<OverdueRow> = contracts
        .into_iter()
        .filter_map(|c| {
            let client = clients.get(&c.client_id)?;
            Some(OverdueRow {
                last_name: client.last_name.clone(),
                first_name: client.first_name.clone(),
                email: client.email.clone().unwrap_or_default(),
                phone: client.phone.clone(),
                contract_id: c.id,
                vehicle: vehicles
                    .get(&c.vehicle_id)
                    .map(|v| v.label())
                    .unwrap_or_default(),
                end_date: c.end_date,
                days_late: (today - c.end_date).num_days().max(0),
            })
        })
        .collect();

    Ok(csv_response(
        "overdue_clients.csv",
        csv_export::overdue_clients_csv(&rows)?,
    ))
}

/// GET /api/exports/rented-vehicles.csv — vehicles currently out on an
/// active contract.
pub async fn export_rented_vehicles(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let contracts = contract_db::get_all_contracts(db.get_ref(), Some(Status::Active)).await?;
    let (clients, vehicles) = load_parties(db.get_ref()).await?;

    let rows: Vec<RentedRow> = contracts
        .into_iter()
        .filter_map(|c| {
            let vehicle = vehicles.get(&c.vehicle_id)?;
            Some(RentedRow {
                vehicle: format!("{} {}", vehicle.make, vehicle.model),
                registration: vehicle.registration.clone(),
                client: clients
                    .get(&c.client_id)
                    .map(|cl| cl.full_name())
                    .unwrap_or_default(),
                start_date: c.start_date,
                end_date: c.end_date,
                contract_id: c.id,
            })
        })
        .collect();

    Ok(csv_response(
        "rented_vehicles.csv",
        csv_export::rented_vehicles_csv(&rows)?,
    ))
}
