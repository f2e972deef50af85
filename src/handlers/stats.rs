use actix_web::{HttpResponse, web};
use chrono::{Datelike, Days, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

use crate::auth::Staff;
use crate::db::clients as client_db;
use crate::db::contracts as contract_db;
use crate::db::vehicles as vehicle_db;
use crate::domain::booking;
use crate::error::ApiError;
use crate::models::contracts::Status;

/// GET /api/stats/summary — dashboard counters.
pub async fn summary(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let db = db.get_ref();
    let total_clients = client_db::count_clients(db).await?;
    let (total_vehicles, vehicles_available) = vehicle_db::count_vehicles(db).await?;
    let contracts_active = contract_db::count_by_status(db, Status::Active).await?;
    let contracts_overdue = contract_db::count_by_status(db, Status::Overdue).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "total_clients": total_clients,
        "total_vehicles": total_vehicles,
        "vehicles_available": vehicles_available,
        "contracts_active": contracts_active,
        "contracts_overdue": contracts_overdue,
    })))
}

/// GET /api/stats/contracts-per-month — contracts created per month over the
/// last twelve months, as chart-ready labels and counts.
pub async fn contracts_per_month(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let one_year_ago = Utc::now() - chrono::Duration::days(365);
    let contracts = contract_db::get_contracts_created_since(db.get_ref(), one_year_ago).await?;

    // Bucket by (year, month); BTreeMap keeps chronological order.
    let mut buckets: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for contract in &contracts {
        let created = contract.created_at.date_naive();
        *buckets.entry((created.year(), created.month())).or_default() += 1;
    }

    let mut labels = Vec::with_capacity(buckets.len());
    let mut data = Vec::with_capacity(buckets.len());
    for ((year, month), count) in buckets {
        let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month start");
        labels.push(first.format("%B %Y").to_string());
        data.push(count);
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "labels": labels,
        "data": data,
    })))
}

/// GET /api/stats/vehicle-occupancy — share of the last 30 days each vehicle
/// spent rented out.
pub async fn vehicle_occupancy(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    const WINDOW_DAYS: i64 = 30;

    let today = Utc::now().date_naive();
    let window_start = today
        .checked_sub_days(Days::new(WINDOW_DAYS as u64))
        .unwrap_or(NaiveDate::MIN);

    let mut data = Vec::new();
    for vehicle in vehicle_db::get_all_vehicles(db.get_ref()).await? {
        let contracts = contract_db::get_vehicle_contracts_in_window(
            db.get_ref(),
            vehicle.id,
            window_start,
            today,
        )
        .await?;

        let mut rented_days: i64 = 0;
        for contract in contracts {
            if booking::ranges_overlap(contract.start_date, contract.end_date, window_start, today)
            {
                let from = contract.start_date.max(window_start);
                let to = contract.end_date.min(today);
                rented_days += (to - from).num_days() + 1;
            }
        }
        let rented_days = rented_days.min(WINDOW_DAYS);

        let rate = (rented_days as f64 / WINDOW_DAYS as f64) * 100.0;
        data.push(serde_json::json!({
            "vehicle": format!("{} {}", vehicle.make, vehicle.model),
            "occupancy_rate": (rate * 100.0).round() / 100.0,
        }));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "data": data })))
}
