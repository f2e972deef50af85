use actix_web::{HttpResponse, web};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::Staff;
use crate::db::clients as client_db;
use crate::db::contracts as contract_db;
use crate::db::vehicles as vehicle_db;
use crate::domain::{penalty, pricing};
use crate::error::ApiError;
use crate::export::pdf;
use crate::models::contracts::{BreakContract, ContractListQuery, CreateContract, ReturnContract};

/// GET /api/contracts — list contracts, optionally filtered by `?status=`.
pub async fn get_contracts(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ContractListQuery>,
) -> Result<HttpResponse, ApiError> {
    let contracts = contract_db::get_all_contracts(db.get_ref(), query.status).await?;
    Ok(HttpResponse::Ok().json(contracts))
}

/// POST /api/contracts — open a new rental contract.
pub async fn create_contract(
    staff: Staff,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateContract>,
) -> Result<HttpResponse, ApiError> {
    let today = Utc::now().date_naive();
    let contract =
        contract_db::create_contract(db.get_ref(), &staff.actor, body.into_inner(), today).await?;
    Ok(HttpResponse::Created().json(contract))
}

/// GET /api/contracts/{id} — one contract, with its overdue status refreshed
/// and the current remaining-days / penalty figures.
pub async fn get_contract(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let today = Utc::now().date_naive();

    let contract = contract_db::get_contract_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", id))?;
    let contract = contract_db::evaluate_overdue(db.get_ref(), contract, today).await?;

    let vehicle = vehicle_db::get_vehicle_by_id(db.get_ref(), contract.vehicle_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle", contract.vehicle_id))?;

    let accrued_penalty =
        penalty::late_penalty(contract.status, contract.end_date, vehicle.daily_rate, today);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "contract": contract,
        "remaining_days": contract.remaining_days(today),
        "accrued_penalty": accrued_penalty,
    })))
}

/// POST /api/contracts/{id}/return — the vehicle comes back; the contract is
/// terminated and the penalty or refund settled.
pub async fn return_contract(
    staff: Staff,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<ReturnContract>,
) -> Result<HttpResponse, ApiError> {
    let today = Utc::now().date_naive();
    let (contract, settlement) = contract_db::return_contract(
        db.get_ref(),
        &staff.actor,
        path.into_inner(),
        body.return_date,
        today,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "contract": contract,
        "settlement": settlement,
    })))
}

/// POST /api/contracts/{id}/break — rupture an active contract. Date, reason
/// and fee are all required.
pub async fn break_contract(
    staff: Staff,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<BreakContract>,
) -> Result<HttpResponse, ApiError> {
    let contract = contract_db::break_contract(
        db.get_ref(),
        &staff.actor,
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(contract))
}

#[derive(Debug, serde::Deserialize)]
pub struct QuoteQuery {
    pub vehicle_id: Uuid,
    pub days: i64,
}

/// GET /api/contracts/quote?vehicle_id=&days= — price a prospective rental.
/// Durations beyond the booking cap are still quoted; the cap only applies
/// at contract creation.
pub async fn quote(
    db: web::Data<DatabaseConnection>,
    query: web::Query<QuoteQuery>,
) -> Result<HttpResponse, ApiError> {
    if query.days < 1 {
        return Err(ApiError::Validation(
            "The minimum rental duration is 1 day".to_string(),
        ));
    }

    let vehicle = vehicle_db::get_vehicle_by_id(db.get_ref(), query.vehicle_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle", query.vehicle_id))?;

    let price = pricing::rental_price(vehicle.daily_rate, query.days);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "price": price })))
}

/// GET /api/contracts/{id}/pdf — download the contract sheet.
pub async fn contract_pdf(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let contract = contract_db::get_contract_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", id))?;
    let client = client_db::get_client_by_id(db.get_ref(), contract.client_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Client", contract.client_id))?;
    let vehicle = vehicle_db::get_vehicle_by_id(db.get_ref(), contract.vehicle_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle", contract.vehicle_id))?;

    let bytes = pdf::contract_sheet(&contract, &client, &vehicle)?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"contract_{id}.pdf\""),
        ))
        .body(bytes))
}
