use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::db::audit;
use crate::domain::{booking, penalty, pricing, refund};
use crate::error::ApiError;
use crate::models::audit::Action;
use crate::models::clients;
use crate::models::contracts::{
    self, BreakContract, CreateContract, PaymentDetails, PaymentMethod, Settlement, Status,
};
use crate::models::vehicles;

/// Statuses that hold the vehicle and block overlapping bookings.
const BLOCKING_STATUSES: [Status; 2] = [Status::Active, Status::Overdue];

/// Fetch contracts, newest first, optionally filtered by status.
pub async fn get_all_contracts(
    db: &DatabaseConnection,
    status: Option<Status>,
) -> Result<Vec<contracts::Model>, DbErr> {
    let mut query = contracts::Entity::find().order_by_desc(contracts::Column::CreatedAt);
    if let Some(status) = status {
        query = query.filter(contracts::Column::Status.eq(status));
    }
    query.all(db).await
}

/// Fetch a single contract by ID.
pub async fn get_contract_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find_by_id(id).one(db).await
}

/// Active contracts paired with their client, for the expiry sweep.
pub async fn get_active_with_clients(
    db: &DatabaseConnection,
) -> Result<Vec<(contracts::Model, Option<clients::Model>)>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::Status.eq(Status::Active))
        .find_also_related(clients::Entity)
        .all(db)
        .await
}

/// Contracts touching a vehicle within a date window (occupancy stats).
pub async fn get_vehicle_contracts_in_window(
    db: &DatabaseConnection,
    vehicle_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::VehicleId.eq(vehicle_id))
        .filter(contracts::Column::StartDate.lte(to))
        .filter(contracts::Column::EndDate.gte(from))
        .all(db)
        .await
}

/// Contracts created on or after `since` (monthly stats).
pub async fn get_contracts_created_since(
    db: &DatabaseConnection,
    since: chrono::DateTime<chrono::Utc>,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::CreatedAt.gte(since))
        .all(db)
        .await
}

/// Count contracts in a given status (dashboard summary).
pub async fn count_by_status(db: &DatabaseConnection, status: Status) -> Result<u64, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::Status.eq(status))
        .count(db)
        .await
}

/// Whether any contract in a blocking status overlaps `[start, end]` on the
/// given vehicle. The interval test is inclusive on both ends.
async fn has_booking_conflict<C: ConnectionTrait>(
    conn: &C,
    vehicle_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<bool, DbErr> {
    let query = contracts::Entity::find()
        .filter(contracts::Column::VehicleId.eq(vehicle_id))
        .filter(contracts::Column::Status.is_in(BLOCKING_STATUSES))
        .filter(contracts::Column::StartDate.lte(end))
        .filter(contracts::Column::EndDate.gte(start));
    Ok(query.count(conn).await? > 0)
}

fn check_payment_details(
    method: PaymentMethod,
    details: &Option<PaymentDetails>,
) -> Result<(), ApiError> {
    match (method, details) {
        (PaymentMethod::Cash, None) => Ok(()),
        (PaymentMethod::Cash, Some(_)) => Err(ApiError::Validation(
            "Cash payments carry no payment details".to_string(),
        )),
        (method, Some(details)) if details.matches(method) => Ok(()),
        (_, Some(_)) => Err(ApiError::Validation(
            "Payment details do not match the payment method".to_string(),
        )),
        (method, None) => Err(ApiError::Validation(format!(
            "Payment method {method:?} requires payment details"
        ))),
    }
}

/// Create a contract: validate, price, claim the vehicle and persist, all in
/// one transaction with the vehicle row locked so two overlapping requests
/// cannot both pass the conflict check.
pub async fn create_contract(
    db: &DatabaseConnection,
    actor: &str,
    input: CreateContract,
    today: NaiveDate,
) -> Result<contracts::Model, ApiError> {
    // 1. Field-level validation before touching the database.
    if input.duration_days < 1 {
        return Err(ApiError::Validation(
            "The minimum rental duration is 1 day".to_string(),
        ));
    }
    if input.duration_days > booking::MAX_RENTAL_DAYS {
        return Err(ApiError::Validation(format!(
            "The maximum rental duration is {} days",
            booking::MAX_RENTAL_DAYS
        )));
    }
    if input.start_date < today {
        return Err(ApiError::Validation(
            "The start date cannot be in the past".to_string(),
        ));
    }
    check_payment_details(input.payment_method, &input.payment_details)?;

    let txn = db.begin().await?;

    // 2. The client must exist.
    let client = clients::Entity::find_by_id(input.client_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Client", input.client_id))?;

    // 3. Lock the vehicle row for the rest of the transaction; concurrent
    //    creations on the same vehicle serialize here.
    let vehicle = vehicles::Entity::find_by_id(input.vehicle_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle", input.vehicle_id))?;

    if !vehicle.available {
        return Err(ApiError::Validation(format!(
            "Vehicle {} is not available",
            vehicle.label()
        )));
    }

    // 4. No overlap with existing bookings in a blocking status.
    let end_date = booking::end_date(input.start_date, input.duration_days);
    if has_booking_conflict(&txn, vehicle.id, input.start_date, end_date).await? {
        return Err(ApiError::Conflict(format!(
            "Vehicle {} is already booked for this period",
            vehicle.label()
        )));
    }

    // 5. Price the rental and persist the contract.
    let total_amount = pricing::rental_price(vehicle.daily_rate, i64::from(input.duration_days));
    let payment_details = input
        .payment_details
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| ApiError::Internal(format!("Failed to encode payment details: {e}")))?;

    let new_contract = contracts::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client.id),
        vehicle_id: Set(vehicle.id),
        created_at: Set(chrono::Utc::now()),
        start_date: Set(input.start_date),
        end_date: Set(end_date),
        duration_days: Set(input.duration_days),
        total_amount: Set(total_amount),
        status: Set(Status::Active),
        payment_method: Set(input.payment_method),
        payment_details: Set(payment_details),
        break_date: Set(None),
        break_reason: Set(None),
        break_fee: Set(None),
        archived: Set(false),
    };
    let contract = new_contract.insert(&txn).await?;

    // 6. The vehicle is claimed by the new contract.
    let vehicle_id = vehicle.id;
    let mut vehicle_active: vehicles::ActiveModel = vehicle.into();
    vehicle_active.available = Set(false);
    let vehicle = vehicle_active.update(&txn).await?;

    audit::record(
        &txn,
        actor,
        "contract",
        contract.id,
        Action::Created,
        audit::snapshot(&contract),
    )
    .await?;
    audit::record(
        &txn,
        actor,
        "vehicle",
        vehicle_id,
        Action::Updated,
        audit::snapshot(&vehicle),
    )
    .await?;

    txn.commit().await?;

    tracing::info!(
        contract = %contract.id,
        vehicle = %vehicle_id,
        total = %contract.total_amount,
        "contract created"
    );
    Ok(contract)
}

/// Return the vehicle: settle penalty or refund, free the vehicle and
/// terminate the contract in one transaction. Only contracts in a blocking
/// status can be returned.
pub async fn return_contract(
    db: &DatabaseConnection,
    actor: &str,
    id: Uuid,
    return_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(contracts::Model, Settlement), ApiError> {
    let return_date = return_date.unwrap_or(today);

    let txn = db.begin().await?;

    let contract = contracts::Entity::find_by_id(id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", id))?;

    if !contract.status.is_blocking() {
        return Err(ApiError::Validation(format!(
            "Contract is already {:?}; only active or overdue contracts can be returned",
            contract.status
        )));
    }

    let vehicle = vehicles::Entity::find_by_id(contract.vehicle_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle", contract.vehicle_id))?;

    // Penalty and refund are mutually exclusive: a late return accrues a
    // penalty, an early one earns a refund, an on-time one neither.
    let mut settlement = Settlement::default();
    if penalty::is_late(contract.status, contract.end_date, today) {
        settlement.penalty =
            penalty::late_penalty(contract.status, contract.end_date, vehicle.daily_rate, today);
    } else if return_date < contract.end_date {
        settlement.refund = refund::early_return_refund(
            contract.start_date,
            contract.end_date,
            contract.duration_days,
            contract.total_amount,
            vehicle.daily_rate,
            Some(return_date),
        );
    }

    let vehicle_id = vehicle.id;
    let mut vehicle_active: vehicles::ActiveModel = vehicle.into();
    vehicle_active.available = Set(true);
    let vehicle = vehicle_active.update(&txn).await?;

    let mut contract_active: contracts::ActiveModel = contract.into();
    contract_active.status = Set(Status::Terminated);
    let contract = contract_active.update(&txn).await?;

    audit::record(
        &txn,
        actor,
        "contract",
        contract.id,
        Action::Updated,
        audit::snapshot(&contract),
    )
    .await?;
    audit::record(
        &txn,
        actor,
        "vehicle",
        vehicle_id,
        Action::Updated,
        audit::snapshot(&vehicle),
    )
    .await?;

    txn.commit().await?;

    tracing::info!(
        contract = %contract.id,
        penalty = %settlement.penalty,
        refund = %settlement.refund,
        "contract returned"
    );
    Ok((contract, settlement))
}

/// Break (rupture) an active contract: date, reason and fee are all
/// mandatory. Frees the vehicle and moves the contract to its terminal
/// `broken` status in one transaction.
pub async fn break_contract(
    db: &DatabaseConnection,
    actor: &str,
    id: Uuid,
    input: BreakContract,
) -> Result<contracts::Model, ApiError> {
    let (Some(break_date), Some(break_reason), Some(break_fee)) =
        (input.break_date, input.break_reason, input.break_fee)
    else {
        return Err(ApiError::Validation(
            "Break date, reason and fee are all required".to_string(),
        ));
    };
    if break_reason.trim().is_empty() {
        return Err(ApiError::Validation(
            "The break reason cannot be empty".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let contract = contracts::Entity::find_by_id(id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", id))?;

    if contract.status != Status::Active {
        return Err(ApiError::Validation(format!(
            "Contract is {:?}; only active contracts can be broken",
            contract.status
        )));
    }

    let vehicle = vehicles::Entity::find_by_id(contract.vehicle_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle", contract.vehicle_id))?;

    let vehicle_id = vehicle.id;
    let mut vehicle_active: vehicles::ActiveModel = vehicle.into();
    vehicle_active.available = Set(true);
    let vehicle = vehicle_active.update(&txn).await?;

    let mut contract_active: contracts::ActiveModel = contract.into();
    contract_active.status = Set(Status::Broken);
    contract_active.break_date = Set(Some(break_date));
    contract_active.break_reason = Set(Some(break_reason));
    contract_active.break_fee = Set(Some(break_fee));
    let contract = contract_active.update(&txn).await?;

    audit::record(
        &txn,
        actor,
        "contract",
        contract.id,
        Action::Updated,
        audit::snapshot(&contract),
    )
    .await?;
    audit::record(
        &txn,
        actor,
        "vehicle",
        vehicle_id,
        Action::Updated,
        audit::snapshot(&vehicle),
    )
    .await?;

    txn.commit().await?;

    tracing::info!(contract = %contract.id, "contract broken");
    Ok(contract)
}

/// Idempotent status refresh: flips an active contract past its end date to
/// `overdue` and persists the change; otherwise hands the contract back
/// untouched. Invoked explicitly on read and by the periodic sweep.
pub async fn evaluate_overdue(
    db: &DatabaseConnection,
    contract: contracts::Model,
    today: NaiveDate,
) -> Result<contracts::Model, ApiError> {
    if !(contract.status == Status::Active && contract.end_date < today) {
        return Ok(contract);
    }

    let txn = db.begin().await?;

    let mut active: contracts::ActiveModel = contract.into();
    active.status = Set(Status::Overdue);
    let updated = active.update(&txn).await?;

    audit::record(
        &txn,
        "system",
        "contract",
        updated.id,
        Action::Updated,
        audit::snapshot(&updated),
    )
    .await?;

    txn.commit().await?;

    tracing::info!(contract = %updated.id, "contract marked overdue");
    Ok(updated)
}

/// Flag terminated contracts that ended before `cutoff` as archived.
/// Returns the number of contracts archived.
pub async fn archive_terminated_before(
    db: &DatabaseConnection,
    cutoff: NaiveDate,
) -> Result<u64, DbErr> {
    let result = contracts::Entity::update_many()
        .col_expr(contracts::Column::Archived, Expr::value(true))
        .filter(contracts::Column::Status.eq(Status::Terminated))
        .filter(contracts::Column::Archived.eq(false))
        .filter(contracts::Column::EndDate.lt(cutoff))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
