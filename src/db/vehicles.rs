use rust_decimal::Decimal;
use sea_orm::*;
use uuid::Uuid;

use crate::db::audit;
use crate::error::ApiError;
use crate::models::audit::Action;
use crate::models::vehicles::{self, CreateVehicle, UpdateVehicle};

fn check_daily_rate(rate: Decimal) -> Result<(), ApiError> {
    if rate < Decimal::ZERO {
        return Err(ApiError::Validation(
            "The daily rate cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// Insert a new vehicle (available by default) and its audit row.
pub async fn insert_vehicle(
    db: &DatabaseConnection,
    actor: &str,
    input: CreateVehicle,
) -> Result<vehicles::Model, ApiError> {
    check_daily_rate(input.daily_rate)?;

    let txn = db.begin().await?;

    let new_vehicle = vehicles::ActiveModel {
        id: Set(Uuid::new_v4()),
        category: Set(input.category),
        make: Set(input.make),
        model: Set(input.model),
        year: Set(input.year),
        registration: Set(input.registration),
        daily_rate: Set(input.daily_rate),
        engine_cc: Set(input.engine_cc),
        doors: Set(input.doors),
        mileage: Set(input.mileage.unwrap_or(0)),
        available: Set(true),
        created_at: Set(chrono::Utc::now()),
    };
    let vehicle = new_vehicle.insert(&txn).await?;

    audit::record(
        &txn,
        actor,
        "vehicle",
        vehicle.id,
        Action::Created,
        audit::snapshot(&vehicle),
    )
    .await?;

    txn.commit().await?;
    Ok(vehicle)
}

/// Fetch all vehicles, ordered by make.
pub async fn get_all_vehicles(db: &DatabaseConnection) -> Result<Vec<vehicles::Model>, DbErr> {
    vehicles::Entity::find()
        .order_by_asc(vehicles::Column::Make)
        .all(db)
        .await
}

/// The public catalogue: available vehicles only, newest first.
pub async fn get_available_vehicles(
    db: &DatabaseConnection,
) -> Result<Vec<vehicles::Model>, DbErr> {
    vehicles::Entity::find()
        .filter(vehicles::Column::Available.eq(true))
        .order_by_desc(vehicles::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single vehicle by ID.
pub async fn get_vehicle_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<vehicles::Model>, DbErr> {
    vehicles::Entity::find_by_id(id).one(db).await
}

/// Update an existing vehicle. The availability flag is owned by the
/// contract lifecycle and cannot be edited here.
pub async fn update_vehicle(
    db: &DatabaseConnection,
    actor: &str,
    id: Uuid,
    input: UpdateVehicle,
) -> Result<vehicles::Model, ApiError> {
    if let Some(rate) = input.daily_rate {
        check_daily_rate(rate)?;
    }

    let txn = db.begin().await?;

    let vehicle = vehicles::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle", id))?;

    let mut active: vehicles::ActiveModel = vehicle.into();
    if let Some(category) = input.category {
        active.category = Set(category);
    }
    if let Some(make) = input.make {
        active.make = Set(make);
    }
    if let Some(model) = input.model {
        active.model = Set(model);
    }
    if let Some(year) = input.year {
        active.year = Set(year);
    }
    if let Some(registration) = input.registration {
        active.registration = Set(registration);
    }
    if let Some(daily_rate) = input.daily_rate {
        active.daily_rate = Set(daily_rate);
    }
    if let Some(engine_cc) = input.engine_cc {
        active.engine_cc = Set(Some(engine_cc));
    }
    if let Some(doors) = input.doors {
        active.doors = Set(Some(doors));
    }
    if let Some(mileage) = input.mileage {
        active.mileage = Set(mileage);
    }
    let updated = active.update(&txn).await?;

    audit::record(
        &txn,
        actor,
        "vehicle",
        updated.id,
        Action::Updated,
        audit::snapshot(&updated),
    )
    .await?;

    txn.commit().await?;
    Ok(updated)
}

/// Delete a vehicle by ID.
pub async fn delete_vehicle(db: &DatabaseConnection, actor: &str, id: Uuid) -> Result<(), ApiError> {
    let txn = db.begin().await?;

    let vehicle = vehicles::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle", id))?;

    vehicles::Entity::delete_by_id(vehicle.id).exec(&txn).await?;
    audit::record(&txn, actor, "vehicle", id, Action::Deleted, None).await?;

    txn.commit().await?;
    Ok(())
}

/// Vehicle counts for the dashboard summary: (total, available).
pub async fn count_vehicles(db: &DatabaseConnection) -> Result<(u64, u64), DbErr> {
    let total = vehicles::Entity::find().count(db).await?;
    let available = vehicles::Entity::find()
        .filter(vehicles::Column::Available.eq(true))
        .count(db)
        .await?;
    Ok((total, available))
}
