use sea_orm::*;
use uuid::Uuid;

use crate::db::audit;
use crate::error::ApiError;
use crate::models::audit::Action;
use crate::models::clients::{self, CreateClient, UpdateClient};
use crate::models::contracts;

/// Insert a new client and its audit row in one transaction.
pub async fn insert_client(
    db: &DatabaseConnection,
    actor: &str,
    input: CreateClient,
) -> Result<clients::Model, ApiError> {
    let txn = db.begin().await?;

    let new_client = clients::ActiveModel {
        id: Set(Uuid::new_v4()),
        last_name: Set(input.last_name),
        first_name: Set(input.first_name),
        phone: Set(input.phone),
        email: Set(input.email),
        created_at: Set(chrono::Utc::now()),
    };
    let client = new_client.insert(&txn).await?;

    audit::record(
        &txn,
        actor,
        "client",
        client.id,
        Action::Created,
        audit::snapshot(&client),
    )
    .await?;

    txn.commit().await?;
    Ok(client)
}

/// Fetch all clients, ordered by last name.
pub async fn get_all_clients(db: &DatabaseConnection) -> Result<Vec<clients::Model>, DbErr> {
    clients::Entity::find()
        .order_by_asc(clients::Column::LastName)
        .all(db)
        .await
}

/// Fetch a single client by ID.
pub async fn get_client_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<clients::Model>, DbErr> {
    clients::Entity::find_by_id(id).one(db).await
}

/// Rental history of one client, newest contract first.
pub async fn get_client_contracts(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::ClientId.eq(id))
        .order_by_desc(contracts::Column::CreatedAt)
        .all(db)
        .await
}

/// Update an existing client.
pub async fn update_client(
    db: &DatabaseConnection,
    actor: &str,
    id: Uuid,
    input: UpdateClient,
) -> Result<clients::Model, ApiError> {
    let txn = db.begin().await?;

    let client = clients::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Client", id))?;

    let mut active: clients::ActiveModel = client.into();
    if let Some(last_name) = input.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(first_name) = input.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(phone) = input.phone {
        active.phone = Set(phone);
    }
    if let Some(email) = input.email {
        active.email = Set(Some(email));
    }
    let updated = active.update(&txn).await?;

    audit::record(
        &txn,
        actor,
        "client",
        updated.id,
        Action::Updated,
        audit::snapshot(&updated),
    )
    .await?;

    txn.commit().await?;
    Ok(updated)
}

/// Delete a client by ID.
pub async fn delete_client(db: &DatabaseConnection, actor: &str, id: Uuid) -> Result<(), ApiError> {
    let txn = db.begin().await?;

    let client = clients::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found("Client", id))?;

    clients::Entity::delete_by_id(client.id).exec(&txn).await?;
    audit::record(&txn, actor, "client", id, Action::Deleted, None).await?;

    txn.commit().await?;
    Ok(())
}

/// Count all clients (dashboard summary).
pub async fn count_clients(db: &DatabaseConnection) -> Result<u64, DbErr> {
    clients::Entity::find().count(db).await
}
