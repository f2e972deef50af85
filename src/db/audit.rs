use sea_orm::*;
use serde::Serialize;
use uuid::Uuid;

use crate::models::audit::{self, Action};

/// JSON snapshot of an entity for the audit trail. Serialization of our own
/// models cannot fail; a `None` simply leaves the changes column empty.
pub fn snapshot<T: Serialize>(entity: &T) -> Option<serde_json::Value> {
    serde_json::to_value(entity).ok()
}

/// Append one audit row. Runs on whatever connection the caller is on, so
/// lifecycle operations can write it inside their transaction.
pub async fn record<C: ConnectionTrait>(
    conn: &C,
    actor: &str,
    entity: &str,
    entity_id: impl ToString,
    action: Action,
    changes: Option<serde_json::Value>,
) -> Result<(), DbErr> {
    let row = audit::ActiveModel {
        id: Set(Uuid::new_v4()),
        timestamp: Set(chrono::Utc::now()),
        actor: Set(actor.to_string()),
        entity: Set(entity.to_string()),
        entity_id: Set(entity_id.to_string()),
        action: Set(action),
        changes: Set(changes),
    };
    row.insert(conn).await?;
    Ok(())
}

/// Fetch one page of the audit log, newest first. Returns the rows and the
/// total page count.
pub async fn list(
    db: &DatabaseConnection,
    page: u64,
    per_page: u64,
) -> Result<(Vec<audit::Model>, u64), DbErr> {
    let paginator = audit::Entity::find()
        .order_by_desc(audit::Column::Timestamp)
        .paginate(db, per_page);

    let pages = paginator.num_pages().await?;
    let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
    Ok((rows, pages))
}
