use actix_web::{HttpResponse, web};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::auth::Staff;
use crate::error::ApiError;
use crate::jobs::{self, notify::Notifier};

/// POST /api/jobs/sweep — run the expiry sweep. Invoked by cron; safe to
/// re-run, reminders aside.
pub async fn run_sweep(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
    notifier: web::Data<Arc<dyn Notifier>>,
) -> Result<HttpResponse, ApiError> {
    let today = Utc::now().date_naive();
    let report =
        jobs::sweep_expiring_and_overdue(db.get_ref(), notifier.get_ref().as_ref(), today).await?;
    Ok(HttpResponse::Ok().json(report))
}

#[derive(Debug, serde::Deserialize)]
pub struct ArchiveQuery {
    pub cutoff_days: Option<u64>,
}

/// POST /api/jobs/archive — archive old terminated contracts.
pub async fn run_archive(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ArchiveQuery>,
) -> Result<HttpResponse, ApiError> {
    let today = Utc::now().date_naive();
    let cutoff_days = query
        .cutoff_days
        .unwrap_or(jobs::DEFAULT_ARCHIVE_CUTOFF_DAYS);
    let archived = jobs::archive_old_terminated(db.get_ref(), cutoff_days, today).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "archived": archived })))
}
