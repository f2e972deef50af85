use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::Staff;
use crate::db::audit as audit_db;
use crate::error::ApiError;
use crate::models::PaginationQuery;

/// GET /api/audit — page through the audit log, newest entry first.
pub async fn get_audit_log(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    let (entries, pages) = audit_db::list(db.get_ref(), query.page(), query.limit()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "entries": entries,
        "page": query.page(),
        "pages": pages,
    })))
}
