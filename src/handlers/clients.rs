use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::Staff;
use crate::db::clients as client_db;
use crate::error::ApiError;
use crate::models::clients::{CreateClient, UpdateClient};

/// GET /api/clients — list all clients.
pub async fn get_clients(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let clients = client_db::get_all_clients(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(clients))
}

/// GET /api/clients/{id} — one client with their rental history.
pub async fn get_client(
    _staff: Staff,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let client = client_db::get_client_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Client", id))?;
    let contracts = client_db::get_client_contracts(db.get_ref(), id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "client": client,
        "contracts": contracts,
    })))
}

/// POST /api/clients — register a new client.
pub async fn create_client(
    staff: Staff,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateClient>,
) -> Result<HttpResponse, ApiError> {
    let client = client_db::insert_client(db.get_ref(), &staff.actor, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(client))
}

/// PUT /api/clients/{id} — update a client.
pub async fn update_client(
    staff: Staff,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateClient>,
) -> Result<HttpResponse, ApiError> {
    let updated = client_db::update_client(
        db.get_ref(),
        &staff.actor,
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/clients/{id} — delete a client.
pub async fn delete_client(
    staff: Staff,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    client_db::delete_client(db.get_ref(), &staff.actor, id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Client {id} deleted"),
    })))
}
