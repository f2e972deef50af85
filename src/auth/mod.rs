use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};

/// Wrapper type to store the shared admin token in Actix app data.
#[derive(Clone)]
pub struct AdminToken(pub String);

/// The acting staff member, authenticated by the shared admin bearer token.
///
/// The actor name comes from the `X-Actor` header (defaulting to `admin`)
/// and is passed explicitly into every lifecycle operation so the audit log
/// records who did what.
pub struct Staff {
    pub actor: String,
}

impl FromRequest for Staff {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<Staff, Error> {
    // 1. Extract the Bearer token from the Authorization header.
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Missing Authorization header"))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
    })?;

    // 2. Compare against the configured admin token.
    let expected = req
        .app_data::<web::Data<AdminToken>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Admin token not configured"))?;

    if token != expected.0 {
        return Err(actix_web::error::ErrorUnauthorized("Invalid admin token"));
    }

    // 3. The acting staff name travels in a separate header.
    let actor = req
        .headers()
        .get("X-Actor")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("admin")
        .to_string();

    Ok(Staff { actor })
}
