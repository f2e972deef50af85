use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use autorent_backend::auth::AdminToken;
use autorent_backend::create_pool;
use autorent_backend::handlers;
use autorent_backend::jobs::notify::{LogNotifier, Notifier, SmtpNotifier};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db = create_pool().await;
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    let db_data = web::Data::new(db);

    let admin_token = std::env::var("ADMIN_TOKEN").expect("ADMIN_TOKEN must be set");
    let admin_token = web::Data::new(AdminToken(admin_token));

    // SMTP is optional; without it, notifications land in the logs.
    let notifier: Arc<dyn Notifier> = match SmtpNotifier::from_env() {
        Some(smtp) => {
            tracing::info!("SMTP notifier configured");
            Arc::new(smtp)
        }
        None => {
            tracing::warn!("SMTP not configured; notifications will only be logged");
            Arc::new(LogNotifier)
        }
    };
    let notifier_data = web::Data::new(notifier);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .allowed_header("X-Actor")
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(admin_token.clone())
            .app_data(notifier_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
