pub mod audit;
pub mod clients;
pub mod contracts;
pub mod exports;
pub mod jobs;
pub mod stats;
pub mod vehicles;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Client routes (staff only) ──
    cfg.service(
        web::scope("/clients")
            .route("", web::get().to(clients::get_clients))
            .route("", web::post().to(clients::create_client))
            .route("/{id}", web::get().to(clients::get_client))
            .route("/{id}", web::put().to(clients::update_client))
            .route("/{id}", web::delete().to(clients::delete_client)),
    );

    // ── Vehicle routes (the catalogue is public, the rest is staff only) ──
    cfg.service(
        web::scope("/vehicles")
            .route("", web::get().to(vehicles::get_vehicles))
            .route("", web::post().to(vehicles::create_vehicle))
            .route("/available", web::get().to(vehicles::get_available_vehicles))
            .route("/{id}", web::get().to(vehicles::get_vehicle))
            .route("/{id}", web::put().to(vehicles::update_vehicle))
            .route("/{id}", web::delete().to(vehicles::delete_vehicle)),
    );

    // ── Contract lifecycle (quoting is public, the rest is staff only) ──
    cfg.service(
        web::scope("/contracts")
            .route("", web::get().to(contracts::get_contracts))
            .route("", web::post().to(contracts::create_contract))
            .route("/quote", web::get().to(contracts::quote))
            .route("/{id}", web::get().to(contracts::get_contract))
            .route("/{id}/return", web::post().to(contracts::return_contract))
            .route("/{id}/break", web::post().to(contracts::break_contract))
            .route("/{id}/pdf", web::get().to(contracts::contract_pdf)),
    );

    // ── CSV exports (staff only) ──
    cfg.service(
        web::scope("/exports")
            .route("/clients.csv", web::get().to(exports::export_clients))
            .route("/vehicles.csv", web::get().to(exports::export_vehicles))
            .route("/contracts.csv", web::get().to(exports::export_contracts))
            .route(
                "/overdue-clients.csv",
                web::get().to(exports::export_overdue_clients),
            )
            .route(
                "/rented-vehicles.csv",
                web::get().to(exports::export_rented_vehicles),
            ),
    );

    // ── Dashboard stats (staff only) ──
    cfg.service(
        web::scope("/stats")
            .route("/summary", web::get().to(stats::summary))
            .route(
                "/contracts-per-month",
                web::get().to(stats::contracts_per_month),
            )
            .route(
                "/vehicle-occupancy",
                web::get().to(stats::vehicle_occupancy),
            ),
    );

    // ── Audit log (staff only) ──
    cfg.service(web::resource("/audit").route(web::get().to(audit::get_audit_log)));

    // ── Periodic jobs, triggered by cron over HTTP (staff only) ──
    cfg.service(
        web::scope("/jobs")
            .route("/sweep", web::post().to(jobs::run_sweep))
            .route("/archive", web::post().to(jobs::run_archive)),
    );
}
