pub use sea_orm_migration::prelude::*;

mod m20260410_000001_create_clients_table;
mod m20260410_000002_create_vehicles_table;
mod m20260410_000003_create_contracts_table;
mod m20260410_000004_create_audit_log_table;
mod m20260522_000001_add_contract_break_fields;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260410_000001_create_clients_table::Migration),
            Box::new(m20260410_000002_create_vehicles_table::Migration),
            Box::new(m20260410_000003_create_contracts_table::Migration),
            Box::new(m20260410_000004_create_audit_log_table::Migration),
            Box::new(m20260522_000001_add_contract_break_fields::Migration),
        ]
    }
}
