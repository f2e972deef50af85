use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vehicle category stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Category {
    #[sea_orm(string_value = "car")]
    Car,
    #[sea_orm(string_value = "motorcycle")]
    Motorcycle,
}

/// SeaORM entity for the `vehicles` table.
///
/// `available` is maintained by the contract lifecycle: false while a
/// contract in a blocking status (active/overdue) holds the vehicle.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category: Category,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[sea_orm(unique)]
    pub registration: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub daily_rate: Decimal,
    /// Engine displacement in cc; motorcycles only.
    pub engine_cc: Option<i32>,
    /// Door count; cars only.
    pub doors: Option<i32>,
    pub mileage: i32,
    pub available: bool,
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Human label used in exports, notifications and the contract PDF.
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.registration)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contracts::Entity")]
    Contracts,
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVehicle {
    pub category: Category,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub registration: String,
    pub daily_rate: Decimal,
    pub engine_cc: Option<i32>,
    pub doors: Option<i32>,
    pub mileage: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVehicle {
    pub category: Option<Category>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub registration: Option<String>,
    pub daily_rate: Option<Decimal>,
    pub engine_cc: Option<i32>,
    pub doors: Option<i32>,
    pub mileage: Option<i32>,
}
