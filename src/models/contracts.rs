use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract status stored as a lowercase string in the database.
///
/// Transitions: `active → overdue` (lazy, once past the end date),
/// `active/overdue → terminated` (return), `active → broken` (rupture).
/// `terminated` and `broken` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "overdue")]
    Overdue,
    #[sea_orm(string_value = "terminated")]
    Terminated,
    #[sea_orm(string_value = "broken")]
    Broken,
}

impl Status {
    /// A blocking status holds the vehicle and forbids overlapping bookings.
    pub fn is_blocking(self) -> bool {
        matches!(self, Status::Active | Status::Overdue)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Terminated | Status::Broken)
    }
}

/// Payment method stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "card")]
    Card,
    #[sea_orm(string_value = "transfer")]
    Transfer,
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "check")]
    Check,
    #[sea_orm(string_value = "mobile")]
    Mobile,
}

/// Structured payment details captured at contract creation. The shape is
/// dictated by the payment method; cash carries no details at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentDetails {
    Card { card_number: String, expiry: String },
    Transfer { bank_account: String },
    Check { check_number: String },
    Mobile { phone_number: String },
}

impl PaymentDetails {
    /// Whether this payload has the shape required by `method`.
    pub fn matches(&self, method: PaymentMethod) -> bool {
        matches!(
            (self, method),
            (PaymentDetails::Card { .. }, PaymentMethod::Card)
                | (PaymentDetails::Transfer { .. }, PaymentMethod::Transfer)
                | (PaymentDetails::Check { .. }, PaymentMethod::Check)
                | (PaymentDetails::Mobile { .. }, PaymentMethod::Mobile)
        )
    }
}

/// SeaORM entity for the `contracts` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub created_at: DateTimeUtc,
    pub start_date: Date,
    pub end_date: Date,
    pub duration_days: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_amount: Decimal,
    pub status: Status,
    pub payment_method: PaymentMethod,
    pub payment_details: Option<Json>,
    pub break_date: Option<Date>,
    pub break_reason: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub break_fee: Option<Decimal>,
    pub archived: bool,
}

impl Model {
    /// Whole days left until the end date; 0 once the contract has expired.
    pub fn remaining_days(&self, today: NaiveDate) -> i64 {
        if today > self.end_date {
            return 0;
        }
        (self.end_date - today).num_days()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::vehicles::Entity",
        from = "Column::VehicleId",
        to = "super::vehicles::Column::Id"
    )]
    Vehicle,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::vehicles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContract {
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: Date,
    pub duration_days: i32,
    pub payment_method: PaymentMethod,
    pub payment_details: Option<PaymentDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReturnContract {
    /// Defaults to today when omitted.
    pub return_date: Option<Date>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BreakContract {
    pub break_date: Option<Date>,
    pub break_reason: Option<String>,
    pub break_fee: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractListQuery {
    pub status: Option<Status>,
}

/// Money owed or returned when a contract is closed. At most one side is
/// non-zero: a penalty when the return is late, a refund when it is early.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Settlement {
    pub penalty: Decimal,
    pub refund: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicles::Category;

    #[test]
    fn enums_serialize_as_lowercase() {
        // The API speaks the same lowercase values the database stores, so
        // `?status=active` and JSON payloads round-trip unchanged.
        assert_eq!(serde_json::to_value(Status::Active).unwrap(), "active");
        assert_eq!(serde_json::to_value(PaymentMethod::Check).unwrap(), "check");
        assert_eq!(serde_json::to_value(Category::Motorcycle).unwrap(), "motorcycle");

        let status: Status = serde_json::from_value(serde_json::json!("overdue")).unwrap();
        assert_eq!(status, Status::Overdue);
        let method: PaymentMethod = serde_json::from_value(serde_json::json!("card")).unwrap();
        assert_eq!(method, PaymentMethod::Card);
    }
}
