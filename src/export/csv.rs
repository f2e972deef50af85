use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{clients, vehicles};

/// Joined contract line for the full contract export.
pub struct ContractRow {
    pub client: String,
    pub vehicle: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub total_amount: Decimal,
}

/// Overdue contract line for the late-clients export.
pub struct OverdueRow {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub contract_id: Uuid,
    pub vehicle: String,
    pub end_date: NaiveDate,
    pub days_late: i64,
}

/// Active rental line for the rented-vehicles export.
pub struct RentedRow {
    pub vehicle: String,
    pub registration: String,
    pub client: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub contract_id: Uuid,
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ApiError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV export failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal(format!("CSV export failed: {e}")))
}

fn csv_error(e: csv::Error) -> ApiError {
    ApiError::Internal(format!("CSV export failed: {e}"))
}

pub fn clients_csv(clients: &[clients::Model]) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record(["Last name", "First name", "Email", "Phone"])
        .map_err(csv_error)?;
    for client in clients {
        writer
            .write_record([
                client.last_name.as_str(),
                client.first_name.as_str(),
                client.email.as_deref().unwrap_or(""),
                client.phone.as_str(),
            ])
            .map_err(csv_error)?;
    }
    finish(writer)
}

pub fn vehicles_csv(vehicles: &[vehicles::Model]) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record(["Make", "Model", "Year", "Mileage", "Daily rate", "Available"])
        .map_err(csv_error)?;
    for vehicle in vehicles {
        writer
            .write_record([
                vehicle.make.clone(),
                vehicle.model.clone(),
                vehicle.year.to_string(),
                vehicle.mileage.to_string(),
                vehicle.daily_rate.to_string(),
                vehicle.available.to_string(),
            ])
            .map_err(csv_error)?;
    }
    finish(writer)
}

pub fn contracts_csv(rows: &[ContractRow]) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record([
            "Client",
            "Vehicle",
            "Start date",
            "End date",
            "Status",
            "Total amount",
        ])
        .map_err(csv_error)?;
    for row in rows {
        writer
            .write_record([
                row.client.clone(),
                row.vehicle.clone(),
                row.start_date.to_string(),
                row.end_date.to_string(),
                row.status.clone(),
                row.total_amount.to_string(),
            ])
            .map_err(csv_error)?;
    }
    finish(writer)
}

pub fn overdue_clients_csv(rows: &[OverdueRow]) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record([
            "Last name",
            "First name",
            "Email",
            "Phone",
            "Contract ID",
            "Vehicle",
            "End date",
            "Days late",
        ])
        .map_err(csv_error)?;
    for row in rows {
        writer
            .write_record([
                row.last_name.clone(),
                row.first_name.clone(),
                row.email.clone(),
                row.phone.clone(),
                row.contract_id.to_string(),
                row.vehicle.clone(),
                row.end_date.to_string(),
                row.days_late.to_string(),
            ])
            .map_err(csv_error)?;
    }
    finish(writer)
}

pub fn rented_vehicles_csv(rows: &[RentedRow]) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record([
            "Vehicle",
            "Registration",
            "Client",
            "Start date",
            "End date",
            "Contract ID",
        ])
        .map_err(csv_error)?;
    for row in rows {
        writer
            .write_record([
                row.vehicle.clone(),
                row.registration.clone(),
                row.client.clone(),
                row.start_date.to_string(),
                row.end_date.to_string(),
                row.contract_id.to_string(),
            ])
            .map_err(csv_error)?;
    }
    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn clients_csv_has_header_and_rows() {
        let clients = vec![clients::Model {
            id: Uuid::new_v4(),
            last_name: "Diallo".to_string(),
            first_name: "Awa".to_string(),
            phone: "770000000".to_string(),
            email: None,
            created_at: chrono::Utc::now(),
        }];

        let out = clients_csv(&clients).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Last name,First name,Email,Phone"));
        assert_eq!(lines.next(), Some("Diallo,Awa,,770000000"));
        assert_eq!(lines.next(), None);
    }
}
