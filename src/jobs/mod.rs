pub mod notify;

use chrono::{Days, NaiveDate};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use uuid::Uuid;

use crate::db::{contracts as contract_db, vehicles as vehicle_db};
use crate::error::ApiError;
use crate::models::contracts::Status;
use notify::Notifier;

/// Terminated contracts older than this many days get archived.
pub const DEFAULT_ARCHIVE_CUTOFF_DAYS: u64 = 180;

/// How close to the end date a contract has to be before the sweep sends a
/// reminder.
const REMINDER_WINDOW_DAYS: i64 = 2;

/// Outcome of one expiry sweep.
#[derive(Debug, Default, Serialize)]
pub struct SweepReport {
    pub notified: Vec<Uuid>,
    pub marked_overdue: Vec<Uuid>,
}

/// What the sweep should do with one active contract.
#[derive(Debug, PartialEq, Eq)]
pub enum SweepAction {
    /// End date within the reminder window: tell the client to plan the
    /// return.
    Remind { days_left: i64 },
    /// Past the end date: flip to overdue and notify.
    MarkOverdue,
}

/// Classify one contract for the sweep. Only active contracts get an action;
/// a contract ending today is neither late nor worth a reminder.
pub fn sweep_action(status: Status, end_date: NaiveDate, today: NaiveDate) -> Option<SweepAction> {
    if status != Status::Active {
        return None;
    }
    if end_date < today {
        return Some(SweepAction::MarkOverdue);
    }
    let days_left = (end_date - today).num_days();
    if (1..=REMINDER_WINDOW_DAYS).contains(&days_left) {
        return Some(SweepAction::Remind { days_left });
    }
    None
}

/// Periodic expiry sweep, invoked by an external scheduler: reminds clients
/// whose rental ends within two days and flips expired contracts to
/// `overdue`. Notification failures are logged and never stop the sweep.
pub async fn sweep_expiring_and_overdue(
    db: &DatabaseConnection,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> Result<SweepReport, ApiError> {
    let mut report = SweepReport::default();

    for (contract, client) in contract_db::get_active_with_clients(db).await? {
        let Some(action) = sweep_action(contract.status, contract.end_date, today) else {
            continue;
        };

        let vehicle_label = match vehicle_db::get_vehicle_by_id(db, contract.vehicle_id).await? {
            Some(vehicle) => vehicle.label(),
            None => "the rented vehicle".to_string(),
        };

        match action {
            SweepAction::Remind { days_left } => {
                if let Some((email, first_name)) = contact(&client) {
                    let subject = format!("Reminder: your rental ends in {days_left} day(s)");
                    let body = format!(
                        "Hello {first_name},\n\n\
                         Your rental of {vehicle_label} ends in {days_left} day(s).\n\
                         Please plan the return of the vehicle.\n\n\
                         Best regards,\nThe rental team"
                    );
                    if deliver(notifier, &email, &subject, &body, contract.id) {
                        report.notified.push(contract.id);
                    }
                }
            }
            SweepAction::MarkOverdue => {
                let contract = contract_db::evaluate_overdue(db, contract, today).await?;
                report.marked_overdue.push(contract.id);

                if let Some((email, first_name)) = contact(&client) {
                    let subject = "Rental expired - action required".to_string();
                    let body = format!(
                        "Hello {first_name},\n\n\
                         Your rental of {vehicle_label} has expired.\n\
                         Please return the vehicle as soon as possible.\n\n\
                         Best regards,\nThe rental team"
                    );
                    if deliver(notifier, &email, &subject, &body, contract.id) {
                        report.notified.push(contract.id);
                    }
                }
            }
        }
    }

    tracing::info!(
        notified = report.notified.len(),
        marked_overdue = report.marked_overdue.len(),
        "expiry sweep finished"
    );
    Ok(report)
}

fn contact(client: &Option<crate::models::clients::Model>) -> Option<(String, String)> {
    let client = client.as_ref()?;
    let email = client.email.clone()?;
    Some((email, client.first_name.clone()))
}

fn deliver(
    notifier: &dyn Notifier,
    recipient: &str,
    subject: &str,
    body: &str,
    contract_id: Uuid,
) -> bool {
    match notifier.notify(recipient, subject, body) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(contract = %contract_id, "notification failed: {e}");
            false
        }
    }
}

/// Periodic archive job: flags terminated contracts that ended more than
/// `cutoff_days` ago. Returns the number of contracts archived.
pub async fn archive_old_terminated(
    db: &DatabaseConnection,
    cutoff_days: u64,
    today: NaiveDate,
) -> Result<u64, ApiError> {
    let cutoff = today
        .checked_sub_days(Days::new(cutoff_days))
        .unwrap_or(NaiveDate::MIN);

    let archived = contract_db::archive_terminated_before(db, cutoff).await?;
    tracing::info!(archived, "archive job finished");
    Ok(archived)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    #[test]
    fn expired_active_contracts_are_marked_overdue() {
        assert_eq!(
            sweep_action(Status::Active, day(10), day(11)),
            Some(SweepAction::MarkOverdue)
        );
    }

    #[test]
    fn contracts_ending_within_two_days_get_a_reminder() {
        assert_eq!(
            sweep_action(Status::Active, day(12), day(10)),
            Some(SweepAction::Remind { days_left: 2 })
        );
        assert_eq!(
            sweep_action(Status::Active, day(11), day(10)),
            Some(SweepAction::Remind { days_left: 1 })
        );
    }

    #[test]
    fn contracts_ending_today_or_later_are_left_alone() {
        assert_eq!(sweep_action(Status::Active, day(10), day(10)), None);
        assert_eq!(sweep_action(Status::Active, day(20), day(10)), None);
    }

    #[test]
    fn non_active_contracts_are_skipped() {
        assert_eq!(sweep_action(Status::Overdue, day(5), day(10)), None);
        assert_eq!(sweep_action(Status::Terminated, day(5), day(10)), None);
        assert_eq!(sweep_action(Status::Broken, day(5), day(10)), None);
    }
}
