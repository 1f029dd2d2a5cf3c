//! Conversion of timesheet entries into persistence rows.

use chrono::Utc;
use rstest::rstest;

use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use crate::timesheet::adapters::postgres::repository::entry_to_new_row;
use crate::timesheet::domain::{PersistedTimesheetEntryData, TimesheetEntry, TimesheetEntryId};
use crate::timesheet::ports::TimesheetRepositoryError;

fn entry_with_minutes(minutes: u32) -> TimesheetEntry {
    TimesheetEntry::from_persisted(PersistedTimesheetEntryData {
        id: TimesheetEntryId::new(),
        worker_id: UserId::new(),
        task_id: TaskId::new(),
        work_date: Utc::now().date_naive(),
        minutes,
        note: None,
        created_at: Utc::now(),
    })
}

#[rstest]
fn minutes_survive_conversion_unchanged() {
    let entry = entry_with_minutes(480);

    let row = entry_to_new_row(&entry).expect("conversion succeeds");

    assert_eq!(row.minutes, 480);
}

#[rstest]
fn oversized_minutes_are_rejected_not_clamped() {
    let entry = entry_with_minutes(u32::MAX);

    let result = entry_to_new_row(&entry);

    assert!(matches!(
        result,
        Err(TimesheetRepositoryError::Persistence(_))
    ));
}
