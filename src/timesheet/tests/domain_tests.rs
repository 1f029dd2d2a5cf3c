//! Invariant tests for timesheet entries.

use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use crate::timesheet::domain::{MAX_MINUTES_PER_ENTRY, TimesheetDomainError, TimesheetEntry};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::rstest;

fn work_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 17).expect("valid date")
}

#[rstest]
#[case::one_minute(1)]
#[case::full_day(MAX_MINUTES_PER_ENTRY)]
fn accepts_minutes_within_range(#[case] minutes: u32) {
    let entry = TimesheetEntry::new(
        UserId::new(),
        TaskId::new(),
        work_date(),
        minutes,
        None,
        &DefaultClock,
    )
    .expect("valid entry");

    assert_eq!(entry.minutes(), minutes);
}

#[rstest]
#[case::zero(0)]
#[case::over_a_day(MAX_MINUTES_PER_ENTRY + 1)]
fn rejects_minutes_outside_range(#[case] minutes: u32) {
    let result = TimesheetEntry::new(
        UserId::new(),
        TaskId::new(),
        work_date(),
        minutes,
        None,
        &DefaultClock,
    );

    assert!(matches!(
        result,
        Err(TimesheetDomainError::InvalidMinutes(m)) if m == minutes
    ));
}

#[rstest]
fn keeps_the_note_verbatim() {
    let entry = TimesheetEntry::new(
        UserId::new(),
        TaskId::new(),
        work_date(),
        90,
        Some("Sprint review prep".to_owned()),
        &DefaultClock,
    )
    .expect("valid entry");

    assert_eq!(entry.note(), Some("Sprint review prep"));
}
