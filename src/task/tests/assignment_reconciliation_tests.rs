//! Reconciliation of persisted assignment links during task updates.

use std::collections::BTreeSet;

use chrono::Utc;
use rstest::rstest;
use uuid::Uuid;

use crate::task::adapters::postgres::repository::assignment_changes;
use crate::task::domain::TaskId;

#[rstest]
fn retained_workers_keep_their_rows() {
    let kept = Uuid::new_v4();
    let dropped = Uuid::new_v4();
    let joined = Uuid::new_v4();
    let existing: BTreeSet<Uuid> = [kept, dropped].into_iter().collect();
    let desired: BTreeSet<Uuid> = [kept, joined].into_iter().collect();

    let (removed, added) = assignment_changes(TaskId::new(), &desired, &existing, Utc::now());

    assert_eq!(removed, vec![dropped]);
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].user_id, joined);
    assert!(!added.iter().any(|row| row.user_id == kept));
}

#[rstest]
fn unchanged_set_touches_nothing() {
    let workers: BTreeSet<Uuid> = [Uuid::new_v4(), Uuid::new_v4()].into_iter().collect();

    let (removed, added) = assignment_changes(TaskId::new(), &workers, &workers, Utc::now());

    assert!(removed.is_empty());
    assert!(added.is_empty());
}

#[rstest]
fn clearing_assignees_removes_every_row() {
    let existing: BTreeSet<Uuid> = [Uuid::new_v4(), Uuid::new_v4()].into_iter().collect();
    let desired = BTreeSet::new();

    let (removed, added) = assignment_changes(TaskId::new(), &desired, &existing, Utc::now());

    assert_eq!(removed.len(), 2);
    assert!(added.is_empty());
}
