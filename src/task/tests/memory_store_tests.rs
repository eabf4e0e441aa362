//! Tests for the in-memory store and its fault injection.

use super::day;
use crate::task::adapters::memory::{Fault, InMemoryTaskStore};
use crate::task::domain::{OwnerId, RawTaskRecord, TaskRecord};
use crate::task::ports::{StoreOperation, TaskStore, TaskStoreError};
use rstest::{fixture, rstest};

#[fixture]
fn owner() -> OwnerId {
    OwnerId::new("owner-a").expect("valid owner")
}

fn record(id: &str, owner: &str, date_day: u32) -> RawTaskRecord {
    RawTaskRecord::new(id)
        .with_title(format!("task {id}"))
        .with_owner(owner)
        .with_completed(false)
        .with_date(day(2024, 5, date_day))
}

#[rstest]
#[tokio::test]
async fn fetch_filters_by_owner_and_date(owner: OwnerId) {
    let store = InMemoryTaskStore::with_records([
        record("p1", "owner-a", 1),
        record("p2", "owner-b", 1),
        record("p3", "owner-a", 2),
    ]);

    let fetched = store
        .fetch_tasks(&owner, day(2024, 5, 1))
        .await
        .expect("fetch should succeed");

    let ids: Vec<&str> = fetched.iter().map(|raw| raw.source_id.as_str()).collect();
    assert_eq!(ids, vec!["p1"]);
}

#[rstest]
#[tokio::test]
async fn created_drafts_become_fetchable_records(owner: OwnerId) {
    let store = InMemoryTaskStore::new();
    store
        .insert(record("p1", "owner-a", 1))
        .expect("insert should succeed");
    let yesterday = store
        .fetch_tasks(&owner, day(2024, 5, 1))
        .await
        .expect("fetch should succeed");
    let parsed = TaskRecord::from_raw(yesterday.into_iter().next().expect("one record"))
        .expect("record is valid");

    store
        .create_task(&parsed.carry_to(day(2024, 5, 2)))
        .await
        .expect("create should succeed");

    let today = store
        .fetch_tasks(&owner, day(2024, 5, 2))
        .await
        .expect("fetch should succeed");
    assert_eq!(today.len(), 1);
    assert_eq!(store.created().len(), 1);
}

#[rstest]
#[tokio::test]
async fn fault_fails_only_the_scripted_window(owner: OwnerId) {
    let store = InMemoryTaskStore::new();
    store
        .inject(
            StoreOperation::FetchTasks,
            Fault::new(TaskStoreError::Unavailable("down".to_owned()))
                .after(1)
                .times(2),
        )
        .expect("inject should succeed");

    let mut outcomes = Vec::new();
    for _ in 0..4 {
        outcomes.push(store.fetch_tasks(&owner, day(2024, 5, 1)).await.is_ok());
    }

    assert_eq!(outcomes, vec![true, false, false, true]);
    assert_eq!(store.calls(StoreOperation::FetchTasks), 4);
}
