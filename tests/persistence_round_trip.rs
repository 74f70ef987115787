//! Store round-trips through the file-backed key-value store.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use roost::io::kv::{FileStore, PersistError};
use roost::io::state::{self, ViewState};
use roost::model::expense::{ExpenseDraft, ExpenseStatus};
use roost::model::task::{Recurrence, TaskDraft, Urgency};
use roost::ops::task_filter::FilterMode;
use roost::store::{EntityStore, StoreError, StoreOptions};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 15).unwrap()
}

fn now() -> NaiveDateTime {
    today().and_hms_opt(18, 45, 0).unwrap()
}

fn open(dir: &Path, reseed_tasks: bool) -> Result<EntityStore, StoreError> {
    let kv = FileStore::open(dir).map_err(StoreError::from)?;
    let options = StoreOptions {
        reseed_tasks,
        ..StoreOptions::default()
    };
    EntityStore::load(Box::new(kv), options, today())
}

#[test]
fn expenses_survive_reload_exactly() {
    let tmp = TempDir::new().unwrap();
    let mut store = open(tmp.path(), true).unwrap();
    store
        .add_expense(ExpenseDraft {
            description: "Lamp".into(),
            amount: 0.1 + 0.2,
            payer: "Tamilla Zeynalova".into(),
            participants: vec!["Tamilla Zeynalova".into(), "Janvi Chauhan".into()],
            date: Some(NaiveDate::from_ymd_opt(2024, 11, 3).unwrap()),
            status: ExpenseStatus::Settled,
        })
        .unwrap();
    let before = store.expenses().to_vec();
    drop(store);

    let reloaded = open(tmp.path(), true).unwrap();
    assert_eq!(reloaded.expenses(), before.as_slice());
    assert_eq!(
        reloaded.expense(7).map(|e| e.amount.to_bits()),
        Some((0.1f64 + 0.2).to_bits())
    );
}

#[test]
fn tasks_reseed_by_default() {
    let tmp = TempDir::new().unwrap();
    let mut store = open(tmp.path(), true).unwrap();
    store.quick_add_task("Only here once", today()).unwrap();
    store.delete_task(1).unwrap();
    drop(store);

    let reloaded = open(tmp.path(), true).unwrap();
    assert_eq!(reloaded.tasks().len(), 9);
    assert!(reloaded.task(1).is_some());
    assert!(reloaded.tasks().iter().all(|t| t.title != "Only here once"));
}

#[test]
fn tasks_survive_reload_when_reseeding_is_off() {
    let tmp = TempDir::new().unwrap();
    let mut store = open(tmp.path(), false).unwrap();
    let task = store
        .add_task(TaskDraft {
            title: "Bleed radiators".into(),
            description: "Both bedrooms".into(),
            assignees: vec![2, 5],
            due_date: Some(NaiveDate::from_ymd_opt(2024, 12, 2).unwrap()),
            recurrence: Recurrence::Monthly,
            urgency: Some(Urgency::Moderate),
        })
        .unwrap();
    store.toggle_task_status(task.id).unwrap();
    let before = store.tasks().to_vec();
    drop(store);

    let reloaded = open(tmp.path(), false).unwrap();
    assert_eq!(reloaded.tasks(), before.as_slice());
}

#[test]
fn chat_state_survives_reload() {
    let tmp = TempDir::new().unwrap();
    let mut store = open(tmp.path(), true).unwrap();
    let group = store.create_group_chat("Plants", &[5]).unwrap();
    store.append_message(group.id, 1, "Who has the watering can?", now()).unwrap();
    store.toggle_mute(4).unwrap();
    let conversations = store.conversations().to_vec();
    let messages = store.messages(group.id).to_vec();
    drop(store);

    let reloaded = open(tmp.path(), true).unwrap();
    assert_eq!(reloaded.conversations(), conversations.as_slice());
    assert_eq!(reloaded.messages(group.id), messages.as_slice());
    assert_eq!(reloaded.messages(group.id)[0].timestamp, "6:45 PM");
    assert!(reloaded.chat_settings()[&4].muted);
}

#[test]
fn view_state_round_trip() {
    let tmp = TempDir::new().unwrap();
    let mut kv = FileStore::open(tmp.path()).unwrap();
    let saved = ViewState {
        task_filter: FilterMode::Completed,
        current_conversation: Some(3),
    };
    state::write_view_state(&mut kv, &saved).unwrap();
    assert_eq!(state::read_view_state(&kv), saved);
}

#[test]
fn malformed_document_is_a_persistence_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("conversations.json"), "{ not json").unwrap();
    let err = open(tmp.path(), true).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Persistence(PersistError::Malformed { ref key, .. }) if key == "conversations"
    ));
}
