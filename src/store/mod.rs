//! The entity store: sole owner of every household collection.
//!
//! Engines in [`crate::ops`] only ever see borrowed snapshots of these
//! collections. All mutation goes through the operations defined in this
//! module's submodules, each of which validates first, persists the new
//! collection, and only then swaps it into memory.

pub mod command;
pub mod seed;

mod chats;
mod expenses;
mod tasks;
mod views;

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::io::kv::{self, KeyValueStore, PersistError};
use crate::model::chat::{ChatSetting, Conversation, Message};
use crate::model::config::HouseholdConfig;
use crate::model::expense::Expense;
use crate::model::feed::ActivityFeed;
use crate::model::roommate::{Roommate, Roster};
use crate::model::task::Task;

pub use command::{Command, View, ViewUpdate};
pub use views::{MessagesView, TaskListView};

pub const TASKS_KEY: &str = "tasks";
pub const EXPENSES_KEY: &str = "expenses";
pub const CONVERSATIONS_KEY: &str = "conversations";
pub const MESSAGES_KEY: &str = "messages";
pub const CHAT_SETTINGS_KEY: &str = "chatSettings";

/// A required field was missing or invalid. Nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Name of the offending field, e.g. `title` or `participants`
    pub field: &'static str,
    /// User-facing explanation
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    Expense,
    Roommate,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Task => write!(f, "task"),
            EntityKind::Expense => write!(f, "expense"),
            EntityKind::Roommate => write!(f, "roommate"),
        }
    }
}

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{kind} not found: {id}")]
    InvalidReference { kind: EntityKind, id: u32 },
    #[error("conversation not found: {0}")]
    InvalidConversation(u32),
    #[error("could not save changes: {0}")]
    Persistence(#[from] PersistError),
    #[error("no {0} ids left to assign")]
    IdsExhausted(&'static str),
}

impl StoreError {
    pub(crate) fn missing(kind: EntityKind, id: u32) -> Self {
        StoreError::InvalidReference { kind, id }
    }
}

/// Who the store acts for and how it loads
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub roster: Roster,
    pub current_user: u32,
    /// Replace tasks with the sample set on every load
    pub reseed_tasks: bool,
}

impl StoreOptions {
    pub fn from_config(config: &HouseholdConfig) -> Self {
        StoreOptions {
            roster: config.roster(),
            current_user: config.household.current_user,
            reseed_tasks: config.storage.reseed_tasks,
        }
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            roster: seed::default_roster(),
            current_user: 1,
            reseed_tasks: true,
        }
    }
}

pub struct EntityStore {
    kv: Box<dyn KeyValueStore>,
    roster: Roster,
    current_user: u32,
    me: Roommate,
    tasks: Vec<Task>,
    expenses: Vec<Expense>,
    /// Display order: newest first
    conversations: Vec<Conversation>,
    messages: IndexMap<u32, Vec<Message>>,
    chat_settings: BTreeMap<u32, ChatSetting>,
    feed: ActivityFeed,
}

impl fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("current_user", &self.current_user)
            .field("tasks", &self.tasks.len())
            .field("expenses", &self.expenses.len())
            .field("conversations", &self.conversations.len())
            .finish_non_exhaustive()
    }
}

impl EntityStore {
    /// Restore every collection from `kv`, seeding (and persisting) any that
    /// are absent. Tasks are reseeded on every load while
    /// `options.reseed_tasks` is set.
    pub fn load(
        mut kv: Box<dyn KeyValueStore>,
        options: StoreOptions,
        today: NaiveDate,
    ) -> Result<Self, StoreError> {
        let Some(me) = options.roster.by_id(options.current_user).cloned() else {
            return Err(StoreError::missing(EntityKind::Roommate, options.current_user));
        };

        let tasks = if options.reseed_tasks {
            let tasks = seed::default_tasks(today);
            tracing::debug!(count = tasks.len(), "reseeding tasks");
            kv::persist_json(kv.as_mut(), TASKS_KEY, &tasks)?;
            tasks
        } else {
            restore_or_seed(kv.as_mut(), TASKS_KEY, || seed::default_tasks(today))?
        };
        let expenses = restore_or_seed(kv.as_mut(), EXPENSES_KEY, seed::default_expenses)?;
        let conversations =
            restore_or_seed(kv.as_mut(), CONVERSATIONS_KEY, seed::default_conversations)?;
        let current_user = options.current_user;
        let messages = restore_or_seed(kv.as_mut(), MESSAGES_KEY, || {
            seed::default_messages(current_user)
        })?;
        let chat_settings =
            restore_or_seed(kv.as_mut(), CHAT_SETTINGS_KEY, seed::default_chat_settings)?;

        tracing::debug!(
            tasks = tasks.len(),
            expenses = expenses.len(),
            conversations = conversations.len(),
            "entity store loaded"
        );

        Ok(EntityStore {
            kv,
            roster: options.roster,
            current_user,
            me,
            tasks,
            expenses,
            conversations,
            messages,
            chat_settings,
            feed: seed::default_feed(),
        })
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn current_user_id(&self) -> u32 {
        self.current_user
    }

    pub fn current_user(&self) -> &Roommate {
        &self.me
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: u32) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn conversation(&self, id: u32) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Messages of a conversation; empty when it has none yet
    pub fn messages(&self, conversation_id: u32) -> &[Message] {
        self.messages
            .get(&conversation_id)
            .map_or(&[], |m| m.as_slice())
    }

    pub fn chat_settings(&self) -> &BTreeMap<u32, ChatSetting> {
        &self.chat_settings
    }

    pub fn feed(&self) -> &ActivityFeed {
        &self.feed
    }

    /// The underlying key-value store, for presentation state kept beside
    /// the entity documents.
    pub fn kv(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }

    pub fn kv_mut(&mut self) -> &mut dyn KeyValueStore {
        self.kv.as_mut()
    }
}

/// `max(existing ids) + 1`, or 1 for an empty collection. Fails once the
/// largest id is `u32::MAX`.
pub(crate) fn next_id(what: &'static str, ids: impl Iterator<Item = u32>) -> Result<u32, StoreError> {
    match ids.max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted(what)),
    }
}

/// Persist `next` under `key`, then replace `slot` with it. On a failed
/// write `slot` is untouched.
pub(crate) fn commit<T: Serialize>(
    kv: &mut dyn KeyValueStore,
    key: &str,
    slot: &mut T,
    next: T,
) -> Result<(), StoreError> {
    kv::persist_json(kv, key, &next)?;
    *slot = next;
    Ok(())
}

fn restore_or_seed<T, F>(kv: &mut dyn KeyValueStore, key: &str, seed: F) -> Result<T, StoreError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    if let Some(stored) = kv::load_json::<T>(kv, key)? {
        tracing::debug!(key, "restored from store");
        return Ok(stored);
    }
    let seeded = seed();
    tracing::debug!(key, "seeding defaults");
    kv::persist_json(kv, key, &seeded)?;
    Ok(seeded)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::io::kv::MemoryStore;

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 15).unwrap()
    }

    pub fn store() -> EntityStore {
        EntityStore::load(Box::new(MemoryStore::new()), StoreOptions::default(), today()).unwrap()
    }

    /// A store whose writes all fail after loading
    pub fn failing_store() -> EntityStore {
        let mut store = store();
        let mut kv = MemoryStore::new();
        kv.set_fail_writes(true);
        store.kv = Box::new(kv);
        store
    }

    /// Decode what the store last persisted under `key`
    pub fn persisted<T: DeserializeOwned>(store: &EntityStore, key: &str) -> T {
        kv::load_json(store.kv(), key).unwrap().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::io::kv::MemoryStore;
    use crate::model::expense::ExpenseStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_load_seeds_and_persists_everything() {
        let store = store();
        assert_eq!(store.tasks().len(), 9);
        assert_eq!(store.expenses().len(), 6);
        assert_eq!(store.conversations().len(), 4);
        assert_eq!(store.messages(1).len(), 5);
        assert!(store.chat_settings().is_empty());
        for key in [
            TASKS_KEY,
            EXPENSES_KEY,
            CONVERSATIONS_KEY,
            MESSAGES_KEY,
            CHAT_SETTINGS_KEY,
        ] {
            assert!(store.kv().load(key).unwrap().is_some(), "{} not persisted", key);
        }
    }

    #[test]
    fn tasks_always_reseed_but_expenses_restore() {
        let mut kv = MemoryStore::new();
        let custom_task = vec![Task {
            id: 42,
            title: "Only task".into(),
            description: String::new(),
            assignees: vec![1],
            due_date: today(),
            status: crate::model::task::TaskStatus::Pending,
            recurrence: Default::default(),
            urgency: None,
        }];
        let custom_expense = vec![Expense {
            id: 7,
            description: "Pizza".into(),
            amount: 30.0,
            payer: "Janvi Chauhan".into(),
            participants: vec!["Janvi Chauhan".into(), "Aaish Ahmed".into()],
            date: today(),
            status: ExpenseStatus::Pending,
        }];
        kv::persist_json(&mut kv, TASKS_KEY, &custom_task).unwrap();
        kv::persist_json(&mut kv, EXPENSES_KEY, &custom_expense).unwrap();

        let store = EntityStore::load(Box::new(kv), StoreOptions::default(), today()).unwrap();
        // Stored tasks are discarded in favour of the sample set
        assert_eq!(store.tasks().len(), 9);
        assert!(store.task(42).is_none());
        assert_eq!(store.expenses(), custom_expense.as_slice());
    }

    #[test]
    fn tasks_restore_when_reseeding_is_off() {
        let mut kv = MemoryStore::new();
        let tasks = seed::default_tasks(today())[..2].to_vec();
        kv::persist_json(&mut kv, TASKS_KEY, &tasks).unwrap();
        let options = StoreOptions {
            reseed_tasks: false,
            ..StoreOptions::default()
        };
        let store = EntityStore::load(Box::new(kv), options, today()).unwrap();
        assert_eq!(store.tasks(), tasks.as_slice());
    }

    #[test]
    fn malformed_document_fails_load() {
        let mut kv = MemoryStore::new();
        kv.persist(EXPENSES_KEY, "[{\"id\": }").unwrap();
        let err = EntityStore::load(Box::new(kv), StoreOptions::default(), today()).unwrap_err();
        assert!(matches!(err, StoreError::Persistence(PersistError::Malformed { .. })));
    }

    #[test]
    fn unknown_current_user_fails_load() {
        let options = StoreOptions {
            current_user: 99,
            ..StoreOptions::default()
        };
        let err = EntityStore::load(Box::new(MemoryStore::new()), options, today()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidReference {
                kind: EntityKind::Roommate,
                id: 99
            }
        ));
    }

    #[test]
    fn write_failure_on_load_propagates() {
        let mut kv = MemoryStore::new();
        kv.set_fail_writes(true);
        let err = EntityStore::load(Box::new(kv), StoreOptions::default(), today()).unwrap_err();
        assert!(matches!(err, StoreError::Persistence(PersistError::Rejected { .. })));
    }

    #[test]
    fn next_id_is_max_plus_one() {
        assert_eq!(next_id("task", [3, 9, 4].into_iter()).unwrap(), 10);
        assert_eq!(next_id("task", std::iter::empty()).unwrap(), 1);
        assert!(matches!(
            next_id("task", [u32::MAX].into_iter()),
            Err(StoreError::IdsExhausted("task"))
        ));
    }

    #[test]
    fn restored_max_id_refuses_new_expense() {
        let mut kv = MemoryStore::new();
        let expenses = vec![Expense {
            id: u32::MAX,
            description: "Deposit".into(),
            amount: 500.0,
            payer: "Janvi Chauhan".into(),
            participants: vec!["Janvi Chauhan".into()],
            date: today(),
            status: ExpenseStatus::Pending,
        }];
        kv::persist_json(&mut kv, EXPENSES_KEY, &expenses).unwrap();
        let mut store = EntityStore::load(Box::new(kv), StoreOptions::default(), today()).unwrap();

        let draft = crate::model::expense::ExpenseDraft {
            description: "Milk".into(),
            amount: 4.0,
            payer: "Janvi Chauhan".into(),
            participants: vec!["Janvi Chauhan".into()],
            date: Some(today()),
            status: ExpenseStatus::Pending,
        };
        let err = store.add_expense(draft).unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted("expense")));
        assert_eq!(store.expenses(), expenses.as_slice());
        assert_eq!(persisted::<Vec<Expense>>(&store, EXPENSES_KEY), expenses);
    }

    #[test]
    fn current_user_resolves() {
        let store = store();
        assert_eq!(store.current_user().name, "Janvi Chauhan");
    }
}
