use serde::{Deserialize, Serialize};

use crate::io::kv::{self, KeyValueStore, PersistError};
use crate::ops::task_filter::FilterMode;

/// Key the view state is stored under
pub const VIEW_STATE_KEY: &str = "viewState";

/// Persisted presentation state: which task filter and conversation were
/// last in view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    #[serde(default)]
    pub task_filter: FilterMode,
    #[serde(default)]
    pub current_conversation: Option<u32>,
}

/// Read the view state. Missing or malformed documents yield defaults.
pub fn read_view_state(store: &dyn KeyValueStore) -> ViewState {
    match kv::load_json::<ViewState>(store, VIEW_STATE_KEY) {
        Ok(Some(state)) => state,
        Ok(None) => ViewState::default(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable view state");
            ViewState::default()
        }
    }
}

pub fn write_view_state(
    store: &mut dyn KeyValueStore,
    state: &ViewState,
) -> Result<(), PersistError> {
    kv::persist_json(store, VIEW_STATE_KEY, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::kv::MemoryStore;

    #[test]
    fn write_and_read_round_trip() {
        let mut store = MemoryStore::new();
        let state = ViewState {
            task_filter: FilterMode::Completed,
            current_conversation: Some(4),
        };
        write_view_state(&mut store, &state).unwrap();
        assert_eq!(read_view_state(&store), state);
    }

    #[test]
    fn read_missing_returns_default() {
        let store = MemoryStore::new();
        let state = read_view_state(&store);
        assert_eq!(state.task_filter, FilterMode::My);
        assert!(state.current_conversation.is_none());
    }

    #[test]
    fn read_malformed_returns_default() {
        let mut store = MemoryStore::new();
        store.persist(VIEW_STATE_KEY, "not json {{{").unwrap();
        assert_eq!(read_view_state(&store), ViewState::default());
    }

    #[test]
    fn serde_defaults_on_empty_object() {
        let state: ViewState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, ViewState::default());
    }
}
