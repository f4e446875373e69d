use crate::commands::{CmdMessage, CmdResult, CollectionState};
use crate::error::Result;
use crate::store::DataStore;

use super::favorite::prune;

pub fn run<S: DataStore>(store: &mut S, state: &mut CollectionState) -> Result<CmdResult> {
    let pruned = prune(store, state)?;
    let mut result = CmdResult::default();

    if pruned == 0 {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
        result.add_message(CmdMessage::info(format!(
            "  - Removed {} favorite(s) pointing at deleted cars.",
            pruned
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::InMemoryStore;
    use uuid::Uuid;

    #[test]
    fn reports_clean_store() {
        let mut store = InMemoryStore::new();
        let mut state = CollectionState::default();
        let result = run(&mut store, &mut state).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn reports_pruned_favorites() {
        let mut store = InMemoryStore::new();
        let mut state = CollectionState::default();
        state.favorites.insert(Uuid::new_v4());
        let result = run(&mut store, &mut state).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(state.favorites.is_empty());
    }
}
