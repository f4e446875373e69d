use crate::commands::{CmdMessage, CmdResult, CollectionState};
use crate::error::Result;
use crate::store::{save_collection, DataStore};

/// Removes the car at `index` (0-based).
///
/// Positions can be stale by the time they reach here, so an out-of-range
/// index is not an error: the collection is left untouched and an info
/// message says so. Favorites are not touched either.
pub fn run<S: DataStore>(
    store: &mut S,
    state: &mut CollectionState,
    index: usize,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if index >= state.cars.len() {
        tracing::debug!(index, len = state.cars.len(), "delete ignored, index out of range");
        result.add_message(CmdMessage::info(format!("No car at position {}", index + 1)));
        return Ok(result);
    }

    let mut next = state.cars.clone();
    let removed = next.remove(index);
    save_collection(store, &next)?;
    state.cars = next;
    state.session.on_deleted(index);
    tracing::debug!(id = %removed.id, index, "car deleted");

    result.add_message(CmdMessage::success(format!(
        "Car deleted ({}): {}",
        index + 1,
        removed.name
    )));
    Ok(result.with_affected_cars(vec![removed]))
}

/// Deletes several positions, highest first so earlier removals don't shift
/// the ones still pending. Duplicates are ignored.
pub fn run_many<S: DataStore>(
    store: &mut S,
    state: &mut CollectionState,
    indexes: &[usize],
) -> Result<CmdResult> {
    let mut ordered = indexes.to_vec();
    ordered.sort_unstable_by(|a, b| b.cmp(a));
    ordered.dedup();

    let mut result = CmdResult::default();
    for index in ordered {
        let single = run(store, state, index)?;
        result.affected_cars.extend(single.affected_cars);
        result.messages.extend(single.messages);
    }
    Ok(result)
}
