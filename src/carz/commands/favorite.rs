use crate::commands::{CmdMessage, CmdResult, CollectionState};
use crate::error::Result;
use crate::model::Favorites;
use crate::store::{save_favorites, DataStore};
use uuid::Uuid;

/// Adds `id` when absent, removes it when present. Returns whether it is a
/// favorite afterwards.
pub fn toggle_id(favorites: &mut Favorites, id: Uuid) -> bool {
    if favorites.remove(&id) {
        false
    } else {
        favorites.insert(id);
        true
    }
}

/// Toggles the favorite flag of the car at `index` (0-based) and persists the
/// favorites set. Out-of-range indexes are ignored.
pub fn toggle<S: DataStore>(
    store: &mut S,
    state: &mut CollectionState,
    index: usize,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(car) = state.cars.get(index).cloned() else {
        result.add_message(CmdMessage::info(format!("No car at position {}", index + 1)));
        return Ok(result);
    };

    let mut next = state.favorites.clone();
    let now_favorite = toggle_id(&mut next, car.id);
    save_favorites(store, &next)?;
    state.favorites = next;
    tracing::debug!(id = %car.id, now_favorite, "favorite toggled");

    let verb = if now_favorite {
        "added to"
    } else {
        "removed from"
    };
    result.add_message(CmdMessage::success(format!(
        "{} {} favorites",
        car.name, verb
    )));
    Ok(result.with_affected_cars(vec![car]))
}

/// Drops favorites whose car no longer exists. Returns how many were removed.
pub fn prune<S: DataStore>(store: &mut S, state: &mut CollectionState) -> Result<usize> {
    let mut next = state.favorites.clone();
    next.retain(|id| state.cars.iter().any(|car| &car.id == id));
    let removed = state.favorites.len() - next.len();
    if removed > 0 {
        save_favorites(store, &next)?;
        state.favorites = next;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::load;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn toggling_twice_restores_the_set() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut favorites: Favorites = [a].into_iter().collect();
        let original = favorites.clone();

        assert!(toggle_id(&mut favorites, b));
        assert!(!toggle_id(&mut favorites, b));
        assert_eq!(favorites, original);

        assert!(!toggle_id(&mut favorites, a));
        assert!(toggle_id(&mut favorites, a));
        assert_eq!(favorites, original);
    }

    #[test]
    fn toggle_persists_favorites() {
        let mut store = StoreFixture::new().with_cars(2).build();
        let mut state = CollectionState::from(load(&store));
        toggle(&mut store, &mut state, 1).unwrap();

        let persisted = load(&store).favorites;
        assert!(persisted.contains(&state.cars[1].id));
        assert_eq!(persisted, state.favorites);
    }

    #[test]
    fn failed_write_keeps_favorites_unchanged() {
        let mut store = StoreFixture::new()
            .with_favorite_car("Fav")
            .with_cars(1)
            .build();
        let mut state = CollectionState::from(load(&store));
        let before = state.favorites.clone();
        store.set_failing_writes(true);

        let err = toggle(&mut store, &mut state, 1).unwrap_err();
        assert!(matches!(err, crate::error::CarzError::Persistence(_)));
        assert_eq!(state.favorites, before);

        assert!(toggle(&mut store, &mut state, 0).is_err());
        assert_eq!(state.favorites, before);
        assert_eq!(load(&store).favorites, before);
    }

    #[test]
    fn toggle_out_of_range_is_ignored() {
        let mut store = InMemoryStore::new();
        let mut state = CollectionState::default();
        let result = toggle(&mut store, &mut state, 0).unwrap();
        assert!(result.affected_cars.is_empty());
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn prune_removes_orphans_only() {
        let mut store = StoreFixture::new()
            .with_favorite_car("Kept")
            .with_cars(1)
            .build();
        let mut state = CollectionState::from(load(&store));
        state.favorites.insert(Uuid::new_v4());

        assert_eq!(prune(&mut store, &mut state).unwrap(), 1);
        assert_eq!(state.favorites.len(), 1);
        assert!(state.favorites.contains(&state.cars[0].id));
        assert_eq!(load(&store).favorites, state.favorites);
    }
}
